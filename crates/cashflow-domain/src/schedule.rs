//! Recurring schedule definitions in their persisted and parsed forms.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::common::*;

/// A schedule exactly as the catalog stores it.
///
/// Polarity, frequency and both dates stay textual because external writers
/// (forms, CSV import) fill them in; [`ScheduleRecord::parse`] validates them
/// one record at a time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScheduleRecord {
    pub id: Uuid,
    pub owner: OwnerId,
    pub name: String,
    pub amount: Decimal,
    pub polarity: String,
    pub frequency: String,
    pub anchor_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_date: Option<String>,
}

impl ScheduleRecord {
    pub fn new(
        owner: OwnerId,
        name: impl Into<String>,
        amount: Decimal,
        polarity: Polarity,
        frequency: Frequency,
        anchor_date: NaiveDate,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            owner,
            name: name.into(),
            amount,
            polarity: polarity.to_string(),
            frequency: frequency.to_string(),
            anchor_date: format_date(anchor_date),
            first_date: Some(format_date(anchor_date)),
        }
    }

    /// Validates the textual fields and produces a typed [`ScheduleItem`].
    pub fn parse(&self) -> Result<ScheduleItem, ParseError> {
        let polarity = self.polarity.parse::<Polarity>()?;
        let frequency = self.frequency.parse::<Frequency>()?;
        let anchor_date = parse_date("anchor date", &self.anchor_date)?;
        let first_date = match self.first_date.as_deref() {
            Some(raw) if !raw.trim().is_empty() => Some(parse_date("first date", raw)?),
            _ => None,
        };
        Ok(ScheduleItem {
            id: self.id,
            owner: self.owner.clone(),
            name: self.name.clone(),
            amount: self.amount,
            polarity,
            frequency,
            anchor_date,
            first_date,
        })
    }

    /// Day of month of the stored anchor, when it parses.
    pub fn anchor_day(&self) -> Option<u32> {
        parse_date("anchor date", &self.anchor_date)
            .ok()
            .map(|date| date.day())
    }

    pub fn set_anchor(&mut self, date: NaiveDate) {
        self.anchor_date = format_date(date);
    }

    pub fn set_first_date(&mut self, date: NaiveDate) {
        self.first_date = Some(format_date(date));
    }
}

impl Identifiable for ScheduleRecord {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl NamedEntity for ScheduleRecord {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Owned for ScheduleRecord {
    fn owner(&self) -> &OwnerId {
        &self.owner
    }
}

/// A validated schedule ready for expansion.
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleItem {
    pub id: Uuid,
    pub owner: OwnerId,
    pub name: String,
    pub amount: Decimal,
    pub polarity: Polarity,
    pub frequency: Frequency,
    /// Next occurrence to expand from.
    pub anchor_date: NaiveDate,
    /// Originally intended occurrence; its day-of-month drives drift correction.
    pub first_date: Option<NaiveDate>,
}

impl ScheduleItem {
    /// The first-occurrence date, falling back to the anchor when none was recorded.
    pub fn first_occurrence(&self) -> NaiveDate {
        self.first_date.unwrap_or(self.anchor_date)
    }

    pub fn intended_day(&self) -> u32 {
        self.first_occurrence().day()
    }
}

impl Amounted for ScheduleItem {
    fn amount(&self) -> Decimal {
        self.amount
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    fn rent() -> ScheduleRecord {
        ScheduleRecord::new(
            OwnerId::new("alice"),
            "Rent",
            dec!(1200.00),
            Polarity::Expense,
            Frequency::Monthly,
            NaiveDate::from_ymd_opt(2025, 1, 31).unwrap(),
        )
    }

    #[test]
    fn new_record_parses_back_into_item() {
        let item = rent().parse().expect("parse rent");
        assert_eq!(item.frequency, Frequency::Monthly);
        assert_eq!(item.polarity, Polarity::Expense);
        assert_eq!(item.intended_day(), 31);
    }

    #[test]
    fn malformed_fields_are_reported() {
        let mut record = rent();
        record.frequency = "Sometimes".into();
        assert_eq!(
            record.parse(),
            Err(ParseError::UnknownFrequency("Sometimes".into()))
        );

        let mut record = rent();
        record.anchor_date = "31/01/2025".into();
        assert!(matches!(
            record.parse(),
            Err(ParseError::InvalidDate { field: "anchor date", .. })
        ));
    }

    #[test]
    fn missing_first_date_falls_back_to_anchor() {
        let mut record = rent();
        record.first_date = None;
        let item = record.parse().expect("parse");
        assert_eq!(item.first_date, None);
        assert_eq!(item.first_occurrence(), item.anchor_date);
    }

    #[test]
    fn record_serializes_without_empty_first_date() {
        let mut record = rent();
        record.first_date = None;
        let json = serde_json::to_string(&record).expect("serialize");
        assert!(!json.contains("first_date"));
        let back: ScheduleRecord = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, record);
    }
}
