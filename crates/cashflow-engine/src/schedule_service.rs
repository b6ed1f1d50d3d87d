//! Maintenance of an owner's recurring schedule catalog.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::info;
use uuid::Uuid;

use cashflow_domain::{AccountBook, Frequency, Polarity, ScheduleRecord};

use crate::CoreError;

/// User-supplied fields of a schedule, used for both create and update.
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleDraft {
    pub name: String,
    pub amount: Decimal,
    pub polarity: Polarity,
    pub frequency: Frequency,
    pub anchor_date: NaiveDate,
}

impl ScheduleDraft {
    pub fn new(
        name: impl Into<String>,
        amount: Decimal,
        polarity: Polarity,
        frequency: Frequency,
        anchor_date: NaiveDate,
    ) -> Self {
        Self {
            name: name.into(),
            amount,
            polarity,
            frequency,
            anchor_date,
        }
    }

    fn validate(&self) -> Result<(), CoreError> {
        if self.name.trim().is_empty() {
            return Err(CoreError::Validation("schedule name must not be empty".into()));
        }
        if self.amount.is_sign_negative() {
            return Err(CoreError::Validation(format!(
                "schedule amount must not be negative (got {})",
                self.amount
            )));
        }
        Ok(())
    }
}

pub struct ScheduleService;

impl ScheduleService {
    /// Adds a schedule whose first occurrence is its anchor.
    pub fn create(book: &mut AccountBook, draft: ScheduleDraft) -> Result<Uuid, CoreError> {
        draft.validate()?;
        let name = draft.name.trim();
        if book.schedule_named(name).is_some() {
            return Err(CoreError::DuplicateName(name.to_string()));
        }
        let record = ScheduleRecord::new(
            book.owner.clone(),
            name,
            draft.amount,
            draft.polarity,
            draft.frequency,
            draft.anchor_date,
        );
        let id = record.id;
        info!(schedule = %record.name, frequency = %draft.frequency, "created schedule");
        book.schedules.push(record);
        book.touch();
        Ok(id)
    }

    /// Replaces a schedule's fields. The first-occurrence date restarts at the new anchor.
    pub fn update(book: &mut AccountBook, id: Uuid, draft: ScheduleDraft) -> Result<(), CoreError> {
        draft.validate()?;
        let name = draft.name.trim().to_string();
        if book
            .schedules
            .iter()
            .any(|record| record.name == name && record.id != id)
        {
            return Err(CoreError::DuplicateName(name));
        }
        let record = book
            .schedule_mut(id)
            .ok_or_else(|| CoreError::ScheduleNotFound(id.to_string()))?;
        record.name = name;
        record.amount = draft.amount;
        record.polarity = draft.polarity.to_string();
        record.frequency = draft.frequency.to_string();
        record.set_anchor(draft.anchor_date);
        record.set_first_date(draft.anchor_date);
        book.touch();
        Ok(())
    }

    pub fn delete(book: &mut AccountBook, id: Uuid) -> Result<ScheduleRecord, CoreError> {
        let index = book
            .schedules
            .iter()
            .position(|record| record.id == id)
            .ok_or_else(|| CoreError::ScheduleNotFound(id.to_string()))?;
        let removed = book.schedules.remove(index);
        book.touch();
        Ok(removed)
    }

    pub fn delete_by_name(book: &mut AccountBook, name: &str) -> Result<ScheduleRecord, CoreError> {
        let id = Self::find_by_name(book, name)?.id;
        Self::delete(book, id)
    }

    pub fn find_by_name<'a>(
        book: &'a AccountBook,
        name: &str,
    ) -> Result<&'a ScheduleRecord, CoreError> {
        book.schedule_named(name.trim())
            .ok_or_else(|| CoreError::ScheduleNotFound(name.to_string()))
    }

    /// Catalog view: ordered by the anchor's day of month, unparsable anchors last.
    pub fn list_by_day_of_month(book: &AccountBook) -> Vec<&ScheduleRecord> {
        let mut records: Vec<&ScheduleRecord> = book.schedules.iter().collect();
        records.sort_by_key(|record| record.anchor_day().unwrap_or(u32::MAX));
        records
    }
}
