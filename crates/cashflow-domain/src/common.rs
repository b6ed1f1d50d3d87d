//! Shared traits, calendar utilities, and enums for cash-flow primitives.

use std::{fmt, str::FromStr};

use chrono::{Datelike, Duration, Months, NaiveDate, Weekday};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Date layout used by persisted records and the CLI.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Exposes a stable identifier for entities stored in an account book.
pub trait Identifiable {
    fn id(&self) -> Uuid;
}

/// Provides read-only access to an entity's display name.
pub trait NamedEntity {
    fn name(&self) -> &str;
}

/// Supplies a common contract for retrieving currency amounts.
pub trait Amounted {
    fn amount(&self) -> Decimal;
}

/// Ties an entity to the account owner it was created for.
pub trait Owned {
    fn owner(&self) -> &OwnerId;
}

/// Opaque identifier of the account owner every record is scoped to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OwnerId(String);

impl OwnerId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into().trim().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OwnerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
/// Direction of a cash movement relative to the account.
pub enum Polarity {
    Income,
    Expense,
}

impl Polarity {
    /// Returns the polarity that cancels this one.
    pub fn opposite(self) -> Self {
        match self {
            Polarity::Income => Polarity::Expense,
            Polarity::Expense => Polarity::Income,
        }
    }

    /// Applies the balance sign convention: expenses subtract, income adds.
    pub fn signed(self, amount: Decimal) -> Decimal {
        match self {
            Polarity::Income => amount,
            Polarity::Expense => -amount,
        }
    }
}

impl fmt::Display for Polarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Polarity::Income => "Income",
            Polarity::Expense => "Expense",
        };
        f.write_str(label)
    }
}

impl FromStr for Polarity {
    type Err = ParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "Income" => Ok(Polarity::Income),
            "Expense" => Ok(Polarity::Expense),
            other => Err(ParseError::UnknownPolarity(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
/// Enumerates the cadences a schedule can recur on.
pub enum Frequency {
    Monthly,
    Weekly,
    Yearly,
    Quarterly,
    BiWeekly,
    Onetime,
}

impl Frequency {
    pub const ALL: [Frequency; 6] = [
        Frequency::Monthly,
        Frequency::Weekly,
        Frequency::Yearly,
        Frequency::Quarterly,
        Frequency::BiWeekly,
        Frequency::Onetime,
    ];

    /// Spacing between consecutive occurrences, `None` for one-time schedules.
    pub fn cadence(self) -> Option<Cadence> {
        match self {
            Frequency::Monthly => Some(Cadence::Months(1)),
            Frequency::Quarterly => Some(Cadence::Months(3)),
            Frequency::Yearly => Some(Cadence::Months(12)),
            Frequency::Weekly => Some(Cadence::Weeks(1)),
            Frequency::BiWeekly => Some(Cadence::Weeks(2)),
            Frequency::Onetime => None,
        }
    }

    /// Whether month arithmetic on this cadence needs day-of-month drift correction.
    pub fn corrects_drift(self) -> bool {
        matches!(self, Frequency::Monthly | Frequency::Quarterly)
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Frequency::Monthly => "Monthly",
            Frequency::Weekly => "Weekly",
            Frequency::Yearly => "Yearly",
            Frequency::Quarterly => "Quarterly",
            Frequency::BiWeekly => "BiWeekly",
            Frequency::Onetime => "Onetime",
        };
        f.write_str(label)
    }
}

impl FromStr for Frequency {
    type Err = ParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        Frequency::ALL
            .into_iter()
            .find(|frequency| frequency.to_string() == trimmed)
            .ok_or_else(|| ParseError::UnknownFrequency(trimmed.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Calendar distance between two occurrences.
pub enum Cadence {
    Months(u32),
    Weeks(u32),
}

impl Cadence {
    /// Returns `from` moved forward by `steps` periods. Month steps clamp to month end.
    pub fn offset(self, from: NaiveDate, steps: u32) -> Option<NaiveDate> {
        match self {
            Cadence::Months(every) => add_months(from, every.checked_mul(steps)?),
            Cadence::Weeks(every) => {
                from.checked_add_signed(Duration::weeks(i64::from(every) * i64::from(steps)))
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Errors raised while turning persisted text fields into typed values.
pub enum ParseError {
    UnknownFrequency(String),
    UnknownPolarity(String),
    InvalidDate { field: &'static str, value: String },
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::UnknownFrequency(value) => write!(f, "unknown frequency `{value}`"),
            ParseError::UnknownPolarity(value) => write!(f, "unknown polarity `{value}`"),
            ParseError::InvalidDate { field, value } => {
                write!(f, "invalid {field} `{value}` (expected YYYY-MM-DD)")
            }
        }
    }
}

impl std::error::Error for ParseError {}

/// Parses a `YYYY-MM-DD` date, tagging failures with the field they came from.
pub fn parse_date(field: &'static str, value: &str) -> Result<NaiveDate, ParseError> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|_| ParseError::InvalidDate {
        field,
        value: value.to_string(),
    })
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Adds calendar months, clamping the day to the target month's length.
pub fn add_months(date: NaiveDate, months: u32) -> Option<NaiveDate> {
    date.checked_add_months(Months::new(months))
}

pub fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|first_next| first_next.pred_opt())
        .map(|last| last.day())
        .unwrap_or(28)
}

/// Whether `date`'s month is long enough to contain `day`.
pub fn month_has_day(date: NaiveDate, day: u32) -> bool {
    day >= 1 && day <= days_in_month(date.year(), date.month())
}

/// Banking business days are Monday through Friday; no holiday calendar applies.
pub fn is_business_day(date: NaiveDate) -> bool {
    !matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}
