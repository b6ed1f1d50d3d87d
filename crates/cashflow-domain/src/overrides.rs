//! Manual overrides layered on top of the schedule catalog: holds and skips.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::common::*;

/// Marker appended to skip event names; marked events stay out of the upcoming list.
pub const SKIP_MARKER: &str = "(SKIP)";

/// Returns `name` carrying the skip marker exactly once.
pub fn marked_name(name: &str) -> String {
    if has_skip_marker(name) {
        name.to_string()
    } else {
        format!("{} {}", name.trim_end(), SKIP_MARKER)
    }
}

pub fn has_skip_marker(name: &str) -> bool {
    name.contains(SKIP_MARKER)
}

/// A pending transaction injected by hand; it always lands tomorrow.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Hold {
    pub id: Uuid,
    pub owner: OwnerId,
    pub name: String,
    pub polarity: Polarity,
    pub amount: Decimal,
}

impl Hold {
    pub fn new(
        owner: OwnerId,
        name: impl Into<String>,
        polarity: Polarity,
        amount: Decimal,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            owner,
            name: name.into(),
            polarity,
            amount,
        }
    }
}

impl Identifiable for Hold {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl NamedEntity for Hold {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Amounted for Hold {
    fn amount(&self) -> Decimal {
        self.amount
    }
}

impl Owned for Hold {
    fn owner(&self) -> &OwnerId {
        &self.owner
    }
}

/// Offsets one projected occurrence in the balance sum.
///
/// The polarity is the opposite of the transaction being cancelled, so the
/// two cancel out on that date.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Skip {
    pub id: Uuid,
    pub owner: OwnerId,
    pub name: String,
    pub polarity: Polarity,
    pub amount: Decimal,
    pub date: NaiveDate,
}

impl Skip {
    pub fn new(
        owner: OwnerId,
        name: impl Into<String>,
        polarity: Polarity,
        amount: Decimal,
        date: NaiveDate,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            owner,
            name: name.into(),
            polarity,
            amount,
            date,
        }
    }

    /// Whether the skip's date is already behind `today`.
    pub fn is_elapsed(&self, today: NaiveDate) -> bool {
        self.date < today
    }
}

impl Identifiable for Skip {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl NamedEntity for Skip {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Amounted for Skip {
    fn amount(&self) -> Decimal {
        self.amount
    }
}

impl Owned for Skip {
    fn owner(&self) -> &OwnerId {
        &self.owner
    }
}
