use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::common::*;

/// A known true account balance as of `date`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Balance {
    pub id: Uuid,
    pub owner: OwnerId,
    pub amount: Decimal,
    pub date: NaiveDate,
}

impl Balance {
    pub fn new(owner: OwnerId, amount: Decimal, date: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4(),
            owner,
            amount,
            date,
        }
    }
}

impl Identifiable for Balance {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Amounted for Balance {
    fn amount(&self) -> Decimal {
        self.amount
    }
}

impl Owned for Balance {
    fn owner(&self) -> &OwnerId {
        &self.owner
    }
}

/// Picks the most recent balance: greatest date, ties resolved to the last written row.
pub fn latest_balance<'a>(
    balances: impl IntoIterator<Item = &'a Balance>,
) -> Option<&'a Balance> {
    balances.into_iter().max_by_key(|balance| balance.date)
}
