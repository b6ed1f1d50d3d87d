//! Ephemeral outputs of a projection run.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{common::*, overrides::has_skip_marker};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
/// Where a projected event came from.
pub enum EventOrigin {
    Schedule,
    Hold,
    Skip,
}

/// One concrete dated transaction in the projection horizon.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProjectedEvent {
    pub polarity: Polarity,
    pub name: String,
    pub amount: Decimal,
    pub date: NaiveDate,
    pub origin: EventOrigin,
}

impl ProjectedEvent {
    /// Amount with the balance sign convention applied.
    pub fn signed_amount(&self) -> Decimal {
        self.polarity.signed(self.amount)
    }

    /// Marker-tagged events count toward balances but are hidden from listings.
    pub fn is_skip_marked(&self) -> bool {
        has_skip_marker(&self.name)
    }
}

impl Amounted for ProjectedEvent {
    fn amount(&self) -> Decimal {
        self.amount
    }
}

impl NamedEntity for ProjectedEvent {
    fn name(&self) -> &str {
        &self.name
    }
}

/// Cumulative projected balance at the end of `date`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct RunningBalancePoint {
    pub date: NaiveDate,
    pub amount: Decimal,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
/// A date range with explicit endpoints.
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    /// Open membership: `start < date < end`.
    pub fn strictly_contains(&self, date: NaiveDate) -> bool {
        date > self.start && date < self.end
    }
}

/// Display-range bounds derived from a running balance series.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChartStatistics {
    /// Lowest projected balance, rounded to cents.
    pub min_balance: Decimal,
    pub y_min: Decimal,
    pub y_max: Decimal,
    pub x_range: DateWindow,
}

/// Complete result of projecting one account.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CashflowProjection {
    pub today: NaiveDate,
    pub balance: Decimal,
    pub upcoming: Vec<ProjectedEvent>,
    pub running: Vec<RunningBalancePoint>,
    pub chart: ChartStatistics,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_membership_modes() {
        let day = |d| NaiveDate::from_ymd_opt(2025, 3, d).unwrap();
        let window = DateWindow {
            start: day(1),
            end: day(10),
        };
        assert!(!window.strictly_contains(day(1)));
        assert!(window.strictly_contains(day(9)));
        assert!(!window.strictly_contains(day(10)));
    }
}
