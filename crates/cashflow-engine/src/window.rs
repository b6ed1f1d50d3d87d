//! Upcoming-transaction window and running balance series.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use cashflow_domain::{add_months, DateWindow, ProjectedEvent, RunningBalancePoint};

/// Length of the near-term window, in months.
pub const UPCOMING_WINDOW_MONTHS: u32 = 2;

/// `[today, today + 2 months]`. Month arithmetic clamps to the month end.
pub fn upcoming_window(today: NaiveDate) -> DateWindow {
    let end = add_months(today, UPCOMING_WINDOW_MONTHS).unwrap_or(NaiveDate::MAX);
    DateWindow { start: today, end }
}

/// Events strictly inside the upcoming window, skip-marked events excluded,
/// ordered by date. Events on the same date keep their input order.
pub fn upcoming_transactions(events: &[ProjectedEvent], today: NaiveDate) -> Vec<ProjectedEvent> {
    let window = upcoming_window(today);
    let mut upcoming: Vec<ProjectedEvent> = events
        .iter()
        .filter(|event| window.strictly_contains(event.date) && !event.is_skip_marked())
        .cloned()
        .collect();
    upcoming.sort_by_key(|event| event.date);
    upcoming
}

/// Signed net amount per date. Dates without events are absent.
pub fn net_by_date(events: &[ProjectedEvent]) -> BTreeMap<NaiveDate, Decimal> {
    let mut sums = BTreeMap::new();
    for event in events {
        *sums.entry(event.date).or_insert(Decimal::ZERO) += event.signed_amount();
    }
    sums
}

/// Running balance seeded at `(today, balance)`; only dates after today move it.
pub fn running_balance(
    balance: Decimal,
    sums: &BTreeMap<NaiveDate, Decimal>,
    today: NaiveDate,
) -> Vec<RunningBalancePoint> {
    let mut running = vec![RunningBalancePoint {
        date: today,
        amount: balance,
    }];
    let mut accumulator = balance;
    for (date, net) in sums.iter().filter(|(date, _)| **date > today) {
        accumulator += *net;
        running.push(RunningBalancePoint {
            date: *date,
            amount: accumulator,
        });
    }
    running
}

#[derive(Debug, Clone, PartialEq)]
pub struct BalanceProjection {
    pub upcoming: Vec<ProjectedEvent>,
    pub running: Vec<RunningBalancePoint>,
}

/// Builds both the upcoming list and the running series from one event stream.
pub fn project_balance(
    balance: Decimal,
    events: &[ProjectedEvent],
    today: NaiveDate,
) -> BalanceProjection {
    BalanceProjection {
        upcoming: upcoming_transactions(events, today),
        running: running_balance(balance, &net_by_date(events), today),
    }
}
