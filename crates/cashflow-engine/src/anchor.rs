//! Decides how a schedule's stored anchor moves once occurrences elapse.

use chrono::NaiveDate;

use cashflow_domain::{is_business_day, ScheduleItem};

use crate::occurrence::correct_drift;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Outcome of checking a schedule against today.
pub enum AnchorDecision {
    Keep,
    /// Move the anchor forward to the given date.
    Advance(NaiveDate),
    /// One-time schedule whose date has passed; remove it.
    Retire,
}

/// Determines the anchor update for `item` given its raw occurrences.
///
/// Recurring schedules only advance on weekdays and only when an occurrence
/// is on or before `today`. The new anchor is one period after the latest
/// elapsed occurrence, so a second call on the same day finds nothing elapsed
/// and keeps the anchor.
pub fn decide_anchor(item: &ScheduleItem, raw: &[NaiveDate], today: NaiveDate) -> AnchorDecision {
    let Some(cadence) = item.frequency.cadence() else {
        return if item.anchor_date < today {
            AnchorDecision::Retire
        } else {
            AnchorDecision::Keep
        };
    };
    if !is_business_day(today) {
        return AnchorDecision::Keep;
    }
    let Some(latest_elapsed) = raw.iter().copied().filter(|date| *date <= today).max() else {
        return AnchorDecision::Keep;
    };
    let Some(mut next) = cadence.offset(latest_elapsed, 1) else {
        return AnchorDecision::Keep;
    };
    if item.frequency.corrects_drift() {
        next = correct_drift(next, item.intended_day());
    }
    if next > item.anchor_date {
        AnchorDecision::Advance(next)
    } else {
        AnchorDecision::Keep
    }
}

#[cfg(test)]
mod tests {
    use cashflow_domain::{Frequency, OwnerId, Polarity};
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    use super::*;
    use crate::occurrence::raw_occurrences;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn item(frequency: Frequency, anchor: NaiveDate, first: NaiveDate) -> ScheduleItem {
        ScheduleItem {
            id: Uuid::new_v4(),
            owner: OwnerId::new("alice"),
            name: "Gym".into(),
            amount: dec!(40.00),
            polarity: Polarity::Expense,
            frequency,
            anchor_date: anchor,
            first_date: Some(first),
        }
    }

    fn decide(item: &ScheduleItem, today: NaiveDate) -> AnchorDecision {
        decide_anchor(item, &raw_occurrences(item), today)
    }

    #[test]
    fn elapsed_monthly_anchor_advances_one_period() {
        let gym = item(Frequency::Monthly, date(2025, 3, 10), date(2025, 1, 10));
        assert_eq!(
            decide(&gym, date(2025, 3, 12)),
            AnchorDecision::Advance(date(2025, 4, 10))
        );
    }

    #[test]
    fn advance_applies_drift_correction() {
        let rent = item(Frequency::Monthly, date(2025, 2, 28), date(2025, 1, 31));
        assert_eq!(
            decide(&rent, date(2025, 3, 3)),
            AnchorDecision::Advance(date(2025, 3, 31))
        );
        let rent = item(Frequency::Monthly, date(2025, 1, 31), date(2025, 1, 31));
        assert_eq!(
            decide(&rent, date(2025, 2, 3)),
            AnchorDecision::Advance(date(2025, 2, 28))
        );
    }

    #[test]
    fn quarterly_advance_clamps_then_keeps_the_intended_day() {
        let fees = item(Frequency::Quarterly, date(2025, 1, 31), date(2025, 1, 31));
        assert_eq!(
            decide(&fees, date(2025, 2, 3)),
            AnchorDecision::Advance(date(2025, 4, 30))
        );
        let fees = item(Frequency::Quarterly, date(2025, 4, 30), date(2025, 1, 31));
        assert_eq!(
            decide(&fees, date(2025, 5, 1)),
            AnchorDecision::Advance(date(2025, 7, 31))
        );
    }

    #[test]
    fn weekend_days_never_advance() {
        let gym = item(Frequency::Weekly, date(2025, 2, 24), date(2025, 2, 24));
        assert_eq!(decide(&gym, date(2025, 3, 1)), AnchorDecision::Keep);
        assert_eq!(decide(&gym, date(2025, 3, 2)), AnchorDecision::Keep);
    }

    #[test]
    fn future_anchor_is_kept() {
        let gym = item(Frequency::Quarterly, date(2025, 4, 1), date(2025, 4, 1));
        assert_eq!(decide(&gym, date(2025, 3, 12)), AnchorDecision::Keep);
    }

    #[test]
    fn advancing_twice_on_the_same_day_is_idempotent() {
        let today = date(2025, 3, 12);
        let mut gym = item(Frequency::Weekly, date(2025, 2, 19), date(2025, 2, 19));
        let AnchorDecision::Advance(next) = decide(&gym, today) else {
            panic!("stale weekly anchor should advance");
        };
        assert_eq!(next, date(2025, 3, 19));
        gym.anchor_date = next;
        assert_eq!(decide(&gym, today), AnchorDecision::Keep);
    }

    #[test]
    fn one_time_schedules_retire_only_after_their_day() {
        let today = date(2025, 3, 12);
        let yesterday = item(Frequency::Onetime, date(2025, 3, 11), date(2025, 3, 11));
        let due_today = item(Frequency::Onetime, today, today);
        assert_eq!(decide(&yesterday, today), AnchorDecision::Retire);
        assert_eq!(decide(&due_today, today), AnchorDecision::Keep);
        // Retirement ignores the weekday guard.
        assert_eq!(decide(&yesterday, date(2025, 3, 15)), AnchorDecision::Retire);
    }
}
