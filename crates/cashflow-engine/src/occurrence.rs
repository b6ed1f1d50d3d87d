//! Expansion of a schedule into raw (unadjusted) occurrence dates.

use chrono::{Datelike, NaiveDate};

use cashflow_domain::{month_has_day, Frequency, ScheduleItem};

/// Steps generated per frequency. Every cadence covers roughly thirteen months.
pub const MONTHLY_STEPS: u32 = 13;
pub const WEEKLY_STEPS: u32 = 53;
pub const YEARLY_STEPS: u32 = 1;
pub const QUARTERLY_STEPS: u32 = 4;
pub const BIWEEKLY_STEPS: u32 = 27;

/// Upper bound on single-day pulls when repairing day-of-month drift.
pub const MAX_DRIFT_CORRECTIONS: u32 = 3;

/// Number of occurrences expanded for `frequency`.
pub fn horizon_steps(frequency: Frequency) -> u32 {
    match frequency {
        Frequency::Monthly => MONTHLY_STEPS,
        Frequency::Weekly => WEEKLY_STEPS,
        Frequency::Yearly => YEARLY_STEPS,
        Frequency::Quarterly => QUARTERLY_STEPS,
        Frequency::BiWeekly => BIWEEKLY_STEPS,
        Frequency::Onetime => 1,
    }
}

/// Produces the schedule's raw occurrence dates in ascending order.
///
/// Step `k` is measured from the anchor itself, so a clamped month end
/// (Jan 31 -> Feb 28) does not leak into later months.
pub fn raw_occurrences(item: &ScheduleItem) -> Vec<NaiveDate> {
    let Some(cadence) = item.frequency.cadence() else {
        return vec![item.anchor_date];
    };
    let intended_day = item.intended_day();
    (0..horizon_steps(item.frequency))
        .filter_map(|step| cadence.offset(item.anchor_date, step))
        .map(|date| {
            if item.frequency.corrects_drift() {
                correct_drift(date, intended_day)
            } else {
                date
            }
        })
        .collect()
}

/// Pulls `date` forward towards `intended_day` when month arithmetic slipped it.
///
/// At most [`MAX_DRIFT_CORRECTIONS`] days are added, and only while the next
/// day exists in the month and does not overshoot the intended day. Drift that
/// cannot be repaired is left in place.
pub fn correct_drift(date: NaiveDate, intended_day: u32) -> NaiveDate {
    let mut corrected = date;
    for _ in 0..MAX_DRIFT_CORRECTIONS {
        let next_day = corrected.day() + 1;
        if next_day > intended_day || !month_has_day(corrected, next_day) {
            break;
        }
        match corrected.with_day(next_day) {
            Some(next) => corrected = next,
            None => break,
        }
    }
    corrected
}

#[cfg(test)]
mod tests {
    use cashflow_domain::{OwnerId, Polarity};
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn item(frequency: Frequency, anchor: NaiveDate, first: Option<NaiveDate>) -> ScheduleItem {
        ScheduleItem {
            id: Uuid::new_v4(),
            owner: OwnerId::new("alice"),
            name: "Rent".into(),
            amount: dec!(1200.00),
            polarity: Polarity::Expense,
            frequency,
            anchor_date: anchor,
            first_date: first,
        }
    }

    #[test]
    fn step_counts_per_frequency() {
        let anchor = date(2025, 1, 15);
        let counts: Vec<usize> = [
            Frequency::Monthly,
            Frequency::Weekly,
            Frequency::Yearly,
            Frequency::Quarterly,
            Frequency::BiWeekly,
            Frequency::Onetime,
        ]
        .into_iter()
        .map(|frequency| raw_occurrences(&item(frequency, anchor, None)).len())
        .collect();
        assert_eq!(counts, vec![13, 53, 1, 4, 27, 1]);
    }

    #[test]
    fn month_end_rent_lands_on_february_28() {
        let anchor = date(2025, 1, 31);
        let dates = raw_occurrences(&item(Frequency::Monthly, anchor, Some(anchor)));
        assert_eq!(dates[0], anchor);
        assert_eq!(dates[1], date(2025, 2, 28));
        assert_eq!(dates[2], date(2025, 3, 31));
        assert_eq!(dates[3], date(2025, 4, 30));
    }

    #[test]
    fn drifted_anchor_is_pulled_back_to_intended_day() {
        // Anchor already slipped to the 28th by an earlier February advance.
        let dates = raw_occurrences(&item(
            Frequency::Monthly,
            date(2025, 2, 28),
            Some(date(2025, 1, 31)),
        ));
        assert_eq!(dates[0], date(2025, 2, 28));
        assert_eq!(dates[1], date(2025, 3, 31));
        assert_eq!(dates[2], date(2025, 4, 30));
    }

    #[test]
    fn every_long_enough_month_hits_the_intended_day() {
        let anchor = date(2025, 1, 30);
        for occurrence in raw_occurrences(&item(Frequency::Monthly, anchor, Some(anchor))) {
            if month_has_day(occurrence, 30) {
                assert_eq!(occurrence.day(), 30, "{occurrence}");
            } else {
                assert_eq!(occurrence.month(), 2);
            }
        }
    }

    #[test]
    fn drift_correction_is_bounded() {
        // Four days short: only three can be recovered.
        assert_eq!(correct_drift(date(2025, 3, 27), 31), date(2025, 3, 30));
        assert_eq!(correct_drift(date(2025, 3, 28), 31), date(2025, 3, 31));
        assert_eq!(correct_drift(date(2025, 3, 15), 10), date(2025, 3, 15));
    }

    #[test]
    fn quarterly_steps_are_three_months_apart() {
        let anchor = date(2025, 1, 31);
        let dates = raw_occurrences(&item(Frequency::Quarterly, anchor, Some(anchor)));
        assert_eq!(
            dates,
            vec![
                date(2025, 1, 31),
                date(2025, 4, 30),
                date(2025, 7, 31),
                date(2025, 10, 31)
            ]
        );
    }

    #[test]
    fn weekly_cadences_do_not_correct_drift() {
        let anchor = date(2025, 1, 31);
        let dates = raw_occurrences(&item(Frequency::BiWeekly, anchor, Some(anchor)));
        assert_eq!(dates[1], date(2025, 2, 14));
        assert_eq!(dates[26], date(2026, 1, 30));
    }
}
