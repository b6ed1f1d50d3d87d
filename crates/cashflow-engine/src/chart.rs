//! Chart bounds derived from a running balance series.

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};

use cashflow_domain::{ChartStatistics, RunningBalancePoint};

use crate::window::upcoming_window;

/// Headroom applied to both y-axis bounds.
pub const AXIS_PADDING: Decimal = Decimal::from_parts(11, 0, 0, false, 1);

pub fn round_cents(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Computes the headline minimum and axis ranges for `running`.
///
/// The minimum covers the whole series. The upper bound only looks at points
/// strictly inside the upcoming window and never drops below zero.
pub fn chart_statistics(running: &[RunningBalancePoint], today: NaiveDate) -> ChartStatistics {
    let window = upcoming_window(today);
    let min_balance = round_cents(
        running
            .iter()
            .map(|point| point.amount)
            .min()
            .unwrap_or(Decimal::ZERO),
    );
    let y_min = if min_balance >= Decimal::ZERO {
        Decimal::ZERO
    } else {
        min_balance * AXIS_PADDING
    };
    let window_max = running
        .iter()
        .filter(|point| window.strictly_contains(point.date))
        .map(|point| point.amount)
        .max()
        .unwrap_or(Decimal::ZERO)
        .max(Decimal::ZERO);
    ChartStatistics {
        min_balance,
        y_min,
        y_max: window_max * AXIS_PADDING,
        x_range: window,
    }
}

#[cfg(test)]
mod tests {
    use chrono::Days;
    use rust_decimal_macros::dec;

    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 12).unwrap()
    }

    fn point(offset: u64, amount: Decimal) -> RunningBalancePoint {
        RunningBalancePoint {
            date: today() + Days::new(offset),
            amount,
        }
    }

    #[test]
    fn positive_series_starts_axis_at_zero() {
        let running = vec![point(0, dec!(1000)), point(5, dec!(950)), point(10, dec!(1150))];
        let stats = chart_statistics(&running, today());
        assert_eq!(stats.min_balance, dec!(950));
        assert_eq!(stats.y_min, Decimal::ZERO);
        assert_eq!(stats.y_max, dec!(1265.0));
        assert_eq!(stats.x_range.start, today());
        assert_eq!(stats.x_range.end, NaiveDate::from_ymd_opt(2025, 5, 12).unwrap());
    }

    #[test]
    fn negative_minimum_pads_downwards() {
        let running = vec![point(0, dec!(10)), point(3, dec!(-100.005))];
        let stats = chart_statistics(&running, today());
        assert_eq!(stats.min_balance, dec!(-100.01));
        assert_eq!(stats.y_min, dec!(-110.011));
        assert_eq!(stats.y_max, dec!(0.0));
    }

    #[test]
    fn upper_bound_ignores_seed_and_far_points() {
        let running = vec![point(0, dec!(5000)), point(7, dec!(200)), point(90, dec!(9000))];
        let stats = chart_statistics(&running, today());
        assert_eq!(stats.y_max, dec!(220.0));
    }

    #[test]
    fn half_cent_rounds_away_from_zero() {
        assert_eq!(round_cents(dec!(2.345)), dec!(2.35));
        assert_eq!(round_cents(dec!(-2.345)), dec!(-2.35));
    }
}
