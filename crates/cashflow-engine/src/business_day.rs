//! Normalisation of raw occurrence dates onto banking business days.

use chrono::NaiveDate;

use cashflow_domain::{is_business_day, Frequency, Polarity};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Direction a raw date moves to reach a business day.
pub enum Roll {
    /// Closest business day on or before the date.
    Backward,
    /// Closest business day on or after the date.
    Forward,
    /// Date is used as entered.
    Literal,
}

/// Monthly income is paid early; everything else recurring is settled late.
pub fn roll_for(frequency: Frequency, polarity: Polarity) -> Roll {
    match (frequency, polarity) {
        (Frequency::Onetime, _) => Roll::Literal,
        (Frequency::Monthly, Polarity::Income) => Roll::Backward,
        _ => Roll::Forward,
    }
}

pub fn roll_backward(date: NaiveDate) -> NaiveDate {
    let mut current = date;
    while !is_business_day(current) {
        match current.pred_opt() {
            Some(previous) => current = previous,
            None => break,
        }
    }
    current
}

pub fn roll_forward(date: NaiveDate) -> NaiveDate {
    let mut current = date;
    while !is_business_day(current) {
        match current.succ_opt() {
            Some(next) => current = next,
            None => break,
        }
    }
    current
}

/// Maps a raw occurrence of a schedule to the day it is projected on.
pub fn adjust_to_business_day(
    date: NaiveDate,
    frequency: Frequency,
    polarity: Polarity,
) -> NaiveDate {
    match roll_for(frequency, polarity) {
        Roll::Backward => roll_backward(date),
        Roll::Forward => roll_forward(date),
        Roll::Literal => date,
    }
}
