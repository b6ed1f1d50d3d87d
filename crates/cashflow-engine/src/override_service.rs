//! Manual holds and skip overrides.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::info;
use uuid::Uuid;

use cashflow_domain::{AccountBook, Hold, Owned, Polarity, ProjectedEvent, Skip};

use crate::CoreError;

fn ensure_owner(book: &AccountBook, entity: &impl Owned) -> Result<(), CoreError> {
    if book.owns(entity) {
        Ok(())
    } else {
        Err(CoreError::OwnerMismatch {
            expected: book.owner.to_string(),
            found: entity.owner().to_string(),
        })
    }
}

fn validate_amount(amount: Decimal) -> Result<(), CoreError> {
    if amount.is_sign_negative() {
        return Err(CoreError::Validation(format!(
            "amount must not be negative (got {amount})"
        )));
    }
    Ok(())
}

pub struct HoldService;

impl HoldService {
    /// Stores a hold; it is projected for tomorrow until removed.
    pub fn add(book: &mut AccountBook, hold: Hold) -> Result<Uuid, CoreError> {
        ensure_owner(book, &hold)?;
        validate_amount(hold.amount)?;
        let id = hold.id;
        info!(hold = %hold.name, amount = %hold.amount, "added hold");
        book.holds.push(hold);
        book.touch();
        Ok(id)
    }

    pub fn remove(book: &mut AccountBook, id: Uuid) -> Result<Hold, CoreError> {
        let index = book
            .holds
            .iter()
            .position(|hold| hold.id == id)
            .ok_or(CoreError::HoldNotFound(id))?;
        let removed = book.holds.remove(index);
        book.touch();
        Ok(removed)
    }
}

pub struct SkipService;

impl SkipService {
    pub fn add(book: &mut AccountBook, skip: Skip) -> Result<Uuid, CoreError> {
        ensure_owner(book, &skip)?;
        validate_amount(skip.amount)?;
        let id = skip.id;
        info!(skip = %skip.name, date = %skip.date, "added skip");
        book.skips.push(skip);
        book.touch();
        Ok(id)
    }

    /// Cancels one projected occurrence by storing its mirror image.
    pub fn skip_occurrence(
        book: &mut AccountBook,
        event: &ProjectedEvent,
    ) -> Result<Uuid, CoreError> {
        if event.is_skip_marked() {
            return Err(CoreError::Validation(format!(
                "`{}` is already a skip",
                event.name
            )));
        }
        let skip = Skip::new(
            book.owner.clone(),
            event.name.clone(),
            event.polarity.opposite(),
            event.amount,
            event.date,
        );
        Self::add(book, skip)
    }

    /// Convenience for callers that know the transaction but not its event.
    pub fn skip_transaction(
        book: &mut AccountBook,
        name: &str,
        polarity: Polarity,
        amount: Decimal,
        date: NaiveDate,
    ) -> Result<Uuid, CoreError> {
        let skip = Skip::new(book.owner.clone(), name, polarity.opposite(), amount, date);
        Self::add(book, skip)
    }

    pub fn remove(book: &mut AccountBook, id: Uuid) -> Result<Skip, CoreError> {
        let index = book
            .skips
            .iter()
            .position(|skip| skip.id == id)
            .ok_or(CoreError::SkipNotFound(id))?;
        let removed = book.skips.remove(index);
        book.touch();
        Ok(removed)
    }
}
