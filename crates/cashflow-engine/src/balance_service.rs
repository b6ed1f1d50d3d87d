use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::{info, warn};

use cashflow_domain::{latest_balance, AccountBook, Balance};

pub struct BalanceService;

impl BalanceService {
    /// The latest balance recorded for the book's owner, or zero when none was.
    ///
    /// Rows written under another owner are skipped with a warning.
    pub fn current(book: &AccountBook) -> Decimal {
        let owned = book.balances.iter().filter(|balance| {
            let owned = book.owns(*balance);
            if !owned {
                warn!(
                    owner = %book.owner,
                    found = %balance.owner,
                    balance_id = %balance.id,
                    "ignoring balance recorded for another owner"
                );
            }
            owned
        });
        latest_balance(owned)
            .map(|balance| balance.amount)
            .unwrap_or(Decimal::ZERO)
    }

    /// Discards every stored balance and keeps only the new one.
    pub fn supersede(book: &mut AccountBook, amount: Decimal, date: NaiveDate) {
        info!(%amount, %date, discarded = book.balances.len(), "superseding balance");
        book.balances.clear();
        book.balances.push(Balance::new(book.owner.clone(), amount, date));
        book.touch();
    }

    /// Appends a balance observation without discarding history.
    pub fn record(book: &mut AccountBook, amount: Decimal, date: NaiveDate) {
        info!(%amount, %date, "recording balance");
        book.balances.push(Balance::new(book.owner.clone(), amount, date));
        book.touch();
    }
}
