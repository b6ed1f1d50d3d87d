//! Runs a full projection for one owner and commits the resulting book changes.

use chrono::NaiveDate;
use tracing::{info, instrument};

use cashflow_domain::{AccountBook, CashflowProjection, OwnerId};

use crate::{
    balance_service::BalanceService,
    chart::chart_statistics,
    horizon::{apply_changes, build_horizon, BookChange, RejectedSchedule},
    storage::{load_or_new, AccountStorage},
    time::Clock,
    window::project_balance,
    CoreError,
};

/// Everything a caller needs after projecting one account.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectionReport {
    pub projection: CashflowProjection,
    pub changes: Vec<BookChange>,
    /// How many of `changes` were committed to storage.
    pub applied: usize,
    pub rejected: Vec<RejectedSchedule>,
}

/// Pure projection of `book` as of `today`. The book is not modified.
pub fn project_book(book: &AccountBook, today: NaiveDate) -> ProjectionReport {
    let horizon = build_horizon(book, today);
    let balance = BalanceService::current(book);
    let balances = project_balance(balance, &horizon.events, today);
    let chart = chart_statistics(&balances.running, today);
    ProjectionReport {
        projection: CashflowProjection {
            today,
            balance,
            upcoming: balances.upcoming,
            running: balances.running,
            chart,
        },
        changes: horizon.changes,
        applied: 0,
        rejected: horizon.rejected,
    }
}

pub struct ProjectionService<'a> {
    storage: &'a dyn AccountStorage,
    clock: &'a dyn Clock,
}

impl<'a> ProjectionService<'a> {
    pub fn new(storage: &'a dyn AccountStorage, clock: &'a dyn Clock) -> Self {
        Self { storage, clock }
    }

    /// Projects `owner`'s book for the clock's current day.
    ///
    /// Anchor advances, retirements, backfills and skip purges are applied to
    /// the stored book and committed with a single save. A failed save is
    /// returned as an error and no projection is produced.
    #[instrument(skip(self, owner), fields(owner = %owner))]
    pub fn project(&self, owner: &OwnerId) -> Result<ProjectionReport, CoreError> {
        let today = self.clock.today();
        let mut book = load_or_new(self.storage, owner)?;
        let mut report = project_book(&book, today);
        if !report.changes.is_empty() {
            let applied = apply_changes(&mut book, &report.changes);
            if applied > 0 {
                self.storage.save_account(&book)?;
                info!(%today, applied, "committed projection changes");
                report.applied = applied;
            }
        }
        Ok(report)
    }

    /// Loads the book, lets `mutate` edit it, and saves it back.
    pub fn update_book<T>(
        &self,
        owner: &OwnerId,
        mutate: impl FnOnce(&mut AccountBook) -> Result<T, CoreError>,
    ) -> Result<T, CoreError> {
        let mut book = load_or_new(self.storage, owner)?;
        let result = mutate(&mut book)?;
        self.storage.save_account(&book)?;
        Ok(result)
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }
}
