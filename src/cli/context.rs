use std::path::PathBuf;

use cashflow_config::{default_base_dir, Config, ConfigManager};
use cashflow_domain::{AccountBook, OwnerId};
use cashflow_engine::{Clock, CoreError, FixedClock, ProjectionService};
use cashflow_storage_json::{JsonAccountStorage, StoragePaths};
use tracing::debug;

use crate::cli::{args::GlobalOptions, system_clock::SystemClock};
use crate::errors::CliError;

/// Everything a command handler needs: storage, clock, owner and output mode.
pub struct CliContext {
    pub config: Config,
    pub base_dir: PathBuf,
    pub storage: JsonAccountStorage,
    pub clock: Box<dyn Clock>,
    pub owner: Option<OwnerId>,
    pub json: bool,
}

impl CliContext {
    pub fn new(options: &GlobalOptions) -> Result<Self, CliError> {
        let base_dir = options.data_dir.clone().unwrap_or_else(default_base_dir);
        let manager = ConfigManager::with_base_dir(base_dir.clone())?;
        let config = manager.load()?;
        crate::init_with_filter(config.log_filter.as_deref());

        let data_root = manager.data_root(&config);
        let storage = JsonAccountStorage::with_retention(
            StoragePaths::under(&data_root),
            config.backup_retention,
        )?;
        debug!(data_root = %data_root.display(), "opened account storage");

        let clock: Box<dyn Clock> = match options.today {
            Some(today) => Box::new(FixedClock::new(today)),
            None => Box::new(SystemClock),
        };
        let owner = options
            .owner
            .clone()
            .or_else(|| config.default_owner.clone())
            .map(OwnerId::new)
            .filter(|owner| !owner.as_str().is_empty());

        Ok(Self {
            config,
            base_dir,
            storage,
            clock,
            owner,
            json: options.json,
        })
    }

    pub fn owner(&self) -> Result<&OwnerId, CliError> {
        self.owner.as_ref().ok_or_else(|| {
            CliError::Input("no account owner; pass --owner or set default_owner".into())
        })
    }

    pub fn projection_service(&self) -> ProjectionService<'_> {
        ProjectionService::new(&self.storage, self.clock.as_ref())
    }

    /// Loads the owner's book, applies `mutate` and saves the result.
    pub fn update_book<T>(
        &self,
        mutate: impl FnOnce(&mut AccountBook) -> Result<T, CoreError>,
    ) -> Result<T, CliError> {
        let owner = self.owner()?;
        Ok(self.projection_service().update_book(owner, mutate)?)
    }

    pub fn load_book(&self) -> Result<AccountBook, CliError> {
        let owner = self.owner()?;
        Ok(cashflow_engine::load_or_new(&self.storage, owner)?)
    }
}
