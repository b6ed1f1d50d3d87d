use cashflow_config::ConfigError;
use cashflow_domain::ParseError;
use cashflow_engine::CoreError;
use thiserror::Error;

/// Unified error type for engine, storage and configuration failures.
#[derive(Error, Debug)]
pub enum CashflowError {
    #[error("Account not found: {0}")]
    AccountNotFound(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Persistence error: {0}")]
    StorageError(String),
    #[error("Configuration error: {0}")]
    ConfigError(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// User-facing CLI error wrapper.
#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] CashflowError),
    #[error("Invalid input: {0}")]
    Input(String),
    #[error("Unknown command `{0}` (try `help`)")]
    UnknownCommand(String),
    #[error("Output error: {0}")]
    Output(String),
}

impl From<CoreError> for CashflowError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::AccountNotFound(owner) => CashflowError::AccountNotFound(owner),
            CoreError::ScheduleNotFound(name) => {
                CashflowError::NotFound(format!("schedule `{name}`"))
            }
            CoreError::HoldNotFound(id) => CashflowError::NotFound(format!("hold {id}")),
            CoreError::SkipNotFound(id) => CashflowError::NotFound(format!("skip {id}")),
            err @ (CoreError::DuplicateName(_)
            | CoreError::OwnerMismatch { .. }
            | CoreError::Validation(_)) => CashflowError::InvalidInput(err.to_string()),
            CoreError::Storage(message) | CoreError::Serde(message) => {
                CashflowError::StorageError(message)
            }
            CoreError::Io(err) => CashflowError::StorageError(err.to_string()),
        }
    }
}

impl From<ConfigError> for CashflowError {
    fn from(err: ConfigError) -> Self {
        CashflowError::ConfigError(err.to_string())
    }
}

impl From<ParseError> for CashflowError {
    fn from(err: ParseError) -> Self {
        CashflowError::InvalidInput(err.to_string())
    }
}

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        CliError::Core(err.into())
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        CliError::Core(err.into())
    }
}

impl From<ParseError> for CliError {
    fn from(err: ParseError) -> Self {
        CliError::Input(err.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        CliError::Output(err.to_string())
    }
}
