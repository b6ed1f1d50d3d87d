use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Account not found: {0}")]
    AccountNotFound(String),
    #[error("Schedule not found: {0}")]
    ScheduleNotFound(String),
    #[error("Hold not found: {0}")]
    HoldNotFound(Uuid),
    #[error("Skip not found: {0}")]
    SkipNotFound(Uuid),
    #[error("A schedule named `{0}` already exists")]
    DuplicateName(String),
    #[error("Record belongs to `{found}`, not `{expected}`")]
    OwnerMismatch { expected: String, found: String },
    #[error("Validation failed: {0}")]
    Validation(String),
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("Serialization error: {0}")]
    Serde(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
