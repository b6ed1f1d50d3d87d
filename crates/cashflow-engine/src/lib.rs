//! cashflow-engine
//!
//! Projection engine and account services for recurring cash flow.
//! Depends on cashflow-domain. No CLI, no terminal I/O, no direct file access:
//! persistence goes through the [`storage::AccountStorage`] trait.

pub mod anchor;
pub mod balance_service;
pub mod business_day;
pub mod chart;
pub mod error;
pub mod horizon;
pub mod occurrence;
pub mod override_merger;
pub mod override_service;
pub mod projection_service;
pub mod schedule_service;
pub mod storage;
pub mod time;
pub mod window;

pub use anchor::*;
pub use balance_service::*;
pub use business_day::*;
pub use chart::*;
pub use error::CoreError;
pub use horizon::*;
pub use occurrence::*;
pub use override_merger::*;
pub use override_service::*;
pub use projection_service::*;
pub use schedule_service::*;
pub use storage::{load_or_new, AccountStorage, InMemoryAccountStorage};
pub use time::{Clock, FixedClock};
pub use window::*;
