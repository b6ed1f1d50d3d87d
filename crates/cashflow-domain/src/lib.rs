//! cashflow-domain
//!
//! Pure domain models (schedules, holds, skips, balances, projections).
//! No I/O, no CLI, no storage. Only data types, core enums and calendar helpers.

pub mod account;
pub mod balance;
pub mod common;
pub mod overrides;
pub mod projection;
pub mod schedule;

pub use account::*;
pub use balance::*;
pub use common::*;
pub use overrides::*;
pub use projection::*;
pub use schedule::*;
