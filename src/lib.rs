#![doc(test(attr(deny(warnings))))]

//! Cashflow projects an account's balance forward from its recurring
//! schedules, manual holds and skip overrides.
//!
//! The heavy lifting lives in the workspace crates; this crate wires them
//! together behind the `cashflow_cli` binary.

pub mod cli;
pub mod errors;
pub mod utils;

pub use cashflow_config as config;
pub use cashflow_domain as domain;
pub use cashflow_engine as engine;
pub use cashflow_storage_json as storage;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing with the default filter.
pub fn init() {
    init_with_filter(None);
}

/// Initializes global tracing, preferring `RUST_LOG`, then `filter`, then `cashflow=info`.
pub fn init_with_filter(filter: Option<&str>) {
    INIT_TRACING.call_once(|| {
        utils::init_tracing(filter);
        tracing::debug!("cashflow tracing initialized");
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init();
        super::init_with_filter(Some("cashflow=debug"));
    }
}
