pub mod args;
mod commands;
pub mod context;
pub mod output;
pub mod registry;
mod runner;
pub mod system_clock;

pub use runner::{run_cli, run_with_args};
