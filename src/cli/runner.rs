use std::env;

use tracing::debug;

use crate::cli::{
    args::split_global_options,
    commands::build_registry,
    context::CliContext,
    output::{self, OutputPreferences},
};
use crate::errors::CliError;

/// Entry point used by the `cashflow_cli` binary.
pub fn run_cli() -> Result<(), CliError> {
    let args: Vec<String> = env::args().skip(1).collect();
    run_with_args(&args)
}

/// Runs one command line, e.g. `["--owner", "alice", "project"]`.
pub fn run_with_args(args: &[String]) -> Result<(), CliError> {
    let (options, words) = split_global_options(args)?;
    let mut context = CliContext::new(&options)?;
    output::set_preferences(OutputPreferences {
        color: context.config.ui_color_enabled && !options.no_color && !options.json,
        quiet: options.json,
    });

    let words: Vec<&str> = words.iter().map(String::as_str).collect();
    let (name, rest) = match words.split_first() {
        Some((name, rest)) => (*name, rest),
        None => ("help", &[][..]),
    };
    let registry = build_registry();
    let entry = registry
        .get(name)
        .ok_or_else(|| CliError::UnknownCommand(name.to_string()))?;
    debug!(command = name, "dispatching command");
    (entry.handler)(&mut context, rest)
}
