use crate::cli::{
    context::CliContext,
    output,
    registry::CommandResult,
};
use crate::errors::CliError;

use super::build_registry;

pub fn run(_context: &mut CliContext, args: &[&str]) -> CommandResult {
    let registry = build_registry();
    if let Some(name) = args.first() {
        let entry = registry
            .get(name)
            .ok_or_else(|| CliError::UnknownCommand(name.to_string()))?;
        output::info(format!("{} - {}", entry.name, entry.description));
        for usage in entry.usage.split(" | ") {
            output::info(format!("  {usage}"));
        }
        return Ok(());
    }
    output::section("Commands");
    for entry in registry.list() {
        output::info(format!("  {:<10} {}", entry.name, entry.description));
    }
    output::info("");
    output::info(
        "Global options: --owner <name> --data-dir <path> --today <YYYY-MM-DD> --json --no-color",
    );
    Ok(())
}
