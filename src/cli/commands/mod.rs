mod balance;
mod help;
mod overrides;
mod project;
mod schedule;

use crate::cli::registry::{CommandEntry, CommandRegistry};

pub fn build_registry() -> CommandRegistry {
    let mut registry = CommandRegistry::new();
    registry.register(CommandEntry::new(
        "project",
        "Project upcoming transactions and the running balance",
        "project",
        project::run,
    ));
    registry.register(CommandEntry::new(
        "schedules",
        "List recurring schedules by day of month",
        "schedules",
        schedule::list,
    ));
    registry.register(CommandEntry::new(
        "schedule",
        "Add, update or remove a recurring schedule",
        concat!(
            "schedule add <name> <amount> <income|expense> <frequency> <YYYY-MM-DD> | ",
            "schedule update <name> <amount> <income|expense> <frequency> <YYYY-MM-DD> ",
            "[new-name] | schedule remove <name>"
        ),
        schedule::run,
    ));
    registry.register(CommandEntry::new(
        "hold",
        "Manage manual holds projected for tomorrow",
        "hold add <name> <amount> <income|expense> | hold remove <name|id> | hold list",
        overrides::hold,
    ));
    registry.register(CommandEntry::new(
        "skip",
        "Cancel one occurrence of a transaction",
        concat!(
            "skip add <name> <amount> <income|expense> <YYYY-MM-DD> | ",
            "skip remove <name|id> | skip list"
        ),
        overrides::skip,
    ));
    registry.register(CommandEntry::new(
        "balance",
        "Show, replace or record the known account balance",
        "balance show | balance set <amount> [YYYY-MM-DD] | balance record <amount> [YYYY-MM-DD]",
        balance::run,
    ));
    registry.register(CommandEntry::new(
        "help",
        "Show available commands",
        "help [command]",
        help::run,
    ));
    registry
}
