use cashflow_engine::{ScheduleDraft, ScheduleService};

use crate::cli::{
    args::{parse_amount, parse_day, parse_frequency, parse_polarity, required},
    context::CliContext,
    output,
    registry::CommandResult,
};
use crate::errors::CliError;

const ADD_USAGE: &str = "schedule add <name> <amount> <income|expense> <frequency> <YYYY-MM-DD>";
const UPDATE_USAGE: &str =
    "schedule update <name> <amount> <income|expense> <frequency> <YYYY-MM-DD> [new-name]";
const REMOVE_USAGE: &str = "schedule remove <name>";

pub fn list(context: &mut CliContext, _args: &[&str]) -> CommandResult {
    let book = context.load_book()?;
    let records = ScheduleService::list_by_day_of_month(&book);
    if context.json {
        println!("{}", serde_json::to_string_pretty(&records)?);
        return Ok(());
    }
    if records.is_empty() {
        output::info("No schedules.");
        return Ok(());
    }
    output::section(format!("Schedules for {}", book.owner));
    for record in records {
        output::info(format!(
            "{:>2}  {:<24} {:<8} {:<10}{}  next {}",
            record
                .anchor_day()
                .map(|day| day.to_string())
                .unwrap_or_else(|| "?".into()),
            record.name,
            record.polarity,
            record.frequency,
            output::amount(record.amount),
            record.anchor_date
        ));
    }
    Ok(())
}

fn draft_from(args: &[&str], usage: &str) -> Result<ScheduleDraft, CliError> {
    Ok(ScheduleDraft::new(
        required(args, 0, "name", usage)?,
        parse_amount(required(args, 1, "amount", usage)?)?,
        parse_polarity(required(args, 2, "polarity", usage)?)?,
        parse_frequency(required(args, 3, "frequency", usage)?)?,
        parse_day(required(args, 4, "date", usage)?)?,
    ))
}

pub fn run(context: &mut CliContext, args: &[&str]) -> CommandResult {
    let (action, rest) = args
        .split_first()
        .ok_or_else(|| CliError::Input(format!("usage: {ADD_USAGE}")))?;
    match *action {
        "add" => {
            let draft = draft_from(rest, ADD_USAGE)?;
            let name = draft.name.clone();
            context.update_book(|book| ScheduleService::create(book, draft))?;
            output::success(format!("Added schedule `{name}`"));
        }
        "update" => {
            let mut draft = draft_from(rest, UPDATE_USAGE)?;
            let current = draft.name.clone();
            if let Some(new_name) = rest.get(5) {
                draft.name = new_name.to_string();
            }
            context.update_book(|book| {
                let id = ScheduleService::find_by_name(book, &current)?.id;
                ScheduleService::update(book, id, draft)
            })?;
            output::success(format!("Updated schedule `{current}`"));
        }
        "remove" | "rm" => {
            let name = required(rest, 0, "name", REMOVE_USAGE)?;
            context.update_book(|book| ScheduleService::delete_by_name(book, name))?;
            output::success(format!("Removed schedule `{name}`"));
        }
        other => {
            return Err(CliError::Input(format!(
                "unknown schedule action `{other}`; expected add, update or remove"
            )))
        }
    }
    Ok(())
}
