use uuid::Uuid;

use cashflow_domain::{AccountBook, Hold};
use cashflow_engine::{CoreError, HoldService, SkipService};

use crate::cli::{
    args::{parse_amount, parse_day, parse_polarity, required},
    context::CliContext,
    output,
    registry::CommandResult,
};
use crate::errors::CliError;

const HOLD_ADD_USAGE: &str = "hold add <name> <amount> <income|expense>";
const HOLD_REMOVE_USAGE: &str = "hold remove <name|id>";
const SKIP_ADD_USAGE: &str = "skip add <name> <amount> <income|expense> <YYYY-MM-DD>";
const SKIP_REMOVE_USAGE: &str = "skip remove <name|id>";

/// Resolves a user reference that is either an id or an exact name.
fn resolve<'a, T: 'a>(
    items: impl IntoIterator<Item = &'a T>,
    reference: &str,
    id_of: impl Fn(&T) -> Uuid,
    name_of: impl Fn(&T) -> &str,
) -> Option<Uuid> {
    let wanted = Uuid::parse_str(reference).ok();
    items
        .into_iter()
        .find(|&item| Some(id_of(item)) == wanted || name_of(item) == reference)
        .map(id_of)
}

fn hold_id(book: &AccountBook, reference: &str) -> Result<Uuid, CoreError> {
    resolve(&book.holds, reference, |hold| hold.id, |hold| hold.name.as_str())
        .ok_or_else(|| CoreError::Validation(format!("no hold matches `{reference}`")))
}

fn skip_id(book: &AccountBook, reference: &str) -> Result<Uuid, CoreError> {
    resolve(&book.skips, reference, |skip| skip.id, |skip| skip.name.as_str())
        .ok_or_else(|| CoreError::Validation(format!("no skip matches `{reference}`")))
}

pub fn hold(context: &mut CliContext, args: &[&str]) -> CommandResult {
    match args.split_first() {
        Some((&"add", rest)) => {
            let name = required(rest, 0, "name", HOLD_ADD_USAGE)?;
            let amount = parse_amount(required(rest, 1, "amount", HOLD_ADD_USAGE)?)?;
            let polarity = parse_polarity(required(rest, 2, "polarity", HOLD_ADD_USAGE)?)?;
            context.update_book(|book| {
                let hold = Hold::new(book.owner.clone(), name, polarity, amount);
                HoldService::add(book, hold)
            })?;
            output::success(format!("Added hold `{name}`"));
        }
        Some((&"remove", rest)) | Some((&"rm", rest)) => {
            let reference = required(rest, 0, "name|id", HOLD_REMOVE_USAGE)?;
            let removed = context.update_book(|book| {
                let id = hold_id(book, reference)?;
                HoldService::remove(book, id)
            })?;
            output::success(format!("Removed hold `{}`", removed.name));
        }
        Some((&"list", _)) | None => {
            let book = context.load_book()?;
            if context.json {
                println!("{}", serde_json::to_string_pretty(&book.holds)?);
                return Ok(());
            }
            if book.holds.is_empty() {
                output::info("No holds.");
            }
            for hold in &book.holds {
                output::info(format!(
                    "{}  {:<8}{}  {}",
                    hold.id,
                    hold.polarity.to_string(),
                    output::amount(hold.amount),
                    hold.name
                ));
            }
        }
        Some((other, _)) => {
            return Err(CliError::Input(format!(
                "unknown hold action `{other}`; expected add, remove or list"
            )))
        }
    }
    Ok(())
}

pub fn skip(context: &mut CliContext, args: &[&str]) -> CommandResult {
    match args.split_first() {
        Some((&"add", rest)) => {
            let name = required(rest, 0, "name", SKIP_ADD_USAGE)?;
            let amount = parse_amount(required(rest, 1, "amount", SKIP_ADD_USAGE)?)?;
            let polarity = parse_polarity(required(rest, 2, "polarity", SKIP_ADD_USAGE)?)?;
            let date = parse_day(required(rest, 3, "date", SKIP_ADD_USAGE)?)?;
            context.update_book(|book| {
                SkipService::skip_transaction(book, name, polarity, amount, date)
            })?;
            output::success(format!("Skipping `{name}` on {date}"));
        }
        Some((&"remove", rest)) | Some((&"rm", rest)) => {
            let reference = required(rest, 0, "name|id", SKIP_REMOVE_USAGE)?;
            let removed = context.update_book(|book| {
                let id = skip_id(book, reference)?;
                SkipService::remove(book, id)
            })?;
            output::success(format!("Removed skip `{}` on {}", removed.name, removed.date));
        }
        Some((&"list", _)) | None => {
            let book = context.load_book()?;
            if context.json {
                println!("{}", serde_json::to_string_pretty(&book.skips)?);
                return Ok(());
            }
            if book.skips.is_empty() {
                output::info("No skips.");
            }
            for skip in &book.skips {
                output::info(format!(
                    "{}  {}  {:<8}{}  {}",
                    skip.id,
                    skip.date,
                    skip.polarity.to_string(),
                    output::amount(skip.amount),
                    skip.name
                ));
            }
        }
        Some((other, _)) => {
            return Err(CliError::Input(format!(
                "unknown skip action `{other}`; expected add, remove or list"
            )))
        }
    }
    Ok(())
}
