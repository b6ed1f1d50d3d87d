use cashflow_engine::BalanceService;

use crate::cli::{
    args::{parse_amount, parse_day, required},
    context::CliContext,
    output,
    registry::CommandResult,
};
use crate::errors::CliError;

const SET_USAGE: &str = "balance set <amount> [YYYY-MM-DD]";
const RECORD_USAGE: &str = "balance record <amount> [YYYY-MM-DD]";

pub fn run(context: &mut CliContext, args: &[&str]) -> CommandResult {
    match args.split_first() {
        Some((&"show", _)) | None => {
            let book = context.load_book()?;
            let current = BalanceService::current(&book);
            if context.json {
                println!("{}", serde_json::json!({ "owner": book.owner, "balance": current }));
            } else {
                output::info(format!("Current balance: {}", output::amount(current)));
            }
        }
        Some((&"set", rest)) => {
            let amount = parse_amount(required(rest, 0, "amount", SET_USAGE)?)?;
            let date = match rest.get(1) {
                Some(raw) => parse_day(raw)?,
                None => context.clock.today(),
            };
            context.update_book(|book| {
                BalanceService::supersede(book, amount, date);
                Ok(())
            })?;
            output::success(format!("Balance set to {amount:.2} as of {date}"));
        }
        Some((&"record", rest)) => {
            let amount = parse_amount(required(rest, 0, "amount", RECORD_USAGE)?)?;
            let date = match rest.get(1) {
                Some(raw) => parse_day(raw)?,
                None => context.clock.today(),
            };
            context.update_book(|book| {
                BalanceService::record(book, amount, date);
                Ok(())
            })?;
            output::success(format!("Recorded balance {amount:.2} on {date}"));
        }
        Some((other, _)) => {
            return Err(CliError::Input(format!(
                "unknown balance action `{other}`; expected show, set or record"
            )))
        }
    }
    Ok(())
}
