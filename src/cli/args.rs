//! Global option handling and argument value parsers.

use std::path::PathBuf;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use cashflow_domain::{parse_date, Frequency, ParseError, Polarity};

use crate::errors::CliError;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GlobalOptions {
    pub data_dir: Option<PathBuf>,
    pub owner: Option<String>,
    pub today: Option<NaiveDate>,
    pub json: bool,
    pub no_color: bool,
}

/// Splits global flags out of `args`, returning them with the remaining command words.
///
/// Flags may appear anywhere on the line.
pub fn split_global_options(args: &[String]) -> Result<(GlobalOptions, Vec<String>), CliError> {
    let mut options = GlobalOptions::default();
    let mut rest = Vec::new();
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--json" => options.json = true,
            "--no-color" => options.no_color = true,
            "--data-dir" => options.data_dir = Some(PathBuf::from(flag_value(&mut iter, arg)?)),
            "--owner" => options.owner = Some(flag_value(&mut iter, arg)?.to_string()),
            "--today" => options.today = Some(parse_day(flag_value(&mut iter, arg)?)?),
            _ => rest.push(arg.clone()),
        }
    }
    Ok((options, rest))
}

fn flag_value<'a>(
    iter: &mut impl Iterator<Item = &'a String>,
    flag: &str,
) -> Result<&'a str, CliError> {
    iter.next()
        .map(String::as_str)
        .ok_or_else(|| CliError::Input(format!("{flag} requires a value")))
}

pub fn parse_amount(value: &str) -> Result<Decimal, CliError> {
    Decimal::from_str(value.trim())
        .map_err(|_| CliError::Input(format!("`{value}` is not a valid amount")))
}

pub fn parse_day(value: &str) -> Result<NaiveDate, CliError> {
    Ok(parse_date("date", value)?)
}

/// Case-insensitive polarity, also accepting `in`/`out`.
pub fn parse_polarity(value: &str) -> Result<Polarity, CliError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "income" | "in" => Ok(Polarity::Income),
        "expense" | "out" => Ok(Polarity::Expense),
        _ => Err(ParseError::UnknownPolarity(value.to_string()).into()),
    }
}

pub fn parse_frequency(value: &str) -> Result<Frequency, CliError> {
    Frequency::ALL
        .into_iter()
        .find(|frequency| frequency.to_string().eq_ignore_ascii_case(value.trim()))
        .ok_or_else(|| ParseError::UnknownFrequency(value.to_string()).into())
}

/// Fetches positional argument `index`, naming it in the error when missing.
pub fn required<'a>(
    args: &[&'a str],
    index: usize,
    name: &str,
    usage: &str,
) -> Result<&'a str, CliError> {
    args.get(index)
        .copied()
        .ok_or_else(|| CliError::Input(format!("missing <{name}>; usage: {usage}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| value.to_string()).collect()
    }

    #[test]
    fn global_flags_are_split_from_command_words() {
        let (options, rest) = split_global_options(&strings(&[
            "--owner", "alice", "project", "--json", "--today", "2025-03-12",
        ]))
        .expect("parse");
        assert_eq!(options.owner.as_deref(), Some("alice"));
        assert!(options.json);
        assert_eq!(options.today, NaiveDate::from_ymd_opt(2025, 3, 12));
        assert_eq!(rest, strings(&["project"]));
    }

    #[test]
    fn missing_flag_value_is_an_error() {
        assert!(matches!(
            split_global_options(&strings(&["--owner"])),
            Err(CliError::Input(_))
        ));
    }

    #[test]
    fn value_parsers_are_forgiving_about_case() {
        assert_eq!(parse_polarity("INCOME").expect("polarity"), Polarity::Income);
        assert_eq!(parse_polarity("out").expect("polarity"), Polarity::Expense);
        assert_eq!(parse_frequency("biweekly").expect("frequency"), Frequency::BiWeekly);
        assert!(parse_frequency("fortnightly").is_err());
        assert!(parse_amount("12.5x").is_err());
    }
}
