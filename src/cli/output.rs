use colored::Colorize;
use once_cell::sync::Lazy;
use rust_decimal::Decimal;
use std::fmt;
use std::sync::RwLock;

/// Message categories used by the CLI output helpers.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum MessageKind {
    Info,
    Success,
    Warning,
    Section,
}

#[derive(Clone, Copy, Debug)]
pub struct OutputPreferences {
    pub color: bool,
    /// Suppresses decoration so only data lines remain.
    pub quiet: bool,
}

impl Default for OutputPreferences {
    fn default() -> Self {
        Self {
            color: true,
            quiet: false,
        }
    }
}

static PREFERENCES: Lazy<RwLock<OutputPreferences>> =
    Lazy::new(|| RwLock::new(OutputPreferences::default()));

pub fn set_preferences(prefs: OutputPreferences) {
    if prefs.color {
        colored::control::unset_override();
    } else {
        colored::control::set_override(false);
    }
    if let Ok(mut guard) = PREFERENCES.write() {
        *guard = prefs;
    }
}

fn preferences() -> OutputPreferences {
    PREFERENCES.read().map(|guard| *guard).unwrap_or_default()
}

pub fn style(kind: MessageKind, message: impl fmt::Display) -> String {
    let text = message.to_string();
    match kind {
        MessageKind::Info => text,
        MessageKind::Success => format!("[ok] {text}").bright_green().to_string(),
        MessageKind::Warning => format!("[!] {text}").bright_yellow().to_string(),
        MessageKind::Section => format!("=== {} ===", text.trim()).bold().to_string(),
    }
}

pub fn print(kind: MessageKind, message: impl fmt::Display) {
    let prefs = preferences();
    if prefs.quiet && kind != MessageKind::Info {
        return;
    }
    match kind {
        MessageKind::Section => println!("\n{}", style(kind, message)),
        MessageKind::Warning => eprintln!("{}", style(kind, message)),
        _ => println!("{}", style(kind, message)),
    }
}

pub fn info(message: impl fmt::Display) {
    print(MessageKind::Info, message);
}

pub fn success(message: impl fmt::Display) {
    print(MessageKind::Success, message);
}

pub fn warning(message: impl fmt::Display) {
    print(MessageKind::Warning, message);
}

pub fn section(title: impl fmt::Display) {
    print(MessageKind::Section, title);
}

/// Two-decimal amount, red when negative.
pub fn amount(value: Decimal) -> String {
    let text = format!("{:>12}", format!("{:.2}", value));
    if value.is_sign_negative() && !value.is_zero() {
        text.red().to_string()
    } else {
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn plain_styles_carry_markers() {
        colored::control::set_override(false);
        assert_eq!(style(MessageKind::Section, " Upcoming "), "=== Upcoming ===");
        assert_eq!(style(MessageKind::Warning, "careful"), "[!] careful");
        assert_eq!(amount(dec!(-5)).trim(), "-5.00");
        assert_eq!(amount(dec!(1234.5)).trim(), "1234.50");
    }
}
