use crate::ui::{theme, Icons};
use owo_colors::OwoColorize;

/// Title line, e.g. `📊 Tracking summary`
pub fn header(icon: &str, text: &str) {
    println!("{} {}", icon, text.style(theme().title));
}

/// `icon label: value`, used for the fields of a single record
pub fn status(icon: &str, label: &str, value: &str) {
    println!("{} {}: {}", icon, label.style(theme().label), value);
}

pub fn success(message: &str) {
    println!("{} {}", Icons::CHECK, message.style(theme().success));
}

pub fn error(message: &str) {
    eprintln!("{} {}", Icons::CROSS, message.style(theme().error));
}

pub fn warn(message: &str) {
    eprintln!("{} {}", Icons::WARN, message.style(theme().warn));
}

pub fn section(title: &str) {
    println!();
    println!("━{}━", title.style(theme().title));
}

pub fn dim(text: &str) -> String {
    text.style(theme().label).to_string()
}

pub fn muted(text: &str) -> String {
    text.style(theme().muted).to_string()
}

pub fn summary_row(label: &str, value: &str) {
    println!("  {} {}", label.style(theme().label), value);
}

/// `1234567` -> `1,234,567`
pub fn count(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);

    if value < 0 {
        out.push('-');
    }
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Signed count, `+1,234` / `-56` / `+0`
pub fn delta(value: i64) -> String {
    if value >= 0 {
        format!("+{}", count(value))
    } else {
        count(value)
    }
}

/// `delta` colored by direction
pub fn styled_delta(value: i64) -> String {
    delta(value).style(theme().delta(value)).to_string()
}
