//! Lexical checks for primitive payloads.

use once_cell::sync::Lazy;
use regex::Regex;

use chrono::{DateTime, Datelike, FixedOffset};

use crate::core::ValidationConfig;
use crate::model::{PartialDate, PartialDateTime};

static ID_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9\-\.]{1,64}$").expect("valid id pattern"));

const ALLOWED_WHITESPACE: [char; 4] = [' ', '\t', '\r', '\n'];

fn is_unsupported_control(ch: char) -> bool {
    (ch as u32) < 32 && !matches!(ch, '\t' | '\n' | '\r')
}

fn check_max_length(value: &str, config: &ValidationConfig) -> Result<(), String> {
    let length = value.chars().count();
    if length > config.max_string_length {
        return Err(format!(
            "length {length} exceeds the maximum of {}",
            config.max_string_length
        ));
    }
    Ok(())
}

fn check_control_chars(value: &str, config: &ValidationConfig) -> Result<(), String> {
    if config.check_control_chars {
        if let Some(ch) = value.chars().find(|ch| is_unsupported_control(*ch)) {
            return Err(format!(
                "contains unsupported control character U+{:04X}",
                ch as u32
            ));
        }
    }
    Ok(())
}

pub fn check_string(value: &str, config: &ValidationConfig) -> Result<(), String> {
    check_max_length(value, config)?;
    if let Some(ch) = value
        .chars()
        .find(|ch| ch.is_whitespace() && !ALLOWED_WHITESPACE.contains(ch))
    {
        return Err(format!(
            "contains illegal whitespace character U+{:04X}",
            ch as u32
        ));
    }
    check_control_chars(value, config)?;
    if value.chars().all(char::is_whitespace) {
        return Err("must contain at least one non-whitespace character".to_string());
    }
    Ok(())
}

pub fn check_code(value: &str, config: &ValidationConfig) -> Result<(), String> {
    if value.is_empty() {
        return Err("must not be empty".to_string());
    }
    check_max_length(value, config)?;
    check_control_chars(value, config)?;
    if value.starts_with(char::is_whitespace) || value.ends_with(char::is_whitespace) {
        return Err(format!("'{value}' must not start or end with whitespace"));
    }
    let mut previous_space = false;
    for ch in value.chars() {
        if ch.is_whitespace() {
            if ch != ' ' || previous_space {
                return Err(format!(
                    "'{value}' may only contain single spaces between tokens"
                ));
            }
            previous_space = true;
        } else {
            previous_space = false;
        }
    }
    Ok(())
}

pub fn check_id(value: &str) -> Result<(), String> {
    if ID_PATTERN.is_match(value) {
        Ok(())
    } else {
        Err(format!(
            "'{value}' must match [A-Za-z0-9\\-\\.]{{1,64}}"
        ))
    }
}

pub fn check_uri(value: &str, config: &ValidationConfig) -> Result<(), String> {
    check_max_length(value, config)?;
    if value.chars().any(|ch| ch.is_whitespace() || ch.is_control()) {
        return Err(format!("'{value}' must not contain whitespace"));
    }
    Ok(())
}

pub fn check_positive_int(value: u32) -> Result<(), String> {
    if value < 1 {
        return Err(format!("{value} must be greater than or equal to 1"));
    }
    Ok(())
}

fn check_year(year: i32) -> Result<(), String> {
    if !(0..=9999).contains(&year) {
        return Err(format!("year {year} must have four digits"));
    }
    Ok(())
}

pub fn check_date(value: &PartialDate) -> Result<(), String> {
    check_year(value.year())?;
    if let PartialDate::YearMonth(_, month) = value
        && !(1..=12).contains(month)
    {
        return Err(format!("month {month} must be between 1 and 12"));
    }
    Ok(())
}

pub fn check_instant(value: &DateTime<FixedOffset>) -> Result<(), String> {
    check_year(value.year())
}

pub fn check_date_time(value: &PartialDateTime) -> Result<(), String> {
    match value {
        PartialDateTime::Partial(date) => check_date(date),
        PartialDateTime::Timestamp(timestamp) => check_instant(timestamp),
    }
}

/// Minimal well-formedness for `Narrative.div`.
pub fn check_xhtml_div(value: &str, config: &ValidationConfig) -> Result<(), String> {
    check_max_length(value, config)?;
    let trimmed = value.trim();
    if !trimmed.starts_with("<div") || !trimmed.ends_with("</div>") {
        return Err("narrative must be a single xhtml <div> element".to_string());
    }
    Ok(())
}
