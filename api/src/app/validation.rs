//! Input checks shared by handlers and services

use std::sync::OnceLock;

use regex::Regex;

use crate::error::AppError;

fn matches(cell: &'static OnceLock<Option<Regex>>, pattern: &str, value: &str) -> bool {
    cell.get_or_init(|| Regex::new(pattern).ok())
        .as_ref()
        .map(|re| re.is_match(value))
        .unwrap_or(false)
}

pub fn is_valid_email(email: &str) -> bool {
    static EMAIL: OnceLock<Option<Regex>> = OnceLock::new();
    email.len() <= 254 && matches(&EMAIL, r"^[^\s@]+@[^\s@]+\.[^\s@]+$", email)
}

/// `#rgb` or `#rrggbb`
pub fn is_hex_color(color: &str) -> bool {
    static HEX: OnceLock<Option<Regex>> = OnceLock::new();
    matches(&HEX, r"^#(?:[0-9a-fA-F]{3}|[0-9a-fA-F]{6})$", color)
}

/// Trimmed, non-empty value of a required field
pub fn required<'a>(value: Option<&'a str>, field: &str) -> Result<&'a str, AppError> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| AppError::missing_field(field))
}
