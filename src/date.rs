//! Date display and input helpers used by date-typed columns.
//!
//! Stored dates are ISO `YYYY-MM-DD` strings (or timestamps); the display
//! helpers never fail and return an empty string for anything they cannot read.

use std::sync::OnceLock;

use chrono::{DateTime, Datelike, Local, NaiveDate, NaiveDateTime};
use regex::Regex;

/// Color used for anything that is not one of the twelve month names
pub const NEUTRAL_MONTH_COLOR: &str = "#9e9e9e";

const MONTH_COLORS: [(&str, &str); 12] = [
    ("Jan", "#1e88e5"),
    ("Feb", "#8e24aa"),
    ("Mar", "#43a047"),
    ("Apr", "#00acc1"),
    ("May", "#7cb342"),
    ("Jun", "#fdd835"),
    ("Jul", "#fb8c00"),
    ("Aug", "#f4511e"),
    ("Sep", "#6d4c41"),
    ("Oct", "#ef6c00"),
    ("Nov", "#5e35b1"),
    ("Dec", "#c62828"),
];

/// Formats tried, in order, when input matches none of the literal patterns.
/// Two-digit years come before four-digit ones: `%Y` would happily read "25" as year 25.
const FALLBACK_FORMATS: [&str; 8] = [
    "%m/%d/%y",
    "%m/%d/%Y",
    "%Y/%m/%d",
    "%b %d, %Y",
    "%B %d, %Y",
    "%b %d %Y",
    "%d %b %Y",
    "%d %B %Y",
];

fn mm_dd_yy_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(\d{1,2})-(\d{1,2})-(\d{2})$").expect("valid regex"))
}

fn mm_dd_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(\d{1,2})-(\d{1,2})$").expect("valid regex"))
}

fn iso_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("valid regex"))
}

/// Read a stored date or timestamp as a calendar date in the local time zone
pub fn to_local_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Some(date);
    }

    if let Ok(ts) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(ts.with_timezone(&Local).date_naive());
    }

    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(trimmed, fmt).ok())
        .map(|dt| dt.date())
}

/// `2025-03-15` -> `03-15-25`
pub fn format_mm_dd_yy(raw: &str) -> String {
    to_local_date(raw)
        .map(|d| d.format("%m-%d-%y").to_string())
        .unwrap_or_default()
}

/// `2025-03-15` -> `03-15`
pub fn format_mm_dd(raw: &str) -> String {
    to_local_date(raw)
        .map(|d| d.format("%m-%d").to_string())
        .unwrap_or_default()
}

/// `2025-03-15` -> `Mar`
pub fn format_month(raw: &str) -> String {
    to_local_date(raw)
        .map(|d| d.format("%b").to_string())
        .unwrap_or_default()
}

/// Display color for a three-letter month name
pub fn month_color(month: &str) -> &'static str {
    let month = month.trim();
    MONTH_COLORS
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(month))
        .map(|(_, color)| *color)
        .unwrap_or(NEUTRAL_MONTH_COLOR)
}

/// Normalize user-typed date text to ISO `YYYY-MM-DD`, relative to today's date.
pub fn parse_date_input(input: &str) -> String {
    parse_date_input_on(input, Local::now().date_naive())
}

/// Normalize user-typed date text to ISO `YYYY-MM-DD`.
///
/// Recognized in order: `MM-DD-YY` (years below 50 are 20xx, the rest 19xx),
/// `MM-DD` in the year of `today`, and `YYYY-MM-DD` which is returned as typed.
/// Anything else goes through a handful of common formats; input that still
/// doesn't parse comes back unchanged.
pub fn parse_date_input_on(input: &str, today: NaiveDate) -> String {
    let trimmed = input.trim();

    if let Some(caps) = mm_dd_yy_pattern().captures(trimmed) {
        let yy: i32 = caps[3].parse().unwrap_or(0);
        let year = if yy < 50 { 2000 + yy } else { 1900 + yy };
        return iso_or_original(year, &caps[1], &caps[2], input);
    }

    if let Some(caps) = mm_dd_pattern().captures(trimmed) {
        return iso_or_original(today.year(), &caps[1], &caps[2], input);
    }

    if iso_pattern().is_match(trimmed) {
        return trimmed.to_string();
    }

    parse_fallback(trimmed)
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| input.to_string())
}

fn iso_or_original(year: i32, month: &str, day: &str, original: &str) -> String {
    let month: u32 = month.parse().unwrap_or(0);
    let day: u32 = day.parse().unwrap_or(0);

    NaiveDate::from_ymd_opt(year, month, day)
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| original.to_string())
}

fn parse_fallback(trimmed: &str) -> Option<NaiveDate> {
    if trimmed.is_empty() {
        return None;
    }

    FALLBACK_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(trimmed, fmt).ok())
        .or_else(|| to_local_date(trimmed))
}
