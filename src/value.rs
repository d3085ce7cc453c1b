use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;

use chrono::NaiveDate;

use crate::date::parse_date_input;

/// A date cell: either a real calendar date or text that didn't parse as one
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateCell {
    Parsed(NaiveDate),
    Unparsed(String),
}

impl DateCell {
    /// Normalize typed or imported text through the shared date parser
    pub fn from_input(raw: &str) -> Self {
        let normalized = parse_date_input(raw);
        match NaiveDate::parse_from_str(&normalized, "%Y-%m-%d") {
            Ok(date) => DateCell::Parsed(date),
            Err(_) => DateCell::Unparsed(normalized),
        }
    }

    pub fn date(&self) -> Option<NaiveDate> {
        match self {
            DateCell::Parsed(date) => Some(*date),
            DateCell::Unparsed(_) => None,
        }
    }
}

impl fmt::Display for DateCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateCell::Parsed(date) => write!(f, "{}", date.format("%Y-%m-%d")),
            DateCell::Unparsed(raw) => f.write_str(raw),
        }
    }
}

/// A typed cell value. The column kind decides which variant a cell holds.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Text(String),
    Number(f64),
    Currency(f64),
    Date(DateCell),
    Choice(String),
    MultiChoice(BTreeSet<String>),
}

impl Value {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) | Value::Currency(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Value::Date(cell) => cell.date(),
            _ => None,
        }
    }

    /// Three-way comparison used for sorting.
    /// Numbers compare numerically (NaN last), parsed dates chronologically,
    /// everything else by its text.
    pub fn compare(&self, other: &Value) -> Ordering {
        match (self, other) {
            (
                Value::Number(a) | Value::Currency(a),
                Value::Number(b) | Value::Currency(b),
            ) => match (a.is_nan(), b.is_nan()) {
                (true, true) => Ordering::Equal,
                (true, false) => Ordering::Greater,
                (false, true) => Ordering::Less,
                (false, false) => a.partial_cmp(b).unwrap_or(Ordering::Equal),
            },
            (Value::Date(DateCell::Parsed(a)), Value::Date(DateCell::Parsed(b))) => a.cmp(b),
            _ => self.to_string().cmp(&other.to_string()),
        }
    }
}

/// The stringified form used for search, filtering and export
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Text(s) | Value::Choice(s) => f.write_str(s),
            Value::Number(n) | Value::Currency(n) => write!(f, "{}", n),
            Value::Date(cell) => write!(f, "{}", cell),
            Value::MultiChoice(items) => {
                let joined: Vec<&str> = items.iter().map(String::as_str).collect();
                f.write_str(&joined.join(","))
            }
        }
    }
}

/// Split a comma-joined multi-select value into its distinct items
pub fn split_choices(raw: &str) -> BTreeSet<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Parse a string that may contain a formatted amount.
///
/// Handles:
/// - Regular numbers: "123.45", "-123.45", "1.2e3"
/// - Thousands separators: "1,234.56"
/// - Currency: "$1,234.56", "-$1,234.56", "($1,234.56)"
pub fn parse_numeric(s: &str) -> Option<f64> {
    let trimmed = s.trim();

    if trimmed.is_empty() {
        return None;
    }

    if let Ok(n) = trimmed.parse::<f64>() {
        return n.is_finite().then_some(n);
    }

    let (negative, body) = if let Some(rest) = trimmed.strip_prefix('-') {
        (true, rest)
    } else if let Some(inner) = trimmed.strip_prefix('(').and_then(|r| r.strip_suffix(')')) {
        (true, inner)
    } else {
        (false, trimmed)
    };

    let body = body.trim();
    let body = ['$', '€', '£', '¥']
        .iter()
        .find_map(|&c| body.strip_prefix(c))
        .unwrap_or(body);

    let cleaned: String = body.chars().filter(|c| *c != ',').collect();
    let n = cleaned.trim().parse::<f64>().ok().filter(|n| n.is_finite())?;
    Some(if negative { -n } else { n })
}

/// Format an amount as `$1,234.56`.
/// Magnitudes past `u64::MAX` cents clamp to that many cents.
pub fn format_currency(n: f64) -> String {
    debug_assert!(n.is_finite(), "currency amount must be finite");
    let cents = (n.abs() * 100.0).round() as u64;
    let whole = (cents / 100).to_string();
    let frac = cents % 100;

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, c) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    let sign = if n < 0.0 && cents > 0 { "-" } else { "" };
    format!("{}${}.{:02}", sign, grouped, frac)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_numeric_basic() {
        assert_eq!(parse_numeric("123"), Some(123.0));
        assert_eq!(parse_numeric("-123.45"), Some(-123.45));
        assert_eq!(parse_numeric("  7  "), Some(7.0));
        assert_eq!(parse_numeric(""), None);
        assert_eq!(parse_numeric("abc"), None);
        assert_eq!(parse_numeric("12abc"), None);
    }

    #[test]
    fn test_parse_numeric_rejects_non_finite() {
        assert_eq!(parse_numeric("nan"), None);
        assert_eq!(parse_numeric("NaN"), None);
        assert_eq!(parse_numeric("inf"), None);
        assert_eq!(parse_numeric("-infinity"), None);
        assert_eq!(parse_numeric("$inf"), None);
        assert_eq!(parse_numeric("1e400"), None);
    }

    #[test]
    fn test_parse_numeric_currency() {
        assert_eq!(parse_numeric("$1,234.56"), Some(1234.56));
        assert_eq!(parse_numeric("-$1,234.56"), Some(-1234.56));
        assert_eq!(parse_numeric("($80.00)"), Some(-80.0));
        assert_eq!(parse_numeric("1,234,567.89"), Some(1234567.89));
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(1234.56), "$1,234.56");
        assert_eq!(format_currency(1000000.0), "$1,000,000.00");
        assert_eq!(format_currency(-99.9), "-$99.90");
        assert_eq!(format_currency(0.0), "$0.00");
        assert_eq!(format_currency(-0.001), "$0.00");
        assert_eq!(format_currency(1e20), "$184,467,440,737,095,516.15");
    }

    #[test]
    fn test_display_is_plain() {
        assert_eq!(Value::Number(5.0).to_string(), "5");
        assert_eq!(Value::Currency(12.5).to_string(), "12.5");
        assert_eq!(Value::MultiChoice(split_choices("GT, 25,,59")).to_string(), "25,59,GT");
        assert_eq!(Value::Date(DateCell::from_input("03-15-25")).to_string(), "2025-03-15");
        assert_eq!(Value::Date(DateCell::from_input("soon")).to_string(), "soon");
    }

    #[test]
    fn test_compare_numbers_numerically() {
        assert_eq!(Value::Number(9.0).compare(&Value::Number(10.0)), Ordering::Less);
        assert_eq!(Value::Currency(10.0).compare(&Value::Number(9.0)), Ordering::Greater);
        assert_eq!(Value::Number(f64::NAN).compare(&Value::Number(1.0)), Ordering::Greater);
    }

    #[test]
    fn test_compare_text_lexically() {
        let a = Value::Text("10".to_string());
        let b = Value::Text("9".to_string());
        assert_eq!(a.compare(&b), Ordering::Less);
    }

    #[test]
    fn test_compare_dates() {
        let early = Value::Date(DateCell::from_input("1999-12-31"));
        let late = Value::Date(DateCell::from_input("2000-01-01"));
        assert_eq!(early.compare(&late), Ordering::Less);
    }
}
