//! Date helpers shared by models and forms

use chrono::{DateTime, Datelike, NaiveDate};

/// Long display form, e.g. `December 16th, 1775`. Empty when absent.
pub fn format_date(date: Option<NaiveDate>) -> String {
    match date {
        Some(d) => format!(
            "{} {}{}, {}",
            d.format("%B"),
            d.day(),
            ordinal_suffix(d.day()),
            d.year()
        ),
        None => String::new(),
    }
}

/// ISO calendar date for `<input type="date">`. Empty when absent.
pub fn format_date_input(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

/// Parse a submitted date: `YYYY-MM-DD` or an RFC 3339 timestamp.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(value)
                .ok()
                .map(|dt| dt.date_naive())
        })
}

fn ordinal_suffix(day: u32) -> &'static str {
    match (day % 10, day % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    }
}
