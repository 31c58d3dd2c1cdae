//! Birth date conversion between user entry, wire format, and display.
//!
//! The backend stores ISO `YYYY-MM-DD`. Users may type `DD/MM/YYYY`, and the
//! detail panel shows dates in day/month/year order.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use regex::Regex;
use std::sync::LazyLock;

static ISO_DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").expect("iso date pattern should compile")
});

/// Shape of a date string typed by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateInput {
    /// Already `YYYY-MM-DD`.
    Iso,
    /// Three slash-separated parts, read as day/month/year.
    DayMonthYear,
    /// Anything else. Sent to the server untouched.
    Unrecognized,
}

/// Classifies a non-empty date string.
#[must_use]
pub fn classify_date(input: &str) -> DateInput {
    if ISO_DATE.is_match(input) {
        DateInput::Iso
    } else if input.split('/').count() == 3 {
        DateInput::DayMonthYear
    } else {
        DateInput::Unrecognized
    }
}

/// Normalizes a user-entered date into the ISO form the backend stores.
///
/// - `None` or an empty string yields `None`.
/// - `YYYY-MM-DD` is returned unchanged.
/// - `D/M/YYYY` is reordered, zero-padding day and month.
/// - Any other shape passes through unchanged; whether the backend accepts it
///   is an open product question, so the pass-through is logged.
///
/// ```
/// use patient_registry::format::format_date_for_db;
///
/// assert_eq!(format_date_for_db(Some("15/03/1990")).as_deref(), Some("1990-03-15"));
/// assert_eq!(format_date_for_db(Some("1990-03-15")).as_deref(), Some("1990-03-15"));
/// assert_eq!(format_date_for_db(None), None);
/// ```
#[must_use]
pub fn format_date_for_db(input: Option<&str>) -> Option<String> {
    let input = input.filter(|s| !s.is_empty())?;

    match classify_date(input) {
        DateInput::Iso => Some(input.to_string()),
        DateInput::DayMonthYear => {
            let mut parts = input.split('/');
            let day = parts.next().unwrap_or_default();
            let month = parts.next().unwrap_or_default();
            let year = parts.next().unwrap_or_default();
            Some(format!("{year}-{month:0>2}-{day:0>2}"))
        }
        DateInput::Unrecognized => {
            tracing::warn!(date = %input, "unrecognized date format, sending unchanged");
            Some(input.to_string())
        }
    }
}

fn parse_date(input: &str) -> Option<NaiveDate> {
    let trimmed = input.trim();
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(trimmed).ok().map(|dt| dt.date_naive()))
        .or_else(|| {
            NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f")
                .ok()
                .map(|dt| dt.date())
        })
}

/// Formats a stored date as `DD/MM/YYYY`.
///
/// Accepts plain ISO dates and full timestamps (the server may return either).
/// The calendar date is taken as written, without shifting into a local time
/// zone. Unparseable input is returned unchanged.
///
/// ```
/// use patient_registry::format::format_date_for_display;
///
/// assert_eq!(format_date_for_display("1990-03-15"), "15/03/1990");
/// assert_eq!(format_date_for_display("1990-03-15T00:00:00.000Z"), "15/03/1990");
/// ```
#[must_use]
pub fn format_date_for_display(input: &str) -> String {
    parse_date(input).map_or_else(
        || input.to_string(),
        |date| date.format("%d/%m/%Y").to_string(),
    )
}

/// Parses a leading integer the way a lenient form field would.
///
/// Leading whitespace and a sign are allowed; parsing stops at the first
/// non-digit. Returns `None` when no digits lead the string.
///
/// ```
/// use patient_registry::format::parse_plan_id;
///
/// assert_eq!(parse_plan_id("42"), Some(42));
/// assert_eq!(parse_plan_id(" 7abc"), Some(7));
/// assert_eq!(parse_plan_id("abc"), None);
/// ```
#[must_use]
pub fn parse_plan_id(input: &str) -> Option<i64> {
    let trimmed = input.trim_start();
    let (negative, rest) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    let digits: String = rest.chars().take_while(char::is_ascii_digit).collect();
    let value = digits.parse::<i64>().ok()?;
    Some(if negative { -value } else { value })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_db_converts_day_month_year() {
        assert_eq!(format_date_for_db(Some("15/03/1990")).as_deref(), Some("1990-03-15"));
    }

    #[test]
    fn test_db_pads_single_digit_parts() {
        assert_eq!(format_date_for_db(Some("5/3/1990")).as_deref(), Some("1990-03-05"));
    }

    #[test]
    fn test_db_keeps_iso() {
        assert_eq!(format_date_for_db(Some("1990-03-15")).as_deref(), Some("1990-03-15"));
    }

    #[test]
    fn test_db_none_and_empty() {
        assert_eq!(format_date_for_db(None), None);
        assert_eq!(format_date_for_db(Some("")), None);
    }

    #[test]
    fn test_db_passes_unrecognized_through() {
        assert_eq!(format_date_for_db(Some("15.03.1990")).as_deref(), Some("15.03.1990"));
        assert_eq!(classify_date("15.03.1990"), DateInput::Unrecognized);
    }

    #[test]
    fn test_classify() {
        assert_eq!(classify_date("1990-03-15"), DateInput::Iso);
        assert_eq!(classify_date("15/03/1990"), DateInput::DayMonthYear);
        assert_eq!(classify_date("1990-3-15"), DateInput::Unrecognized);
    }

    #[test]
    fn test_incomplete_slash_date_passes_through() {
        assert_eq!(classify_date("15/03"), DateInput::Unrecognized);
        assert_eq!(format_date_for_db(Some("15/03")).as_deref(), Some("15/03"));
        assert_eq!(classify_date("15/03/1990/2"), DateInput::Unrecognized);
    }

    #[test]
    fn test_display_formats() {
        assert_eq!(format_date_for_display("1990-03-15"), "15/03/1990");
        assert_eq!(format_date_for_display("2001-12-01T10:30:00Z"), "01/12/2001");
        assert_eq!(format_date_for_display("2001-12-01T10:30:00"), "01/12/2001");
        assert_eq!(format_date_for_display("ontem"), "ontem");
    }

    #[test]
    fn test_plan_id_parsing() {
        assert_eq!(parse_plan_id("12"), Some(12));
        assert_eq!(parse_plan_id("-3"), Some(-3));
        assert_eq!(parse_plan_id("+3x"), Some(3));
        assert_eq!(parse_plan_id(""), None);
        assert_eq!(parse_plan_id("x1"), None);
    }
}
