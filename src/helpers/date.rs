//! Date helper functions

use chrono::NaiveDate;

/// How much of the month name to print
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateStyle {
    /// `January 15, 2024`
    Long,
    /// `Jan 15, 2024`
    Short,
}

impl DateStyle {
    fn format_str(self) -> &'static str {
        match self {
            DateStyle::Long => "%B %-d, %Y",
            DateStyle::Short => "%b %-d, %Y",
        }
    }
}

/// Parse the date part of an ISO 8601 string (`2024-01-15` or
/// `2024-01-15T10:30:00Z`)
pub fn parse_iso_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    let date_part = s.get(..10).unwrap_or(s);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
}

/// Format a front-matter date for display
///
/// Strings that are not ISO dates are shown as written.
///
/// # Examples
/// ```
/// use folio_rs::helpers::{display_date, DateStyle};
/// assert_eq!(display_date("2024-01-15", DateStyle::Long), "January 15, 2024");
/// assert_eq!(display_date("2024-01-15", DateStyle::Short), "Jan 15, 2024");
/// ```
pub fn display_date(date: &str, style: DateStyle) -> String {
    match parse_iso_date(date) {
        Some(d) => d.format(style.format_str()).to_string(),
        None => date.to_string(),
    }
}
