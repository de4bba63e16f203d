//! Post date parsing and display.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Parse a post date.
///
/// Accepts a plain `YYYY-MM-DD` date, an RFC 3339 timestamp (normalized to
/// UTC) or a `YYYY-MM-DDTHH:MM[:SS]` local timestamp.
pub(crate) fn parse_date(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0);
    }
    if let Ok(datetime) = DateTime::parse_from_rfc3339(value) {
        return Some(datetime.naive_utc());
    }
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M"))
        .ok()
}

/// Format a post date for display, e.g. `15 Aug 2025`.
///
/// Values that are not recognized dates are returned unchanged.
///
/// # Examples
///
/// ```
/// use folio_site::format_date;
///
/// assert_eq!(format_date("2025-08-15"), "15 Aug 2025");
/// assert_eq!(format_date("someday"), "someday");
/// ```
#[must_use]
pub fn format_date(value: &str) -> String {
    match parse_date(value) {
        Some(datetime) => datetime.format("%-d %b %Y").to_string(),
        None => value.to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_plain_date() {
        assert_eq!(format_date("2025-01-03"), "3 Jan 2025");
    }

    #[test]
    fn test_format_timestamp() {
        assert_eq!(format_date("2024-12-31T22:15:00Z"), "31 Dec 2024");
        assert_eq!(format_date("2024-02-29T08:00"), "29 Feb 2024");
    }

    #[test]
    fn test_format_invalid_date_returns_input() {
        assert_eq!(format_date("2025-13-40"), "2025-13-40");
        assert_eq!(format_date(""), "");
    }

    #[test]
    fn test_parse_orders_timestamps() {
        let earlier = parse_date("2025-08-15").unwrap();
        let later = parse_date("2025-08-15T09:30:00+07:00").unwrap();
        assert!(later > earlier);
    }
}
