//! Date helper functions

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone};

/// Date format written into new posts
pub const POST_DATE_FORMAT: &str = "%Y-%m-%d";

/// Whether a front-matter date is in an ISO-8601 shape that sorts
/// chronologically as a plain string.
///
/// # Examples
/// ```
/// use blog_index::helpers::is_iso_date;
///
/// assert!(is_iso_date("2024-01-15"));
/// assert!(!is_iso_date("Jan 15, 2024"));
/// ```
pub fn is_iso_date(s: &str) -> bool {
    // chrono accepts single-digit months and days, which do not sort
    let bytes = s.as_bytes();
    let zero_padded = bytes.len() >= 10
        && bytes[4] == b'-'
        && bytes[7] == b'-'
        && matches!(bytes.get(10), None | Some(b'T' | b' '));
    if !zero_padded {
        return false;
    }

    let formats = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S"];

    NaiveDate::parse_from_str(s, POST_DATE_FORMAT).is_ok()
        || formats
            .iter()
            .any(|fmt| NaiveDateTime::parse_from_str(s, fmt).is_ok())
        || DateTime::parse_from_rfc3339(s).is_ok()
}

/// Format a date for a post's front-matter
pub fn post_date<Tz: TimeZone>(date: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    date.format(POST_DATE_FORMAT).to_string()
}

/// Today's date for a post's front-matter
pub fn today() -> String {
    post_date(&Local::now())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_iso_dates() {
        assert!(is_iso_date("2024-01-15"));
        assert!(is_iso_date("2024-01-15T10:30:00"));
        assert!(is_iso_date("2024-01-15 10:30:00"));
        assert!(is_iso_date("2024-01-15T10:30:00+02:00"));
    }

    #[test]
    fn test_non_iso_dates() {
        assert!(!is_iso_date("15/01/2024"));
        assert!(!is_iso_date("2024-1-5"));
        assert!(!is_iso_date("2024-01-5T10:30:00"));
        assert!(!is_iso_date("yesterday"));
        assert!(!is_iso_date(""));
    }

    #[test]
    fn test_post_date() {
        let date = Utc.with_ymd_and_hms(2024, 3, 7, 18, 0, 0).unwrap();
        assert_eq!(post_date(&date), "2024-03-07");
        assert!(is_iso_date(&today()));
    }
}
