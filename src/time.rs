//! Time related utils.
//!
//! Every timestamp in the signing pipeline is UTC; the [`DateTime`] alias
//! carries that invariant in the type.

use crate::constants::{LONG_DATETIME, SHORT_DATE};
use crate::Error;
use chrono::NaiveDateTime;
use chrono::Utc;

/// DateTime in UTC.
pub type DateTime = chrono::DateTime<Utc>;

/// Return the current UTC time.
pub fn now() -> DateTime {
    Utc::now()
}

/// Format a time into the short date used as the credential scope: "20240101".
pub fn format_date(t: DateTime) -> String {
    t.format(SHORT_DATE).to_string()
}

/// Format a time into the long timestamp: "20240101T000000Z".
pub fn format_iso8601(t: DateTime) -> String {
    t.format(LONG_DATETIME).to_string()
}

/// Parse a long timestamp back into a time.
///
/// This is the inverse of [`format_iso8601`] and is what a verifier applies
/// to the `X-Sw-Date` parameter of a signed URL.
pub fn parse_iso8601(s: &str) -> crate::Result<DateTime> {
    let t = NaiveDateTime::parse_from_str(s, LONG_DATETIME)
        .map_err(|e| Error::invalid_input(format!("timestamp is not valid: {e}")))?;
    Ok(t.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format() {
        let t = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(format_date(t), "20240101");
        assert_eq!(format_iso8601(t), "20240101T000000Z");
    }

    #[test]
    fn test_parse_iso8601() {
        let t = parse_iso8601("20240101T000000Z").unwrap();
        assert_eq!(format_iso8601(t), "20240101T000000Z");

        assert!(parse_iso8601("2024-01-01T00:00:00Z").is_err());
        assert!(parse_iso8601("not a time").is_err());
    }
}
