//! Row-to-entity parsing helpers.
//!
//! Timestamps are written with [`format_datetime`] (fixed-width RFC 3339,
//! nanosecond precision, `Z` suffix) so they round-trip exactly and sort as
//! text. [`parse_datetime`] also accepts `SQLite`'s `datetime('now')` format
//! for the columns that default to it.

use chrono::{DateTime, SecondsFormat, Utc};

use crate::error::DatabaseError;

#[must_use]
pub fn format_datetime(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

/// Parse a required TEXT column as `DateTime<Utc>`.
///
/// # Errors
///
/// Returns `DatabaseError::Query` if the string is neither RFC 3339 nor
/// `"%Y-%m-%d %H:%M:%S"`.
pub fn parse_datetime(s: &str) -> Result<DateTime<Utc>, DatabaseError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
        .map(|naive| naive.and_utc())
        .map_err(|e| DatabaseError::Query(format!("Failed to parse datetime '{s}': {e}")))
}

/// # Errors
///
/// Returns `DatabaseError::Query` if a non-empty string cannot be parsed.
pub fn parse_optional_datetime(s: Option<&str>) -> Result<Option<DateTime<Utc>>, DatabaseError> {
    match s {
        Some(s) if !s.is_empty() => Ok(Some(parse_datetime(s)?)),
        _ => Ok(None),
    }
}

/// Parse a TEXT column into a `snake_case` serde enum.
///
/// # Errors
///
/// Returns `DatabaseError::Query` if the string does not match any variant.
pub fn parse_enum<T: serde::de::DeserializeOwned>(s: &str) -> Result<T, DatabaseError> {
    serde_json::from_value(serde_json::Value::String(s.to_string()))
        .map_err(|e| DatabaseError::Query(format!("Failed to parse enum from '{s}': {e}")))
}

/// Read a nullable TEXT column. `None` for both SQL NULL and empty string.
///
/// # Errors
///
/// Returns `DatabaseError` if the column read fails.
pub fn get_opt_string(row: &libsql::Row, idx: i32) -> Result<Option<String>, DatabaseError> {
    match row.get::<Option<String>>(idx)? {
        Some(s) if s.is_empty() => Ok(None),
        other => Ok(other),
    }
}

/// # Errors
///
/// Returns `DatabaseError::Query` if a non-empty string is not valid JSON.
pub fn parse_optional_json(s: Option<&str>) -> Result<Option<serde_json::Value>, DatabaseError> {
    match s {
        Some(s) if !s.is_empty() => serde_json::from_str(s)
            .map(Some)
            .map_err(|e| DatabaseError::Query(format!("Invalid JSON in column: {e}"))),
        _ => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use lexa_core::enums::{AuditAction, Priority};

    #[test]
    fn formatted_datetimes_roundtrip_and_sort() {
        let a = Utc.with_ymd_and_hms(2026, 1, 5, 9, 0, 0).unwrap();
        let b = a + chrono::Duration::nanoseconds(1500);
        assert_eq!(parse_datetime(&format_datetime(a)).unwrap(), a);
        assert_eq!(parse_datetime(&format_datetime(b)).unwrap(), b);
        assert!(format_datetime(a) < format_datetime(b));
    }

    #[test]
    fn sqlite_default_format_parses() {
        let dt = parse_datetime("2026-01-05 09:00:00").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2026, 1, 5, 9, 0, 0).unwrap());
    }

    #[test]
    fn garbage_datetime_is_query_error() {
        assert!(matches!(
            parse_datetime("yesterday"),
            Err(DatabaseError::Query(_))
        ));
    }

    #[test]
    fn enums_parse_from_snake_case() {
        assert_eq!(parse_enum::<Priority>("urgent").unwrap(), Priority::Urgent);
        assert_eq!(
            parse_enum::<AuditAction>("sla_paused").unwrap(),
            AuditAction::SlaPaused
        );
        assert!(parse_enum::<Priority>("whenever").is_err());
    }

    #[test]
    fn empty_optionals_are_none() {
        assert_eq!(parse_optional_datetime(Some("")).unwrap(), None);
        assert_eq!(parse_optional_json(None).unwrap(), None);
        assert_eq!(
            parse_optional_json(Some(r#"{"a":1}"#)).unwrap(),
            Some(serde_json::json!({"a": 1}))
        );
    }
}
