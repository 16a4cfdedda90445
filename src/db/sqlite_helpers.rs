//! SQLite helper utilities for type conversion
//!
//! SQLite has no array or timestamp column types. Actor id lists are stored
//! as JSON text and release dates as epoch milliseconds.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Serialize, de::DeserializeOwned};

// ============================================================================
// Array/Vec Helpers (stored as JSON strings in SQLite)
// ============================================================================

/// Serialize a Vec to a JSON string for SQLite storage
#[inline]
pub fn vec_to_json<T: Serialize>(v: &[T]) -> String {
    serde_json::to_string(v).unwrap_or_else(|_| "[]".to_string())
}

/// Deserialize a JSON string from SQLite to a Vec.
///
/// `NULL` and empty text read as an empty list; malformed JSON is an error.
pub fn json_to_vec_opt<T: DeserializeOwned>(s: Option<&str>) -> Result<Vec<T>, String> {
    match s {
        Some(s) if !s.trim().is_empty() => {
            serde_json::from_str(s).map_err(|e| format!("invalid JSON array '{}': {}", s, e))
        }
        _ => Ok(Vec::new()),
    }
}

// ============================================================================
// Timestamp Helpers
// ============================================================================

/// Get current UTC timestamp as ISO8601 string for SQLite
#[inline]
pub fn now_iso8601() -> String {
    Utc::now().to_rfc3339()
}

/// Convert a timestamp to epoch milliseconds for an INTEGER column
#[inline]
pub fn datetime_to_millis(dt: DateTime<Utc>) -> i64 {
    dt.timestamp_millis()
}

/// Convert an INTEGER column of epoch milliseconds back to a timestamp
pub fn millis_to_datetime_opt(ms: Option<i64>) -> Result<Option<DateTime<Utc>>, String> {
    match ms {
        Some(ms) => Utc
            .timestamp_millis_opt(ms)
            .single()
            .map(Some)
            .ok_or_else(|| format!("timestamp {} out of range", ms)),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec_json_roundtrip() {
        let v = vec!["williams".to_string(), "williams".to_string(), "garfield".to_string()];
        let json = vec_to_json(&v);
        let parsed: Vec<String> = json_to_vec_opt(Some(&json)).unwrap();
        assert_eq!(v, parsed);
    }

    #[test]
    fn test_null_and_empty_json_read_as_empty() {
        let none: Vec<String> = json_to_vec_opt(None).unwrap();
        let empty: Vec<String> = json_to_vec_opt(Some("")).unwrap();
        assert!(none.is_empty());
        assert!(empty.is_empty());
        assert_eq!(vec_to_json::<String>(&[]), "[]");
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        let result: Result<Vec<String>, String> = json_to_vec_opt(Some("[\"williams\""));
        assert!(result.is_err());
    }

    #[test]
    fn test_millis_conversion() {
        let dt = millis_to_datetime_opt(Some(1974668800000)).unwrap().unwrap();
        assert_eq!(datetime_to_millis(dt), 1974668800000);
        assert_eq!(millis_to_datetime_opt(None).unwrap(), None);
    }

    #[test]
    fn test_out_of_range_millis() {
        assert!(millis_to_datetime_opt(Some(i64::MAX)).is_err());
    }
}
