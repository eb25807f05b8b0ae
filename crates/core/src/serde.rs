//! Serde helper functions for upstream payloads.
//!
//! The scheduling service sends blank strings where a value is absent and
//! does not always include an offset in its timestamps.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer};

/// Deserialize an optional string, treating null, empty and blank strings as None.
/// Non-blank values are trimmed.
pub fn deserialize_blank_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    Ok(s.map(|s| s.trim().to_string()).filter(|s| !s.is_empty()))
}

/// Deserialize a timestamp as UTC.
/// Accepts RFC 3339 (any offset) or a naive `YYYY-MM-DDTHH:MM:SS[.f]`, read as UTC.
pub fn deserialize_utc_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    parse_utc_timestamp(&s).map_err(serde::de::Error::custom)
}

/// Parses a timestamp as UTC, see [`deserialize_utc_timestamp`].
pub fn parse_utc_timestamp(s: &str) -> Result<DateTime<Utc>, String> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|naive| naive.and_utc())
        .map_err(|e| format!("invalid timestamp '{}': {}", s, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    /// Test struct that uses the deserializer functions
    #[derive(Debug, Deserialize, PartialEq)]
    struct TestStruct {
        #[serde(default, deserialize_with = "deserialize_blank_as_none")]
        text: Option<String>,
        #[serde(deserialize_with = "deserialize_utc_timestamp")]
        at: DateTime<Utc>,
    }

    fn expected_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 9, 16, 9, 0, 0).unwrap()
    }

    #[test]
    fn test_blank_string_is_none() {
        let parsed: TestStruct =
            serde_json::from_str(r#"{"text": "   ", "at": "2024-09-16T09:00:00Z"}"#).unwrap();
        assert_eq!(parsed.text, None);
    }

    #[test]
    fn test_null_and_missing_are_none() {
        let parsed: TestStruct =
            serde_json::from_str(r#"{"text": null, "at": "2024-09-16T09:00:00Z"}"#).unwrap();
        assert_eq!(parsed.text, None);

        let parsed: TestStruct = serde_json::from_str(r#"{"at": "2024-09-16T09:00:00Z"}"#).unwrap();
        assert_eq!(parsed.text, None);
    }

    #[test]
    fn test_text_is_trimmed() {
        let parsed: TestStruct =
            serde_json::from_str(r#"{"text": " Lecture ", "at": "2024-09-16T09:00:00Z"}"#)
                .unwrap();
        assert_eq!(parsed.text, Some("Lecture".to_string()));
    }

    #[test]
    fn test_timestamp_with_offset_is_converted() {
        let parsed: TestStruct =
            serde_json::from_str(r#"{"at": "2024-09-16T10:00:00+01:00"}"#).unwrap();
        assert_eq!(parsed.at, expected_time());
    }

    #[test]
    fn test_naive_timestamp_is_utc() {
        assert_eq!(parse_utc_timestamp("2024-09-16T09:00:00"), Ok(expected_time()));
        assert_eq!(
            parse_utc_timestamp("2024-09-16T09:00:00.000"),
            Ok(expected_time())
        );
    }

    #[test]
    fn test_invalid_timestamp() {
        let result: Result<TestStruct, _> = serde_json::from_str(r#"{"at": "yesterday"}"#);
        assert!(result.is_err());
    }
}
