//! The backend's tagged date representation.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{DateError, Error};

/// The wire tag for date values.
const DATE_TAG: &str = "Date";

/// The backend's JSON convention for timestamps:
/// `{"__type": "Date", "iso": "<RFC3339>"}`.
///
/// The codec is purely syntactic; no timezone normalization is performed,
/// and [`to_datetime`](DateValue::to_datetime) preserves whatever offset
/// the source string specified.
///
/// # Example
///
/// ```
/// use appbase::DateValue;
/// use chrono::Datelike;
///
/// let date = DateValue::new("2020-01-01T00:00:00.000Z");
/// assert_eq!(date.to_datetime().unwrap().year(), 2020);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateValue {
    #[serde(rename = "__type")]
    tag: String,
    iso: String,
}

impl DateValue {
    /// Wrap an RFC3339 timestamp string with the backend's type tag.
    ///
    /// The string is not validated here; parsing happens in
    /// [`to_datetime`](DateValue::to_datetime).
    pub fn new(iso: impl Into<String>) -> Self {
        Self {
            tag: DATE_TAG.to_string(),
            iso: iso.into(),
        }
    }

    /// Extract a date value from an already-decoded generic JSON object.
    ///
    /// # Errors
    ///
    /// Returns an error if the object carries no `iso` string field.
    pub fn from_value(value: &Value) -> Result<Self, Error> {
        let iso = value
            .get("iso")
            .and_then(Value::as_str)
            .ok_or(DateError::MissingIso)?;
        Ok(Self::new(iso))
    }

    /// The raw RFC3339 string.
    pub fn iso(&self) -> &str {
        &self.iso
    }

    /// Parse the wrapped timestamp.
    ///
    /// # Errors
    ///
    /// Returns a format error if the string is not valid RFC3339.
    pub fn to_datetime(&self) -> Result<DateTime<FixedOffset>, Error> {
        DateTime::parse_from_rfc3339(&self.iso).map_err(|e| DateError::Format(e).into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};
    use serde_json::json;

    #[test]
    fn serializes_with_type_tag() {
        let date = DateValue::new("2020-01-01T00:00:00.000Z");
        let value = serde_json::to_value(&date).unwrap();
        assert_eq!(
            value,
            json!({"__type": "Date", "iso": "2020-01-01T00:00:00.000Z"})
        );
    }

    #[test]
    fn round_trips_through_json() {
        let date = DateValue::new("2023-06-15T12:30:45.123Z");
        let encoded = serde_json::to_string(&date).unwrap();
        let decoded: DateValue = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded, date);
    }

    #[test]
    fn parses_to_expected_fields() {
        let date = DateValue::new("2020-01-01T00:00:00.000Z");
        let parsed = date.to_datetime().unwrap();
        assert_eq!(parsed.year(), 2020);
        assert_eq!(parsed.month(), 1);
        assert_eq!(parsed.day(), 1);
        assert_eq!(parsed.hour(), 0);
        assert_eq!(parsed.minute(), 0);
        assert_eq!(parsed.second(), 0);
    }

    #[test]
    fn preserves_source_offset() {
        let date = DateValue::new("2020-01-01T09:00:00+09:00");
        let parsed = date.to_datetime().unwrap();
        assert_eq!(parsed.offset().local_minus_utc(), 9 * 3600);
        assert_eq!(parsed.hour(), 9);
    }

    #[test]
    fn malformed_iso_is_a_format_error() {
        let date = DateValue::new("not-a-date");
        assert!(matches!(
            date.to_datetime(),
            Err(Error::Date(DateError::Format(_)))
        ));
    }

    #[test]
    fn from_value_extracts_iso_field() {
        let value = json!({"__type": "Date", "iso": "2020-01-01T00:00:00.000Z"});
        let date = DateValue::from_value(&value).unwrap();
        assert_eq!(date.iso(), "2020-01-01T00:00:00.000Z");
    }

    #[test]
    fn from_value_without_iso_is_an_error() {
        let value = json!({"__type": "Date"});
        assert!(matches!(
            DateValue::from_value(&value),
            Err(Error::Date(DateError::MissingIso))
        ));
    }
}
