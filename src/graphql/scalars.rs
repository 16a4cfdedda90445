//! Custom GraphQL scalars
//!
//! `Date` is serialized as epoch milliseconds. On input it accepts an
//! integer number of milliseconds or a calendar date string. Date-only
//! strings and strings without an offset are read as UTC. Literals of any
//! other kind carry no date.

use async_graphql::{InputValueError, InputValueResult, Scalar, ScalarType, Value};
use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};

/// Internal timestamp representation
pub type Timestamp = DateTime<Utc>;

/// Date-only formats accepted on input, tried in order
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m-%d-%Y", "%m/%d/%Y"];

/// Date-time formats without an offset, tried in order
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DateParseError {
    #[error("'{0}' is not a recognized date")]
    InvalidString(String),
    #[error("{0} is outside the supported date range")]
    OutOfRange(i64),
    #[error("dates must be integer epoch milliseconds, got {0}")]
    NotAnInteger(String),
    #[error("dates must be a string or an integer")]
    UnsupportedKind,
}

/// Serialize a timestamp as epoch milliseconds
pub fn encode(ts: &Timestamp) -> Value {
    Value::Number(ts.timestamp_millis().into())
}

/// Interpret epoch milliseconds
pub fn from_millis(ms: i64) -> Result<Timestamp, DateParseError> {
    Utc.timestamp_millis_opt(ms)
        .single()
        .ok_or(DateParseError::OutOfRange(ms))
}

/// Parse a calendar date or date-time string
pub fn parse_date_str(input: &str) -> Result<Timestamp, DateParseError> {
    let s = input.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    for format in DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
            return Ok(naive.and_utc());
        }
    }
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(s, format)
            && let Some(naive) = date.and_hms_opt(0, 0, 0)
        {
            return Ok(naive.and_utc());
        }
    }

    Err(DateParseError::InvalidString(input.to_string()))
}

/// Decode a value supplied through a request variable.
///
/// Strings are parsed as calendar dates; integers are epoch milliseconds.
pub fn parse_value(value: &Value) -> Result<Timestamp, DateParseError> {
    match value {
        Value::String(s) => parse_date_str(s),
        Value::Number(n) => match n.as_i64() {
            Some(ms) => from_millis(ms),
            None => Err(DateParseError::NotAnInteger(n.to_string())),
        },
        _ => Err(DateParseError::UnsupportedKind),
    }
}

/// Decode a literal written in the query document.
///
/// Only integer literals are dates; any other literal yields `None`.
pub fn parse_literal(value: &Value) -> Option<Timestamp> {
    match value {
        Value::Number(n) => n.as_i64().and_then(|ms| from_millis(ms).ok()),
        _ => None,
    }
}

/// Decode scalar input of any kind.
///
/// Strings and integers can arrive through variables, so they follow
/// [`parse_value`] and may fail. Every other kind can only be a document
/// literal and follows [`parse_literal`].
pub fn decode(value: &Value) -> Result<Option<Timestamp>, DateParseError> {
    match value {
        Value::String(_) => parse_value(value).map(Some),
        Value::Number(n) if n.is_i64() => parse_value(value).map(Some),
        _ => Ok(parse_literal(value)),
    }
}

/// Date exchanged as epoch milliseconds.
///
/// An input literal that is not a date decodes to an empty `Date`, which the
/// resolver treats as no release date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Date(Option<Timestamp>);

impl Date {
    pub fn timestamp(&self) -> Option<Timestamp> {
        self.0
    }
}

impl From<Timestamp> for Date {
    fn from(ts: Timestamp) -> Self {
        Self(Some(ts))
    }
}

/// Date returned as epoch milliseconds
#[Scalar(name = "Date")]
impl ScalarType for Date {
    fn parse(value: Value) -> InputValueResult<Self> {
        decode(&value)
            .map(Date)
            .map_err(|e| InputValueError::custom(e.to_string()))
    }

    fn to_value(&self) -> Value {
        match &self.0 {
            Some(ts) => encode(ts),
            None => Value::Null,
        }
    }
}
