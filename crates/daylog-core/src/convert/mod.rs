//! Stateless conversion helpers
//!
//! Validation and parsing of user-entered dates and numbers, plus the
//! "zero or empty means null" conversions used when moving values between
//! forms and storage. Null is `None`.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use thiserror::Error;

/// `dd/MM/yyyy`
pub const DATE_FORMAT: &str = "%d/%m/%Y";

/// `dd/MM/yyyy HH:mm`
pub const DATE_TIME_FORMAT: &str = "%d/%m/%Y %H:%M";

/// Formats accepted by the lenient `is_date`/`parse_date` checks
const LENIENT_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%d",
    "%d/%m/%Y %H:%M:%S",
    DATE_TIME_FORMAT,
    DATE_FORMAT,
];

/// Range of valid OLE automation dates (days since 1899-12-30)
const OLE_MIN: f64 = -657_435.0;
const OLE_MAX: f64 = 2_958_466.0;

/// Errors raised by the parsing helpers
#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("invalid date {value:?} for format {format:?}")]
    Date { value: String, format: String },

    #[error("no formats given")]
    NoFormats,

    #[error("invalid integer: {0}")]
    Integer(#[from] std::num::ParseIntError),

    #[error("invalid decimal: {0}")]
    Decimal(#[from] std::num::ParseFloatError),
}

pub type ConvertResult<T> = Result<T, ConvertError>;

/// Parse with a single format; date-only formats yield midnight
pub fn parse_date_time(value: &str, format: &str) -> ConvertResult<NaiveDateTime> {
    let value = value.trim();
    NaiveDateTime::parse_from_str(value, format)
        .or_else(|_| NaiveDate::parse_from_str(value, format).map(|d| d.and_time(NaiveTime::MIN)))
        .map_err(|_| ConvertError::Date {
            value: value.to_string(),
            format: format.to_string(),
        })
}

/// Parse with the first matching format
///
/// When none match, the error names the first format.
pub fn parse_date_time_any(value: &str, formats: &[&str]) -> ConvertResult<NaiveDateTime> {
    let first = formats.first().ok_or(ConvertError::NoFormats)?;
    formats
        .iter()
        .find_map(|format| parse_date_time(value, format).ok())
        .map_or_else(|| parse_date_time(value, first), Ok)
}

/// Parse leniently using a set of common formats
pub fn parse_date(value: &str) -> ConvertResult<NaiveDateTime> {
    parse_date_time_any(value, LENIENT_FORMATS)
}

/// Empty input reads as the unset (minimum) date, anything else is parsed leniently
pub fn string_to_date(value: &str) -> ConvertResult<NaiveDateTime> {
    if value.is_empty() {
        return Ok(nullable_to_date(None));
    }
    parse_date(value)
}

pub fn is_date(value: &str) -> bool {
    parse_date(value).is_ok()
}

pub fn is_date_with(value: &str, format: &str) -> bool {
    parse_date_time(value, format).is_ok()
}

/// True if any of the formats matches
pub fn is_date_any(value: &str, formats: &[&str]) -> bool {
    formats.iter().any(|format| is_date_with(value, format))
}

/// Date as typed in a spreadsheet: a date string or an OLE serial number
pub fn is_excel_date(value: &str) -> bool {
    is_date(value)
        || value
            .trim()
            .parse::<f64>()
            .ok()
            .and_then(from_ole_date)
            .is_some()
}

/// Convert an OLE automation date (fractional days since 1899-12-30)
pub fn from_ole_date(serial: f64) -> Option<NaiveDateTime> {
    if !serial.is_finite() || serial <= OLE_MIN || serial >= OLE_MAX {
        return None;
    }
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?.and_time(NaiveTime::MIN);
    // Negative serials count days backwards but the fraction still moves forward
    let days = serial.trunc();
    let millis = (serial.fract().abs() * 86_400_000.0).round() as i64;
    epoch
        .checked_add_signed(Duration::days(days as i64))?
        .checked_add_signed(Duration::milliseconds(millis))
}

pub fn is_integer(value: &str) -> bool {
    value.trim().parse::<i32>().is_ok()
}

pub fn is_decimal(value: &str) -> bool {
    value.trim().parse::<f64>().is_ok()
}

/// Zero is stored as null
pub fn decimal_to_nullable(value: f64) -> Option<f64> {
    (value != 0.0).then_some(value)
}

/// Null reads as zero
pub fn nullable_to_decimal(value: Option<f64>) -> f64 {
    value.unwrap_or(0.0)
}

/// Blank input reads as zero
pub fn string_to_decimal(value: &str) -> ConvertResult<f64> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(0.0);
    }
    Ok(value.parse()?)
}

/// Zero is shown as an empty string
pub fn decimal_to_string(value: f64) -> String {
    if value == 0.0 {
        String::new()
    } else {
        value.to_string()
    }
}

/// Zero is shown as an empty string
pub fn int_to_string(value: i32) -> String {
    if value == 0 {
        String::new()
    } else {
        value.to_string()
    }
}

/// Empty input reads as zero
pub fn string_to_int(value: &str) -> ConvertResult<i32> {
    if value.is_empty() {
        return Ok(0);
    }
    Ok(value.trim().parse()?)
}

/// Empty string is stored as null
pub fn string_to_nullable(value: &str) -> Option<&str> {
    (!value.is_empty()).then_some(value)
}

/// Null reads as an empty string
pub fn nullable_to_string<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

/// Zero is stored as null
pub fn int_to_nullable(value: i32) -> Option<i32> {
    (value != 0).then_some(value)
}

/// Null reads as zero
pub fn nullable_to_int(value: Option<i32>) -> i32 {
    value.unwrap_or(0)
}

/// Unset (minimum) date is shown as an empty string, others as `dd/MM/yyyy`
pub fn date_to_string(value: NaiveDateTime) -> String {
    match date_to_nullable(value) {
        Some(date) => date.format(DATE_FORMAT).to_string(),
        None => String::new(),
    }
}

/// Unset (minimum) date is stored as null
pub fn date_to_nullable(value: NaiveDateTime) -> Option<NaiveDateTime> {
    (value.date() != unset_date()).then_some(value)
}

/// Null reads as the unset (minimum) date
pub fn nullable_to_date(value: Option<NaiveDateTime>) -> NaiveDateTime {
    value.unwrap_or_else(|| unset_date().and_time(NaiveTime::MIN))
}

/// Null reads as false
pub fn nullable_to_bool(value: Option<bool>) -> bool {
    value.unwrap_or(false)
}

/// 0001-01-01, the "no date" marker
pub fn unset_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(1, 1, 1).unwrap_or(NaiveDate::MIN)
}
