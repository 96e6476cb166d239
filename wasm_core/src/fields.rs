// Parse-or-reject helpers that turn raw form strings into typed values.
use chrono::NaiveDate;

use crate::error::{ValidationError, ValidationResult};

/// Parses a required numeric field. Underscores and thousands separators are
/// ignored so pasted values like `100,000` are accepted.
///
/// # Example
/// ```
/// use wasm_core::fields::parse_number;
/// assert_eq!(parse_number("principal", " 100,000 ")?, 100000.0);
/// # Ok::<(), wasm_core::error::ValidationError>(())
/// ```
pub fn parse_number(field: &'static str, raw: &str) -> ValidationResult<f64> {
    let cleaned: String = raw
        .trim()
        .chars()
        .filter(|ch| *ch != ',' && *ch != '_')
        .collect();
    if cleaned.is_empty() {
        return Err(ValidationError::Missing { field });
    }
    let value: f64 = cleaned
        .parse()
        .map_err(|_| ValidationError::NotANumber { field })?;
    if !value.is_finite() {
        return Err(ValidationError::NotANumber { field });
    }
    Ok(value)
}

/// Like [`parse_number`] but an empty field yields `None`.
pub fn parse_optional_number(field: &'static str, raw: &str) -> ValidationResult<Option<f64>> {
    if raw.trim().is_empty() {
        return Ok(None);
    }
    parse_number(field, raw).map(Some)
}

pub fn parse_positive(field: &'static str, raw: &str) -> ValidationResult<f64> {
    let value = parse_number(field, raw)?;
    if value <= 0.0 {
        return Err(ValidationError::NotPositive { field });
    }
    Ok(value)
}

pub fn parse_non_negative(field: &'static str, raw: &str) -> ValidationResult<f64> {
    let value = parse_number(field, raw)?;
    if value < 0.0 {
        return Err(ValidationError::Negative { field });
    }
    Ok(value)
}

/// Parses a number and checks it against an inclusive range.
pub fn parse_in_range(field: &'static str, raw: &str, min: f64, max: f64) -> ValidationResult<f64> {
    let value = parse_number(field, raw)?;
    if value < min || value > max {
        return Err(ValidationError::OutOfRange { field, min, max });
    }
    Ok(value)
}

/// Parses a whole number of at least `min` (counts such as people or years).
pub fn parse_count(field: &'static str, raw: &str, min: u32) -> ValidationResult<u32> {
    let value = parse_number(field, raw)?;
    if value.fract() != 0.0 {
        return Err(ValidationError::NotANumber { field });
    }
    if value < f64::from(min) || value > f64::from(u32::MAX) {
        return Err(ValidationError::OutOfRange {
            field,
            min: f64::from(min),
            max: f64::from(u32::MAX),
        });
    }
    Ok(value as u32)
}

/// Parses an HTML date input value (`YYYY-MM-DD`).
pub fn parse_date(field: &'static str, raw: &str) -> ValidationResult<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Missing { field });
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .map_err(|_| ValidationError::InvalidDate { field })
}

/// Parses an enumerated option through its `FromStr` impl, mapping failures to
/// [`ValidationError::UnknownOption`].
pub fn parse_choice<T: std::str::FromStr>(field: &'static str, raw: &str) -> ValidationResult<T> {
    let trimmed = raw.trim();
    trimmed
        .parse::<T>()
        .map_err(|_| ValidationError::UnknownOption {
            field,
            value: trimmed.to_string(),
        })
}

/// Rounds to two decimals for currency-style display.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
