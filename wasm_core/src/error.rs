//! Validation errors shared by every widget.
//!
//! The `Display` text of each variant is exactly what the UI shows inline next
//! to the offending field, so messages are short and user-facing.

/// A rejected form input or unparsable text payload.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    /// The field was left empty.
    #[error("{field} is required")]
    Missing { field: &'static str },

    /// The field does not hold a finite number.
    #[error("{field} must be a number")]
    NotANumber { field: &'static str },

    /// The field must be strictly greater than zero.
    #[error("{field} must be greater than zero")]
    NotPositive { field: &'static str },

    /// The field must be zero or greater.
    #[error("{field} must not be negative")]
    Negative { field: &'static str },

    /// The field is outside its accepted range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange {
        field: &'static str,
        min: f64,
        max: f64,
    },

    /// Two related fields are inconsistent, e.g. a neck wider than the waist.
    #[error("{field} must be larger than {other}")]
    MustExceed {
        field: &'static str,
        other: &'static str,
    },

    /// A formula would divide by zero for this field.
    #[error("{field} must not be zero")]
    DivisionByZero { field: &'static str },

    /// The field is not a `YYYY-MM-DD` calendar date.
    #[error("{field} is not a valid date")]
    InvalidDate { field: &'static str },

    /// An enumerated option received an unknown name.
    #[error("unsupported {field} '{value}'")]
    UnknownOption { field: &'static str, value: String },

    /// Input could not be parsed as JSON.
    #[error("invalid JSON at line {line}, column {column}: {message}")]
    InvalidJson {
        line: usize,
        column: usize,
        message: String,
    },

    #[error("invalid regular expression: {0}")]
    InvalidRegex(String),

    #[error("invalid Base64 input: {0}")]
    InvalidBase64(String),

    #[error("invalid JWT: {0}")]
    InvalidJwt(String),

    #[error("invalid color: {0}")]
    InvalidColor(String),

    #[error("invalid URL encoding")]
    InvalidUrlEncoding,
}

impl ValidationError {
    /// Name of the form field the error belongs to, when it is field-scoped.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Self::Missing { field }
            | Self::NotANumber { field }
            | Self::NotPositive { field }
            | Self::Negative { field }
            | Self::OutOfRange { field, .. }
            | Self::MustExceed { field, .. }
            | Self::DivisionByZero { field }
            | Self::InvalidDate { field }
            | Self::UnknownOption { field, .. } => Some(*field),
            _ => None,
        }
    }
}

/// Convenience alias for widget results.
pub type ValidationResult<T> = Result<T, ValidationError>;
