// JSON formatter widget: pretty-print, minify and validate pasted JSON.
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::ser::{PrettyFormatter, Serializer};
use serde_json::Value;

use crate::error::{ValidationError, ValidationResult};

/// Indentation offered by the formatter.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Indent {
    #[default]
    Two,
    Four,
    Tab,
}

impl Indent {
    fn as_bytes(self) -> &'static [u8] {
        match self {
            Self::Two => b"  ",
            Self::Four => b"    ",
            Self::Tab => b"\t",
        }
    }
}

impl FromStr for Indent {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "2" | "two" | "" => Ok(Self::Two),
            "4" | "four" => Ok(Self::Four),
            "tab" | "\t" => Ok(Self::Tab),
            other => Err(format!("unsupported indent {other}")),
        }
    }
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct JsonFormatOptions {
    pub indent: Indent,
    pub minify: bool,
}

/// Outcome of the validate button.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct JsonValidation {
    pub valid: bool,
    pub message: String,
    /// Top-level kind such as "object" or "array" when valid
    pub kind: Option<&'static str>,
}

/// Parses a JSON string, keeping line and column of the first syntax error.
///
/// # Example
/// ```
/// use wasm_core::text::json::parse_json;
/// let value = parse_json("{\"id\":1}")?;
/// assert_eq!(value["id"], 1);
/// # Ok::<(), wasm_core::error::ValidationError>(())
/// ```
pub fn parse_json(input: &str) -> ValidationResult<Value> {
    if input.trim().is_empty() {
        return Err(ValidationError::Missing { field: "JSON input" });
    }
    serde_json::from_str(input).map_err(|err| ValidationError::InvalidJson {
        line: err.line(),
        column: err.column(),
        message: strip_position(&err.to_string()),
    })
}

// serde_json appends " at line X column Y", which the error already carries.
fn strip_position(message: &str) -> String {
    match message.rfind(" at line ") {
        Some(idx) => message[..idx].to_string(),
        None => message.to_string(),
    }
}

/// Re-encodes parsed JSON, preserving key order.
pub fn encode_json(value: &Value, options: &JsonFormatOptions) -> ValidationResult<String> {
    if options.minify {
        return serde_json::to_string(value).map_err(|err| ValidationError::InvalidJson {
            line: 0,
            column: 0,
            message: err.to_string(),
        });
    }
    let mut buffer = Vec::new();
    let formatter = PrettyFormatter::with_indent(options.indent.as_bytes());
    let mut serializer = Serializer::with_formatter(&mut buffer, formatter);
    value
        .serialize(&mut serializer)
        .map_err(|err| ValidationError::InvalidJson {
            line: 0,
            column: 0,
            message: err.to_string(),
        })?;
    String::from_utf8(buffer).map_err(|err| ValidationError::InvalidJson {
        line: 0,
        column: 0,
        message: err.to_string(),
    })
}

/// Formats or minifies JSON text.
///
/// # Example
/// ```
/// use wasm_core::text::json::{format_json, JsonFormatOptions};
/// let options = JsonFormatOptions { minify: true, ..Default::default() };
/// let out = format_json("{ \"b\": 1, \"a\": [1, 2] }", &options)?;
/// assert_eq!(out, "{\"b\":1,\"a\":[1,2]}");
/// # Ok::<(), wasm_core::error::ValidationError>(())
/// ```
pub fn format_json(input: &str, options: &JsonFormatOptions) -> ValidationResult<String> {
    let value = parse_json(input)?;
    encode_json(&value, options)
}

pub fn validate_json(input: &str) -> JsonValidation {
    match parse_json(input) {
        Ok(value) => JsonValidation {
            valid: true,
            message: "Valid JSON".into(),
            kind: Some(kind_name(&value)),
        },
        Err(err) => JsonValidation {
            valid: false,
            message: err.to_string(),
            kind: None,
        },
    }
}

fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
