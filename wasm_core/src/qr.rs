// QR code widget. Rendering is done by an external image endpoint; we only
// build its request URL.
use std::str::FromStr;

use serde::Deserialize;

use crate::error::{ValidationError, ValidationResult};
use crate::text::color::Color;

pub const QR_ENDPOINT: &str = "https://api.qrserver.com/v1/create-qr-code/";
pub const MIN_SIZE: u32 = 50;
pub const MAX_SIZE: u32 = 1000;

#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum QrFormat {
    #[default]
    Png,
    Svg,
}

impl FromStr for QrFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "png" => Ok(Self::Png),
            "svg" => Ok(Self::Svg),
            other => Err(format!("unsupported format {other}")),
        }
    }
}

impl QrFormat {
    fn as_str(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Svg => "svg",
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default, rename_all = "camelCase")]
pub struct QrOptions {
    /// Edge length in pixels
    pub size: u32,
    pub foreground: String,
    pub background: String,
    /// Quiet zone in pixels
    pub margin: u32,
    pub format: QrFormat,
}

impl Default for QrOptions {
    fn default() -> Self {
        Self {
            size: 200,
            foreground: "#000000".to_string(),
            background: "#ffffff".to_string(),
            margin: 10,
            format: QrFormat::Png,
        }
    }
}

/// Endpoint colors are six hex digits without `#`; alpha is dropped.
fn endpoint_color(raw: &str) -> ValidationResult<String> {
    let color = Color::parse(raw)?;
    Ok(hex::encode([color.r, color.g, color.b]))
}

/// Builds the image URL for `text`.
///
/// # Example
/// ```
/// use wasm_core::qr::{qr_code_url, QrOptions};
/// let url = qr_code_url("hello world", &QrOptions::default())?;
/// assert!(url.contains("data=hello%20world"));
/// assert!(url.contains("size=200x200"));
/// # Ok::<(), wasm_core::error::ValidationError>(())
/// ```
pub fn qr_code_url(text: &str, options: &QrOptions) -> ValidationResult<String> {
    if text.trim().is_empty() {
        return Err(ValidationError::Missing { field: "text" });
    }
    if !(MIN_SIZE..=MAX_SIZE).contains(&options.size) {
        return Err(ValidationError::OutOfRange {
            field: "size",
            min: f64::from(MIN_SIZE),
            max: f64::from(MAX_SIZE),
        });
    }
    let foreground = endpoint_color(&options.foreground)?;
    let background = endpoint_color(&options.background)?;
    Ok(format!(
        "{QR_ENDPOINT}?data={}&size={size}x{size}&color={foreground}&bgcolor={background}&margin={}&format={}",
        urlencoding::encode(text),
        options.margin,
        options.format.as_str(),
        size = options.size,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_text_and_colors() {
        let options = QrOptions {
            size: 300,
            foreground: "rgb(255, 0, 0)".into(),
            background: "#FFF".into(),
            format: QrFormat::Svg,
            ..QrOptions::default()
        };
        let url = qr_code_url("https://example.com/?a=1&b=2", &options).unwrap();
        assert_eq!(
            url,
            "https://api.qrserver.com/v1/create-qr-code/?data=https%3A%2F%2Fexample.com%2F%3Fa%3D1%26b%3D2\
             &size=300x300&color=ff0000&bgcolor=ffffff&margin=10&format=svg"
        );
    }

    #[test]
    fn size_bounds() {
        for size in [49, 1001] {
            let options = QrOptions {
                size,
                ..QrOptions::default()
            };
            assert!(matches!(
                qr_code_url("x", &options),
                Err(ValidationError::OutOfRange { field: "size", .. })
            ));
        }
        let smallest = QrOptions {
            size: MIN_SIZE,
            ..QrOptions::default()
        };
        assert!(qr_code_url("x", &smallest).is_ok());
    }

    #[test]
    fn blank_text_and_bad_colors_are_rejected() {
        assert_eq!(
            qr_code_url("  ", &QrOptions::default()),
            Err(ValidationError::Missing { field: "text" })
        );
        let options = QrOptions {
            foreground: "not-a-color".into(),
            ..QrOptions::default()
        };
        assert!(matches!(
            qr_code_url("x", &options),
            Err(ValidationError::InvalidColor(_))
        ));
    }
}
