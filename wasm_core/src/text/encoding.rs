// Base64 and URL encoders behind the encode/decode widgets.
use std::str::FromStr;

use base64::engine::general_purpose::{STANDARD, URL_SAFE};
use base64::Engine;

use crate::error::{ValidationError, ValidationResult};

/// Base64 alphabet selected in the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Base64Variant {
    #[default]
    Standard,
    UrlSafe,
}

impl FromStr for Base64Variant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "standard" => Ok(Self::Standard),
            "url" | "urlsafe" | "url_safe" => Ok(Self::UrlSafe),
            other => Err(format!("unsupported base64 variant {other}")),
        }
    }
}

/// Encodes UTF-8 text as padded Base64.
///
/// # Example
/// ```
/// use wasm_core::text::encoding::{base64_encode, Base64Variant};
/// assert_eq!(base64_encode("hi?>", Base64Variant::UrlSafe), "aGk_Pg==");
/// ```
pub fn base64_encode(input: &str, variant: Base64Variant) -> String {
    match variant {
        Base64Variant::Standard => STANDARD.encode(input.as_bytes()),
        Base64Variant::UrlSafe => URL_SAFE.encode(input.as_bytes()),
    }
}

/// Decodes Base64 into raw bytes. Whitespace is ignored, missing padding is
/// restored, and both alphabets are accepted.
pub fn base64_decode_bytes(input: &str) -> ValidationResult<Vec<u8>> {
    let mut normalized: String = input.chars().filter(|ch| !ch.is_whitespace()).collect();
    if normalized.is_empty() {
        return Err(ValidationError::Missing {
            field: "Base64 input",
        });
    }
    let url_safe = normalized.contains(['-', '_']);
    let rem = normalized.len() % 4;
    if rem != 0 {
        normalized.extend(std::iter::repeat_n('=', 4 - rem));
    }
    let engine = if url_safe { &URL_SAFE } else { &STANDARD };
    engine
        .decode(normalized.as_bytes())
        .map_err(|err| ValidationError::InvalidBase64(err.to_string()))
}

/// Decodes Base64 into text; non-UTF-8 payloads are rejected.
pub fn base64_decode(input: &str) -> ValidationResult<String> {
    let bytes = base64_decode_bytes(input)?;
    String::from_utf8(bytes)
        .map_err(|_| ValidationError::InvalidBase64("decoded bytes are not UTF-8 text".into()))
}

/// Percent-encodes a string for use in a URL component.
pub fn url_encode(input: &str) -> String {
    urlencoding::encode(input).into_owned()
}

/// Decodes a percent-encoded string; `+` is read as a space.
pub fn url_decode(input: &str) -> ValidationResult<String> {
    let normalized = input.replace('+', " ");
    urlencoding::decode(&normalized)
        .map(|cow| cow.into_owned())
        .map_err(|_| ValidationError::InvalidUrlEncoding)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_unicode_text() {
        assert_eq!(base64_encode("héllo", Base64Variant::Standard), "aMOpbGxv");
    }

    #[test]
    fn decode_tolerates_whitespace_and_missing_padding() {
        assert_eq!(base64_decode("aGVs\nbG8").unwrap(), "hello");
        assert_eq!(base64_decode("aGk_Pg").unwrap(), "hi?>");
    }

    #[test]
    fn decode_rejects_garbage() {
        assert!(matches!(
            base64_decode("@@@@"),
            Err(ValidationError::InvalidBase64(_))
        ));
        assert!(matches!(
            base64_decode(""),
            Err(ValidationError::Missing { .. })
        ));
    }

    #[test]
    fn binary_payload_is_not_text() {
        let encoded = STANDARD.encode([0xffu8, 0xfe]);
        assert_eq!(base64_decode_bytes(&encoded).unwrap(), vec![0xff, 0xfe]);
        assert!(base64_decode(&encoded).is_err());
    }

    #[test]
    fn url_round_trip() {
        let encoded = url_encode("a b&c=d/é");
        assert_eq!(encoded, "a%20b%26c%3Dd%2F%C3%A9");
        assert_eq!(url_decode(&encoded).unwrap(), "a b&c=d/é");
        assert_eq!(url_decode("a+b").unwrap(), "a b");
        assert_eq!(url_decode("%FF"), Err(ValidationError::InvalidUrlEncoding));
    }
}
