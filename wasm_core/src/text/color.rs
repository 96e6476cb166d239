//! Color converter widget.
//!
//! The parser is deliberately forgiving about what users paste: hex with or
//! without `#` (3, 4, 6 or 8 digits), CSS `rgb()/rgba()` and `hsl()/hsla()`
//! with comma or space separators, a bare `r, g, b` triplet, and a handful of
//! CSS color names.

use serde::Serialize;

use crate::error::{ValidationError, ValidationResult};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    /// 0.0 ..= 1.0
    pub alpha: f64,
}

/// Every representation shown by the converter.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ColorFormats {
    pub hex: String,
    pub rgb: String,
    pub hsl: String,
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub alpha: f64,
}

const NAMED: &[(&str, [u8; 3])] = &[
    ("black", [0, 0, 0]),
    ("white", [255, 255, 255]),
    ("red", [255, 0, 0]),
    ("green", [0, 128, 0]),
    ("lime", [0, 255, 0]),
    ("blue", [0, 0, 255]),
    ("yellow", [255, 255, 0]),
    ("cyan", [0, 255, 255]),
    ("magenta", [255, 0, 255]),
    ("gray", [128, 128, 128]),
    ("grey", [128, 128, 128]),
    ("orange", [255, 165, 0]),
    ("purple", [128, 0, 128]),
    ("navy", [0, 0, 128]),
    ("teal", [0, 128, 128]),
    ("silver", [192, 192, 192]),
];

impl Color {
    pub fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, alpha: 1.0 }
    }

    /// Parses any supported notation.
    ///
    /// # Example
    /// ```
    /// use wasm_core::text::color::Color;
    /// assert_eq!(Color::parse("#f80")?, Color::rgb(255, 136, 0));
    /// assert_eq!(Color::parse("rgb(255 136 0)")?, Color::rgb(255, 136, 0));
    /// # Ok::<(), wasm_core::error::ValidationError>(())
    /// ```
    pub fn parse(input: &str) -> ValidationResult<Self> {
        let text = input.trim().to_ascii_lowercase();
        if text.is_empty() {
            return Err(ValidationError::Missing { field: "color" });
        }
        if text == "transparent" {
            return Ok(Self {
                alpha: 0.0,
                ..Self::rgb(0, 0, 0)
            });
        }
        if let Some((_, [r, g, b])) = NAMED.iter().find(|(name, _)| *name == text) {
            return Ok(Self::rgb(*r, *g, *b));
        }
        if let Some(args) = function_args(&text, &["rgba", "rgb"]) {
            return parse_rgb_args(&args, input);
        }
        if let Some(args) = function_args(&text, &["hsla", "hsl"]) {
            return parse_hsl_args(&args, input);
        }
        let hex_digits = text.strip_prefix('#').unwrap_or(&text);
        if hex_digits.chars().all(|ch| ch.is_ascii_hexdigit()) {
            return parse_hex(hex_digits).ok_or_else(|| invalid(input));
        }
        let bare = split_args(&text);
        if bare.len() == 3 || bare.len() == 4 {
            return parse_rgb_args(&bare, input);
        }
        Err(invalid(input))
    }

    pub fn to_hex(&self) -> String {
        let mut out = format!("#{}", hex::encode([self.r, self.g, self.b]));
        if self.alpha < 1.0 {
            out.push_str(&hex::encode([(self.alpha * 255.0).round() as u8]));
        }
        out
    }

    pub fn to_rgb_string(&self) -> String {
        if self.alpha < 1.0 {
            format!(
                "rgba({}, {}, {}, {})",
                self.r,
                self.g,
                self.b,
                trim_float(self.alpha)
            )
        } else {
            format!("rgb({}, {}, {})", self.r, self.g, self.b)
        }
    }

    /// Hue in degrees, saturation and lightness in percent.
    pub fn to_hsl(&self) -> (f64, f64, f64) {
        let r = f64::from(self.r) / 255.0;
        let g = f64::from(self.g) / 255.0;
        let b = f64::from(self.b) / 255.0;
        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let light = (max + min) / 2.0;
        let delta = max - min;
        if delta == 0.0 {
            return (0.0, 0.0, light * 100.0);
        }
        let sat = if light > 0.5 {
            delta / (2.0 - max - min)
        } else {
            delta / (max + min)
        };
        let hue = if max == r {
            (g - b) / delta + if g < b { 6.0 } else { 0.0 }
        } else if max == g {
            (b - r) / delta + 2.0
        } else {
            (r - g) / delta + 4.0
        };
        (hue * 60.0, sat * 100.0, light * 100.0)
    }

    pub fn to_hsl_string(&self) -> String {
        let (h, s, l) = self.to_hsl();
        let (h, s, l) = (h.round(), s.round(), l.round());
        if self.alpha < 1.0 {
            format!("hsla({h}, {s}%, {l}%, {})", trim_float(self.alpha))
        } else {
            format!("hsl({h}, {s}%, {l}%)")
        }
    }

    pub fn from_hsl(hue: f64, sat: f64, light: f64, alpha: f64) -> Self {
        let h = hue.rem_euclid(360.0) / 360.0;
        let s = (sat / 100.0).clamp(0.0, 1.0);
        let l = (light / 100.0).clamp(0.0, 1.0);
        let to_byte = |v: f64| (v * 255.0).round().clamp(0.0, 255.0) as u8;
        if s == 0.0 {
            let v = to_byte(l);
            return Self { r: v, g: v, b: v, alpha };
        }
        let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
        let p = 2.0 * l - q;
        Self {
            r: to_byte(hue_to_channel(p, q, h + 1.0 / 3.0)),
            g: to_byte(hue_to_channel(p, q, h)),
            b: to_byte(hue_to_channel(p, q, h - 1.0 / 3.0)),
            alpha,
        }
    }

    pub fn formats(&self) -> ColorFormats {
        ColorFormats {
            hex: self.to_hex(),
            rgb: self.to_rgb_string(),
            hsl: self.to_hsl_string(),
            r: self.r,
            g: self.g,
            b: self.b,
            alpha: self.alpha,
        }
    }
}

fn hue_to_channel(p: f64, q: f64, t: f64) -> f64 {
    let t = t.rem_euclid(1.0);
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 0.5 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

fn invalid(input: &str) -> ValidationError {
    ValidationError::InvalidColor(input.trim().to_string())
}

fn trim_float(value: f64) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    format!("{rounded}")
}

fn parse_hex(digits: &str) -> Option<Color> {
    let expanded: String = match digits.len() {
        3 | 4 => digits.chars().flat_map(|ch| [ch, ch]).collect(),
        6 | 8 => digits.to_string(),
        _ => return None,
    };
    let bytes = hex::decode(expanded).ok()?;
    Some(Color {
        r: bytes[0],
        g: bytes[1],
        b: bytes[2],
        alpha: bytes.get(3).map_or(1.0, |a| f64::from(*a) / 255.0),
    })
}

fn function_args(text: &str, names: &[&str]) -> Option<Vec<String>> {
    let name = names.iter().find(|name| text.starts_with(*name))?;
    let inner = text[name.len()..]
        .trim()
        .strip_prefix('(')?
        .strip_suffix(')')?;
    Some(split_args(inner))
}

fn split_args(inner: &str) -> Vec<String> {
    inner
        .split(|ch: char| ch == ',' || ch == '/' || ch.is_whitespace())
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_channel(arg: &str, input: &str) -> ValidationResult<u8> {
    let value = match arg.strip_suffix('%') {
        Some(pct) => pct.parse::<f64>().map_err(|_| invalid(input))? * 2.55,
        None => arg.parse::<f64>().map_err(|_| invalid(input))?,
    };
    if !(0.0..=255.0).contains(&value) {
        return Err(invalid(input));
    }
    Ok(value.round() as u8)
}

fn parse_alpha(arg: Option<&String>, input: &str) -> ValidationResult<f64> {
    let Some(arg) = arg else {
        return Ok(1.0);
    };
    let value = match arg.strip_suffix('%') {
        Some(pct) => pct.parse::<f64>().map_err(|_| invalid(input))? / 100.0,
        None => arg.parse::<f64>().map_err(|_| invalid(input))?,
    };
    if !(0.0..=1.0).contains(&value) {
        return Err(invalid(input));
    }
    Ok(value)
}

fn parse_rgb_args(args: &[String], input: &str) -> ValidationResult<Color> {
    if args.len() != 3 && args.len() != 4 {
        return Err(invalid(input));
    }
    Ok(Color {
        r: parse_channel(&args[0], input)?,
        g: parse_channel(&args[1], input)?,
        b: parse_channel(&args[2], input)?,
        alpha: parse_alpha(args.get(3), input)?,
    })
}

fn parse_hsl_args(args: &[String], input: &str) -> ValidationResult<Color> {
    if args.len() != 3 && args.len() != 4 {
        return Err(invalid(input));
    }
    let hue: f64 = args[0]
        .trim_end_matches("deg")
        .parse()
        .map_err(|_| invalid(input))?;
    let percent = |arg: &str| -> ValidationResult<f64> {
        let value: f64 = arg
            .trim_end_matches('%')
            .parse()
            .map_err(|_| invalid(input))?;
        if !(0.0..=100.0).contains(&value) {
            return Err(invalid(input));
        }
        Ok(value)
    };
    let sat = percent(&args[1])?;
    let light = percent(&args[2])?;
    let alpha = parse_alpha(args.get(3), input)?;
    Ok(Color::from_hsl(hue, sat, light, alpha))
}

/// Parses a color and returns all representations.
pub fn convert_color(input: &str) -> ValidationResult<ColorFormats> {
    Color::parse(input).map(|color| color.formats())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_variants() {
        assert_eq!(Color::parse("FF8800").unwrap(), Color::rgb(255, 136, 0));
        let translucent = Color::parse("#ff880080").unwrap();
        assert!((translucent.alpha - 128.0 / 255.0).abs() < 1e-9);
        assert_eq!(translucent.to_hex(), "#ff880080");
        assert!(Color::parse("#ff88").is_ok());
        assert!(Color::parse("#ff88000").is_err());
    }

    #[test]
    fn functional_notations() {
        assert_eq!(
            Color::parse("rgba(255, 0, 0, 50%)").unwrap().alpha,
            0.5
        );
        assert_eq!(
            Color::parse("rgb(100%, 0%, 0%)").unwrap(),
            Color::rgb(255, 0, 0)
        );
        assert_eq!(
            Color::parse("hsl(120deg 100% 25%)").unwrap(),
            Color::rgb(0, 128, 0)
        );
        assert_eq!(Color::parse(" 10, 20, 30 ").unwrap(), Color::rgb(10, 20, 30));
    }

    #[test]
    fn names_and_transparent() {
        assert_eq!(Color::parse("Orange").unwrap(), Color::rgb(255, 165, 0));
        assert_eq!(Color::parse("transparent").unwrap().alpha, 0.0);
    }

    #[test]
    fn hsl_round_trip() {
        let color = Color::rgb(255, 136, 0);
        let (h, s, l) = color.to_hsl();
        assert_eq!(color.to_hsl_string(), "hsl(32, 100%, 50%)");
        assert_eq!(Color::from_hsl(h, s, l, 1.0), color);
    }

    #[test]
    fn gray_has_no_saturation() {
        assert_eq!(Color::rgb(128, 128, 128).to_hsl_string(), "hsl(0, 0%, 50%)");
    }

    #[test]
    fn formats_output() {
        let formats = convert_color("rgba(0,0,255,0.25)").unwrap();
        assert_eq!(formats.hex, "#0000ff40");
        assert_eq!(formats.rgb, "rgba(0, 0, 255, 0.25)");
        assert_eq!(formats.hsl, "hsla(240, 100%, 50%, 0.25)");
    }

    #[test]
    fn rejects_out_of_range_and_garbage() {
        assert!(Color::parse("rgb(256, 0, 0)").is_err());
        assert!(Color::parse("hsl(0, 120%, 50%)").is_err());
        assert!(matches!(
            Color::parse("not a color"),
            Err(ValidationError::InvalidColor(_))
        ));
        assert!(matches!(
            Color::parse(""),
            Err(ValidationError::Missing { .. })
        ));
    }
}
