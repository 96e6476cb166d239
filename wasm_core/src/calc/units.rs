//! Unit converter for length, mass and temperature.
//!
//! Length and mass go through a factor table relative to a base unit (metre,
//! kilogram). Temperature is affine and converts through Celsius.

use std::str::FromStr;

use serde::Serialize;

use crate::error::{ValidationError, ValidationResult};
use crate::fields::{parse_choice, parse_number};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitCategory {
    Length,
    Mass,
    Temperature,
}

impl FromStr for UnitCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "length" | "distance" => Ok(Self::Length),
            "mass" | "weight" => Ok(Self::Mass),
            "temperature" | "temp" => Ok(Self::Temperature),
            other => Err(format!("unsupported category {other}")),
        }
    }
}

/// Metres per unit.
const LENGTH_UNITS: &[(&str, f64)] = &[
    ("mm", 0.001),
    ("cm", 0.01),
    ("m", 1.0),
    ("km", 1000.0),
    ("in", 0.0254),
    ("ft", 0.3048),
    ("yd", 0.9144),
    ("mi", 1609.344),
];

/// Kilograms per unit.
const MASS_UNITS: &[(&str, f64)] = &[
    ("mg", 0.000_001),
    ("g", 0.001),
    ("kg", 1.0),
    ("t", 1000.0),
    ("oz", 0.028_349_523_125),
    ("lb", 0.453_592_37),
    ("st", 6.350_293_18),
];

const TEMPERATURE_UNITS: &[&str] = &["c", "f", "k"];

impl UnitCategory {
    pub fn units(self) -> Vec<&'static str> {
        match self {
            Self::Length => LENGTH_UNITS.iter().map(|(unit, _)| *unit).collect(),
            Self::Mass => MASS_UNITS.iter().map(|(unit, _)| *unit).collect(),
            Self::Temperature => TEMPERATURE_UNITS.to_vec(),
        }
    }

    fn lookup(self, field: &'static str, raw: &str) -> ValidationResult<&'static str> {
        let wanted = raw.trim().to_ascii_lowercase();
        let wanted = match wanted.as_str() {
            "celsius" | "°c" => "c",
            "fahrenheit" | "°f" => "f",
            "kelvin" => "k",
            other => other,
        };
        self.units()
            .into_iter()
            .find(|unit| *unit == wanted)
            .ok_or_else(|| ValidationError::UnknownOption {
                field,
                value: raw.trim().to_string(),
            })
    }
}

fn factor(table: &[(&str, f64)], unit: &str) -> f64 {
    table
        .iter()
        .find(|(name, _)| *name == unit)
        .map_or(1.0, |(_, factor)| *factor)
}

fn to_celsius(value: f64, unit: &str) -> f64 {
    match unit {
        "f" => (value - 32.0) * 5.0 / 9.0,
        "k" => value - 273.15,
        _ => value,
    }
}

fn from_celsius(value: f64, unit: &str) -> f64 {
    match unit {
        "f" => value * 9.0 / 5.0 + 32.0,
        "k" => value + 273.15,
        _ => value,
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConversionInput {
    pub category: UnitCategory,
    pub value: f64,
    pub from: &'static str,
    pub to: &'static str,
}

impl ConversionInput {
    pub fn parse(category: &str, value: &str, from: &str, to: &str) -> ValidationResult<Self> {
        let category: UnitCategory = parse_choice("category", category)?;
        Ok(Self {
            category,
            value: parse_number("value", value)?,
            from: category.lookup("from unit", from)?,
            to: category.lookup("to unit", to)?,
        })
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ConversionResult {
    pub value: f64,
    pub from: &'static str,
    pub to: &'static str,
}

/// Rounds away float noise such as `0.30000000000000004`.
fn tidy(value: f64) -> f64 {
    (value * 1e9).round() / 1e9
}

pub fn convert_units(input: &ConversionInput) -> ConversionResult {
    let value = match input.category {
        UnitCategory::Length => {
            input.value * factor(LENGTH_UNITS, input.from) / factor(LENGTH_UNITS, input.to)
        }
        UnitCategory::Mass => {
            input.value * factor(MASS_UNITS, input.from) / factor(MASS_UNITS, input.to)
        }
        UnitCategory::Temperature => from_celsius(to_celsius(input.value, input.from), input.to),
    };
    ConversionResult {
        value: tidy(value),
        from: input.from,
        to: input.to,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn convert(category: &str, value: &str, from: &str, to: &str) -> f64 {
        convert_units(&ConversionInput::parse(category, value, from, to).unwrap()).value
    }

    #[test]
    fn length_factors() {
        assert_eq!(convert("length", "1", "mi", "km"), 1.609344);
        assert_eq!(convert("length", "12", "in", "ft"), 1.0);
        assert_eq!(convert("length", "250", "cm", "m"), 2.5);
    }

    #[test]
    fn mass_factors() {
        assert_eq!(convert("mass", "1", "kg", "g"), 1000.0);
        assert_eq!(convert("weight", "16", "oz", "lb"), 1.0);
    }

    #[test]
    fn temperature_is_affine() {
        assert_eq!(convert("temperature", "100", "C", "F"), 212.0);
        assert_eq!(convert("temperature", "32", "fahrenheit", "celsius"), 0.0);
        assert_eq!(convert("temperature", "0", "K", "C"), -273.15);
        assert_eq!(convert("temperature", "-40", "F", "C"), -40.0);
    }

    #[test]
    fn units_must_match_category() {
        assert_eq!(
            ConversionInput::parse("length", "1", "kg", "m"),
            Err(ValidationError::UnknownOption {
                field: "from unit",
                value: "kg".into()
            })
        );
        assert!(ConversionInput::parse("volume", "1", "l", "ml").is_err());
    }
}
