//! Health calculators: BMI, daily calories, body fat and heart-rate zones.

use std::str::FromStr;

use serde::Serialize;

use crate::error::{ValidationError, ValidationResult};
use crate::fields::{parse_choice, parse_in_range, parse_optional_number, parse_positive, round1};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnitSystem {
    /// Kilograms and centimetres
    #[default]
    Metric,
    /// Pounds and inches
    Imperial,
}

impl FromStr for UnitSystem {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "" | "metric" => Ok(Self::Metric),
            "imperial" | "us" => Ok(Self::Imperial),
            other => Err(format!("unsupported unit system {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sex {
    Male,
    Female,
}

impl FromStr for Sex {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "male" | "m" => Ok(Self::Male),
            "female" | "f" => Ok(Self::Female),
            other => Err(format!("unsupported sex {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityLevel {
    Sedentary,
    Light,
    Moderate,
    Active,
    VeryActive,
}

impl ActivityLevel {
    pub fn factor(self) -> f64 {
        match self {
            Self::Sedentary => 1.2,
            Self::Light => 1.375,
            Self::Moderate => 1.55,
            Self::Active => 1.725,
            Self::VeryActive => 1.9,
        }
    }
}

impl FromStr for ActivityLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace(['-', ' '], "_").as_str() {
            "sedentary" => Ok(Self::Sedentary),
            "light" => Ok(Self::Light),
            "moderate" => Ok(Self::Moderate),
            "active" => Ok(Self::Active),
            "very_active" | "veryactive" => Ok(Self::VeryActive),
            other => Err(format!("unsupported activity level {other}")),
        }
    }
}

// ---- BMI ----

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BmiInput {
    pub weight: f64,
    pub height: f64,
    pub units: UnitSystem,
}

impl BmiInput {
    pub fn parse(weight: &str, height: &str, units: &str) -> ValidationResult<Self> {
        Ok(Self {
            weight: parse_positive("weight", weight)?,
            height: parse_positive("height", height)?,
            units: parse_choice("unit system", units)?,
        })
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BmiResult {
    pub bmi: f64,
    pub category: &'static str,
    /// Weight range for a BMI of 18.5 to 24.9, in the input's weight unit
    pub healthy_weight_min: f64,
    pub healthy_weight_max: f64,
}

pub fn bmi_category(bmi: f64) -> &'static str {
    if bmi < 18.5 {
        "Underweight"
    } else if bmi < 25.0 {
        "Normal weight"
    } else if bmi < 30.0 {
        "Overweight"
    } else {
        "Obese"
    }
}

/// Body-mass index from weight and height.
///
/// # Example
/// ```
/// use wasm_core::calc::health::{bmi, BmiInput};
/// let result = bmi(&BmiInput::parse("70", "170", "metric")?);
/// assert_eq!(result.bmi, 24.2);
/// assert_eq!(result.category, "Normal weight");
/// # Ok::<(), wasm_core::error::ValidationError>(())
/// ```
pub fn bmi(input: &BmiInput) -> BmiResult {
    // Imperial uses the 703 conversion factor on lb / in².
    let (height_sq, factor) = match input.units {
        UnitSystem::Metric => ((input.height / 100.0).powi(2), 1.0),
        UnitSystem::Imperial => (input.height.powi(2), 703.0),
    };
    let value = factor * input.weight / height_sq;
    BmiResult {
        bmi: round1(value),
        category: bmi_category(value),
        healthy_weight_min: round1(18.5 * height_sq / factor),
        healthy_weight_max: round1(24.9 * height_sq / factor),
    }
}

// ---- Calories (Mifflin-St Jeor) ----

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalorieInput {
    pub sex: Sex,
    pub age: f64,
    pub weight_kg: f64,
    pub height_cm: f64,
    pub activity: ActivityLevel,
}

impl CalorieInput {
    pub fn parse(
        sex: &str,
        age: &str,
        weight_kg: &str,
        height_cm: &str,
        activity: &str,
    ) -> ValidationResult<Self> {
        Ok(Self {
            sex: parse_choice("sex", sex)?,
            age: parse_in_range("age", age, 1.0, 120.0)?,
            weight_kg: parse_positive("weight", weight_kg)?,
            height_cm: parse_positive("height", height_cm)?,
            activity: parse_choice("activity level", activity)?,
        })
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CalorieResult {
    pub bmr: f64,
    pub tdee: f64,
    /// About 0.5 kg a week
    pub mild_loss: f64,
    pub weight_loss: f64,
    pub weight_gain: f64,
}

pub fn calories(input: &CalorieInput) -> CalorieResult {
    let base = 10.0 * input.weight_kg + 6.25 * input.height_cm - 5.0 * input.age;
    let bmr = match input.sex {
        Sex::Male => base + 5.0,
        Sex::Female => base - 161.0,
    };
    let tdee = bmr * input.activity.factor();
    CalorieResult {
        bmr: bmr.round(),
        tdee: tdee.round(),
        mild_loss: (tdee - 250.0).round(),
        weight_loss: (tdee - 500.0).round(),
        weight_gain: (tdee + 500.0).round(),
    }
}

// ---- Body fat (U.S. Navy) ----

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyFatInput {
    pub sex: Sex,
    pub height_cm: f64,
    pub neck_cm: f64,
    pub waist_cm: f64,
    /// Required for the female formula
    pub hip_cm: Option<f64>,
}

impl BodyFatInput {
    pub fn parse(
        sex: &str,
        height_cm: &str,
        neck_cm: &str,
        waist_cm: &str,
        hip_cm: &str,
    ) -> ValidationResult<Self> {
        let sex: Sex = parse_choice("sex", sex)?;
        let hip_cm = match sex {
            Sex::Female => Some(parse_positive("hip", hip_cm)?),
            Sex::Male => parse_optional_number("hip", hip_cm)?,
        };
        Ok(Self {
            sex,
            height_cm: parse_positive("height", height_cm)?,
            neck_cm: parse_positive("neck", neck_cm)?,
            waist_cm: parse_positive("waist", waist_cm)?,
            hip_cm,
        })
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BodyFatResult {
    pub body_fat_percent: f64,
    pub category: &'static str,
}

pub fn body_fat(input: &BodyFatInput) -> ValidationResult<BodyFatResult> {
    let percent = match input.sex {
        Sex::Male => {
            let girth = input.waist_cm - input.neck_cm;
            if girth <= 0.0 {
                return Err(ValidationError::MustExceed {
                    field: "waist",
                    other: "neck",
                });
            }
            495.0 / (1.0324 - 0.19077 * girth.log10() + 0.15456 * input.height_cm.log10()) - 450.0
        }
        Sex::Female => {
            let hip = input.hip_cm.ok_or(ValidationError::Missing { field: "hip" })?;
            let girth = input.waist_cm + hip - input.neck_cm;
            if girth <= 0.0 {
                return Err(ValidationError::MustExceed {
                    field: "waist",
                    other: "neck",
                });
            }
            495.0 / (1.29579 - 0.35004 * girth.log10() + 0.22100 * input.height_cm.log10()) - 450.0
        }
    };
    let percent = round1(percent.max(0.0));
    Ok(BodyFatResult {
        body_fat_percent: percent,
        category: body_fat_category(input.sex, percent),
    })
}

fn body_fat_category(sex: Sex, percent: f64) -> &'static str {
    let bounds = match sex {
        Sex::Male => [6.0, 14.0, 18.0, 25.0],
        Sex::Female => [14.0, 21.0, 25.0, 32.0],
    };
    if percent < bounds[0] {
        "Essential fat"
    } else if percent < bounds[1] {
        "Athletes"
    } else if percent < bounds[2] {
        "Fitness"
    } else if percent < bounds[3] {
        "Average"
    } else {
        "Obese"
    }
}

// ---- Heart-rate zones ----

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeartRateInput {
    pub age: f64,
    pub resting: Option<f64>,
}

impl HeartRateInput {
    pub fn parse(age: &str, resting: &str) -> ValidationResult<Self> {
        let resting = match parse_optional_number("resting heart rate", resting)? {
            Some(value) if !(30.0..=120.0).contains(&value) => {
                return Err(ValidationError::OutOfRange {
                    field: "resting heart rate",
                    min: 30.0,
                    max: 120.0,
                })
            }
            other => other,
        };
        Ok(Self {
            age: parse_in_range("age", age, 1.0, 120.0)?,
            resting,
        })
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HeartRateZone {
    pub name: &'static str,
    pub min_percent: u32,
    pub max_percent: u32,
    pub min_bpm: u32,
    pub max_bpm: u32,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HeartRateResult {
    pub max_heart_rate: u32,
    /// True when zones use the Karvonen heart-rate reserve
    pub karvonen: bool,
    pub zones: Vec<HeartRateZone>,
}

const ZONES: [(&str, u32, u32); 5] = [
    ("Very light", 50, 60),
    ("Light", 60, 70),
    ("Moderate", 70, 80),
    ("Hard", 80, 90),
    ("Maximum", 90, 100),
];

pub fn heart_rate_zones(input: &HeartRateInput) -> HeartRateResult {
    let max_hr = 220.0 - input.age;
    let target = |pct: u32| -> u32 {
        let fraction = f64::from(pct) / 100.0;
        let bpm = match input.resting {
            Some(rest) => rest + (max_hr - rest) * fraction,
            None => max_hr * fraction,
        };
        bpm.round() as u32
    };
    let zones = ZONES
        .iter()
        .map(|(name, lo, hi)| HeartRateZone {
            name: *name,
            min_percent: *lo,
            max_percent: *hi,
            min_bpm: target(*lo),
            max_bpm: target(*hi),
        })
        .collect();
    HeartRateResult {
        max_heart_rate: max_hr.round() as u32,
        karvonen: input.resting.is_some(),
        zones,
    }
}
