// GPA calculator on the 4.0 scale.
use serde::{Deserialize, Serialize};

use crate::error::{ValidationError, ValidationResult};
use crate::fields::{parse_in_range, parse_non_negative, round2};

const LETTER_POINTS: &[(&str, f64)] = &[
    ("A+", 4.0),
    ("A", 4.0),
    ("A-", 3.7),
    ("B+", 3.3),
    ("B", 3.0),
    ("B-", 2.7),
    ("C+", 2.3),
    ("C", 2.0),
    ("C-", 1.7),
    ("D+", 1.3),
    ("D", 1.0),
    ("D-", 0.7),
    ("F", 0.0),
];

/// One course row as typed into the form.
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct CourseRow {
    pub name: String,
    pub grade: String,
    pub credits: String,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Course {
    pub points: f64,
    pub credits: f64,
}

/// Grade points for a letter grade or a numeric value in `0..=4`.
pub fn grade_points(raw: &str) -> ValidationResult<f64> {
    let normalized = raw.trim().to_ascii_uppercase().replace('−', "-");
    if let Some((_, points)) = LETTER_POINTS.iter().find(|(letter, _)| *letter == normalized) {
        return Ok(*points);
    }
    if normalized.starts_with(|ch: char| ch.is_ascii_digit() || ch == '.') {
        return parse_in_range("grade", &normalized, 0.0, 4.0);
    }
    Err(ValidationError::UnknownOption {
        field: "grade",
        value: raw.trim().to_string(),
    })
}

#[derive(Debug, Clone, PartialEq)]
pub struct GpaInput {
    pub courses: Vec<Course>,
}

impl GpaInput {
    /// Rows with both grade and credits blank are skipped.
    pub fn parse(rows: &[CourseRow]) -> ValidationResult<Self> {
        let courses = rows
            .iter()
            .filter(|row| !(row.grade.trim().is_empty() && row.credits.trim().is_empty()))
            .map(|row| {
                Ok(Course {
                    points: grade_points(&row.grade)?,
                    credits: parse_non_negative("credits", &row.credits)?,
                })
            })
            .collect::<ValidationResult<Vec<_>>>()?;
        if courses.iter().map(|course| course.credits).sum::<f64>() == 0.0 {
            return Err(ValidationError::DivisionByZero { field: "total credits" });
        }
        Ok(Self { courses })
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GpaResult {
    pub gpa: f64,
    pub total_credits: f64,
    pub quality_points: f64,
    pub courses: usize,
}

/// Credit-weighted mean of the course grade points.
pub fn gpa(input: &GpaInput) -> GpaResult {
    let total_credits: f64 = input.courses.iter().map(|course| course.credits).sum();
    let quality_points: f64 = input
        .courses
        .iter()
        .map(|course| course.points * course.credits)
        .sum();
    GpaResult {
        gpa: round2(quality_points / total_credits),
        total_credits,
        quality_points: round2(quality_points),
        courses: input.courses.len(),
    }
}
