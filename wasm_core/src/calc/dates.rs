// Age calculator.
use chrono::{Datelike, Months, NaiveDate};
use serde::Serialize;

use crate::error::ValidationResult;
use crate::fields::parse_date;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AgeInput {
    pub date_of_birth: NaiveDate,
    pub today: NaiveDate,
}

impl AgeInput {
    pub fn parse(date_of_birth: &str, today: NaiveDate) -> ValidationResult<Self> {
        Ok(Self {
            date_of_birth: parse_date("date of birth", date_of_birth)?,
            today,
        })
    }
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AgeResult {
    pub years: i32,
    pub months: i32,
    pub days: i64,
    pub total_days: i64,
    pub total_weeks: i64,
    pub total_months: i64,
    /// ISO date of the next birthday
    pub next_birthday: String,
    pub days_until_birthday: i64,
    pub born_on: String,
}

/// The birthday falling in `year`; 29 February becomes 1 March in common years.
fn birthday_in(date_of_birth: NaiveDate, year: i32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, date_of_birth.month(), date_of_birth.day())
        .or_else(|| NaiveDate::from_ymd_opt(year, 3, 1))
}

/// Calendar age of `date_of_birth` on `today`. Returns `None` when the date of
/// birth lies in the future.
///
/// # Example
/// ```
/// use chrono::NaiveDate;
/// use wasm_core::calc::dates::{age, AgeInput};
/// let today = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
/// let result = age(&AgeInput::parse("1990-05-15", today)?).unwrap();
/// assert_eq!((result.years, result.months, result.days), (33, 9, 24));
/// # Ok::<(), wasm_core::error::ValidationError>(())
/// ```
pub fn age(input: &AgeInput) -> Option<AgeResult> {
    let (dob, today) = (input.date_of_birth, input.today);
    if dob > today {
        return None;
    }

    // Whole months elapsed; the remainder is counted in days from the last
    // monthly anniversary, which clamps to the end of shorter months.
    let mut elapsed = (today.year() - dob.year()) * 12 + today.month() as i32 - dob.month() as i32;
    if today.day() < dob.day() {
        elapsed -= 1;
    }
    let anniversary = dob.checked_add_months(Months::new(elapsed as u32))?;
    let years = elapsed / 12;
    let months = elapsed % 12;
    let days = (today - anniversary).num_days();

    let mut next = birthday_in(dob, today.year())?;
    if next < today {
        next = birthday_in(dob, today.year() + 1)?;
    }
    let total_days = (today - dob).num_days();

    Some(AgeResult {
        years,
        months,
        days,
        total_days,
        total_weeks: total_days / 7,
        total_months: i64::from(years) * 12 + i64::from(months),
        next_birthday: next.format("%Y-%m-%d").to_string(),
        days_until_birthday: (next - today).num_days(),
        born_on: dob.format("%A").to_string(),
    })
}
