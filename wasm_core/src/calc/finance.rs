//! Money calculators: loan amortization, tips, GST and percentages.

use std::str::FromStr;

use serde::Serialize;

use crate::error::{ValidationError, ValidationResult};
use crate::fields::{
    parse_choice, parse_count, parse_in_range, parse_non_negative, parse_number, parse_positive,
    round2,
};

// ---- Loan ----

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoanInput {
    pub principal: f64,
    /// Annual interest rate in percent
    pub annual_rate: f64,
    pub years: u32,
}

impl LoanInput {
    pub fn parse(principal: &str, annual_rate: &str, years: &str) -> ValidationResult<Self> {
        let years = parse_count("loan term", years, 1)?;
        if years > 100 {
            return Err(ValidationError::OutOfRange {
                field: "loan term",
                min: 1.0,
                max: 100.0,
            });
        }
        Ok(Self {
            principal: parse_positive("principal", principal)?,
            annual_rate: parse_in_range("interest rate", annual_rate, 0.0, 100.0)?,
            years,
        })
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AmortizationYear {
    pub year: u32,
    pub principal_paid: f64,
    pub interest_paid: f64,
    pub balance: f64,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LoanResult {
    pub monthly_payment: f64,
    pub total_payment: f64,
    pub total_interest: f64,
    pub schedule: Vec<AmortizationYear>,
}

/// Fixed monthly payment from the standard amortization formula.
pub fn monthly_payment(principal: f64, annual_rate: f64, months: u32) -> f64 {
    let rate = annual_rate / 12.0 / 100.0;
    let n = f64::from(months);
    if rate == 0.0 {
        return principal / n;
    }
    let growth = (1.0 + rate).powf(n);
    principal * rate * growth / (growth - 1.0)
}

/// Payment, totals and a yearly amortization summary.
///
/// # Example
/// ```
/// use wasm_core::calc::finance::{loan, LoanInput};
/// let result = loan(&LoanInput::parse("100000", "5", "30")?);
/// assert_eq!(result.monthly_payment, 536.82);
/// # Ok::<(), wasm_core::error::ValidationError>(())
/// ```
pub fn loan(input: &LoanInput) -> LoanResult {
    let months = input.years * 12;
    let payment = monthly_payment(input.principal, input.annual_rate, months);
    let rate = input.annual_rate / 12.0 / 100.0;

    let mut schedule = Vec::with_capacity(input.years as usize);
    let mut balance = input.principal;
    let (mut year_principal, mut year_interest) = (0.0, 0.0);
    for month in 1..=months {
        let interest = balance * rate;
        let principal_part = (payment - interest).min(balance);
        balance -= principal_part;
        year_principal += principal_part;
        year_interest += interest;
        if month % 12 == 0 {
            schedule.push(AmortizationYear {
                year: month / 12,
                principal_paid: round2(year_principal),
                interest_paid: round2(year_interest),
                balance: round2(balance.max(0.0)),
            });
            year_principal = 0.0;
            year_interest = 0.0;
        }
    }

    let total = payment * f64::from(months);
    LoanResult {
        monthly_payment: round2(payment),
        total_payment: round2(total),
        total_interest: round2(total - input.principal),
        schedule,
    }
}

// ---- Tip ----

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TipInput {
    pub bill: f64,
    pub tip_percent: f64,
    pub people: u32,
}

impl TipInput {
    pub fn parse(bill: &str, tip_percent: &str, people: &str) -> ValidationResult<Self> {
        Ok(Self {
            bill: parse_non_negative("bill amount", bill)?,
            tip_percent: parse_non_negative("tip percentage", tip_percent)?,
            people: parse_count("number of people", people, 1)?,
        })
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TipResult {
    pub tip_amount: f64,
    pub total: f64,
    pub per_person: f64,
    pub tip_per_person: f64,
}

/// Tip, total and the per-person split.
///
/// # Example
/// ```
/// use wasm_core::calc::finance::{tip, TipInput};
/// let result = tip(&TipInput::parse("50", "15", "1")?);
/// assert_eq!((result.tip_amount, result.total, result.per_person), (7.5, 57.5, 57.5));
/// # Ok::<(), wasm_core::error::ValidationError>(())
/// ```
pub fn tip(input: &TipInput) -> TipResult {
    let tip_amount = input.bill * input.tip_percent / 100.0;
    let total = input.bill + tip_amount;
    let people = f64::from(input.people);
    TipResult {
        tip_amount: round2(tip_amount),
        total: round2(total),
        per_person: round2(total / people),
        tip_per_person: round2(tip_amount / people),
    }
}

// ---- GST ----

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GstMode {
    /// Amount is net; tax is added on top
    Add,
    /// Amount already includes tax
    Remove,
}

impl FromStr for GstMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "" | "add" | "exclusive" => Ok(Self::Add),
            "remove" | "inclusive" => Ok(Self::Remove),
            other => Err(format!("unsupported GST mode {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GstInput {
    pub amount: f64,
    pub rate: f64,
    pub mode: GstMode,
}

impl GstInput {
    pub fn parse(amount: &str, rate: &str, mode: &str) -> ValidationResult<Self> {
        Ok(Self {
            amount: parse_non_negative("amount", amount)?,
            rate: parse_in_range("GST rate", rate, 0.0, 100.0)?,
            mode: parse_choice("GST mode", mode)?,
        })
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GstResult {
    pub net_amount: f64,
    pub gst_amount: f64,
    pub total_amount: f64,
    /// Central and state halves of the tax
    pub cgst: f64,
    pub sgst: f64,
}

pub fn gst(input: &GstInput) -> GstResult {
    let (net, tax) = match input.mode {
        GstMode::Add => (input.amount, input.amount * input.rate / 100.0),
        GstMode::Remove => {
            let net = input.amount * 100.0 / (100.0 + input.rate);
            (net, input.amount - net)
        }
    };
    GstResult {
        net_amount: round2(net),
        gst_amount: round2(tax),
        total_amount: round2(net + tax),
        cgst: round2(tax / 2.0),
        sgst: round2(tax / 2.0),
    }
}

// ---- Percentage ----

/// The three questions offered by the percentage calculator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PercentageQuery {
    /// What is `percent`% of `value`?
    PercentOf { percent: f64, value: f64 },
    /// `part` is what percent of `whole`?
    WhatPercent { part: f64, whole: f64 },
    /// Percent change from `from` to `to`
    Change { from: f64, to: f64 },
}

impl PercentageQuery {
    pub fn parse(kind: &str, first: &str, second: &str) -> ValidationResult<Self> {
        let query = match kind.trim().to_ascii_lowercase().as_str() {
            "of" | "percent_of" => Self::PercentOf {
                percent: parse_number("percentage", first)?,
                value: parse_number("value", second)?,
            },
            "what" | "what_percent" => {
                let whole = parse_number("total", second)?;
                if whole == 0.0 {
                    return Err(ValidationError::DivisionByZero { field: "total" });
                }
                Self::WhatPercent {
                    part: parse_number("value", first)?,
                    whole,
                }
            }
            "change" | "percent_change" => {
                let from = parse_number("original value", first)?;
                if from == 0.0 {
                    return Err(ValidationError::DivisionByZero {
                        field: "original value",
                    });
                }
                Self::Change {
                    from,
                    to: parse_number("new value", second)?,
                }
            }
            other => {
                return Err(ValidationError::UnknownOption {
                    field: "calculation",
                    value: other.to_string(),
                })
            }
        };
        Ok(query)
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PercentageResult {
    pub value: f64,
    pub explanation: String,
}

pub fn percentage(query: &PercentageQuery) -> PercentageResult {
    match *query {
        PercentageQuery::PercentOf { percent, value } => {
            let result = round2(percent / 100.0 * value);
            PercentageResult {
                value: result,
                explanation: format!("{percent}% of {value} is {result}"),
            }
        }
        PercentageQuery::WhatPercent { part, whole } => {
            let result = round2(part / whole * 100.0);
            PercentageResult {
                value: result,
                explanation: format!("{part} is {result}% of {whole}"),
            }
        }
        PercentageQuery::Change { from, to } => {
            let result = round2((to - from) / from.abs() * 100.0);
            let direction = if result >= 0.0 { "increase" } else { "decrease" };
            PercentageResult {
                value: result,
                explanation: format!("{from} to {to} is a {}% {direction}", result.abs()),
            }
        }
    }
}
