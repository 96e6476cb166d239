use chrono::NaiveDate;
use console_error_panic_hook::set_once as set_panic_hook;
use js_sys::Date;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;
use wasm_bindgen::prelude::*;

use crate::calc::dates::{age, AgeInput, AgeResult};
use crate::calc::finance::{self, GstInput, LoanInput, PercentageQuery, TipInput};
use crate::calc::grades::{gpa, CourseRow, GpaInput, GpaResult};
use crate::calc::health::{self, BmiInput, BodyFatInput, CalorieInput, HeartRateInput};
use crate::calc::units::{self, ConversionInput};
use crate::diff::{DiffConfig, DiffEntry, DiffMode, DiffReport};
use crate::error::{ValidationError, ValidationResult};
use crate::fields::parse_choice;
use crate::text::encoding::Base64Variant;
use crate::text::json::JsonFormatOptions;
use crate::text::jwt::JwtDecodeResult;

pub mod calc;
pub mod diff;
pub mod error;
pub mod fields;
pub mod qr;
pub mod text;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    set_panic_hook();
}

/// Converts a rejected input into the message shown next to the form.
fn reject(widget: &'static str, err: &ValidationError) -> JsValue {
    debug!(widget, field = err.field(), error = %err, "input rejected");
    JsValue::from_str(&err.to_string())
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(|err| JsValue::from_str(&err.to_string()))
}

fn respond<T: Serialize>(
    widget: &'static str,
    result: ValidationResult<T>,
) -> Result<JsValue, JsValue> {
    let value = result.map_err(|err| reject(widget, &err))?;
    to_js(&value)
}

/// Reads an optional options object; `undefined` or `null` means defaults.
fn options_or_default<T: DeserializeOwned + Default>(value: JsValue) -> Result<T, JsValue> {
    if value.is_undefined() || value.is_null() {
        return Ok(T::default());
    }
    serde_wasm_bindgen::from_value(value).map_err(|err| JsValue::from_str(&err.to_string()))
}

/// Builds a date from the parts `js_sys::Date` reports (zero-based month).
fn local_date(year: u32, month0: u32, day: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(i32::try_from(year).ok()?, month0 + 1, day)
}

fn today() -> Result<NaiveDate, JsValue> {
    let now = Date::new_0();
    local_date(now.get_full_year(), now.get_month(), now.get_date())
        .ok_or_else(|| JsValue::from_str("system date is unavailable"))
}

fn now_secs() -> i64 {
    (Date::now() / 1000.0) as i64
}

// ---- Diff checker ----

fn text_diff_internal(original: &str, modified: &str, mode: &str) -> ValidationResult<DiffReport> {
    let mode: DiffMode = parse_choice("diff mode", mode)?;
    Ok(diff::generate_diff(original, modified, &DiffConfig::with_mode(mode)))
}

#[wasm_bindgen]
pub fn generate_text_diff(original: &str, modified: &str, mode: &str) -> Result<JsValue, JsValue> {
    respond("diff", text_diff_internal(original, modified, mode))
}

#[wasm_bindgen]
pub fn generate_text_diff_html(
    original: &str,
    modified: &str,
    mode: &str,
) -> Result<String, JsValue> {
    text_diff_internal(original, modified, mode)
        .map(|report| diff::render_html(&report.entries))
        .map_err(|err| reject("diff", &err))
}

#[wasm_bindgen]
pub fn generate_side_by_side_diff(
    original: &str,
    modified: &str,
    mode: &str,
) -> Result<JsValue, JsValue> {
    respond(
        "diff",
        text_diff_internal(original, modified, mode)
            .map(|report| diff::side_by_side(&report.entries)),
    )
}

/// State owned by one diff checker widget. Every edit recomputes the report
/// from scratch.
#[wasm_bindgen]
#[derive(Debug, Default)]
pub struct DiffWorkspace {
    original: String,
    modified: String,
    config: DiffConfig,
    report: DiffReport,
}

#[wasm_bindgen]
impl DiffWorkspace {
    #[wasm_bindgen(constructor)]
    pub fn new() -> DiffWorkspace {
        DiffWorkspace::default()
    }

    /// Creates a workspace from a partial `{ mode, lookahead }` object.
    #[wasm_bindgen(js_name = withOptions)]
    pub fn with_options(options: JsValue) -> Result<DiffWorkspace, JsValue> {
        Ok(DiffWorkspace::with_config(options_or_default(options)?))
    }

    #[wasm_bindgen(js_name = setOriginal)]
    pub fn set_original(&mut self, text: &str) {
        self.original = text.to_string();
        self.recompute();
    }

    #[wasm_bindgen(js_name = setModified)]
    pub fn set_modified(&mut self, text: &str) {
        self.modified = text.to_string();
        self.recompute();
    }

    #[wasm_bindgen(js_name = setMode)]
    pub fn set_mode(&mut self, mode: &str) -> Result<(), JsValue> {
        self.config.mode = parse_choice("diff mode", mode).map_err(|err| reject("diff", &err))?;
        self.recompute();
        Ok(())
    }

    /// Exchanges the two panes.
    pub fn swap(&mut self) {
        std::mem::swap(&mut self.original, &mut self.modified);
        self.recompute();
    }

    pub fn clear(&mut self) {
        self.original.clear();
        self.modified.clear();
        self.recompute();
    }

    #[wasm_bindgen(js_name = hasChanges)]
    pub fn has_changes(&self) -> bool {
        self.report.stats.has_changes()
    }

    pub fn report(&self) -> Result<JsValue, JsValue> {
        to_js(&self.report)
    }

    pub fn html(&self) -> String {
        diff::render_html(&self.report.entries)
    }

    #[wasm_bindgen(js_name = sideBySide)]
    pub fn side_by_side(&self) -> Result<JsValue, JsValue> {
        to_js(&diff::side_by_side(&self.report.entries))
    }
}

impl DiffWorkspace {
    pub fn with_config(config: DiffConfig) -> DiffWorkspace {
        DiffWorkspace {
            config,
            ..DiffWorkspace::default()
        }
    }

    pub fn entries(&self) -> &[DiffEntry] {
        &self.report.entries
    }

    pub fn mode(&self) -> DiffMode {
        self.config.mode
    }

    fn recompute(&mut self) {
        self.report = diff::generate_diff(&self.original, &self.modified, &self.config);
    }
}

// ---- Calculators ----

#[wasm_bindgen]
pub fn calculate_bmi(weight: &str, height: &str, units: &str) -> Result<JsValue, JsValue> {
    respond("bmi", BmiInput::parse(weight, height, units).map(|input| health::bmi(&input)))
}

#[wasm_bindgen]
pub fn calculate_loan(principal: &str, annual_rate: &str, years: &str) -> Result<JsValue, JsValue> {
    respond(
        "loan",
        LoanInput::parse(principal, annual_rate, years).map(|input| finance::loan(&input)),
    )
}

fn age_internal(date_of_birth: &str, today: NaiveDate) -> ValidationResult<Option<AgeResult>> {
    AgeInput::parse(date_of_birth, today).map(|input| age(&input))
}

/// Returns `null` when the date of birth lies in the future.
#[wasm_bindgen]
pub fn calculate_age(date_of_birth: &str) -> Result<JsValue, JsValue> {
    match age_internal(date_of_birth, today()?).map_err(|err| reject("age", &err))? {
        Some(result) => to_js(&result),
        None => Ok(JsValue::NULL),
    }
}

#[wasm_bindgen]
pub fn calculate_tip(bill: &str, tip_percent: &str, people: &str) -> Result<JsValue, JsValue> {
    respond("tip", TipInput::parse(bill, tip_percent, people).map(|input| finance::tip(&input)))
}

fn gpa_internal(rows: &[CourseRow]) -> ValidationResult<GpaResult> {
    GpaInput::parse(rows).map(|input| gpa(&input))
}

/// Takes an array of `{ name, grade, credits }` rows.
#[wasm_bindgen]
pub fn calculate_gpa(rows: JsValue) -> Result<JsValue, JsValue> {
    let rows: Vec<CourseRow> =
        serde_wasm_bindgen::from_value(rows).map_err(|err| JsValue::from_str(&err.to_string()))?;
    respond("gpa", gpa_internal(&rows))
}

#[wasm_bindgen]
pub fn calculate_percentage(kind: &str, first: &str, second: &str) -> Result<JsValue, JsValue> {
    respond(
        "percentage",
        PercentageQuery::parse(kind, first, second).map(|query| finance::percentage(&query)),
    )
}

#[wasm_bindgen]
pub fn calculate_gst(amount: &str, rate: &str, mode: &str) -> Result<JsValue, JsValue> {
    respond("gst", GstInput::parse(amount, rate, mode).map(|input| finance::gst(&input)))
}

#[wasm_bindgen]
pub fn calculate_calories(
    sex: &str,
    age: &str,
    weight_kg: &str,
    height_cm: &str,
    activity: &str,
) -> Result<JsValue, JsValue> {
    respond(
        "calories",
        CalorieInput::parse(sex, age, weight_kg, height_cm, activity)
            .map(|input| health::calories(&input)),
    )
}

#[wasm_bindgen]
pub fn calculate_body_fat(
    sex: &str,
    height_cm: &str,
    neck_cm: &str,
    waist_cm: &str,
    hip_cm: &str,
) -> Result<JsValue, JsValue> {
    respond(
        "body fat",
        BodyFatInput::parse(sex, height_cm, neck_cm, waist_cm, hip_cm)
            .and_then(|input| health::body_fat(&input)),
    )
}

#[wasm_bindgen]
pub fn calculate_heart_rate_zones(age: &str, resting: &str) -> Result<JsValue, JsValue> {
    respond(
        "heart rate",
        HeartRateInput::parse(age, resting).map(|input| health::heart_rate_zones(&input)),
    )
}

#[wasm_bindgen]
pub fn convert_units(
    category: &str,
    value: &str,
    from: &str,
    to: &str,
) -> Result<JsValue, JsValue> {
    respond(
        "units",
        ConversionInput::parse(category, value, from, to).map(|input| units::convert_units(&input)),
    )
}

// ---- Text tools ----

#[wasm_bindgen]
pub fn format_json(input: &str, options: JsValue) -> Result<String, JsValue> {
    let options: JsonFormatOptions = options_or_default(options)?;
    text::json::format_json(input, &options).map_err(|err| reject("json", &err))
}

#[wasm_bindgen]
pub fn validate_json(input: &str) -> Result<JsValue, JsValue> {
    to_js(&text::json::validate_json(input))
}

#[wasm_bindgen]
pub fn base64_encode(input: &str, variant: &str) -> Result<String, JsValue> {
    let variant: Base64Variant =
        parse_choice("alphabet", variant).map_err(|err| reject("base64", &err))?;
    Ok(text::encoding::base64_encode(input, variant))
}

#[wasm_bindgen]
pub fn base64_decode(input: &str) -> Result<String, JsValue> {
    text::encoding::base64_decode(input).map_err(|err| reject("base64", &err))
}

#[wasm_bindgen]
pub fn url_encode(input: &str) -> String {
    text::encoding::url_encode(input)
}

#[wasm_bindgen]
pub fn url_decode(input: &str) -> Result<String, JsValue> {
    text::encoding::url_decode(input).map_err(|err| reject("url", &err))
}

fn jwt_decode_internal(token: &str, now: i64) -> ValidationResult<JwtDecodeResult> {
    text::jwt::decode_jwt(token, now)
}

#[wasm_bindgen]
pub fn jwt_decode(token: &str) -> Result<JsValue, JsValue> {
    respond("jwt", jwt_decode_internal(token, now_secs()))
}

#[wasm_bindgen]
pub fn jwt_encode(payload: &str, secret: &str, algorithm: &str) -> Result<String, JsValue> {
    text::jwt::encode_jwt(payload, secret, algorithm).map_err(|err| reject("jwt", &err))
}

#[wasm_bindgen]
pub fn test_regex(pattern: &str, flags: &str, text: &str) -> Result<JsValue, JsValue> {
    respond("regex", crate::text::regex_tester::test_regex(pattern, flags, text))
}

#[wasm_bindgen]
pub fn generate_slug(input: &str, options: JsValue) -> Result<String, JsValue> {
    let options = options_or_default(options)?;
    Ok(text::slug::slugify(input, &options))
}

#[wasm_bindgen]
pub fn generate_meta_tags(input: JsValue) -> Result<JsValue, JsValue> {
    let input = options_or_default(input)?;
    to_js(&text::meta::generate_meta_tags(&input))
}

#[wasm_bindgen]
pub fn markdown_to_html_text(input: &str) -> String {
    text::markdown_to_html(input)
}

#[wasm_bindgen]
pub fn convert_color(input: &str) -> Result<JsValue, JsValue> {
    respond("color", text::color::convert_color(input))
}

#[wasm_bindgen]
pub fn count_text(input: &str) -> Result<JsValue, JsValue> {
    to_js(&text::stats::text_stats(input))
}

#[wasm_bindgen]
pub fn qr_code_url(text: &str, options: JsValue) -> Result<String, JsValue> {
    let options = options_or_default(options)?;
    qr::qr_code_url(text, &options).map_err(|err| reject("qr", &err))
}

#[cfg(test)]
mod lib_tests;
