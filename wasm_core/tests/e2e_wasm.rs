#![cfg(target_arch = "wasm32")]

use js_sys::{Array, Object, Reflect};
use serde_json::Value as JsonValue;
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

use wasm_core::{
    base64_decode, base64_encode, calculate_age, calculate_bmi, calculate_gpa, calculate_loan,
    calculate_tip, convert_color, convert_units, count_text, format_json,
    generate_side_by_side_diff, generate_slug, generate_text_diff, generate_text_diff_html,
    jwt_decode, markdown_to_html_text, qr_code_url, test_regex, DiffWorkspace,
};

wasm_bindgen_test_configure!(run_in_browser);

fn js_to_json(value: JsValue) -> JsonValue {
    serde_wasm_bindgen::from_value(value).expect("JsValue -> JSON")
}

fn options(pairs: &[(&str, JsValue)]) -> JsValue {
    let object = Object::new();
    for (key, value) in pairs {
        Reflect::set(&object, &JsValue::from_str(key), value).expect("set option");
    }
    object.into()
}

fn error_text(err: JsValue) -> String {
    err.as_string().expect("errors are strings")
}

#[wasm_bindgen_test]
fn diff_export_reports_entries_and_stats() {
    let report =
        js_to_json(generate_text_diff("the quick fox", "the slow fox", "words").expect("diff"));
    let entries = report["entries"].as_array().expect("entries");
    assert!(entries
        .iter()
        .any(|e| e["kind"] == "delete" && e["value"] == "quick"));
    assert_eq!(report["stats"]["insertions"], 1);
    assert_eq!(report["stats"]["wordsRemoved"], 1);
}

#[wasm_bindgen_test]
fn diff_html_and_side_by_side() {
    let html = generate_text_diff_html("a <b>", "a <i>", "words").expect("html");
    assert!(html.contains("<del class=\"diff-delete\">&lt;b&gt;</del>"));

    let columns =
        js_to_json(generate_side_by_side_diff("ab", "ac", "characters").expect("columns"));
    assert_eq!(columns["original"][1]["value"], "b");
    assert_eq!(columns["modified"][1]["value"], "c");
}

#[wasm_bindgen_test]
fn diff_rejects_unknown_mode() {
    let err = generate_text_diff("a", "b", "lines").unwrap_err();
    assert_eq!(error_text(err), "unsupported diff mode 'lines'");
}

#[wasm_bindgen_test]
fn workspace_round_trip() {
    let config = options(&[("mode", JsValue::from_str("characters"))]);
    let mut workspace = DiffWorkspace::with_options(config).expect("workspace");
    workspace.set_original("cat");
    workspace.set_modified("cut");
    assert!(workspace.has_changes());
    let report = js_to_json(workspace.report().expect("report"));
    assert_eq!(report["entries"].as_array().map(Vec::len), Some(4));

    workspace.set_mode("words").expect("mode");
    let report = js_to_json(workspace.report().expect("report"));
    assert_eq!(report["entries"].as_array().map(Vec::len), Some(2));
    assert!(workspace.set_mode("paragraphs").is_err());
}

#[wasm_bindgen_test]
fn calculators_return_camel_case_results() {
    let bmi = js_to_json(calculate_bmi("70", "170", "metric").expect("bmi"));
    assert_eq!(bmi["bmi"], 24.2);
    assert_eq!(bmi["category"], "Normal weight");

    let loan = js_to_json(calculate_loan("100000", "5", "30").expect("loan"));
    assert_eq!(loan["monthlyPayment"], 536.82);
    assert_eq!(loan["schedule"].as_array().map(Vec::len), Some(30));

    let tip = js_to_json(calculate_tip("50", "15", "1").expect("tip"));
    assert_eq!(tip["tipAmount"], 7.5);
    assert_eq!(tip["perPerson"], 57.5);
}

#[wasm_bindgen_test]
fn calculator_errors_are_field_messages() {
    assert_eq!(
        error_text(calculate_tip("50", "15", "").unwrap_err()),
        "number of people is required"
    );
    assert_eq!(
        error_text(calculate_bmi("abc", "170", "metric").unwrap_err()),
        "weight must be a number"
    );
}

#[wasm_bindgen_test]
fn age_in_the_future_is_null() {
    assert!(calculate_age("2999-01-01").expect("age").is_null());
    let result = js_to_json(calculate_age("2000-01-01").expect("age"));
    assert!(result["years"].as_i64().unwrap_or_default() >= 24);
}

#[wasm_bindgen_test]
fn gpa_accepts_row_objects() {
    let rows = Array::new();
    rows.push(&options(&[
        ("grade", JsValue::from_str("A")),
        ("credits", JsValue::from_str("3")),
    ]));
    rows.push(&options(&[
        ("grade", JsValue::from_str("B")),
        ("credits", JsValue::from_str("3")),
    ]));
    let result = js_to_json(calculate_gpa(rows.into()).expect("gpa"));
    assert_eq!(result["gpa"], 3.5);
}

#[wasm_bindgen_test]
fn unit_conversion_export() {
    let result = js_to_json(convert_units("temperature", "100", "C", "F").expect("convert"));
    assert_eq!(result["value"], 212.0);
}

#[wasm_bindgen_test]
fn text_tools_round_trip() {
    let pretty = format_json("{\"b\":1,\"a\":[1,2]}", JsValue::UNDEFINED).expect("format");
    assert_eq!(pretty, "{\n  \"b\": 1,\n  \"a\": [\n    1,\n    2\n  ]\n}");
    let minify = options(&[("minify", JsValue::TRUE)]);
    let minified = format_json("{ \"a\" : 1 }", minify).expect("minify");
    assert_eq!(minified, "{\"a\":1}");

    let encoded = base64_encode("héllo", "standard").expect("encode");
    assert_eq!(base64_decode(&encoded).expect("decode"), "héllo");

    let slug = generate_slug("Hello, World!", JsValue::NULL).expect("slug");
    assert_eq!(slug, "hello-world");

    assert!(markdown_to_html_text("# Title").contains("<h1>Title</h1>"));
}

#[wasm_bindgen_test]
fn jwt_regex_color_and_stats_exports() {
    let token = "eyJhbGciOiJIUzI1NiJ9.eyJleHAiOjEwMDB9.c2ln";
    let decoded = js_to_json(jwt_decode(token).expect("jwt"));
    assert_eq!(decoded["algorithm"], "HS256");
    assert_eq!(decoded["expired"], true);

    let matches = js_to_json(test_regex("(?P<n>\\d+)", "g", "a1 b22").expect("regex"));
    assert_eq!(matches["matches"].as_array().map(Vec::len), Some(2));

    let color = js_to_json(convert_color("#ff8800").expect("color"));
    assert_eq!(color["rgb"], "rgb(255, 136, 0)");

    let stats = js_to_json(count_text("one two three").expect("stats"));
    assert_eq!(stats["words"], 3);
}

#[wasm_bindgen_test]
fn qr_url_uses_defaults_when_options_missing() {
    let url = qr_code_url("hi", JsValue::UNDEFINED).expect("url");
    assert!(url.starts_with("https://api.qrserver.com/v1/create-qr-code/?data=hi&size=200x200"));
    let err = qr_code_url("hi", options(&[("size", JsValue::from_f64(10.0))])).unwrap_err();
    assert_eq!(error_text(err), "size must be between 50 and 1000");
}
