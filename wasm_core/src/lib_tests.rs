use super::*;
use crate::diff::DiffKind;

fn kinds(entries: &[DiffEntry]) -> Vec<(DiffKind, &str)> {
    entries.iter().map(|e| (e.kind, e.value.as_str())).collect()
}

#[test]
fn text_diff_internal_parses_mode() {
    let report = text_diff_internal("abc", "abd", "characters").expect("diff");
    assert_eq!(report.stats.insertions, 1);
    assert_eq!(report.stats.deletions, 1);
    assert_eq!(report.stats.unchanged, 2);

    let err = text_diff_internal("a", "b", "lines").unwrap_err();
    assert_eq!(err.to_string(), "unsupported diff mode 'lines'");
}

#[test]
fn text_diff_internal_defaults_to_words_for_blank_mode() {
    let report = text_diff_internal("the quick fox", "the slow fox", "").expect("diff");
    let runs = diff::coalesce(&report.entries);
    assert_eq!(
        kinds(&runs),
        vec![
            (DiffKind::Same, "the "),
            (DiffKind::Delete, "quick"),
            (DiffKind::Insert, "slow"),
            (DiffKind::Same, " fox"),
        ]
    );
}

#[test]
fn workspace_recomputes_on_every_edit() {
    let mut workspace = DiffWorkspace::new();
    assert!(workspace.entries().is_empty());
    assert!(!workspace.has_changes());

    workspace.set_original("hello world");
    assert!(workspace.has_changes());
    assert!(workspace.entries().iter().all(|e| e.kind == DiffKind::Delete));

    workspace.set_modified("hello world");
    assert!(!workspace.has_changes());
    assert_eq!(workspace.html(), "<span class=\"diff-same\">hello world</span>");
}

#[test]
fn workspace_swap_and_clear() {
    let mut workspace = DiffWorkspace::new();
    workspace.set_original("a b");
    workspace.set_modified("a c");
    workspace.swap();
    assert_eq!(diff::reconstruct_original(workspace.entries()), "a c");
    assert_eq!(diff::reconstruct_modified(workspace.entries()), "a b");

    workspace.clear();
    assert!(workspace.entries().is_empty());
}

#[test]
fn workspace_honors_config() {
    let config = DiffConfig::with_mode(DiffMode::Characters);
    let mut workspace = DiffWorkspace::with_config(config);
    assert_eq!(workspace.mode(), DiffMode::Characters);
    workspace.set_original("cat");
    workspace.set_modified("cut");
    assert_eq!(workspace.entries().len(), 4);
}

#[test]
fn age_internal_returns_none_for_future_dates() {
    let today = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    assert_eq!(age_internal("2030-06-01", today).unwrap(), None);
    assert!(age_internal("1990-01-01", today).unwrap().is_some());
    assert_eq!(
        age_internal("", today).unwrap_err(),
        ValidationError::Missing { field: "date of birth" }
    );
}

#[test]
fn local_date_uses_zero_based_months() {
    assert_eq!(local_date(2024, 0, 31), NaiveDate::from_ymd_opt(2024, 1, 31));
    assert_eq!(local_date(2024, 1, 30), None);
}

#[test]
fn gpa_internal_weights_rows() {
    let rows = vec![
        CourseRow {
            name: "Math".into(),
            grade: "A".into(),
            credits: "4".into(),
        },
        CourseRow {
            name: "Art".into(),
            grade: "C".into(),
            credits: "2".into(),
        },
    ];
    let result = gpa_internal(&rows).expect("gpa");
    assert_eq!(result.gpa, 3.33);
    assert_eq!(result.total_credits, 6.0);
}

#[test]
fn jwt_decode_internal_compares_exp_with_now() {
    // {"alg":"HS256"} . {"exp":1000}
    let token = "eyJhbGciOiJIUzI1NiJ9.eyJleHAiOjEwMDB9.c2ln";
    let fresh = jwt_decode_internal(token, 999).expect("decode");
    assert_eq!(fresh.expired, Some(false));
    let stale = jwt_decode_internal(token, 1001).expect("decode");
    assert_eq!(stale.expired, Some(true));
    assert_eq!(stale.algorithm.as_deref(), Some("HS256"));
}
