//! Property-based tests for the diff engine and the total text widgets.

use proptest::prelude::*;
use wasm_core::diff::{
    coalesce, diff_texts, reconstruct_modified, reconstruct_original, tokenize, DiffConfig,
    DiffKind, DiffMode, DiffStats,
};
use wasm_core::text::markdown_to_html;
use wasm_core::text::slug::{slugify, SlugOptions};

fn mode_strategy() -> impl Strategy<Value = DiffMode> {
    prop_oneof![Just(DiffMode::Words), Just(DiffMode::Characters)]
}

// Small alphabets make shared tokens likely, so the lookahead paths get exercised.
fn text_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        "[ab \n]{0,40}",
        "(the|quick|slow|fox| |  |\t){0,20}",
        "\\PC{0,60}",
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(300))]

    #[test]
    fn entries_rebuild_both_inputs(
        original in text_strategy(),
        modified in text_strategy(),
        mode in mode_strategy(),
        lookahead in 0usize..8,
    ) {
        let config = DiffConfig { mode, lookahead };
        let entries = diff_texts(&original, &modified, &config);
        prop_assert_eq!(reconstruct_original(&entries), original.clone());
        prop_assert_eq!(reconstruct_modified(&entries), modified.clone());

        let runs = coalesce(&entries);
        prop_assert_eq!(reconstruct_original(&runs), original);
        prop_assert_eq!(reconstruct_modified(&runs), modified);
    }

    #[test]
    fn no_entry_is_empty(
        original in text_strategy(),
        modified in text_strategy(),
        mode in mode_strategy(),
    ) {
        let entries = diff_texts(&original, &modified, &DiffConfig::with_mode(mode));
        prop_assert!(entries.iter().all(|e| !e.value.is_empty()));
        prop_assert!(tokenize(&original, mode).iter().all(|tok| !tok.is_empty()));
    }

    #[test]
    fn identical_inputs_are_all_same(text in text_strategy(), mode in mode_strategy()) {
        let entries = diff_texts(&text, &text, &DiffConfig::with_mode(mode));
        prop_assert!(entries.iter().all(|e| e.kind == DiffKind::Same));
        prop_assert_eq!(entries.len(), tokenize(&text, mode).len());
    }

    #[test]
    fn empty_sides_are_pure_edits(text in text_strategy(), mode in mode_strategy()) {
        let config = DiffConfig::with_mode(mode);
        let added = diff_texts("", &text, &config);
        prop_assert!(added.iter().all(|e| e.kind == DiffKind::Insert));
        let removed = diff_texts(&text, "", &config);
        prop_assert!(removed.iter().all(|e| e.kind == DiffKind::Delete));
    }

    #[test]
    fn stats_account_for_every_entry(
        original in text_strategy(),
        modified in text_strategy(),
        mode in mode_strategy(),
    ) {
        let entries = diff_texts(&original, &modified, &DiffConfig::with_mode(mode));
        let stats = DiffStats::from_entries(&entries);
        prop_assert_eq!(stats.unchanged + stats.insertions + stats.deletions, entries.len());
        prop_assert!(stats.words_added <= stats.insertions);
        prop_assert!(stats.words_removed <= stats.deletions);
    }

    #[test]
    fn markdown_never_panics(input in "\\PC{0,400}") {
        let _ = markdown_to_html(&input);
    }

    #[test]
    fn markdown_escapes_angle_brackets(word in "[a-z]{1,10}") {
        let html = markdown_to_html(&format!("<{word}>"));
        let escaped = format!("&lt;{word}&gt;");
        prop_assert!(html.contains(&escaped));
    }

    #[test]
    fn slugs_only_hold_safe_characters(input in "\\PC{0,120}") {
        let slug = slugify(&input, &SlugOptions::default());
        prop_assert!(slug.chars().all(|ch| ch.is_ascii_alphanumeric() || ch == '-' || ch == '_'));
        prop_assert!(!slug.starts_with('-') && !slug.ends_with('-'));
    }
}

#[test]
fn quick_fox_scenario() {
    let entries = diff_texts("the quick fox", "the slow fox", &DiffConfig::default());
    let runs: Vec<(DiffKind, String)> = coalesce(&entries)
        .into_iter()
        .map(|e| (e.kind, e.value))
        .collect();
    assert_eq!(
        runs,
        vec![
            (DiffKind::Same, "the ".to_string()),
            (DiffKind::Delete, "quick".to_string()),
            (DiffKind::Insert, "slow".to_string()),
            (DiffKind::Same, " fox".to_string()),
        ]
    );
}
