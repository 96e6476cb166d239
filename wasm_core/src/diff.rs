//! Text diff for the diff checker widget.
//!
//! Alignment is a greedy two-cursor walk with a small lookahead window rather
//! than an optimal edit script: it runs in O(n·k) for a window of k tokens,
//! so large pastes stay responsive while typing. Changes wider than the
//! window come out as substitutions instead of a minimal diff.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Default number of tokens searched ahead on a mismatch.
pub const DEFAULT_LOOKAHEAD: usize = 5;

/// Granularity used to split both inputs into tokens.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum DiffMode {
    /// Words and whitespace runs as separate tokens
    #[default]
    Words,
    /// One token per character
    Characters,
}

impl FromStr for DiffMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "words" | "word" => Ok(Self::Words),
            "characters" | "character" | "chars" => Ok(Self::Characters),
            other => Err(format!("unsupported diff mode {other}")),
        }
    }
}

/// Configuration for diff generation
#[derive(Deserialize, Debug, Clone)]
#[serde(default, rename_all = "camelCase")]
pub struct DiffConfig {
    pub mode: DiffMode,
    /// Tokens searched ahead on a mismatch (default: 5)
    pub lookahead: usize,
}

impl Default for DiffConfig {
    fn default() -> Self {
        Self {
            mode: DiffMode::Words,
            lookahead: DEFAULT_LOOKAHEAD,
        }
    }
}

impl DiffConfig {
    pub fn with_mode(mode: DiffMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }
}

/// Classification of a token in the diff output
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DiffKind {
    /// Present in both texts
    Same,
    /// Present only in the modified text
    Insert,
    /// Present only in the original text
    Delete,
}

impl fmt::Display for DiffKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Same => "same",
            Self::Insert => "insert",
            Self::Delete => "delete",
        })
    }
}

/// A classified token.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct DiffEntry {
    pub kind: DiffKind,
    pub value: String,
}

impl DiffEntry {
    fn new(kind: DiffKind, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }

    pub fn same(value: &str) -> Self {
        Self::new(DiffKind::Same, value)
    }

    pub fn insert(value: &str) -> Self {
        Self::new(DiffKind::Insert, value)
    }

    pub fn delete(value: &str) -> Self {
        Self::new(DiffKind::Delete, value)
    }
}

/// Token counts for the summary line under the diff output
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DiffStats {
    pub unchanged: usize,
    pub insertions: usize,
    pub deletions: usize,
    /// Inserted tokens that are not pure whitespace
    pub words_added: usize,
    /// Deleted tokens that are not pure whitespace
    pub words_removed: usize,
}

impl DiffStats {
    pub fn from_entries(entries: &[DiffEntry]) -> Self {
        let mut stats = Self::default();
        for entry in entries {
            let is_word = !entry.value.trim().is_empty();
            match entry.kind {
                DiffKind::Same => stats.unchanged += 1,
                DiffKind::Insert => {
                    stats.insertions += 1;
                    if is_word {
                        stats.words_added += 1;
                    }
                }
                DiffKind::Delete => {
                    stats.deletions += 1;
                    if is_word {
                        stats.words_removed += 1;
                    }
                }
            }
        }
        stats
    }

    pub fn has_changes(&self) -> bool {
        self.insertions > 0 || self.deletions > 0
    }
}

/// Result of a text diff operation
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct DiffReport {
    pub entries: Vec<DiffEntry>,
    pub stats: DiffStats,
}

/// Both columns of the side-by-side view, as coalesced runs.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct SideBySide {
    /// Same and delete runs
    pub original: Vec<DiffEntry>,
    /// Same and insert runs
    pub modified: Vec<DiffEntry>,
}

/// Splits text into diff tokens for the given mode. Never yields empty tokens.
///
/// # Example
/// ```
/// use wasm_core::diff::{tokenize, DiffMode};
/// assert_eq!(tokenize("a  b", DiffMode::Words), vec!["a", "  ", "b"]);
/// assert_eq!(tokenize("ab", DiffMode::Characters), vec!["a", "b"]);
/// ```
pub fn tokenize(text: &str, mode: DiffMode) -> Vec<&str> {
    match mode {
        DiffMode::Words => split_words(text),
        DiffMode::Characters => text
            .char_indices()
            .map(|(idx, ch)| &text[idx..idx + ch.len_utf8()])
            .collect(),
    }
}

fn split_words(text: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut start = 0;
    let mut in_space: Option<bool> = None;
    for (idx, ch) in text.char_indices() {
        let space = ch.is_whitespace();
        match in_space {
            Some(current) if current != space => {
                tokens.push(&text[start..idx]);
                start = idx;
            }
            _ => {}
        }
        in_space = Some(space);
    }
    if start < text.len() {
        tokens.push(&text[start..]);
    }
    tokens
}

/// Aligns two token sequences with the greedy lookahead walk.
pub fn align(original: &[&str], modified: &[&str], lookahead: usize) -> Vec<DiffEntry> {
    let mut entries = Vec::with_capacity(original.len().max(modified.len()));
    let (mut i, mut j) = (0, 0);

    while i < original.len() || j < modified.len() {
        if i >= original.len() {
            entries.extend(modified[j..].iter().map(|tok| DiffEntry::insert(tok)));
            break;
        }
        if j >= modified.len() {
            entries.extend(original[i..].iter().map(|tok| DiffEntry::delete(tok)));
            break;
        }
        if original[i] == modified[j] {
            entries.push(DiffEntry::same(original[i]));
            i += 1;
            j += 1;
            continue;
        }

        match find_resync(original, modified, i, j, lookahead) {
            Some(Resync::Inserted(distance)) => {
                entries.extend(
                    modified[j..j + distance]
                        .iter()
                        .map(|tok| DiffEntry::insert(tok)),
                );
                j += distance;
            }
            Some(Resync::Deleted(distance)) => {
                entries.extend(
                    original[i..i + distance]
                        .iter()
                        .map(|tok| DiffEntry::delete(tok)),
                );
                i += distance;
            }
            None => {
                entries.push(DiffEntry::delete(original[i]));
                entries.push(DiffEntry::insert(modified[j]));
                i += 1;
                j += 1;
            }
        }
    }

    entries
}

enum Resync {
    Inserted(usize),
    Deleted(usize),
}

// Insertion is tried before deletion at every distance.
fn find_resync(
    original: &[&str],
    modified: &[&str],
    i: usize,
    j: usize,
    lookahead: usize,
) -> Option<Resync> {
    for distance in 1..=lookahead {
        if modified.get(j + distance) == Some(&original[i]) {
            return Some(Resync::Inserted(distance));
        }
        if original.get(i + distance) == Some(&modified[j]) {
            return Some(Resync::Deleted(distance));
        }
    }
    None
}

/// Generate the diff entries between two texts.
///
/// # Example
/// ```
/// use wasm_core::diff::{diff_texts, DiffConfig, DiffKind};
/// let entries = diff_texts("a b", "a c", &DiffConfig::default());
/// assert!(entries.iter().any(|e| e.kind == DiffKind::Insert && e.value == "c"));
/// ```
pub fn diff_texts(original: &str, modified: &str, config: &DiffConfig) -> Vec<DiffEntry> {
    let left = tokenize(original, config.mode);
    let right = tokenize(modified, config.mode);
    let entries = align(&left, &right, config.lookahead);
    debug!(
        mode = ?config.mode,
        original_tokens = left.len(),
        modified_tokens = right.len(),
        entries = entries.len(),
        "diff recomputed"
    );
    entries
}

/// Generate the entries together with their summary statistics.
pub fn generate_diff(original: &str, modified: &str, config: &DiffConfig) -> DiffReport {
    let entries = diff_texts(original, modified, config);
    let stats = DiffStats::from_entries(&entries);
    DiffReport { entries, stats }
}

/// Merges adjacent entries of the same kind into runs.
pub fn coalesce(entries: &[DiffEntry]) -> Vec<DiffEntry> {
    let mut runs: Vec<DiffEntry> = Vec::new();
    for entry in entries {
        match runs.last_mut() {
            Some(last) if last.kind == entry.kind => last.value.push_str(&entry.value),
            _ => runs.push(entry.clone()),
        }
    }
    runs
}

fn concat_kinds(entries: &[DiffEntry], keep: DiffKind) -> String {
    entries
        .iter()
        .filter(|e| e.kind == DiffKind::Same || e.kind == keep)
        .map(|e| e.value.as_str())
        .collect()
}

/// Rebuilds the original text from same and delete entries.
pub fn reconstruct_original(entries: &[DiffEntry]) -> String {
    concat_kinds(entries, DiffKind::Delete)
}

/// Rebuilds the modified text from same and insert entries.
pub fn reconstruct_modified(entries: &[DiffEntry]) -> String {
    concat_kinds(entries, DiffKind::Insert)
}

/// Renders the inline highlighted view over coalesced runs.
///
/// # Example
/// ```
/// use wasm_core::diff::{render_html, DiffEntry};
/// let html = render_html(&[DiffEntry::same("a "), DiffEntry::insert("<b>")]);
/// assert_eq!(html, "<span class=\"diff-same\">a </span><ins class=\"diff-insert\">&lt;b&gt;</ins>");
/// ```
pub fn render_html(entries: &[DiffEntry]) -> String {
    let mut output = String::new();
    for run in coalesce(entries) {
        let (open, close) = match run.kind {
            DiffKind::Same => ("<span class=\"diff-same\">", "</span>"),
            DiffKind::Insert => ("<ins class=\"diff-insert\">", "</ins>"),
            DiffKind::Delete => ("<del class=\"diff-delete\">", "</del>"),
        };
        output.push_str(open);
        output.push_str(&crate::text::markdown::html_escape(&run.value));
        output.push_str(close);
    }
    output
}

/// Splits the runs into the two columns of the side-by-side view.
pub fn side_by_side(entries: &[DiffEntry]) -> SideBySide {
    let mut original = Vec::new();
    let mut modified = Vec::new();
    for entry in entries {
        match entry.kind {
            DiffKind::Same => {
                original.push(entry.clone());
                modified.push(entry.clone());
            }
            DiffKind::Delete => original.push(entry.clone()),
            DiffKind::Insert => modified.push(entry.clone()),
        }
    }
    SideBySide {
        original: coalesce(&original),
        modified: coalesce(&modified),
    }
}
