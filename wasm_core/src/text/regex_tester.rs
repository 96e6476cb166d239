// Regex tester widget: run a pattern with JS-style flags against sample text.
use regex::RegexBuilder;
use serde::Serialize;

use crate::error::{ValidationError, ValidationResult};

/// Matches beyond this count are dropped and `truncated` is set.
pub const MAX_MATCHES: usize = 1000;

/// Flags accepted in the flag box (`g i m s x`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RegexFlags {
    pub global: bool,
    pub case_insensitive: bool,
    pub multi_line: bool,
    pub dot_all: bool,
    pub extended: bool,
}

impl RegexFlags {
    pub fn parse(raw: &str) -> ValidationResult<Self> {
        let mut flags = Self::default();
        for ch in raw.trim().chars() {
            match ch {
                'g' => flags.global = true,
                'i' => flags.case_insensitive = true,
                'm' => flags.multi_line = true,
                's' => flags.dot_all = true,
                'x' => flags.extended = true,
                // Unicode is always on.
                'u' => {}
                other => {
                    return Err(ValidationError::UnknownOption {
                        field: "flag",
                        value: other.to_string(),
                    })
                }
            }
        }
        Ok(flags)
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RegexGroup {
    pub name: Option<String>,
    pub value: Option<String>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RegexMatch {
    /// Character offset of the match start
    pub index: usize,
    pub text: String,
    pub groups: Vec<RegexGroup>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RegexReport {
    pub matches: Vec<RegexMatch>,
    pub truncated: bool,
}

/// Runs `pattern` against `text`. Without the `g` flag only the first match is
/// returned, as in JavaScript.
///
/// # Example
/// ```
/// use wasm_core::text::regex_tester::test_regex;
/// let report = test_regex(r"(?P<d>\d+)", "g", "a1 b22")?;
/// assert_eq!(report.matches.len(), 2);
/// assert_eq!(report.matches[1].groups[0].value.as_deref(), Some("22"));
/// # Ok::<(), wasm_core::error::ValidationError>(())
/// ```
pub fn test_regex(pattern: &str, flags: &str, text: &str) -> ValidationResult<RegexReport> {
    if pattern.is_empty() {
        return Err(ValidationError::Missing { field: "pattern" });
    }
    let flags = RegexFlags::parse(flags)?;
    let regex = RegexBuilder::new(pattern)
        .case_insensitive(flags.case_insensitive)
        .multi_line(flags.multi_line)
        .dot_matches_new_line(flags.dot_all)
        .ignore_whitespace(flags.extended)
        .build()
        .map_err(|err| ValidationError::InvalidRegex(err.to_string()))?;

    let names: Vec<Option<String>> = regex
        .capture_names()
        .skip(1)
        .map(|name| name.map(str::to_string))
        .collect();
    let limit = if flags.global { MAX_MATCHES } else { 1 };

    let mut matches = Vec::new();
    let mut truncated = false;
    for caps in regex.captures_iter(text) {
        if matches.len() == limit {
            truncated = flags.global;
            break;
        }
        let Some(whole) = caps.get(0) else {
            continue;
        };
        let groups = names
            .iter()
            .enumerate()
            .map(|(idx, name)| RegexGroup {
                name: name.clone(),
                value: caps.get(idx + 1).map(|m| m.as_str().to_string()),
            })
            .collect();
        matches.push(RegexMatch {
            index: text[..whole.start()].chars().count(),
            text: whole.as_str().to_string(),
            groups,
        });
    }
    Ok(RegexReport { matches, truncated })
}
