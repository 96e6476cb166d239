// URL slug generator.
use std::sync::OnceLock;

use regex::Regex;
use serde::Deserialize;

#[derive(Deserialize, Debug, Clone)]
#[serde(default, rename_all = "camelCase")]
pub struct SlugOptions {
    pub separator: char,
    pub lowercase: bool,
    /// Maximum slug length in characters; `None` or 0 means unlimited
    pub max_length: Option<usize>,
}

impl Default for SlugOptions {
    fn default() -> Self {
        Self {
            separator: '-',
            lowercase: true,
            max_length: None,
        }
    }
}

/// Turns a title into a URL slug.
///
/// # Example
/// ```
/// use wasm_core::text::slug::{slugify, SlugOptions};
/// let slug = slugify("  Hello, World! -- Crème Brûlée ", &SlugOptions::default());
/// assert_eq!(slug, "hello-world-creme-brulee");
/// ```
pub fn slugify(input: &str, options: &SlugOptions) -> String {
    let mut folded = String::with_capacity(input.len());
    for ch in input.trim().chars() {
        match fold_accent(ch) {
            Some(ascii) => folded.push_str(ascii),
            None => folded.push(ch),
        }
    }
    if options.lowercase {
        folded = folded.to_lowercase();
    }
    let cleaned = regex_disallowed().replace_all(&folded, "");
    let sep = options.separator.to_string();
    let joined = regex_separator_run().replace_all(&cleaned, sep.as_str());
    let mut slug = joined.trim_matches(options.separator).to_string();

    if let Some(max) = options.max_length.filter(|max| *max > 0) {
        if slug.chars().count() > max {
            let cut: String = slug.chars().take(max).collect();
            let next = slug.chars().nth(max);
            slug = if next == Some(options.separator) {
                cut
            } else {
                match cut.rfind(options.separator) {
                    Some(idx) => cut[..idx].to_string(),
                    None => cut,
                }
            };
            slug = slug.trim_end_matches(options.separator).to_string();
        }
    }
    slug
}

fn fold_accent(ch: char) -> Option<&'static str> {
    let folded = match ch {
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' => "a",
        'À' | 'Á' | 'Â' | 'Ã' | 'Ä' | 'Å' => "A",
        'ç' => "c",
        'Ç' => "C",
        'è' | 'é' | 'ê' | 'ë' => "e",
        'È' | 'É' | 'Ê' | 'Ë' => "E",
        'ì' | 'í' | 'î' | 'ï' => "i",
        'Ì' | 'Í' | 'Î' | 'Ï' => "I",
        'ñ' => "n",
        'Ñ' => "N",
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' | 'ø' => "o",
        'Ò' | 'Ó' | 'Ô' | 'Õ' | 'Ö' | 'Ø' => "O",
        'ù' | 'ú' | 'û' | 'ü' => "u",
        'Ù' | 'Ú' | 'Û' | 'Ü' => "U",
        'ý' | 'ÿ' => "y",
        'Ý' => "Y",
        'ß' => "ss",
        'æ' => "ae",
        'Æ' => "AE",
        'œ' => "oe",
        'Œ' => "OE",
        _ => return None,
    };
    Some(folded)
}

fn regex_disallowed() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^A-Za-z0-9_\s-]").unwrap())
}

fn regex_separator_run() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[\s_-]+").unwrap())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapses_separator_runs() {
        assert_eq!(
            slugify("a  _ - b__c", &SlugOptions::default()),
            "a-b-c"
        );
    }

    #[test]
    fn custom_separator_and_case() {
        let options = SlugOptions {
            separator: '_',
            lowercase: false,
            max_length: None,
        };
        assert_eq!(slugify("Rust Is Fun", &options), "Rust_Is_Fun");
    }

    #[test]
    fn max_length_cuts_at_word_boundary() {
        let options = SlugOptions {
            max_length: Some(12),
            ..SlugOptions::default()
        };
        assert_eq!(slugify("the quick brown fox", &options), "the-quick");
        let exact = SlugOptions {
            max_length: Some(9),
            ..SlugOptions::default()
        };
        assert_eq!(slugify("the quick brown fox", &exact), "the-quick");
    }

    #[test]
    fn punctuation_only_input_is_empty() {
        assert_eq!(slugify("!!! ???", &SlugOptions::default()), "");
    }
}
