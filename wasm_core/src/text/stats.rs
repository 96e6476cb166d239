// Word counter widget.
use serde::Serialize;

/// Reading speed used for the reading-time estimate.
pub const WORDS_PER_MINUTE: usize = 200;

#[derive(Serialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TextStats {
    pub words: usize,
    pub characters: usize,
    pub characters_no_spaces: usize,
    pub sentences: usize,
    pub paragraphs: usize,
    pub lines: usize,
    /// Whole minutes, at least 1 for non-empty text
    pub reading_minutes: usize,
}

/// Counts words, characters, sentences and paragraphs.
///
/// # Example
/// ```
/// use wasm_core::text::stats::text_stats;
/// let stats = text_stats("Hi there. How are you?\n\nFine!");
/// assert_eq!(stats.words, 6);
/// assert_eq!(stats.sentences, 3);
/// assert_eq!(stats.paragraphs, 2);
/// ```
pub fn text_stats(text: &str) -> TextStats {
    if text.trim().is_empty() {
        return TextStats {
            characters: text.chars().count(),
            ..TextStats::default()
        };
    }
    let words = text.split_whitespace().count();
    let sentences = text
        .split(['.', '!', '?'])
        .filter(|part| part.chars().any(char::is_alphanumeric))
        .count();
    let normalized = text.replace("\r\n", "\n");
    let paragraphs = normalized
        .split("\n\n")
        .filter(|part| !part.trim().is_empty())
        .count();
    TextStats {
        words,
        characters: text.chars().count(),
        characters_no_spaces: text.chars().filter(|ch| !ch.is_whitespace()).count(),
        sentences,
        paragraphs,
        lines: normalized.lines().count(),
        reading_minutes: words.div_ceil(WORDS_PER_MINUTE),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_counts_nothing() {
        let stats = text_stats("   ");
        assert_eq!(stats.words, 0);
        assert_eq!(stats.characters, 3);
        assert_eq!(stats.reading_minutes, 0);
    }

    #[test]
    fn trailing_text_without_punctuation_is_a_sentence() {
        assert_eq!(text_stats("One. Two").sentences, 2);
        assert_eq!(text_stats("Wait...").sentences, 1);
    }

    #[test]
    fn reading_time_rounds_up() {
        let text = "word ".repeat(201);
        assert_eq!(text_stats(&text).reading_minutes, 2);
        assert_eq!(text_stats("short").reading_minutes, 1);
    }

    #[test]
    fn characters_count_unicode_scalars() {
        let stats = text_stats("héllo wörld");
        assert_eq!(stats.characters, 11);
        assert_eq!(stats.characters_no_spaces, 10);
        assert_eq!(stats.lines, 1);
    }
}
