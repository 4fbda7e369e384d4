//! Display-pattern inspection.
//!
//! A display pattern such as `"MM/DD/YYYY"` carries two kinds of
//! information: which punctuation the locale uses between date components,
//! and where that punctuation sits. Both are derived here; everything is
//! measured in characters, never bytes.

use crate::consts::FALLBACK_SEPARATOR;

/// True for characters that cannot be part of a date component, i.e. the
/// complement of `\w` (letter, digit or underscore).
pub(crate) const fn is_separator_char(c: char) -> bool {
    !(c.is_ascii_alphanumeric() || c == '_')
}

/// Extracts the ordered separator set of a display pattern.
///
/// Every non-word character is collected in order of appearance, so
/// `"DD.MM.YYYY"` yields `['.', '.']`. A pattern with no punctuation at
/// all falls back to a default pair; that only degrades separator
/// insertion, never correctness.
pub fn extract_separators(display_pattern: &str) -> Vec<char> {
    let separators: Vec<char> = display_pattern.chars().filter(|&c| is_separator_char(c)).collect();

    if separators.is_empty() {
        vec![FALLBACK_SEPARATOR, FALLBACK_SEPARATOR]
    } else {
        separators
    }
}

/// Character positions at which the given separators occur in the
/// pattern. Each lookup starts just past the previous match, so repeated
/// separators (the common case) each find their own occurrence. This is
/// what distinguishes e.g. `YYYY-MM-DD` from `DD-MM-YYYY`.
pub fn separator_positions(display_pattern: &str, separators: &[char]) -> Vec<usize> {
    let chars: Vec<char> = display_pattern.chars().collect();
    let mut positions = Vec::with_capacity(separators.len());
    let mut start = 0;

    for &separator in separators {
        if let Some(offset) = chars[start..].iter().position(|&c| c == separator) {
            let idx = start + offset;
            positions.push(idx);
            start = idx + 1;
        }
    }

    positions
}

/// Pattern length in characters.
pub fn pattern_len(display_pattern: &str) -> usize {
    display_pattern.chars().count()
}
