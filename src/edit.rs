//! Keystroke-time edits that run before parsing and formatting.

use crate::pattern::extract_separators;

/// Smart backspace: removes one logical date component instead of one
/// raw character.
///
/// The trailing run of non-digit characters is stripped first (auto
/// inserted punctuation, including multi-character runs like `" ~ "`),
/// then exactly one digit. Empty text is a no-op. The caller must
/// suppress the field's native deletion and apply the returned text as
/// the new value.
pub fn reduce_backspace(current_text: &str) -> String {
    let mut chars: Vec<char> = current_text.chars().collect();

    while chars.last().is_some_and(|c| !c.is_ascii_digit()) {
        chars.pop();
    }
    chars.pop();
    chars.into_iter().collect()
}

/// Drops characters that can play no role in a date under the current
/// configuration: anything that is not an ASCII digit, a separator of
/// the display pattern, a space, or part of the range separator.
pub fn strip_invalid(typed_text: &str, display_pattern: &str, range_separator: &str) -> String {
    let separators = extract_separators(display_pattern);

    typed_text
        .chars()
        .filter(|&c| {
            c.is_ascii_digit()
                || c == ' '
                || separators.contains(&c)
                || range_separator.contains(c)
        })
        .collect()
}
