//! Keystroke-time formatting.
//!
//! Reinserts locale separators into the raw text as the user types, and
//! assembles the `start SEP end` range string once the first segment is
//! complete. A pure positional transform: it looks only at character
//! counts, never at content.

use crate::pattern::{extract_separators, pattern_len, separator_positions};

/// Inserts the pattern's separators into `text` wherever the current
/// length lands exactly on a separator position. Checks run against the
/// text as already extended in this call, so consecutive separators in
/// the pattern (e.g. `". "`) are all inserted at once.
fn insert_separators(text: &mut Vec<char>, separators: &[char], positions: &[usize]) {
    for (i, &position) in positions.iter().enumerate() {
        if text.len() == position {
            text.push(separators[i]);
        }
    }
}

/// Reformats the raw field text after a keystroke.
///
/// In range mode, once the typed text covers a whole display pattern the
/// first `pattern_len` characters become the start segment, the range
/// separator is appended as `" SEP "`, and whatever the user typed past
/// that point is treated as the end segment and formatted the same way.
pub fn format_while_typing(
    raw_text: &str,
    display_pattern: &str,
    as_single: bool,
    range_separator: &str,
) -> String {
    let separators = extract_separators(display_pattern);
    let positions = separator_positions(display_pattern, &separators);
    let chars: Vec<char> = raw_text.chars().collect();
    let segment_len = pattern_len(display_pattern);

    if !as_single && chars.len() >= segment_len && segment_len > 0 {
        let mut assembled: String = chars[..segment_len].iter().collect();
        assembled.push(' ');
        assembled.push_str(range_separator);
        assembled.push(' ');

        // Skip past the start segment, the range separator and its two
        // surrounding spaces to find what the user typed for the end date
        let skip = segment_len + 2 + range_separator.chars().count();
        if chars.len() > skip {
            let mut end_segment: Vec<char> = chars[skip..].to_vec();
            insert_separators(&mut end_segment, &separators, &positions);
            assembled.extend(end_segment);
        }
        return assembled;
    }

    let mut formatted = chars;
    insert_separators(&mut formatted, &separators, &positions);
    formatted.into_iter().collect()
}
