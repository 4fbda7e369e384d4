//! Pattern-driven parsing and the per-keystroke commit decision.
//!
//! [`parse_formatted`] interprets one text segment against a display
//! pattern. [`evaluate`] runs the full single/range decision over the raw
//! field text and says whether anything should be committed; malformed
//! input is steady state here, so "no" is an `Option`, not an error.

use crate::value::SelectedRange;
use crate::{CalendarDate, ParseError, parse_u8, parse_u16};

/// Outcome of a successful parse of the whole field: the value to commit
/// and the hover-preview date that goes with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Commit {
    pub value: SelectedRange,
    pub hover: CalendarDate,
}

/// Parses one text segment against a display pattern.
///
/// The segment and the pattern are walked in lockstep, character by
/// character: `M`, `D` and `Y` slots must be filled by digits, every
/// other pattern character must be matched literally. Surrounding
/// whitespace is ignored; anything else has to line up exactly.
///
/// # Errors
/// Returns a `ParseError` describing the first point of disagreement, or
/// the invalid component if the digits do not form a real calendar date.
pub fn parse_formatted(segment: &str, display_pattern: &str) -> Result<CalendarDate, ParseError> {
    let trimmed = segment.trim();
    if trimmed.is_empty() {
        return Err(ParseError::EmptyInput);
    }

    let mut input = trimmed.chars();
    let mut year_digits = String::new();
    let mut month_digits = String::new();
    let mut day_digits = String::new();

    for pattern_char in display_pattern.chars() {
        let found = input.next().ok_or(ParseError::UnexpectedEnd)?;

        if crate::pattern::is_separator_char(pattern_char) {
            if found != pattern_char {
                return Err(ParseError::ExpectedSeparator {
                    expected: pattern_char,
                    found,
                });
            }
            continue;
        }

        if !found.is_ascii_digit() {
            return Err(ParseError::ExpectedDigit { found });
        }
        match pattern_char.to_ascii_uppercase() {
            'Y' => year_digits.push(found),
            'M' => month_digits.push(found),
            'D' => day_digits.push(found),
            other => return Err(ParseError::UnsupportedField(other)),
        }
    }

    if input.next().is_some() {
        return Err(ParseError::TrailingInput);
    }

    let year = component(&year_digits, 'Y').and_then(parse_u16)?;
    let month = component(&month_digits, 'M').and_then(parse_u8)?;
    let day = component(&day_digits, 'D').and_then(parse_u8)?;
    CalendarDate::from_ymd(year, month, day)
}

fn component(digits: &str, field: char) -> Result<&str, ParseError> {
    if digits.is_empty() {
        Err(ParseError::MissingComponent(field))
    } else {
        Ok(digits)
    }
}

/// Decides whether the current field text produces a commit.
///
/// Single mode parses the whole text. Range mode splits on the range
/// separator; while the separator has not been fully typed (anything
/// other than exactly two non-empty pieces) the text is bisected at its
/// character midpoint as a best-effort guess, re-evaluated on the next
/// keystroke. A range commits only when start is strictly before end.
///
/// The hover date accompanying a range commit is one day before the end
/// date; a single commit hovers the committed date itself.
pub fn evaluate(
    raw_text: &str,
    display_pattern: &str,
    as_single: bool,
    range_separator: &str,
) -> Option<Commit> {
    if as_single {
        let date = parse_formatted(raw_text, display_pattern).ok()?;
        return Some(Commit {
            value: SelectedRange::single(date),
            hover: date,
        });
    }

    let pieces: Vec<&str> = if range_separator.is_empty() {
        Vec::new()
    } else {
        raw_text.split(range_separator).collect()
    };

    let (start_text, end_text) = match pieces.as_slice() {
        [start, end] if !start.trim().is_empty() && !end.trim().is_empty() => (*start, *end),
        _ => bisect(raw_text),
    };

    let start = parse_formatted(start_text, display_pattern).ok()?;
    let end = parse_formatted(end_text, display_pattern).ok()?;
    if start >= end {
        return None;
    }

    let value = SelectedRange::new(start, end).ok()?;
    let hover = end.previous_day().unwrap_or(end);
    Some(Commit { value, hover })
}

/// Splits the text at its character midpoint (integer floor). Arbitrary
/// by construction; the ordering check downstream rejects most bad
/// guesses.
fn bisect(raw_text: &str) -> (&str, &str) {
    let middle = raw_text.chars().count() / 2;
    let byte_offset = raw_text
        .char_indices()
        .nth(middle)
        .map_or(raw_text.len(), |(offset, _)| offset);
    raw_text.split_at(byte_offset)
}
