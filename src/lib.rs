mod consts;
mod edit;
mod field;
mod format;
mod parse;
mod pattern;
mod prelude;
mod types;
mod value;

pub use consts::*;
pub use edit::{reduce_backspace, strip_invalid};
pub use field::{DateField, FieldOptions, FieldState, MemoryField};
pub use format::format_while_typing;
pub use parse::{Commit, evaluate, parse_formatted};
pub use pattern::{extract_separators, pattern_len, separator_positions};
pub use types::{Day, Month, Year};
pub use value::{RangeError, SelectedRange};

use crate::prelude::*;
use std::str::FromStr;
use types::days_in_month;

/// A fully validated calendar date.
///
/// Construction goes through [`CalendarDate::from_ymd`] (or [`FromStr`] on
/// the canonical `YYYY-MM-DD` form), so a value of this type is always a
/// real date. Display and serde both use the canonical form regardless of
/// whatever display pattern produced the date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[display(fmt = "{:04}-{:02}-{:02}", "year.get()", "month.get()", "day.get()")]
pub struct CalendarDate {
    year: Year,
    month: Month,
    day: Day,
}

/// Error type for everything that can go wrong between raw field text and
/// a validated date.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("Empty date string")]
    EmptyInput,
    #[error("Invalid date format: {0}")]
    InvalidFormat(String),
    #[error("Invalid year: {0} (must be 1-{MAX_YEAR})")]
    InvalidYear(u16),
    #[error("Invalid month: {0} (must be 1-{MAX_MONTH})")]
    InvalidMonth(u8),
    #[error("Invalid day {day} for month {year}-{month:02}")]
    InvalidDay { year: u16, month: u8, day: u8 },
    #[error("Expected a digit, found '{found}'")]
    ExpectedDigit { found: char },
    #[error("Expected separator '{expected}', found '{found}'")]
    ExpectedSeparator { expected: char, found: char },
    #[error("Input ended before the display pattern was satisfied")]
    UnexpectedEnd,
    #[error("Input continues past the end of the display pattern")]
    TrailingInput,
    #[error("Unsupported pattern field '{0}' (expected M, D or Y)")]
    UnsupportedField(char),
    #[error("Display pattern has no '{0}' component")]
    MissingComponent(char),
}

impl CalendarDate {
    /// Builds a date from raw components, validating each one.
    ///
    /// # Errors
    /// Returns the corresponding `ParseError` variant when the year, month
    /// or day is out of range.
    pub fn from_ymd(year: u16, month: u8, day: u8) -> Result<Self, ParseError> {
        let year_t = Year::new(year)?;
        let month_t = Month::new(month)?;
        let day_t = Day::new(day, year, month)?;
        Ok(Self {
            year: year_t,
            month: month_t,
            day: day_t,
        })
    }

    /// Returns the year component
    pub const fn year(&self) -> u16 {
        self.year.get()
    }

    /// Returns the month component
    pub const fn month(&self) -> u8 {
        self.month.get()
    }

    /// Returns the day component
    pub const fn day(&self) -> u8 {
        self.day.get()
    }

    /// The day immediately before this one, rolling back over month and
    /// year boundaries. `None` only for 0001-01-01.
    pub fn previous_day(self) -> Option<Self> {
        let (year, month, day) = (self.year(), self.month(), self.day());
        if day > MIN_DAY {
            Self::from_ymd(year, month, day - 1).ok()
        } else if month > JANUARY {
            Self::from_ymd(year, month - 1, days_in_month(year, month - 1)).ok()
        } else if year > 1 {
            Self::from_ymd(year - 1, DECEMBER, DAYS_IN_MONTH[DECEMBER as usize]).ok()
        } else {
            None
        }
    }

    /// The day immediately after this one, rolling forward over month and
    /// year boundaries. `None` past the end of year `MAX_YEAR`.
    pub fn next_day(self) -> Option<Self> {
        let (year, month, day) = (self.year(), self.month(), self.day());
        if day < days_in_month(year, month) {
            Self::from_ymd(year, month, day + 1).ok()
        } else if month < DECEMBER {
            Self::from_ymd(year, month + 1, MIN_DAY).ok()
        } else if year < MAX_YEAR {
            Self::from_ymd(year + 1, JANUARY, MIN_DAY).ok()
        } else {
            None
        }
    }
}

impl FromStr for CalendarDate {
    type Err = ParseError;

    /// Parses the canonical `YYYY-MM-DD` output form. Display-pattern
    /// driven parsing lives in [`parse_formatted`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ParseError::EmptyInput);
        }

        let parts: Vec<&str> = trimmed.split(OUTPUT_SEPARATOR).collect();
        if parts.len() != 3 {
            return Err(ParseError::InvalidFormat(trimmed.to_owned()));
        }

        let year = parse_u16(parts[0])?;
        let month = parse_u8(parts[1])?;
        let day = parse_u8(parts[2])?;
        Self::from_ymd(year, month, day)
    }
}

pub(crate) fn parse_u16(s: &str) -> Result<u16, ParseError> {
    s.parse::<u16>()
        .map_err(|_| ParseError::InvalidFormat(s.to_owned()))
}

pub(crate) fn parse_u8(s: &str) -> Result<u8, ParseError> {
    s.parse::<u8>()
        .map_err(|_| ParseError::InvalidFormat(s.to_owned()))
}

impl serde::Serialize for CalendarDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> serde::Deserialize<'de> for CalendarDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_ymd_validates_components() {
        assert!(CalendarDate::from_ymd(2023, 1, 1).is_ok());
        assert!(matches!(
            CalendarDate::from_ymd(0, 1, 1),
            Err(ParseError::InvalidYear(0))
        ));
        assert!(matches!(
            CalendarDate::from_ymd(2023, 13, 1),
            Err(ParseError::InvalidMonth(13))
        ));
        assert!(matches!(
            CalendarDate::from_ymd(2023, 2, 29),
            Err(ParseError::InvalidDay { .. })
        ));
    }

    #[test]
    fn display_is_canonical() {
        let date = CalendarDate::from_ymd(2023, 1, 5).unwrap();
        assert_eq!(date.to_string(), "2023-01-05");

        let date = CalendarDate::from_ymd(987, 12, 31).unwrap();
        assert_eq!(date.to_string(), "0987-12-31");
    }

    #[test]
    fn from_str_round_trips() {
        let date = "2023-01-05".parse::<CalendarDate>().unwrap();
        assert_eq!(date.year(), 2023);
        assert_eq!(date.month(), 1);
        assert_eq!(date.day(), 5);
        assert_eq!(date.to_string().parse::<CalendarDate>().unwrap(), date);
    }

    #[test]
    fn from_str_rejects_malformed_input() {
        assert!(matches!(
            "".parse::<CalendarDate>(),
            Err(ParseError::EmptyInput)
        ));
        assert!(matches!(
            "2023-01".parse::<CalendarDate>(),
            Err(ParseError::InvalidFormat(_))
        ));
        assert!(matches!(
            "2023-01-05-07".parse::<CalendarDate>(),
            Err(ParseError::InvalidFormat(_))
        ));
        assert!(matches!(
            "2023-XX-05".parse::<CalendarDate>(),
            Err(ParseError::InvalidFormat(_))
        ));
        assert!(matches!(
            "2023-02-30".parse::<CalendarDate>(),
            Err(ParseError::InvalidDay { .. })
        ));
    }

    #[test]
    fn ordering_is_chronological() {
        let a = CalendarDate::from_ymd(2023, 1, 31).unwrap();
        let b = CalendarDate::from_ymd(2023, 2, 1).unwrap();
        let c = CalendarDate::from_ymd(2024, 1, 1).unwrap();
        assert!(a < b);
        assert!(b < c);
    }

    #[test]
    fn previous_day_rolls_over_boundaries() {
        let date = CalendarDate::from_ymd(2023, 1, 5).unwrap();
        assert_eq!(date.previous_day().unwrap().to_string(), "2023-01-04");

        let date = CalendarDate::from_ymd(2023, 3, 1).unwrap();
        assert_eq!(date.previous_day().unwrap().to_string(), "2023-02-28");

        let date = CalendarDate::from_ymd(2024, 3, 1).unwrap();
        assert_eq!(date.previous_day().unwrap().to_string(), "2024-02-29");

        let date = CalendarDate::from_ymd(2023, 1, 1).unwrap();
        assert_eq!(date.previous_day().unwrap().to_string(), "2022-12-31");

        let date = CalendarDate::from_ymd(1, 1, 1).unwrap();
        assert_eq!(date.previous_day(), None);
    }

    #[test]
    fn next_day_rolls_over_boundaries() {
        let date = CalendarDate::from_ymd(2023, 12, 31).unwrap();
        assert_eq!(date.next_day().unwrap().to_string(), "2024-01-01");

        let date = CalendarDate::from_ymd(2020, 2, 29).unwrap();
        assert_eq!(date.next_day().unwrap().to_string(), "2020-03-01");

        let date = CalendarDate::from_ymd(9999, 12, 31).unwrap();
        assert_eq!(date.next_day(), None);
    }

    #[test]
    fn serde_string_repr() {
        let date = CalendarDate::from_ymd(2023, 1, 5).unwrap();
        let json = serde_json::to_string(&date).unwrap();
        assert_eq!(json, r#""2023-01-05""#);
        let parsed: CalendarDate = serde_json::from_str(&json).unwrap();
        assert_eq!(date, parsed);

        let result: Result<CalendarDate, _> = serde_json::from_str(r#""2023-02-30""#);
        assert!(result.is_err());
    }
}
