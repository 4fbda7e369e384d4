//! The externally visible committed value: a `{startDate, endDate}` pair.

use serde::{Deserialize, Serialize};

use crate::prelude::*;
use crate::{CalendarDate, ParseError};

/// A committed date selection: both endpoints set with start <= end.
/// A single-date commit is represented with start == end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[display(fmt = "{start_date} - {end_date}")]
#[serde(try_from = "RangeRepr", into = "RangeRepr")]
pub struct SelectedRange {
    start_date: CalendarDate,
    end_date: CalendarDate,
}

/// Error type for building a selection.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RangeError {
    /// Start date is after end date.
    #[error("Invalid date range: start ({start}) is after end ({end})")]
    OutOfOrder {
        start: CalendarDate,
        end: CalendarDate,
    },

    /// Error parsing an endpoint.
    #[error(transparent)]
    Parse(#[from] ParseError),
}

impl SelectedRange {
    /// Creates a new selection with validation.
    ///
    /// # Errors
    /// Returns `RangeError::OutOfOrder` if start > end.
    pub fn new(start_date: CalendarDate, end_date: CalendarDate) -> Result<Self, RangeError> {
        if start_date > end_date {
            return Err(RangeError::OutOfOrder {
                start: start_date,
                end: end_date,
            });
        }
        Ok(Self {
            start_date,
            end_date,
        })
    }

    /// A single-date selection: both endpoints are the same day.
    pub const fn single(date: CalendarDate) -> Self {
        Self {
            start_date: date,
            end_date: date,
        }
    }

    /// Returns the start of the selection
    pub const fn start_date(&self) -> CalendarDate {
        self.start_date
    }

    /// Returns the end of the selection
    pub const fn end_date(&self) -> CalendarDate {
        self.end_date
    }

    /// True when the selection covers exactly one day
    pub fn is_single_day(&self) -> bool {
        self.start_date == self.end_date
    }
}

/// Wire shape of a selection, matching the host-facing
/// `{"startDate": ..., "endDate": ...}` object.
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RangeRepr {
    start_date: CalendarDate,
    end_date: CalendarDate,
}

impl TryFrom<RangeRepr> for SelectedRange {
    type Error = RangeError;

    fn try_from(repr: RangeRepr) -> Result<Self, Self::Error> {
        Self::new(repr.start_date, repr.end_date)
    }
}

impl From<SelectedRange> for RangeRepr {
    fn from(range: SelectedRange) -> Self {
        Self {
            start_date: range.start_date,
            end_date: range.end_date,
        }
    }
}
