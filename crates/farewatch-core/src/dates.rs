//! Departure/return date handling.
//!
//! Fares move by the day, so each trip is searched over a ±1 day window
//! around its nominal dates rather than the exact pair alone.

use std::fmt;

use chrono::{Days, NaiveDate};

use crate::DateParseError;

/// Offsets applied to each nominal date, in generation order.
const NEIGHBOUR_OFFSETS: [i8; 3] = [-1, 0, 1];

/// Formats accepted by [`parse_day_first`], tried in order.
///
/// Two-digit years come before four-digit ones since chrono's `%Y` also
/// accepts a short year. ISO goes last.
const DAY_FIRST_FORMATS: [&str; 7] = [
    "%d/%m/%y", "%d/%m/%Y", "%d-%m-%y", "%d-%m-%Y", "%d.%m.%y", "%d.%m.%Y", "%Y-%m-%d",
];

/// An ordered `(departure, return)` pair where departure is strictly earlier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DatePair {
    departure: NaiveDate,
    ret: NaiveDate,
}

impl DatePair {
    /// Returns `None` unless `departure < ret`.
    #[must_use]
    pub fn new(departure: NaiveDate, ret: NaiveDate) -> Option<Self> {
        (departure < ret).then_some(Self { departure, ret })
    }

    #[must_use]
    pub fn departure(&self) -> NaiveDate {
        self.departure
    }

    #[must_use]
    pub fn ret(&self) -> NaiveDate {
        self.ret
    }
}

impl fmt::Display for DatePair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.departure, self.ret)
    }
}

/// Parses a calendar date written day-first (`10/10/2024` is 10 October).
///
/// # Errors
///
/// Returns [`DateParseError`] when the input matches none of the accepted
/// layouts or names an impossible date.
pub fn parse_day_first(input: &str) -> Result<NaiveDate, DateParseError> {
    let trimmed = input.trim();
    DAY_FIRST_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(trimmed, format).ok())
        .ok_or_else(|| DateParseError {
            input: input.to_owned(),
        })
}

/// Expands a nominal trip into every valid date pair within one day of it.
///
/// Departure candidates form the outer loop and return candidates the inner
/// loop, each in `[-1, 0, +1]` order. Pairs whose departure is not strictly
/// before the return are left out, so the result holds between 6 and 9
/// pairs whenever `departure < ret`.
#[must_use]
pub fn expand_date_range(departure: NaiveDate, ret: NaiveDate) -> Vec<DatePair> {
    let departures = neighbours(departure);
    let returns = neighbours(ret);

    departures
        .iter()
        .flat_map(|&d| returns.iter().filter_map(move |&r| DatePair::new(d, r)))
        .collect()
}

fn neighbours(date: NaiveDate) -> Vec<NaiveDate> {
    NEIGHBOUR_OFFSETS
        .iter()
        .filter_map(|&offset| match offset {
            -1 => date.checked_sub_days(Days::new(1)),
            1 => date.checked_add_days(Days::new(1)),
            _ => Some(date),
        })
        .collect()
}
