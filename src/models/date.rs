//! Calendar-free date value
//!
//! A `(year, month, day)` triple with a total order, used to compare and sort
//! records by date. Only the numeric ranges of month and day are checked;
//! month lengths and leap years are not, so `2016/2/31` is a valid value.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{ErpError, ErpResult};

/// An immutable date value ordered by year, then month, then day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Date {
    // Field order drives the derived `Ord`.
    year: i32,
    month: u32,
    day: u32,
}

impl Date {
    /// Create a date, rejecting a month outside 1-12 or a day outside 1-31
    pub fn new(year: i32, month: u32, day: u32) -> ErpResult<Self> {
        if !(1..=12).contains(&month) {
            return Err(ErpError::InvalidDate(format!(
                "month {} is not between 1 and 12",
                month
            )));
        }
        if !(1..=31).contains(&day) {
            return Err(ErpError::InvalidDate(format!(
                "day {} is not between 1 and 31",
                day
            )));
        }
        Ok(Self { year, month, day })
    }

    /// Create a date from the raw cell strings of a row
    pub fn from_parts(year: &str, month: &str, day: &str) -> ErpResult<Self> {
        let year: i32 = parse_part("year", year)?;
        let month: u32 = parse_part("month", month)?;
        let day: u32 = parse_part("day", day)?;
        Self::new(year, month, day)
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn day(&self) -> u32 {
        self.day
    }

    /// Check if this date lies strictly between `low` and `high`
    pub fn is_strictly_between(&self, low: &Date, high: &Date) -> bool {
        low < self && self < high
    }
}

fn parse_part<T: FromStr>(name: &str, raw: &str) -> ErpResult<T> {
    raw.trim()
        .parse()
        .map_err(|_| ErpError::InvalidDate(format!("{} '{}' is not a number", name, raw)))
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.year, self.month, self.day)
    }
}

impl FromStr for Date {
    type Err = ErpError;

    /// Parse the `year/month/day` display form
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split('/').collect();
        match parts.as_slice() {
            [year, month, day] => Self::from_parts(year, month, day),
            _ => Err(ErpError::InvalidDate(format!(
                "'{}' is not in year/month/day form",
                s
            ))),
        }
    }
}
