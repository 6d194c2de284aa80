//! [`MonthYear`] — the calendar granularity used for every subscription date.
//!
//! Values are written as `MM-YYYY`. Internally a month is held as the first
//! day of that month, so equality and ordering never see a day component.

use std::{fmt, str::FromStr};

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Earliest year accepted in a month-year value.
pub const MIN_YEAR: i32 = 2000;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MonthYearError {
  #[error("expected MM-YYYY, got {0:?}")]
  Format(String),

  #[error("month out of range: {0}")]
  Month(u32),

  #[error("year out of range: {0}")]
  Year(i32),
}

/// A month of a year, e.g. `03-2025`.
///
/// Only constructible through [`MonthYear::new`] or parsing, both of which
/// enforce the format rules. Serialises as its `MM-YYYY` string.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub struct MonthYear(NaiveDate);

impl MonthYear {
  pub fn new(month: u32, year: i32) -> Result<Self, MonthYearError> {
    if !(1..=12).contains(&month) {
      return Err(MonthYearError::Month(month));
    }
    if !(MIN_YEAR..=9999).contains(&year) {
      return Err(MonthYearError::Year(year));
    }
    NaiveDate::from_ymd_opt(year, month, 1)
      .map(Self)
      .ok_or(MonthYearError::Month(month))
  }

  pub fn month(&self) -> u32 { self.0.month() }

  pub fn year(&self) -> i32 { self.0.year() }

  /// The first calendar day of this month.
  pub fn first_day(&self) -> NaiveDate { self.0 }
}

impl FromStr for MonthYear {
  type Err = MonthYearError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let format_err = || MonthYearError::Format(s.to_owned());

    let (month, year) = s.split_once('-').ok_or_else(format_err)?;
    let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());

    if month.len() != 2 || year.len() != 4 || !all_digits(month) || !all_digits(year) {
      return Err(format_err());
    }

    let month: u32 = month.parse().map_err(|_| format_err())?;
    let year: i32 = year.parse().map_err(|_| format_err())?;
    Self::new(month, year)
  }
}

impl fmt::Display for MonthYear {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{:02}-{:04}", self.month(), self.year())
  }
}

impl TryFrom<String> for MonthYear {
  type Error = MonthYearError;

  fn try_from(s: String) -> Result<Self, Self::Error> { s.parse() }
}

impl From<MonthYear> for String {
  fn from(m: MonthYear) -> Self { m.to_string() }
}
