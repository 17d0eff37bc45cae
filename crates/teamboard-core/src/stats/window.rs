//! Reporting windows for leaderboards.
//!
//! Every window is a half-open date range `[start, end)` over an activity's
//! `occurred_on` date. Weeks always start on Monday.

use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;
use crate::revenue::Month;

/// A leaderboard period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Window {
    /// The Monday-to-Monday week containing the reference date
    Weekly { reference: NaiveDate },
    Monthly { month: Month },
    Quarterly { year: i32, quarter: u32 },
    Yearly { year: i32 },
}

/// Monday of the ISO week containing `date`.
///
/// # Errors
/// Fails when that Monday falls before the earliest date chrono represents.
pub fn week_start(date: NaiveDate) -> Result<NaiveDate, ValidationError> {
    let offset = u64::from(date.weekday().num_days_from_monday());
    date.checked_sub_days(Days::new(offset))
        .ok_or_else(|| ValidationError::InvalidValue {
            field: "window".into(),
            message: format!("week of {date} starts before the supported calendar"),
        })
}

fn first_of_month(year: i32, month: u32) -> Result<NaiveDate, ValidationError> {
    NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(|| ValidationError::InvalidValue {
        field: "window".into(),
        message: format!("{year:04}-{month:02} is outside the supported calendar"),
    })
}

impl Window {
    pub fn weekly(reference: NaiveDate) -> Self {
        Self::Weekly { reference }
    }

    pub fn monthly(year: i32, month: u32) -> Result<Self, ValidationError> {
        Ok(Self::Monthly {
            month: Month::new(year, month)?,
        })
    }

    pub fn quarterly(year: i32, quarter: u32) -> Result<Self, ValidationError> {
        if !(1..=4).contains(&quarter) {
            return Err(ValidationError::InvalidQuarter(quarter));
        }
        Ok(Self::Quarterly { year, quarter })
    }

    pub fn yearly(year: i32) -> Self {
        Self::Yearly { year }
    }

    /// Half-open `[start, end)` date bounds.
    ///
    /// # Errors
    /// Returns a validation error for an out-of-range quarter or a date
    /// chrono cannot represent.
    pub fn bounds(&self) -> Result<(NaiveDate, NaiveDate), ValidationError> {
        match *self {
            Self::Weekly { reference } => {
                let start = week_start(reference)?;
                let end = start.checked_add_days(Days::new(7)).ok_or_else(|| {
                    ValidationError::InvalidValue {
                        field: "window".into(),
                        message: format!("week of {reference} overflows the calendar"),
                    }
                })?;
                Ok((start, end))
            }
            Self::Monthly { month } => {
                let start = first_of_month(month.year(), month.month())?;
                let end = if month.month() == 12 {
                    first_of_month(month.year() + 1, 1)?
                } else {
                    first_of_month(month.year(), month.month() + 1)?
                };
                Ok((start, end))
            }
            Self::Quarterly { year, quarter } => {
                if !(1..=4).contains(&quarter) {
                    return Err(ValidationError::InvalidQuarter(quarter));
                }
                let first_month = (quarter - 1) * 3 + 1;
                let start = first_of_month(year, first_month)?;
                let end = if quarter == 4 {
                    first_of_month(year + 1, 1)?
                } else {
                    first_of_month(year, first_month + 3)?
                };
                Ok((start, end))
            }
            Self::Yearly { year } => Ok((first_of_month(year, 1)?, first_of_month(year + 1, 1)?)),
        }
    }

    /// Months covered by the window, or `None` for a week.
    pub fn months(&self) -> Option<Vec<Month>> {
        match *self {
            Self::Weekly { .. } => None,
            Self::Monthly { month } => Some(vec![month]),
            Self::Quarterly { year, quarter } => Some(
                Month::all_in_year(year)
                    .filter(|m| m.quarter() == quarter)
                    .collect(),
            ),
            Self::Yearly { year } => Some(Month::all_in_year(year).collect()),
        }
    }
}

impl fmt::Display for Window {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Weekly { reference } => match week_start(*reference) {
                Ok(start) => write!(f, "week of {start}"),
                Err(_) => write!(f, "week of {reference}"),
            },
            Self::Monthly { month } => write!(f, "{month}"),
            Self::Quarterly { year, quarter } => write!(f, "{year:04}-Q{quarter}"),
            Self::Yearly { year } => write!(f, "{year:04}"),
        }
    }
}

/// Parses `YYYY-MM-DD` (week containing that date), `YYYY-MM`, `YYYY-Qn`
/// and `YYYY`.
impl FromStr for Window {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let invalid = || ValidationError::InvalidValue {
            field: "window".into(),
            message: format!("cannot parse '{s}' (expected YYYY-MM-DD, YYYY-MM, YYYY-Qn or YYYY)"),
        };

        if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
            return Ok(Self::weekly(date));
        }
        if let Some((y, q)) = s.split_once("-Q").or_else(|| s.split_once("-q")) {
            let year = y.parse::<i32>().map_err(|_| invalid())?;
            let quarter = q.parse::<u32>().map_err(|_| invalid())?;
            return Self::quarterly(year, quarter);
        }
        if s.contains('-') {
            return s.parse::<Month>().map(|month| Self::Monthly { month });
        }
        s.parse::<i32>().map(Self::yearly).map_err(|_| invalid())
    }
}
