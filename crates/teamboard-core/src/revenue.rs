//! Monthly FYC (first year commission) figures.
//!
//! Revenue is keyed by member and calendar month. A second write for the same
//! key replaces the amount; it never accumulates.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

/// A calendar month, written `YYYY-MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Month {
    year: i32,
    month: u32,
}

impl Month {
    pub fn new(year: i32, month: u32) -> Result<Self, ValidationError> {
        if !(1..=12).contains(&month) {
            return Err(ValidationError::InvalidMonth(format!("{year:04}-{month:02}")));
        }
        Ok(Self { year, month })
    }

    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// Calendar quarter (1-4) this month falls in.
    pub fn quarter(&self) -> u32 {
        (self.month - 1) / 3 + 1
    }

    /// All twelve months of a year.
    pub fn all_in_year(year: i32) -> impl Iterator<Item = Month> {
        (1..=12).map(move |month| Month { year, month })
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for Month {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ValidationError::InvalidMonth(s.to_string());
        let (y, m) = s.trim().split_once('-').ok_or_else(invalid)?;
        if y.len() != 4 || m.len() != 2 {
            return Err(invalid());
        }
        let year = y.parse::<i32>().map_err(|_| invalid())?;
        let month = m.parse::<u32>().map_err(|_| invalid())?;
        Month::new(year, month).map_err(|_| invalid())
    }
}

impl TryFrom<String> for Month {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Month> for String {
    fn from(value: Month) -> Self {
        value.to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyRevenue {
    pub member: String,
    pub month: Month,
    pub amount: f64,
}

/// Reject negative, NaN and infinite amounts.
pub fn validate_amount(amount: f64) -> Result<f64, ValidationError> {
    if !amount.is_finite() || amount < 0.0 {
        return Err(ValidationError::InvalidAmount(amount));
    }
    Ok(amount)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_parses_and_displays() {
        let m: Month = "2026-03".parse().unwrap();
        assert_eq!((m.year(), m.month(), m.quarter()), (2026, 3, 1));
        assert_eq!(m.to_string(), "2026-03");
    }

    #[test]
    fn month_rejects_malformed_keys() {
        for bad in ["2026-13", "2026-00", "2026-3", "26-03", "2026/03", "March"] {
            assert!(bad.parse::<Month>().is_err(), "{bad} should be rejected");
        }
    }

    #[test]
    fn quarters_cover_months() {
        let quarters: Vec<u32> = Month::all_in_year(2026).map(|m| m.quarter()).collect();
        assert_eq!(quarters, vec![1, 1, 1, 2, 2, 2, 3, 3, 3, 4, 4, 4]);
    }

    #[test]
    fn month_serializes_as_string() {
        let m = Month::new(2026, 7).unwrap();
        assert_eq!(serde_json::to_string(&m).unwrap(), "\"2026-07\"");
        let back: Month = serde_json::from_str("\"2026-07\"").unwrap();
        assert_eq!(back, m);
    }

    #[test]
    fn amount_validation() {
        assert_eq!(validate_amount(0.0).unwrap(), 0.0);
        assert!(validate_amount(-1.0).is_err());
        assert!(validate_amount(f64::NAN).is_err());
        assert!(validate_amount(f64::INFINITY).is_err());
    }
}
