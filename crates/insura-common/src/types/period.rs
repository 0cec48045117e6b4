//! Period units and insurance sides

use crate::error::FormulaError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Milliseconds in one hour
pub const HOUR_MS: i64 = 60 * 60 * 1000;

/// Milliseconds in one day
pub const DAY_MS: i64 = 24 * HOUR_MS;

/// Unit in which an insurance period is counted
///
/// Selects both the expiration arithmetic and the claim-ratio table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PeriodUnit {
    Day,
    Hour,
}

impl PeriodUnit {
    /// Length of one period in milliseconds
    pub fn millis(&self) -> i64 {
        match self {
            PeriodUnit::Day => DAY_MS,
            PeriodUnit::Hour => HOUR_MS,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PeriodUnit::Day => "DAY",
            PeriodUnit::Hour => "HOUR",
        }
    }
}

impl Default for PeriodUnit {
    fn default() -> Self {
        PeriodUnit::Day
    }
}

impl fmt::Display for PeriodUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PeriodUnit {
    type Err = FormulaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "DAY" => Ok(PeriodUnit::Day),
            "HOUR" => Ok(PeriodUnit::Hour),
            _ => Err(FormulaError::InvalidPeriodUnit(s.to_string())),
        }
    }
}

/// Direction of the favourable price move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Side {
    /// Price expected to rise
    Bull,
    /// Price expected to fall
    Bear,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Bull => f.write_str("BULL"),
            Side::Bear => f.write_str("BEAR"),
        }
    }
}
