//! Reporting period definitions.
//!
//! This module defines [`PeriodType`], the position of a statement within its
//! fiscal year. Periods are cumulative: `2Q` covers the first half, `FY` the
//! whole year.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::KessanError;

/// Period type of a reporting statement, ordered `1Q < 2Q < 3Q < FY`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PeriodType {
    /// First quarter.
    #[serde(rename = "1Q")]
    Q1,
    /// Second quarter (half year).
    #[serde(rename = "2Q")]
    Q2,
    /// Third quarter.
    #[serde(rename = "3Q")]
    Q3,
    /// Full fiscal year.
    #[serde(rename = "FY")]
    FullYear,
}

impl PeriodType {
    /// All period types in fiscal-calendar order.
    pub const ALL: [Self; 4] = [Self::Q1, Self::Q2, Self::Q3, Self::FullYear];

    /// Returns the rank of this period within the fiscal year (1 through 4).
    #[must_use]
    pub const fn rank(&self) -> u8 {
        match self {
            Self::Q1 => 1,
            Self::Q2 => 2,
            Self::Q3 => 3,
            Self::FullYear => 4,
        }
    }

    /// Returns the period type with the given rank, if any.
    #[must_use]
    pub const fn from_rank(rank: u8) -> Option<Self> {
        match rank {
            1 => Some(Self::Q1),
            2 => Some(Self::Q2),
            3 => Some(Self::Q3),
            4 => Some(Self::FullYear),
            _ => None,
        }
    }

    /// Returns the disclosure label (`1Q`, `2Q`, `3Q`, `FY`).
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Q1 => "1Q",
            Self::Q2 => "2Q",
            Self::Q3 => "3Q",
            Self::FullYear => "FY",
        }
    }

    /// Returns the preceding period within the same fiscal year.
    ///
    /// `1Q` has no predecessor inside its own year; callers that need a
    /// quarter-over-quarter baseline for `1Q` use the prior year's `FY`.
    #[must_use]
    pub const fn previous_in_year(&self) -> Option<Self> {
        Self::from_rank(self.rank() - 1)
    }
}

impl fmt::Display for PeriodType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for PeriodType {
    type Err = KessanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "1Q" => Ok(Self::Q1),
            "2Q" => Ok(Self::Q2),
            "3Q" => Ok(Self::Q3),
            "FY" => Ok(Self::FullYear),
            other => Err(KessanError::Parse(format!("Invalid period type: {other}"))),
        }
    }
}
