//! Score record types.
//!
//! A [`ScoreRecord`] is the persisted outcome of scoring one statement. It is
//! keyed by company code and disclosure number; recomputing a record for the
//! same key overwrites the previous one.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::{
    error::KessanError,
    period::PeriodType,
    signal::Signal,
    types::{CompanyCode, DisclosureNumber},
};

/// Composite score at or above which a statement is [`Category::Attention`].
pub const ATTENTION_THRESHOLD: f64 = 80.0;
/// Composite score at or above which a statement is [`Category::Review`].
pub const REVIEW_THRESHOLD: f64 = 50.0;

/// Three-valued direction flag.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "i8", try_from = "i8")]
pub enum Direction {
    /// Positive (+1).
    Up,
    /// Neutral (0).
    #[default]
    Flat,
    /// Negative (-1).
    Down,
}

impl Direction {
    /// Returns the flag as `+1`, `0` or `-1`.
    #[must_use]
    pub const fn as_i8(&self) -> i8 {
        match self {
            Self::Up => 1,
            Self::Flat => 0,
            Self::Down => -1,
        }
    }
}

impl From<Direction> for i8 {
    fn from(d: Direction) -> Self {
        d.as_i8()
    }
}

impl TryFrom<i8> for Direction {
    type Error = KessanError;

    fn try_from(v: i8) -> Result<Self, Self::Error> {
        match v {
            1 => Ok(Self::Up),
            0 => Ok(Self::Flat),
            -1 => Ok(Self::Down),
            other => Err(KessanError::Parse(format!("Invalid direction flag: {other}"))),
        }
    }
}

/// Importance bucket of a composite score.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Score of at least 80.
    Attention,
    /// Score of at least 50.
    Review,
    /// Everything below 50.
    #[default]
    Normal,
}

impl Category {
    /// Buckets a composite score. Lower bounds are inclusive.
    #[must_use]
    pub fn from_score(score: f64) -> Self {
        if score >= ATTENTION_THRESHOLD {
            Self::Attention
        } else if score >= REVIEW_THRESHOLD {
            Self::Review
        } else {
            Self::Normal
        }
    }

    /// Returns the label used in storage.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Attention => "attention",
            Self::Review => "review",
            Self::Normal => "normal",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = KessanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "attention" => Ok(Self::Attention),
            "review" => Ok(Self::Review),
            "normal" => Ok(Self::Normal),
            other => Err(KessanError::Parse(format!("Invalid category: {other}"))),
        }
    }
}

/// Persisted scoring outcome for one statement.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreRecord {
    /// Company code.
    pub code: CompanyCode,
    /// Disclosure identifier of the scored statement.
    pub disclosure_number: DisclosureNumber,
    /// Disclosure date of the scored statement.
    pub disclosed_date: NaiveDate,
    /// Period type of the scored statement.
    pub period_type: Option<PeriodType>,

    /// Year-over-year net sales change (%).
    pub yoy_sales_change: Option<f64>,
    /// Year-over-year operating profit change (%).
    pub yoy_operating_profit_change: Option<f64>,
    /// Year-over-year ordinary profit change (%).
    pub yoy_ordinary_profit_change: Option<f64>,
    /// Year-over-year net profit change (%).
    pub yoy_net_profit_change: Option<f64>,
    /// QoQ operating profit change minus YoY operating profit change.
    pub qoq_acceleration: Option<f64>,

    /// Large-move direction.
    pub revision_flag: Direction,
    /// Profit/loss crossing direction.
    pub turnaround_flag: Direction,

    /// Composite score in `[0, 100]`.
    pub total_score: f64,
    /// Bucket of `total_score`.
    pub category: Category,
    /// Signals the score was derived from.
    pub signals: Vec<Signal>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_boundaries_inclusive() {
        assert_eq!(Category::from_score(100.0), Category::Attention);
        assert_eq!(Category::from_score(80.0), Category::Attention);
        assert_eq!(Category::from_score(79.9), Category::Review);
        assert_eq!(Category::from_score(50.0), Category::Review);
        assert_eq!(Category::from_score(49.9), Category::Normal);
        assert_eq!(Category::from_score(0.0), Category::Normal);
    }

    #[test]
    fn test_category_round_trip_label() {
        for c in [Category::Attention, Category::Review, Category::Normal] {
            assert_eq!(c.as_str().parse::<Category>().unwrap(), c);
        }
        assert!("urgent".parse::<Category>().is_err());
    }

    #[test]
    fn test_direction_serializes_as_integer() {
        assert_eq!(serde_json::to_string(&Direction::Down).unwrap(), "-1");
        let d: Direction = serde_json::from_str("1").unwrap();
        assert_eq!(d, Direction::Up);
        assert!(serde_json::from_str::<Direction>("2").is_err());
    }
}
