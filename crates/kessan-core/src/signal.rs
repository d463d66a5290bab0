//! Qualitative signals derived from period comparisons.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{period::PeriodType, types::Metric};

/// A qualitative, human-readable signal attached to a statement.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Signal {
    /// Year-over-year change at or above the large-move threshold.
    LargeIncrease {
        /// The fact that moved.
        metric: Metric,
        /// Signed percentage change.
        change: f64,
    },
    /// Year-over-year change at or below the negative large-move threshold.
    LargeDecrease {
        /// The fact that moved.
        metric: Metric,
        /// Signed percentage change.
        change: f64,
    },
    /// Net profit crossed from a loss to zero or a profit.
    TurnedProfitable,
    /// Net profit crossed from zero or a profit to a loss.
    TurnedUnprofitable,
    /// Operating profit exceeds every other statement of the same period type.
    RecordOperatingProfit {
        /// Period type the record applies to.
        period_type: PeriodType,
    },
}

impl Signal {
    /// Returns true for [`Signal::LargeIncrease`].
    #[must_use]
    pub const fn is_large_increase(&self) -> bool {
        matches!(self, Self::LargeIncrease { .. })
    }

    /// Returns true for [`Signal::LargeDecrease`].
    #[must_use]
    pub const fn is_large_decrease(&self) -> bool {
        matches!(self, Self::LargeDecrease { .. })
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LargeIncrease { metric, change } => {
                write!(f, "{metric} large increase ({change:+.1}%)")
            }
            Self::LargeDecrease { metric, change } => {
                write!(f, "{metric} large decrease ({change:+.1}%)")
            }
            Self::TurnedProfitable => f.write_str("turned profitable"),
            Self::TurnedUnprofitable => f.write_str("turned unprofitable"),
            Self::RecordOperatingProfit { period_type } => {
                write!(f, "record operating profit for {period_type}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_large_move_predicates() {
        let up = Signal::LargeIncrease {
            metric: Metric::NetSales,
            change: 31.0,
        };
        let down = Signal::LargeDecrease {
            metric: Metric::NetSales,
            change: -31.0,
        };
        assert!(up.is_large_increase() && !up.is_large_decrease());
        assert!(down.is_large_decrease() && !down.is_large_increase());
        assert!(!Signal::TurnedProfitable.is_large_increase());
        assert!(!Signal::TurnedUnprofitable.is_large_decrease());
    }

    #[test]
    fn test_display() {
        let s = Signal::LargeIncrease {
            metric: Metric::OperatingProfit,
            change: 45.32,
        };
        assert_eq!(s.to_string(), "operating profit large increase (+45.3%)");

        let s = Signal::LargeDecrease {
            metric: Metric::NetSales,
            change: -31.0,
        };
        assert_eq!(s.to_string(), "net sales large decrease (-31.0%)");

        let s = Signal::RecordOperatingProfit {
            period_type: PeriodType::Q2,
        };
        assert_eq!(s.to_string(), "record operating profit for 2Q");
        assert_eq!(Signal::TurnedProfitable.to_string(), "turned profitable");
    }

    #[test]
    fn test_serde_tagged() {
        let json = serde_json::to_string(&Signal::TurnedUnprofitable).unwrap();
        assert_eq!(json, r#"{"kind":"turned_unprofitable"}"#);

        let s = Signal::LargeIncrease {
            metric: Metric::NetProfit,
            change: 50.0,
        };
        let back: Signal = serde_json::from_str(&serde_json::to_string(&s).unwrap()).unwrap();
        assert_eq!(back, s);
    }
}
