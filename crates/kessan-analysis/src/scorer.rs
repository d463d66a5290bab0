//! Composite importance scoring.
//!
//! Six sub-scores in `[0, 1]` are combined with caller-supplied weights,
//! scaled to `[0, 100]`, and bucketed into a [`Category`].

use kessan_core::{Category, Direction, KessanError, Result, Signal};
use serde::{Deserialize, Serialize};

use crate::comparator::Comparison;

/// Sigmoid steepness for year-over-year changes.
pub const YOY_STEEPNESS: f64 = 0.05;
/// Sigmoid steepness for quarter-over-quarter acceleration.
pub const ACCELERATION_STEEPNESS: f64 = 0.03;
/// Sub-score for an absent input.
pub const NEUTRAL_SCORE: f64 = 0.5;

/// Weights of the six sub-scores.
///
/// Weights are not required to sum to one; normalizing is the caller's job
/// (see [`ScoringWeights::normalized`]).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScoringWeights {
    /// Net sales YoY change.
    pub yoy_sales: f64,
    /// Operating profit YoY change.
    pub yoy_operating_income: f64,
    /// Net profit YoY change.
    pub yoy_profit: f64,
    /// Quarter-over-quarter acceleration.
    pub qoq_acceleration: f64,
    /// Large-move revision flag.
    pub revision_flag: f64,
    /// Profit/loss turnaround flag.
    pub turnaround_flag: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            yoy_sales: 0.15,
            yoy_operating_income: 0.25,
            yoy_profit: 0.20,
            qoq_acceleration: 0.15,
            revision_flag: 0.15,
            turnaround_flag: 0.10,
        }
    }
}

impl ScoringWeights {
    const fn as_array(&self) -> [f64; 6] {
        [
            self.yoy_sales,
            self.yoy_operating_income,
            self.yoy_profit,
            self.qoq_acceleration,
            self.revision_flag,
            self.turnaround_flag,
        ]
    }

    /// Returns the sum of all weights.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.as_array().iter().sum()
    }

    /// Returns a copy scaled so the weights sum to one.
    ///
    /// Weights summing to zero are returned unchanged.
    #[must_use]
    pub fn normalized(&self) -> Self {
        let total = self.total();
        if total == 0.0 {
            return *self;
        }
        Self {
            yoy_sales: self.yoy_sales / total,
            yoy_operating_income: self.yoy_operating_income / total,
            yoy_profit: self.yoy_profit / total,
            qoq_acceleration: self.qoq_acceleration / total,
            revision_flag: self.revision_flag / total,
            turnaround_flag: self.turnaround_flag / total,
        }
    }

    /// Checks that every weight is finite and non-negative.
    ///
    /// # Errors
    /// Returns [`KessanError::InvalidParameter`] naming the first bad weight.
    pub fn validate(&self) -> Result<()> {
        const NAMES: [&str; 6] = [
            "yoy_sales",
            "yoy_operating_income",
            "yoy_profit",
            "qoq_acceleration",
            "revision_flag",
            "turnaround_flag",
        ];
        for (name, weight) in NAMES.iter().zip(self.as_array()) {
            if !weight.is_finite() || weight < 0.0 {
                return Err(KessanError::InvalidParameter(format!(
                    "weight {name} must be finite and non-negative, got {weight}"
                )));
            }
        }
        Ok(())
    }
}

/// Logistic transform `1 / (1 + e^(-k·x))`; absent or NaN input maps to
/// `0.5`. Infinities saturate at `1.0` and `0.0`.
#[must_use]
pub fn sigmoid_score(value: Option<f64>, steepness: f64) -> f64 {
    match value {
        Some(x) if !x.is_nan() => 1.0 / (1.0 + (-steepness * x).exp()),
        _ => NEUTRAL_SCORE,
    }
}

/// Rounds to one decimal from the exact binary value, ties to even.
fn round_one_decimal(value: f64) -> f64 {
    format!("{value:.1}").parse().unwrap_or(value)
}

const fn direction_score(direction: Direction) -> f64 {
    match direction {
        Direction::Up => 1.0,
        Direction::Flat => NEUTRAL_SCORE,
        Direction::Down => 0.0,
    }
}

/// Revision direction from the first large-move signal in `signals`.
#[must_use]
pub fn revision_flag(signals: &[Signal]) -> Direction {
    signals
        .iter()
        .find_map(|s| {
            if s.is_large_increase() {
                Some(Direction::Up)
            } else if s.is_large_decrease() {
                Some(Direction::Down)
            } else {
                None
            }
        })
        .unwrap_or_default()
}

/// Turnaround direction from the first turnaround signal in `signals`.
#[must_use]
pub fn turnaround_flag(signals: &[Signal]) -> Direction {
    signals
        .iter()
        .find_map(|s| match s {
            Signal::TurnedProfitable => Some(Direction::Up),
            Signal::TurnedUnprofitable => Some(Direction::Down),
            _ => None,
        })
        .unwrap_or_default()
}

/// The six sub-scores, each in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct SubScores {
    /// Net sales YoY.
    pub yoy_sales: f64,
    /// Operating profit YoY.
    pub yoy_operating_income: f64,
    /// Net profit YoY.
    pub yoy_profit: f64,
    /// QoQ acceleration.
    pub qoq_acceleration: f64,
    /// Revision flag.
    pub revision_flag: f64,
    /// Turnaround flag.
    pub turnaround_flag: f64,
}

impl SubScores {
    /// Weighted sum of the sub-scores.
    #[must_use]
    pub fn weighted(&self, weights: &ScoringWeights) -> f64 {
        weights.yoy_sales * self.yoy_sales
            + weights.yoy_operating_income * self.yoy_operating_income
            + weights.yoy_profit * self.yoy_profit
            + weights.qoq_acceleration * self.qoq_acceleration
            + weights.revision_flag * self.revision_flag
            + weights.turnaround_flag * self.turnaround_flag
    }
}

/// Scoring outcome for one statement.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Score {
    /// Individual sub-scores.
    pub sub_scores: SubScores,
    /// QoQ operating profit change minus YoY operating profit change.
    pub acceleration: Option<f64>,
    /// Large-move direction.
    pub revision_flag: Direction,
    /// Turnaround direction.
    pub turnaround_flag: Direction,
    /// Composite in `[0, 100]`, rounded to one decimal.
    pub total_score: f64,
    /// Bucket of `total_score`.
    pub category: Category,
}

/// Scores a statement from its comparisons and signals.
///
/// Total for any input: absent and NaN values map to neutral sub-scores, the
/// scaled composite is rounded to one decimal (ties to even on the exact
/// value) and clamped to `[0, 100]`.
#[must_use]
pub fn score(
    yoy: &Comparison,
    qoq: &Comparison,
    signals: &[Signal],
    weights: &ScoringWeights,
) -> Score {
    let acceleration = match (qoq.operating_profit, yoy.operating_profit) {
        (Some(qoq_op), Some(yoy_op)) => Some(qoq_op - yoy_op).filter(|a| !a.is_nan()),
        _ => None,
    };
    let revision = revision_flag(signals);
    let turnaround = turnaround_flag(signals);

    let sub_scores = SubScores {
        yoy_sales: sigmoid_score(yoy.net_sales, YOY_STEEPNESS),
        yoy_operating_income: sigmoid_score(yoy.operating_profit, YOY_STEEPNESS),
        yoy_profit: sigmoid_score(yoy.net_profit, YOY_STEEPNESS),
        qoq_acceleration: sigmoid_score(acceleration, ACCELERATION_STEEPNESS),
        revision_flag: direction_score(revision),
        turnaround_flag: direction_score(turnaround),
    };

    let weighted = sub_scores.weighted(weights) * 100.0;
    let scaled = if weighted.is_nan() {
        NEUTRAL_SCORE * 100.0
    } else {
        round_one_decimal(weighted)
    };
    let total_score = scaled.clamp(0.0, 100.0);

    Score {
        sub_scores,
        acceleration,
        revision_flag: revision,
        turnaround_flag: turnaround,
        total_score,
        category: Category::from_score(total_score),
    }
}
