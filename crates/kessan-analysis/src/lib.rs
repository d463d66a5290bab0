#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/kessan/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Statement resolution, period comparison and importance scoring.
//!
//! Every function here is pure and synchronous. Callers load a company's raw
//! statements, [`resolve`] them once, and run any number of analyses against
//! the resulting [`CanonicalSequence`].

/// Per-statement analysis bundle.
pub mod analysis;
/// Percentage change computation.
pub mod comparator;
/// Comparison baseline lookup.
pub mod matcher;
/// Canonical sequence resolution.
pub mod resolver;
/// Composite scoring and weights.
pub mod scorer;
/// Qualitative signal detection.
pub mod signals;

pub use analysis::StatementAnalysis;
pub use comparator::{Comparison, ZERO_BASE_CHANGE, change_rate, compare};
pub use matcher::{ComparisonKind, find_baseline, previous_quarter, previous_year};
pub use resolver::{CanonicalSequence, resolve};
pub use scorer::{
    ACCELERATION_STEEPNESS, NEUTRAL_SCORE, Score, ScoringWeights, SubScores, YOY_STEEPNESS,
    revision_flag, score, sigmoid_score, turnaround_flag,
};
pub use signals::{LARGE_MOVE_THRESHOLD, detect_signals};
