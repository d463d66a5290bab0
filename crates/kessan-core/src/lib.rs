#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/kessan/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Core types and store traits for earnings disclosure scoring.
//!
//! - [`Statement`](types::Statement) - One filed report for one period
//! - [`DocumentKind`](document::DocumentKind) - Closed document classification
//! - [`StatementStore`](store::StatementStore) - Raw statement collection
//! - [`ScoreStore`](store::ScoreStore) - Score record persistence
//! - [`parse_statements`](jquants::parse_statements) - J-Quants ingestion

/// Document type classification.
pub mod document;
/// Error types for store and ingestion operations.
pub mod error;
/// J-Quants statement ingestion.
pub mod jquants;
/// Reporting period definitions.
pub mod period;
/// Score record types.
pub mod score;
/// Qualitative signal types.
pub mod signal;
/// Statement and score store traits.
pub mod store;
/// Core data types (CompanyCode, Statement, etc.).
pub mod types;

// Re-export commonly used items at crate root
pub use document::DocumentKind;
pub use error::{KessanError, Result};
pub use jquants::{RawStatement, parse_statements};
pub use period::PeriodType;
pub use score::{ATTENTION_THRESHOLD, Category, Direction, REVIEW_THRESHOLD, ScoreRecord};
pub use signal::Signal;
pub use store::{ScoreStore, StatementStore};
pub use types::{CompanyCode, DisclosureNumber, Forecast, Metric, Statement};
