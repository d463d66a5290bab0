#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/kessan/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Earnings disclosure resolution, comparison and importance scoring.
//!
//! This crate re-exports the core types, the store implementations and the
//! pure analysis functions, and provides a [`ScoringEngine`] that scores
//! every statement disclosed on a date against its company's canonical
//! sequence.
//!
//! # Features
//!
//! - `sqlite` - SQLite-backed statement and score store
//! - `frame` - polars `DataFrame` export
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use kessan::{ScoringEngine, SqliteStore, parse_statements};
//! use chrono::NaiveDate;
//!
//! #[tokio::main]
//! async fn main() -> kessan::Result<()> {
//!     let store = Arc::new(SqliteStore::new("kessan.db")?);
//!     store.put_statements(&parse_statements(&payload)?).await?;
//!
//!     let engine = ScoringEngine::new(store.clone(), store);
//!     let date = NaiveDate::from_ymd_opt(2025, 11, 4).unwrap();
//!     for record in engine.score_all_for_date(date, None).await? {
//!         println!("{} {} {}", record.code, record.total_score, record.category);
//!     }
//!
//!     Ok(())
//! }
//! ```

// Core types and traits
pub use kessan_core::*;

// Analysis
pub use kessan_analysis::*;

// Store implementations
#[cfg(feature = "sqlite")]
pub use kessan_store::SqliteStore;
pub use kessan_store::{InMemoryStore, NoopStore};

mod engine;
pub use engine::{Progress, ScoringEngine};

mod repository;
pub use repository::StatementRepository;

/// Polars `DataFrame` export.
#[cfg(feature = "frame")]
pub mod frame;
