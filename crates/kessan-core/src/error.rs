//! Error types for store and ingestion operations.
//!
//! This module defines [`KessanError`]. The scoring engine itself is total and
//! never produces one; errors only come from stores and from parsing raw
//! disclosure payloads.

use thiserror::Error;

/// Errors that can occur while loading, parsing, or persisting disclosures.
#[derive(Error, Debug)]
pub enum KessanError {
    /// Error interacting with a statement or score store.
    #[error("Store error: {0}")]
    Store(String),

    /// Error parsing a raw disclosure record.
    #[error("Parse error: {0}")]
    Parse(String),

    /// No statements exist for the requested company.
    #[error("Company not found: {0}")]
    CompanyNotFound(String),

    /// An invalid parameter was provided.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Any other error.
    #[error("{0}")]
    Other(String),
}

/// Result type alias using [`KessanError`].
pub type Result<T> = std::result::Result<T, KessanError>;
