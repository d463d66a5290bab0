//! Store traits for statements and score records.
//!
//! This module defines [`StatementStore`] and [`ScoreStore`], the two
//! collaborators the scoring engine reads from and writes to. Implementations
//! can keep data in any backend (SQLite, in-memory, etc.).

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::{
    error::Result,
    score::ScoreRecord,
    types::{CompanyCode, DisclosureNumber, Statement},
};

/// Read/write access to raw disclosure statements.
///
/// Reads carry no ordering guarantee; the engine imposes its own order.
/// Implementations must return one company's statements as a consistent
/// snapshot.
#[async_trait]
pub trait StatementStore: Send + Sync {
    /// Retrieves every stored statement for a company, including duplicates,
    /// corrections and non-earnings filings.
    async fn statements_for_company(&self, code: &CompanyCode) -> Result<Vec<Statement>>;

    /// Retrieves every statement disclosed on `date`, across all companies.
    async fn statements_disclosed_on(&self, date: NaiveDate) -> Result<Vec<Statement>>;

    /// Upserts statements keyed by company code and disclosure number.
    ///
    /// Returns the number of statements written.
    async fn put_statements(&self, statements: &[Statement]) -> Result<usize>;

    /// Removes all stored statements.
    async fn clear_statements(&self) -> Result<()>;
}

/// Persistence for score records.
#[async_trait]
pub trait ScoreStore: Send + Sync {
    /// Inserts or overwrites the record keyed by its company code and
    /// disclosure number.
    async fn upsert_score(&self, record: &ScoreRecord) -> Result<()>;

    /// Retrieves a single score record.
    ///
    /// Returns `Ok(None)` if no record exists for the key.
    async fn get_score(
        &self,
        code: &CompanyCode,
        disclosure_number: &DisclosureNumber,
    ) -> Result<Option<ScoreRecord>>;

    /// Retrieves every score record for statements disclosed on `date`,
    /// highest score first.
    async fn scores_disclosed_on(&self, date: NaiveDate) -> Result<Vec<ScoreRecord>>;

    /// Removes all stored score records.
    async fn clear_scores(&self) -> Result<()>;
}
