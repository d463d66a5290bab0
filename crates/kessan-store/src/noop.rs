//! No-op store implementation.

use async_trait::async_trait;
use chrono::NaiveDate;
use kessan_core::{
    CompanyCode, DisclosureNumber, Result, ScoreRecord, ScoreStore, Statement, StatementStore,
};
use tracing::trace;

/// A store that holds nothing.
///
/// Reads return empty results and writes are discarded. Useful as a score
/// sink for dry runs that only need the returned records.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopStore;

impl NoopStore {
    /// Create a new no-op store.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait]
impl StatementStore for NoopStore {
    async fn statements_for_company(&self, _code: &CompanyCode) -> Result<Vec<Statement>> {
        trace!("NoopStore: statements_for_company called, returning nothing");
        Ok(Vec::new())
    }

    async fn statements_disclosed_on(&self, _date: NaiveDate) -> Result<Vec<Statement>> {
        trace!("NoopStore: statements_disclosed_on called, returning nothing");
        Ok(Vec::new())
    }

    async fn put_statements(&self, _statements: &[Statement]) -> Result<usize> {
        trace!("NoopStore: put_statements called, doing nothing");
        Ok(0)
    }

    async fn clear_statements(&self) -> Result<()> {
        trace!("NoopStore: clear_statements called, doing nothing");
        Ok(())
    }
}

#[async_trait]
impl ScoreStore for NoopStore {
    async fn upsert_score(&self, _record: &ScoreRecord) -> Result<()> {
        trace!("NoopStore: upsert_score called, doing nothing");
        Ok(())
    }

    async fn get_score(
        &self,
        _code: &CompanyCode,
        _disclosure_number: &DisclosureNumber,
    ) -> Result<Option<ScoreRecord>> {
        trace!("NoopStore: get_score called, returning None");
        Ok(None)
    }

    async fn scores_disclosed_on(&self, _date: NaiveDate) -> Result<Vec<ScoreRecord>> {
        trace!("NoopStore: scores_disclosed_on called, returning nothing");
        Ok(Vec::new())
    }

    async fn clear_scores(&self) -> Result<()> {
        trace!("NoopStore: clear_scores called, doing nothing");
        Ok(())
    }
}
