//! In-memory store implementation.

use async_trait::async_trait;
use chrono::NaiveDate;
use kessan_core::{
    CompanyCode, DisclosureNumber, Result, ScoreRecord, ScoreStore, Statement, StatementStore,
};
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::{debug, instrument};

/// Key shared by statements and score records.
type FilingKey = (CompanyCode, DisclosureNumber);

fn key_of(code: &CompanyCode, disclosure_number: &DisclosureNumber) -> FilingKey {
    (code.clone(), disclosure_number.clone())
}

/// Simple in-memory store for testing and development.
///
/// Data is stored in `RwLock`-protected `HashMap`s and is lost when the store
/// is dropped. Records are cloned on get/put operations.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    statements: RwLock<HashMap<FilingKey, Statement>>,
    scores: RwLock<HashMap<FilingKey, ScoreRecord>>,
}

impl InMemoryStore {
    /// Create a new empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-loaded with statements.
    #[must_use]
    pub fn with_statements(statements: impl IntoIterator<Item = Statement>) -> Self {
        let statements = statements
            .into_iter()
            .map(|s| (key_of(&s.code, &s.disclosure_number), s))
            .collect();
        Self {
            statements: RwLock::new(statements),
            scores: RwLock::default(),
        }
    }

    /// Returns the number of stored score records.
    pub async fn score_count(&self) -> usize {
        self.scores.read().await.len()
    }
}

#[async_trait]
impl StatementStore for InMemoryStore {
    #[instrument(skip(self), fields(code = %code))]
    async fn statements_for_company(&self, code: &CompanyCode) -> Result<Vec<Statement>> {
        let store = self.statements.read().await;
        let statements: Vec<Statement> = store
            .values()
            .filter(|s| &s.code == code)
            .cloned()
            .collect();
        debug!("Found {} statements", statements.len());
        Ok(statements)
    }

    #[instrument(skip(self), fields(date = %date))]
    async fn statements_disclosed_on(&self, date: NaiveDate) -> Result<Vec<Statement>> {
        let store = self.statements.read().await;
        let statements: Vec<Statement> = store
            .values()
            .filter(|s| s.disclosed_date == date)
            .cloned()
            .collect();
        debug!("Found {} statements", statements.len());
        Ok(statements)
    }

    #[instrument(skip(self, statements), fields(count = statements.len()))]
    async fn put_statements(&self, statements: &[Statement]) -> Result<usize> {
        let mut store = self.statements.write().await;
        for statement in statements {
            store.insert(
                key_of(&statement.code, &statement.disclosure_number),
                statement.clone(),
            );
        }
        debug!("Stored {} statements", statements.len());
        Ok(statements.len())
    }

    #[instrument(skip(self))]
    async fn clear_statements(&self) -> Result<()> {
        self.statements.write().await.clear();
        debug!("Cleared all statements");
        Ok(())
    }
}

#[async_trait]
impl ScoreStore for InMemoryStore {
    #[instrument(skip(self, record), fields(code = %record.code, disclosure = %record.disclosure_number))]
    async fn upsert_score(&self, record: &ScoreRecord) -> Result<()> {
        let mut store = self.scores.write().await;
        store.insert(
            key_of(&record.code, &record.disclosure_number),
            record.clone(),
        );
        debug!("Stored score record");
        Ok(())
    }

    #[instrument(skip(self), fields(code = %code, disclosure = %disclosure_number))]
    async fn get_score(
        &self,
        code: &CompanyCode,
        disclosure_number: &DisclosureNumber,
    ) -> Result<Option<ScoreRecord>> {
        let store = self.scores.read().await;
        Ok(store.get(&key_of(code, disclosure_number)).cloned())
    }

    #[instrument(skip(self), fields(date = %date))]
    async fn scores_disclosed_on(&self, date: NaiveDate) -> Result<Vec<ScoreRecord>> {
        let store = self.scores.read().await;
        let mut records: Vec<ScoreRecord> = store
            .values()
            .filter(|r| r.disclosed_date == date)
            .cloned()
            .collect();
        records.sort_by(|a, b| {
            b.total_score
                .total_cmp(&a.total_score)
                .then_with(|| a.code.cmp(&b.code))
                .then_with(|| a.disclosure_number.cmp(&b.disclosure_number))
        });
        Ok(records)
    }

    #[instrument(skip(self))]
    async fn clear_scores(&self) -> Result<()> {
        self.scores.write().await.clear();
        debug!("Cleared all score records");
        Ok(())
    }
}
