//! SQLite-based store implementation.

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use kessan_core::{
    CompanyCode, DisclosureNumber, KessanError, Result, ScoreRecord, ScoreStore, Statement,
    StatementStore,
};
use rusqlite::{Connection, OptionalExtension, params};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};
use tracing::{debug, instrument};

fn store_err(e: impl std::fmt::Display) -> KessanError {
    KessanError::Store(e.to_string())
}

fn parse_err(e: impl std::fmt::Display) -> KessanError {
    KessanError::Parse(e.to_string())
}

/// SQLite-based store for statements and score records.
///
/// Each record is kept as a JSON document alongside the indexed columns the
/// store queries on, so the schema does not change when a record gains a
/// field.
#[derive(Debug)]
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Open (or create) a SQLite store at the given path.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or schema creation fails.
    pub fn new(path: impl AsRef<Path>) -> Result<Self> {
        let conn = Connection::open(path).map_err(store_err)?;
        Self::from_connection(conn)
    }

    /// Create an in-memory SQLite store.
    ///
    /// Useful for testing; data is lost when the store is dropped.
    ///
    /// # Errors
    /// Returns an error if schema creation fails.
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(store_err)?;
        Self::from_connection(conn)
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        let store = Self {
            conn: Mutex::new(conn),
        };
        store.initialize_schema()?;
        Ok(store)
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(store_err)
    }

    /// Initialize the database schema.
    fn initialize_schema(&self) -> Result<()> {
        let conn = self.lock()?;

        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS financial_statements (
                code TEXT NOT NULL,
                disclosure_number TEXT NOT NULL,
                disclosed_date TEXT NOT NULL,
                fiscal_year_end TEXT,
                period_type TEXT,
                period_end TEXT,
                data_json TEXT NOT NULL,
                updated_at TEXT NOT NULL,
                PRIMARY KEY (code, disclosure_number)
            );
            CREATE INDEX IF NOT EXISTS idx_statements_code
                ON financial_statements(code);
            CREATE INDEX IF NOT EXISTS idx_statements_disclosed_date
                ON financial_statements(disclosed_date);

            CREATE TABLE IF NOT EXISTS earnings_scores (
                code TEXT NOT NULL,
                disclosure_number TEXT NOT NULL,
                disclosed_date TEXT NOT NULL,
                total_score REAL NOT NULL,
                category TEXT NOT NULL,
                data_json TEXT NOT NULL,
                updated_at TEXT NOT NULL,
                PRIMARY KEY (code, disclosure_number)
            );
            CREATE INDEX IF NOT EXISTS idx_scores_disclosed_date
                ON earnings_scores(disclosed_date);",
        )
        .map_err(store_err)?;

        debug!("SQLite store schema initialized");
        Ok(())
    }

    fn read_statements(
        conn: &Connection,
        sql: &str,
        param: &str,
    ) -> Result<Vec<Statement>> {
        let mut stmt = conn.prepare(sql).map_err(store_err)?;
        let rows = stmt
            .query_map(params![param], |row| row.get::<_, String>(0))
            .map_err(store_err)?;

        let mut statements = Vec::new();
        for row in rows {
            let json = row.map_err(store_err)?;
            statements.push(serde_json::from_str(&json).map_err(parse_err)?);
        }
        Ok(statements)
    }
}

#[async_trait]
impl StatementStore for SqliteStore {
    #[instrument(skip(self), fields(code = %code))]
    async fn statements_for_company(&self, code: &CompanyCode) -> Result<Vec<Statement>> {
        let conn = self.lock()?;
        let statements = Self::read_statements(
            &conn,
            "SELECT data_json FROM financial_statements WHERE code = ?1",
            code.as_str(),
        )?;
        debug!("Found {} statements", statements.len());
        Ok(statements)
    }

    #[instrument(skip(self), fields(date = %date))]
    async fn statements_disclosed_on(&self, date: NaiveDate) -> Result<Vec<Statement>> {
        let conn = self.lock()?;
        let statements = Self::read_statements(
            &conn,
            "SELECT data_json FROM financial_statements WHERE disclosed_date = ?1",
            &date.to_string(),
        )?;
        debug!("Found {} statements", statements.len());
        Ok(statements)
    }

    #[instrument(skip(self, statements), fields(count = statements.len()))]
    async fn put_statements(&self, statements: &[Statement]) -> Result<usize> {
        let mut conn = self.lock()?;
        let updated_at = Utc::now().to_rfc3339();

        let tx = conn.transaction().map_err(store_err)?;
        {
            let mut stmt = tx
                .prepare(
                    "INSERT OR REPLACE INTO financial_statements
                     (code, disclosure_number, disclosed_date, fiscal_year_end, period_type,
                      period_end, data_json, updated_at)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                )
                .map_err(store_err)?;

            for statement in statements {
                let json = serde_json::to_string(statement).map_err(parse_err)?;
                stmt.execute(params![
                    statement.code.as_str(),
                    statement.disclosure_number.as_str(),
                    statement.disclosed_date.to_string(),
                    statement.fiscal_year_end.map(|d| d.to_string()),
                    statement.period_type.map(|p| p.label()),
                    statement.period_end.map(|d| d.to_string()),
                    json,
                    updated_at,
                ])
                .map_err(store_err)?;
            }
        }
        tx.commit().map_err(store_err)?;

        debug!("Stored {} statements", statements.len());
        Ok(statements.len())
    }

    #[instrument(skip(self))]
    async fn clear_statements(&self) -> Result<()> {
        let conn = self.lock()?;
        conn.execute("DELETE FROM financial_statements", [])
            .map_err(store_err)?;
        debug!("Cleared all statements");
        Ok(())
    }
}

#[async_trait]
impl ScoreStore for SqliteStore {
    #[instrument(skip(self, record), fields(code = %record.code, disclosure = %record.disclosure_number))]
    async fn upsert_score(&self, record: &ScoreRecord) -> Result<()> {
        let json = serde_json::to_string(record).map_err(parse_err)?;
        let updated_at = Utc::now().to_rfc3339();

        let conn = self.lock()?;
        conn.execute(
            "INSERT OR REPLACE INTO earnings_scores
             (code, disclosure_number, disclosed_date, total_score, category, data_json, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                record.code.as_str(),
                record.disclosure_number.as_str(),
                record.disclosed_date.to_string(),
                record.total_score,
                record.category.as_str(),
                json,
                updated_at,
            ],
        )
        .map_err(store_err)?;

        debug!("Stored score record");
        Ok(())
    }

    #[instrument(skip(self), fields(code = %code, disclosure = %disclosure_number))]
    async fn get_score(
        &self,
        code: &CompanyCode,
        disclosure_number: &DisclosureNumber,
    ) -> Result<Option<ScoreRecord>> {
        let conn = self.lock()?;
        let json: Option<String> = conn
            .query_row(
                "SELECT data_json FROM earnings_scores
                 WHERE code = ?1 AND disclosure_number = ?2",
                params![code.as_str(), disclosure_number.as_str()],
                |row| row.get(0),
            )
            .optional()
            .map_err(store_err)?;

        json.map(|j| serde_json::from_str(&j).map_err(parse_err))
            .transpose()
    }

    #[instrument(skip(self), fields(date = %date))]
    async fn scores_disclosed_on(&self, date: NaiveDate) -> Result<Vec<ScoreRecord>> {
        let conn = self.lock()?;
        let mut stmt = conn
            .prepare(
                "SELECT data_json FROM earnings_scores
                 WHERE disclosed_date = ?1
                 ORDER BY total_score DESC, code ASC, disclosure_number ASC",
            )
            .map_err(store_err)?;
        let rows = stmt
            .query_map(params![date.to_string()], |row| row.get::<_, String>(0))
            .map_err(store_err)?;

        let mut records = Vec::new();
        for row in rows {
            let json = row.map_err(store_err)?;
            records.push(serde_json::from_str(&json).map_err(parse_err)?);
        }
        debug!("Found {} score records", records.len());
        Ok(records)
    }

    #[instrument(skip(self))]
    async fn clear_scores(&self) -> Result<()> {
        let conn = self.lock()?;
        conn.execute("DELETE FROM earnings_scores", [])
            .map_err(store_err)?;
        debug!("Cleared all score records");
        Ok(())
    }
}
