//! Ordered access to a company's raw statements.

use std::sync::Arc;

use tracing::{debug, instrument};

use kessan_analysis::{CanonicalSequence, resolve};
use kessan_core::{CompanyCode, Result, Statement, StatementStore};

/// Loads statements from a [`StatementStore`] in a fixed order.
///
/// Stores make no ordering promise; the repository sorts by fiscal-year end,
/// then period end, then disclosure number, with missing dates first. The
/// sort is stable, so exact ties keep store order.
#[derive(Clone)]
pub struct StatementRepository {
    store: Arc<dyn StatementStore>,
}

impl std::fmt::Debug for StatementRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StatementRepository")
            .field("store", &"configured")
            .finish()
    }
}

impl StatementRepository {
    /// Create a repository over the given store.
    #[must_use]
    pub fn new(store: Arc<dyn StatementStore>) -> Self {
        Self { store }
    }

    /// Returns the underlying store.
    #[must_use]
    pub fn store(&self) -> &Arc<dyn StatementStore> {
        &self.store
    }

    /// Loads every raw statement for a company, ordered.
    ///
    /// # Errors
    /// Propagates store failures unchanged.
    #[instrument(skip(self), fields(code = %code))]
    pub async fn load(&self, code: &CompanyCode) -> Result<Vec<Statement>> {
        let mut statements = self.store.statements_for_company(code).await?;
        statements.sort_by(|a, b| {
            a.fiscal_year_end
                .cmp(&b.fiscal_year_end)
                .then_with(|| a.period_end.cmp(&b.period_end))
                .then_with(|| a.disclosure_number.cmp(&b.disclosure_number))
        });
        debug!("Loaded {} statements", statements.len());
        Ok(statements)
    }

    /// Loads a company's statements and resolves them into its canonical
    /// sequence.
    ///
    /// # Errors
    /// Propagates store failures unchanged.
    pub async fn load_canonical(&self, code: &CompanyCode) -> Result<CanonicalSequence> {
        Ok(resolve(self.load(code).await?))
    }
}
