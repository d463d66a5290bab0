//! Scoring engine tying stores, resolution and scoring together.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{debug, info, instrument, warn};

use kessan_analysis::{CanonicalSequence, ScoringWeights, StatementAnalysis};
use kessan_core::{
    CompanyCode, DisclosureNumber, KessanError, Result, ScoreRecord, ScoreStore, Statement,
    StatementStore,
};

use crate::repository::StatementRepository;

/// Observer invoked with `(completed, total)` after each statement of a batch.
pub type Progress<'a> = &'a mut (dyn FnMut(usize, usize) + Send);

/// Scores statements against their company's canonical sequence and persists
/// the results.
///
/// The engine holds no state beyond its stores and weights. Two engines with
/// different weight profiles can share the same stores.
///
/// # Example
///
/// ```rust,ignore
/// use std::sync::Arc;
/// use kessan::{InMemoryStore, ScoringEngine, ScoringWeights};
///
/// let store = Arc::new(InMemoryStore::new());
/// let engine = ScoringEngine::new(store.clone(), store)
///     .with_weights(ScoringWeights::default().normalized());
///
/// let mut progress = |done, total| println!("{done}/{total}");
/// let records = engine.score_all_for_date(date, Some(&mut progress)).await?;
/// ```
#[derive(Clone)]
pub struct ScoringEngine {
    repository: StatementRepository,
    scores: Arc<dyn ScoreStore>,
    weights: ScoringWeights,
}

impl std::fmt::Debug for ScoringEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScoringEngine")
            .field("repository", &self.repository)
            .field("scores", &"configured")
            .field("weights", &self.weights)
            .finish()
    }
}

impl ScoringEngine {
    /// Create an engine with the default weight profile.
    #[must_use]
    pub fn new(statements: Arc<dyn StatementStore>, scores: Arc<dyn ScoreStore>) -> Self {
        Self {
            repository: StatementRepository::new(statements),
            scores,
            weights: ScoringWeights::default(),
        }
    }

    /// Set the weights used for scoring.
    ///
    /// Weights are used as given; normalize them first if they do not sum to 1.
    #[must_use]
    pub fn with_weights(mut self, weights: ScoringWeights) -> Self {
        self.weights = weights;
        self
    }

    /// Returns the weights used for scoring.
    #[must_use]
    pub const fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    /// Returns the statement repository.
    #[must_use]
    pub const fn repository(&self) -> &StatementRepository {
        &self.repository
    }

    /// Analyzes one of a company's statements.
    ///
    /// With `disclosure_number` set, the matching raw statement is analyzed
    /// even if it is not part of the canonical sequence. Without it, the
    /// latest canonical statement is analyzed. Returns `Ok(None)` when there
    /// is nothing to analyze.
    ///
    /// # Errors
    /// Returns [`KessanError::CompanyNotFound`] if the store holds no
    /// statements for `code`, and propagates store failures.
    #[instrument(skip(self), fields(code = %code))]
    pub async fn analyze(
        &self,
        code: &CompanyCode,
        disclosure_number: Option<&DisclosureNumber>,
    ) -> Result<Option<StatementAnalysis>> {
        let raw = self.repository.load(code).await?;
        if raw.is_empty() {
            return Err(KessanError::CompanyNotFound(code.to_string()));
        }

        let target = disclosure_number.and_then(|disc| {
            raw.iter()
                .find(|s| &s.disclosure_number == disc)
                .cloned()
        });
        let sequence = kessan_analysis::resolve(raw);

        let analysis = match (disclosure_number, target) {
            (Some(_), Some(target)) => Some(StatementAnalysis::compute(&sequence, &target)),
            (Some(disc), None) => {
                debug!(disclosure = %disc, "Disclosure not found");
                None
            }
            (None, _) => StatementAnalysis::latest(&sequence),
        };
        Ok(analysis)
    }

    /// Analyzes every statement disclosed on `date` without scoring or
    /// persisting.
    ///
    /// # Errors
    /// Propagates store failures.
    #[instrument(skip(self), fields(date = %date))]
    pub async fn analyze_for_date(&self, date: NaiveDate) -> Result<Vec<StatementAnalysis>> {
        let statements = self.disclosed_on(date).await?;
        let mut sequences = HashMap::new();
        let mut analyses = Vec::with_capacity(statements.len());

        for statement in &statements {
            let sequence = self.sequence_for(&mut sequences, &statement.code).await?;
            analyses.push(StatementAnalysis::compute(sequence, statement));
        }

        debug!("Analyzed {} statements", analyses.len());
        Ok(analyses)
    }

    /// Scores a statement against its company's canonical sequence.
    ///
    /// # Errors
    /// Propagates store failures.
    pub async fn score_statement(&self, statement: &Statement) -> Result<ScoreRecord> {
        let sequence = self.repository.load_canonical(&statement.code).await?;
        Ok(StatementAnalysis::compute(&sequence, statement).to_score_record(&self.weights))
    }

    /// Scores a statement and upserts the resulting record.
    ///
    /// # Errors
    /// Propagates store failures, including a failed upsert.
    #[instrument(skip(self, statement), fields(code = %statement.code, disclosure = %statement.disclosure_number))]
    pub async fn score_and_save(&self, statement: &Statement) -> Result<ScoreRecord> {
        let record = self.score_statement(statement).await?;
        self.scores.upsert_score(&record).await?;
        debug!(score = record.total_score, "Saved score record");
        Ok(record)
    }

    /// Scores and persists every statement disclosed on `date`.
    ///
    /// Each company's canonical sequence is resolved once and reused for all
    /// of its statements in the batch. A record whose upsert fails is logged
    /// and left out of the result; the batch carries on. Records are returned
    /// highest score first, ties in processing order.
    ///
    /// # Errors
    /// Propagates failures reading statements.
    #[instrument(skip(self, progress), fields(date = %date))]
    pub async fn score_all_for_date(
        &self,
        date: NaiveDate,
        mut progress: Option<Progress<'_>>,
    ) -> Result<Vec<ScoreRecord>> {
        let statements = self.disclosed_on(date).await?;
        let total = statements.len();
        info!(total, "Scoring disclosures");

        let mut sequences = HashMap::new();
        let mut records = Vec::with_capacity(total);

        for (i, statement) in statements.iter().enumerate() {
            let sequence = self.sequence_for(&mut sequences, &statement.code).await?;
            let record =
                StatementAnalysis::compute(sequence, statement).to_score_record(&self.weights);

            match self.scores.upsert_score(&record).await {
                Ok(()) => records.push(record),
                Err(e) => warn!(
                    code = %statement.code,
                    disclosure = %statement.disclosure_number,
                    error = %e,
                    "Failed to save score, skipping"
                ),
            }

            if let Some(callback) = progress.as_mut() {
                callback(i + 1, total);
            }
        }

        records.sort_by(|a, b| b.total_score.total_cmp(&a.total_score));
        info!(scored = records.len(), total, "Finished scoring disclosures");
        Ok(records)
    }

    /// Statements disclosed on `date`, in a stable processing order.
    async fn disclosed_on(&self, date: NaiveDate) -> Result<Vec<Statement>> {
        let mut statements = self.repository.store().statements_disclosed_on(date).await?;
        statements.sort_by(|a, b| {
            a.code
                .cmp(&b.code)
                .then_with(|| a.disclosure_number.cmp(&b.disclosure_number))
        });
        Ok(statements)
    }

    async fn sequence_for<'a>(
        &self,
        sequences: &'a mut HashMap<CompanyCode, CanonicalSequence>,
        code: &CompanyCode,
    ) -> Result<&'a CanonicalSequence> {
        let sequence = match sequences.entry(code.clone()) {
            Entry::Occupied(slot) => slot.into_mut(),
            Entry::Vacant(slot) => slot.insert(self.repository.load_canonical(code).await?),
        };
        Ok(&*sequence)
    }
}
