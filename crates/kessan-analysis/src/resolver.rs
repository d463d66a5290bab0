//! Canonical sequence resolution.
//!
//! A company's raw filings contain duplicates, corrections and non-earnings
//! documents. [`resolve`] keeps only genuine earnings statements, collapses
//! each `(fiscal-year end, period type)` pair to its latest filing, and orders
//! the survivors chronologically.

use chrono::NaiveDate;
use kessan_core::{DisclosureNumber, PeriodType, Statement};
use serde::Serialize;
use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use tracing::debug;

/// Deduplicated, chronologically ordered earnings statements for one company.
///
/// Ordered by fiscal-year end, then period rank. Each
/// `(fiscal-year end, period type)` pair appears at most once.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct CanonicalSequence {
    statements: Vec<Statement>,
}

impl CanonicalSequence {
    /// Returns the statements in canonical order.
    #[must_use]
    pub fn statements(&self) -> &[Statement] {
        &self.statements
    }

    /// Returns an iterator over the statements in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = &Statement> {
        self.statements.iter()
    }

    /// Returns the number of statements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.statements.len()
    }

    /// Returns true if there are no statements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    /// Returns the most recent statement.
    #[must_use]
    pub fn latest(&self) -> Option<&Statement> {
        self.statements.last()
    }

    /// Finds the canonical statement with the given disclosure number.
    #[must_use]
    pub fn find(&self, disclosure_number: &DisclosureNumber) -> Option<&Statement> {
        self.statements
            .iter()
            .find(|s| &s.disclosure_number == disclosure_number)
    }

    /// Consumes the sequence and returns the underlying vector.
    #[must_use]
    pub fn into_inner(self) -> Vec<Statement> {
        self.statements
    }
}

impl<'a> IntoIterator for &'a CanonicalSequence {
    type Item = &'a Statement;
    type IntoIter = std::slice::Iter<'a, Statement>;

    fn into_iter(self) -> Self::IntoIter {
        self.statements.iter()
    }
}

/// Resolves one company's raw statements into its canonical sequence.
///
/// Non-earnings documents (forecast and dividend revisions, anything
/// unclassified) are dropped. Within each `(fiscal-year end, period type)`
/// group the statement with the greatest disclosure number wins; disclosure
/// numbers compare lexically. On equal numbers the first one seen is kept.
///
/// Empty input yields an empty sequence.
#[must_use]
pub fn resolve<I>(statements: I) -> CanonicalSequence
where
    I: IntoIterator<Item = Statement>,
{
    // BTreeMap key order is the canonical order: missing dates and periods
    // sort first, matching the ascending sort on (fy_end, rank).
    let mut latest: BTreeMap<(Option<NaiveDate>, Option<PeriodType>), Statement> = BTreeMap::new();
    let mut total = 0usize;
    let mut earnings = 0usize;

    for statement in statements {
        total += 1;
        if !statement.kind.is_earnings() {
            continue;
        }
        earnings += 1;

        match latest.entry((statement.fiscal_year_end, statement.period_type)) {
            Entry::Vacant(slot) => {
                slot.insert(statement);
            }
            Entry::Occupied(mut slot) => {
                if statement.disclosure_number > slot.get().disclosure_number {
                    slot.insert(statement);
                }
            }
        }
    }

    let statements: Vec<Statement> = latest.into_values().collect();
    debug!(
        total,
        earnings,
        canonical = statements.len(),
        "Resolved canonical statement sequence"
    );

    CanonicalSequence { statements }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kessan_core::DocumentKind;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn filing(disc: &str, doc: &str, period: PeriodType, fy_end: NaiveDate) -> Statement {
        Statement::new("79740", disc, date(2025, 11, 4), doc).with_period(period, fy_end)
    }

    fn earnings(disc: &str, period: PeriodType, fy_end: NaiveDate) -> Statement {
        filing(
            disc,
            &format!("{}FinancialStatements_Consolidated_JP", period.label()),
            period,
            fy_end,
        )
    }

    #[test]
    fn test_empty_input() {
        let seq = resolve(Vec::new());
        assert!(seq.is_empty());
        assert!(seq.latest().is_none());
    }

    #[test]
    fn test_latest_disclosure_wins() {
        let fy = date(2026, 3, 31);
        let seq = resolve(vec![
            earnings("101", PeriodType::Q2, fy),
            earnings("100", PeriodType::Q2, fy),
        ]);
        assert_eq!(seq.len(), 1);
        assert_eq!(seq.statements()[0].disclosure_number.as_str(), "101");
    }

    #[test]
    fn test_revisions_excluded_regardless_of_identifier() {
        let fy = date(2026, 3, 31);
        let seq = resolve(vec![
            earnings("100", PeriodType::FullYear, fy),
            filing("99999999999999", "EarnForecastRevision", PeriodType::FullYear, fy),
            filing("99999999999998", "DivForecastRevision", PeriodType::FullYear, fy),
        ]);
        assert_eq!(seq.len(), 1);
        assert_eq!(seq.statements()[0].disclosure_number.as_str(), "100");
    }

    #[test]
    fn test_revision_only_period_is_absent() {
        let fy = date(2026, 3, 31);
        let seq = resolve(vec![filing(
            "500",
            "EarnForecastRevision",
            PeriodType::FullYear,
            fy,
        )]);
        assert!(seq.is_empty());
    }

    #[test]
    fn test_correction_replaces_original() {
        let fy = date(2026, 3, 31);
        let original = earnings("20251104000001", PeriodType::Q2, fy)
            .with_results(Some(100.0), Some(10.0), None, None);
        let corrected = filing(
            "20251120000001",
            "2QFinancialStatements_Consolidated_Japanese_CorrectedReport",
            PeriodType::Q2,
            fy,
        )
        .with_results(Some(999.0), Some(333.0), None, None);
        assert_eq!(corrected.kind, DocumentKind::EarningsCorrection);

        let seq = resolve(vec![original, corrected]);
        assert_eq!(seq.len(), 1);
        assert_eq!(seq.statements()[0].net_sales, Some(999.0));
    }

    #[test]
    fn test_chronological_order() {
        let fy25 = date(2025, 3, 31);
        let fy26 = date(2026, 3, 31);
        let seq = resolve(vec![
            earnings("6", PeriodType::Q1, fy26),
            earnings("5", PeriodType::FullYear, fy25),
            earnings("2", PeriodType::Q1, fy25),
            earnings("4", PeriodType::Q3, fy25),
            earnings("3", PeriodType::Q2, fy25),
        ]);
        let order: Vec<&str> = seq.iter().map(|s| s.disclosure_number.as_str()).collect();
        assert_eq!(order, vec!["2", "3", "4", "5", "6"]);
    }

    #[test]
    fn test_missing_period_metadata_sorts_first() {
        let fy = date(2026, 3, 31);
        let mut undated = earnings("9", PeriodType::Q1, fy);
        undated.fiscal_year_end = None;
        let seq = resolve(vec![earnings("1", PeriodType::Q1, fy), undated]);
        assert_eq!(seq.statements()[0].disclosure_number.as_str(), "9");
    }

    #[test]
    fn test_resolution_is_idempotent() {
        let fy25 = date(2025, 3, 31);
        let fy26 = date(2026, 3, 31);
        let raw = vec![
            earnings("200", PeriodType::Q2, fy26),
            earnings("150", PeriodType::Q2, fy26),
            filing("300", "EarnForecastRevision", PeriodType::FullYear, fy26),
            earnings("100", PeriodType::FullYear, fy25),
            earnings("120", PeriodType::Q1, fy26),
        ];
        let first = resolve(raw.clone());
        let second = resolve(raw);
        assert_eq!(first, second);

        let again = resolve(first.clone().into_inner());
        assert_eq!(again, first);
    }

    #[test]
    fn test_mixed_width_identifiers_compare_lexically() {
        // Fixed-width identifiers are assumed. With widths that differ the
        // lexically greater "99" beats the numerically greater "100".
        let fy = date(2026, 3, 31);
        let seq = resolve(vec![
            earnings("100", PeriodType::Q3, fy),
            earnings("99", PeriodType::Q3, fy),
        ]);
        assert_eq!(seq.statements()[0].disclosure_number.as_str(), "99");
    }

    #[test]
    fn test_fixed_width_identifiers_match_numeric_order() {
        let fy = date(2026, 3, 31);
        let ids = ["00000000000099", "00000000000100", "00000000000098"];
        let seq = resolve(ids.iter().map(|id| earnings(id, PeriodType::Q3, fy)));
        let winner: u64 = seq.statements()[0].disclosure_number.as_str().parse().unwrap();
        let numeric_max = ids.iter().map(|id| id.parse::<u64>().unwrap()).max().unwrap();
        assert_eq!(winner, numeric_max);
    }
}
