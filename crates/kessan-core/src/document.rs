//! Document classification.
//!
//! Disclosure feeds label each filing with a free-text document type such as
//! `3QFinancialStatements_Consolidated_IFRS` or `EarnForecastRevision`.
//! [`DocumentKind::classify`] turns that label into a closed enum once, at
//! ingestion, so resolution logic never matches on strings.

use serde::{Deserialize, Serialize};

/// Marker present in every genuine financial-statement filing.
const FINANCIAL_STATEMENTS_MARKER: &str = "FinancialStatements";
/// Marker present in corrected re-filings.
const CORRECTION_MARKER: &str = "Correct";
/// Marker for earnings forecast revisions.
const FORECAST_REVISION_MARKER: &str = "EarnForecastRevision";
/// Marker for dividend forecast revisions.
const DIVIDEND_REVISION_MARKER: &str = "DivForecastRevision";

/// Closed classification of a disclosure document.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    /// A genuine earnings statement with actual results.
    Earnings,
    /// A corrected re-filing of an earlier earnings statement.
    EarningsCorrection,
    /// A revision of the earnings forecast only.
    ForecastRevision,
    /// A revision of the dividend forecast only.
    DividendRevision,
    /// Anything else, including an empty label.
    #[default]
    Other,
}

impl DocumentKind {
    /// Classifies a free-text document type label.
    #[must_use]
    pub fn classify(label: &str) -> Self {
        if label.contains(FINANCIAL_STATEMENTS_MARKER) {
            if label.contains(CORRECTION_MARKER) {
                Self::EarningsCorrection
            } else {
                Self::Earnings
            }
        } else if label.contains(FORECAST_REVISION_MARKER) {
            Self::ForecastRevision
        } else if label.contains(DIVIDEND_REVISION_MARKER) {
            Self::DividendRevision
        } else {
            Self::Other
        }
    }

    /// Returns true if this document carries actual earnings results.
    ///
    /// Corrections count: they replace the original filing for the same period.
    #[must_use]
    pub const fn is_earnings(&self) -> bool {
        matches!(self, Self::Earnings | Self::EarningsCorrection)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_labels() {
        assert_eq!(
            DocumentKind::classify("3QFinancialStatements_Consolidated_IFRS"),
            DocumentKind::Earnings
        );
        assert_eq!(
            DocumentKind::classify("FYFinancialStatements_Consolidated_JP"),
            DocumentKind::Earnings
        );
        assert_eq!(
            DocumentKind::classify("2QFinancialStatements_Consolidated_Japanese_CorrectedReport"),
            DocumentKind::EarningsCorrection
        );
        assert_eq!(
            DocumentKind::classify("EarnForecastRevision"),
            DocumentKind::ForecastRevision
        );
        assert_eq!(
            DocumentKind::classify("DivForecastRevision"),
            DocumentKind::DividendRevision
        );
        assert_eq!(DocumentKind::classify(""), DocumentKind::Other);
        assert_eq!(DocumentKind::classify("REITFinancialForecast"), DocumentKind::Other);
    }

    #[test]
    fn test_is_earnings() {
        assert!(DocumentKind::Earnings.is_earnings());
        assert!(DocumentKind::EarningsCorrection.is_earnings());
        assert!(!DocumentKind::ForecastRevision.is_earnings());
        assert!(!DocumentKind::DividendRevision.is_earnings());
        assert!(!DocumentKind::Other.is_earnings());
    }

    #[test]
    fn test_corrected_forecast_revision_is_not_earnings() {
        let kind = DocumentKind::classify("EarnForecastRevision_CorrectedReport");
        assert_eq!(kind, DocumentKind::ForecastRevision);
        assert!(!kind.is_earnings());
    }
}
