//! Per-statement analysis bundle.

use kessan_core::{ScoreRecord, Signal, Statement};
use serde::Serialize;

use crate::{
    comparator::{Comparison, compare},
    matcher::ComparisonKind,
    resolver::CanonicalSequence,
    scorer::{Score, ScoringWeights, score},
    signals::detect_signals,
};

/// YoY and QoQ comparisons plus signals for one statement.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct StatementAnalysis {
    /// Year-over-year comparison.
    pub yoy: Comparison,
    /// Quarter-over-quarter comparison.
    pub qoq: Comparison,
    /// Signals derived from the YoY comparison and the sequence.
    pub signals: Vec<Signal>,
}

impl StatementAnalysis {
    /// Analyzes `target` against a company's canonical sequence.
    ///
    /// `target` need not belong to the sequence; baselines always do.
    #[must_use]
    pub fn compute(sequence: &CanonicalSequence, target: &Statement) -> Self {
        let yoy = compare(sequence, target, ComparisonKind::YearOverYear);
        let qoq = compare(sequence, target, ComparisonKind::QuarterOverQuarter);
        let signals = detect_signals(&yoy, sequence);
        Self { yoy, qoq, signals }
    }

    /// Analyzes the most recent statement of the sequence.
    ///
    /// Returns `None` for an empty sequence.
    #[must_use]
    pub fn latest(sequence: &CanonicalSequence) -> Option<Self> {
        sequence.latest().map(|target| Self::compute(sequence, target))
    }

    /// Returns the analyzed statement.
    #[must_use]
    pub const fn statement(&self) -> &Statement {
        &self.yoy.current
    }

    /// Scores this analysis.
    #[must_use]
    pub fn score(&self, weights: &ScoringWeights) -> Score {
        score(&self.yoy, &self.qoq, &self.signals, weights)
    }

    /// Scores this analysis and packages the result for persistence.
    #[must_use]
    pub fn to_score_record(&self, weights: &ScoringWeights) -> ScoreRecord {
        let result = self.score(weights);
        let statement = self.statement();
        ScoreRecord {
            code: statement.code.clone(),
            disclosure_number: statement.disclosure_number.clone(),
            disclosed_date: statement.disclosed_date,
            period_type: statement.period_type,
            yoy_sales_change: self.yoy.net_sales,
            yoy_operating_profit_change: self.yoy.operating_profit,
            yoy_ordinary_profit_change: self.yoy.ordinary_profit,
            yoy_net_profit_change: self.yoy.net_profit,
            qoq_acceleration: result.acceleration,
            revision_flag: result.revision_flag,
            turnaround_flag: result.turnaround_flag,
            total_score: result.total_score,
            category: result.category,
            signals: self.signals.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::resolve;
    use chrono::NaiveDate;
    use kessan_core::{Direction, Metric, PeriodType};

    fn statement(disc: &str, period: PeriodType, fy: i32, sales: f64, op: f64) -> Statement {
        Statement::new(
            "7974",
            disc,
            NaiveDate::from_ymd_opt(fy - 1, 11, 4).unwrap(),
            format!("{}FinancialStatements_Consolidated_JP", period.label()),
        )
        .with_period(period, NaiveDate::from_ymd_opt(fy, 3, 31).unwrap())
        .with_results(Some(sales), Some(op), None, None)
    }

    fn nintendo() -> CanonicalSequence {
        resolve(vec![
            statement("20240807000001", PeriodType::Q2, 2024, 95.0, 18.0),
            statement("20250801000001", PeriodType::Q1, 2025, 100.0, 20.0),
            statement("20251104000001", PeriodType::Q2, 2025, 110.0, 24.0),
        ])
    }

    #[test]
    fn test_second_quarter_scenario() {
        let seq = nintendo();
        let target = seq.find(&"20251104000001".into()).unwrap();
        let analysis = StatementAnalysis::compute(&seq, target);

        let yoy_sales = analysis.yoy.net_sales.unwrap();
        let yoy_op = analysis.yoy.operating_profit.unwrap();
        assert!((yoy_sales - 15.789_473_684).abs() < 1e-6);
        assert!((yoy_op - 33.333_333_333).abs() < 1e-6);

        let qoq_op = analysis.qoq.operating_profit.unwrap();
        assert!((qoq_op - 20.0).abs() < 1e-9);
        assert_eq!(
            analysis.qoq.previous.as_ref().and_then(|p| p.period_type),
            Some(PeriodType::Q1)
        );

        assert!(analysis.signals.iter().any(|s| matches!(
            s,
            Signal::LargeIncrease { metric: Metric::OperatingProfit, .. }
        )));
        assert!(!analysis.signals.iter().any(|s| matches!(
            s,
            Signal::LargeIncrease { metric: Metric::NetSales, .. }
        )));

        let result = analysis.score(&ScoringWeights::default());
        let accel = result.acceleration.unwrap();
        assert!((accel - (20.0 - 100.0 / 3.0)).abs() < 1e-6);
        assert!(result.sub_scores.qoq_acceleration < 0.5);
        assert_eq!(result.revision_flag, Direction::Up);
    }

    #[test]
    fn test_score_record_fields() {
        let seq = nintendo();
        let analysis = StatementAnalysis::latest(&seq).unwrap();
        let record = analysis.to_score_record(&ScoringWeights::default());

        assert_eq!(record.code.as_str(), "7974");
        assert_eq!(record.disclosure_number.as_str(), "20251104000001");
        assert_eq!(record.period_type, Some(PeriodType::Q2));
        assert_eq!(record.yoy_sales_change, analysis.yoy.net_sales);
        assert_eq!(record.yoy_ordinary_profit_change, None);
        assert_eq!(record.signals, analysis.signals);
        assert!((0.0..=100.0).contains(&record.total_score));
    }

    #[test]
    fn test_scoring_is_reproducible() {
        let seq = nintendo();
        let weights = ScoringWeights::default();
        let a = StatementAnalysis::latest(&seq).unwrap().to_score_record(&weights);
        let b = StatementAnalysis::latest(&seq).unwrap().to_score_record(&weights);
        assert_eq!(a, b);
    }

    #[test]
    fn test_latest_of_empty_sequence() {
        assert!(StatementAnalysis::latest(&CanonicalSequence::default()).is_none());
    }
}
