//! Period-over-period percentage changes.

use kessan_core::{Metric, Statement};
use serde::Serialize;

use crate::{
    matcher::{ComparisonKind, find_baseline},
    resolver::CanonicalSequence,
};

/// Percentage change reported when the previous value is zero and the
/// current value is not. A saturation convention, not a real percentage.
pub const ZERO_BASE_CHANGE: f64 = 100.0;

/// Signed percentage change from `previous` to `current`.
///
/// - `None` if either value is absent.
/// - With a zero base: `0.0` if `current` is also zero, otherwise
///   `±ZERO_BASE_CHANGE` following the sign of `current`.
/// - Otherwise `(current - previous) / |previous| * 100`, so a move up from a
///   negative base reads as positive.
#[must_use]
pub fn change_rate(current: Option<f64>, previous: Option<f64>) -> Option<f64> {
    let (current, previous) = (current?, previous?);
    if previous == 0.0 {
        return Some(if current == 0.0 {
            0.0
        } else if current > 0.0 {
            ZERO_BASE_CHANGE
        } else {
            -ZERO_BASE_CHANGE
        });
    }
    Some((current - previous) / previous.abs() * 100.0)
}

/// A statement compared with its baseline.
///
/// All changes are absent when there is no baseline.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Comparison {
    /// Kind of comparison.
    pub kind: ComparisonKind,
    /// The statement being compared.
    pub current: Statement,
    /// The baseline, if one was found.
    pub previous: Option<Statement>,
    /// Net sales change (%).
    pub net_sales: Option<f64>,
    /// Operating profit change (%).
    pub operating_profit: Option<f64>,
    /// Ordinary profit change (%).
    pub ordinary_profit: Option<f64>,
    /// Net profit change (%).
    pub net_profit: Option<f64>,
}

impl Comparison {
    /// Compares `current` against an already located `previous`.
    #[must_use]
    pub fn new(kind: ComparisonKind, current: &Statement, previous: Option<&Statement>) -> Self {
        let rate = |metric: Metric| {
            previous.and_then(|p| change_rate(current.metric(metric), p.metric(metric)))
        };
        Self {
            kind,
            net_sales: rate(Metric::NetSales),
            operating_profit: rate(Metric::OperatingProfit),
            ordinary_profit: rate(Metric::OrdinaryProfit),
            net_profit: rate(Metric::NetProfit),
            current: current.clone(),
            previous: previous.cloned(),
        }
    }

    /// Returns the change for one metric.
    #[must_use]
    pub const fn change(&self, metric: Metric) -> Option<f64> {
        match metric {
            Metric::NetSales => self.net_sales,
            Metric::OperatingProfit => self.operating_profit,
            Metric::OrdinaryProfit => self.ordinary_profit,
            Metric::NetProfit => self.net_profit,
        }
    }
}

/// Locates the baseline for `current` and compares against it.
#[must_use]
pub fn compare(sequence: &CanonicalSequence, current: &Statement, kind: ComparisonKind) -> Comparison {
    let previous = find_baseline(sequence, current, kind);
    Comparison::new(kind, current, previous)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::resolve;
    use chrono::NaiveDate;
    use kessan_core::PeriodType;

    fn approx(a: Option<f64>, b: f64) -> bool {
        a.is_some_and(|a| (a - b).abs() < 1e-9)
    }

    #[test]
    fn test_change_rate_edge_cases() {
        assert_eq!(change_rate(Some(0.0), Some(0.0)), Some(0.0));
        assert_eq!(change_rate(Some(5.0), Some(0.0)), Some(100.0));
        assert_eq!(change_rate(Some(-5.0), Some(0.0)), Some(-100.0));
        assert_eq!(change_rate(None, Some(5.0)), None);
        assert_eq!(change_rate(Some(5.0), None), None);
        assert_eq!(change_rate(None, None), None);
    }

    #[test]
    fn test_change_rate_normalizes_by_previous_magnitude() {
        assert!(approx(change_rate(Some(110.0), Some(100.0)), 10.0));
        assert!(approx(change_rate(Some(90.0), Some(-100.0)), 190.0));
        assert!(approx(change_rate(Some(-150.0), Some(-100.0)), -50.0));
        assert!(approx(change_rate(Some(-50.0), Some(100.0)), -150.0));
    }

    #[test]
    fn test_negative_zero_base_is_zero_base() {
        assert_eq!(change_rate(Some(3.0), Some(-0.0)), Some(100.0));
    }

    fn statement(disc: &str, year: i32, sales: Option<f64>, op: Option<f64>) -> Statement {
        Statement::new(
            "79740",
            disc,
            NaiveDate::from_ymd_opt(year - 1, 11, 4).unwrap(),
            "2QFinancialStatements_Consolidated_JP",
        )
        .with_period(PeriodType::Q2, NaiveDate::from_ymd_opt(year, 3, 31).unwrap())
        .with_results(sales, op, None, Some(1.0))
    }

    #[test]
    fn test_compare_with_baseline() {
        let seq = resolve(vec![
            statement("1", 2025, Some(100.0), Some(0.0)),
            statement("2", 2026, Some(125.0), None),
        ]);
        let current = seq.find(&"2".into()).unwrap();
        let cmp = compare(&seq, current, ComparisonKind::YearOverYear);

        assert_eq!(cmp.previous.as_ref().map(|p| p.disclosure_number.as_str()), Some("1"));
        assert!(approx(cmp.net_sales, 25.0));
        assert_eq!(cmp.operating_profit, None);
        assert_eq!(cmp.ordinary_profit, None);
        assert_eq!(cmp.change(Metric::NetProfit), Some(0.0));
    }

    #[test]
    fn test_compare_without_baseline() {
        let seq = resolve(vec![statement("1", 2025, Some(100.0), Some(10.0))]);
        let current = seq.latest().unwrap();
        let cmp = compare(&seq, current, ComparisonKind::QuarterOverQuarter);

        assert!(cmp.previous.is_none());
        for metric in Metric::ALL {
            assert_eq!(cmp.change(metric), None);
        }
    }
}
