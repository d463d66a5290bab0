//! Comparison baseline lookup under the fiscal calendar.

use kessan_core::{PeriodType, Statement};
use serde::{Deserialize, Serialize};

use crate::resolver::CanonicalSequence;

/// Kind of period-over-period comparison.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComparisonKind {
    /// Same period type, one fiscal year earlier.
    YearOverYear,
    /// Preceding period in the fiscal calendar.
    QuarterOverQuarter,
}

/// Finds the baseline statement for `target` in `sequence`.
#[must_use]
pub fn find_baseline<'a>(
    sequence: &'a CanonicalSequence,
    target: &Statement,
    kind: ComparisonKind,
) -> Option<&'a Statement> {
    match kind {
        ComparisonKind::YearOverYear => previous_year(sequence, target),
        ComparisonKind::QuarterOverQuarter => previous_quarter(sequence, target),
    }
}

/// Finds the same period type one fiscal year earlier.
///
/// Returns `None` if `target` lacks a fiscal-year end or period type, or if
/// no such statement exists. The first match in canonical order wins.
#[must_use]
pub fn previous_year<'a>(sequence: &'a CanonicalSequence, target: &Statement) -> Option<&'a Statement> {
    let year = target.fiscal_year()?;
    let period = target.period_type?;
    find_period(sequence, target, year - 1, period)
}

/// Finds the immediately preceding period.
///
/// `2Q`, `3Q` and `FY` look back one rank within the same fiscal year. `1Q`
/// has no earlier quarter in its own year, so the prior year's `FY` statement
/// stands in as its baseline.
#[must_use]
pub fn previous_quarter<'a>(
    sequence: &'a CanonicalSequence,
    target: &Statement,
) -> Option<&'a Statement> {
    let year = target.fiscal_year()?;
    let period = target.period_type?;
    match period.previous_in_year() {
        Some(previous) => find_period(sequence, target, year, previous),
        None => find_period(sequence, target, year - 1, PeriodType::FullYear),
    }
}

fn find_period<'a>(
    sequence: &'a CanonicalSequence,
    target: &Statement,
    fiscal_year: i32,
    period: PeriodType,
) -> Option<&'a Statement> {
    sequence.iter().find(|s| {
        s.fiscal_year() == Some(fiscal_year)
            && s.period_type == Some(period)
            && !s.is_same_filing(target)
    })
}
