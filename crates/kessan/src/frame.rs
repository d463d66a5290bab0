//! Polars `DataFrame` export of score records and statements.

use chrono::{Datelike, NaiveDate};
use polars::prelude::*;

use kessan_core::{KessanError, Result, ScoreRecord, Statement};

/// Days from 0001-01-01 (CE) to 1970-01-01.
const UNIX_EPOCH_DAYS_FROM_CE: i32 = 719_163;

fn epoch_days(date: NaiveDate) -> i32 {
    date.num_days_from_ce() - UNIX_EPOCH_DAYS_FROM_CE
}

fn date_column(name: &str, days: Vec<Option<i32>>) -> Result<Column> {
    Column::new(name.into(), days)
        .cast(&DataType::Date)
        .map_err(|e| KessanError::Other(e.to_string()))
}

/// Builds a frame with one row per score record, in input order.
///
/// Columns: `code`, `disclosure_number`, `disclosed_date` (Date),
/// `period_type`, the four `yoy_*` changes, `qoq_acceleration`, the two flags
/// as `1`/`0`/`-1`, `total_score`, `category` and `signals` (labels joined
/// with `"; "`).
///
/// # Errors
/// Returns an error if polars rejects the columns.
pub fn scores_to_frame(records: &[ScoreRecord]) -> Result<DataFrame> {
    let codes: Vec<&str> = records.iter().map(|r| r.code.as_str()).collect();
    let disclosures: Vec<&str> = records
        .iter()
        .map(|r| r.disclosure_number.as_str())
        .collect();
    let dates: Vec<Option<i32>> = records
        .iter()
        .map(|r| Some(epoch_days(r.disclosed_date)))
        .collect();
    let periods: Vec<Option<&str>> = records
        .iter()
        .map(|r| r.period_type.map(|p| p.label()))
        .collect();
    let yoy_sales: Vec<Option<f64>> = records.iter().map(|r| r.yoy_sales_change).collect();
    let yoy_op: Vec<Option<f64>> = records
        .iter()
        .map(|r| r.yoy_operating_profit_change)
        .collect();
    let yoy_ord: Vec<Option<f64>> = records
        .iter()
        .map(|r| r.yoy_ordinary_profit_change)
        .collect();
    let yoy_np: Vec<Option<f64>> = records.iter().map(|r| r.yoy_net_profit_change).collect();
    let acceleration: Vec<Option<f64>> = records.iter().map(|r| r.qoq_acceleration).collect();
    let revisions: Vec<i32> = records
        .iter()
        .map(|r| i32::from(r.revision_flag.as_i8()))
        .collect();
    let turnarounds: Vec<i32> = records
        .iter()
        .map(|r| i32::from(r.turnaround_flag.as_i8()))
        .collect();
    let totals: Vec<f64> = records.iter().map(|r| r.total_score).collect();
    let categories: Vec<&str> = records.iter().map(|r| r.category.as_str()).collect();
    let signals: Vec<String> = records
        .iter()
        .map(|r| {
            r.signals
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join("; ")
        })
        .collect();

    DataFrame::new(vec![
        Column::new("code".into(), codes),
        Column::new("disclosure_number".into(), disclosures),
        date_column("disclosed_date", dates)?,
        Column::new("period_type".into(), periods),
        Column::new("yoy_sales_change".into(), yoy_sales),
        Column::new("yoy_operating_profit_change".into(), yoy_op),
        Column::new("yoy_ordinary_profit_change".into(), yoy_ord),
        Column::new("yoy_net_profit_change".into(), yoy_np),
        Column::new("qoq_acceleration".into(), acceleration),
        Column::new("revision_flag".into(), revisions),
        Column::new("turnaround_flag".into(), turnarounds),
        Column::new("total_score".into(), totals),
        Column::new("category".into(), categories),
        Column::new("signals".into(), signals),
    ])
    .map_err(|e| KessanError::Other(e.to_string()))
}

/// Builds a frame with one row per statement, in input order.
///
/// Date columns use the polars `Date` dtype; absent facts are nulls.
///
/// # Errors
/// Returns an error if polars rejects the columns.
pub fn statements_to_frame(statements: &[Statement]) -> Result<DataFrame> {
    let days = |f: fn(&Statement) -> Option<NaiveDate>| -> Vec<Option<i32>> {
        statements.iter().map(|s| f(s).map(epoch_days)).collect()
    };
    let facts = |f: fn(&Statement) -> Option<f64>| -> Vec<Option<f64>> {
        statements.iter().map(f).collect()
    };

    let codes: Vec<&str> = statements.iter().map(|s| s.code.as_str()).collect();
    let disclosures: Vec<&str> = statements
        .iter()
        .map(|s| s.disclosure_number.as_str())
        .collect();
    let document_types: Vec<&str> = statements
        .iter()
        .map(|s| s.document_type.as_str())
        .collect();
    let periods: Vec<Option<&str>> = statements
        .iter()
        .map(|s| s.period_type.map(|p| p.label()))
        .collect();

    DataFrame::new(vec![
        Column::new("code".into(), codes),
        Column::new("disclosure_number".into(), disclosures),
        date_column("disclosed_date", days(|s| Some(s.disclosed_date)))?,
        Column::new("document_type".into(), document_types),
        Column::new("period_type".into(), periods),
        date_column("fiscal_year_end", days(|s| s.fiscal_year_end))?,
        date_column("period_end", days(|s| s.period_end))?,
        Column::new("net_sales".into(), facts(|s| s.net_sales)),
        Column::new("operating_profit".into(), facts(|s| s.operating_profit)),
        Column::new("ordinary_profit".into(), facts(|s| s.ordinary_profit)),
        Column::new("net_profit".into(), facts(|s| s.net_profit)),
        Column::new("earnings_per_share".into(), facts(|s| s.earnings_per_share)),
        Column::new("forecast_net_sales".into(), facts(|s| s.forecast.net_sales)),
        Column::new(
            "forecast_operating_profit".into(),
            facts(|s| s.forecast.operating_profit),
        ),
        Column::new("forecast_net_profit".into(), facts(|s| s.forecast.net_profit)),
    ])
    .map_err(|e| KessanError::Other(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use kessan_core::{Category, Direction, Metric, PeriodType, Signal};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_epoch_days() {
        assert_eq!(epoch_days(date(1970, 1, 1)), 0);
        assert_eq!(epoch_days(date(1970, 1, 2)), 1);
        assert_eq!(epoch_days(date(1969, 12, 31)), -1);
    }

    #[test]
    fn test_scores_to_frame() {
        let records = vec![
            ScoreRecord {
                code: "7974".into(),
                disclosure_number: "1".into(),
                disclosed_date: date(2025, 11, 4),
                period_type: Some(PeriodType::Q2),
                yoy_operating_profit_change: Some(33.3),
                revision_flag: Direction::Up,
                total_score: 81.2,
                category: Category::Attention,
                signals: vec![Signal::LargeIncrease {
                    metric: Metric::OperatingProfit,
                    change: 33.3,
                }],
                ..Default::default()
            },
            ScoreRecord {
                code: "6758".into(),
                disclosure_number: "2".into(),
                disclosed_date: date(2025, 11, 4),
                total_score: 50.0,
                category: Category::Review,
                ..Default::default()
            },
        ];

        let df = scores_to_frame(&records).unwrap();
        assert_eq!(df.height(), 2);
        assert_eq!(df.width(), 14);
        assert_eq!(df.column("disclosed_date").unwrap().dtype(), &DataType::Date);
        assert_eq!(df.column("revision_flag").unwrap().dtype(), &DataType::Int32);
        assert_eq!(df.column("period_type").unwrap().null_count(), 1);
        assert_eq!(df.column("yoy_sales_change").unwrap().null_count(), 2);
    }

    #[test]
    fn test_statements_to_frame() {
        let mut statement = Statement::new(
            "7974",
            "1",
            date(2025, 11, 4),
            "2QFinancialStatements_Consolidated_JP",
        )
        .with_period(PeriodType::Q2, date(2026, 3, 31))
        .with_results(Some(110.0), Some(24.0), None, Some(16.0));
        statement.forecast.net_sales = Some(450.0);

        let df = statements_to_frame(&[statement, Statement::default()]).unwrap();
        assert_eq!(df.height(), 2);
        assert_eq!(df.column("fiscal_year_end").unwrap().dtype(), &DataType::Date);
        assert_eq!(df.column("period_end").unwrap().null_count(), 2);
        assert_eq!(df.column("ordinary_profit").unwrap().null_count(), 2);
        assert_eq!(df.column("net_sales").unwrap().null_count(), 1);
    }

    #[test]
    fn test_empty_frames() {
        assert_eq!(scores_to_frame(&[]).unwrap().height(), 0);
        assert_eq!(statements_to_frame(&[]).unwrap().height(), 0);
    }
}
