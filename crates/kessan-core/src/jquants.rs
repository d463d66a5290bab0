//! Ingestion of J-Quants `/fins/summary` records.
//!
//! Rows arrive with short PascalCase keys and loosely typed values: numbers
//! may be JSON numbers or strings, and absent figures are empty strings.
//! [`RawStatement`] accepts that shape; converting it into a [`Statement`]
//! normalizes values and classifies the document type once.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};
use tracing::{debug, warn};

use crate::{
    document::DocumentKind,
    error::{KessanError, Result},
    period::PeriodType,
    types::{CompanyCode, DisclosureNumber, Forecast, Statement},
};

/// One raw row of the statements payload.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawStatement {
    /// Company code.
    #[serde(rename = "Code", default)]
    pub code: String,
    /// Disclosure date (`YYYY-MM-DD` or `YYYYMMDD`).
    #[serde(rename = "DiscDate", default)]
    pub disclosed_date: Option<String>,
    /// Disclosure time.
    #[serde(rename = "DiscTime", default)]
    pub disclosed_time: Option<String>,
    /// Disclosure number.
    #[serde(rename = "DiscNo", default)]
    pub disclosure_number: Option<String>,
    /// Document type label.
    #[serde(rename = "DocType", default)]
    pub document_type: Option<String>,
    /// Period type label (`1Q`, `2Q`, `3Q`, `FY`).
    #[serde(rename = "CurPerType", default)]
    pub period_type: Option<String>,
    /// Period start date.
    #[serde(rename = "CurPerSt", default)]
    pub period_start: Option<String>,
    /// Period end date.
    #[serde(rename = "CurPerEn", default)]
    pub period_end: Option<String>,
    /// Fiscal-year start date.
    #[serde(rename = "CurFYSt", default)]
    pub fiscal_year_start: Option<String>,
    /// Fiscal-year end date.
    #[serde(rename = "CurFYEn", default)]
    pub fiscal_year_end: Option<String>,

    /// Net sales.
    #[serde(rename = "Sales", default, deserialize_with = "lenient_f64")]
    pub net_sales: Option<f64>,
    /// Operating profit.
    #[serde(rename = "OP", default, deserialize_with = "lenient_f64")]
    pub operating_profit: Option<f64>,
    /// Ordinary profit.
    #[serde(rename = "OdP", default, deserialize_with = "lenient_f64")]
    pub ordinary_profit: Option<f64>,
    /// Net profit.
    #[serde(rename = "NP", default, deserialize_with = "lenient_f64")]
    pub net_profit: Option<f64>,
    /// Earnings per share.
    #[serde(rename = "EPS", default, deserialize_with = "lenient_f64")]
    pub earnings_per_share: Option<f64>,

    /// Total assets.
    #[serde(rename = "TA", default, deserialize_with = "lenient_f64")]
    pub total_assets: Option<f64>,
    /// Equity.
    #[serde(rename = "Eq", default, deserialize_with = "lenient_f64")]
    pub equity: Option<f64>,
    /// Equity-to-asset ratio.
    #[serde(rename = "EqAR", default, deserialize_with = "lenient_f64")]
    pub equity_to_asset_ratio: Option<f64>,
    /// Book value per share.
    #[serde(rename = "BPS", default, deserialize_with = "lenient_f64")]
    pub book_value_per_share: Option<f64>,

    /// Forecast net sales.
    #[serde(rename = "FSales", default, deserialize_with = "lenient_f64")]
    pub forecast_net_sales: Option<f64>,
    /// Forecast operating profit.
    #[serde(rename = "FOP", default, deserialize_with = "lenient_f64")]
    pub forecast_operating_profit: Option<f64>,
    /// Forecast ordinary profit.
    #[serde(rename = "FOdP", default, deserialize_with = "lenient_f64")]
    pub forecast_ordinary_profit: Option<f64>,
    /// Forecast net profit.
    #[serde(rename = "FNP", default, deserialize_with = "lenient_f64")]
    pub forecast_net_profit: Option<f64>,
    /// Forecast earnings per share.
    #[serde(rename = "FEPS", default, deserialize_with = "lenient_f64")]
    pub forecast_earnings_per_share: Option<f64>,

    /// Annual dividend per share (actual).
    #[serde(rename = "DivAnn", default, deserialize_with = "lenient_f64")]
    pub dividend_per_share_annual: Option<f64>,
}

impl TryFrom<RawStatement> for Statement {
    type Error = KessanError;

    fn try_from(raw: RawStatement) -> Result<Self> {
        let code = CompanyCode::new(raw.code);
        if code.is_empty() {
            return Err(KessanError::Parse("Missing company code".to_string()));
        }

        let disclosed_date = raw
            .disclosed_date
            .as_deref()
            .and_then(parse_date)
            .ok_or_else(|| KessanError::Parse(format!("Missing disclosure date for {code}")))?;

        let document_type = raw.document_type.unwrap_or_default();
        let period_type = raw
            .period_type
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .and_then(|s| s.parse::<PeriodType>().ok());

        Ok(Self {
            code,
            disclosure_number: DisclosureNumber::new(raw.disclosure_number.unwrap_or_default()),
            disclosed_date,
            disclosed_time: raw.disclosed_time.filter(|s| !s.is_empty()),
            kind: DocumentKind::classify(&document_type),
            document_type,
            period_type,
            fiscal_year_start: raw.fiscal_year_start.as_deref().and_then(parse_date),
            fiscal_year_end: raw.fiscal_year_end.as_deref().and_then(parse_date),
            period_start: raw.period_start.as_deref().and_then(parse_date),
            period_end: raw.period_end.as_deref().and_then(parse_date),
            net_sales: raw.net_sales,
            operating_profit: raw.operating_profit,
            ordinary_profit: raw.ordinary_profit,
            net_profit: raw.net_profit,
            earnings_per_share: raw.earnings_per_share,
            total_assets: raw.total_assets,
            equity: raw.equity,
            equity_to_asset_ratio: raw.equity_to_asset_ratio,
            book_value_per_share: raw.book_value_per_share,
            dividend_per_share_annual: raw.dividend_per_share_annual,
            forecast: Forecast {
                net_sales: raw.forecast_net_sales,
                operating_profit: raw.forecast_operating_profit,
                ordinary_profit: raw.forecast_ordinary_profit,
                net_profit: raw.forecast_net_profit,
                earnings_per_share: raw.forecast_earnings_per_share,
            },
        })
    }
}

/// Response envelope of the statements endpoint.
#[derive(Debug, Deserialize)]
struct StatementsResponse {
    #[serde(default)]
    data: Vec<RawStatement>,
}

/// Parses a `{"data": [...]}` statements payload.
///
/// Rows that cannot be converted (no company code or disclosure date) are
/// skipped with a warning.
///
/// # Errors
/// Returns [`KessanError::Parse`] if the payload is not valid JSON of the
/// expected shape.
pub fn parse_statements(json: &str) -> Result<Vec<Statement>> {
    let response: StatementsResponse =
        serde_json::from_str(json).map_err(|e| KessanError::Parse(e.to_string()))?;

    let total = response.data.len();
    let statements: Vec<Statement> = response
        .data
        .into_iter()
        .filter_map(|raw| match Statement::try_from(raw) {
            Ok(s) => Some(s),
            Err(e) => {
                warn!(error = %e, "Skipping statement row");
                None
            }
        })
        .collect();

    debug!("Parsed {}/{} statement rows", statements.len(), total);
    Ok(statements)
}

/// Parses `YYYY-MM-DD` or `YYYYMMDD`. Anything else is `None`.
#[must_use]
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let compact: String = s.trim().chars().filter(|c| *c != '-').collect();
    if compact.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(&compact, "%Y%m%d").ok()
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText {
    Number(f64),
    Text(String),
}

/// Accepts a JSON number, a numeric string, an empty string, or null.
fn lenient_f64<'de, D>(deserializer: D) -> std::result::Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = match Option::<NumberOrText>::deserialize(deserializer)? {
        Some(NumberOrText::Number(v)) => Some(v),
        Some(NumberOrText::Text(s)) => s.trim().parse::<f64>().ok(),
        None => None,
    };
    Ok(value.filter(|v| v.is_finite()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAYLOAD: &str = r#"{
        "data": [
            {
                "Code": "79740",
                "DiscDate": "2025-11-04",
                "DiscTime": "15:30:00",
                "DiscNo": "20251104512345",
                "DocType": "2QFinancialStatements_Consolidated_JP",
                "CurPerType": "2Q",
                "CurPerSt": "2025-04-01",
                "CurPerEn": "2025-09-30",
                "CurFYSt": "2025-04-01",
                "CurFYEn": "2026-03-31",
                "Sales": "1099000000000",
                "OP": 125000000000,
                "OdP": "",
                "NP": "-5000000",
                "FSales": "1900000000000",
                "DivAnn": ""
            },
            {
                "Code": "",
                "DiscDate": "2025-11-04"
            },
            {
                "Code": "67580",
                "DiscDate": "not-a-date"
            }
        ]
    }"#;

    #[test]
    fn test_parse_statements_payload() {
        let statements = parse_statements(PAYLOAD).unwrap();
        assert_eq!(statements.len(), 1);

        let s = &statements[0];
        assert_eq!(s.code.as_str(), "79740");
        assert_eq!(s.disclosure_number.as_str(), "20251104512345");
        assert_eq!(s.disclosed_date, NaiveDate::from_ymd_opt(2025, 11, 4).unwrap());
        assert_eq!(s.disclosed_time.as_deref(), Some("15:30:00"));
        assert_eq!(s.kind, DocumentKind::Earnings);
        assert_eq!(s.period_type, Some(PeriodType::Q2));
        assert_eq!(s.fiscal_year_end, NaiveDate::from_ymd_opt(2026, 3, 31));
        assert_eq!(s.net_sales, Some(1_099_000_000_000.0));
        assert_eq!(s.operating_profit, Some(125_000_000_000.0));
        assert_eq!(s.ordinary_profit, None);
        assert_eq!(s.net_profit, Some(-5_000_000.0));
        assert_eq!(s.forecast.net_sales, Some(1_900_000_000_000.0));
        assert_eq!(s.dividend_per_share_annual, None);
    }

    #[test]
    fn test_parse_statements_rejects_bad_json() {
        assert!(parse_statements("not json").is_err());
        assert!(parse_statements("{}").unwrap().is_empty());
    }

    #[test]
    fn test_parse_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2026, 3, 31);
        assert_eq!(parse_date("2026-03-31"), expected);
        assert_eq!(parse_date("20260331"), expected);
        assert_eq!(parse_date(""), None);
        assert_eq!(parse_date("2026/03/31"), None);
    }

    #[test]
    fn test_unknown_period_label_is_absent() {
        let raw = RawStatement {
            code: "1301".to_string(),
            disclosed_date: Some("20250514".to_string()),
            period_type: Some("5Q".to_string()),
            document_type: Some("EarnForecastRevision".to_string()),
            ..Default::default()
        };
        let s = Statement::try_from(raw).unwrap();
        assert_eq!(s.period_type, None);
        assert_eq!(s.kind, DocumentKind::ForecastRevision);
        assert_eq!(s.disclosure_number.as_str(), "");
    }
}
