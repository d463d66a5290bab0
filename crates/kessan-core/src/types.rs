//! Core data types for earnings disclosures.
//!
//! This module defines the fundamental data structures:
//!
//! - [`CompanyCode`] - Listed company code
//! - [`DisclosureNumber`] - Filing identifier used as a recency tie-break
//! - [`Metric`] - The four compared financial facts
//! - [`Forecast`] - Full-year forecast figures
//! - [`Statement`] - One filed report for one period

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{document::DocumentKind, period::PeriodType};

/// A listed company code (for example `"79740"`).
///
/// Codes are trimmed on creation; they are otherwise opaque.
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CompanyCode(String);

impl CompanyCode {
    /// Creates a new company code.
    #[must_use]
    pub fn new(s: impl Into<String>) -> Self {
        let s = s.into();
        Self(s.trim().to_string())
    }

    /// Returns the code as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if the code is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for CompanyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CompanyCode {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for CompanyCode {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

/// Opaque disclosure identifier.
///
/// Ordering is plain lexical string ordering. Feeds issue fixed-width numeric
/// identifiers, for which lexical order equals numeric order and a larger value
/// means "filed later". Identifiers of different widths do not compare
/// numerically (`"99" > "100"`); this is a known limitation kept as-is.
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DisclosureNumber(String);

impl DisclosureNumber {
    /// Creates a new disclosure number.
    #[must_use]
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DisclosureNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DisclosureNumber {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for DisclosureNumber {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

/// Financial facts compared between periods.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    /// Net sales (revenue).
    NetSales,
    /// Operating profit.
    OperatingProfit,
    /// Ordinary profit (operating profit plus non-operating items).
    OrdinaryProfit,
    /// Net profit attributable to owners.
    NetProfit,
}

impl Metric {
    /// All metrics in their fixed reporting order.
    pub const ALL: [Self; 4] = [
        Self::NetSales,
        Self::OperatingProfit,
        Self::OrdinaryProfit,
        Self::NetProfit,
    ];

    /// Returns a human-readable label.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::NetSales => "net sales",
            Self::OperatingProfit => "operating profit",
            Self::OrdinaryProfit => "ordinary profit",
            Self::NetProfit => "net profit",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Full-year forecast figures carried alongside a statement.
///
/// Not used by comparison or scoring.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Forecast {
    /// Forecast net sales.
    pub net_sales: Option<f64>,
    /// Forecast operating profit.
    pub operating_profit: Option<f64>,
    /// Forecast ordinary profit.
    pub ordinary_profit: Option<f64>,
    /// Forecast net profit.
    pub net_profit: Option<f64>,
    /// Forecast earnings per share.
    pub earnings_per_share: Option<f64>,
}

/// One filed report for one company covering one reporting period.
///
/// Every financial fact is optional: `None` means "not disclosed", which is
/// distinct from a disclosed zero.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Statement {
    /// Company code.
    pub code: CompanyCode,
    /// Disclosure identifier.
    pub disclosure_number: DisclosureNumber,
    /// Date the report was disclosed.
    pub disclosed_date: NaiveDate,
    /// Time of day the report was disclosed, as published.
    pub disclosed_time: Option<String>,
    /// Raw document type label, as published.
    pub document_type: String,
    /// Classification of `document_type`.
    pub kind: DocumentKind,
    /// Period covered by the report.
    pub period_type: Option<PeriodType>,

    // Temporal anchors
    /// First day of the fiscal year.
    pub fiscal_year_start: Option<NaiveDate>,
    /// Last day of the fiscal year; the primary axis for year alignment.
    pub fiscal_year_end: Option<NaiveDate>,
    /// First day of the reporting period.
    pub period_start: Option<NaiveDate>,
    /// Last day of the reporting period.
    pub period_end: Option<NaiveDate>,

    // Income statement
    /// Net sales.
    pub net_sales: Option<f64>,
    /// Operating profit.
    pub operating_profit: Option<f64>,
    /// Ordinary profit.
    pub ordinary_profit: Option<f64>,
    /// Net profit.
    pub net_profit: Option<f64>,
    /// Earnings per share.
    pub earnings_per_share: Option<f64>,

    // Balance sheet
    /// Total assets.
    pub total_assets: Option<f64>,
    /// Net assets (equity).
    pub equity: Option<f64>,
    /// Equity-to-asset ratio.
    pub equity_to_asset_ratio: Option<f64>,
    /// Book value per share.
    pub book_value_per_share: Option<f64>,

    // Dividends
    /// Annual dividend per share (actual).
    pub dividend_per_share_annual: Option<f64>,

    /// Full-year forecast figures.
    pub forecast: Forecast,
}

impl Statement {
    /// Creates a new statement with required fields.
    ///
    /// The document kind is derived from `document_type`.
    #[must_use]
    pub fn new(
        code: impl Into<CompanyCode>,
        disclosure_number: impl Into<DisclosureNumber>,
        disclosed_date: NaiveDate,
        document_type: impl Into<String>,
    ) -> Self {
        let document_type = document_type.into();
        Self {
            code: code.into(),
            disclosure_number: disclosure_number.into(),
            disclosed_date,
            kind: DocumentKind::classify(&document_type),
            document_type,
            ..Default::default()
        }
    }

    /// Sets the period type and fiscal-year end.
    #[must_use]
    pub fn with_period(mut self, period_type: PeriodType, fiscal_year_end: NaiveDate) -> Self {
        self.period_type = Some(period_type);
        self.fiscal_year_end = Some(fiscal_year_end);
        self
    }

    /// Sets the four compared financial facts.
    #[must_use]
    pub fn with_results(
        mut self,
        net_sales: Option<f64>,
        operating_profit: Option<f64>,
        ordinary_profit: Option<f64>,
        net_profit: Option<f64>,
    ) -> Self {
        self.net_sales = net_sales;
        self.operating_profit = operating_profit;
        self.ordinary_profit = ordinary_profit;
        self.net_profit = net_profit;
        self
    }

    /// Returns the value of a compared fact.
    #[must_use]
    pub const fn metric(&self, metric: Metric) -> Option<f64> {
        match metric {
            Metric::NetSales => self.net_sales,
            Metric::OperatingProfit => self.operating_profit,
            Metric::OrdinaryProfit => self.ordinary_profit,
            Metric::NetProfit => self.net_profit,
        }
    }

    /// Returns the calendar year of the fiscal-year end, if known.
    #[must_use]
    pub fn fiscal_year(&self) -> Option<i32> {
        use chrono::Datelike;
        self.fiscal_year_end.map(|d| d.year())
    }

    /// Returns true if this statement is the same filing as `other`.
    #[must_use]
    pub fn is_same_filing(&self, other: &Self) -> bool {
        self.code == other.code && self.disclosure_number == other.disclosure_number
    }
}
