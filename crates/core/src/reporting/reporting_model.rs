//! Investor-facing report payloads.
//!
//! Every numeric field is a fixed two-decimal string ready for direct
//! display and every date is a `YYYY-MM-DD` string. An empty input series
//! produces `"0.00"` fields and empty collections, never nulls.

use serde::{Deserialize, Serialize};

use crate::performance::{CurvePoint, PeriodEntry, TrailingReturnSet, YearPnl};
use crate::utils::decimal_utils::display_amount;

/// One plotted point, display formatted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportPoint {
    pub date: String,
    pub value: String,
}

impl From<&CurvePoint> for ReportPoint {
    fn from(point: &CurvePoint) -> Self {
        Self {
            date: point.date.to_string(),
            value: display_amount(point.value),
        }
    }
}

/// One capital movement in the report's cash-flow table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CashFlowEntry {
    pub date: String,
    pub amount: String,
}

/// Trailing returns and drawdown, display formatted. `None` still means
/// insufficient history; the presentation layer renders it as a dash.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrailingReturnsReport {
    #[serde(rename = "10D")]
    pub ten_days: Option<String>,
    #[serde(rename = "1M")]
    pub one_month: Option<String>,
    #[serde(rename = "3M")]
    pub three_months: Option<String>,
    #[serde(rename = "6M")]
    pub six_months: Option<String>,
    #[serde(rename = "1Y")]
    pub one_year: Option<String>,
    #[serde(rename = "2Y")]
    pub two_years: Option<String>,
    #[serde(rename = "5Y")]
    pub five_years: Option<String>,
    pub since_inception: Option<String>,
    pub max_drawdown: Option<String>,
    pub current_drawdown: Option<String>,
}

impl TrailingReturnsReport {
    pub fn empty() -> Self {
        Self {
            ten_days: None,
            one_month: None,
            three_months: None,
            six_months: None,
            one_year: None,
            two_years: None,
            five_years: None,
            since_inception: None,
            max_drawdown: None,
            current_drawdown: None,
        }
    }
}

impl From<&TrailingReturnSet> for TrailingReturnsReport {
    fn from(set: &TrailingReturnSet) -> Self {
        Self {
            ten_days: set.ten_days.map(display_amount),
            one_month: set.one_month.map(display_amount),
            three_months: set.three_months.map(display_amount),
            six_months: set.six_months.map(display_amount),
            one_year: set.one_year.map(display_amount),
            two_years: set.two_years.map(display_amount),
            five_years: set.five_years.map(display_amount),
            since_inception: set.since_inception.map(display_amount),
            max_drawdown: set.max_drawdown.map(display_amount),
            current_drawdown: set.current_drawdown.map(display_amount),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodEntryReport {
    pub label: String,
    pub percent_return: String,
    pub cash_pnl: String,
    pub capital_in_out: String,
}

impl From<&PeriodEntry> for PeriodEntryReport {
    fn from(entry: &PeriodEntry) -> Self {
        Self {
            label: entry.label.clone(),
            percent_return: display_amount(entry.percent_return),
            cash_pnl: display_amount(entry.cash_pnl),
            capital_in_out: display_amount(entry.capital_in_out),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YearPnlReport {
    pub year: i32,
    pub entries: Vec<PeriodEntryReport>,
    pub total_percent: String,
    pub total_cash: String,
    pub total_capital_in_out: String,
}

impl From<&YearPnl> for YearPnlReport {
    fn from(year: &YearPnl) -> Self {
        Self {
            year: year.year,
            entries: year.entries.iter().map(PeriodEntryReport::from).collect(),
            total_percent: display_amount(year.total_percent),
            total_cash: display_amount(year.total_cash),
            total_capital_in_out: display_amount(year.total_capital_in_out),
        }
    }
}

/// The full report for one account, or for the consolidated "TOTAL" view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioReport {
    pub account_id: String,
    pub amount_deposited: String,
    pub current_value: String,
    pub return_percent: String,
    pub total_profit: String,
    pub trailing_returns: TrailingReturnsReport,
    pub drawdown: String,
    pub equity_curve: Vec<ReportPoint>,
    pub drawdown_curve: Vec<ReportPoint>,
    pub quarterly_pnl: Vec<YearPnlReport>,
    pub monthly_pnl: Vec<YearPnlReport>,
    pub cash_flows: Vec<CashFlowEntry>,
}

impl PortfolioReport {
    /// Fully-populated zero report for an empty input series, so the
    /// presentation layer renders an empty state without special-casing.
    pub fn zero(account_id: &str) -> Self {
        Self {
            account_id: account_id.to_string(),
            amount_deposited: "0.00".to_string(),
            current_value: "0.00".to_string(),
            return_percent: "0.00".to_string(),
            total_profit: "0.00".to_string(),
            trailing_returns: TrailingReturnsReport::empty(),
            drawdown: "0.00".to_string(),
            equity_curve: Vec::new(),
            drawdown_curve: Vec::new(),
            quarterly_pnl: Vec::new(),
            monthly_pnl: Vec::new(),
            cash_flows: Vec::new(),
        }
    }
}

/// Report scope, discriminated explicitly so callers branch on the tag
/// rather than probing the payload shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "scope", rename_all = "camelCase")]
pub enum InvestorReport {
    Single(PortfolioReport),
    Consolidated(ConsolidatedReport),
}

/// The "Total Portfolio" view plus the per-account reports it was built
/// from, each labeled by account id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsolidatedReport {
    pub total: PortfolioReport,
    pub accounts: Vec<PortfolioReport>,
}
