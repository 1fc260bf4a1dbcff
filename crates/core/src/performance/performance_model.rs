//! Performance analytics domain models.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::records::DailyRecord;

/// Fixed lookback windows for point-in-time trailing returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TrailingPeriod {
    #[serde(rename = "10D")]
    TenDays,
    #[serde(rename = "1M")]
    OneMonth,
    #[serde(rename = "3M")]
    ThreeMonths,
    #[serde(rename = "6M")]
    SixMonths,
    #[serde(rename = "1Y")]
    OneYear,
    #[serde(rename = "2Y")]
    TwoYears,
    #[serde(rename = "5Y")]
    FiveYears,
    #[serde(rename = "sinceInception")]
    SinceInception,
}

impl TrailingPeriod {
    pub const ALL: [TrailingPeriod; 8] = [
        TrailingPeriod::TenDays,
        TrailingPeriod::OneMonth,
        TrailingPeriod::ThreeMonths,
        TrailingPeriod::SixMonths,
        TrailingPeriod::OneYear,
        TrailingPeriod::TwoYears,
        TrailingPeriod::FiveYears,
        TrailingPeriod::SinceInception,
    ];

    /// Calendar-day lookback for the window. Months count as 30 days,
    /// years as 365. `SinceInception` has no fixed lookback.
    pub fn lookback_days(&self) -> Option<i64> {
        match self {
            TrailingPeriod::TenDays => Some(10),
            TrailingPeriod::OneMonth => Some(30),
            TrailingPeriod::ThreeMonths => Some(90),
            TrailingPeriod::SixMonths => Some(180),
            TrailingPeriod::OneYear => Some(365),
            TrailingPeriod::TwoYears => Some(730),
            TrailingPeriod::FiveYears => Some(1825),
            TrailingPeriod::SinceInception => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TrailingPeriod::TenDays => "10D",
            TrailingPeriod::OneMonth => "1M",
            TrailingPeriod::ThreeMonths => "3M",
            TrailingPeriod::SixMonths => "6M",
            TrailingPeriod::OneYear => "1Y",
            TrailingPeriod::TwoYears => "2Y",
            TrailingPeriod::FiveYears => "5Y",
            TrailingPeriod::SinceInception => "SinceInception",
        }
    }
}

/// Point-in-time returns over the fixed lookback windows, plus drawdown.
///
/// `None` means insufficient history for that window, never zero. Both
/// drawdown figures are percentages and never positive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrailingReturnSet {
    #[serde(rename = "10D")]
    pub ten_days: Option<Decimal>,
    #[serde(rename = "1M")]
    pub one_month: Option<Decimal>,
    #[serde(rename = "3M")]
    pub three_months: Option<Decimal>,
    #[serde(rename = "6M")]
    pub six_months: Option<Decimal>,
    #[serde(rename = "1Y")]
    pub one_year: Option<Decimal>,
    #[serde(rename = "2Y")]
    pub two_years: Option<Decimal>,
    #[serde(rename = "5Y")]
    pub five_years: Option<Decimal>,
    pub since_inception: Option<Decimal>,
    pub max_drawdown: Option<Decimal>,
    pub current_drawdown: Option<Decimal>,
}

impl TrailingReturnSet {
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

    pub fn get(&self, period: TrailingPeriod) -> Option<Decimal> {
        match period {
            TrailingPeriod::TenDays => self.ten_days,
            TrailingPeriod::OneMonth => self.one_month,
            TrailingPeriod::ThreeMonths => self.three_months,
            TrailingPeriod::SixMonths => self.six_months,
            TrailingPeriod::OneYear => self.one_year,
            TrailingPeriod::TwoYears => self.two_years,
            TrailingPeriod::FiveYears => self.five_years,
            TrailingPeriod::SinceInception => self.since_inception,
        }
    }

    pub fn set(&mut self, period: TrailingPeriod, value: Option<Decimal>) {
        match period {
            TrailingPeriod::TenDays => self.ten_days = value,
            TrailingPeriod::OneMonth => self.one_month = value,
            TrailingPeriod::ThreeMonths => self.three_months = value,
            TrailingPeriod::SixMonths => self.six_months = value,
            TrailingPeriod::OneYear => self.one_year = value,
            TrailingPeriod::TwoYears => self.two_years = value,
            TrailingPeriod::FiveYears => self.five_years = value,
            TrailingPeriod::SinceInception => self.since_inception = value,
        }
    }
}

/// Calendar bucketing scheme for the period P&L tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PeriodGranularity {
    Monthly,
    Quarterly,
}

/// One month or quarter row in a period P&L table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodEntry {
    /// "Jan".."Dec" for monthly tables, "Q1".."Q4" for quarterly.
    pub label: String,
    pub percent_return: Decimal,
    pub cash_pnl: Decimal,
    pub capital_in_out: Decimal,
}

/// One year of period P&L rows with compounded and summed rollups.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YearPnl {
    pub year: i32,
    pub entries: Vec<PeriodEntry>,
    /// Compounded product of the entry returns within the year, not a sum.
    pub total_percent: Decimal,
    pub total_cash: Decimal,
    pub total_capital_in_out: Decimal,
}

/// One plotted point of an equity or drawdown curve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurvePoint {
    pub date: NaiveDate,
    pub value: Decimal,
}

/// Everything derived from one account's daily series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountMetrics {
    pub trailing: TrailingReturnSet,
    pub monthly_pnl: Vec<YearPnl>,
    pub quarterly_pnl: Vec<YearPnl>,
    pub equity_curve: Vec<CurvePoint>,
    pub drawdown_curve: Vec<CurvePoint>,
}

impl AccountMetrics {
    pub fn empty() -> Self {
        Self {
            trailing: TrailingReturnSet::empty(),
            monthly_pnl: Vec::new(),
            quarterly_pnl: Vec::new(),
            equity_curve: Vec::new(),
            drawdown_curve: Vec::new(),
        }
    }
}

/// One account's series and derived metrics, the unit consumed by the
/// consolidation step. Built fresh per request and discarded afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountAggregate {
    pub account_id: String,
    pub daily_records: Vec<DailyRecord>,
    pub metrics: AccountMetrics,
}
