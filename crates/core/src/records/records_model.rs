//! Daily record domain models.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A numeric field as delivered by a source feed. Some schemas send JSON
/// numbers, others send the same figure as a string ("103.4567").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    Number(Decimal),
    Text(String),
}

impl RawValue {
    /// Decimal content, if any. Empty or malformed text yields `None`.
    pub fn as_decimal(&self) -> Option<Decimal> {
        match self {
            RawValue::Number(value) => Some(*value),
            RawValue::Text(text) => text.trim().parse().ok(),
        }
    }
}

/// One raw daily row as fetched from a source schema, before normalization.
/// The field aliases cover the naming differences between feeds.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawDailyRecord {
    #[serde(alias = "navDate", alias = "valuationDate")]
    pub date: Option<String>,
    #[serde(alias = "navValue")]
    pub nav: Option<RawValue>,
    #[serde(alias = "totalValue")]
    pub portfolio_value: Option<RawValue>,
    #[serde(alias = "grossExposure")]
    pub exposure_value: Option<RawValue>,
    #[serde(alias = "netFlow")]
    pub cash_in_out: Option<RawValue>,
    #[serde(alias = "dayPnl")]
    pub pnl: Option<RawValue>,
    #[serde(alias = "drawdown")]
    pub drawdown_percent: Option<RawValue>,
}

/// Domain model for one account's state on one calendar date.
///
/// `None` means the source had no figure for that day. Return math skips
/// such records; it never substitutes zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyRecord {
    pub date: NaiveDate,
    pub nav: Option<Decimal>,
    pub portfolio_value: Option<Decimal>,
    pub exposure_value: Option<Decimal>,
    /// Signed capital movement on this date. Positive is a deposit,
    /// negative a withdrawal, zero a non-flow day.
    pub cash_in_out: Decimal,
    pub pnl: Option<Decimal>,
    pub drawdown_percent: Option<Decimal>,
}

impl DailyRecord {
    /// Synthetic reference point inserted one day before the first real
    /// record. Carries no cash flow or P&L so summations over the series
    /// are unaffected; only its NAV participates in return math.
    pub fn baseline_point(date: NaiveDate, nav: Decimal) -> Self {
        Self {
            date,
            nav: Some(nav),
            portfolio_value: None,
            exposure_value: None,
            cash_in_out: Decimal::ZERO,
            pnl: None,
            drawdown_percent: None,
        }
    }

    /// NAV usable as a basis for return math: non-null and strictly positive.
    pub fn positive_nav(&self) -> Option<Decimal> {
        self.nav.filter(|nav| nav.is_sign_positive() && !nav.is_zero())
    }
}
