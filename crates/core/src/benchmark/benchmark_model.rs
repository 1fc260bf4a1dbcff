//! Benchmark comparison domain models.

use serde::{Deserialize, Serialize};

use crate::performance::CurvePoint;
use crate::records::RawValue;

/// One raw benchmark observation. Providers deliver either objects with a
/// value (or nav) field, or bare `[date, value]` pairs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawBenchmarkPoint {
    Entry {
        date: String,
        #[serde(alias = "nav")]
        value: RawValue,
    },
    Pair(String, RawValue),
}

impl RawBenchmarkPoint {
    pub fn date_str(&self) -> &str {
        match self {
            RawBenchmarkPoint::Entry { date, .. } => date,
            RawBenchmarkPoint::Pair(date, _) => date,
        }
    }

    pub fn raw_value(&self) -> &RawValue {
        match self {
            RawBenchmarkPoint::Entry { value, .. } => value,
            RawBenchmarkPoint::Pair(_, value) => value,
        }
    }
}

/// Benchmark curves aligned onto the portfolio's base-100 origin.
///
/// Both curves are empty collections, never absent, when the input series
/// is empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BenchmarkCurves {
    pub benchmark_equity_curve: Vec<CurvePoint>,
    pub benchmark_drawdown_curve: Vec<CurvePoint>,
}

impl BenchmarkCurves {
    pub fn empty() -> Self {
        Self {
            benchmark_equity_curve: Vec::new(),
            benchmark_drawdown_curve: Vec::new(),
        }
    }
}
