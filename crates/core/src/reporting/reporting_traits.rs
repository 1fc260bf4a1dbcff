//! Reporting service traits.

use async_trait::async_trait;
use chrono::NaiveDate;

use super::reporting_model::{InvestorReport, PortfolioReport};
use crate::benchmark::BenchmarkCurves;
use crate::errors::Result;
use crate::records::RawDailyRecord;
use crate::utils::time_utils::ReportRange;

/// Contract for the data-access collaborator that owns the raw daily rows.
///
/// The store handles querying, authorization, and row-level filtering; the
/// core receives whatever rows exist for an account it is allowed to see.
/// An account with no history yields an empty vector, not an error.
#[async_trait]
pub trait DailyRecordRepositoryTrait: Send + Sync {
    async fn get_daily_records(&self, account_id: &str) -> Result<Vec<RawDailyRecord>>;
}

/// Trait defining the contract for investor reporting operations.
#[async_trait]
pub trait ReportingServiceTrait: Send + Sync {
    /// Builds the full report for a single account.
    ///
    /// `range` narrows the displayed curves and cash-flow table; summary
    /// figures, trailing returns, and period tables always reflect the
    /// account's full history. `data_as_of` truncates the working series
    /// to records on or before the cutoff (inclusive).
    async fn get_account_report(
        &self,
        account_id: &str,
        range: Option<ReportRange>,
        data_as_of: Option<NaiveDate>,
    ) -> Result<PortfolioReport>;

    /// Builds the report across an investor's authorized accounts.
    ///
    /// A single account produces a `Single` report. Several accounts
    /// produce a `Consolidated` report whose "TOTAL" view is re-derived
    /// from the combined capital-weighted series, alongside the untouched
    /// per-account reports.
    async fn get_investor_report(
        &self,
        account_ids: &[String],
        range: Option<ReportRange>,
        data_as_of: Option<NaiveDate>,
    ) -> Result<InvestorReport>;

    /// Fetches and aligns benchmark curves for overlay on the portfolio
    /// charts. An empty upstream series yields empty curves.
    async fn get_benchmark_comparison(
        &self,
        benchmark_id: &str,
        align_start_to: Option<NaiveDate>,
        range: Option<ReportRange>,
    ) -> Result<BenchmarkCurves>;
}
