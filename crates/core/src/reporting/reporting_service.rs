//! Reporting service assembling investor-facing payloads.
//!
//! The service owns the pipeline from raw rows to display strings:
//! normalize, cut off at `data_as_of`, resolve the baseline, fan out to
//! the return/period/curve calculators, and consolidate across accounts
//! when the investor holds several. All computation is synchronous and
//! per-request; the only await points are the upstream fetches.

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use chrono_tz::Tz;
use log::debug;
use rust_decimal::Decimal;
use std::sync::Arc;

use super::reporting_model::{
    CashFlowEntry, ConsolidatedReport, InvestorReport, PortfolioReport, ReportPoint,
    TrailingReturnsReport, YearPnlReport,
};
use super::reporting_traits::{DailyRecordRepositoryTrait, ReportingServiceTrait};
use crate::benchmark::{align_benchmark, BenchmarkCurves, BenchmarkProviderTrait};
use crate::constants::CONSOLIDATED_ACCOUNT_ID;
use crate::errors::{Result, ValidationError};
use crate::performance::{
    aggregate_periods, build_drawdown_curve, build_equity_curve, calculate_trailing_returns,
    combine_account_records, resolve_baseline, AccountAggregate, AccountMetrics,
    PeriodGranularity,
};
use crate::records::{normalize_records, DailyRecord};
use crate::utils::decimal_utils::display_amount;
use crate::utils::time_utils::{
    reporting_date_from_utc, DateRange, ReportRange, DEFAULT_REPORTING_TZ,
};

/// Reporting-layer settings, constructor injected.
#[derive(Debug, Clone)]
pub struct ReportingConfig {
    /// Zone in which "today" and named periods are evaluated. This is the
    /// data source's reporting zone, never the client's local zone.
    pub reporting_timezone: Tz,
}

impl Default for ReportingConfig {
    fn default() -> Self {
        Self {
            reporting_timezone: DEFAULT_REPORTING_TZ,
        }
    }
}

#[derive(Clone)]
pub struct ReportingService {
    record_repository: Arc<dyn DailyRecordRepositoryTrait>,
    benchmark_provider: Arc<dyn BenchmarkProviderTrait>,
    config: ReportingConfig,
}

impl ReportingService {
    pub fn new(
        record_repository: Arc<dyn DailyRecordRepositoryTrait>,
        benchmark_provider: Arc<dyn BenchmarkProviderTrait>,
        config: ReportingConfig,
    ) -> Self {
        Self {
            record_repository,
            benchmark_provider,
            config,
        }
    }

    fn today(&self) -> NaiveDate {
        reporting_date_from_utc(Utc::now(), self.config.reporting_timezone)
    }

    fn resolve_range(&self, range: Option<&ReportRange>) -> Result<Option<DateRange>> {
        range.map(|r| r.resolve(self.today())).transpose()
    }

    async fn fetch_records(
        &self,
        account_id: &str,
        data_as_of: Option<NaiveDate>,
    ) -> Result<Vec<DailyRecord>> {
        let raw = self.record_repository.get_daily_records(account_id).await?;
        let mut records = normalize_records(account_id, &raw);
        if let Some(cutoff) = data_as_of {
            records.retain(|record| record.date <= cutoff);
        }
        Ok(records)
    }

    /// Runs the full analytics pipeline over one account's series.
    fn analyze_account(
        account_id: &str,
        records: Vec<DailyRecord>,
        display_range: Option<&DateRange>,
    ) -> AccountAggregate {
        let series = resolve_baseline(account_id, records.clone());
        let metrics = AccountMetrics {
            trailing: calculate_trailing_returns(account_id, &series.records),
            monthly_pnl: aggregate_periods(&series, PeriodGranularity::Monthly),
            quarterly_pnl: aggregate_periods(&series, PeriodGranularity::Quarterly),
            equity_curve: build_equity_curve(&series.records, display_range),
            drawdown_curve: build_drawdown_curve(&series.records, display_range),
        };
        AccountAggregate {
            account_id: account_id.to_string(),
            daily_records: records,
            metrics,
        }
    }

    fn report_from_aggregate(
        aggregate: &AccountAggregate,
        display_range: Option<&DateRange>,
    ) -> PortfolioReport {
        let records = &aggregate.daily_records;
        if records.is_empty() {
            debug!(
                "No records for account {}; returning zero report",
                aggregate.account_id
            );
            return PortfolioReport::zero(&aggregate.account_id);
        }

        // Summary figures always reflect the full working series; only the
        // curves and the flow table honor the displayed window.
        let amount_deposited: Decimal = records
            .iter()
            .map(|record| record.cash_in_out)
            .filter(|flow| flow.is_sign_positive())
            .sum();
        let total_profit: Decimal = records.iter().filter_map(|record| record.pnl).sum();
        let current_value = records
            .iter()
            .rev()
            .find_map(|record| record.portfolio_value)
            .unwrap_or(Decimal::ZERO);

        let trailing = &aggregate.metrics.trailing;
        let return_percent = trailing.since_inception.unwrap_or(Decimal::ZERO);
        let drawdown = trailing.max_drawdown.unwrap_or(Decimal::ZERO);

        let cash_flows = records
            .iter()
            .filter(|record| !record.cash_in_out.is_zero())
            .filter(|record| display_range.is_none_or(|range| range.contains(record.date)))
            .map(|record| CashFlowEntry {
                date: record.date.to_string(),
                amount: display_amount(record.cash_in_out),
            })
            .collect();

        PortfolioReport {
            account_id: aggregate.account_id.clone(),
            amount_deposited: display_amount(amount_deposited),
            current_value: display_amount(current_value),
            return_percent: display_amount(return_percent),
            total_profit: display_amount(total_profit),
            trailing_returns: TrailingReturnsReport::from(trailing),
            drawdown: display_amount(drawdown),
            equity_curve: aggregate
                .metrics
                .equity_curve
                .iter()
                .map(ReportPoint::from)
                .collect(),
            drawdown_curve: aggregate
                .metrics
                .drawdown_curve
                .iter()
                .map(ReportPoint::from)
                .collect(),
            quarterly_pnl: aggregate
                .metrics
                .quarterly_pnl
                .iter()
                .map(YearPnlReport::from)
                .collect(),
            monthly_pnl: aggregate
                .metrics
                .monthly_pnl
                .iter()
                .map(YearPnlReport::from)
                .collect(),
            cash_flows,
        }
    }
}

#[async_trait]
impl ReportingServiceTrait for ReportingService {
    async fn get_account_report(
        &self,
        account_id: &str,
        range: Option<ReportRange>,
        data_as_of: Option<NaiveDate>,
    ) -> Result<PortfolioReport> {
        debug!("Building report for account {}", account_id);
        let display_range = self.resolve_range(range.as_ref())?;
        let records = self.fetch_records(account_id, data_as_of).await?;
        let aggregate = Self::analyze_account(account_id, records, display_range.as_ref());
        Ok(Self::report_from_aggregate(
            &aggregate,
            display_range.as_ref(),
        ))
    }

    async fn get_investor_report(
        &self,
        account_ids: &[String],
        range: Option<ReportRange>,
        data_as_of: Option<NaiveDate>,
    ) -> Result<InvestorReport> {
        if account_ids.is_empty() {
            return Err(ValidationError::InvalidInput(
                "At least one account is required".to_string(),
            )
            .into());
        }

        let display_range = self.resolve_range(range.as_ref())?;

        if let [account_id] = account_ids {
            let records = self.fetch_records(account_id, data_as_of).await?;
            let aggregate = Self::analyze_account(account_id, records, display_range.as_ref());
            return Ok(InvestorReport::Single(Self::report_from_aggregate(
                &aggregate,
                display_range.as_ref(),
            )));
        }

        debug!(
            "Consolidating {} accounts into a {} view",
            account_ids.len(),
            CONSOLIDATED_ACCOUNT_ID
        );
        let fetches = account_ids
            .iter()
            .map(|account_id| self.fetch_records(account_id, data_as_of));
        let fetched = futures::future::join_all(fetches).await;

        let mut aggregates = Vec::with_capacity(account_ids.len());
        let mut account_reports = Vec::with_capacity(account_ids.len());
        for (account_id, records) in account_ids.iter().zip(fetched) {
            let aggregate = Self::analyze_account(account_id, records?, display_range.as_ref());
            account_reports.push(Self::report_from_aggregate(
                &aggregate,
                display_range.as_ref(),
            ));
            aggregates.push(aggregate);
        }

        let combined = combine_account_records(&aggregates);
        let total_aggregate = Self::analyze_account(
            CONSOLIDATED_ACCOUNT_ID,
            combined,
            display_range.as_ref(),
        );
        let total = Self::report_from_aggregate(&total_aggregate, display_range.as_ref());

        Ok(InvestorReport::Consolidated(ConsolidatedReport {
            total,
            accounts: account_reports,
        }))
    }

    async fn get_benchmark_comparison(
        &self,
        benchmark_id: &str,
        align_start_to: Option<NaiveDate>,
        range: Option<ReportRange>,
    ) -> Result<BenchmarkCurves> {
        let display_range = self.resolve_range(range.as_ref())?;
        let points = self
            .benchmark_provider
            .get_benchmark_series(benchmark_id)
            .await?;
        let mut curves = align_benchmark(benchmark_id, &points, align_start_to);
        if let Some(range) = display_range {
            curves
                .benchmark_equity_curve
                .retain(|point| range.contains(point.date));
            curves
                .benchmark_drawdown_curve
                .retain(|point| range.contains(point.date));
        }
        Ok(curves)
    }
}
