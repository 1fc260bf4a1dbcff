//! Multi-account consolidation.
//!
//! Currency figures sum across accounts. Percentage figures are never
//! averaged; they are re-derived downstream from the flow-adjusted unit
//! index this module synthesizes, so deposits and withdrawals do not
//! masquerade as performance.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::collections::BTreeSet;

use crate::constants::BASE_NAV;
use crate::performance::performance_model::AccountAggregate;
use crate::records::DailyRecord;

/// Synthesizes one combined daily series from several accounts' series.
///
/// Portfolio and exposure values are forward-filled per account across the
/// union of record dates, then summed; an account contributes nothing
/// before its first valued record. Cash flows and P&L are point events and
/// sum only on their own date. The combined NAV is a unit index starting
/// at 100 whose daily growth is `V_t / (V_{t-1} + flow_t)`, so the result
/// feeds the same return, period, and curve math as a single account.
pub fn combine_account_records(accounts: &[AccountAggregate]) -> Vec<DailyRecord> {
    let mut dates: BTreeSet<NaiveDate> = BTreeSet::new();
    for account in accounts {
        for record in &account.daily_records {
            dates.insert(record.date);
        }
    }
    if dates.is_empty() {
        return Vec::new();
    }

    let mut cursors = vec![0usize; accounts.len()];
    let mut filled_values: Vec<Option<Decimal>> = vec![None; accounts.len()];
    let mut filled_exposures: Vec<Option<Decimal>> = vec![None; accounts.len()];

    let mut combined = Vec::with_capacity(dates.len());
    let mut index = BASE_NAV;
    let mut prev_value: Option<Decimal> = None;

    for date in dates {
        let mut value_sum = Decimal::ZERO;
        let mut value_seen = false;
        let mut exposure_sum = Decimal::ZERO;
        let mut exposure_seen = false;
        let mut flow = Decimal::ZERO;
        let mut pnl_sum = Decimal::ZERO;
        let mut pnl_seen = false;

        for (i, account) in accounts.iter().enumerate() {
            let records = &account.daily_records;
            while cursors[i] < records.len() && records[cursors[i]].date <= date {
                let record = &records[cursors[i]];
                flow += record.cash_in_out;
                if let Some(pnl) = record.pnl {
                    pnl_sum += pnl;
                    pnl_seen = true;
                }
                if let Some(value) = record.portfolio_value {
                    filled_values[i] = Some(value);
                }
                if let Some(exposure) = record.exposure_value {
                    filled_exposures[i] = Some(exposure);
                }
                cursors[i] += 1;
            }
            if let Some(value) = filled_values[i] {
                value_sum += value;
                value_seen = true;
            }
            if let Some(exposure) = filled_exposures[i] {
                exposure_sum += exposure;
                exposure_seen = true;
            }
        }

        let day_value = value_seen.then_some(value_sum);
        if let (Some(previous), Some(current)) = (prev_value, day_value) {
            let denominator = previous + flow;
            let period_return = if denominator.is_zero() {
                Decimal::ZERO
            } else {
                current / denominator - Decimal::ONE
            };
            index *= Decimal::ONE + period_return;
        }
        if day_value.is_some() {
            prev_value = day_value;
        }

        combined.push(DailyRecord {
            date,
            nav: day_value.map(|_| index),
            portfolio_value: day_value,
            exposure_value: exposure_seen.then_some(exposure_sum),
            cash_in_out: flow,
            pnl: pnl_seen.then_some(pnl_sum),
            drawdown_percent: None,
        });
    }

    combined
}
