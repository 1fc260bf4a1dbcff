//! Calendar month and quarter aggregation of the daily series.

use chrono::Datelike;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::constants::BASE_NAV;
use crate::performance::baseline::BaselinedSeries;
use crate::performance::performance_model::{PeriodEntry, PeriodGranularity, YearPnl};
use crate::records::DailyRecord;
use crate::utils::decimal_utils::truncate_display;
use crate::utils::time_utils::quarter_of_month;

const MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

struct Bucket {
    year: i32,
    index: u32,
    label: String,
    cash_pnl: Decimal,
    capital_in_out: Decimal,
    close_nav: Option<Decimal>,
}

impl Bucket {
    fn new(year: i32, index: u32, granularity: PeriodGranularity, record: &DailyRecord) -> Self {
        let label = match granularity {
            PeriodGranularity::Monthly => MONTH_LABELS[index as usize - 1].to_string(),
            PeriodGranularity::Quarterly => format!("Q{}", index),
        };
        let mut bucket = Self {
            year,
            index,
            label,
            cash_pnl: Decimal::ZERO,
            capital_in_out: Decimal::ZERO,
            close_nav: None,
        };
        bucket.absorb(record);
        bucket
    }

    fn absorb(&mut self, record: &DailyRecord) {
        if let Some(pnl) = record.pnl {
            self.cash_pnl += pnl;
        }
        self.capital_in_out += record.cash_in_out;
        if let Some(nav) = record.positive_nav() {
            self.close_nav = Some(nav);
        }
    }
}

/// Buckets the resolved series into calendar months or quarters.
///
/// Every bucket's percentage return is measured against the previous
/// bucket's closing NAV; the very first bucket is measured against the
/// synthetic 100 baseline when one was prepended, otherwise against the
/// series' first usable NAV. A bucket whose records carry no usable NAV
/// reports a zero return and leaves the checkpoint chain unchanged.
/// Calendar periods with no records at all are omitted, not zero-filled.
pub fn aggregate_periods(series: &BaselinedSeries, granularity: PeriodGranularity) -> Vec<YearPnl> {
    let mut records = series.records.as_slice();
    let prev_nav = if series.has_synthetic_baseline {
        // The synthetic point seeds the first bucket's basis; it is never
        // a bucket of its own.
        records = &records[1..];
        Some(BASE_NAV)
    } else {
        records.iter().find_map(|record| record.positive_nav())
    };

    let buckets = collect_buckets(records, granularity);
    let mut years = chain_returns(buckets, prev_nav);
    rollup_years(&mut years);
    years
}

fn collect_buckets(records: &[DailyRecord], granularity: PeriodGranularity) -> Vec<Bucket> {
    let mut buckets: Vec<Bucket> = Vec::new();
    for record in records {
        let year = record.date.year();
        let index = match granularity {
            PeriodGranularity::Monthly => record.date.month(),
            PeriodGranularity::Quarterly => quarter_of_month(record.date.month()),
        };
        match buckets.last_mut() {
            Some(bucket) if bucket.year == year && bucket.index == index => bucket.absorb(record),
            _ => buckets.push(Bucket::new(year, index, granularity, record)),
        }
    }
    buckets
}

fn chain_returns(buckets: Vec<Bucket>, mut prev_nav: Option<Decimal>) -> Vec<YearPnl> {
    let mut years: Vec<YearPnl> = Vec::new();
    for bucket in buckets {
        let percent_return = match (prev_nav, bucket.close_nav) {
            (Some(start), Some(end)) => truncate_display((end / start - Decimal::ONE) * dec!(100)),
            _ => Decimal::ZERO,
        };
        if bucket.close_nav.is_some() {
            prev_nav = bucket.close_nav;
        }

        let entry = PeriodEntry {
            label: bucket.label,
            percent_return,
            cash_pnl: bucket.cash_pnl,
            capital_in_out: bucket.capital_in_out,
        };
        match years.last_mut() {
            Some(year_pnl) if year_pnl.year == bucket.year => year_pnl.entries.push(entry),
            _ => years.push(YearPnl {
                year: bucket.year,
                entries: vec![entry],
                total_percent: Decimal::ZERO,
                total_cash: Decimal::ZERO,
                total_capital_in_out: Decimal::ZERO,
            }),
        }
    }
    years
}

fn rollup_years(years: &mut [YearPnl]) {
    for year_pnl in years {
        let mut compounded = Decimal::ONE;
        let mut total_cash = Decimal::ZERO;
        let mut total_capital_in_out = Decimal::ZERO;
        for entry in &year_pnl.entries {
            compounded *= Decimal::ONE + entry.percent_return / dec!(100);
            total_cash += entry.cash_pnl;
            total_capital_in_out += entry.capital_in_out;
        }
        // Sequential period returns compound; they do not add.
        year_pnl.total_percent = truncate_display((compounded - Decimal::ONE) * dec!(100));
        year_pnl.total_cash = total_cash;
        year_pnl.total_capital_in_out = total_capital_in_out;
    }
}
