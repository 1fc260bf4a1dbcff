//! NAV baseline resolution.
//!
//! Source schemes disagree on whether NAV is rebased to 100 at inception.
//! The resolver gives every downstream period calculation one uniform
//! contract: the first checkpoint is 100 by convention, later checkpoints
//! are the previous period's closing NAV.

use chrono::Duration;
use log::debug;

use crate::constants::{BASELINE_NEAR_TOLERANCE, BASE_NAV};
use crate::records::DailyRecord;

/// A daily series with its starting reference point resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct BaselinedSeries {
    pub records: Vec<DailyRecord>,
    /// True when a synthetic 100-NAV point was prepended to the series.
    pub has_synthetic_baseline: bool,
}

/// Establishes the reference NAV for since-inception and first-period math.
///
/// If the series already begins at (or within tolerance of) NAV 100, the
/// first record's own NAV is the baseline and the series is returned
/// unchanged. Otherwise a synthetic 100-NAV point is prepended, dated one
/// calendar day before the first record. The synthetic point carries no
/// cash flow or P&L; only its NAV participates in return math.
pub fn resolve_baseline(account_id: &str, records: Vec<DailyRecord>) -> BaselinedSeries {
    let Some(first_nav) = records.iter().find_map(|record| record.positive_nav()) else {
        return BaselinedSeries {
            records,
            has_synthetic_baseline: false,
        };
    };

    if (first_nav - BASE_NAV).abs() <= BASELINE_NEAR_TOLERANCE {
        return BaselinedSeries {
            records,
            has_synthetic_baseline: false,
        };
    }

    let baseline_date = records[0].date - Duration::days(1);
    debug!(
        "Prepending synthetic baseline for account {} at {} (first NAV {})",
        account_id, baseline_date, first_nav
    );

    let mut baselined = Vec::with_capacity(records.len() + 1);
    baselined.push(DailyRecord::baseline_point(baseline_date, BASE_NAV));
    baselined.extend(records);

    BaselinedSeries {
        records: baselined,
        has_synthetic_baseline: true,
    }
}
