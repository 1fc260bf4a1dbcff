//! Point-in-time trailing returns and drawdown.

use chrono::Duration;
use log::warn;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::constants::RETURN_SANITY_LIMIT;
use crate::performance::performance_model::{TrailingPeriod, TrailingReturnSet};
use crate::records::DailyRecord;
use crate::utils::decimal_utils::truncate_display;

/// Computes trailing returns over the fixed lookback windows plus maximum
/// and current drawdown, from a date-sorted daily series.
///
/// A window without a qualifying base record yields `None`, never zero.
/// A series with no usable NAV yields the empty set.
pub fn calculate_trailing_returns(account_id: &str, records: &[DailyRecord]) -> TrailingReturnSet {
    let mut result = TrailingReturnSet::empty();

    let Some((latest_date, latest_nav)) = records
        .iter()
        .rev()
        .find_map(|record| record.positive_nav().map(|nav| (record.date, nav)))
    else {
        return result;
    };

    for period in TrailingPeriod::ALL {
        let value = match period.lookback_days() {
            Some(days) => {
                let cutoff = latest_date - Duration::days(days);
                records
                    .iter()
                    .rev()
                    .filter(|record| record.date <= cutoff)
                    .find_map(|record| record.positive_nav())
                    .and_then(|base_nav| percent_change(account_id, period, base_nav, latest_nav))
            }
            None => {
                // Earliest NAV that differs from the latest guards against a
                // constant series matching its own endpoint as the baseline.
                let base = records
                    .iter()
                    .find_map(|record| record.positive_nav().filter(|nav| *nav != latest_nav));
                match base {
                    Some(base_nav) => percent_change(account_id, period, base_nav, latest_nav),
                    None => Some(Decimal::ZERO),
                }
            }
        };
        result.set(period, value);
    }

    // Single pass tracking the running peak over the whole series.
    let mut peak: Option<Decimal> = None;
    let mut max_drawdown = Decimal::ZERO;
    for record in records {
        let Some(nav) = record.positive_nav() else {
            continue;
        };
        let current_peak = peak.map_or(nav, |p| p.max(nav));
        peak = Some(current_peak);
        let drawdown = (nav - current_peak) / current_peak * dec!(100);
        max_drawdown = max_drawdown.min(drawdown);
    }
    if let Some(peak_nav) = peak {
        result.max_drawdown = Some(truncate_display(max_drawdown));
        let current = (latest_nav - peak_nav) / peak_nav * dec!(100);
        result.current_drawdown = Some(truncate_display(current));
    }

    result
}

fn percent_change(
    account_id: &str,
    period: TrailingPeriod,
    base_nav: Decimal,
    latest_nav: Decimal,
) -> Option<Decimal> {
    let percent = (latest_nav - base_nav) / base_nav * dec!(100);
    if percent.abs() > RETURN_SANITY_LIMIT {
        warn!(
            "Suppressing implausible {} return for account {}: {}% (base NAV {}, latest NAV {})",
            period.label(),
            account_id,
            percent,
            base_nav,
            latest_nav
        );
        return None;
    }
    Some(truncate_display(percent))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn record(date: &str, nav: Option<Decimal>) -> DailyRecord {
        DailyRecord {
            date: date.parse().unwrap(),
            nav,
            portfolio_value: None,
            exposure_value: None,
            cash_in_out: Decimal::ZERO,
            pnl: None,
            drawdown_percent: None,
        }
    }

    fn daily_series(start: &str, navs: &[Decimal]) -> Vec<DailyRecord> {
        let start: NaiveDate = start.parse().unwrap();
        navs.iter()
            .enumerate()
            .map(|(i, nav)| DailyRecord {
                date: start + Duration::days(i as i64),
                nav: Some(*nav),
                portfolio_value: None,
                exposure_value: None,
                cash_in_out: Decimal::ZERO,
                pnl: None,
                drawdown_percent: None,
            })
            .collect()
    }

    #[test]
    fn test_empty_series_yields_empty_set() {
        let result = calculate_trailing_returns("ACC1", &[]);
        assert_eq!(result, TrailingReturnSet::empty());
    }

    #[test]
    fn test_short_series_yields_null_windows_not_zero() {
        let series = daily_series(
            "2024-03-01",
            &[dec!(100), dec!(101), dec!(102), dec!(101), dec!(104)],
        );
        let result = calculate_trailing_returns("ACC1", &series);
        assert_eq!(result.one_year, None);
        assert_eq!(result.ten_days, None);
        assert_eq!(result.since_inception, Some(dec!(4.00)));
    }

    #[test]
    fn test_window_base_is_most_recent_on_or_before_cutoff() {
        // Sixty days of NAV rising 100..159; the 1M window looks back 30
        // calendar days from the last date.
        let navs: Vec<Decimal> = (0..60).map(|i| Decimal::from(100 + i)).collect();
        let series = daily_series("2024-01-01", &navs);
        let result = calculate_trailing_returns("ACC1", &series);

        // Latest is 2024-02-29 at 159; cutoff 2024-01-30 has NAV 129.
        let expected = truncate_display((dec!(159) - dec!(129)) / dec!(129) * dec!(100));
        assert_eq!(result.one_month, Some(expected));
        assert_eq!(result.one_year, None);
    }

    #[test]
    fn test_null_nav_base_candidates_are_skipped() {
        let mut series = daily_series("2024-01-01", &[dec!(100), dec!(110), dec!(120)]);
        series.push(record("2024-02-15", Some(dec!(130))));
        // The only record on or before the 30-day cutoff with null NAV must
        // not serve as a base.
        series[2].nav = None;
        let result = calculate_trailing_returns("ACC1", &series);
        let expected = truncate_display((dec!(130) - dec!(110)) / dec!(110) * dec!(100));
        assert_eq!(result.ten_days, Some(expected));
        assert_eq!(result.one_month, Some(expected));
    }

    #[test]
    fn test_constant_series_since_inception_is_zero() {
        let series = daily_series("2024-01-01", &[dec!(100), dec!(100), dec!(100)]);
        let result = calculate_trailing_returns("ACC1", &series);
        assert_eq!(result.since_inception, Some(Decimal::ZERO));
    }

    #[test]
    fn test_since_inception_skips_baseline_equal_to_latest() {
        let series = daily_series("2024-01-01", &[dec!(100), dec!(110), dec!(100)]);
        let result = calculate_trailing_returns("ACC1", &series);
        // Earliest differing NAV is 110, so inception return is measured
        // against it rather than the spurious 100 match.
        let expected = truncate_display((dec!(100) - dec!(110)) / dec!(110) * dec!(100));
        assert_eq!(result.since_inception, Some(expected));
    }

    #[test]
    fn test_drawdown_tracks_running_peak() {
        let series = daily_series("2024-01-01", &[dec!(100), dec!(110), dec!(90), dec!(95)]);
        let result = calculate_trailing_returns("ACC1", &series);
        assert_eq!(result.max_drawdown, Some(dec!(-18.18)));
        assert_eq!(result.current_drawdown, Some(dec!(-13.63)));
    }

    #[test]
    fn test_monotonic_series_has_zero_drawdown() {
        let series = daily_series("2024-01-01", &[dec!(100), dec!(105), dec!(110)]);
        let result = calculate_trailing_returns("ACC1", &series);
        assert_eq!(result.max_drawdown, Some(Decimal::ZERO));
        assert_eq!(result.current_drawdown, Some(Decimal::ZERO));
    }

    #[test]
    fn test_implausible_return_is_suppressed() {
        let series = daily_series("2024-01-01", &[dec!(0.0001), dec!(150)]);
        let result = calculate_trailing_returns("ACC1", &series);
        assert_eq!(result.since_inception, None);
    }
}
