//! Normalizes an external index series onto the portfolio's origin.

use chrono::NaiveDate;
use log::warn;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::benchmark_model::{BenchmarkCurves, RawBenchmarkPoint};
use crate::performance::CurvePoint;
use crate::records::parse_date_flexible;
use crate::utils::decimal_utils::truncate_display;

/// Aligns a raw benchmark series for comparison against portfolio curves.
///
/// The series is sorted and de-duplicated by date (first occurrence wins).
/// When `align_start_to` precedes the benchmark's own first date, a
/// leading point is synthesized there carrying the first real value, so
/// normalization still reads exactly 100 at the alignment date. The whole
/// series is then rebased to 100 on its first point, and a drawdown curve
/// is derived from the running peak.
pub fn align_benchmark(
    benchmark_id: &str,
    raw_points: &[RawBenchmarkPoint],
    align_start_to: Option<NaiveDate>,
) -> BenchmarkCurves {
    let mut series: Vec<(NaiveDate, Decimal)> = Vec::with_capacity(raw_points.len());
    for point in raw_points {
        let Some(date) = parse_date_flexible(point.date_str()) else {
            warn!(
                "Dropping benchmark {} point with unparsable date '{}'",
                benchmark_id,
                point.date_str()
            );
            continue;
        };
        let Some(value) = point.raw_value().as_decimal() else {
            warn!(
                "Dropping benchmark {} point on {} with unparsable value",
                benchmark_id, date
            );
            continue;
        };
        if value <= Decimal::ZERO {
            warn!(
                "Dropping benchmark {} point on {} with non-positive value {}",
                benchmark_id, date, value
            );
            continue;
        }
        series.push((date, value));
    }

    series.sort_by_key(|(date, _)| *date);
    series.dedup_by_key(|(date, _)| *date);

    let Some(&(first_date, first_value)) = series.first() else {
        return BenchmarkCurves::empty();
    };

    if let Some(start) = align_start_to {
        if start < first_date {
            series.insert(0, (start, first_value));
        }
    }

    let base = series[0].1;
    let mut equity = Vec::with_capacity(series.len());
    let mut drawdown = Vec::with_capacity(series.len());
    let mut peak = Decimal::ZERO;

    for (date, value) in series {
        equity.push(CurvePoint {
            date,
            value: truncate_display(value / base * dec!(100)),
        });

        peak = peak.max(value);
        let decline = (value - peak) / peak * dec!(100);
        // Positive noise clamps to zero.
        drawdown.push(CurvePoint {
            date,
            value: truncate_display(decline).min(Decimal::ZERO),
        });
    }

    BenchmarkCurves {
        benchmark_equity_curve: equity,
        benchmark_drawdown_curve: drawdown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::RawValue;

    fn pair(date: &str, value: Decimal) -> RawBenchmarkPoint {
        RawBenchmarkPoint::Pair(date.to_string(), RawValue::Number(value))
    }

    fn date(value: &str) -> NaiveDate {
        value.parse().unwrap()
    }

    #[test]
    fn test_alignment_synthesizes_leading_point() {
        let points = vec![pair("2024-02-01", dec!(4500)), pair("2024-02-08", dec!(4950))];
        let curves = align_benchmark("NIFTY", &points, Some(date("2024-01-15")));

        let equity = &curves.benchmark_equity_curve;
        assert_eq!(equity.len(), 3);
        assert_eq!(equity[0].date, date("2024-01-15"));
        assert_eq!(equity[0].value, dec!(100.00));
        // The benchmark's own first date still normalizes to 100.
        assert_eq!(equity[1].value, dec!(100.00));
        // The relative ratio to the original first value is preserved.
        assert_eq!(equity[2].value, dec!(110.00));
    }

    #[test]
    fn test_align_start_after_first_date_adds_nothing() {
        let points = vec![pair("2024-02-01", dec!(4500)), pair("2024-02-08", dec!(4950))];
        let curves = align_benchmark("NIFTY", &points, Some(date("2024-02-05")));
        assert_eq!(curves.benchmark_equity_curve.len(), 2);
        assert_eq!(curves.benchmark_equity_curve[0].date, date("2024-02-01"));
    }

    #[test]
    fn test_series_is_sorted_and_first_duplicate_wins() {
        let points = vec![
            pair("2024-01-03", dec!(103)),
            pair("2024-01-01", dec!(100)),
            pair("2024-01-03", dec!(999)),
            pair("2024-01-02", dec!(101)),
        ];
        let curves = align_benchmark("NIFTY", &points, None);
        let values: Vec<Decimal> = curves
            .benchmark_equity_curve
            .iter()
            .map(|point| point.value)
            .collect();
        assert_eq!(values, vec![dec!(100.00), dec!(101.00), dec!(103.00)]);
    }

    #[test]
    fn test_accepts_object_points_with_nav_alias() {
        let json = r#"[
            {"date": "2024-01-01", "nav": "4500"},
            {"date": "2024-01-02", "value": 4590},
            ["2024-01-03", "4635.5"]
        ]"#;
        let points: Vec<RawBenchmarkPoint> = serde_json::from_str(json).unwrap();
        let curves = align_benchmark("NIFTY", &points, None);
        let values: Vec<Decimal> = curves
            .benchmark_equity_curve
            .iter()
            .map(|point| point.value)
            .collect();
        assert_eq!(values, vec![dec!(100.00), dec!(102.00), dec!(103.01)]);
    }

    #[test]
    fn test_drawdown_follows_running_peak() {
        let points = vec![
            pair("2024-01-01", dec!(100)),
            pair("2024-01-02", dec!(90)),
            pair("2024-01-03", dec!(95)),
        ];
        let curves = align_benchmark("NIFTY", &points, None);
        let values: Vec<Decimal> = curves
            .benchmark_drawdown_curve
            .iter()
            .map(|point| point.value)
            .collect();
        assert_eq!(values, vec![dec!(0), dec!(-10.00), dec!(-5.00)]);
    }

    #[test]
    fn test_unparsable_points_are_dropped() {
        let points = vec![
            RawBenchmarkPoint::Pair("garbage".to_string(), RawValue::Number(dec!(100))),
            RawBenchmarkPoint::Pair(
                "2024-01-02".to_string(),
                RawValue::Text("not-a-number".to_string()),
            ),
            pair("2024-01-03", dec!(200)),
        ];
        let curves = align_benchmark("NIFTY", &points, None);
        assert_eq!(curves.benchmark_equity_curve.len(), 1);
        assert_eq!(curves.benchmark_equity_curve[0].value, dec!(100.00));
    }

    #[test]
    fn test_empty_series_yields_empty_curves_not_null() {
        let curves = align_benchmark("NIFTY", &[], Some(date("2024-01-15")));
        assert_eq!(curves, BenchmarkCurves::empty());
        assert!(curves.benchmark_equity_curve.is_empty());
        assert!(curves.benchmark_drawdown_curve.is_empty());
    }
}
