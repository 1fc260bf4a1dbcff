//! Equity and drawdown curve construction for charting.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::performance::performance_model::CurvePoint;
use crate::records::DailyRecord;
use crate::utils::decimal_utils::truncate_display;
use crate::utils::time_utils::DateRange;

/// Per-date inputs after same-date collapsing.
struct DatePoint {
    date: NaiveDate,
    nav: Option<Decimal>,
    supplied_drawdown: Option<Decimal>,
}

/// Collapses records sharing a date by averaging, so a date that appears
/// once per sub-component is not double-counted. Relies on the series
/// being date-sorted.
fn collapse_by_date(records: &[DailyRecord]) -> Vec<DatePoint> {
    records
        .chunk_by(|a, b| a.date == b.date)
        .map(|group| {
            let mut nav_sum = Decimal::ZERO;
            let mut nav_count = 0u32;
            let mut drawdown_sum = Decimal::ZERO;
            let mut drawdown_count = 0u32;
            for record in group {
                if let Some(nav) = record.positive_nav() {
                    nav_sum += nav;
                    nav_count += 1;
                }
                if let Some(drawdown) = record.drawdown_percent {
                    drawdown_sum += drawdown;
                    drawdown_count += 1;
                }
            }
            DatePoint {
                date: group[0].date,
                nav: (nav_count > 0).then(|| nav_sum / Decimal::from(nav_count)),
                supplied_drawdown: (drawdown_count > 0)
                    .then(|| drawdown_sum / Decimal::from(drawdown_count)),
            }
        })
        .collect()
}

fn filter_curve(curve: Vec<CurvePoint>, range: Option<&DateRange>) -> Vec<CurvePoint> {
    match range {
        Some(range) => curve
            .into_iter()
            .filter(|point| range.contains(point.date))
            .collect(),
        None => curve,
    }
}

/// Builds the equity curve: NAV rebased so the first plotted point reads
/// 100, every other point scaled by the same factor. The date filter is
/// applied after construction, so the rebase factor reflects the full
/// history even when the displayed window is narrower.
pub fn build_equity_curve(records: &[DailyRecord], range: Option<&DateRange>) -> Vec<CurvePoint> {
    let points = collapse_by_date(records);
    let mut base: Option<Decimal> = None;
    let mut curve = Vec::with_capacity(points.len());

    for point in points {
        let Some(nav) = point.nav else {
            continue;
        };
        let divisor = *base.get_or_insert(nav);
        curve.push(CurvePoint {
            date: point.date,
            value: truncate_display(nav / divisor * dec!(100)),
        });
    }

    filter_curve(curve, range)
}

/// Builds the drawdown curve from the running historical peak. Dates with
/// no usable NAV fall back to the source-supplied drawdown figure when one
/// exists; such points never move the peak. Filtering happens after
/// construction so peak tracking always sees the full history.
pub fn build_drawdown_curve(records: &[DailyRecord], range: Option<&DateRange>) -> Vec<CurvePoint> {
    let points = collapse_by_date(records);
    let mut peak: Option<Decimal> = None;
    let mut curve = Vec::with_capacity(points.len());

    for point in points {
        if let Some(nav) = point.nav {
            let current_peak = peak.map_or(nav, |p| p.max(nav));
            peak = Some(current_peak);
            let drawdown = (nav - current_peak) / current_peak * dec!(100);
            curve.push(CurvePoint {
                date: point.date,
                value: truncate_display(drawdown),
            });
        } else if let Some(supplied) = point.supplied_drawdown {
            curve.push(CurvePoint {
                date: point.date,
                value: truncate_display(supplied),
            });
        }
    }

    filter_curve(curve, range)
}
