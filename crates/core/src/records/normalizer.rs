//! Converts raw source rows into the canonical `DailyRecord` series.
//!
//! All numeric coercion happens here, once. Downstream components never
//! parse strings again; they receive decimals with `None` preserved for
//! genuinely missing values.

use chrono::{NaiveDate, NaiveDateTime};
use log::warn;
use rust_decimal::Decimal;
use std::str::FromStr;

use super::records_model::{DailyRecord, RawDailyRecord, RawValue};

/// Parse a source date string flexibly. Handles plain dates, the
/// space-separated and ISO "T" timestamp forms, and the day-first slash
/// format one legacy feed uses.
pub fn parse_date_flexible(date_str: &str) -> Option<NaiveDate> {
    let trimmed = date_str.trim();
    // Try date-only format first: "2024-01-15"
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        // Then with time: "2024-01-15 00:00:00"
        .or_else(|| {
            NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M:%S")
                .ok()
                .map(|dt| dt.date())
        })
        // Then ISO8601: "2024-01-15T00:00:00" (with optional fraction/offset)
        .or_else(|| {
            NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S")
                .ok()
                .map(|dt| dt.date())
        })
        .or_else(|| {
            chrono::DateTime::parse_from_rfc3339(trimmed)
                .ok()
                .map(|dt| dt.date_naive())
        })
        // Finally day-first: "15/01/2024"
        .or_else(|| NaiveDate::parse_from_str(trimmed, "%d/%m/%Y").ok())
}

/// Coerce one raw field to a decimal. Absent values and empty strings are
/// `None`; non-empty text that fails to parse is reported so the caller
/// can drop the whole row.
fn coerce_decimal(
    raw: Option<&RawValue>,
    field: &str,
) -> std::result::Result<Option<Decimal>, String> {
    match raw {
        None => Ok(None),
        Some(RawValue::Number(value)) => Ok(Some(*value)),
        Some(RawValue::Text(text)) => {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                return Ok(None);
            }
            Decimal::from_str(trimmed)
                .map(Some)
                .map_err(|_| format!("{}='{}'", field, trimmed))
        }
    }
}

fn build_record(date: NaiveDate, raw: &RawDailyRecord) -> std::result::Result<DailyRecord, String> {
    Ok(DailyRecord {
        date,
        nav: coerce_decimal(raw.nav.as_ref(), "nav")?,
        portfolio_value: coerce_decimal(raw.portfolio_value.as_ref(), "portfolioValue")?,
        exposure_value: coerce_decimal(raw.exposure_value.as_ref(), "exposureValue")?,
        cash_in_out: coerce_decimal(raw.cash_in_out.as_ref(), "cashInOut")?
            .unwrap_or(Decimal::ZERO),
        pnl: coerce_decimal(raw.pnl.as_ref(), "pnl")?,
        drawdown_percent: coerce_decimal(raw.drawdown_percent.as_ref(), "drawdownPercent")?,
    })
}

/// Normalizes raw rows into a `DailyRecord` series sorted ascending by date.
///
/// Rows with an unparsable date or malformed numeric text are dropped with
/// a logged warning; computation proceeds on the remainder. When two rows
/// share a date, the first occurrence in input order is kept.
pub fn normalize_records(account_id: &str, raw_records: &[RawDailyRecord]) -> Vec<DailyRecord> {
    let mut records: Vec<DailyRecord> = Vec::with_capacity(raw_records.len());

    for raw in raw_records {
        let Some(date_str) = raw.date.as_deref() else {
            warn!("Dropping record without a date for account {}", account_id);
            continue;
        };
        let Some(date) = parse_date_flexible(date_str) else {
            warn!(
                "Dropping record with unparsable date '{}' for account {}",
                date_str, account_id
            );
            continue;
        };
        match build_record(date, raw) {
            Ok(record) => records.push(record),
            Err(detail) => {
                warn!(
                    "Dropping record on {} for account {}: malformed number {}",
                    date, account_id, detail
                );
            }
        }
    }

    // Stable sort, then keep the first occurrence per date.
    records.sort_by_key(|record| record.date);
    records.dedup_by_key(|record| record.date);
    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn raw_row(date: &str, nav: &str) -> RawDailyRecord {
        RawDailyRecord {
            date: Some(date.to_string()),
            nav: Some(RawValue::Text(nav.to_string())),
            ..Default::default()
        }
    }

    #[test]
    fn test_parse_date_flexible_handles_all_source_formats() {
        let expected = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        assert_eq!(parse_date_flexible("2024-01-15"), Some(expected));
        assert_eq!(parse_date_flexible("2024-01-15 00:00:00"), Some(expected));
        assert_eq!(parse_date_flexible("2024-01-15T10:30:00"), Some(expected));
        assert_eq!(parse_date_flexible("2024-01-15T10:30:00Z"), Some(expected));
        assert_eq!(parse_date_flexible("15/01/2024"), Some(expected));
        assert_eq!(parse_date_flexible("not a date"), None);
        assert_eq!(parse_date_flexible(""), None);
    }

    #[test]
    fn test_sorts_ascending_and_keeps_first_duplicate() {
        let rows = vec![
            raw_row("2024-01-03", "103"),
            raw_row("2024-01-01", "101"),
            raw_row("2024-01-03", "999"),
            raw_row("2024-01-02", "102"),
        ];
        let records = normalize_records("ACC1", &rows);
        let dates: Vec<_> = records.iter().map(|r| r.date.to_string()).collect();
        assert_eq!(dates, vec!["2024-01-01", "2024-01-02", "2024-01-03"]);
        assert_eq!(records[2].nav, Some(dec!(103)));
    }

    #[test]
    fn test_drops_row_with_unparsable_date() {
        let rows = vec![raw_row("garbage", "100"), raw_row("2024-01-02", "101")];
        let records = normalize_records("ACC1", &rows);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].nav, Some(dec!(101)));
    }

    #[test]
    fn test_drops_row_with_malformed_number() {
        let mut bad = raw_row("2024-01-01", "100");
        bad.pnl = Some(RawValue::Text("12a.4".to_string()));
        let rows = vec![bad, raw_row("2024-01-02", "101")];
        let records = normalize_records("ACC1", &rows);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].date, NaiveDate::from_ymd_opt(2024, 1, 2).unwrap());
    }

    #[test]
    fn test_preserves_null_nav_and_defaults_flow_to_zero() {
        let row = RawDailyRecord {
            date: Some("2024-01-01".to_string()),
            nav: None,
            pnl: Some(RawValue::Number(dec!(-12.5))),
            ..Default::default()
        };
        let records = normalize_records("ACC1", &[row]);
        assert_eq!(records[0].nav, None);
        assert_eq!(records[0].cash_in_out, Decimal::ZERO);
        assert_eq!(records[0].pnl, Some(dec!(-12.5)));
    }

    #[test]
    fn test_empty_string_is_missing_not_zero() {
        let row = RawDailyRecord {
            date: Some("2024-01-01".to_string()),
            nav: Some(RawValue::Text("  ".to_string())),
            ..Default::default()
        };
        let records = normalize_records("ACC1", &[row]);
        assert_eq!(records[0].nav, None);
    }

    #[test]
    fn test_accepts_source_field_aliases() {
        let json = r#"{"navDate":"2024-01-02","navValue":"101.2345","netFlow":5000,"dayPnl":"12.50"}"#;
        let raw: RawDailyRecord = serde_json::from_str(json).unwrap();
        let records = normalize_records("ACC1", &[raw]);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].nav, Some(dec!(101.2345)));
        assert_eq!(records[0].cash_in_out, dec!(5000));
        assert_eq!(records[0].pnl, Some(dec!(12.50)));
    }

    #[test]
    fn test_positive_nav_filter() {
        let record = DailyRecord::baseline_point(
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            dec!(100),
        );
        assert_eq!(record.positive_nav(), Some(dec!(100)));

        let mut zero = record.clone();
        zero.nav = Some(Decimal::ZERO);
        assert_eq!(zero.positive_nav(), None);

        let mut negative = record;
        negative.nav = Some(dec!(-5));
        assert_eq!(negative.positive_nav(), None);
    }
}
