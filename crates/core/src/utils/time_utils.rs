use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc, Weekday};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::errors::{Result, ValidationError};

/// Default time zone for reporting dates.
/// This is the canonical timezone used to convert UTC instants to domain dates.
/// Named periods and date filters are evaluated against the data source's
/// reporting zone, never the client's local zone.
pub const DEFAULT_REPORTING_TZ: Tz = chrono_tz::America::New_York;

/// Converts a UTC instant to a reporting date in the given timezone.
///
/// This is the single source of truth for converting instants to domain dates.
/// Use this whenever you need to derive a "business date" from a timestamp.
pub fn reporting_date_from_utc(instant: DateTime<Utc>, tz: Tz) -> NaiveDate {
    instant.with_timezone(&tz).date_naive()
}

/// Convenience function that uses the default reporting timezone.
/// Equivalent to `reporting_date_from_utc(instant, DEFAULT_REPORTING_TZ)`.
pub fn reporting_date_today() -> NaiveDate {
    reporting_date_from_utc(Utc::now(), DEFAULT_REPORTING_TZ)
}

/// Inclusive day-granularity date window. Either bound may be open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        Self { start, end }
    }

    pub fn between(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start: Some(start),
            end: Some(end),
        }
    }

    /// True when the date falls inside the window, both bounds inclusive.
    pub fn contains(&self, date: NaiveDate) -> bool {
        if let Some(start) = self.start {
            if date < start {
                return false;
            }
        }
        if let Some(end) = self.end {
            if date > end {
                return false;
            }
        }
        true
    }

    pub fn validate(&self) -> Result<()> {
        if let (Some(start), Some(end)) = (self.start, self.end) {
            if start > end {
                return Err(ValidationError::InvalidInput(format!(
                    "Start date {} must be on or before end date {}",
                    start, end
                ))
                .into());
            }
        }
        Ok(())
    }
}

/// Named reporting periods accepted by the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NamedRange {
    ThisWeek,
    LastWeek,
    ThisMonth,
    LastMonth,
    ThisQuarter,
    LastQuarter,
    ThisYear,
    LastYear,
}

impl NamedRange {
    /// Resolves the named period to a closed calendar window relative to
    /// `today` (a reporting-zone date). Weeks run Monday through Sunday.
    pub fn resolve(&self, today: NaiveDate) -> DateRange {
        match self {
            NamedRange::ThisWeek => {
                let week = today.week(Weekday::Mon);
                DateRange::between(week.first_day(), week.last_day())
            }
            NamedRange::LastWeek => {
                let week = (today - Duration::days(7)).week(Weekday::Mon);
                DateRange::between(week.first_day(), week.last_day())
            }
            NamedRange::ThisMonth => month_range(today.year(), today.month()),
            NamedRange::LastMonth => {
                let (year, month) = previous_month(today.year(), today.month());
                month_range(year, month)
            }
            NamedRange::ThisQuarter => quarter_range(today.year(), quarter_of_month(today.month())),
            NamedRange::LastQuarter => {
                let quarter = quarter_of_month(today.month());
                if quarter == 1 {
                    quarter_range(today.year() - 1, 4)
                } else {
                    quarter_range(today.year(), quarter - 1)
                }
            }
            NamedRange::ThisYear => year_range(today.year()),
            NamedRange::LastYear => year_range(today.year() - 1),
        }
    }
}

/// A report filter: either a named calendar period or an explicit window.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum ReportRange {
    Named(NamedRange),
    Explicit(DateRange),
}

impl ReportRange {
    /// Resolves to a concrete window. Explicit windows are validated;
    /// named periods are anchored on `today` in the reporting zone.
    pub fn resolve(&self, today: NaiveDate) -> Result<DateRange> {
        match self {
            ReportRange::Named(named) => Ok(named.resolve(today)),
            ReportRange::Explicit(range) => {
                range.validate()?;
                Ok(*range)
            }
        }
    }
}

/// Calendar quarter (1-4) containing the given month.
pub fn quarter_of_month(month: u32) -> u32 {
    (month - 1) / 3 + 1
}

fn previous_month(year: i32, month: u32) -> (i32, u32) {
    if month == 1 {
        (year - 1, 12)
    } else {
        (year, month - 1)
    }
}

fn month_range(year: i32, month: u32) -> DateRange {
    let first = first_of_month(year, month);
    let last = last_of_month(year, month);
    DateRange::between(first, last)
}

fn quarter_range(year: i32, quarter: u32) -> DateRange {
    let first_month = (quarter - 1) * 3 + 1;
    let first = first_of_month(year, first_month);
    let last = last_of_month(year, first_month + 2);
    DateRange::between(first, last)
}

fn year_range(year: i32) -> DateRange {
    DateRange::between(first_of_month(year, 1), last_of_month(year, 12))
}

fn first_of_month(year: i32, month: u32) -> NaiveDate {
    // Month is always 1-12 here; the fallback only guards the type system.
    NaiveDate::from_ymd_opt(year, month, 1).unwrap_or(NaiveDate::MIN)
}

fn last_of_month(year: i32, month: u32) -> NaiveDate {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    first_of_month(next_year, next_month) - Duration::days(1)
}
