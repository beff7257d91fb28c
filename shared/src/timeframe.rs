//! Timeframe selection and date-range resolution
//!
//! Maps a user-facing timeframe label (preset name or literal
//! `dd/MM/yyyy - dd/MM/yyyy` range) to concrete UTC instants covering the
//! full calendar days involved, interpreted in the business timezone.
//!
//! A literal range that fails to parse degrades to the full current
//! calendar year. That fallback is a deliberate policy, not an error; the
//! caller never sees a parse failure.

use chrono::{DateTime, Datelike, Duration, Months, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

/// Business timezone for all date-range resolution
pub const BUSINESS_TIMEZONE: Tz = chrono_tz::America::Sao_Paulo;

/// Resolved date range: `start` is 00:00:00.000 of the first day and `end`
/// is 23:59:59.999 of the last day in the business timezone, both as UTC
/// instants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl DateRange {
    /// Whether an instant falls inside the range (inclusive on both ends)
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        instant >= self.start && instant <= self.end
    }

    /// Range covering the calendar days `[start, end]` in `tz`
    pub fn for_days(start: NaiveDate, end: NaiveDate, tz: Tz) -> Self {
        Self {
            start: day_start(start, tz),
            end: day_end(end, tz),
        }
    }
}

/// Timeframe selector
///
/// Only these presets affect query semantics; unknown labels and
/// unparsable literal ranges degrade to [`Timeframe::ThisYear`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Timeframe {
    Today,
    Yesterday,
    Last7Days,
    Last30Days,
    ThisMonth,
    ThisYear,
    Custom { start: NaiveDate, end: NaiveDate },
}

impl Timeframe {
    /// Parse a timeframe selector label
    ///
    /// Labels containing `-` are treated as literal `dd/MM/yyyy - dd/MM/yyyy`
    /// ranges; anything unparsable falls back to the full current year.
    pub fn parse(label: &str) -> Self {
        if label.contains('-') {
            return match parse_literal_range(label) {
                Some((start, end)) => Timeframe::Custom { start, end },
                None => {
                    tracing::warn!(
                        label,
                        "Unparsable literal date range, falling back to current year"
                    );
                    Timeframe::ThisYear
                }
            };
        }

        match label {
            "Today" => Timeframe::Today,
            "Yesterday" => Timeframe::Yesterday,
            "Last 7 Days" => Timeframe::Last7Days,
            "Last 30 Days" => Timeframe::Last30Days,
            "This Month" => Timeframe::ThisMonth,
            "This Year" => Timeframe::ThisYear,
            other => {
                tracing::debug!(label = other, "Unknown timeframe preset, using current year");
                Timeframe::ThisYear
            }
        }
    }

    /// Resolve to concrete UTC instants. Pure function of (self, now, tz).
    pub fn resolve(&self, now: DateTime<Utc>, tz: Tz) -> DateRange {
        let today = now.with_timezone(&tz).date_naive();
        match *self {
            Timeframe::Today => DateRange::for_days(today, today, tz),
            Timeframe::Yesterday => {
                let yesterday = today - Duration::days(1);
                DateRange::for_days(yesterday, yesterday, tz)
            }
            Timeframe::Last7Days => DateRange::for_days(today - Duration::days(6), today, tz),
            Timeframe::Last30Days => DateRange::for_days(today - Duration::days(29), today, tz),
            Timeframe::ThisMonth => {
                let first = today.with_day(1).unwrap_or(today);
                let last = first + Months::new(1) - Duration::days(1);
                DateRange::for_days(first, last, tz)
            }
            Timeframe::ThisYear => year_range(today.year(), tz),
            Timeframe::Custom { start, end } => DateRange::for_days(start, end, tz),
        }
    }
}

/// Parse and resolve a label in one step
pub fn resolve_label(label: &str, now: DateTime<Utc>, tz: Tz) -> DateRange {
    Timeframe::parse(label).resolve(now, tz)
}

fn parse_literal_range(label: &str) -> Option<(NaiveDate, NaiveDate)> {
    let parts: Vec<&str> = label.split('-').collect();
    if parts.len() != 2 {
        return None;
    }
    let start = NaiveDate::parse_from_str(parts[0].trim(), "%d/%m/%Y").ok()?;
    let end = NaiveDate::parse_from_str(parts[1].trim(), "%d/%m/%Y").ok()?;
    Some((start, end))
}

fn year_range(year: i32, tz: Tz) -> DateRange {
    let first = NaiveDate::from_ymd_opt(year, 1, 1).unwrap();
    let last = NaiveDate::from_ymd_opt(year, 12, 31).unwrap();
    DateRange::for_days(first, last, tz)
}

/// 00:00:00.000 of `date` in `tz`, as a UTC instant
///
/// DST gap fallback: if the local time does not exist, fall back to UTC.
fn day_start(date: NaiveDate, tz: Tz) -> DateTime<Utc> {
    local_to_utc(date.and_time(NaiveTime::MIN), tz)
}

/// 23:59:59.999 of `date` in `tz`, as a UTC instant
fn day_end(date: NaiveDate, tz: Tz) -> DateTime<Utc> {
    let naive = date.and_hms_milli_opt(23, 59, 59, 999).unwrap();
    local_to_utc(naive, tz)
}

fn local_to_utc(naive: NaiveDateTime, tz: Tz) -> DateTime<Utc> {
    naive
        .and_local_timezone(tz)
        .latest()
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|| naive.and_utc())
}
