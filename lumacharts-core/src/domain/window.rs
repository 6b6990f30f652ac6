//! Calendar window planning for history requests.

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Inclusive calendar window. `start <= end`; not mutated after creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl TimeWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        debug_assert!(start <= end, "window start after end");
        Self { start, end }
    }

    /// Span in whole days, never less than one.
    pub fn span_days(&self) -> i64 {
        (self.end - self.start).num_days().max(1)
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}→{}", self.start, self.end)
    }
}

/// Recognized date-range keywords.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RangeKey {
    OneDay,
    OneWeek,
    OneMonth,
    ThreeMonths,
    SixMonths,
    OneYear,
    TwoYears,
}

impl RangeKey {
    /// Parse a keyword case-insensitively. Unrecognized or empty input falls
    /// back to the three-month window.
    pub fn parse_or_default(input: &str) -> Self {
        match input.trim().to_ascii_lowercase().as_str() {
            "1d" => RangeKey::OneDay,
            "1w" => RangeKey::OneWeek,
            "1m" => RangeKey::OneMonth,
            "3m" => RangeKey::ThreeMonths,
            "6m" => RangeKey::SixMonths,
            "1y" => RangeKey::OneYear,
            "2y" => RangeKey::TwoYears,
            _ => RangeKey::ThreeMonths,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RangeKey::OneDay => "1d",
            RangeKey::OneWeek => "1w",
            RangeKey::OneMonth => "1m",
            RangeKey::ThreeMonths => "3m",
            RangeKey::SixMonths => "6m",
            RangeKey::OneYear => "1y",
            RangeKey::TwoYears => "2y",
        }
    }

    /// Days subtracted from the window end to get the start.
    fn offset_days(self) -> i64 {
        match self {
            RangeKey::OneDay => 1,
            RangeKey::OneWeek => 7,
            RangeKey::OneMonth => 30,
            RangeKey::ThreeMonths => 90,
            RangeKey::SixMonths => 180,
            RangeKey::OneYear => 365,
            RangeKey::TwoYears => 730,
        }
    }
}

/// Most recent weekday: Saturday and Sunday roll back to Friday.
///
/// No holiday calendar is consulted. A weekend reference date silently
/// becomes the preceding Friday for every range keyword, not just `1d`.
pub fn last_trading_day(date: NaiveDate) -> NaiveDate {
    match date.weekday() {
        Weekday::Sat => date - Duration::days(1),
        Weekday::Sun => date - Duration::days(2),
        _ => date,
    }
}

/// Compute the effective window for a range keyword and reference date.
pub fn plan_window(range: RangeKey, reference: NaiveDate) -> TimeWindow {
    let end = last_trading_day(reference);
    TimeWindow::new(end - Duration::days(range.offset_days()), end)
}
