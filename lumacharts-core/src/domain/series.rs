//! Canonical close-price series.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

/// One close-price observation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub timestamp: NaiveDateTime,
    pub close: f64,
}

/// Ordered close-price series.
///
/// Invariants: timestamps strictly increasing, no duplicates, no NaN closes,
/// timezone-naive. Constructed once per fetch attempt and not mutated after.
/// An empty series is a valid terminal state meaning "no data", not an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceSeries {
    label: String,
    points: Vec<PricePoint>,
}

impl PriceSeries {
    /// Empty series carrying the canonical close label.
    pub fn empty() -> Self {
        Self {
            label: "Close".into(),
            points: Vec::new(),
        }
    }

    /// Build a labeled series from unordered points.
    ///
    /// NaN closes are dropped; points are sorted by timestamp and duplicate
    /// timestamps collapse to the first occurrence, so the invariants hold by
    /// construction.
    pub fn from_points(label: impl Into<String>, mut points: Vec<PricePoint>) -> Self {
        points.retain(|p| !p.close.is_nan());
        points.sort_by_key(|p| p.timestamp);
        points.dedup_by_key(|p| p.timestamp);
        Self {
            label: label.into(),
            points,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first(&self) -> Option<&PricePoint> {
        self.points.first()
    }

    pub fn last(&self) -> Option<&PricePoint> {
        self.points.last()
    }

    /// Latest calendar day that has at least one bar.
    pub fn last_session(&self) -> Option<NaiveDate> {
        self.points.last().map(|p| p.timestamp.date())
    }

    /// Keep only the bars of the most recent session with data.
    ///
    /// A one-day intraday request means "the latest trading session", not
    /// "the last 24 hours".
    pub fn restrict_to_last_session(&self) -> Self {
        let Some(session) = self.last_session() else {
            return Self::empty();
        };
        let points = self
            .points
            .iter()
            .filter(|p| p.timestamp.date() == session)
            .copied()
            .collect();
        Self {
            label: self.label.clone(),
            points,
        }
    }

    /// Keep only bars with timestamps in `[start, end_exclusive)`.
    pub fn slice_window(&self, start: NaiveDate, end_exclusive: NaiveDate) -> Self {
        let lo = start.and_time(NaiveTime::MIN);
        let hi = end_exclusive.and_time(NaiveTime::MIN);
        let points = self
            .points
            .iter()
            .filter(|p| p.timestamp >= lo && p.timestamp < hi)
            .copied()
            .collect();
        Self {
            label: self.label.clone(),
            points,
        }
    }

    /// Whole days between the first and last timestamp, floored, minimum 1.
    pub fn span_days(&self) -> i64 {
        match (self.points.first(), self.points.last()) {
            (Some(first), Some(last)) => (last.timestamp - first.timestamp).num_days().max(1),
            _ => 1,
        }
    }
}

/// Floor a timestamp to midnight.
pub fn floor_to_day(ts: NaiveDateTime) -> NaiveDateTime {
    ts.date().and_time(NaiveTime::MIN)
}

/// Floor a timestamp to the minute.
pub fn floor_to_minute(ts: NaiveDateTime) -> NaiveDateTime {
    ts.date()
        .and_hms_opt(ts.hour(), ts.minute(), 0)
        .expect("hour/minute from a valid timestamp")
}
