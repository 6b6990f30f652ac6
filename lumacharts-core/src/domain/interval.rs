//! Sampling granularity for history requests.

use serde::{Deserialize, Serialize};

/// Time spacing between consecutive observations in a fetched series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SamplingInterval {
    FiveMinute,
    ThirtyMinute,
    SixtyMinute,
    Daily,
}

impl SamplingInterval {
    /// Provider wire code for this interval.
    pub fn as_str(self) -> &'static str {
        match self {
            SamplingInterval::FiveMinute => "5m",
            SamplingInterval::ThirtyMinute => "30m",
            SamplingInterval::SixtyMinute => "60m",
            SamplingInterval::Daily => "1d",
        }
    }

    /// Returns true for sub-daily granularities.
    pub fn is_intraday(self) -> bool {
        !matches!(self, SamplingInterval::Daily)
    }
}

/// Choose a granularity from the window span in days.
///
/// Intraday bars are only useful (and only reliably served upstream) for
/// short spans; longer windows fall back to daily bars to bound payload size
/// and stay within provider limits.
pub fn pick_interval(days: i64) -> SamplingInterval {
    if days <= 2 {
        SamplingInterval::FiveMinute
    } else if days <= 10 {
        SamplingInterval::ThirtyMinute
    } else if days <= 60 {
        SamplingInterval::SixtyMinute
    } else {
        SamplingInterval::Daily
    }
}
