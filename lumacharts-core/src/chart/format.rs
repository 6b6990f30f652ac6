//! Display-format inference from series granularity.

use crate::domain::{floor_to_day, PriceSeries};
use serde::Serialize;

/// Axis and hover formatting derived from a series' temporal granularity.
///
/// Format strings are strftime codes the renderer applies to the date axis
/// and the hover readout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChartFormat {
    pub x_tick_format: &'static str,
    pub hover_format: &'static str,
    pub show_range_slider: bool,
    pub has_intraday_time: bool,
}

impl ChartFormat {
    /// Infer formats from a series' timestamps.
    ///
    /// A series is daily-like when every timestamp equals its day floor; any
    /// residual time-of-day switches the axis to intraday formats.
    pub fn for_series(series: &PriceSeries) -> Self {
        let has_intraday_time = series
            .points()
            .iter()
            .any(|p| floor_to_day(p.timestamp) != p.timestamp);
        let span_days = series.span_days();

        let (x_tick_format, hover_format) = if has_intraday_time {
            ("%b %d, %H:%M", "%b %d, %Y %H:%M")
        } else if span_days <= 120 {
            ("%b %d", "%b %d, %Y")
        } else {
            ("%b %Y", "%b %d, %Y")
        };

        ChartFormat {
            x_tick_format,
            hover_format,
            show_range_slider: span_days > 60,
            has_intraday_time,
        }
    }
}
