//! Serializable chart descriptor for the presentation layer.
//!
//! The descriptor mirrors the renderer's figure model closely enough to map
//! 1:1 onto a plotting backend: one close-price trace, a date x-axis with
//! weekend breaks, a dollar y-axis, and a unified hover readout. Placeholder
//! figures (no data, error) carry only a title.

use super::format::ChartFormat;
use crate::domain::{floor_to_day, PriceSeries, TimeWindow};
use chrono::NaiveDateTime;
use serde::Serialize;

/// Renderable chart handed to the presentation layer.
#[derive(Debug, Clone, Serialize)]
pub struct ChartDescriptor {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trace: Option<PriceTrace>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layout: Option<ChartLayout>,
}

impl ChartDescriptor {
    /// Title-only placeholder (no data / error renditions).
    pub fn placeholder(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            trace: None,
            layout: None,
        }
    }

    /// Placeholder for a window that produced no rows.
    pub fn no_data(ticker: &str, window: &TimeWindow) -> Self {
        Self::placeholder(format!(
            "No data for '{ticker}' in {window}. Try another range."
        ))
    }

    pub fn has_data(&self) -> bool {
        self.trace.is_some()
    }
}

/// Single close-price line with markers.
#[derive(Debug, Clone, Serialize)]
pub struct PriceTrace {
    pub name: String,
    pub x: Vec<NaiveDateTime>,
    pub y: Vec<f64>,
    pub mode: &'static str,
    pub line_width: f64,
    pub marker_size: f64,
    pub color: String,
    /// Never draw a line across a gap (weekends, halts).
    pub connect_gaps: bool,
    pub hover_template: String,
}

/// Axis and interaction settings for the price figure.
#[derive(Debug, Clone, Serialize)]
pub struct ChartLayout {
    pub x_tick_format: &'static str,
    pub show_range_slider: bool,
    /// Mask the Saturday→Monday gap on the date axis.
    pub weekend_break: bool,
    pub y_tick_prefix: &'static str,
    /// Hover readout keyed to the nearest x-value across the figure.
    pub unified_hover: bool,
}

/// Build the full price figure for a non-empty series.
///
/// Daily-like timestamps are re-floored to midnight in case upstream left
/// residual time-of-day on what should be date-level bars.
pub fn price_figure(series: &PriceSeries, ticker: &str, accent: &str) -> ChartDescriptor {
    let format = ChartFormat::for_series(series);

    let x: Vec<NaiveDateTime> = series
        .points()
        .iter()
        .map(|p| {
            if format.has_intraday_time {
                p.timestamp
            } else {
                floor_to_day(p.timestamp)
            }
        })
        .collect();
    let y: Vec<f64> = series.points().iter().map(|p| p.close).collect();

    let trace = PriceTrace {
        name: format!("{ticker} {}", series.label()),
        x,
        y,
        mode: "lines+markers",
        line_width: 2.2,
        marker_size: 3.5,
        color: accent.to_string(),
        connect_gaps: false,
        hover_template: format!("%{{x|{}}}<br>Close: $%{{y:.2f}}", format.hover_format),
    };

    let layout = ChartLayout {
        x_tick_format: format.x_tick_format,
        show_range_slider: format.show_range_slider,
        weekend_break: true,
        y_tick_prefix: "$",
        unified_hover: true,
    };

    ChartDescriptor {
        title: format!("{ticker} Price Performance"),
        trace: Some(trace),
        layout: Some(layout),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PricePoint;
    use chrono::NaiveDate;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 7, d).unwrap()
    }

    #[test]
    fn daily_like_series_renders_midnight_timestamps() {
        let series = PriceSeries::from_points(
            "Close",
            vec![
                PricePoint {
                    timestamp: day(1).and_hms_opt(0, 0, 0).unwrap(),
                    close: 1.0,
                },
                PricePoint {
                    timestamp: day(2).and_hms_opt(0, 0, 0).unwrap(),
                    close: 2.0,
                },
            ],
        );
        let figure = price_figure(&series, "AAPL", "#6366f1");
        let trace = figure.trace.unwrap();
        assert!(trace.x.iter().all(|ts| ts.time() == chrono::NaiveTime::MIN));
        assert_eq!(trace.hover_template, "%{x|%b %d, %Y}<br>Close: $%{y:.2f}");
        assert!(!trace.connect_gaps);
    }

    #[test]
    fn intraday_series_keeps_time_of_day() {
        let series = PriceSeries::from_points(
            "Close",
            vec![
                PricePoint {
                    timestamp: day(1).and_hms_opt(9, 30, 0).unwrap(),
                    close: 1.0,
                },
                PricePoint {
                    timestamp: day(1).and_hms_opt(9, 35, 0).unwrap(),
                    close: 1.1,
                },
            ],
        );
        let figure = price_figure(&series, "AAPL", "#6366f1");
        let trace = figure.trace.unwrap();
        assert_eq!(trace.x[0], day(1).and_hms_opt(9, 30, 0).unwrap());
    }

    #[test]
    fn placeholder_carries_only_a_title() {
        let figure = ChartDescriptor::placeholder("Error");
        assert!(!figure.has_data());
        assert!(figure.layout.is_none());
        let json = serde_json::to_value(&figure).unwrap();
        assert_eq!(json["title"], "Error");
        assert!(json.get("trace").is_none());
    }

    #[test]
    fn no_data_title_names_ticker_and_window() {
        let window = TimeWindow::new(day(1), day(5));
        let figure = ChartDescriptor::no_data("ZZZZ", &window);
        assert!(figure.title.contains("ZZZZ"));
        assert!(figure.title.contains("2024-07-01"));
        assert!(figure.title.contains("2024-07-05"));
    }

    #[test]
    fn figure_layout_masks_weekends_and_unifies_hover() {
        let series = PriceSeries::from_points(
            "Close",
            vec![PricePoint {
                timestamp: day(1).and_hms_opt(0, 0, 0).unwrap(),
                close: 1.0,
            }],
        );
        let layout = price_figure(&series, "SPY", "#6366f1").layout.unwrap();
        assert!(layout.weekend_break);
        assert!(layout.unified_hover);
        assert_eq!(layout.y_tick_prefix, "$");
    }
}
