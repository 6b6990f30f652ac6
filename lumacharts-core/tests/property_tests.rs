//! Property tests for planning and normalization invariants.
//!
//! Uses proptest to verify:
//! 1. The interval table is total and ordered over all spans
//! 2. Planned windows never end on a weekend and keep their fixed width
//! 3. Normalized series are strictly increasing with no NaN closes
//! 4. Window slicing only ever removes points

use chrono::{Datelike, Duration, NaiveDate, TimeZone, Timelike, Utc, Weekday};
use lumacharts_core::data::{normalize, ColumnKey, QuoteColumn, RawQuote};
use lumacharts_core::domain::{pick_interval, plan_window, RangeKey, SamplingInterval};
use proptest::prelude::*;

fn arb_range_key() -> impl Strategy<Value = RangeKey> {
    prop::sample::select(vec![
        RangeKey::OneDay,
        RangeKey::OneWeek,
        RangeKey::OneMonth,
        RangeKey::ThreeMonths,
        RangeKey::SixMonths,
        RangeKey::OneYear,
        RangeKey::TwoYears,
    ])
}

fn arb_date() -> impl Strategy<Value = NaiveDate> {
    (0i64..3650).prop_map(|offset| {
        NaiveDate::from_ymd_opt(2018, 1, 1).unwrap() + Duration::days(offset)
    })
}

proptest! {
    /// Every span maps to exactly the granularity band it falls in.
    #[test]
    fn interval_table_is_total(days in 1i64..=2000) {
        let expected = if days <= 2 {
            SamplingInterval::FiveMinute
        } else if days <= 10 {
            SamplingInterval::ThirtyMinute
        } else if days <= 60 {
            SamplingInterval::SixtyMinute
        } else {
            SamplingInterval::Daily
        };
        prop_assert_eq!(pick_interval(days), expected);
    }

    /// A planned window never ends on Saturday or Sunday.
    #[test]
    fn planned_window_never_ends_on_weekend(range in arb_range_key(), reference in arb_date()) {
        let window = plan_window(range, reference);
        prop_assert!(!matches!(window.end.weekday(), Weekday::Sat | Weekday::Sun));
        prop_assert!(window.start <= window.end);
    }

    /// The window width is the keyword's fixed offset, regardless of date.
    #[test]
    fn planned_window_width_is_fixed(range in arb_range_key(), reference in arb_date()) {
        let window = plan_window(range, reference);
        let expected = match range {
            RangeKey::OneDay => 1,
            RangeKey::OneWeek => 7,
            RangeKey::OneMonth => 30,
            RangeKey::ThreeMonths => 90,
            RangeKey::SixMonths => 180,
            RangeKey::OneYear => 365,
            RangeKey::TwoYears => 730,
        };
        prop_assert_eq!((window.end - window.start).num_days(), expected);
    }

    /// Whatever the provider sends — shuffled, duplicated, gappy — the
    /// normalized series is strictly increasing with finite closes.
    #[test]
    fn normalized_series_upholds_invariants(
        bars in prop::collection::vec((0i64..50_000, prop::option::of(-5.0f64..500.0)), 0..60),
    ) {
        let base = Utc.with_ymd_and_hms(2024, 7, 1, 9, 30, 0).unwrap();
        let raw = RawQuote {
            timestamps: bars
                .iter()
                .map(|&(offset, _)| (base + Duration::seconds(offset)).fixed_offset())
                .collect(),
            columns: vec![QuoteColumn {
                key: ColumnKey::Field("Close".into()),
                values: bars.iter().map(|&(_, close)| close).collect(),
            }],
        };

        let series = normalize(&raw, "AAPL", SamplingInterval::FiveMinute);

        for pair in series.points().windows(2) {
            prop_assert!(pair[0].timestamp < pair[1].timestamp);
        }
        for point in series.points() {
            prop_assert!(point.close.is_finite());
            prop_assert_eq!(point.timestamp.second(), 0);
        }
    }

    /// Slicing is a filter: it never adds points and respects the bounds.
    #[test]
    fn slice_window_is_a_subset(
        bars in prop::collection::vec((0i64..30, 1.0f64..500.0), 1..40),
        lo in 0u32..28,
        width in 1u32..10,
    ) {
        let base = Utc.with_ymd_and_hms(2024, 6, 1, 10, 0, 0).unwrap();
        let raw = RawQuote {
            timestamps: bars
                .iter()
                .map(|&(offset, _)| (base + Duration::days(offset)).fixed_offset())
                .collect(),
            columns: vec![QuoteColumn {
                key: ColumnKey::Field("Close".into()),
                values: bars.iter().map(|&(_, close)| Some(close)).collect(),
            }],
        };
        let series = normalize(&raw, "AAPL", SamplingInterval::SixtyMinute);

        let start = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap() + Duration::days(lo as i64);
        let end = start + Duration::days(width as i64);
        let sliced = series.slice_window(start, end);

        prop_assert!(sliced.len() <= series.len());
        for point in sliced.points() {
            prop_assert!(point.timestamp.date() >= start);
            prop_assert!(point.timestamp.date() < end);
        }
    }
}
