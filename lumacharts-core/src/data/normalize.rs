//! Raw provider responses → canonical close series.

use super::provider::{ColumnKey, QuoteColumn, RawQuote};
use crate::domain::{floor_to_day, floor_to_minute, PricePoint, PriceSeries, SamplingInterval};

/// Convert a raw provider table into the canonical close series.
///
/// Applied to every provider response before a strategy may accept it:
/// selects the close column across both response shapes, drops missing
/// closes, strips timezones to wall-clock time, and floors timestamps to the
/// granularity of the requested interval. Construction sorts and dedupes, so
/// normalizing already-normalized data is a no-op.
pub fn normalize(raw: &RawQuote, symbol: &str, interval: SamplingInterval) -> PriceSeries {
    if raw.is_empty() {
        return PriceSeries::empty();
    }

    let Some(column) = select_close_column(&raw.columns, symbol) else {
        return PriceSeries::empty();
    };

    let mut points = Vec::with_capacity(raw.timestamps.len());
    for (stamp, value) in raw.timestamps.iter().zip(&column.values) {
        let Some(close) = *value else { continue };
        if close.is_nan() {
            continue;
        }
        let naive = stamp.naive_local();
        let timestamp = if interval.is_intraday() {
            floor_to_minute(naive)
        } else {
            floor_to_day(naive)
        };
        points.push(PricePoint { timestamp, close });
    }

    PriceSeries::from_points("Close", points)
}

/// Pick the close column out of either response shape.
///
/// Multi-level columns: prefer the close column tagged with the requested
/// symbol; fall back to the first close column of any symbol, which collapses
/// a lone column the provider tagged differently than requested.
fn select_close_column<'a>(columns: &'a [QuoteColumn], symbol: &str) -> Option<&'a QuoteColumn> {
    let is_close = |c: &&'a QuoteColumn| c.key.field().eq_ignore_ascii_case("close");

    columns
        .iter()
        .filter(is_close)
        .find(|c| match &c.key {
            ColumnKey::FieldSymbol { symbol: tagged, .. } => tagged.eq_ignore_ascii_case(symbol),
            ColumnKey::Field(_) => true,
        })
        .or_else(|| columns.iter().find(is_close))
}
