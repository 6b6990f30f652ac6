//! Resilient history fetcher — layered retrieval strategies.
//!
//! The provider is unreliable: empty frames, partial frames, shape changes,
//! transport errors. Each strategy is an independent function returning an
//! optional series; the chain short-circuits on the first non-empty
//! normalized result. Exhausting the chain is not an error — the empty series
//! is a fully specified terminal state the caller renders as "no data".

use super::normalize::normalize;
use super::provider::{DiagnosticSink, QuoteClient, QuoteRequest, QuoteSpan, RawQuote};
use crate::domain::{pick_interval, PriceSeries, SamplingInterval, TimeWindow};
use chrono::Duration;

/// Trailing period pulled by the single-session fast path.
const SESSION_LOOKBACK_DAYS: u32 = 5;

/// Fetches close-price history through the fallback chain.
pub struct HistoryFetcher<'a> {
    client: &'a dyn QuoteClient,
    diagnostics: &'a dyn DiagnosticSink,
}

impl<'a> HistoryFetcher<'a> {
    pub fn new(client: &'a dyn QuoteClient, diagnostics: &'a dyn DiagnosticSink) -> Self {
        Self {
            client,
            diagnostics,
        }
    }

    /// Fetch the close series for `symbol` over `window`.
    ///
    /// Never fails: every provider error is caught, reported to the
    /// diagnostic sink with its strategy name, and the chain advances. All
    /// strategies empty → one final diagnostic and an empty series.
    pub fn fetch(&self, symbol: &str, window: &TimeWindow) -> PriceSeries {
        let interval = pick_interval(window.span_days());

        let series = self
            .single_session(symbol, window, interval)
            .or_else(|| self.direct_window(symbol, window, interval))
            .or_else(|| self.history_retry(symbol, window, interval))
            .or_else(|| self.trailing_period(symbol, window, interval));

        match series {
            Some(series) => series,
            None => {
                self.diagnostics.no_data(symbol, window, interval);
                PriceSeries::empty()
            }
        }
    }

    /// Strategy 1 — single-session intraday fast path.
    ///
    /// A one-day intraday request means "the latest trading session", not
    /// "the last 24 hours": pull a short trailing period and keep only the
    /// most recent calendar day with bars.
    fn single_session(
        &self,
        symbol: &str,
        window: &TimeWindow,
        interval: SamplingInterval,
    ) -> Option<PriceSeries> {
        if !interval.is_intraday() || window.span_days() != 1 {
            return None;
        }
        let request = QuoteRequest {
            symbol: symbol.to_string(),
            span: QuoteSpan::TrailingDays(SESSION_LOOKBACK_DAYS),
            interval,
        };
        let raw = self.try_download("session", &request)?;
        let series = normalize(&raw, symbol, interval).restrict_to_last_session();
        non_empty(series)
    }

    /// Strategy 2 — straightforward explicit window.
    ///
    /// The upstream end bound is exclusive; widen by one day so the final
    /// session stays in the response.
    fn direct_window(
        &self,
        symbol: &str,
        window: &TimeWindow,
        interval: SamplingInterval,
    ) -> Option<PriceSeries> {
        let request = QuoteRequest {
            symbol: symbol.to_string(),
            span: QuoteSpan::Window {
                start: window.start,
                end: window.end + Duration::days(1),
            },
            interval,
        };
        let raw = self.try_download("window", &request)?;
        non_empty(normalize(&raw, symbol, interval))
    }

    /// Strategy 3 — same window through the per-symbol handle, whose
    /// upstream pagination/session handling differs from the bulk path.
    fn history_retry(
        &self,
        symbol: &str,
        window: &TimeWindow,
        interval: SamplingInterval,
    ) -> Option<PriceSeries> {
        let raw = match self.client.history(
            symbol,
            window.start,
            window.end + Duration::days(1),
            interval,
        ) {
            Ok(raw) => raw,
            Err(e) => {
                self.diagnostics.strategy_error("history", &e);
                return None;
            }
        };
        non_empty(normalize(&raw, symbol, interval))
    }

    /// Strategy 4 — period-based intraday fallback.
    ///
    /// Pull a trailing period sized to the span, then cut down to the
    /// requested window (or the latest session for one-day requests).
    fn trailing_period(
        &self,
        symbol: &str,
        window: &TimeWindow,
        interval: SamplingInterval,
    ) -> Option<PriceSeries> {
        if !interval.is_intraday() {
            return None;
        }
        let span = window.span_days();
        let period = if span <= 7 { 7 } else { 30 };
        let request = QuoteRequest {
            symbol: symbol.to_string(),
            span: QuoteSpan::TrailingDays(period),
            interval,
        };
        let raw = self.try_download("period", &request)?;
        let series = normalize(&raw, symbol, interval);
        let series = if span == 1 {
            series.restrict_to_last_session()
        } else {
            series.slice_window(window.start, window.end + Duration::days(1))
        };
        non_empty(series)
    }

    fn try_download(&self, strategy: &str, request: &QuoteRequest) -> Option<RawQuote> {
        match self.client.download(request) {
            Ok(raw) => Some(raw),
            Err(e) => {
                self.diagnostics.strategy_error(strategy, &e);
                None
            }
        }
    }
}

fn non_empty(series: PriceSeries) -> Option<PriceSeries> {
    (!series.is_empty()).then_some(series)
}
