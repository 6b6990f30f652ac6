//! Quote client trait, raw response shape, and structured error types.
//!
//! The QuoteClient trait abstracts over the market-data provider so the
//! fetcher can be exercised against mocks; the real implementation lives in
//! `data::yahoo`.

use crate::domain::{SamplingInterval, TimeWindow};
use chrono::{DateTime, FixedOffset, NaiveDate};
use thiserror::Error;

/// Structured errors from the quote provider.
///
/// Every variant is transient from the fetcher's point of view: the strategy
/// chain reports it to the diagnostic sink and advances.
#[derive(Debug, Error)]
pub enum QuoteError {
    #[error("network unreachable: {0}")]
    NetworkUnreachable(String),

    #[error("rate limited by provider (retry after {retry_after_secs}s)")]
    RateLimited { retry_after_secs: u64 },

    #[error("response format changed: {0}")]
    ResponseFormatChanged(String),

    #[error("symbol not found: {symbol}")]
    SymbolNotFound { symbol: String },

    #[error("provider error: {0}")]
    Other(String),
}

/// Column identity in a raw provider table.
///
/// Bulk queries may tag each column with the symbol it belongs to; per-symbol
/// queries use plain field names. Two shapes, one type — the variance is in
/// the data, not a type hierarchy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnKey {
    Field(String),
    FieldSymbol { field: String, symbol: String },
}

impl ColumnKey {
    /// Field name regardless of shape.
    pub fn field(&self) -> &str {
        match self {
            ColumnKey::Field(field) => field,
            ColumnKey::FieldSymbol { field, .. } => field,
        }
    }
}

/// One value column of a raw response. Missing observations stay `None`.
#[derive(Debug, Clone)]
pub struct QuoteColumn {
    pub key: ColumnKey,
    pub values: Vec<Option<f64>>,
}

/// Raw tabular provider response, before normalization.
///
/// Timestamps keep whatever offset the provider reported; normalization
/// strips them to wall-clock time. May be empty.
#[derive(Debug, Clone, Default)]
pub struct RawQuote {
    pub timestamps: Vec<DateTime<FixedOffset>>,
    pub columns: Vec<QuoteColumn>,
}

impl RawQuote {
    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty() || self.columns.is_empty()
    }
}

/// Span selector for a bulk query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuoteSpan {
    /// Explicit calendar window; the end bound is exclusive upstream.
    Window { start: NaiveDate, end: NaiveDate },
    /// Trailing period of N calendar days ending now.
    TrailingDays(u32),
}

/// Bulk query parameters.
#[derive(Debug, Clone)]
pub struct QuoteRequest {
    pub symbol: String,
    pub span: QuoteSpan,
    pub interval: SamplingInterval,
}

/// Client interface to the market-data provider.
///
/// Two entry points that take different code paths upstream; both may fail on
/// transport. The provider is assumed unreliable: empty results, partial
/// results, and shape changes are all expected.
pub trait QuoteClient: Send + Sync {
    /// Bulk query by explicit window or trailing period.
    fn download(&self, request: &QuoteRequest) -> Result<RawQuote, QuoteError>;

    /// Per-symbol handle query over an explicit window. Exercises different
    /// upstream pagination/session handling than `download`.
    fn history(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
        interval: SamplingInterval,
    ) -> Result<RawQuote, QuoteError>;
}

/// Write-only observability channel for the fetch pipeline.
///
/// One line per event; never consumed programmatically.
pub trait DiagnosticSink: Send + Sync {
    /// A provider call failed inside the named strategy.
    fn strategy_error(&self, strategy: &str, error: &QuoteError);

    /// Every strategy came back empty for this request.
    fn no_data(&self, symbol: &str, window: &TimeWindow, interval: SamplingInterval);

    /// An unexpected error reached the orchestration boundary.
    fn internal_error(&self, detail: &str);
}

/// Default sink: one line per event on standard error.
pub struct StderrDiagnostics;

impl DiagnosticSink for StderrDiagnostics {
    fn strategy_error(&self, strategy: &str, error: &QuoteError) {
        eprintln!("[{strategy}] {error}");
    }

    fn no_data(&self, symbol: &str, window: &TimeWindow, interval: SamplingInterval) {
        eprintln!(
            "[fetch] no data for {symbol} {window} (interval {})",
            interval.as_str()
        );
    }

    fn internal_error(&self, detail: &str) {
        eprintln!("[render] {detail}");
    }
}
