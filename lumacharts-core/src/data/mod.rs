//! Provider client, normalization, and the resilient fetcher.

pub mod fetch;
pub mod normalize;
pub mod provider;
pub mod yahoo;

pub use fetch::HistoryFetcher;
pub use normalize::normalize;
pub use provider::{
    ColumnKey, DiagnosticSink, QuoteClient, QuoteColumn, QuoteError, QuoteRequest, QuoteSpan,
    RawQuote, StderrDiagnostics,
};
pub use yahoo::YahooClient;
