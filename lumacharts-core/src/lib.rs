//! LumaCharts Core — resilient price-history acquisition and chart
//! descriptors.
//!
//! This crate contains the data pipeline behind the chart:
//! - Window planning: range keyword + reference date → calendar window and
//!   sampling granularity
//! - Resilient fetcher: layered retrieval strategies over an unreliable
//!   market-data provider, first non-empty normalized series wins
//! - Normalization: raw tabular responses (flat or symbol-tagged columns) →
//!   canonical close series with guaranteed invariants
//! - Chart adapter: granularity-aware axis/hover formats and a serializable
//!   figure descriptor for the presentation layer

pub mod chart;
pub mod config;
pub mod data;
pub mod domain;
pub mod render;

#[cfg(test)]
mod tests {
    use super::*;

    /// Compile-time check: the types a hosting request model may share across
    /// threads are Send + Sync.
    #[allow(dead_code)]
    fn assert_send_sync() {
        fn require_send<T: Send>() {}
        fn require_sync<T: Sync>() {}

        require_send::<domain::TimeWindow>();
        require_sync::<domain::TimeWindow>();
        require_send::<domain::SamplingInterval>();
        require_sync::<domain::SamplingInterval>();
        require_send::<domain::PriceSeries>();
        require_sync::<domain::PriceSeries>();
        require_send::<data::RawQuote>();
        require_sync::<data::RawQuote>();
        require_send::<data::QuoteError>();
        require_sync::<data::QuoteError>();
        require_send::<data::YahooClient>();
        require_sync::<data::YahooClient>();
        require_send::<chart::ChartDescriptor>();
        require_sync::<chart::ChartDescriptor>();
        require_send::<config::AppConfig>();
        require_sync::<config::AppConfig>();
    }
}
