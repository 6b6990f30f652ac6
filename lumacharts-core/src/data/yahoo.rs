//! Yahoo Finance quote client.
//!
//! Fetches bars from Yahoo's v8 chart API. Yahoo has no official API and is
//! subject to unannounced format changes; every failure here is treated as
//! transient by the strategy chain above.
//!
//! Bulk `download` responses tag each column with the symbol the provider
//! reports for it (the multi-level shape); per-symbol `history` responses use
//! plain field names.

use super::provider::{
    ColumnKey, QuoteClient, QuoteColumn, QuoteError, QuoteRequest, QuoteSpan, RawQuote,
};
use crate::domain::SamplingInterval;
use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::Deserialize;
use std::time::Duration;

/// Yahoo Finance v8 chart API response.
#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: ChartResult,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    result: Option<Vec<ChartData>>,
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    code: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct ChartData {
    meta: Option<ChartMeta>,
    timestamp: Option<Vec<i64>>,
    indicators: Indicators,
}

#[derive(Debug, Deserialize)]
struct ChartMeta {
    symbol: Option<String>,
    #[serde(rename = "gmtoffset")]
    gmt_offset: Option<i32>,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    quote: Vec<QuoteData>,
}

#[derive(Debug, Deserialize)]
struct QuoteData {
    open: Vec<Option<f64>>,
    high: Vec<Option<f64>>,
    low: Vec<Option<f64>>,
    close: Vec<Option<f64>>,
}

/// Yahoo Finance quote client over blocking HTTP.
pub struct YahooClient {
    client: reqwest::blocking::Client,
}

impl YahooClient {
    pub fn new() -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(10))
            .user_agent("Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36")
            .build()
            .expect("failed to build HTTP client");

        Self { client }
    }

    /// Build the chart API URL for a request span and interval.
    fn chart_url(symbol: &str, span: QuoteSpan, interval: SamplingInterval) -> String {
        let interval = interval.as_str();
        match span {
            QuoteSpan::Window { start, end } => {
                // The upstream end bound is exclusive, midnight to midnight.
                let period1 = start.and_hms_opt(0, 0, 0).unwrap().and_utc().timestamp();
                let period2 = end.and_hms_opt(0, 0, 0).unwrap().and_utc().timestamp();
                format!(
                    "https://query2.finance.yahoo.com/v8/finance/chart/{symbol}\
                     ?period1={period1}&period2={period2}&interval={interval}"
                )
            }
            QuoteSpan::TrailingDays(days) => format!(
                "https://query2.finance.yahoo.com/v8/finance/chart/{symbol}\
                 ?range={days}d&interval={interval}"
            ),
        }
    }

    /// Execute one request and unwrap the chart payload.
    fn get_chart(&self, url: &str, symbol: &str) -> Result<ChartData, QuoteError> {
        let resp = self.client.get(url).send().map_err(|e| {
            if e.is_connect() || e.is_timeout() {
                QuoteError::NetworkUnreachable(e.to_string())
            } else {
                QuoteError::Other(e.to_string())
            }
        })?;

        let status = resp.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = resp
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse::<u64>().ok())
                .unwrap_or(60);
            return Err(QuoteError::RateLimited {
                retry_after_secs: retry_after,
            });
        }
        if !status.is_success() {
            return Err(QuoteError::Other(format!("HTTP {status} for {symbol}")));
        }

        let chart: ChartResponse = resp.json().map_err(|e| {
            QuoteError::ResponseFormatChanged(format!("failed to parse response for {symbol}: {e}"))
        })?;

        let result = chart.chart.result.ok_or_else(|| match chart.chart.error {
            Some(err) if err.code == "Not Found" => QuoteError::SymbolNotFound {
                symbol: symbol.to_string(),
            },
            Some(err) => {
                QuoteError::ResponseFormatChanged(format!("{}: {}", err.code, err.description))
            }
            None => QuoteError::ResponseFormatChanged("empty result with no error".into()),
        })?;

        result
            .into_iter()
            .next()
            .ok_or_else(|| QuoteError::ResponseFormatChanged("result array is empty".into()))
    }

    /// Convert a chart payload into the raw columnar table.
    ///
    /// `tag_symbol` selects the multi-level column shape used by bulk
    /// responses. Timestamps carry the exchange offset the provider reports.
    fn to_raw(data: ChartData, requested: &str, tag_symbol: bool) -> Result<RawQuote, QuoteError> {
        let Some(stamps) = data.timestamp else {
            return Ok(RawQuote::default());
        };

        let offset_secs = data
            .meta
            .as_ref()
            .and_then(|m| m.gmt_offset)
            .unwrap_or(0);
        let offset = FixedOffset::east_opt(offset_secs)
            .ok_or_else(|| QuoteError::ResponseFormatChanged(format!("bad gmtoffset: {offset_secs}")))?;

        let mut timestamps: Vec<DateTime<FixedOffset>> = Vec::with_capacity(stamps.len());
        for ts in stamps {
            let stamp = DateTime::from_timestamp(ts, 0)
                .map(|dt| dt.with_timezone(&offset))
                .ok_or_else(|| {
                    QuoteError::ResponseFormatChanged(format!("invalid timestamp: {ts}"))
                })?;
            timestamps.push(stamp);
        }

        let Some(quote) = data.indicators.quote.into_iter().next() else {
            return Ok(RawQuote::default());
        };

        let symbol = data
            .meta
            .and_then(|m| m.symbol)
            .unwrap_or_else(|| requested.to_string());
        let key = |field: &str| {
            if tag_symbol {
                ColumnKey::FieldSymbol {
                    field: field.to_string(),
                    symbol: symbol.clone(),
                }
            } else {
                ColumnKey::Field(field.to_string())
            }
        };
        let column = |field: &str, mut values: Vec<Option<f64>>| {
            values.resize(timestamps.len(), None);
            QuoteColumn {
                key: key(field),
                values,
            }
        };

        Ok(RawQuote {
            columns: vec![
                column("Open", quote.open),
                column("High", quote.high),
                column("Low", quote.low),
                column("Close", quote.close),
            ],
            timestamps,
        })
    }
}

impl Default for YahooClient {
    fn default() -> Self {
        Self::new()
    }
}

impl QuoteClient for YahooClient {
    fn download(&self, request: &QuoteRequest) -> Result<RawQuote, QuoteError> {
        let url = Self::chart_url(&request.symbol, request.span, request.interval);
        let data = self.get_chart(&url, &request.symbol)?;
        Self::to_raw(data, &request.symbol, true)
    }

    fn history(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
        interval: SamplingInterval,
    ) -> Result<RawQuote, QuoteError> {
        let url = Self::chart_url(symbol, QuoteSpan::Window { start, end }, interval);
        let data = self.get_chart(&url, symbol)?;
        Self::to_raw(data, symbol, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "chart": {
            "result": [{
                "meta": {"symbol": "AAPL", "gmtoffset": -14400},
                "timestamp": [1719927000, 1719927300],
                "indicators": {
                    "quote": [{
                        "open": [212.0, 212.5],
                        "high": [212.6, 213.0],
                        "low": [211.8, 212.2],
                        "close": [212.4, null]
                    }]
                }
            }],
            "error": null
        }
    }"#;

    #[test]
    fn parses_chart_payload_into_columns() {
        let resp: ChartResponse = serde_json::from_str(SAMPLE).unwrap();
        let data = resp.chart.result.unwrap().into_iter().next().unwrap();
        let raw = YahooClient::to_raw(data, "AAPL", true).unwrap();

        assert_eq!(raw.timestamps.len(), 2);
        assert_eq!(raw.columns.len(), 4);
        let close = raw
            .columns
            .iter()
            .find(|c| c.key.field() == "Close")
            .unwrap();
        assert_eq!(
            close.key,
            ColumnKey::FieldSymbol {
                field: "Close".into(),
                symbol: "AAPL".into(),
            }
        );
        assert_eq!(close.values, vec![Some(212.4), None]);
        // exchange offset preserved until normalization strips it
        assert_eq!(raw.timestamps[0].offset().local_minus_utc(), -14400);
    }

    #[test]
    fn history_shape_uses_plain_field_keys() {
        let resp: ChartResponse = serde_json::from_str(SAMPLE).unwrap();
        let data = resp.chart.result.unwrap().into_iter().next().unwrap();
        let raw = YahooClient::to_raw(data, "AAPL", false).unwrap();
        assert!(raw
            .columns
            .iter()
            .all(|c| matches!(c.key, ColumnKey::Field(_))));
    }

    #[test]
    fn missing_timestamps_mean_empty() {
        let resp: ChartResponse = serde_json::from_str(
            r#"{"chart": {"result": [{"meta": null, "timestamp": null,
                "indicators": {"quote": []}}], "error": null}}"#,
        )
        .unwrap();
        let data = resp.chart.result.unwrap().into_iter().next().unwrap();
        let raw = YahooClient::to_raw(data, "AAPL", true).unwrap();
        assert!(raw.is_empty());
    }

    #[test]
    fn window_url_uses_epoch_bounds() {
        let url = YahooClient::chart_url(
            "AAPL",
            QuoteSpan::Window {
                start: NaiveDate::from_ymd_opt(2024, 7, 1).unwrap(),
                end: NaiveDate::from_ymd_opt(2024, 7, 2).unwrap(),
            },
            SamplingInterval::Daily,
        );
        assert!(url.contains("period1=1719792000"));
        assert!(url.contains("period2=1719878400"));
        assert!(url.contains("interval=1d"));
    }

    #[test]
    fn trailing_url_uses_range() {
        let url = YahooClient::chart_url(
            "AAPL",
            QuoteSpan::TrailingDays(5),
            SamplingInterval::FiveMinute,
        );
        assert!(url.contains("range=5d"));
        assert!(url.contains("interval=5m"));
    }
}
