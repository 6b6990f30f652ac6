//! Orchestration entry point consumed by the presentation layer.
//!
//! One fetch-and-render cycle runs to completion, stateless and independent
//! of any other cycle. The caller always gets a renderable descriptor plus a
//! short status string — never an error or a panic across this boundary.

use crate::chart::{price_figure, ChartDescriptor};
use crate::config::AppConfig;
use crate::data::{DiagnosticSink, HistoryFetcher, QuoteClient};
use crate::domain::{plan_window, RangeKey};
use anyhow::Result;
use chrono::{Local, NaiveDate};

/// One chart application: configuration plus the collaborators each render
/// cycle needs.
pub struct ChartApp<'a> {
    config: AppConfig,
    client: &'a dyn QuoteClient,
    diagnostics: &'a dyn DiagnosticSink,
}

impl<'a> ChartApp<'a> {
    pub fn new(
        config: AppConfig,
        client: &'a dyn QuoteClient,
        diagnostics: &'a dyn DiagnosticSink,
    ) -> Self {
        Self {
            config,
            client,
            diagnostics,
        }
    }

    /// Render a chart for today's date.
    pub fn render_request(&self, ticker_input: &str, range_keyword: &str) -> (ChartDescriptor, String) {
        self.render_request_at(ticker_input, range_keyword, Local::now().date_naive())
    }

    /// Render a chart anchored to an explicit reference date.
    ///
    /// Unexpected internal errors are caught here and only here: the full
    /// error goes to the diagnostic sink, the caller gets an "Error" figure
    /// and a status string with the error text.
    pub fn render_request_at(
        &self,
        ticker_input: &str,
        range_keyword: &str,
        reference: NaiveDate,
    ) -> (ChartDescriptor, String) {
        match self.try_render(ticker_input, range_keyword, reference) {
            Ok(rendered) => rendered,
            Err(error) => {
                self.diagnostics.internal_error(&format!("{error:#}"));
                failure_response(&error)
            }
        }
    }

    fn try_render(
        &self,
        ticker_input: &str,
        range_keyword: &str,
        reference: NaiveDate,
    ) -> Result<(ChartDescriptor, String)> {
        let ticker = effective_ticker(ticker_input, &self.config.default_ticker);
        let range = RangeKey::parse_or_default(range_keyword);
        let window = plan_window(range, reference);

        let fetcher = HistoryFetcher::new(self.client, self.diagnostics);
        let series = fetcher.fetch(&ticker, &window);

        if series.is_empty() {
            return Ok((
                ChartDescriptor::no_data(&ticker, &window),
                format!("No rows returned for {ticker}."),
            ));
        }

        let figure = price_figure(&series, &ticker, &self.config.accent);
        let status = format!(
            "Showing {ticker} – {} window ({} rows)",
            range.as_str().to_uppercase(),
            series.len()
        );
        Ok((figure, status))
    }
}

/// Uppercase and trim the requested ticker; blank falls back to the default.
fn effective_ticker(input: &str, default: &str) -> String {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        default.to_string()
    } else {
        trimmed.to_uppercase()
    }
}

fn failure_response(error: &anyhow::Error) -> (ChartDescriptor, String) {
    (
        ChartDescriptor::placeholder("Error"),
        format!("Error: {error:#}"),
    )
}
