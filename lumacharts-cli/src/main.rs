//! LumaCharts CLI — render a price-history chart descriptor.
//!
//! Fetches close prices through the resilient pipeline and writes the chart
//! descriptor as JSON, stdout by default. The status line goes to stderr so
//! piped output stays clean.

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::Parser;
use lumacharts_core::config::AppConfig;
use lumacharts_core::data::{StderrDiagnostics, YahooClient};
use lumacharts_core::render::ChartApp;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "lumacharts", about = "LumaCharts — price-history chart renderer")]
struct Cli {
    /// Ticker symbol. Defaults to the configured default ticker.
    ticker: Option<String>,

    /// Date range keyword: 1d, 1w, 1m, 3m, 6m, 1y, 2y.
    #[arg(long, default_value = "3m")]
    range: String,

    /// Reference date (YYYY-MM-DD). Defaults to today.
    #[arg(long)]
    reference_date: Option<String>,

    /// Path to a TOML config file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write the chart descriptor JSON here instead of stdout.
    #[arg(long)]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::default(),
    };

    let reference = match &cli.reference_date {
        Some(text) => NaiveDate::parse_from_str(text, "%Y-%m-%d")
            .with_context(|| format!("invalid reference date: {text}"))?,
        None => Local::now().date_naive(),
    };

    let client = YahooClient::new();
    let diagnostics = StderrDiagnostics;
    let app = ChartApp::new(config, &client, &diagnostics);

    let ticker = cli.ticker.as_deref().unwrap_or("");
    let (figure, status) = app.render_request_at(ticker, &cli.range, reference);

    let json = serde_json::to_string_pretty(&figure).context("serializing chart descriptor")?;
    match &cli.output {
        Some(path) => std::fs::write(path, json)
            .with_context(|| format!("writing {}", path.display()))?,
        None => println!("{json}"),
    }
    eprintln!("{status}");

    Ok(())
}
