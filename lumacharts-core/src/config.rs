//! Application configuration.
//!
//! Explicit configuration handed to the orchestration entry point; nothing
//! here is process-global, so the fetch/format logic stays free of hidden
//! dependencies.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Chart application settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Ticker used when the request leaves the symbol blank.
    pub default_ticker: String,
    /// Accent color for the price trace (CSS hex).
    pub accent: String,
    /// Symbols offered by the presentation layer's picker.
    pub ticker_options: Vec<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            default_ticker: "AAPL".into(),
            accent: "#6366f1".into(),
            ticker_options: [
                "AAPL", "MSFT", "GOOGL", "AMZN", "NVDA", "TSLA", "META", "SPY", "QQQ",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
        }
    }
}

impl AppConfig {
    /// Load from a TOML file; missing fields take their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        toml::from_str(&text).with_context(|| format!("parsing config {}", path.display()))
    }
}
