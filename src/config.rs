use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use serde::Deserialize;

use crate::error::{FanoutError, Result};

pub const DEFAULT_EXCHANGE: &str = "binance";
pub const DEFAULT_BASE_URL: &str = "https://api.binance.com";

/// Number of symbols selected when no configuration overrides it.
pub const DEFAULT_SYMBOL_COUNT: usize = 5;

// ------------------------------------------------------------
// Root configuration
// ------------------------------------------------------------
//
// The program runs without any configuration. An optional
// `config.json` may override the defaults below.
//
// NOTE:
// - Credentials stay empty for public market data.
// - `symbol_count` is both the minimum required and the
//   number of symbols kept.
//
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct Config {
    /// Exchange REST settings
    pub exchange: ExchangeConfig,

    /// Number of symbols to fetch prices for
    pub symbol_count: usize,

    /// Optional debug configuration
    pub debug: Option<DebugConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            exchange: ExchangeConfig::default(),
            symbol_count: DEFAULT_SYMBOL_COUNT,
            debug: None,
        }
    }
}

impl Config {
    /// Debug-level logging requested through `debug.log`.
    pub fn debug_log(&self) -> bool {
        self.debug
            .as_ref()
            .map_or(false, |d| d.log.unwrap_or(false))
    }

    /// One-line summary of the settings in effect, flagging
    /// values that differ from the built-in defaults.
    pub fn describe(&self) -> String {
        let mut line = format!(
            "exchange={} base_url={} symbol_count={}",
            self.exchange.name, self.exchange.base_url, self.symbol_count
        );
        if self.symbol_count != DEFAULT_SYMBOL_COUNT {
            line.push_str(&format!(" (overridden by config.json, default {DEFAULT_SYMBOL_COUNT})"));
        }
        line
    }

    fn validate(self) -> Result<Self> {
        if self.symbol_count == 0 {
            return Err(FanoutError::Config("symbol_count must be at least 1".into()));
        }
        if self.exchange.base_url.trim().is_empty() {
            return Err(FanoutError::Config("exchange.base_url must not be empty".into()));
        }
        Ok(self)
    }
}

// ------------------------------------------------------------
// Exchange configuration
// ------------------------------------------------------------
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ExchangeConfig {
    /// Exchange identifier resolved through the client registry
    pub name: String,

    /// REST root, without trailing path (e.g. "https://api.binance.com")
    pub base_url: String,

    pub api_key: String,

    /// Accepted for parity with signed-endpoint setups. The public
    /// endpoints called here never read it.
    #[allow(dead_code)]
    pub secret_key: String,

    /// Per-request timeout. `None` waits indefinitely.
    pub timeout_ms: Option<u64>,
}

impl Default for ExchangeConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_EXCHANGE.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: String::new(),
            secret_key: String::new(),
            timeout_ms: None,
        }
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct DebugConfig {
    /// Enables debug-level logging
    pub log: Option<bool>,
}

/// Loads the configuration from `path`.
///
/// A missing file yields the defaults. A file that exists but
/// cannot be read or parsed is an error.
pub fn load_config(path: impl AsRef<Path>) -> Result<Config> {
    let data = match fs::read_to_string(path.as_ref()) {
        Ok(data) => data,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Config::default()),
        Err(e) => return Err(e.into()),
    };
    parse_config(&data)
}

fn parse_config(data: &str) -> Result<Config> {
    let cfg: Config = serde_json::from_str(data)
        .map_err(|e| FanoutError::Config(format!("invalid config.json: {e}")))?;
    cfg.validate()
}
