// ------------------------------------------------------------
// Module declarations
// ------------------------------------------------------------
//
// - config:    Optional JSON overrides (exchange endpoint, count)
// - error:     Error taxonomy and crate Result alias
// - schema:    Symbol and PriceQuote definitions
// - util:      Process-level helpers (TLS provider)
// - exchanges: Exchange client trait and registry
// - selector:  Picks the first N symbols
// - collector: Concurrent price fan-out and printing
// - metrics:   Per-run counters
//
mod collector;
mod config;
mod error;
mod exchanges;
mod metrics;
mod schema;
mod selector;
mod util;

use std::io;

use anyhow::anyhow;
use log::{LevelFilter, error, info, warn};

use collector::runner::run;
use config::{Config, load_config};
use exchanges::get_client;

// ------------------------------------------------------------
// Application entry point
// ------------------------------------------------------------
//
// Lists the exchange's symbols, keeps the first N, fetches each
// latest price concurrently and prints `<symbol> <price>` lines
// as they arrive.
//
// Exit status is non-zero only when setup or symbol selection
// fails. Individual price failures are logged and skipped.
//
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    util::install_crypto_provider();

    let loaded = load_config("config.json");
    init_logger(log_level(&loaded));

    let config: Config = match loaded {
        Ok(config) => config,
        Err(e) => {
            error!("{}", e);
            return Err(e.into());
        }
    };
    info!("{}", config.describe());

    let client = get_client(&config.exchange)?
        .ok_or_else(|| anyhow!("Exchange '{}' is not supported", config.exchange.name))?;

    match run(client, config.symbol_count, io::stdout()).await {
        Ok((summary, _)) => {
            info!(
                "run complete: dispatched={} printed={} failed={}",
                summary.dispatched, summary.printed, summary.failed
            );
            if !summary.is_balanced() {
                warn!("some dispatched symbols were neither printed nor counted as failed");
            }
            Ok(())
        }
        Err(e) if e.is_client_error() => {
            error!("symbol listing request failed: {}", e);
            Err(e.into())
        }
        Err(e) => {
            error!("{}", e);
            Err(e.into())
        }
    }
}

// ------------------------------------------------------------
// Logger
// ------------------------------------------------------------
//
// Info by default, debug when `debug.log` is set. `RUST_LOG`
// overrides both. Logs go to stderr; stdout carries prices only.
//
// The logger starts before a config error is reported, so an
// unreadable config.json falls back to Info.
//
fn log_level(loaded: &error::Result<Config>) -> LevelFilter {
    match loaded {
        Ok(config) if config.debug_log() => LevelFilter::Debug,
        _ => LevelFilter::Info,
    }
}

fn init_logger(level: LevelFilter) {
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}
