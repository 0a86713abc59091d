//! Exchange client registry and factory
//!
//! All exchange-specific REST logic lives in dedicated client
//! modules. The rest of the application talks to exchanges only
//! through the `ExchangeClient` trait.

pub mod adapter;
pub mod binance;

use std::sync::Arc;

use adapter::ExchangeClient;

use crate::config::ExchangeConfig;
use crate::error::Result;

/// Returns an exchange client for `cfg.name`.
///
/// RETURNS:
/// - `Ok(Some(..))` if the exchange is supported
/// - `Ok(None)` if the name is unknown
/// - `Err(..)` if the client could not be constructed
///
/// THREADING:
/// - Clients are wrapped in `Arc` and shared by all fetch tasks
///
pub fn get_client(cfg: &ExchangeConfig) -> Result<Option<Arc<dyn ExchangeClient>>> {
    match cfg.name.as_str() {
        "binance" => Ok(Some(Arc::new(binance::BinanceClient::new(cfg)?))),
        _ => Ok(None),
    }
}
