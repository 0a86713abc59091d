use crate::error::Result;
use crate::schema::{PriceQuote, Symbol};

/// ExchangeClient is the boundary between the fan-out pipeline
/// and an exchange's public REST API.
///
/// Each implementation must:
/// - List the tradable symbols in the order the exchange returns them
/// - Return the latest price for one symbol
///
/// THREAD SAFETY:
/// - Must be Send + Sync
/// - One client instance is shared by every price fetcher
///
#[async_trait::async_trait]
pub trait ExchangeClient: Send + Sync {

    /// Canonical exchange name, used for logging.
    fn name(&self) -> &'static str;

    /// Lists all symbols known to the exchange.
    ///
    /// CONTRACT:
    /// - Order is preserved exactly as received
    /// - A single request, no retries
    ///
    async fn list_symbols(&self) -> Result<Vec<Symbol>>;

    /// Fetches the latest price for `symbol`.
    ///
    /// RETURNS:
    /// - The quotes reported by the exchange. For a valid symbol this
    ///   is exactly one element; an empty vector is not an error here,
    ///   callers decide how to treat it.
    ///
    async fn get_last_price(&self, symbol: &str) -> Result<Vec<PriceQuote>>;
}
