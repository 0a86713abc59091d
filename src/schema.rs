use std::fmt;

use serde::{Deserialize, Serialize};

// ------------------------------------------------------------
// Trading symbol
// ------------------------------------------------------------
//
// One entry of the exchange's symbol listing.
//
// Only `symbol` is used by the pipeline. The remaining fields
// are decoded for logging and default to empty when the
// exchange omits them.
//
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Symbol {
    /// Exchange identifier of the pair (e.g. "BTCUSDT")
    pub symbol: String,

    /// Trading status as reported by the exchange (e.g. "TRADING")
    #[serde(default)]
    pub status: String,

    #[serde(default)]
    pub base_asset: String,

    #[serde(default)]
    pub quote_asset: String,
}

impl Symbol {
    /// Builds a symbol that only carries its identifier.
    #[cfg(test)]
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            status: String::new(),
            base_asset: String::new(),
            quote_asset: String::new(),
        }
    }
}

/// Body of the exchange info endpoint. Everything except the
/// symbol list is ignored.
#[derive(Debug, Deserialize)]
pub struct ExchangeInfo {
    #[serde(default)]
    pub symbols: Vec<Symbol>,
}

// ------------------------------------------------------------
// Price quote
// ------------------------------------------------------------
//
// Latest price of one symbol.
//
// DESIGN DECISION:
// The price is kept as the exact decimal string returned by
// the exchange. It is never parsed into a float.
//
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct PriceQuote {
    pub symbol: String,
    pub price: String,
}

impl PriceQuote {
    pub fn new(symbol: impl Into<String>, price: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            price: price.into(),
        }
    }
}

/// Output line format: `<symbol> <price>`
impl fmt::Display for PriceQuote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.symbol, self.price)
    }
}
