use std::time::Duration;

use log::debug;
use reqwest::header::{HeaderMap, HeaderValue};
use serde::Deserialize;

use crate::{
    config::ExchangeConfig,
    error::{FanoutError, Result},
    schema::{ExchangeInfo, PriceQuote, Symbol},
};

use super::adapter::ExchangeClient;

const EXCHANGE_INFO_PATH: &str = "/api/v3/exchangeInfo";
const TICKER_PRICE_PATH: &str = "/api/v3/ticker/price";
const API_KEY_HEADER: &str = "x-mbx-apikey";

/// Binance Spot REST client (public market data only)
///
/// Binance Spot REST:
/// https://developers.binance.com/docs/binance-spot-api-docs/rest-api
///
/// DESIGN:
/// - No retries
/// - No signing; the public endpoints called here need no secret
pub struct BinanceClient {
    http: reqwest::Client,
    base_url: String,
}

impl BinanceClient {
    /// Builds a client from exchange configuration.
    ///
    /// An empty `api_key` sends no key header, which is all the
    /// public endpoints need.
    pub fn new(cfg: &ExchangeConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        if !cfg.api_key.is_empty() {
            let value = HeaderValue::from_str(&cfg.api_key)
                .map_err(|e| FanoutError::Config(format!("invalid api key: {e}")))?;
            headers.insert(API_KEY_HEADER, value);
        }

        let mut builder = reqwest::Client::builder().default_headers(headers);
        if let Some(ms) = cfg.timeout_ms {
            builder = builder.timeout(Duration::from_millis(ms));
        }

        Ok(Self {
            http: builder.build()?,
            base_url: cfg.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Issues a GET and returns the body of a successful response.
    async fn get_text(&self, url: &str) -> Result<String> {
        debug!("[{}] GET {}", self.name(), url);

        let response = self.http.get(url).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(FanoutError::Status { status, body });
        }
        Ok(body)
    }
}

#[async_trait::async_trait]
impl ExchangeClient for BinanceClient {

    fn name(&self) -> &'static str {
        "binance"
    }

    async fn list_symbols(&self) -> Result<Vec<Symbol>> {
        let url = format!("{}{}", self.base_url, EXCHANGE_INFO_PATH);
        let body = self.get_text(&url).await?;
        parse_exchange_info(&body)
    }

    async fn get_last_price(&self, symbol: &str) -> Result<Vec<PriceQuote>> {
        let url = format!("{}{}?symbol={}", self.base_url, TICKER_PRICE_PATH, symbol);
        let body = self.get_text(&url).await?;
        parse_ticker_prices(&body)
    }
}

/// The ticker endpoint answers with a single object when filtered
/// by symbol and with an array otherwise.
#[derive(Deserialize)]
#[serde(untagged)]
enum TickerResponse {
    One(PriceQuote),
    Many(Vec<PriceQuote>),
}

/// Decodes an exchangeInfo body into its symbol list, keeping order.
pub fn parse_exchange_info(body: &str) -> Result<Vec<Symbol>> {
    let info: ExchangeInfo = serde_json::from_str(body)?;
    Ok(info.symbols)
}

/// Decodes a ticker/price body into a sequence of quotes.
pub fn parse_ticker_prices(body: &str) -> Result<Vec<PriceQuote>> {
    let quotes = match serde_json::from_str::<TickerResponse>(body)? {
        TickerResponse::One(quote) => vec![quote],
        TickerResponse::Many(quotes) => quotes,
    };
    Ok(quotes)
}
