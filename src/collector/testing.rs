//! In-memory exchange client for tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use crate::error::{FanoutError, Result};
use crate::exchanges::adapter::ExchangeClient;
use crate::schema::{PriceQuote, Symbol};

#[derive(Clone)]
enum PriceReply {
    Price(String),
    Fail,
    Empty,
    Panic,
}

pub struct StubClient {
    symbols: Vec<Symbol>,
    replies: HashMap<String, PriceReply>,
    delays: HashMap<String, Duration>,
    fail_listing: bool,
    price_calls: AtomicUsize,
}

impl StubClient {
    /// Lists `symbols`; every symbol prices at "1.00" unless overridden.
    pub fn with_symbols<S: AsRef<str>>(symbols: &[S]) -> Self {
        Self {
            symbols: symbols.iter().map(|s| Symbol::new(s.as_ref())).collect(),
            replies: HashMap::new(),
            delays: HashMap::new(),
            fail_listing: false,
            price_calls: AtomicUsize::new(0),
        }
    }

    pub fn price(mut self, symbol: &str, price: &str) -> Self {
        self.replies
            .insert(symbol.to_string(), PriceReply::Price(price.to_string()));
        self
    }

    pub fn failing(mut self, symbol: &str) -> Self {
        self.replies.insert(symbol.to_string(), PriceReply::Fail);
        self
    }

    pub fn empty(mut self, symbol: &str) -> Self {
        self.replies.insert(symbol.to_string(), PriceReply::Empty);
        self
    }

    pub fn panicking(mut self, symbol: &str) -> Self {
        self.replies.insert(symbol.to_string(), PriceReply::Panic);
        self
    }

    pub fn delayed(mut self, symbol: &str, millis: u64) -> Self {
        self.delays
            .insert(symbol.to_string(), Duration::from_millis(millis));
        self
    }

    pub fn failing_listing(mut self) -> Self {
        self.fail_listing = true;
        self
    }

    pub fn price_calls(&self) -> usize {
        self.price_calls.load(Ordering::SeqCst)
    }
}

fn unavailable() -> FanoutError {
    FanoutError::Status {
        status: reqwest::StatusCode::SERVICE_UNAVAILABLE,
        body: "stub outage".into(),
    }
}

#[async_trait::async_trait]
impl ExchangeClient for StubClient {
    fn name(&self) -> &'static str {
        "stub"
    }

    async fn list_symbols(&self) -> Result<Vec<Symbol>> {
        if self.fail_listing {
            return Err(unavailable());
        }
        Ok(self.symbols.clone())
    }

    async fn get_last_price(&self, symbol: &str) -> Result<Vec<PriceQuote>> {
        self.price_calls.fetch_add(1, Ordering::SeqCst);

        if let Some(delay) = self.delays.get(symbol) {
            tokio::time::sleep(*delay).await;
        }

        match self.replies.get(symbol).cloned() {
            Some(PriceReply::Price(price)) => Ok(vec![PriceQuote::new(symbol, price)]),
            Some(PriceReply::Fail) => Err(unavailable()),
            Some(PriceReply::Empty) => Ok(Vec::new()),
            Some(PriceReply::Panic) => panic!("stub panic for {symbol}"),
            None => Ok(vec![PriceQuote::new(symbol, "1.00")]),
        }
    }
}
