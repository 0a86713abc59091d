use std::sync::Arc;
use std::sync::atomic::Ordering;

use log::{debug, warn};
use tokio::sync::mpsc;

use crate::{
    error::{FanoutError, Result},
    exchanges::adapter::ExchangeClient,
    metrics::RunMetrics,
    schema::{PriceQuote, Symbol},
};

use super::completion::Completion;

/// Handles a fetcher needs besides its symbol. Cloned once per task.
#[derive(Clone)]
pub struct FetchContext {
    pub client: Arc<dyn ExchangeClient>,
    pub out: mpsc::Sender<PriceQuote>,
    pub completion: Arc<Completion>,
    pub metrics: Arc<RunMetrics>,
}

/// Fetches the latest price of one symbol and forwards it.
///
/// FAILURES:
/// - Client error or empty price list: one `warn!` line, nothing sent
/// - Errors never leave this function
///
/// COMPLETION:
/// - On success the collector signals completion after printing
/// - On failure this function signals it, so the dispatcher's wait
///   is not left with a unit nobody will ever finish
///
pub async fn fetch_price(symbol: Symbol, ctx: FetchContext) {
    let quote = match last_price(ctx.client.as_ref(), &symbol.symbol).await {
        Ok(quote) => quote,
        Err(e) => {
            warn!("[{}] price fetch failed for {}: {}", ctx.client.name(), symbol.symbol, e);
            fail(&ctx);
            return;
        }
    };

    debug!("[{}] {} -> {}", ctx.client.name(), quote.symbol, quote.price);

    // Suspends until the collector has room for the quote.
    if ctx.out.send(quote).await.is_err() {
        warn!("collector closed before {} could be delivered", symbol.symbol);
        fail(&ctx);
    }
}

fn fail(ctx: &FetchContext) {
    ctx.metrics.fetch_failures.fetch_add(1, Ordering::Relaxed);
    ctx.completion.done();
}

/// First quote returned for `symbol`, or `EmptyResult`.
async fn last_price(client: &dyn ExchangeClient, symbol: &str) -> Result<PriceQuote> {
    client
        .get_last_price(symbol)
        .await?
        .into_iter()
        .next()
        .ok_or_else(|| FanoutError::EmptyResult(symbol.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collector::testing::StubClient;

    fn context(client: StubClient) -> (FetchContext, mpsc::Receiver<PriceQuote>) {
        let (tx, rx) = mpsc::channel(1);
        let completion = Arc::new(Completion::new());
        completion.add(1);
        let ctx = FetchContext {
            client: Arc::new(client),
            out: tx,
            completion,
            metrics: Arc::new(RunMetrics::default()),
        };
        (ctx, rx)
    }

    #[tokio::test]
    async fn success_sends_one_quote_and_leaves_completion_to_collector() {
        let (ctx, mut rx) = context(StubClient::with_symbols(&["BTCUSDT"]).price("BTCUSDT", "50000.00"));

        fetch_price(Symbol::new("BTCUSDT"), ctx.clone()).await;
        drop(ctx.out);

        assert_eq!(rx.recv().await, Some(PriceQuote::new("BTCUSDT", "50000.00")));
        assert_eq!(rx.recv().await, None);
        assert_eq!(ctx.completion.outstanding(), 1);
        assert_eq!(ctx.metrics.fetch_failures.load(Ordering::Relaxed), 0);
    }

    #[tokio::test]
    async fn client_error_sends_nothing_and_signals_completion() {
        let (ctx, mut rx) = context(StubClient::with_symbols(&["BTCUSDT"]).failing("BTCUSDT"));

        fetch_price(Symbol::new("BTCUSDT"), ctx.clone()).await;
        drop(ctx.out);

        assert_eq!(rx.recv().await, None);
        assert_eq!(ctx.completion.outstanding(), 0);
        assert_eq!(ctx.metrics.fetch_failures.load(Ordering::Relaxed), 1);
    }

    #[tokio::test]
    async fn empty_price_list_is_dropped() {
        let (ctx, mut rx) = context(StubClient::with_symbols(&["ETHUSDT"]).empty("ETHUSDT"));

        fetch_price(Symbol::new("ETHUSDT"), ctx.clone()).await;
        drop(ctx.out);

        assert_eq!(rx.recv().await, None);
        assert_eq!(ctx.completion.outstanding(), 0);
    }

    #[tokio::test]
    async fn closed_collector_counts_as_failure() {
        let (ctx, rx) = context(StubClient::with_symbols(&["BNBUSDT"]));
        drop(rx);

        fetch_price(Symbol::new("BNBUSDT"), ctx.clone()).await;

        assert_eq!(ctx.completion.outstanding(), 0);
        assert_eq!(ctx.metrics.fetch_failures.load(Ordering::Relaxed), 1);
    }

    #[tokio::test]
    async fn empty_list_maps_to_empty_result_error() {
        let client = StubClient::with_symbols(&["XRPUSDT"]).empty("XRPUSDT");
        let err = last_price(&client, "XRPUSDT").await.unwrap_err();
        assert!(matches!(err, FanoutError::EmptyResult(ref s) if s == "XRPUSDT"));
    }
}
