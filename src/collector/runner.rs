use std::io::Write;
use std::sync::Arc;
use std::sync::atomic::Ordering;

use futures_util::future::join_all;
use log::{info, warn};
use tokio::sync::mpsc;

use crate::{
    error::Result,
    exchanges::adapter::ExchangeClient,
    metrics::{RunMetrics, RunSummary},
    schema::Symbol,
    selector::select_symbols,
};

use super::{
    completion::Completion,
    fetcher::{FetchContext, fetch_price},
    printer::collect,
};

/// Closest tokio equivalent of an unbuffered handoff: a producer
/// waits while the single slot is occupied.
const OUTPUT_CAPACITY: usize = 1;

/// Selects symbols, then fans out one price fetch per symbol.
///
/// Selection failures are returned before any task is spawned.
pub async fn run<W>(
    client: Arc<dyn ExchangeClient>,
    symbol_count: usize,
    out: W,
) -> Result<(RunSummary, W)>
where
    W: Write + Send + 'static,
{
    let symbols = select_symbols(client.as_ref(), symbol_count).await?;

    info!(
        "[{}] selected {}",
        client.name(),
        symbols
            .iter()
            .map(|s| s.symbol.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    );

    dispatch(client, symbols, out).await
}

/// Fans out one fetch task per symbol into a single printing task.
///
/// SEQUENCE:
/// - Spawn the collector on the receiving end
/// - For each symbol, in order: add one completion unit, then spawn
///   its fetcher (no fetch is awaited before the next is spawned)
/// - Join every fetcher, so all producers are done
/// - Wait for the completion counter to reach zero, so every
///   delivered quote has been printed
/// - Drop the last sender, closing the channel, and join the collector
///
/// A fetcher that panics is logged and counted as failed; its unit is
/// signalled here because the task never reached its own signal.
pub async fn dispatch<W>(
    client: Arc<dyn ExchangeClient>,
    symbols: Vec<Symbol>,
    out: W,
) -> Result<(RunSummary, W)>
where
    W: Write + Send + 'static,
{
    let (tx, rx) = mpsc::channel(OUTPUT_CAPACITY);
    let completion = Arc::new(Completion::new());
    let metrics = Arc::new(RunMetrics::default());

    let printer = tokio::spawn(collect(rx, out, completion.clone(), metrics.clone()));

    let ctx = FetchContext {
        client,
        out: tx,
        completion: completion.clone(),
        metrics: metrics.clone(),
    };

    let mut fetches = Vec::with_capacity(symbols.len());
    for symbol in symbols {
        completion.add(1);
        metrics.symbols_dispatched.fetch_add(1, Ordering::Relaxed);

        let name = symbol.symbol.clone();
        fetches.push((name, tokio::spawn(fetch_price(symbol, ctx.clone()))));
    }

    let (names, handles): (Vec<_>, Vec<_>) = fetches.into_iter().unzip();
    for (name, joined) in names.iter().zip(join_all(handles).await) {
        if let Err(e) = joined {
            warn!("price fetch task for {} aborted: {}", name, e);
            metrics.fetch_failures.fetch_add(1, Ordering::Relaxed);
            completion.done();
        }
    }

    completion.wait().await;

    // Last sender; fetchers dropped their clones when they finished.
    drop(ctx);

    let out = printer.await??;
    Ok((metrics.snapshot(), out))
}
