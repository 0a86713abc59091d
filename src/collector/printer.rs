use std::io::{self, Write};
use std::sync::Arc;
use std::sync::atomic::Ordering;

use log::{error, warn};
use tokio::sync::mpsc;

use crate::metrics::RunMetrics;
use crate::schema::PriceQuote;

use super::completion::Completion;

/// Drains quotes and writes one `<symbol> <price>` line per quote.
///
/// - Quotes are printed in arrival order, which is not dispatch order
/// - One completion unit is signalled per received quote, after the
///   write, whether or not the write succeeded
/// - Returns the writer once the channel is closed and drained
///
/// A failed write stops the loop. Quotes still buffered are discarded
/// with their units signalled, and pending sends fail so those fetchers
/// signal their own units.
pub async fn collect<W: Write>(
    mut rx: mpsc::Receiver<PriceQuote>,
    mut out: W,
    completion: Arc<Completion>,
    metrics: Arc<RunMetrics>,
) -> io::Result<W> {
    while let Some(quote) = rx.recv().await {
        let written = writeln!(out, "{quote}").and_then(|_| out.flush());
        completion.done();

        if let Err(e) = written {
            error!("failed to print {}: {}", quote.symbol, e);
            metrics.fetch_failures.fetch_add(1, Ordering::Relaxed);
            discard_pending(&mut rx, &completion, &metrics).await;
            return Err(e);
        }
        metrics.quotes_printed.fetch_add(1, Ordering::Relaxed);
    }

    Ok(out)
}

/// Closes the channel and releases the units of quotes already
/// buffered. Senders still waiting get an error and signal themselves.
async fn discard_pending(
    rx: &mut mpsc::Receiver<PriceQuote>,
    completion: &Completion,
    metrics: &RunMetrics,
) {
    rx.close();
    while let Some(quote) = rx.recv().await {
        warn!("dropping {} after output failure", quote.symbol);
        metrics.fetch_failures.fetch_add(1, Ordering::Relaxed);
        completion.done();
    }
}
