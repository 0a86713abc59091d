/// Collector module
///
/// Fan-out/fan-in of price fetches:
/// - `runner`:     dispatcher (selection, spawning, shutdown order)
/// - `fetcher`:    one task per symbol, producer side of the channel
/// - `printer`:    single consumer writing one line per quote
/// - `completion`: outstanding-work counter the dispatcher waits on
///
/// Design notes:
/// - Exchange-specific logic MUST NOT live here
/// - No retries, no rate limiting, no ordering across symbols
pub mod completion;
pub mod fetcher;
pub mod printer;
pub mod runner;

#[cfg(test)]
pub mod testing;
