use log::debug;

use crate::error::{FanoutError, Result};
use crate::exchanges::adapter::ExchangeClient;
use crate::schema::Symbol;

/// Selects the first `min_count` symbols listed by the exchange.
///
/// - One `list_symbols` call, no retries
/// - Fewer than `min_count` symbols is `InsufficientData`
/// - Order is the exchange's order, untouched
///
pub async fn select_symbols(client: &dyn ExchangeClient, min_count: usize) -> Result<Vec<Symbol>> {
    let mut symbols = client.list_symbols().await?;

    if symbols.len() < min_count {
        return Err(FanoutError::InsufficientData {
            required: min_count,
            received: symbols.len(),
        });
    }

    debug!(
        "[{}] {} symbols listed, keeping first {}",
        client.name(),
        symbols.len(),
        min_count
    );

    symbols.truncate(min_count);
    for s in &symbols {
        debug!("  {} status={} base={} quote={}", s.symbol, s.status, s.base_asset, s.quote_asset);
    }
    Ok(symbols)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collector::testing::StubClient;
    use pretty_assertions::assert_eq;

    fn names(symbols: &[Symbol]) -> Vec<&str> {
        symbols.iter().map(|s| s.symbol.as_str()).collect()
    }

    #[tokio::test]
    async fn fewer_than_minimum_is_insufficient_data() {
        for listed in 0..5 {
            let symbols: Vec<String> = (0..listed).map(|i| format!("SYM{i}USDT")).collect();
            let client = StubClient::with_symbols(&symbols[..]);

            let err = select_symbols(&client, 5).await.unwrap_err();
            assert!(
                matches!(err, FanoutError::InsufficientData { required: 5, received } if received == listed),
                "unexpected error for {listed} symbols: {err}"
            );
            assert_eq!(client.price_calls(), 0);
        }
    }

    #[tokio::test]
    async fn keeps_first_five_in_response_order() {
        let client = StubClient::with_symbols(&[
            "BTCUSDT", "ETHUSDT", "BNBUSDT", "XRPUSDT", "ADAUSDT", "DOGEUSDT", "SOLUSDT",
        ]);

        let selected = select_symbols(&client, 5).await.unwrap();
        assert_eq!(
            names(&selected),
            vec!["BTCUSDT", "ETHUSDT", "BNBUSDT", "XRPUSDT", "ADAUSDT"]
        );
    }

    #[tokio::test]
    async fn exactly_minimum_is_returned_unchanged() {
        let listed = ["ZECBTC", "ETHBTC", "AAVEBTC", "LTCBTC", "BNBBTC"];
        let client = StubClient::with_symbols(&listed);

        let selected = select_symbols(&client, 5).await.unwrap();
        assert_eq!(names(&selected), listed.to_vec());
    }

    #[tokio::test]
    async fn listing_failure_is_a_client_error() {
        let client = StubClient::with_symbols(&["BTCUSDT"]).failing_listing();

        let err = select_symbols(&client, 5).await.unwrap_err();
        assert!(err.is_client_error());
    }
}
