//! Static fallback tables used when a provider call fails.
//!
//! Prices are intentionally coarse: they exist so dashboards keep rendering
//! through a provider outage, not to be accurate.

use std::str::FromStr;

use rust_decimal::Decimal;

use crate::models::SearchResult;

/// (ticker, name, quote type, price)
const FALLBACK_TABLE: &[(&str, &str, &str, &str)] = &[
    ("AAPL", "Apple Inc.", "EQUITY", "185.00"),
    ("MSFT", "Microsoft Corporation", "EQUITY", "420.00"),
    ("GOOGL", "Alphabet Inc.", "EQUITY", "175.00"),
    ("AMZN", "Amazon.com Inc.", "EQUITY", "180.00"),
    ("TSLA", "Tesla Inc.", "EQUITY", "170.00"),
    ("NVDA", "NVIDIA Corporation", "EQUITY", "900.00"),
    ("LVMUY", "LVMH Moet Hennessy", "EQUITY", "160.00"),
    ("BTC-USD", "Bitcoin", "CRYPTOCURRENCY", "65000.00"),
    ("ETH-USD", "Ethereum", "CRYPTOCURRENCY", "3500.00"),
    ("SOL-USD", "Solana", "CRYPTOCURRENCY", "145.00"),
];

/// Fallback price for a ticker, if it is one of the well-known ones.
pub fn price(ticker: &str) -> Option<Decimal> {
    FALLBACK_TABLE
        .iter()
        .find(|(symbol, _, _, _)| symbol.eq_ignore_ascii_case(ticker))
        .and_then(|(_, _, _, price)| Decimal::from_str(price).ok())
}

/// Case-insensitive substring scan of the fallback table.
pub fn search(query: &str) -> Vec<SearchResult> {
    let needle = query.trim().to_ascii_uppercase();
    if needle.is_empty() {
        return Vec::new();
    }
    FALLBACK_TABLE
        .iter()
        .filter(|(symbol, name, _, _)| {
            symbol.to_ascii_uppercase().contains(&needle)
                || name.to_ascii_uppercase().contains(&needle)
        })
        .map(|(symbol, name, quote_type, _)| SearchResult {
            symbol: symbol.to_string(),
            short_name: name.to_string(),
            long_name: name.to_string(),
            quote_type: quote_type.to_string(),
            score: 0.0,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn price_lookup_is_case_insensitive() {
        assert_eq!(price("aapl"), Some(dec!(185.00)));
        assert_eq!(price("BTC-USD"), Some(dec!(65000.00)));
        assert_eq!(price("UNKNOWN"), None);
    }

    #[test]
    fn search_matches_ticker_and_name() {
        let by_ticker = search("btc");
        assert_eq!(by_ticker.len(), 1);
        assert_eq!(by_ticker[0].symbol, "BTC-USD");
        assert_eq!(by_ticker[0].quote_type, "CRYPTOCURRENCY");

        let by_name = search("micro");
        assert_eq!(by_name.len(), 1);
        assert_eq!(by_name[0].symbol, "MSFT");
    }

    #[test]
    fn empty_query_matches_nothing() {
        assert!(search("  ").is_empty());
    }
}
