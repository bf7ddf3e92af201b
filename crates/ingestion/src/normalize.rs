//! Raw trade normalization.
//!
//! Providers hand over trade records in arrival order with occasional bad
//! rows (zero amounts, duplicated pages). This module filters, sorts, and
//! deduplicates them into a validated [`TradeDataset`].

use dqbench_core::{Result, Side, Trade, TradeDataset};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// A trade record as supplied by the dataset provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawTrade {
    /// Timestamp in milliseconds since epoch.
    pub timestamp: i64,
    /// Trade price.
    pub price: f64,
    /// Base-asset amount.
    pub amount: f64,
    /// Taker side.
    pub side: Side,
}

/// Statistics about a normalization pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IngestStats {
    /// Records received from the provider.
    pub total_records: usize,
    /// Records dropped for non-positive or non-finite price/amount.
    pub dropped_invalid: usize,
    /// Exact consecutive duplicates removed after sorting.
    pub dropped_duplicates: usize,
    /// Trades kept in the dataset.
    pub kept: usize,
}

/// Normalize raw provider records into a validated dataset.
///
/// Drops invalid rows, sorts by timestamp (stable, so same-timestamp trades
/// keep arrival order), and removes exact consecutive duplicates.
pub fn normalize_trades(
    exchange: impl Into<String>,
    symbol: impl Into<String>,
    raw: Vec<RawTrade>,
) -> Result<(TradeDataset, IngestStats)> {
    let mut stats = IngestStats {
        total_records: raw.len(),
        ..IngestStats::default()
    };

    let mut trades: Vec<Trade> = Vec::with_capacity(raw.len());
    for record in raw {
        let valid = record.price > 0.0
            && record.price.is_finite()
            && record.amount > 0.0
            && record.amount.is_finite();
        if !valid {
            stats.dropped_invalid += 1;
            continue;
        }
        trades.push(Trade {
            ts_ms: record.timestamp,
            price: record.price,
            amount: record.amount,
            side: record.side,
        });
    }

    trades.sort_by_key(|t| t.ts_ms);

    let before = trades.len();
    trades.dedup();
    stats.dropped_duplicates = before - trades.len();
    stats.kept = trades.len();

    if stats.dropped_invalid > 0 || stats.dropped_duplicates > 0 {
        warn!(
            invalid = stats.dropped_invalid,
            duplicates = stats.dropped_duplicates,
            kept = stats.kept,
            "dropped records during normalization"
        );
    }

    let dataset = TradeDataset::new(exchange, symbol, trades)?;
    Ok((dataset, stats))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(timestamp: i64, price: f64, amount: f64, side: Side) -> RawTrade {
        RawTrade {
            timestamp,
            price,
            amount,
            side,
        }
    }

    #[test]
    fn test_sorts_and_keeps_valid() {
        let (dataset, stats) = normalize_trades(
            "binance",
            "BTC/USDT",
            vec![
                raw(2_000, 100.0, 1.0, Side::Sell),
                raw(1_000, 100.0, 2.0, Side::Buy),
            ],
        )
        .unwrap();

        assert_eq!(stats.kept, 2);
        assert_eq!(dataset.trades()[0].ts_ms, 1_000);
        assert_eq!(dataset.trades()[1].ts_ms, 2_000);
    }

    #[test]
    fn test_drops_invalid_rows() {
        let (dataset, stats) = normalize_trades(
            "binance",
            "BTC/USDT",
            vec![
                raw(1_000, 100.0, 1.0, Side::Buy),
                raw(1_100, 0.0, 1.0, Side::Buy),
                raw(1_200, 100.0, -1.0, Side::Sell),
                raw(1_300, f64::NAN, 1.0, Side::Sell),
            ],
        )
        .unwrap();

        assert_eq!(stats.dropped_invalid, 3);
        assert_eq!(dataset.len(), 1);
    }

    #[test]
    fn test_removes_duplicate_pages() {
        // Overlapping pagination repeats the same record.
        let page = raw(1_000, 100.0, 1.0, Side::Buy);
        let (dataset, stats) = normalize_trades(
            "binance",
            "BTC/USDT",
            vec![page.clone(), page, raw(1_500, 101.0, 1.0, Side::Sell)],
        )
        .unwrap();

        assert_eq!(stats.dropped_duplicates, 1);
        assert_eq!(dataset.len(), 2);
    }

    #[test]
    fn test_same_timestamp_different_trades_kept() {
        let (dataset, stats) = normalize_trades(
            "binance",
            "BTC/USDT",
            vec![
                raw(1_000, 100.0, 1.0, Side::Buy),
                raw(1_000, 100.5, 1.0, Side::Sell),
            ],
        )
        .unwrap();

        assert_eq!(stats.dropped_duplicates, 0);
        assert_eq!(dataset.len(), 2);
    }

    #[test]
    fn test_empty_input() {
        let (dataset, stats) =
            normalize_trades("binance", "BTC/USDT", Vec::new()).unwrap();
        assert!(dataset.is_empty());
        assert_eq!(stats.total_records, 0);
    }
}
