//! JSON batch loading.
//!
//! A benchmark run consumes a static batch recorded by the (external) fetch
//! layer: one trades file and optionally one order-book file per exchange.
//! Formats follow the provider convention of `[price, size]` level pairs.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use dqbench_core::{BookLevel, OrderBookSnapshot, Result, TradeDataset};
use serde::Deserialize;
use tracing::debug;

use crate::normalize::{normalize_trades, RawTrade};

/// Order-book snapshot as recorded by the provider: `[price, size]` pairs.
#[derive(Debug, Deserialize)]
struct RawOrderBook {
    timestamp: i64,
    bids: Vec<(f64, f64)>,
    asks: Vec<(f64, f64)>,
}

/// Load and normalize a recorded trade batch into a dataset.
pub fn load_dataset(
    exchange: impl Into<String>,
    symbol: impl Into<String>,
    path: impl AsRef<Path>,
) -> Result<TradeDataset> {
    let path = path.as_ref();
    let reader = BufReader::new(File::open(path)?);
    let raw: Vec<RawTrade> = serde_json::from_reader(reader)?;
    debug!(path = %path.display(), records = raw.len(), "loaded trade batch");

    let (dataset, _stats) = normalize_trades(exchange, symbol, raw)?;
    Ok(dataset)
}

/// Load a recorded order-book snapshot.
///
/// Levels are re-sorted into canonical order (bids descending, asks
/// ascending) so downstream code can rely on the first level being the best.
pub fn load_order_book(path: impl AsRef<Path>) -> Result<OrderBookSnapshot> {
    let path = path.as_ref();
    let reader = BufReader::new(File::open(path)?);
    let raw: RawOrderBook = serde_json::from_reader(reader)?;
    debug!(
        path = %path.display(),
        bids = raw.bids.len(),
        asks = raw.asks.len(),
        "loaded order book"
    );

    let mut bids: Vec<BookLevel> = raw
        .bids
        .into_iter()
        .map(|(price, size)| BookLevel { price, size })
        .collect();
    let mut asks: Vec<BookLevel> = raw
        .asks
        .into_iter()
        .map(|(price, size)| BookLevel { price, size })
        .collect();

    bids.sort_by(|a, b| b.price.total_cmp(&a.price));
    asks.sort_by(|a, b| a.price.total_cmp(&b.price));

    Ok(OrderBookSnapshot {
        ts_ms: raw.timestamp,
        bids,
        asks,
    })
}
