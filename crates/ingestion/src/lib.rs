//! Batch ingestion and normalization for the data-quality benchmark.
//!
//! This crate handles:
//! - Normalizing raw provider records into a validated `TradeDataset`
//! - Loading recorded trade/order-book batches from JSON files

pub mod loader;
pub mod normalize;

pub use loader::{load_dataset, load_order_book};
pub use normalize::{normalize_trades, IngestStats, RawTrade};
