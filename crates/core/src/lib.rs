//! Core types and configuration for the exchange data-quality benchmark.
//!
//! This crate provides shared types used across all other crates:
//! - Market data types (trades, datasets, order-book snapshots)
//! - Measurement and trust-score result types
//! - Configuration structures
//! - Common error types

pub mod config;
pub mod error;
pub mod types;

pub use config::Config;
pub use error::{Error, Result};
pub use types::*;
