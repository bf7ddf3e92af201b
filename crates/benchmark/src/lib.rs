//! Benchmark orchestration for the data-quality benchmark.
//!
//! This crate provides:
//! - The benchmark runner driving all measurements across N exchanges
//! - Ranking and summary reporting over the resulting records

pub mod report;
pub mod runner;

pub use report::{rank_records, BenchmarkSummary};
pub use runner::{BenchmarkRunner, ExchangeInput};
