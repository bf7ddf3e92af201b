//! Error types for the data-quality benchmark.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the data-quality benchmark.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error (bad weights, unknown component). Fatal at
    /// construction time.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Data error (invalid or malformed input batch).
    #[error("Data error: {0}")]
    Data(String),

    /// Insufficient data for a meaningful measurement.
    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    /// Crossed or empty order book.
    #[error("Invalid order book: {0}")]
    InvalidOrderBook(String),

    /// Statistical computation error.
    #[error("Statistics error: {0}")]
    Statistics(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Error::Config(msg.into())
    }

    /// Create a data error.
    pub fn data(msg: impl Into<String>) -> Self {
        Error::Data(msg.into())
    }

    /// Create an insufficient data error.
    pub fn insufficient_data(msg: impl Into<String>) -> Self {
        Error::InsufficientData(msg.into())
    }

    /// Create an invalid order book error.
    pub fn invalid_order_book(msg: impl Into<String>) -> Self {
        Error::InvalidOrderBook(msg.into())
    }

    /// Create a statistics error.
    pub fn statistics(msg: impl Into<String>) -> Self {
        Error::Statistics(msg.into())
    }

    /// Whether this error is a recoverable insufficient-data condition.
    pub fn is_insufficient_data(&self) -> bool {
        matches!(self, Error::InsufficientData(_))
    }
}
