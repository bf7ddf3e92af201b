//! Configuration structures for the data-quality benchmark.

use serde::{Deserialize, Serialize};

/// Main configuration for the benchmark.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Tick completeness configuration.
    pub completeness: CompletenessConfig,
    /// Order-book depth accuracy configuration.
    pub order_book: OrderBookConfig,
    /// Benford's-Law test configuration.
    pub benford: BenfordConfig,
    /// Buy/sell symmetry configuration.
    pub symmetry: SymmetryConfig,
    /// Timestamp normalization configuration.
    pub normalization: NormalizationConfig,
    /// Trust-score aggregation configuration.
    pub scoring: ScoringConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            completeness: CompletenessConfig::default(),
            order_book: OrderBookConfig::default(),
            benford: BenfordConfig::default(),
            symmetry: SymmetryConfig::default(),
            normalization: NormalizationConfig::default(),
            scoring: ScoringConfig::default(),
        }
    }
}

/// Tick completeness configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletenessConfig {
    /// Inter-trade delta above which the interval counts as a gap (ms).
    pub gap_threshold_ms: i64,
}

impl Default for CompletenessConfig {
    fn default() -> Self {
        Self {
            gap_threshold_ms: 1_000,
        }
    }
}

/// Order-book depth accuracy configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderBookConfig {
    /// Spread sanity ceiling in basis points. Spreads at or above this
    /// receive zero spread credit.
    pub spread_ceiling_bps: f64,
    /// Half-width of the depth window around mid, as a fraction of mid
    /// (0.001 = 0.1%).
    pub depth_window_frac: f64,
    /// Weight of the spread-reasonableness component in the blended score.
    pub spread_weight: f64,
    /// Weight of the depth-adequacy component in the blended score.
    pub depth_weight: f64,
}

impl Default for OrderBookConfig {
    fn default() -> Self {
        Self {
            spread_ceiling_bps: 100.0,
            depth_window_frac: 0.001,
            spread_weight: 0.5,
            depth_weight: 0.5,
        }
    }
}

/// Benford's-Law test configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenfordConfig {
    /// Minimum sample size for full statistical confidence.
    pub min_sample: usize,
    /// p-value below which the verdict is FAIL.
    pub fail_p: f64,
    /// p-value below which the verdict is SUSPICIOUS.
    pub suspicious_p: f64,
}

impl Default for BenfordConfig {
    fn default() -> Self {
        Self {
            min_sample: 30,
            fail_p: 0.01,
            suspicious_p: 0.05,
        }
    }
}

/// Buy/sell symmetry configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SymmetryConfig {
    /// Maximum fraction either side may hold before the verdict is FAIL.
    pub dominance_limit: f64,
}

impl Default for SymmetryConfig {
    fn default() -> Self {
        Self {
            dominance_limit: 0.55,
        }
    }
}

/// Timestamp normalization configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NormalizationConfig {
    /// Grid period timestamps are checked against (ms).
    pub grid_ms: i64,
    /// Deviation tolerance for a timestamp to count as aligned (ms).
    pub tolerance_ms: i64,
}

impl Default for NormalizationConfig {
    fn default() -> Self {
        Self {
            grid_ms: 100,
            tolerance_ms: 5,
        }
    }
}

/// Trust-score aggregation weights. Must sum to 1.0; validated when the
/// aggregator is constructed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Weight of the Benford's-Law test.
    pub benford_weight: f64,
    /// Weight of order-book depth accuracy.
    pub order_book_weight: f64,
    /// Weight of tick completeness.
    pub completeness_weight: f64,
    /// Weight of buy/sell symmetry.
    pub symmetry_weight: f64,
    /// Weight of timestamp normalization.
    pub normalization_weight: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            benford_weight: 0.30,
            order_book_weight: 0.25,
            completeness_weight: 0.20,
            symmetry_weight: 0.15,
            normalization_weight: 0.10,
        }
    }
}
