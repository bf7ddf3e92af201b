//! Timestamp normalization consistency.
//!
//! Measures how tightly trade timestamps sit on the exchange's publication
//! grid. Feeds that batch on a fixed cadence land within a few milliseconds
//! of grid boundaries; large scattered deviations point at an unreliable
//! exchange-side clock or post-hoc fabricated timestamps.

use std::collections::BTreeMap;

use dqbench_core::{
    clamp_score, config::NormalizationConfig, Component, Confidence, Error, MeasurementResult,
    Result, Verdict,
};

use crate::measure::{Measure, MeasurementInput};

/// Timestamp grid-alignment evaluator.
pub struct NormalizationConsistency {
    /// Grid period (ms).
    grid_ms: i64,
    /// Deviation tolerance for a timestamp to count as aligned (ms).
    tolerance_ms: i64,
}

impl NormalizationConsistency {
    /// Create a new evaluator from configuration.
    pub fn new(config: &NormalizationConfig) -> Self {
        Self {
            grid_ms: config.grid_ms,
            tolerance_ms: config.tolerance_ms,
        }
    }

    /// Deviation of a timestamp from its nearest grid boundary (ms).
    #[inline]
    fn deviation(&self, ts_ms: i64) -> i64 {
        let offset = ts_ms.rem_euclid(self.grid_ms);
        offset.min(self.grid_ms - offset)
    }
}

impl Measure for NormalizationConsistency {
    fn component(&self) -> Component {
        Component::Normalization
    }

    fn evaluate(&self, input: &MeasurementInput<'_>) -> Result<MeasurementResult> {
        let trades = input.dataset.trades();
        if trades.is_empty() {
            return Err(Error::insufficient_data("no timestamps to check"));
        }

        let mut sum_deviation = 0i64;
        let mut max_deviation = 0i64;
        let mut aligned = 0usize;
        for trade in trades {
            let dev = self.deviation(trade.ts_ms);
            sum_deviation += dev;
            max_deviation = max_deviation.max(dev);
            if dev <= self.tolerance_ms {
                aligned += 1;
            }
        }

        let n = trades.len() as f64;
        let mean_deviation = sum_deviation as f64 / n;
        let aligned_fraction = aligned as f64 / n;

        // Blend of aligned fraction and mean deviation; half the grid period
        // is the largest possible nearest-boundary deviation.
        let half_grid = self.grid_ms as f64 / 2.0;
        let score = clamp_score(
            100.0 * (0.5 * aligned_fraction + 0.5 * (1.0 - mean_deviation / half_grid)),
        );

        let mut detail = BTreeMap::new();
        detail.insert("mean_deviation_ms".to_string(), mean_deviation);
        detail.insert("max_deviation_ms".to_string(), max_deviation as f64);
        detail.insert("aligned_fraction".to_string(), aligned_fraction);

        Ok(MeasurementResult {
            component: Component::Normalization,
            score,
            verdict: Verdict::from_score(score),
            confidence: Confidence::Normal,
            detail,
        })
    }
}
