//! Tick completeness measurement.
//!
//! Scans consecutive inter-trade deltas for abnormal gaps. A healthy feed
//! prints continuously; long silences suggest dropped ticks or a throttled
//! history endpoint.

use std::collections::BTreeMap;

use dqbench_core::{
    clamp_score, config::CompletenessConfig, Component, Confidence, Error, MeasurementResult,
    Result, Verdict,
};

use crate::measure::{Measure, MeasurementInput};

/// Tick completeness evaluator.
pub struct TickCompleteness {
    /// Delta above which an interval counts as a gap (ms).
    gap_threshold_ms: i64,
}

impl TickCompleteness {
    /// Create a new evaluator from configuration.
    pub fn new(config: &CompletenessConfig) -> Self {
        Self {
            gap_threshold_ms: config.gap_threshold_ms,
        }
    }
}

impl Measure for TickCompleteness {
    fn component(&self) -> Component {
        Component::TickCompleteness
    }

    fn evaluate(&self, input: &MeasurementInput<'_>) -> Result<MeasurementResult> {
        let trades = input.dataset.trades();
        if trades.len() < 2 {
            return Err(Error::insufficient_data(
                "gap analysis needs at least 2 trades",
            ));
        }

        let mut gap_count = 0u64;
        let mut max_delta_ms = 0i64;
        for pair in trades.windows(2) {
            let delta = pair[1].ts_ms - pair[0].ts_ms;
            max_delta_ms = max_delta_ms.max(delta);
            if delta > self.gap_threshold_ms {
                gap_count += 1;
            }
        }

        let intervals = (trades.len() - 1) as f64;
        let score = clamp_score(100.0 * (1.0 - gap_count as f64 / intervals));

        let mut detail = BTreeMap::new();
        detail.insert("gap_count".to_string(), gap_count as f64);
        detail.insert("max_gap_ms".to_string(), max_delta_ms as f64);
        detail.insert("interval_count".to_string(), intervals);

        Ok(MeasurementResult {
            component: Component::TickCompleteness,
            score,
            verdict: Verdict::from_score(score),
            confidence: Confidence::Normal,
            detail,
        })
    }
}
