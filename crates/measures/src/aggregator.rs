//! Weighted trust-score aggregation.
//!
//! Combines the component measurement outcomes into one
//! [`TrustScoreRecord`]. Weights are fixed per component and validated at
//! construction; a weight table that does not sum to one is a programming
//! error, not a data condition.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};
use dqbench_core::{
    clamp_score, config::ScoringConfig, Component, ComponentOutcome, Confidence, Error, Grade,
    Result, TrustScoreRecord,
};

/// Tolerance when checking that weights sum to one.
const WEIGHT_SUM_TOLERANCE: f64 = 1e-9;

/// Validated per-component weight table.
#[derive(Debug, Clone)]
pub struct Weights {
    weights: BTreeMap<Component, f64>,
}

impl Weights {
    /// Build a weight table, verifying every weight is finite and
    /// non-negative and the total is 1.0.
    pub fn new(weights: BTreeMap<Component, f64>) -> Result<Self> {
        if weights.is_empty() {
            return Err(Error::config("weight table is empty"));
        }
        for (component, &weight) in &weights {
            if !weight.is_finite() || weight < 0.0 {
                return Err(Error::config(format!(
                    "invalid weight {} for component {}",
                    weight,
                    component.as_str()
                )));
            }
        }
        let sum: f64 = weights.values().sum();
        if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(Error::config(format!(
                "weights sum to {}, expected 1.0",
                sum
            )));
        }
        Ok(Self { weights })
    }

    /// Build the standard five-component table from configuration.
    pub fn from_config(config: &ScoringConfig) -> Result<Self> {
        let mut weights = BTreeMap::new();
        weights.insert(Component::Benford, config.benford_weight);
        weights.insert(Component::OrderBookDepth, config.order_book_weight);
        weights.insert(Component::TickCompleteness, config.completeness_weight);
        weights.insert(Component::BuySellSymmetry, config.symmetry_weight);
        weights.insert(Component::Normalization, config.normalization_weight);
        Self::new(weights)
    }

    /// Weight for a component, if one is configured.
    pub fn get(&self, component: Component) -> Option<f64> {
        self.weights.get(&component).copied()
    }

    /// Components covered by this table.
    pub fn components(&self) -> impl Iterator<Item = Component> + '_ {
        self.weights.keys().copied()
    }
}

/// Combines component outcomes into the final trust score and grade.
pub struct ScoringAggregator {
    weights: Weights,
}

impl ScoringAggregator {
    /// Create an aggregator with a validated weight table.
    pub fn new(weights: Weights) -> Self {
        Self { weights }
    }

    /// Create an aggregator from configuration.
    pub fn from_config(config: &ScoringConfig) -> Result<Self> {
        Ok(Self::new(Weights::from_config(config)?))
    }

    /// Aggregate one exchange's outcomes into its trust score record.
    ///
    /// Insufficient components are excluded and the remaining weights
    /// renormalized; the record is marked low-confidence. When every
    /// component is insufficient the record carries no score at all rather
    /// than a fabricated one.
    ///
    /// Outcomes must cover each weighted component exactly once; anything
    /// else is a configuration error.
    pub fn aggregate(
        &self,
        exchange_id: impl Into<String>,
        symbol: impl Into<String>,
        outcomes: Vec<ComponentOutcome>,
        evaluated_at: DateTime<Utc>,
    ) -> Result<TrustScoreRecord> {
        let mut seen = BTreeSet::new();
        for outcome in &outcomes {
            let component = outcome.component();
            if self.weights.get(component).is_none() {
                return Err(Error::config(format!(
                    "no weight configured for component {}",
                    component.as_str()
                )));
            }
            if !seen.insert(component) {
                return Err(Error::config(format!(
                    "duplicate outcome for component {}",
                    component.as_str()
                )));
            }
        }
        for component in self.weights.components() {
            if !seen.contains(&component) {
                return Err(Error::config(format!(
                    "missing outcome for component {}",
                    component.as_str()
                )));
            }
        }

        let mut weighted_sum = 0.0;
        let mut active_weight = 0.0;
        let mut any_skipped = false;
        let mut any_low_confidence = false;
        for outcome in &outcomes {
            match outcome.result() {
                Some(result) => {
                    let weight = self.weights.get(result.component).unwrap_or(0.0);
                    weighted_sum += result.score * weight;
                    active_weight += weight;
                    if result.confidence == Confidence::Low {
                        any_low_confidence = true;
                    }
                }
                None => any_skipped = true,
            }
        }

        let (final_score, grade) = if active_weight > 0.0 {
            let score = clamp_score(weighted_sum / active_weight);
            (Some(score), Some(Grade::from_score(score)))
        } else {
            (None, None)
        };

        let confidence = if any_skipped || any_low_confidence {
            Confidence::Low
        } else {
            Confidence::Normal
        };

        Ok(TrustScoreRecord {
            exchange_id: exchange_id.into(),
            symbol: symbol.into(),
            final_score,
            grade,
            confidence,
            components: outcomes,
            evaluated_at,
        })
    }
}
