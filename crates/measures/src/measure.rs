//! The measurement capability and the standard suite.
//!
//! Every quality measurement shares one contract: consume a dataset (plus,
//! for one of them, an order-book snapshot) and produce a
//! [`MeasurementResult`]. The suite is a registry of such evaluators, run in
//! a fixed order.

use dqbench_core::{
    Component, ComponentOutcome, Config, MeasurementResult, OrderBookSnapshot, Result,
    TradeDataset,
};
use tracing::warn;

use crate::{
    BenfordTest, BuySellSymmetry, NormalizationConsistency, OrderBookDepth, TickCompleteness,
};

/// Input handed to every measurement for one exchange.
#[derive(Debug, Clone, Copy)]
pub struct MeasurementInput<'a> {
    /// Normalized trade dataset.
    pub dataset: &'a TradeDataset,
    /// Order-book snapshot, when the provider captured one.
    pub order_book: Option<&'a OrderBookSnapshot>,
}

/// A single quality measurement.
///
/// Implementations are pure: the same input always produces the same result,
/// and no state is shared between evaluations.
pub trait Measure {
    /// Identity of this measurement.
    fn component(&self) -> Component;

    /// Evaluate the measurement over the given input.
    ///
    /// Returns `Error::InsufficientData` when the input is too small for a
    /// meaningful result; any such error is recovered by the suite, never by
    /// fabricating a score.
    fn evaluate(&self, input: &MeasurementInput<'_>) -> Result<MeasurementResult>;
}

/// Registry of measurements, evaluated in registration order.
pub struct MeasurementSuite {
    measures: Vec<Box<dyn Measure>>,
}

impl MeasurementSuite {
    /// Build the standard five-measurement suite from configuration.
    pub fn standard(config: &Config) -> Self {
        Self {
            measures: vec![
                Box::new(TickCompleteness::new(&config.completeness)),
                Box::new(OrderBookDepth::new(&config.order_book)),
                Box::new(BenfordTest::new(&config.benford)),
                Box::new(BuySellSymmetry::new(&config.symmetry)),
                Box::new(NormalizationConsistency::new(&config.normalization)),
            ],
        }
    }

    /// Register an additional evaluator.
    pub fn register(&mut self, measure: Box<dyn Measure>) {
        self.measures.push(measure);
    }

    /// Number of registered measurements.
    pub fn len(&self) -> usize {
        self.measures.len()
    }

    /// Whether the suite is empty.
    pub fn is_empty(&self) -> bool {
        self.measures.is_empty()
    }

    /// Evaluate every registered measurement.
    ///
    /// A measurement that cannot be computed degrades to
    /// [`ComponentOutcome::Insufficient`] for its component only; one bad
    /// input never aborts the other measurements.
    pub fn evaluate_all(&self, input: &MeasurementInput<'_>) -> Vec<ComponentOutcome> {
        self.measures
            .iter()
            .map(|measure| match measure.evaluate(input) {
                Ok(result) => ComponentOutcome::Scored(result),
                Err(err) => {
                    if !err.is_insufficient_data() {
                        warn!(
                            component = measure.component().as_str(),
                            error = %err,
                            "measurement failed"
                        );
                    }
                    ComponentOutcome::Insufficient {
                        component: measure.component(),
                        reason: err.to_string(),
                    }
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dqbench_core::{Side, Trade, Verdict};

    fn dataset(trades: Vec<Trade>) -> TradeDataset {
        TradeDataset::new("binance", "BTC/USDT", trades).unwrap()
    }

    fn trade(ts_ms: i64, amount: f64, side: Side) -> Trade {
        Trade {
            ts_ms,
            price: 50_000.0,
            amount,
            side,
        }
    }

    #[test]
    fn test_standard_suite_has_five_components() {
        let suite = MeasurementSuite::standard(&Config::default());
        assert_eq!(suite.len(), 5);
    }

    #[test]
    fn test_empty_dataset_degrades_without_aborting() {
        let suite = MeasurementSuite::standard(&Config::default());
        let data = dataset(Vec::new());
        let input = MeasurementInput {
            dataset: &data,
            order_book: None,
        };

        let outcomes = suite.evaluate_all(&input);
        assert_eq!(outcomes.len(), 5);
        assert!(outcomes
            .iter()
            .all(|o| matches!(o, ComponentOutcome::Insufficient { .. })));
    }

    #[test]
    fn test_evaluate_all_is_idempotent() {
        let suite = MeasurementSuite::standard(&Config::default());
        let trades: Vec<Trade> = (0..100)
            .map(|i| {
                trade(
                    1_000 + i * 200,
                    1.0 + (i as f64) * 0.37,
                    if i % 2 == 0 { Side::Buy } else { Side::Sell },
                )
            })
            .collect();
        let data = dataset(trades);
        let input = MeasurementInput {
            dataset: &data,
            order_book: None,
        };

        let first = suite.evaluate_all(&input);
        let second = suite.evaluate_all(&input);
        assert_eq!(first, second);
    }

    #[test]
    fn test_registered_measure_is_evaluated() {
        struct AlwaysFifty;
        impl Measure for AlwaysFifty {
            fn component(&self) -> Component {
                Component::Benford
            }
            fn evaluate(&self, _input: &MeasurementInput<'_>) -> Result<MeasurementResult> {
                Ok(MeasurementResult {
                    component: Component::Benford,
                    score: 50.0,
                    verdict: Verdict::Suspicious,
                    confidence: dqbench_core::Confidence::Normal,
                    detail: Default::default(),
                })
            }
        }

        let mut suite = MeasurementSuite::standard(&Config::default());
        suite.register(Box::new(AlwaysFifty));
        let data = dataset(vec![trade(1_000, 1.0, Side::Buy)]);
        let input = MeasurementInput {
            dataset: &data,
            order_book: None,
        };

        let outcomes = suite.evaluate_all(&input);
        assert_eq!(outcomes.len(), 6);
        assert_eq!(outcomes[5].result().unwrap().score, 50.0);
    }

    #[test]
    fn test_healthy_dataset_scores() {
        let suite = MeasurementSuite::standard(&Config::default());
        let trades: Vec<Trade> = (0..200)
            .map(|i| {
                trade(
                    1_000 + i * 100,
                    1.0 + (i as f64) * 0.73,
                    if i % 2 == 0 { Side::Buy } else { Side::Sell },
                )
            })
            .collect();
        let data = dataset(trades);
        let input = MeasurementInput {
            dataset: &data,
            order_book: None,
        };

        let outcomes = suite.evaluate_all(&input);
        let completeness = outcomes[0].result().unwrap();
        assert_eq!(completeness.verdict, Verdict::Pass);
        // No book supplied: the depth component degrades, nothing else does.
        assert!(outcomes[1].result().is_none());
        assert!(outcomes[2].result().is_some());
    }
}
