//! Buy/sell symmetry measurement.
//!
//! Natural two-sided markets print close to a 50/50 taker-side split. Wash
//! bots placing matched orders with timing offsets skew that ratio. The
//! basis is trade count, not volume.

use std::collections::BTreeMap;

use dqbench_core::{
    clamp_score, config::SymmetryConfig, Component, Confidence, Error, MeasurementResult,
    Result, Side, Verdict,
};

use crate::measure::{Measure, MeasurementInput};

/// Buy/sell symmetry evaluator.
pub struct BuySellSymmetry {
    /// Maximum fraction either side may hold before the verdict is FAIL.
    dominance_limit: f64,
}

impl BuySellSymmetry {
    /// Create a new evaluator from configuration.
    pub fn new(config: &SymmetryConfig) -> Self {
        Self {
            dominance_limit: config.dominance_limit,
        }
    }
}

impl Measure for BuySellSymmetry {
    fn component(&self) -> Component {
        Component::BuySellSymmetry
    }

    fn evaluate(&self, input: &MeasurementInput<'_>) -> Result<MeasurementResult> {
        let trades = input.dataset.trades();
        if trades.is_empty() {
            return Err(Error::insufficient_data("no trades to count sides over"));
        }

        let buy_count = trades.iter().filter(|t| t.side == Side::Buy).count();
        let total = trades.len();
        let buy_fraction = buy_count as f64 / total as f64;
        let sell_fraction = 1.0 - buy_fraction;

        // Imbalance in [0, 1]: 0 at a perfect split, 1 fully one-sided.
        let imbalance = (buy_fraction - 0.5).abs() * 2.0;
        let score = clamp_score(100.0 * (1.0 - imbalance));

        let verdict = if buy_fraction.max(sell_fraction) > self.dominance_limit {
            Verdict::Fail
        } else {
            Verdict::Pass
        };

        let mut detail = BTreeMap::new();
        detail.insert("buy_fraction".to_string(), buy_fraction);
        detail.insert("sell_fraction".to_string(), sell_fraction);
        detail.insert("trade_count".to_string(), total as f64);

        Ok(MeasurementResult {
            component: Component::BuySellSymmetry,
            score,
            verdict,
            confidence: Confidence::Normal,
            detail,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use dqbench_core::{Trade, TradeDataset};

    fn dataset(buys: usize, sells: usize) -> TradeDataset {
        let mut trades = Vec::with_capacity(buys + sells);
        for i in 0..(buys + sells) {
            trades.push(Trade {
                ts_ms: 1_000 + i as i64 * 100,
                price: 100.0,
                amount: 1.0,
                side: if i < buys { Side::Buy } else { Side::Sell },
            });
        }
        // Sides interleave in real feeds; order is irrelevant to the count.
        TradeDataset::new("binance", "BTC/USDT", trades).unwrap()
    }

    fn evaluate(data: &TradeDataset) -> Result<MeasurementResult> {
        let measure = BuySellSymmetry::new(&SymmetryConfig::default());
        measure.evaluate(&MeasurementInput {
            dataset: data,
            order_book: None,
        })
    }

    #[test]
    fn test_even_split_scores_100() {
        let result = evaluate(&dataset(50, 50)).unwrap();
        assert_relative_eq!(result.score, 100.0);
        assert_eq!(result.verdict, Verdict::Pass);
        assert_relative_eq!(result.detail["buy_fraction"], 0.5);
    }

    #[test]
    fn test_one_sided_scores_zero() {
        let result = evaluate(&dataset(100, 0)).unwrap();
        assert_relative_eq!(result.score, 0.0);
        assert_eq!(result.verdict, Verdict::Fail);
    }

    #[test]
    fn test_dominance_breakpoint() {
        // 55% buy is still within tolerance.
        let at_limit = evaluate(&dataset(55, 45)).unwrap();
        assert_eq!(at_limit.verdict, Verdict::Pass);

        // 56% is not.
        let over_limit = evaluate(&dataset(56, 44)).unwrap();
        assert_eq!(over_limit.verdict, Verdict::Fail);
    }

    #[test]
    fn test_imbalance_scales_linearly() {
        // 60/40: imbalance 0.2, score 80.
        let result = evaluate(&dataset(60, 40)).unwrap();
        assert_relative_eq!(result.score, 80.0, epsilon = 1e-9);
    }

    #[test]
    fn test_empty_dataset_is_insufficient() {
        let result = evaluate(&dataset(0, 0));
        assert!(matches!(result, Err(Error::InsufficientData(_))));
    }
}
