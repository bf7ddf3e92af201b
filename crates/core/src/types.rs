//! Core data types for the data-quality benchmark.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::{Error, Result};

/// Timestamp in milliseconds since Unix epoch (UTC).
pub type TimestampMs = i64;

/// Clamp a component or final score into the valid [0, 100] range.
#[inline]
pub fn clamp_score(score: f64) -> f64 {
    score.clamp(0.0, 100.0)
}

/// Taker side of an executed trade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Buy,
    Sell,
}

/// A single executed trade from the exchange.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    /// Timestamp in milliseconds.
    pub ts_ms: TimestampMs,
    /// Trade price. Must be positive.
    pub price: f64,
    /// Trade amount in base-asset units. Must be positive.
    pub amount: f64,
    /// Taker side.
    pub side: Side,
}

/// Ordered sequence of trades for one (exchange, symbol) pair.
///
/// Invariants, enforced by [`TradeDataset::new`]: timestamps are
/// non-decreasing (ties allowed) and every trade has positive price and
/// amount. The dataset is read-only after construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TradeDataset {
    /// Exchange identifier (e.g., "binance").
    pub exchange: String,
    /// Trading symbol (e.g., "BTC/USDT").
    pub symbol: String,
    /// Trades ordered by timestamp ascending.
    trades: Vec<Trade>,
}

impl TradeDataset {
    /// Build a dataset, validating the ordering and positivity invariants.
    pub fn new(
        exchange: impl Into<String>,
        symbol: impl Into<String>,
        trades: Vec<Trade>,
    ) -> Result<Self> {
        for (i, trade) in trades.iter().enumerate() {
            if trade.price <= 0.0 || !trade.price.is_finite() {
                return Err(Error::data(format!(
                    "trade {} has non-positive price {}",
                    i, trade.price
                )));
            }
            if trade.amount <= 0.0 || !trade.amount.is_finite() {
                return Err(Error::data(format!(
                    "trade {} has non-positive amount {}",
                    i, trade.amount
                )));
            }
            if i > 0 && trade.ts_ms < trades[i - 1].ts_ms {
                return Err(Error::data(format!(
                    "trade {} out of order: {} < {}",
                    i,
                    trade.ts_ms,
                    trades[i - 1].ts_ms
                )));
            }
        }

        Ok(Self {
            exchange: exchange.into(),
            symbol: symbol.into(),
            trades,
        })
    }

    /// Trades in timestamp order.
    #[inline]
    pub fn trades(&self) -> &[Trade] {
        &self.trades
    }

    /// Number of trades.
    #[inline]
    pub fn len(&self) -> usize {
        self.trades.len()
    }

    /// Whether the dataset holds no trades.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.trades.is_empty()
    }

    /// Time covered from first to last trade (ms). Zero for fewer than two
    /// trades.
    pub fn span_ms(&self) -> i64 {
        match (self.trades.first(), self.trades.last()) {
            (Some(first), Some(last)) => last.ts_ms - first.ts_ms,
            _ => 0,
        }
    }
}

/// A single resting price level.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BookLevel {
    /// Level price.
    pub price: f64,
    /// Resting size at this price.
    pub size: f64,
}

/// Point-in-time order-book view for one exchange.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderBookSnapshot {
    /// Capture timestamp in milliseconds.
    pub ts_ms: TimestampMs,
    /// Bid levels, descending price.
    pub bids: Vec<BookLevel>,
    /// Ask levels, ascending price.
    pub asks: Vec<BookLevel>,
}

impl OrderBookSnapshot {
    /// Best (highest) bid price.
    #[inline]
    pub fn best_bid(&self) -> Option<f64> {
        self.bids.first().map(|l| l.price)
    }

    /// Best (lowest) ask price.
    #[inline]
    pub fn best_ask(&self) -> Option<f64> {
        self.asks.first().map(|l| l.price)
    }

    /// Mid price, if both sides are present.
    #[inline]
    pub fn mid(&self) -> Option<f64> {
        match (self.best_bid(), self.best_ask()) {
            (Some(bid), Some(ask)) => Some((bid + ask) / 2.0),
            _ => None,
        }
    }

    /// Spread in basis points of mid, if both sides are present.
    pub fn spread_bps(&self) -> Option<f64> {
        let bid = self.best_bid()?;
        let ask = self.best_ask()?;
        let mid = (bid + ask) / 2.0;
        if mid <= 0.0 {
            return None;
        }
        Some((ask - bid) / mid * 10_000.0)
    }
}

/// Identity of one of the quality measurements.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Component {
    /// Absence of abnormal inter-trade gaps.
    TickCompleteness,
    /// Spread sanity and near-mid depth adequacy.
    OrderBookDepth,
    /// Benford's-Law first-digit distribution test.
    Benford,
    /// Buy/sell side balance.
    BuySellSymmetry,
    /// Timestamp grid-alignment consistency.
    Normalization,
}

impl Component {
    /// All components in canonical evaluation order.
    pub const ALL: [Component; 5] = [
        Component::TickCompleteness,
        Component::OrderBookDepth,
        Component::Benford,
        Component::BuySellSymmetry,
        Component::Normalization,
    ];

    /// Stable string name.
    pub fn as_str(self) -> &'static str {
        match self {
            Component::TickCompleteness => "tick_completeness",
            Component::OrderBookDepth => "order_book_depth",
            Component::Benford => "benford",
            Component::BuySellSymmetry => "buy_sell_symmetry",
            Component::Normalization => "normalization",
        }
    }
}

/// Verdict attached to a measurement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Verdict {
    Pass,
    Suspicious,
    Fail,
}

impl Verdict {
    /// Map a 0-100 score onto the shared verdict bands:
    /// `[70, 100]` Pass, `[40, 70)` Suspicious, `[0, 40)` Fail.
    pub fn from_score(score: f64) -> Self {
        if score >= 70.0 {
            Verdict::Pass
        } else if score >= 40.0 {
            Verdict::Suspicious
        } else {
            Verdict::Fail
        }
    }
}

/// Statistical confidence of a measurement or record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    /// Sample large enough for the stated statistics.
    Normal,
    /// Result computed, but from a sample too small (or a dataset too
    /// degraded) to carry full statistical weight.
    Low,
}

/// Immutable result of one quality measurement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasurementResult {
    /// Which measurement produced this result.
    pub component: Component,
    /// Score in [0, 100].
    pub score: f64,
    /// Component verdict.
    pub verdict: Verdict,
    /// Statistical confidence.
    pub confidence: Confidence,
    /// Diagnostic statistics (name -> value), deterministically ordered.
    pub detail: BTreeMap<String, f64>,
}

/// Outcome of attempting one measurement for one exchange.
///
/// Insufficient data is a recovered condition: the component is skipped and
/// its weight redistributed by the aggregator, never replaced by a default
/// numeric score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum ComponentOutcome {
    /// The measurement produced a score.
    Scored(MeasurementResult),
    /// The measurement could not be computed from the available data.
    Insufficient {
        component: Component,
        reason: String,
    },
}

impl ComponentOutcome {
    /// Component this outcome belongs to.
    pub fn component(&self) -> Component {
        match self {
            ComponentOutcome::Scored(result) => result.component,
            ComponentOutcome::Insufficient { component, .. } => *component,
        }
    }

    /// The measurement result, if one was produced.
    pub fn result(&self) -> Option<&MeasurementResult> {
        match self {
            ComponentOutcome::Scored(result) => Some(result),
            ComponentOutcome::Insufficient { .. } => None,
        }
    }
}

/// Letter grade derived from the final trust score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Grade {
    #[serde(rename = "A+")]
    APlus,
    A,
    B,
    C,
    D,
    F,
}

impl Grade {
    /// Derive the grade from a final score. Breakpoints are closed on the
    /// lower bound: 90.0 is A+, 89.9 is A.
    pub fn from_score(score: f64) -> Self {
        if score >= 90.0 {
            Grade::APlus
        } else if score >= 80.0 {
            Grade::A
        } else if score >= 70.0 {
            Grade::B
        } else if score >= 60.0 {
            Grade::C
        } else if score >= 50.0 {
            Grade::D
        } else {
            Grade::F
        }
    }

    /// Display string.
    pub fn as_str(self) -> &'static str {
        match self {
            Grade::APlus => "A+",
            Grade::A => "A",
            Grade::B => "B",
            Grade::C => "C",
            Grade::D => "D",
            Grade::F => "F",
        }
    }
}

/// Terminal artifact: the trust score for one exchange.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrustScoreRecord {
    /// Exchange identifier.
    pub exchange_id: String,
    /// Trading symbol the datasets cover.
    pub symbol: String,
    /// Weighted final score in [0, 100]. `None` only when every component
    /// was insufficient (a degraded record, never a fabricated number).
    pub final_score: Option<f64>,
    /// Letter grade for `final_score`.
    pub grade: Option<Grade>,
    /// Overall confidence. `Low` when any component was skipped or
    /// low-confidence.
    pub confidence: Confidence,
    /// Per-component outcomes, one per registered measurement.
    pub components: Vec<ComponentOutcome>,
    /// When the evaluation ran.
    pub evaluated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trade(ts_ms: i64, price: f64, amount: f64, side: Side) -> Trade {
        Trade {
            ts_ms,
            price,
            amount,
            side,
        }
    }

    #[test]
    fn test_dataset_accepts_ties() {
        let dataset = TradeDataset::new(
            "binance",
            "BTC/USDT",
            vec![
                trade(1_000, 50_000.0, 0.5, Side::Buy),
                trade(1_000, 50_001.0, 0.2, Side::Sell),
                trade(1_200, 50_002.0, 0.1, Side::Buy),
            ],
        )
        .unwrap();
        assert_eq!(dataset.len(), 3);
        assert_eq!(dataset.span_ms(), 200);
    }

    #[test]
    fn test_dataset_rejects_out_of_order() {
        let result = TradeDataset::new(
            "binance",
            "BTC/USDT",
            vec![
                trade(2_000, 50_000.0, 0.5, Side::Buy),
                trade(1_000, 50_001.0, 0.2, Side::Sell),
            ],
        );
        assert!(matches!(result, Err(Error::Data(_))));
    }

    #[test]
    fn test_dataset_rejects_non_positive_amount() {
        let result = TradeDataset::new(
            "binance",
            "BTC/USDT",
            vec![trade(1_000, 50_000.0, 0.0, Side::Buy)],
        );
        assert!(matches!(result, Err(Error::Data(_))));
    }

    #[test]
    fn test_snapshot_mid_and_spread() {
        let book = OrderBookSnapshot {
            ts_ms: 0,
            bids: vec![BookLevel {
                price: 50_000.0,
                size: 1.0,
            }],
            asks: vec![BookLevel {
                price: 50_010.0,
                size: 1.0,
            }],
        };
        assert!((book.mid().unwrap() - 50_005.0).abs() < 1e-9);
        // 10 / 50005 * 10000 = ~2 bps
        assert!((book.spread_bps().unwrap() - 1.9998).abs() < 1e-3);
    }

    #[test]
    fn test_snapshot_zero_spread() {
        let book = OrderBookSnapshot {
            ts_ms: 0,
            bids: vec![BookLevel {
                price: 50_000.0,
                size: 1.0,
            }],
            asks: vec![BookLevel {
                price: 50_000.0,
                size: 1.0,
            }],
        };
        assert_eq!(book.spread_bps(), Some(0.0));
    }

    #[test]
    fn test_grade_breakpoints_closed_on_lower_bound() {
        assert_eq!(Grade::from_score(100.0), Grade::APlus);
        assert_eq!(Grade::from_score(90.0), Grade::APlus);
        assert_eq!(Grade::from_score(89.9), Grade::A);
        assert_eq!(Grade::from_score(80.0), Grade::A);
        assert_eq!(Grade::from_score(70.0), Grade::B);
        assert_eq!(Grade::from_score(60.0), Grade::C);
        assert_eq!(Grade::from_score(50.0), Grade::D);
        assert_eq!(Grade::from_score(49.9), Grade::F);
        assert_eq!(Grade::from_score(0.0), Grade::F);
    }

    #[test]
    fn test_verdict_bands() {
        assert_eq!(Verdict::from_score(100.0), Verdict::Pass);
        assert_eq!(Verdict::from_score(70.0), Verdict::Pass);
        assert_eq!(Verdict::from_score(69.9), Verdict::Suspicious);
        assert_eq!(Verdict::from_score(40.0), Verdict::Suspicious);
        assert_eq!(Verdict::from_score(39.9), Verdict::Fail);
    }

    #[test]
    fn test_clamp_score() {
        assert_eq!(clamp_score(-3.0), 0.0);
        assert_eq!(clamp_score(55.5), 55.5);
        assert_eq!(clamp_score(120.0), 100.0);
    }
}
