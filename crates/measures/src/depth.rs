//! Order-book depth accuracy measurement.
//!
//! Checks that the quoted spread is sane and that real resting size exists
//! near mid on both sides. Inflated volume with a hollow book is a classic
//! wash-trading footprint.

use std::collections::BTreeMap;

use dqbench_core::{
    clamp_score, config::OrderBookConfig, Component, Confidence, Error, MeasurementResult,
    OrderBookSnapshot, Result, Verdict,
};

use crate::measure::{Measure, MeasurementInput};

/// Order-book depth accuracy evaluator.
pub struct OrderBookDepth {
    /// Spread sanity ceiling (bps); spreads at or above score zero spread
    /// credit.
    spread_ceiling_bps: f64,
    /// Half-width of the near-mid depth window as a fraction of mid.
    depth_window_frac: f64,
    /// Relative weight of the spread component.
    spread_weight: f64,
    /// Relative weight of the depth component.
    depth_weight: f64,
}

impl OrderBookDepth {
    /// Create a new evaluator from configuration.
    pub fn new(config: &OrderBookConfig) -> Self {
        Self {
            spread_ceiling_bps: config.spread_ceiling_bps,
            depth_window_frac: config.depth_window_frac,
            spread_weight: config.spread_weight,
            depth_weight: config.depth_weight,
        }
    }

    /// Validate a snapshot, returning (best_bid, best_ask).
    ///
    /// A book missing either side, or crossed (`best_bid > best_ask`), is
    /// invalid input. A zero spread (`best_bid == best_ask`) is valid.
    pub fn validate(book: &OrderBookSnapshot) -> Result<(f64, f64)> {
        let bid = book
            .best_bid()
            .ok_or_else(|| Error::invalid_order_book("no bid levels"))?;
        let ask = book
            .best_ask()
            .ok_or_else(|| Error::invalid_order_book("no ask levels"))?;
        if bid > ask {
            return Err(Error::invalid_order_book(format!(
                "crossed book: best bid {} above best ask {}",
                bid, ask
            )));
        }
        Ok((bid, ask))
    }

    fn score_valid_book(&self, book: &OrderBookSnapshot, bid: f64, ask: f64) -> Result<MeasurementResult> {
        let blend_total = self.spread_weight + self.depth_weight;
        if blend_total <= 0.0 {
            return Err(Error::config("order-book blend weights sum to zero"));
        }

        let mid = (bid + ask) / 2.0;
        let spread_bps = (ask - bid) / mid * 10_000.0;
        let spread_score = clamp_score(100.0 * (1.0 - spread_bps / self.spread_ceiling_bps));

        let bid_floor = mid * (1.0 - self.depth_window_frac);
        let ask_ceiling = mid * (1.0 + self.depth_window_frac);
        let bid_depth: f64 = book
            .bids
            .iter()
            .filter(|l| l.price >= bid_floor)
            .map(|l| l.size)
            .sum();
        let ask_depth: f64 = book
            .asks
            .iter()
            .filter(|l| l.price <= ask_ceiling)
            .map(|l| l.size)
            .sum();

        // Symmetric, non-trivial depth on both sides gets full credit; a
        // one-sided or empty window gets none.
        let depth_score = if bid_depth > 0.0 && ask_depth > 0.0 {
            100.0 * (bid_depth.min(ask_depth) / bid_depth.max(ask_depth))
        } else {
            0.0
        };

        let score = clamp_score(
            (self.spread_weight * spread_score + self.depth_weight * depth_score) / blend_total,
        );

        let mut detail = BTreeMap::new();
        detail.insert("mid_price".to_string(), mid);
        detail.insert("spread_bps".to_string(), spread_bps);
        detail.insert("spread_score".to_string(), spread_score);
        detail.insert("bid_depth".to_string(), bid_depth);
        detail.insert("ask_depth".to_string(), ask_depth);
        detail.insert("depth_score".to_string(), depth_score);

        Ok(MeasurementResult {
            component: Component::OrderBookDepth,
            score,
            verdict: Verdict::from_score(score),
            confidence: Confidence::Normal,
            detail,
        })
    }

    /// Build the FAIL result for an invalid (crossed or empty) book.
    fn invalid_book_result(book: &OrderBookSnapshot) -> MeasurementResult {
        let mut detail = BTreeMap::new();
        detail.insert("invalid_book".to_string(), 1.0);
        if let Some(bid) = book.best_bid() {
            detail.insert("best_bid".to_string(), bid);
        }
        if let Some(ask) = book.best_ask() {
            detail.insert("best_ask".to_string(), ask);
        }

        MeasurementResult {
            component: Component::OrderBookDepth,
            score: 0.0,
            verdict: Verdict::Fail,
            confidence: Confidence::Normal,
            detail,
        }
    }
}

impl Measure for OrderBookDepth {
    fn component(&self) -> Component {
        Component::OrderBookDepth
    }

    fn evaluate(&self, input: &MeasurementInput<'_>) -> Result<MeasurementResult> {
        let book = input
            .order_book
            .ok_or_else(|| Error::insufficient_data("no order-book snapshot supplied"))?;

        match Self::validate(book) {
            Ok((bid, ask)) => self.score_valid_book(book, bid, ask),
            // Invalid book is a data verdict, not a crash.
            Err(Error::InvalidOrderBook(_)) => Ok(Self::invalid_book_result(book)),
            Err(other) => Err(other),
        }
    }
}
