//! Benford's-Law wash-trading test.
//!
//! Leading significant digits of naturally occurring trade sizes follow
//! `P(d) = log10(1 + 1/d)`. Bot-generated wash volume tends to violate that
//! distribution, so a chi-squared goodness-of-fit test over the first digits
//! of trade amounts doubles as a manipulation detector.

use std::collections::BTreeMap;

use dqbench_core::{
    config::BenfordConfig, Component, Confidence, Error, MeasurementResult, Result, Verdict,
};
use statrs::distribution::{ChiSquared, ContinuousCDF};

use crate::measure::{Measure, MeasurementInput};

/// Degrees of freedom for the 9-digit goodness-of-fit test.
const DEGREES_OF_FREEDOM: f64 = 8.0;

/// Benford's-Law first-digit evaluator.
pub struct BenfordTest {
    /// Minimum sample size for full confidence.
    min_sample: usize,
    /// p-value below which the verdict is FAIL.
    fail_p: f64,
    /// p-value below which the verdict is SUSPICIOUS.
    suspicious_p: f64,
}

impl BenfordTest {
    /// Create a new evaluator from configuration.
    pub fn new(config: &BenfordConfig) -> Self {
        Self {
            min_sample: config.min_sample,
            fail_p: config.fail_p,
            suspicious_p: config.suspicious_p,
        }
    }

    /// Expected Benford probability for digit `d` in 1..=9.
    #[inline]
    pub fn expected_probability(digit: u8) -> f64 {
        (1.0 + 1.0 / digit as f64).log10()
    }

    /// Leading significant digit of a positive value: the first nonzero
    /// digit of its decimal expansion.
    pub fn leading_digit(value: f64) -> Option<u8> {
        if !value.is_finite() || value <= 0.0 {
            return None;
        }
        let mut x = value;
        while x >= 10.0 {
            x /= 10.0;
        }
        while x < 1.0 {
            x *= 10.0;
        }
        let digit = x as u8;
        (1..=9).contains(&digit).then_some(digit)
    }

    /// Map a p-value onto [0, 100], piecewise linear and monotonic with the
    /// band edges at the verdict breakpoints: `[0, fail_p)` onto `[0, 40)`,
    /// `[fail_p, suspicious_p)` onto `[40, 70)`, `[suspicious_p, 1]` onto
    /// `[70, 100]`.
    fn score_from_p(&self, p: f64) -> f64 {
        if p < self.fail_p {
            40.0 * (p / self.fail_p)
        } else if p < self.suspicious_p {
            40.0 + 30.0 * ((p - self.fail_p) / (self.suspicious_p - self.fail_p))
        } else {
            70.0 + 30.0 * ((p - self.suspicious_p) / (1.0 - self.suspicious_p))
        }
    }

    fn verdict_from_p(&self, p: f64) -> Verdict {
        if p < self.fail_p {
            Verdict::Fail
        } else if p < self.suspicious_p {
            Verdict::Suspicious
        } else {
            Verdict::Pass
        }
    }
}

impl Measure for BenfordTest {
    fn component(&self) -> Component {
        Component::Benford
    }

    fn evaluate(&self, input: &MeasurementInput<'_>) -> Result<MeasurementResult> {
        let mut observed = [0u64; 9];
        let mut n = 0u64;
        for trade in input.dataset.trades() {
            if let Some(digit) = Self::leading_digit(trade.amount) {
                observed[(digit - 1) as usize] += 1;
                n += 1;
            }
        }

        if n == 0 {
            return Err(Error::insufficient_data(
                "no usable trade amounts for first-digit test",
            ));
        }

        let mut chi_squared = 0.0;
        let mut detail = BTreeMap::new();
        for digit in 1u8..=9 {
            let expected = n as f64 * Self::expected_probability(digit);
            let obs = observed[(digit - 1) as usize] as f64;
            chi_squared += (obs - expected).powi(2) / expected;
            detail.insert(format!("observed_{}", digit), obs);
            detail.insert(format!("expected_{}", digit), expected);
        }

        let dist = ChiSquared::new(DEGREES_OF_FREEDOM)
            .map_err(|e| Error::statistics(e.to_string()))?;
        let p_value = (1.0 - dist.cdf(chi_squared)).clamp(0.0, 1.0);

        let score = self.score_from_p(p_value);
        let confidence = if (n as usize) < self.min_sample {
            Confidence::Low
        } else {
            Confidence::Normal
        };

        detail.insert("sample_size".to_string(), n as f64);
        detail.insert("chi_squared".to_string(), chi_squared);
        detail.insert("p_value".to_string(), p_value);

        Ok(MeasurementResult {
            component: Component::Benford,
            score,
            verdict: self.verdict_from_p(p_value),
            confidence,
            detail,
        })
    }
}
