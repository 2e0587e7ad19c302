//! The trained model: per-round axis/sign/beta triples.
//!
//! Model serialization beyond a human-readable iteration log is out of
//! scope here; the per-round and final-model logs written by
//! [`crate::logger::IterationLogger`] are that log, and this type carries
//! no `serde` impls of its own.
use crate::ckpi::CanonicalKmerPairIndex;
use crate::features::FeatureMatrix;

/// The ensemble produced by [`crate::booster::AdaBoost::train`].
#[derive(Debug, Clone)]
pub struct Model {
    pub axis: Vec<usize>,
    pub sign: Vec<u8>,
    pub beta: Vec<f64>,
}

impl Model {
    pub fn with_capacity(t: usize) -> Self {
        Self {
            axis: Vec::with_capacity(t),
            sign: Vec::with_capacity(t),
            beta: Vec::with_capacity(t),
        }
    }

    /// Number of rounds actually recorded.
    pub fn len(&self) -> usize {
        self.axis.len()
    }

    pub fn is_empty(&self) -> bool {
        self.axis.is_empty()
    }

    fn push(&mut self, axis: usize, sign: u8, beta: f64) {
        self.axis.push(axis);
        self.sign.push(sign);
        self.beta.push(beta);
    }

    pub(crate) fn record(&mut self, axis: usize, sign: u8, beta: f64) {
        self.push(axis, sign, beta);
    }

    /// The ensemble's raw score for bin pair `(bin_i, bin_j)`:
    /// `sum_t log(1/beta[t]) * pred_t`, where `pred_t` is the (sign-flipped)
    /// prediction of round `t`'s stump.
    pub fn score(&self, ckpi: &CanonicalKmerPairIndex, features: &FeatureMatrix, bin_i: usize, bin_j: usize) -> f64 {
        self.axis
            .iter()
            .zip(&self.sign)
            .zip(&self.beta)
            .map(|((&axis, &sign), &beta)| {
                let (l1, m1, l2, m2) = ckpi.codes(axis);
                let raw = features.get(bin_i, l1) * features.get(bin_j, m1)
                    + features.get(bin_i, l2) * features.get(bin_j, m2);
                let mut pred = if raw > 0.0 { 1u8 } else { 0u8 };
                if sign == 1 {
                    pred = 1 - pred;
                }
                // pred == 0 contributes nothing regardless of beta; guard
                // it explicitly so a perfect (beta == 0) round's +inf
                // confidence never multiplies 0.0 into NaN.
                if pred == 1 {
                    (1.0 / beta).ln()
                } else {
                    0.0
                }
            })
            .sum()
    }

    /// The ensemble's binary prediction for bin pair `(bin_i, bin_j)`.
    pub fn predict(&self, ckpi: &CanonicalKmerPairIndex, features: &FeatureMatrix, bin_i: usize, bin_j: usize) -> u8 {
        if self.score(ckpi, features, bin_i, bin_j) > 0.0 {
            1
        } else {
            0
        }
    }
}
