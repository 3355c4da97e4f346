//! Band/row parameter optimization for banded LSH.
//!
//! Splitting a `k`-wide sketch into `b` bands of `r` rows turns the flat
//! Jaccard estimator into a thresholding filter: two sketches become
//! candidates iff at least one band matches exactly, which happens with
//! probability
//!
//! ```text
//! S(x; b, r) = 1 - (1 - x^r)^b
//! ```
//!
//! at true similarity `x`. The optimizer integrates the S-curve on either
//! side of the target threshold and picks the `(b, r)` split minimizing the
//! weighted false-positive / false-negative mass.
//!
//! ## References
//!
//! - Leskovec, Rajaraman & Ullman. "Mining of Massive Datasets", ch. 3

use serde::{Deserialize, Serialize};

use crate::error::{Result, SimilarityError};

/// Step width for the left-Riemann approximation of the S-curve integrals.
const INTEGRATION_STEP: f64 = 0.001;

/// A band/row split of a `k`-wide sketch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LshParams {
    /// Number of bands (independent hash tables).
    pub bands: usize,
    /// Rows per band (sketch positions hashed into one signature).
    pub rows: usize,
}

impl LshParams {
    /// Find the `(bands, rows)` split minimizing
    /// `fp_weight * FP + fn_weight * FN` for the given threshold.
    ///
    /// `FP` is the S-curve mass below the threshold (pairs that collide but
    /// should not), `FN` the complement mass above it (pairs that should
    /// collide but do not). The search is exhaustive over `bands in 1..=k`,
    /// `rows in 1..=k/bands`, first-found on ties.
    pub fn optimal(threshold: f64, k: usize, fp_weight: f64, fn_weight: f64) -> Result<Self> {
        if !(0.0..=1.0).contains(&threshold) {
            return Err(SimilarityError::InvalidParameter(
                "threshold must be in the range [0,1]".to_string(),
            ));
        }
        if k == 0 {
            return Err(SimilarityError::InvalidParameter(
                "the number of permutations must be positive (> 0)".to_string(),
            ));
        }

        let mut best: Option<(f64, LshParams)> = None;
        for bands in 1..=k {
            let max_rows = k / bands;
            for rows in 1..=max_rows {
                let fp_area = false_positive_area(threshold, bands, rows);
                let fn_area = false_negative_area(threshold, bands, rows);
                let error = fp_weight * fp_area + fn_weight * fn_area;
                if best.is_none_or(|(min_error, _)| error < min_error) {
                    best = Some((error, LshParams { bands, rows }));
                }
            }
        }

        best.map(|(_, params)| params).ok_or_else(|| {
            SimilarityError::Internal("no feasible band/row split was explored".to_string())
        })
    }

    /// Collision probability of this split at true similarity `x`.
    pub fn collision_probability(&self, x: f64) -> f64 {
        s_curve(x, self.bands, self.rows)
    }
}

/// `S(x; b, r) = 1 - (1 - x^r)^b`.
fn s_curve(x: f64, bands: usize, rows: usize) -> f64 {
    1.0 - (1.0 - x.powi(rows as i32)).powi(bands as i32)
}

/// Expected false-positive mass: integral of the S-curve over `[0, threshold)`.
fn false_positive_area(threshold: f64, bands: usize, rows: usize) -> f64 {
    let mut area = 0.0;
    let mut x = 0.0;
    while x < threshold {
        area += s_curve(x + 0.5 * INTEGRATION_STEP, bands, rows) * INTEGRATION_STEP;
        x += INTEGRATION_STEP;
    }
    area
}

/// Expected false-negative mass: integral of `1 - S` over `[threshold, 1)`.
fn false_negative_area(threshold: f64, bands: usize, rows: usize) -> f64 {
    let mut area = 0.0;
    let mut x = threshold;
    while x < 1.0 {
        area += (1.0 - s_curve(x + 0.5 * INTEGRATION_STEP, bands, rows)) * INTEGRATION_STEP;
        x += INTEGRATION_STEP;
    }
    area
}
