//! MinHash sketches for Jaccard similarity estimation.
//!
//! A MinHash sketch summarizes a set of byte strings as `k` 64-bit minima,
//! one per hash permutation:
//!
//! ```text
//! sketch_i(S) = min_{v in S} h_i(v)
//! ```
//!
//! The probability that two sketches agree at a position equals the Jaccard
//! coefficient of the underlying sets, `P[sketch_i(A) = sketch_i(B)] =
//! J(A,B)`, so the fraction of matching positions is an unbiased estimator
//! of `J` with variance `O(1/k)`.
//!
//! ## Use Cases
//!
//! - Column-overlap discovery in data lakes
//! - Near-duplicate document detection
//! - Candidate generation for [`crate::lsh::BandedLshIndex`]
//!
//! ## References
//!
//! - Broder (1997). "On the resemblance and containment of documents"
//! - Broder et al. (2000). "Min-wise independent permutations"

use crate::error::{Result, SimilarityError};
use crate::hash::PermutationFamily;

/// Capability set shared by sketch families.
///
/// [`MinHashSketch`] is the one concrete implementation; the trait marks the
/// seam where other sketch families (weighted MinHash, one-permutation
/// hashing) would plug in.
pub trait SetSketch {
    /// Fold one set element into the sketch.
    fn update(&mut self, value: &[u8]);

    /// Read-only view of the sketch state.
    fn hash_values(&self) -> &[u64];

    /// Number of permutations (`k`).
    fn num_permutations(&self) -> usize;
}

/// MinHash sketch: `k` minima over a deterministic permutation family.
///
/// Sketches with the same `k` use identical permutations, so they are
/// directly comparable and reproducible across processes.
#[derive(Debug, Clone)]
pub struct MinHashSketch {
    family: PermutationFamily,
    /// `values[i]` is the minimum of permutation `i` over all updates;
    /// `u64::MAX` means permutation `i` has seen nothing yet.
    values: Vec<u64>,
}

impl MinHashSketch {
    /// Create an empty sketch over `k` permutations.
    pub fn new(k: usize) -> Result<Self> {
        let family = PermutationFamily::new(k)?;
        Ok(Self {
            family,
            values: vec![u64::MAX; k],
        })
    }

    /// Build a sketch from an iterator of set elements.
    pub fn from_values<I, V>(k: usize, values: I) -> Result<Self>
    where
        I: IntoIterator<Item = V>,
        V: AsRef<[u8]>,
    {
        let mut sketch = Self::new(k)?;
        for value in values {
            sketch.update(value.as_ref());
        }
        Ok(sketch)
    }

    /// Fold one set element into the sketch.
    ///
    /// Idempotent: re-presenting an already-seen value changes nothing.
    /// Callers filter out absent/null values before calling.
    pub fn update(&mut self, value: &[u8]) {
        let base = self.family.base(value);
        for (i, slot) in self.values.iter_mut().enumerate() {
            let h = self.family.permute(i, base);
            if h < *slot {
                *slot = h;
            }
        }
    }

    /// Read-only view of the `k` minima.
    pub fn hash_values(&self) -> &[u64] {
        &self.values
    }

    /// Number of permutations (`k`).
    pub fn num_permutations(&self) -> usize {
        self.values.len()
    }

    /// True until the first update lands.
    ///
    /// Permuted hashes are reduced modulo a prime below `u64::MAX`, so the
    /// sentinel can never be produced by a real value.
    pub fn is_empty(&self) -> bool {
        self.values.iter().all(|&v| v == u64::MAX)
    }

    /// Estimate Jaccard similarity against another sketch of the same width.
    ///
    /// Returns the fraction of matching positions, in `[0, 1]`.
    pub fn estimate_jaccard(&self, other: &MinHashSketch) -> Result<f64> {
        self.check_width(other)?;
        let matches = self
            .values
            .iter()
            .zip(other.values.iter())
            .filter(|(a, b)| a == b)
            .count();
        Ok(matches as f64 / self.values.len() as f64)
    }

    /// Merge another sketch into this one (element-wise minimum).
    ///
    /// The merged sketch equals the sketch of the union of the two
    /// underlying sets.
    pub fn merge(&mut self, other: &MinHashSketch) -> Result<()> {
        self.check_width(other)?;
        for (slot, &v) in self.values.iter_mut().zip(other.values.iter()) {
            if v < *slot {
                *slot = v;
            }
        }
        Ok(())
    }

    fn check_width(&self, other: &MinHashSketch) -> Result<()> {
        if self.values.len() != other.values.len() {
            return Err(SimilarityError::InvalidParameter(format!(
                "sketch widths differ: {} vs {}",
                self.values.len(),
                other.values.len()
            )));
        }
        Ok(())
    }
}

impl SetSketch for MinHashSketch {
    fn update(&mut self, value: &[u8]) {
        MinHashSketch::update(self, value)
    }

    fn hash_values(&self) -> &[u64] {
        MinHashSketch::hash_values(self)
    }

    fn num_permutations(&self) -> usize {
        MinHashSketch::num_permutations(self)
    }
}
