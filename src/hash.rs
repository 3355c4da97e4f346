//! Deterministic universal hash family for MinHash permutations.
//!
//! Simulating `k` independent random permutations of the value universe is
//! done with a permutation-style universal family: hash the input bytes once
//! with a strong 64-bit base hash, then derive the `i`-th permutation as
//!
//! ```text
//! h_i(v) = (a_i * base(v) + b_i) mod p
//! ```
//!
//! where `p = 2^61 - 1` (Mersenne) and the coefficients `(a_i, b_i)` come
//! from fixed seed constants. Two processes therefore sketch the same set to
//! byte-identical values.
//!
//! ## References
//!
//! - Carter & Wegman (1979). "Universal classes of hash functions"
//! - Broder et al. (2000). "Min-wise independent permutations"

use xxhash_rust::xxh3::{Xxh3, xxh3_64};

use crate::error::{Result, SimilarityError};

/// Mersenne prime 2^61 - 1, the modulus of the universal family.
///
/// Every permuted hash is strictly below this, so `u64::MAX` stays free as
/// the "nothing seen yet" sentinel in sketches.
const MERSENNE_PRIME: u64 = (1u64 << 61) - 1;

/// Fixed seeds for coefficient derivation. Compile-time constants so the
/// family is process-wide read-only data.
const COEFF_SEED_A: u64 = 0x517c_c1b7_2722_0a95;
const COEFF_SEED_B: u64 = 0x6c62_272e_07bb_0142;

/// splitmix64 finalizer, used to stretch a seed into decorrelated streams.
fn splitmix64(state: u64) -> u64 {
    let mut z = state.wrapping_add(0x9e37_79b9_7f4a_7c15);
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^ (z >> 31)
}

/// A family of `k` deterministic permutation-style hash functions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermutationFamily {
    /// Multipliers, forced odd so the product never collapses.
    a: Vec<u64>,
    /// Offsets.
    b: Vec<u64>,
}

impl PermutationFamily {
    /// Create a family of `k` permutations.
    ///
    /// Coefficients are derived from fixed seeds; families with the same `k`
    /// are identical across processes.
    pub fn new(k: usize) -> Result<Self> {
        if k == 0 {
            return Err(SimilarityError::InvalidParameter(
                "the number of permutations must be positive (> 0)".to_string(),
            ));
        }
        let mut a = Vec::with_capacity(k);
        let mut b = Vec::with_capacity(k);
        for i in 0..k {
            a.push(splitmix64(COEFF_SEED_A.wrapping_add(i as u64)) | 1);
            b.push(splitmix64(COEFF_SEED_B.wrapping_add(i as u64)));
        }
        Ok(Self { a, b })
    }

    /// Number of permutations in the family.
    pub fn len(&self) -> usize {
        self.a.len()
    }

    /// Whether the family is empty (never true for a constructed family).
    pub fn is_empty(&self) -> bool {
        self.a.is_empty()
    }

    /// Base hash of a value, shared by all permutations.
    pub fn base(&self, value: &[u8]) -> u64 {
        xxh3_64(value)
    }

    /// Apply permutation `i` to a base hash.
    ///
    /// Panics if `i >= len()`; callers iterate over `0..len()`.
    pub fn permute(&self, i: usize, base: u64) -> u64 {
        self.a[i].wrapping_mul(base).wrapping_add(self.b[i]) % MERSENNE_PRIME
    }

    /// Apply every permutation to `value`, writing `h_i(value)` into `out[i]`.
    ///
    /// `out` must hold exactly `len()` entries.
    pub fn hash_all(&self, value: &[u8], out: &mut [u64]) {
        assert_eq!(out.len(), self.len(), "output width must match the family");
        let base = self.base(value);
        for (i, slot) in out.iter_mut().enumerate() {
            *slot = self.permute(i, base);
        }
    }
}

/// Mix a slice of 64-bit values down to one 64-bit signature.
///
/// Deterministic over the little-endian byte representation of the slice.
/// Used for band signatures; not a persistence format.
pub fn mix_slice(values: &[u64]) -> u64 {
    let mut hasher = Xxh3::new();
    for &v in values {
        hasher.update(&v.to_le_bytes());
    }
    hasher.digest()
}
