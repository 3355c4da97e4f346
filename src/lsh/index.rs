//! Banded LSH index over MinHash sketches.

use std::collections::{HashMap, HashSet};
use std::hash::Hash;

use smallvec::SmallVec;

use crate::error::{Result, SimilarityError};
use crate::hash::mix_slice;
use crate::lsh::params::LshParams;
use crate::sketch::SetSketch;

/// Keys sharing a band signature. Buckets are usually tiny, so spill to the
/// heap only past two entries.
type Bucket<K> = SmallVec<[K; 2]>;

/// Approximate set-similarity index.
///
/// Sketches are split into `bands` slices of `rows` values; each slice is
/// hashed to a 64-bit signature and the key is filed under that signature in
/// the band's table. A query reports every key that shares at least one band
/// signature with the query sketch, so a pair with true Jaccard `x` is
/// reported with probability `1 - (1 - x^rows)^bands`.
///
/// The index owns its tables and the keys cloned into them, never the
/// sketches. Keys are opaque: anything hashable, comparable and cloneable.
///
/// There is no interior mutability: `insert` takes `&mut self`, and once
/// populated the index can serve `query` calls from multiple threads.
#[derive(Debug, Clone)]
pub struct BandedLshIndex<K> {
    threshold: f64,
    num_permutations: usize,
    params: LshParams,
    /// `band_start[i] = i * rows`, the slice offset of band `i`.
    band_start: Vec<usize>,
    /// One signature table per band.
    tables: Vec<HashMap<u64, Bucket<K>>>,
    entries: usize,
}

impl<K: Hash + Eq + Clone> BandedLshIndex<K> {
    /// Create an index tuned for `threshold` with balanced false-positive /
    /// false-negative weights (0.5 each).
    pub fn from_threshold(threshold: f64, k: usize) -> Result<Self> {
        Self::with_weights(threshold, k, 0.5, 0.5)
    }

    /// Create an index tuned for `threshold` with explicit error weights.
    pub fn with_weights(threshold: f64, k: usize, fp_weight: f64, fn_weight: f64) -> Result<Self> {
        validate(threshold, k)?;
        let params = LshParams::optimal(threshold, k, fp_weight, fn_weight)?;
        Ok(Self::assemble(threshold, k, params))
    }

    /// Create an index with an explicit band/row split.
    ///
    /// Fails if the split does not fit the sketch width
    /// (`bands * rows > k`) or either count is zero.
    pub fn from_params(threshold: f64, k: usize, bands: usize, rows: usize) -> Result<Self> {
        validate(threshold, k)?;
        if bands == 0 || rows == 0 {
            return Err(SimilarityError::InvalidParameter(
                "bands and rows must both be positive (> 0)".to_string(),
            ));
        }
        if bands * rows > k {
            return Err(SimilarityError::InvalidParameter(format!(
                "bands * rows ({} * {}) cannot be larger than k ({})",
                bands, rows, k
            )));
        }
        Ok(Self::assemble(threshold, k, LshParams { bands, rows }))
    }

    fn assemble(threshold: f64, k: usize, params: LshParams) -> Self {
        Self {
            threshold,
            num_permutations: k,
            params,
            band_start: (0..params.bands).map(|i| i * params.rows).collect(),
            tables: (0..params.bands).map(|_| HashMap::new()).collect(),
            entries: 0,
        }
    }

    /// Insert `key` under every band signature of `sketch`.
    ///
    /// Duplicate inserts append duplicate bucket entries; the index does not
    /// deduplicate until query time.
    pub fn insert<S: SetSketch>(&mut self, key: K, sketch: &S) -> Result<bool> {
        self.check_width(sketch)?;
        let values = sketch.hash_values();
        for (table, &start) in self.tables.iter_mut().zip(self.band_start.iter()) {
            let signature = mix_slice(&values[start..start + self.params.rows]);
            table.entry(signature).or_default().push(key.clone());
        }
        self.entries += 1;
        Ok(true)
    }

    /// All keys sharing at least one band signature with `sketch`.
    ///
    /// The result is deduplicated and unordered. A key inserted with this
    /// exact sketch is always present.
    pub fn query<S: SetSketch>(&self, sketch: &S) -> Result<HashSet<K>> {
        self.check_width(sketch)?;
        let values = sketch.hash_values();
        let mut candidates = HashSet::new();
        for (table, &start) in self.tables.iter().zip(self.band_start.iter()) {
            let signature = mix_slice(&values[start..start + self.params.rows]);
            if let Some(bucket) = table.get(&signature) {
                candidates.extend(bucket.iter().cloned());
            }
        }
        Ok(candidates)
    }

    /// The similarity threshold this index was tuned for.
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Sketch width (`k`) accepted by this index.
    pub fn num_permutations(&self) -> usize {
        self.num_permutations
    }

    /// The band/row split in use.
    pub fn params(&self) -> LshParams {
        self.params
    }

    /// Number of band tables (equal to `params().bands`).
    pub fn num_tables(&self) -> usize {
        self.tables.len()
    }

    /// Number of inserted entries, duplicates included.
    pub fn len(&self) -> usize {
        self.entries
    }

    /// Whether anything has been inserted.
    pub fn is_empty(&self) -> bool {
        self.entries == 0
    }

    fn check_width<S: SetSketch>(&self, sketch: &S) -> Result<()> {
        if sketch.num_permutations() != self.num_permutations {
            return Err(SimilarityError::InvalidParameter(format!(
                "sketch width {} does not match index width {}",
                sketch.num_permutations(),
                self.num_permutations
            )));
        }
        Ok(())
    }
}

fn validate(threshold: f64, k: usize) -> Result<()> {
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
    Ok(())
}
