//! Banded LSH for set-similarity retrieval.
//!
//! Rather than comparing every pair of sketches, the index files each
//! sketch under one 64-bit signature per band. Sets whose similarity
//! exceeds the tuning threshold collide in at least one band with high
//! probability; everything else almost never does.
//!
//! [`params`] chooses the band/row split from the threshold, [`index`]
//! maintains the per-band signature tables.
//!
//! # References
//!
//! - Indyk & Motwani (1998): "Approximate nearest neighbors: towards
//!   removing the curse of dimensionality"
//! - Leskovec, Rajaraman & Ullman. "Mining of Massive Datasets", ch. 3

pub mod index;
pub mod params;

pub use index::BandedLshIndex;
pub use params::LshParams;
