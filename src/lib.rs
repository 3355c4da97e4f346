//! overlap: Approximate set-similarity search primitives.
//!
//! Given a corpus of string-valued sets (think: the value-sets of columns in
//! a data lake), `overlap` retrieves all indexed sets whose Jaccard
//! similarity to a query set exceeds a chosen threshold, without pairwise
//! comparison. Each set is summarized as a [`MinHashSketch`]; sketches are
//! filed in a [`BandedLshIndex`] whose band/row split is tuned to the
//! threshold by [`LshParams::optimal`].
//!
//! # Which piece do I need?
//!
//! | Task | Entry point |
//! |------|-------------|
//! | Summarize a set | [`MinHashSketch`] |
//! | Estimate similarity of two sets | [`MinHashSketch::estimate_jaccard`] |
//! | Threshold retrieval over a corpus | [`BandedLshIndex`] |
//! | Inspect the band/row trade-off | [`LshParams`] |
//!
//! # Example
//!
//! ```
//! use overlap::{BandedLshIndex, MinHashSketch};
//!
//! let mut index = BandedLshIndex::from_threshold(0.5, 128)?;
//!
//! let a = MinHashSketch::from_values(128, ["air", "rail", "ship", "truck"])?;
//! let b = MinHashSketch::from_values(128, ["air", "rail", "ship", "truck", "mail"])?;
//! index.insert("lineitem->shipmode", &a)?;
//! index.insert("orders->shipmode", &b)?;
//!
//! // Jaccard(a, b) = 0.8 >= 0.5: both columns come back as candidates.
//! let candidates = index.query(&a)?;
//! assert!(candidates.contains("lineitem->shipmode"));
//! assert!(candidates.contains("orders->shipmode"));
//! # Ok::<(), overlap::SimilarityError>(())
//! ```
//!
//! # Guarantees and limits
//!
//! - Sketching is deterministic: the same set produces byte-identical
//!   sketches in any process, in any insertion order.
//! - A pair with true Jaccard `x` is reported with probability
//!   `1 - (1 - x^rows)^bands`; a key queried with its own insertion sketch
//!   is always reported.
//! - Candidates are approximate. Callers wanting exact similarity verify
//!   them against the source sets; the crate never performs I/O and never
//!   persists an index.
//!
//! # References
//!
//! - Broder (1997): "On the resemblance and containment of documents"
//! - Leskovec, Rajaraman & Ullman: "Mining of Massive Datasets", ch. 3

pub mod error;
pub mod hash;
pub mod lsh;
pub mod sketch;

pub use error::{Result, SimilarityError};
pub use hash::PermutationFamily;
pub use lsh::{BandedLshIndex, LshParams};
pub use sketch::{MinHashSketch, SetSketch};
