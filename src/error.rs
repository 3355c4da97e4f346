//! Error types for overlap.

use thiserror::Error;

/// Errors that can occur during sketching and indexing operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimilarityError {
    /// Invalid parameter value (threshold out of range, zero permutations,
    /// infeasible band/row split, mismatched sketch widths).
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Internal invariant violation (should be unreachable).
    #[error("internal error: {0}")]
    Internal(String),
}

/// Result type alias for overlap operations.
pub type Result<T> = std::result::Result<T, SimilarityError>;
