//! Error types shared by the matrix builder and the clustering strategies.

use thiserror::Error;

/// Errors returned by clustering operations in this crate.
#[derive(Debug, Error)]
pub enum ClusterError {
    /// No samples were provided.
    #[error("empty input")]
    EmptyInput,

    /// A parameter is outside its valid range.
    #[error("invalid parameter {name}: {message}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Human-readable explanation.
        message: &'static str,
    },

    /// The full pairwise matrix cannot be allocated for this sample count.
    #[error("distance matrix for {samples} samples does not fit in memory")]
    MatrixTooLarge { samples: usize },
}

/// Result type used by this crate.
pub type Result<T> = std::result::Result<T, ClusterError>;
