//! Strategy seam shared by the two clustering algorithms.

use crate::error::Result;
use crate::matrix::DistanceMatrix;

/// Ordered, duplicate-free group of sample indices.
pub type Cluster = Vec<usize>;

/// Common interface for clustering strategies over a precomputed distance
/// matrix.
///
/// Both algorithms read the same matrix; which samples end up grouped, and
/// whether unclustered noise is possible, is up to the strategy.
pub trait ClusterStrategy {
    /// Group samples into clusters of matrix indices.
    ///
    /// Clusters are non-empty and pairwise disjoint. Their union may be a
    /// strict subset of the input for strategies with a noise concept.
    fn cluster(&self, matrix: &DistanceMatrix) -> Result<Vec<Cluster>>;
}
