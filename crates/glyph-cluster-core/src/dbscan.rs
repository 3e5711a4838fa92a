//! Density clustering (DBSCAN) over a precomputed distance matrix.
//!
//! Samples with at least `min_pts` neighbours within `eps` are core points;
//! clusters grow breadth-first through every density-connected core point.
//! Samples reachable from no core point are noise and never appear in the
//! output.

use crate::error::{ClusterError, Result};
use crate::matrix::DistanceMatrix;
use crate::strategy::{Cluster, ClusterStrategy};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Parameters for [`Dbscan`].
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct DbscanParams {
    /// Neighbourhood radius in distance units.
    pub eps: f32,
    /// Minimum neighbourhood size (the sample itself counts) for a core
    /// point.
    pub min_pts: usize,
}

impl Default for DbscanParams {
    fn default() -> Self {
        Self {
            eps: 28.0,
            min_pts: 6,
        }
    }
}

/// Density-based clusterer; outliers are dropped rather than forced into a
/// cluster.
#[derive(Clone, Debug, Default)]
pub struct Dbscan {
    params: DbscanParams,
}

impl Dbscan {
    /// Create a clusterer with the given radius and density floor.
    pub fn new(params: DbscanParams) -> Self {
        Self { params }
    }

    #[inline]
    pub fn params(&self) -> &DbscanParams {
        &self.params
    }
}

impl ClusterStrategy for Dbscan {
    fn cluster(&self, matrix: &DistanceMatrix) -> Result<Vec<Cluster>> {
        let DbscanParams { eps, min_pts } = self.params;
        if !(eps > 0.0) {
            return Err(ClusterError::InvalidParameter {
                name: "eps",
                message: "must be positive",
            });
        }
        if min_pts == 0 {
            return Err(ClusterError::InvalidParameter {
                name: "min_pts",
                message: "must be at least 1",
            });
        }
        let n = matrix.len();
        if n == 0 {
            return Err(ClusterError::EmptyInput);
        }

        let mut visited = vec![false; n];
        let mut assigned = vec![false; n];
        let mut clusters: Vec<Cluster> = Vec::new();

        for p in 0..n {
            if visited[p] {
                continue;
            }
            visited[p] = true;

            let neighbours = matrix.neighbors_within(p, eps);
            if neighbours.len() < min_pts {
                // Provisional noise; a later core point may still claim it.
                continue;
            }

            let mut members = vec![p];
            assigned[p] = true;
            let mut frontier: VecDeque<usize> = neighbours.into();

            while let Some(q) = frontier.pop_front() {
                if !visited[q] {
                    visited[q] = true;
                    let reach = matrix.neighbors_within(q, eps);
                    if reach.len() >= min_pts {
                        // q is itself core: keep expanding through it.
                        // Duplicate enqueues are idempotent re-checks.
                        for r in reach {
                            if !visited[r] || !assigned[r] {
                                frontier.push_back(r);
                            }
                        }
                    }
                }
                if !assigned[q] {
                    assigned[q] = true;
                    members.push(q);
                }
            }

            debug!("cluster {} holds {} samples", clusters.len(), members.len());
            clusters.push(members);
        }

        Ok(clusters)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dbscan(matrix: &DistanceMatrix, eps: f32, min_pts: usize) -> Vec<Cluster> {
        Dbscan::new(DbscanParams { eps, min_pts })
            .cluster(matrix)
            .expect("valid input")
    }

    /// Ten near-identical samples plus one far outlier.
    fn near_identical_with_outlier() -> DistanceMatrix {
        DistanceMatrix::from_fn(11, |i, j| if i < 10 && j < 10 { 5.0 } else { 100.0 })
    }

    #[test]
    fn dense_group_clusters_and_outlier_is_noise() {
        let matrix = near_identical_with_outlier();
        let clusters = dbscan(&matrix, 28.0, 6);

        assert_eq!(clusters.len(), 1);
        let mut members = clusters[0].clone();
        members.sort_unstable();
        assert_eq!(members, (0..10).collect::<Vec<_>>());
    }

    #[test]
    fn every_core_point_is_assigned() {
        let matrix = DistanceMatrix::from_fn(9, |i, j| if i / 3 == j / 3 { 2.0 } else { 80.0 });
        let clusters = dbscan(&matrix, 10.0, 3);

        // Three dense triples; each sample has exactly min_pts neighbours.
        assert_eq!(clusters.len(), 3);
        let assigned: usize = clusters.iter().map(Vec::len).sum();
        assert_eq!(assigned, 9);
    }

    #[test]
    fn sparse_samples_are_all_noise() {
        let matrix = DistanceMatrix::from_fn(5, |_, _| 100.0);
        let clusters = dbscan(&matrix, 1.0, 3);
        assert!(clusters.is_empty());
    }

    #[test]
    fn border_sample_is_promoted_out_of_noise() {
        // Sample 0 is close to sample 1 only, so it fails the density test
        // when visited first; the cluster seeded at 1 must still absorb it.
        let matrix = DistanceMatrix::from_fn(7, |i, j| {
            let (hi, lo) = (i.max(j), i.min(j));
            if lo == 0 {
                if hi == 1 {
                    1.0
                } else {
                    100.0
                }
            } else {
                1.0
            }
        });
        let clusters = dbscan(&matrix, 10.0, 6);

        assert_eq!(clusters.len(), 1);
        assert!(clusters[0].contains(&0));
        assert_eq!(clusters[0].len(), 7);
    }

    #[test]
    fn chain_of_core_points_connects() {
        // Consecutive samples are close; density carries the cluster across
        // the whole chain even though the ends are far apart.
        let matrix = DistanceMatrix::from_fn(10, |i, j| (i.abs_diff(j) as f32) * 4.0);
        let clusters = dbscan(&matrix, 9.0, 3);

        assert_eq!(clusters.len(), 1);
        assert_eq!(clusters[0].len(), 10);
    }

    #[test]
    fn degenerate_parameters_are_rejected() {
        let matrix = DistanceMatrix::from_fn(2, |_, _| 1.0);

        for eps in [0.0, -1.0, f32::NAN] {
            let err = Dbscan::new(DbscanParams { eps, min_pts: 3 }).cluster(&matrix);
            assert!(matches!(
                err,
                Err(ClusterError::InvalidParameter { name: "eps", .. })
            ));
        }

        let err = Dbscan::new(DbscanParams {
            eps: 1.0,
            min_pts: 0,
        })
        .cluster(&matrix);
        assert!(matches!(
            err,
            Err(ClusterError::InvalidParameter { name: "min_pts", .. })
        ));
    }

    #[test]
    fn repeated_runs_agree() {
        let matrix = near_identical_with_outlier();
        assert_eq!(dbscan(&matrix, 28.0, 6), dbscan(&matrix, 28.0, 6));
    }
}
