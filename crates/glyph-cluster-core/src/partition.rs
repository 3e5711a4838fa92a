//! Threshold equivalence-class clustering over a distance matrix.
//!
//! Two samples land in the same cluster iff a chain of below-threshold pairs
//! connects them: the transitive closure of "close enough", not mutual
//! closeness of every pair. Every sample belongs to exactly one cluster;
//! there is no noise concept here.

use crate::error::{ClusterError, Result};
use crate::matrix::DistanceMatrix;
use crate::strategy::{Cluster, ClusterStrategy};
use log::debug;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Parameters for [`ThresholdPartitioner`].
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct PartitionParams {
    /// Pairs strictly closer than this are forced into the same cluster.
    pub threshold: f32,
}

impl Default for PartitionParams {
    fn default() -> Self {
        Self { threshold: 15.0 }
    }
}

/// Disjoint-set forest with path halving and union by rank.
#[derive(Clone, Debug)]
struct DisjointSet {
    parent: Vec<usize>,
    rank: Vec<u8>,
}

impl DisjointSet {
    fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            rank: vec![0; n],
        }
    }

    fn find(&mut self, mut x: usize) -> usize {
        while self.parent[x] != x {
            self.parent[x] = self.parent[self.parent[x]];
            x = self.parent[x];
        }
        x
    }

    fn union(&mut self, a: usize, b: usize) {
        let ra = self.find(a);
        let rb = self.find(b);
        if ra == rb {
            return;
        }
        match self.rank[ra].cmp(&self.rank[rb]) {
            Ordering::Less => self.parent[ra] = rb,
            Ordering::Greater => self.parent[rb] = ra,
            Ordering::Equal => {
                self.parent[rb] = ra;
                self.rank[ra] += 1;
            }
        }
    }
}

/// Union-find clustering: equivalence classes of the "distance below
/// threshold" relation.
#[derive(Clone, Debug, Default)]
pub struct ThresholdPartitioner {
    params: PartitionParams,
}

impl ThresholdPartitioner {
    /// Create a partitioner with the given threshold.
    pub fn new(params: PartitionParams) -> Self {
        Self { params }
    }

    #[inline]
    pub fn params(&self) -> &PartitionParams {
        &self.params
    }
}

impl ClusterStrategy for ThresholdPartitioner {
    fn cluster(&self, matrix: &DistanceMatrix) -> Result<Vec<Cluster>> {
        let threshold = self.params.threshold;
        if !(threshold > 0.0) {
            return Err(ClusterError::InvalidParameter {
                name: "threshold",
                message: "must be positive",
            });
        }
        let n = matrix.len();
        if n == 0 {
            return Err(ClusterError::EmptyInput);
        }

        let mut sets = DisjointSet::new(n);
        for i in 0..n {
            for j in 0..i {
                if matrix.get(i, j) < threshold {
                    sets.union(i, j);
                }
            }
        }

        // Clusters ordered by first member; members keep input order.
        let mut slot: Vec<Option<usize>> = vec![None; n];
        let mut clusters: Vec<Cluster> = Vec::new();
        for i in 0..n {
            let root = sets.find(i);
            let c = match slot[root] {
                Some(c) => c,
                None => {
                    clusters.push(Vec::new());
                    slot[root] = Some(clusters.len() - 1);
                    clusters.len() - 1
                }
            };
            clusters[c].push(i);
        }

        debug!("partitioned {n} samples into {} clusters", clusters.len());
        Ok(clusters)
    }
}
