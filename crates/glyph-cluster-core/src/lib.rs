//! Core types and algorithms for unsupervised glyph shape clustering.
//!
//! Groups small single-channel glyph images (isolated handwritten character
//! blobs) by visual similarity: a size-tolerant, mass-centre-aligned distance
//! metric feeds a symmetric pairwise matrix, which either of two strategies
//! consumes. Union-find threshold partitioning clusters every sample; DBSCAN
//! density clustering drops outliers as noise.
//!
//! This crate is intentionally small and purely pixel-based. It does *not*
//! depend on any concrete image decoder or directory layout; see the
//! `glyph-cluster` facade for those.

mod dbscan;
mod distance;
mod error;
mod evaluate;
mod glyph;
mod logger;
mod matrix;
mod partition;
mod strategy;

pub use dbscan::{Dbscan, DbscanParams};
pub use distance::{
    distance, DistanceParams, KernelError, PositionalKernel, Weighting, KERNEL_RADIUS,
    KERNEL_SIZE, SENTINEL_DISTANCE,
};
pub use error::{ClusterError, Result};
pub use evaluate::{pair_confusion, PairConfusion};
pub use glyph::{Glyph, GlyphError, GlyphView, BACKGROUND};
pub use matrix::DistanceMatrix;
pub use partition::{PartitionParams, ThresholdPartitioner};
pub use strategy::{Cluster, ClusterStrategy};

#[cfg(feature = "tracing")]
pub use logger::init_tracing;
pub use logger::init_with_level;
