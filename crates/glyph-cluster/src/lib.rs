//! High-level facade for the `glyph-cluster` workspace.
//!
//! This crate provides:
//! - stable re-exports of `glyph-cluster-core`
//! - (feature `image`) adapters that decode PNG glyph directories into core
//!   [`Glyph`] samples, cropped to their ink and centred on the ink mass
//! - cluster-file writing and ground-truth label reading
//! - (feature `cli`) the `glyph-cluster` command-line binary
//!
//! ## Quickstart
//!
//! ```no_run
//! use glyph_cluster::prepare::load_glyph_dir;
//! use glyph_cluster::{
//!     ClusterStrategy, DistanceMatrix, DistanceParams, PartitionParams, ThresholdPartitioner,
//! };
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let glyphs = load_glyph_dir("glyphs/")?;
//! let matrix = DistanceMatrix::build(&glyphs, &DistanceParams::default())?;
//! let clusters = ThresholdPartitioner::new(PartitionParams::default()).cluster(&matrix)?;
//! println!("{} clusters", clusters.len());
//! # Ok(())
//! # }
//! ```

pub use glyph_cluster_core as core;

pub use glyph_cluster_core::{
    distance, pair_confusion, Cluster, ClusterError, ClusterStrategy, Dbscan, DbscanParams,
    DistanceMatrix, DistanceParams, Glyph, GlyphError, GlyphView, PairConfusion, PartitionParams,
    PositionalKernel, ThresholdPartitioner, Weighting, SENTINEL_DISTANCE,
};

pub mod io;
#[cfg(feature = "image")]
pub mod prepare;
