//! Command-line glyph clustering tool.
//!
//! Loads a directory of cropped glyph PNGs, builds the pairwise distance
//! matrix, runs one clustering strategy and writes one cluster of glyph
//! names per line.

use clap::{Parser, ValueEnum};
use glyph_cluster::core::init_with_level;
use glyph_cluster::io::{read_truth_labels, truth_by_index, write_clusters, LabelFileError};
use glyph_cluster::prepare::{load_glyph_dir, PrepareError};
use glyph_cluster::{
    pair_confusion, ClusterError, ClusterStrategy, Dbscan, DbscanParams, DistanceMatrix,
    DistanceParams, PairConfusion, PartitionParams, PositionalKernel, ThresholdPartitioner,
    Weighting,
};
use log::{info, LevelFilter};
use serde::Serialize;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

/// Group handwritten glyph images into clusters of visually similar shapes.
#[derive(Parser, Debug)]
#[command(name = "glyph-cluster", version, about)]
struct Args {
    /// Directory containing glyph images (*.png).
    input_dir: PathBuf,

    /// Output file; one cluster of glyph names per line.
    output: PathBuf,

    /// Clustering strategy.
    #[arg(long, value_enum, default_value = "partition")]
    method: Method,

    /// Distance threshold for the partition method.
    #[arg(long, default_value_t = 15.0)]
    threshold: f32,

    /// Neighbourhood radius for dbscan.
    #[arg(long, default_value_t = 28.0)]
    eps: f32,

    /// Minimum neighbourhood size for a dbscan core point.
    #[arg(long, default_value_t = 6)]
    min_pts: usize,

    /// Maximum width/height difference before two glyphs are incomparable.
    #[arg(long, default_value_t = 5)]
    size_tolerance: usize,

    /// Pixel-pair weighting policy.
    #[arg(long, value_enum, default_value = "ink")]
    weighting: WeightingArg,

    /// JSON file with a flat 31x31 kernel table; implies `--weighting kernel`.
    #[arg(long)]
    kernel: Option<PathBuf>,

    /// Ground-truth `name label` file for diagnostic pair counts.
    #[arg(long)]
    labels: Option<PathBuf>,

    /// Write a JSON run report to this path.
    #[arg(long)]
    report: Option<PathBuf>,

    /// Log debug detail.
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Method {
    /// Union-find threshold partitioning; every glyph lands in a cluster.
    Partition,
    /// Density clustering; outliers are dropped as noise.
    Dbscan,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum WeightingArg {
    /// Weight pixel pairs by their ink intensity.
    Ink,
    /// Weight pixel pairs by a positional kernel around the mass centre.
    Kernel,
}

#[derive(thiserror::Error, Debug)]
enum CliError {
    #[error(transparent)]
    Prepare(#[from] PrepareError),
    #[error(transparent)]
    Cluster(#[from] ClusterError),
    #[error(transparent)]
    Labels(#[from] LabelFileError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

#[derive(Serialize)]
struct RunReport {
    num_glyphs: usize,
    num_clusters: usize,
    clustered_samples: usize,
    confusion: Option<PairConfusion>,
    rand_index: Option<f64>,
}

fn main() -> ExitCode {
    let args = Args::parse();
    let level = if args.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    let _ = init_with_level(level);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), CliError> {
    let glyphs = load_glyph_dir(&args.input_dir)?;

    let weighting = match (&args.kernel, args.weighting) {
        (Some(path), _) => {
            let raw = fs::read_to_string(path)?;
            Weighting::Positional(serde_json::from_str(&raw)?)
        }
        (None, WeightingArg::Kernel) => Weighting::Positional(PositionalKernel::default()),
        (None, WeightingArg::Ink) => Weighting::InkIntensity,
    };
    let params = DistanceParams {
        size_tolerance: args.size_tolerance,
        weighting,
    };

    let matrix = DistanceMatrix::build(&glyphs, &params)?;

    let clusters = match args.method {
        Method::Partition => ThresholdPartitioner::new(PartitionParams {
            threshold: args.threshold,
        })
        .cluster(&matrix)?,
        Method::Dbscan => Dbscan::new(DbscanParams {
            eps: args.eps,
            min_pts: args.min_pts,
        })
        .cluster(&matrix)?,
    };
    info!("{} clusters over {} glyphs", clusters.len(), glyphs.len());

    write_clusters(&args.output, &clusters, &glyphs)?;

    let confusion = match &args.labels {
        Some(path) => {
            let truth_map = read_truth_labels(path)?;
            let truth = truth_by_index(&glyphs, &truth_map);
            let counts = pair_confusion(&clusters, &truth);
            info!(
                "pair confusion: e00={} e01={} e10={} e11={}",
                counts.e00, counts.e01, counts.e10, counts.e11
            );
            Some(counts)
        }
        None => None,
    };

    if let Some(path) = &args.report {
        let report = RunReport {
            num_glyphs: glyphs.len(),
            num_clusters: clusters.len(),
            clustered_samples: clusters.iter().map(Vec::len).sum(),
            rand_index: confusion.as_ref().map(PairConfusion::rand_index),
            confusion,
        };
        fs::write(path, serde_json::to_string_pretty(&report)?)?;
    }

    Ok(())
}
