//! Cluster output files and ground-truth label files.

use crate::core::{Cluster, Glyph};
use log::info;
use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

/// Errors from reading a ground-truth label file.
#[derive(thiserror::Error, Debug)]
pub enum LabelFileError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("malformed label line {line}: {text:?}")]
    MalformedLine { line: usize, text: String },
}

/// Write clusters as one line per cluster, glyph names space-separated.
///
/// Empty clusters are never materialized.
pub fn write_clusters(
    path: impl AsRef<Path>,
    clusters: &[Cluster],
    glyphs: &[Glyph],
) -> std::io::Result<()> {
    let mut out = BufWriter::new(File::create(path)?);
    let mut written = 0usize;

    for members in clusters {
        if members.is_empty() {
            continue;
        }
        for (k, &idx) in members.iter().enumerate() {
            if k > 0 {
                write!(out, " ")?;
            }
            write!(out, "{}", glyphs[idx].name())?;
        }
        writeln!(out)?;
        written += 1;
    }
    out.flush()?;

    info!("wrote {written} clusters");
    Ok(())
}

/// Read a whitespace-separated `name label` file into a lookup map.
///
/// Blank lines are ignored; a line with fewer than two fields is an error.
/// Extra fields after the label are ignored.
pub fn read_truth_labels(path: impl AsRef<Path>) -> Result<HashMap<String, String>, LabelFileError> {
    let raw = fs::read_to_string(path)?;
    let mut labels = HashMap::new();

    for (lineno, line) in raw.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let mut parts = line.split_whitespace();
        match (parts.next(), parts.next()) {
            (Some(name), Some(label)) => {
                labels.insert(name.to_string(), label.to_string());
            }
            _ => {
                return Err(LabelFileError::MalformedLine {
                    line: lineno + 1,
                    text: line.to_string(),
                })
            }
        }
    }
    Ok(labels)
}

/// Join truth labels to glyph order, for [`crate::pair_confusion`].
pub fn truth_by_index<'a>(
    glyphs: &[Glyph],
    labels: &'a HashMap<String, String>,
) -> Vec<Option<&'a str>> {
    glyphs
        .iter()
        .map(|g| labels.get(g.name()).map(String::as_str))
        .collect()
}
