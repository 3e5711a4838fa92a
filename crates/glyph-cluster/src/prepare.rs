//! Directory loading and glyph preparation from decoded images.

use crate::core::{Glyph, GlyphView};
use log::{info, warn};
use std::fs;
use std::path::{Path, PathBuf};

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Errors from the directory loader.
#[derive(thiserror::Error, Debug)]
pub enum PrepareError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("no usable glyph images in {dir}")]
    NoGlyphs { dir: String },
}

/// Borrow a decoded grayscale image as a core glyph view.
pub fn gray_view(img: &image::GrayImage) -> GlyphView<'_> {
    GlyphView {
        width: img.width() as usize,
        height: img.height() as usize,
        data: img.as_raw(),
    }
}

/// Crop a decoded image to its ink and compute the mass centre.
///
/// Returns `None` for blank (all-background) images.
pub fn prepare_glyph(img: &image::GrayImage, name: impl Into<String>) -> Option<Glyph> {
    Glyph::from_ink(&gray_view(img), name)
}

/// Load every `.png` glyph in `dir`, cropped and centred.
///
/// Non-PNG entries, undecodable files and blank images are skipped with a
/// warning. Entries are processed in file-name order so the sample order,
/// and therefore the clustering output, does not depend on the platform's
/// directory iteration order.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "info", skip_all, fields(dir = %dir.as_ref().display()))
)]
pub fn load_glyph_dir(dir: impl AsRef<Path>) -> Result<Vec<Glyph>, PrepareError> {
    let dir = dir.as_ref();
    let mut paths: Vec<PathBuf> = fs::read_dir(dir)?
        .collect::<Result<Vec<_>, _>>()?
        .into_iter()
        .map(|entry| entry.path())
        .collect();
    paths.sort();

    let mut glyphs = Vec::new();
    for path in paths {
        if path.extension().and_then(|e| e.to_str()) != Some("png") {
            warn!("skipping non-png entry {}", path.display());
            continue;
        }
        let Some(name) = path.file_name().map(|n| n.to_string_lossy().into_owned()) else {
            continue;
        };

        let img = match image::open(&path) {
            Ok(img) => img.to_luma8(),
            Err(err) => {
                warn!("could not load {}: {err}", path.display());
                continue;
            }
        };

        match prepare_glyph(&img, name) {
            Some(glyph) => glyphs.push(glyph),
            None => {
                warn!("skipping blank image {}", path.display());
                continue;
            }
        }

        if glyphs.len() % 250 == 0 {
            info!("prepared {} glyphs", glyphs.len());
        }
    }

    if glyphs.is_empty() {
        return Err(PrepareError::NoGlyphs {
            dir: dir.display().to_string(),
        });
    }

    info!("loaded {} glyphs from {}", glyphs.len(), dir.display());
    Ok(glyphs)
}
