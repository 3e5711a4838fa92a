//! Size-tolerant, mass-centre-aligned distance between two glyphs.
//!
//! The metric overlays two glyphs so their mass centres coincide and
//! accumulates a weighted mean absolute pixel difference over the overlapping
//! rectangle. Pairs whose dimensions differ by more than the size tolerance
//! are rejected outright with [`SENTINEL_DISTANCE`], without inspecting any
//! pixels.

use crate::glyph::Glyph;
use serde::{Deserialize, Serialize};

/// Score reported for incomparable pairs; also the upper bound of the metric.
pub const SENTINEL_DISTANCE: f32 = 128.0;

/// Radius of the positional importance window (offsets `-15..=15`).
pub const KERNEL_RADIUS: i32 = 15;

/// Side length of the positional kernel table.
pub const KERNEL_SIZE: usize = 31;

/// Errors raised when building a [`PositionalKernel`].
#[derive(thiserror::Error, Debug)]
pub enum KernelError {
    #[error("invalid kernel table length (expected {expected} entries, got {got})")]
    InvalidLength { expected: usize, got: usize },
}

/// Fixed 31x31 importance table applied around the alignment centre.
///
/// Serialized form is the flat row-major table, so a kernel can be kept in a
/// plain JSON array.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<u32>", into = "Vec<u32>")]
pub struct PositionalKernel {
    weights: Vec<u32>, // KERNEL_SIZE * KERNEL_SIZE, row-major
}

impl PositionalKernel {
    /// Build a kernel from a flat row-major table of `KERNEL_SIZE`² entries.
    pub fn new(weights: Vec<u32>) -> Result<Self, KernelError> {
        let expected = KERNEL_SIZE * KERNEL_SIZE;
        if weights.len() != expected {
            return Err(KernelError::InvalidLength {
                expected,
                got: weights.len(),
            });
        }
        Ok(Self { weights })
    }

    /// Sum two supplied weight tables into one kernel.
    pub fn from_tables(a: &[u32], b: &[u32]) -> Result<Self, KernelError> {
        let expected = KERNEL_SIZE * KERNEL_SIZE;
        for table in [a, b] {
            if table.len() != expected {
                return Err(KernelError::InvalidLength {
                    expected,
                    got: table.len(),
                });
            }
        }
        let weights = a
            .iter()
            .zip(b.iter())
            .map(|(&x, &y)| x.saturating_add(y))
            .collect();
        Ok(Self { weights })
    }

    /// Weight at centre-relative offset `(dx, dy)`, both within
    /// `-KERNEL_RADIUS..=KERNEL_RADIUS`.
    #[inline]
    fn at(&self, dx: i32, dy: i32) -> u32 {
        let row = (dy + KERNEL_RADIUS) as usize;
        let col = (dx + KERNEL_RADIUS) as usize;
        self.weights[row * KERNEL_SIZE + col]
    }
}

impl Default for PositionalKernel {
    /// Radial emphasis table: strongest at the centre, tapering towards the
    /// unit weight used outside the window.
    fn default() -> Self {
        let mut weights = Vec::with_capacity(KERNEL_SIZE * KERNEL_SIZE);
        for dy in -KERNEL_RADIUS..=KERNEL_RADIUS {
            for dx in -KERNEL_RADIUS..=KERNEL_RADIUS {
                let r2 = (dx * dx + dy * dy) as f32;
                let w = 1 + (14.0 * (-r2 / 98.0).exp()).round() as u32;
                weights.push(w);
            }
        }
        Self { weights }
    }
}

impl TryFrom<Vec<u32>> for PositionalKernel {
    type Error = KernelError;

    fn try_from(weights: Vec<u32>) -> Result<Self, KernelError> {
        Self::new(weights)
    }
}

impl From<PositionalKernel> for Vec<u32> {
    fn from(kernel: PositionalKernel) -> Self {
        kernel.weights
    }
}

/// Pixel-pair weighting policy used by [`distance`].
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Weighting {
    /// Fixed importance table near the alignment centre, unit weight
    /// elsewhere.
    Positional(PositionalKernel),
    /// `min(510 - pa - pb, 255)`: pairs of dark pixels weigh close to the
    /// maximum while background-background agreement weighs nothing.
    InkIntensity,
}

impl Weighting {
    #[inline]
    fn weight(&self, dx: i32, dy: i32, pa: u8, pb: u8) -> u32 {
        match self {
            Weighting::Positional(kernel) => {
                if dx.abs() <= KERNEL_RADIUS && dy.abs() <= KERNEL_RADIUS {
                    kernel.at(dx, dy)
                } else {
                    1
                }
            }
            Weighting::InkIntensity => (510 - u32::from(pa) - u32::from(pb)).min(255),
        }
    }
}

impl Default for Weighting {
    fn default() -> Self {
        Weighting::InkIntensity
    }
}

/// Parameters for the pairwise glyph distance.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DistanceParams {
    /// Maximum width/height difference before a pair is declared
    /// incomparable.
    #[serde(default = "default_size_tolerance")]
    pub size_tolerance: usize,
    /// Pixel-pair weighting policy.
    #[serde(default)]
    pub weighting: Weighting,
}

fn default_size_tolerance() -> usize {
    5
}

impl Default for DistanceParams {
    fn default() -> Self {
        Self {
            size_tolerance: default_size_tolerance(),
            weighting: Weighting::default(),
        }
    }
}

/// Weighted mean absolute difference between two glyphs overlaid at their
/// mass centres.
///
/// Symmetric, non-negative, and bounded by [`SENTINEL_DISTANCE`], which is
/// returned outright when the size gate rejects the pair or the aligned
/// overlap carries no weight (degenerate all-background input).
pub fn distance(a: &Glyph, b: &Glyph, params: &DistanceParams) -> f32 {
    if a.width().abs_diff(b.width()) > params.size_tolerance
        || a.height().abs_diff(b.height()) > params.size_tolerance
    {
        return SENTINEL_DISTANCE;
    }

    let (ax, ay) = a.anchor();
    let (bx, by) = b.anchor();

    // Overlapping rectangle in centre-relative coordinates; half-open upper
    // bounds so neither image is ever indexed past its last row or column.
    let x_lo = -ax.min(bx);
    let x_hi = (a.width() as i32 - ax).min(b.width() as i32 - bx);
    let y_lo = -ay.min(by);
    let y_hi = (a.height() as i32 - ay).min(b.height() as i32 - by);

    let mut sum = 0u64;
    let mut total_weight = 0u64;

    for dy in y_lo..y_hi {
        for dx in x_lo..x_hi {
            let pa = a.pixel(ax + dx, ay + dy);
            let pb = b.pixel(bx + dx, by + dy);
            let w = u64::from(params.weighting.weight(dx, dy, pa, pb));
            sum += w * u64::from(pa.abs_diff(pb));
            total_weight += w;
        }
    }

    if total_weight == 0 {
        return SENTINEL_DISTANCE;
    }
    sum as f32 / total_weight as f32
}
