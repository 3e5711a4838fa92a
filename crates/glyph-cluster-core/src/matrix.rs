//! Symmetric pairwise distance matrix.

use crate::distance::{distance, DistanceParams};
use crate::error::{ClusterError, Result};
use crate::glyph::Glyph;
use log::{debug, info};
use rayon::prelude::*;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Dense symmetric matrix of pairwise glyph distances.
///
/// Built once per clustering run and read-only afterwards. The diagonal is
/// zero and `get(i, j) == get(j, i)` for all pairs.
#[derive(Clone, Debug)]
pub struct DistanceMatrix {
    n: usize,
    data: Vec<f32>, // row-major n*n
}

impl DistanceMatrix {
    /// Compute the full matrix for `glyphs`.
    ///
    /// Only the lower triangle is computed (rows fan out across threads and
    /// every cell is written exactly once before the matrix is handed out);
    /// the upper triangle is mirrored. This is the dominant cost of the
    /// whole pipeline; row progress is logged as it goes.
    pub fn build(glyphs: &[Glyph], params: &DistanceParams) -> Result<Self> {
        let n = glyphs.len();
        if n == 0 {
            return Err(ClusterError::EmptyInput);
        }
        let cells = n
            .checked_mul(n)
            .ok_or(ClusterError::MatrixTooLarge { samples: n })?;

        let done = AtomicUsize::new(0);
        let rows: Vec<Vec<f32>> = (0..n)
            .into_par_iter()
            .map(|i| {
                let row = (0..=i)
                    .map(|j| {
                        if i == j {
                            0.0
                        } else {
                            distance(&glyphs[i], &glyphs[j], params)
                        }
                    })
                    .collect();
                let finished = done.fetch_add(1, Ordering::Relaxed) + 1;
                if finished % 250 == 0 {
                    debug!("distance rows: {finished}/{n}");
                }
                row
            })
            .collect();

        let mut data = Vec::new();
        data.try_reserve_exact(cells)
            .map_err(|_| ClusterError::MatrixTooLarge { samples: n })?;
        data.resize(cells, 0.0);
        for (i, row) in rows.iter().enumerate() {
            for (j, &d) in row.iter().enumerate() {
                data[i * n + j] = d;
                data[j * n + i] = d;
            }
        }

        info!("distance matrix ready ({n} samples)");
        Ok(Self { n, data })
    }

    /// Matrix from an explicit pairwise function, mirrored from the lower
    /// triangle so symmetry holds regardless of `f`. The diagonal is zero.
    ///
    /// Intended for precomputed distances and tests.
    pub fn from_fn(n: usize, mut f: impl FnMut(usize, usize) -> f32) -> Self {
        let mut data = vec![0.0; n * n];
        for i in 0..n {
            for j in 0..i {
                let d = f(i, j);
                data[i * n + j] = d;
                data[j * n + i] = d;
            }
        }
        Self { n, data }
    }

    /// Number of samples covered by the matrix.
    #[inline]
    pub fn len(&self) -> usize {
        self.n
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// Distance between samples `i` and `j`.
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f32 {
        self.data[i * self.n + j]
    }

    /// Indices whose distance to `p` is at most `eps`, `p` itself included.
    pub fn neighbors_within(&self, p: usize, eps: f32) -> Vec<usize> {
        let row = &self.data[p * self.n..(p + 1) * self.n];
        row.iter()
            .enumerate()
            .filter(|&(_, &d)| d <= eps)
            .map(|(q, _)| q)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::glyph::GlyphView;
    use approx::assert_relative_eq;

    fn glyph(seed: u8, size: usize) -> Glyph {
        let data: Vec<u8> = (0..size * size)
            .map(|i| ((i as u8).wrapping_mul(7).wrapping_add(seed)) % 200)
            .collect();
        Glyph::from_ink(
            &GlyphView {
                width: size,
                height: size,
                data: &data,
            },
            format!("g{seed}"),
        )
        .expect("synthetic glyph has ink")
    }

    #[test]
    fn build_is_symmetric_with_zero_diagonal() {
        let glyphs: Vec<Glyph> = (0..6).map(|s| glyph(s, 8)).collect();
        let matrix = DistanceMatrix::build(&glyphs, &DistanceParams::default()).expect("build");

        assert_eq!(matrix.len(), 6);
        for i in 0..6 {
            assert_relative_eq!(matrix.get(i, i), 0.0);
            for j in 0..6 {
                assert_relative_eq!(matrix.get(i, j), matrix.get(j, i));
            }
        }
    }

    #[test]
    fn empty_input_is_rejected() {
        let err = DistanceMatrix::build(&[], &DistanceParams::default());
        assert!(matches!(err, Err(ClusterError::EmptyInput)));
    }

    #[test]
    fn neighbors_include_self() {
        let matrix = DistanceMatrix::from_fn(4, |i, j| if i + j == 1 { 1.0 } else { 50.0 });
        let neighbours = matrix.neighbors_within(0, 10.0);
        assert_eq!(neighbours, vec![0, 1]);
    }
}
