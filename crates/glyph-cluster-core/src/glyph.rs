//! Glyph pixel buffers and mass-centre construction.

use nalgebra::Point2;

/// Grayscale value treated as empty background (no ink).
pub const BACKGROUND: u8 = 255;

/// Borrowed view of a single-channel glyph image.
#[derive(Clone, Copy, Debug)]
pub struct GlyphView<'a> {
    pub width: usize,
    pub height: usize,
    pub data: &'a [u8], // row-major, len = w*h
}

/// Errors raised when constructing a [`Glyph`].
#[derive(thiserror::Error, Debug)]
pub enum GlyphError {
    #[error("invalid glyph buffer length (expected {expected} bytes, got {got})")]
    InvalidBufferLength { expected: usize, got: usize },
    #[error("invalid glyph dimensions (width={width}, height={height})")]
    InvalidDimensions { width: usize, height: usize },
    #[error("mass centre ({x}, {y}) outside image bounds")]
    MassCentreOutOfBounds { x: f32, y: f32 },
}

/// One preprocessed glyph: a cropped pixel grid plus its ink mass centre.
///
/// Pixels are 8-bit grayscale, row-major, 255 = background, lower values =
/// ink. The mass centre always lies within `[0, width) x [0, height)`.
/// Immutable once constructed.
#[derive(Clone, Debug)]
pub struct Glyph {
    width: usize,
    height: usize,
    data: Vec<u8>,
    mass_centre: Point2<f32>,
    name: String,
}

impl Glyph {
    /// Build a glyph from an already-cropped grid and a precomputed mass
    /// centre, validating the buffer length and the mass-centre bounds.
    pub fn new(
        width: usize,
        height: usize,
        data: Vec<u8>,
        mass_centre: Point2<f32>,
        name: impl Into<String>,
    ) -> Result<Self, GlyphError> {
        if width == 0 || height == 0 {
            return Err(GlyphError::InvalidDimensions { width, height });
        }
        let expected = width * height;
        if data.len() != expected {
            return Err(GlyphError::InvalidBufferLength {
                expected,
                got: data.len(),
            });
        }
        let (x, y) = (mass_centre.x, mass_centre.y);
        if !(x >= 0.0 && x < width as f32 && y >= 0.0 && y < height as f32) {
            return Err(GlyphError::MassCentreOutOfBounds { x, y });
        }
        Ok(Self {
            width,
            height,
            data,
            mass_centre,
            name: name.into(),
        })
    }

    /// Crop `view` to its ink bounding box and compute the intensity-weighted
    /// mass centre, with each pixel weighted by `255 - value`.
    ///
    /// Returns `None` when the image contains no ink at all.
    pub fn from_ink(view: &GlyphView<'_>, name: impl Into<String>) -> Option<Self> {
        let mut min_x = view.width;
        let mut max_x = 0usize;
        let mut min_y = view.height;
        let mut max_y = 0usize;

        let mut sum_x = 0u64;
        let mut sum_y = 0u64;
        let mut weight_sum = 0u64;

        for y in 0..view.height {
            for x in 0..view.width {
                let value = view.data[y * view.width + x];
                if value == BACKGROUND {
                    continue;
                }
                let w = u64::from(BACKGROUND - value);
                sum_x += w * x as u64;
                sum_y += w * y as u64;
                weight_sum += w;

                min_x = min_x.min(x);
                max_x = max_x.max(x);
                min_y = min_y.min(y);
                max_y = max_y.max(y);
            }
        }

        if weight_sum == 0 {
            return None;
        }

        let width = max_x - min_x + 1;
        let height = max_y - min_y + 1;
        let mut data = Vec::with_capacity(width * height);
        for y in min_y..=max_y {
            let row = y * view.width + min_x;
            data.extend_from_slice(&view.data[row..row + width]);
        }

        // The ink centroid lies inside the ink bounding box, so the `new`
        // invariants hold by construction. Divide in f64: the weighted sums
        // overflow f32's exact integer range for larger glyphs.
        let cx = (sum_x as f64 / weight_sum as f64 - min_x as f64) as f32;
        let cy = (sum_y as f64 / weight_sum as f64 - min_y as f64) as f32;

        Self::new(width, height, data, Point2::new(cx, cy), name).ok()
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Opaque identifier, typically the source file name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Intensity-weighted centroid of the ink pixels.
    #[inline]
    pub fn mass_centre(&self) -> Point2<f32> {
        self.mass_centre
    }

    /// Borrow the pixel grid.
    pub fn view(&self) -> GlyphView<'_> {
        GlyphView {
            width: self.width,
            height: self.height,
            data: &self.data,
        }
    }

    /// Integer alignment anchor: the mass centre truncated to pixel
    /// coordinates, guaranteed in range.
    #[inline]
    pub(crate) fn anchor(&self) -> (i32, i32) {
        (self.mass_centre.x as i32, self.mass_centre.y as i32)
    }

    #[inline]
    pub(crate) fn pixel(&self, x: i32, y: i32) -> u8 {
        self.data[y as usize * self.width + x as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn rejects_mismatched_buffer() {
        let err = Glyph::new(3, 3, vec![0; 8], Point2::new(1.0, 1.0), "g");
        assert!(matches!(
            err,
            Err(GlyphError::InvalidBufferLength {
                expected: 9,
                got: 8
            })
        ));
    }

    #[test]
    fn rejects_zero_area() {
        let err = Glyph::new(0, 4, Vec::new(), Point2::new(0.0, 0.0), "g");
        assert!(matches!(err, Err(GlyphError::InvalidDimensions { .. })));
    }

    #[test]
    fn rejects_out_of_bounds_centre() {
        let err = Glyph::new(2, 2, vec![0; 4], Point2::new(2.0, 0.5), "g");
        assert!(matches!(err, Err(GlyphError::MassCentreOutOfBounds { .. })));
    }

    #[test]
    fn crops_to_ink_bounding_box() {
        // 5x4 image with ink at (1,1) and (3,2).
        let mut data = vec![BACKGROUND; 20];
        data[5 + 1] = 0;
        data[10 + 3] = 0;
        let view = GlyphView {
            width: 5,
            height: 4,
            data: &data,
        };

        let glyph = Glyph::from_ink(&view, "pair").expect("ink present");
        assert_eq!(glyph.width(), 3);
        assert_eq!(glyph.height(), 2);
        assert_eq!(glyph.name(), "pair");

        // Equal weights: centre halfway between the two ink pixels, in
        // crop-local coordinates.
        assert_relative_eq!(glyph.mass_centre().x, 1.0);
        assert_relative_eq!(glyph.mass_centre().y, 0.5);
    }

    #[test]
    fn centroid_follows_ink_weight() {
        // Darker pixel pulls the centre towards itself.
        let mut data = vec![BACKGROUND; 3];
        data[0] = 0; // weight 255
        data[2] = 200; // weight 55
        let view = GlyphView {
            width: 3,
            height: 1,
            data: &data,
        };

        let glyph = Glyph::from_ink(&view, "weighted").expect("ink present");
        assert_eq!(glyph.width(), 3);
        let expected = (55.0 * 2.0) / (255.0 + 55.0);
        assert_relative_eq!(glyph.mass_centre().x, expected, epsilon = 1e-5);
    }

    #[test]
    fn blank_image_yields_none() {
        let data = vec![BACKGROUND; 12];
        let view = GlyphView {
            width: 4,
            height: 3,
            data: &data,
        };
        assert!(Glyph::from_ink(&view, "blank").is_none());
    }
}
