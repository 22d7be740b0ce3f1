//! Two-dimensional scalar fields sampled on a regular grid.

use crate::{FramesError, FramesResult};

/// A 2D array of `f64` values stored in row-major order.
///
/// Row 0 is the first row of the underlying data. How rows map onto image
/// axes is decided by the renderer, not by this type.
#[derive(Debug, Clone, PartialEq)]
pub struct Field2D {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl Field2D {
    /// Build a field from row-major data.
    ///
    /// Fails if `data.len() != rows * cols`.
    pub fn from_row_major(rows: usize, cols: usize, data: Vec<f64>) -> FramesResult<Self> {
        let expected = rows * cols;
        if data.len() != expected {
            return Err(FramesError::ShapeMismatch {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self { rows, cols, data })
    }

    /// Field of the given shape filled with one value.
    pub fn filled(rows: usize, cols: usize, value: f64) -> Self {
        Self {
            rows,
            cols,
            data: vec![value; rows * cols],
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// `(rows, cols)`
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn is_empty(&self) -> bool {
        self.rows == 0 || self.cols == 0
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        Some(self.data[row * self.cols + col])
    }

    /// Rotate 90 degrees counter-clockwise.
    ///
    /// A `(rows, cols)` field becomes `(cols, rows)`; the last column of the
    /// input becomes the first row of the output.
    pub fn rot90(&self) -> Self {
        let (rows, cols) = (self.cols, self.rows);
        let mut data = Vec::with_capacity(self.data.len());
        for a in 0..rows {
            let src_col = self.cols - 1 - a;
            for b in 0..cols {
                data.push(self.data[b * self.cols + src_col]);
            }
        }
        Self { rows, cols, data }
    }

    /// Reverse the row order.
    pub fn flip_vertical(&self) -> Self {
        let mut data = Vec::with_capacity(self.data.len());
        for row in self.data.chunks_exact(self.cols.max(1)).rev() {
            data.extend_from_slice(row);
        }
        Self {
            rows: self.rows,
            cols: self.cols,
            data,
        }
    }

    /// Smallest finite value, or `None` for an empty or all-NaN field.
    pub fn min(&self) -> Option<f64> {
        self.data
            .iter()
            .copied()
            .filter(|v| v.is_finite())
            .fold(None, |acc, v| Some(acc.map_or(v, |m: f64| m.min(v))))
    }

    /// Largest finite value, or `None` for an empty or all-NaN field.
    pub fn max(&self) -> Option<f64> {
        self.data
            .iter()
            .copied()
            .filter(|v| v.is_finite())
            .fold(None, |acc, v| Some(acc.map_or(v, |m: f64| m.max(v))))
    }

    /// Sample at fractional `(row, col)` using bilinear interpolation.
    ///
    /// Coordinates are clamped to the grid. Returns NaN if any of the four
    /// neighbouring values is NaN.
    pub fn sample_bilinear(&self, row: f64, col: f64) -> f64 {
        if self.is_empty() {
            return f64::NAN;
        }

        let row = row.clamp(0.0, (self.rows - 1) as f64);
        let col = col.clamp(0.0, (self.cols - 1) as f64);

        let r1 = row.floor() as usize;
        let c1 = col.floor() as usize;
        let r2 = (r1 + 1).min(self.rows - 1);
        let c2 = (c1 + 1).min(self.cols - 1);

        let dr = row - r1 as f64;
        let dc = col - c1 as f64;

        let v11 = self.data[r1 * self.cols + c1];
        let v12 = self.data[r1 * self.cols + c2];
        let v21 = self.data[r2 * self.cols + c1];
        let v22 = self.data[r2 * self.cols + c2];

        let top = v11 * (1.0 - dc) + v12 * dc;
        let bottom = v21 * (1.0 - dc) + v22 * dc;
        top * (1.0 - dr) + bottom * dr
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counting(rows: usize, cols: usize) -> Field2D {
        let data = (0..rows * cols).map(|i| i as f64).collect();
        Field2D::from_row_major(rows, cols, data).unwrap()
    }

    #[test]
    fn test_shape_mismatch_rejected() {
        let err = Field2D::from_row_major(2, 3, vec![0.0; 5]).unwrap_err();
        assert!(matches!(
            err,
            FramesError::ShapeMismatch {
                expected: 6,
                actual: 5
            }
        ));
    }

    #[test]
    fn test_rot90_matches_counter_clockwise_rotation() {
        // [[0, 1, 2],
        //  [3, 4, 5]]
        // rotated CCW:
        // [[2, 5],
        //  [1, 4],
        //  [0, 3]]
        let rotated = counting(2, 3).rot90();
        assert_eq!(rotated.shape(), (3, 2));
        assert_eq!(rotated.as_slice(), &[2.0, 5.0, 1.0, 4.0, 0.0, 3.0]);
    }

    #[test]
    fn test_flip_vertical_reverses_rows() {
        let flipped = counting(3, 2).flip_vertical();
        assert_eq!(flipped.as_slice(), &[4.0, 5.0, 2.0, 3.0, 0.0, 1.0]);
    }

    #[test]
    fn test_rot90_then_flip_is_transpose() {
        let field = counting(4, 3);
        let out = field.rot90().flip_vertical();
        assert_eq!(out.shape(), (3, 4));
        for r in 0..4 {
            for c in 0..3 {
                assert_eq!(out.get(c, r), field.get(r, c));
            }
        }
    }

    #[test]
    fn test_min_max_skip_nan() {
        let field = Field2D::from_row_major(1, 4, vec![f64::NAN, 2.0, -1.0, 5.0]).unwrap();
        assert_eq!(field.min(), Some(-1.0));
        assert_eq!(field.max(), Some(5.0));
        assert_eq!(Field2D::filled(0, 0, 0.0).min(), None);
    }

    #[test]
    fn test_sample_bilinear() {
        let field = Field2D::from_row_major(2, 2, vec![0.0, 1.0, 2.0, 3.0]).unwrap();
        assert_eq!(field.sample_bilinear(0.0, 0.0), 0.0);
        assert_eq!(field.sample_bilinear(1.0, 1.0), 3.0);
        assert!((field.sample_bilinear(0.5, 0.5) - 1.5).abs() < 1e-12);
        // Clamped outside the grid
        assert_eq!(field.sample_bilinear(-3.0, 9.0), 1.0);
    }
}
