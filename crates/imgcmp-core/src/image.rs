//! Image buffer types for comparison.
//!
//! This module provides the core image container types:
//! - [`Shape`] - Rows x cols with an optional trailing channel axis
//! - [`Image`] - Immutable owned sample buffer with a fixed [`Shape`]
//!
//! # Memory Layout
//!
//! Images store samples as `f32` in **row-major** order, top-to-bottom, with
//! channels interleaved:
//!
//! ```text
//! 2-D (rows, cols):        [v v v v ...]          <- Row 0
//! 3-D (rows, cols, 3):     [R G B R G B ...]      <- Row 0
//! ```
//!
//! # Immutability
//!
//! Once built, an [`Image`] never changes. The buffer lives in an
//! [`Arc<Vec<f32>>`], so clones share storage and a session can hand the same
//! source pair to every comparison without copying.
//!
//! # Usage
//!
//! ```rust
//! use imgcmp_core::{Image, Shape};
//!
//! let img = Image::from_fn(Shape::new(2, 3), |r, c, _| (r * 3 + c) as f32).unwrap();
//! assert_eq!(img.row(1), &[3.0, 4.0, 5.0]);
//! assert_eq!(img.min_max(), Some((0.0, 5.0)));
//! ```

use crate::{Error, Result};
use std::fmt;
use std::sync::Arc;

/// Dimensions of an image: rows x cols, optionally with a trailing channel axis.
///
/// Equality is array-shape equality: `(4, 4)` and `(4, 4, 1)` are different
/// shapes even though they hold the same number of samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    /// Number of rows (image height).
    pub rows: usize,
    /// Number of columns (image width).
    pub cols: usize,
    /// Trailing channel axis length, `None` for a plain 2-D image.
    pub channels: Option<usize>,
}

impl Shape {
    /// Creates a 2-D shape.
    #[inline]
    pub const fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            channels: None,
        }
    }

    /// Creates a 3-D shape with a trailing channel axis.
    #[inline]
    pub const fn with_channels(rows: usize, cols: usize, channels: usize) -> Self {
        Self {
            rows,
            cols,
            channels: Some(channels),
        }
    }

    /// Samples per pixel (1 for a 2-D shape).
    #[inline]
    pub const fn channel_count(&self) -> usize {
        match self.channels {
            Some(n) => n,
            None => 1,
        }
    }

    /// Samples per row.
    #[inline]
    pub const fn row_len(&self) -> usize {
        self.cols * self.channel_count()
    }

    /// Total number of samples.
    #[inline]
    pub const fn len(&self) -> usize {
        self.rows * self.row_len()
    }

    /// Returns `true` if the shape holds no samples.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Aspect ratio as rows / cols.
    #[inline]
    pub fn aspect_ratio(&self) -> f64 {
        self.rows as f64 / self.cols as f64
    }

    /// Rejects shapes with a zero-length axis.
    pub fn validate(&self) -> Result<()> {
        if self.rows == 0 {
            return Err(Error::invalid_shape(*self, "zero rows"));
        }
        if self.cols == 0 {
            return Err(Error::invalid_shape(*self, "zero columns"));
        }
        if self.channels == Some(0) {
            return Err(Error::invalid_shape(*self, "zero channels"));
        }
        Ok(())
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.channels {
            Some(n) => write!(f, "({}, {}, {})", self.rows, self.cols, n),
            None => write!(f, "({}, {})", self.rows, self.cols),
        }
    }
}

/// Owned, immutable image buffer.
///
/// # Example
///
/// ```rust
/// use imgcmp_core::{Image, Shape};
///
/// let rgb = Image::filled(Shape::with_channels(8, 16, 3), 0.5).unwrap();
/// assert_eq!(rgb.rows(), 8);
/// assert_eq!(rgb.cols(), 16);
/// assert_eq!(rgb.channels(), 3);
/// assert_eq!(rgb.get(7, 15, 2), Some(0.5));
/// ```
#[derive(Clone, PartialEq)]
pub struct Image {
    /// Sample buffer (Arc for cheap cloning)
    data: Arc<Vec<f32>>,
    shape: Shape,
}

impl Image {
    /// Creates an image filled with zeros.
    pub fn zeros(shape: Shape) -> Result<Self> {
        Self::filled(shape, 0.0)
    }

    /// Creates an image with every sample set to `value`.
    pub fn filled(shape: Shape, value: f32) -> Result<Self> {
        shape.validate()?;
        Ok(Self {
            data: Arc::new(vec![value; shape.len()]),
            shape,
        })
    }

    /// Creates an image from existing sample data.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidShape`] for zero-length axes and
    /// [`Error::DataLength`] if `data` doesn't hold exactly `shape.len()` samples.
    pub fn from_data(shape: Shape, data: Vec<f32>) -> Result<Self> {
        shape.validate()?;
        if data.len() != shape.len() {
            return Err(Error::DataLength {
                shape,
                expected: shape.len(),
                got: data.len(),
            });
        }
        Ok(Self {
            data: Arc::new(data),
            shape,
        })
    }

    /// Creates an image by evaluating `f(row, col, channel)` for every sample.
    pub fn from_fn<F>(shape: Shape, mut f: F) -> Result<Self>
    where
        F: FnMut(usize, usize, usize) -> f32,
    {
        shape.validate()?;
        let ch = shape.channel_count();
        let mut data = Vec::with_capacity(shape.len());
        for r in 0..shape.rows {
            for c in 0..shape.cols {
                for k in 0..ch {
                    data.push(f(r, c, k));
                }
            }
        }
        Ok(Self {
            data: Arc::new(data),
            shape,
        })
    }

    /// Creates a 2-D image from a list of equally long rows.
    ///
    /// ```rust
    /// use imgcmp_core::Image;
    ///
    /// let img = Image::from_rows(&[vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
    /// assert_eq!(img.shape().to_string(), "(2, 2)");
    /// ```
    pub fn from_rows<R: AsRef<[f32]>>(rows: &[R]) -> Result<Self> {
        let cols = rows.first().map_or(0, |r| r.as_ref().len());
        let shape = Shape::new(rows.len(), cols);
        shape.validate()?;
        let mut data = Vec::with_capacity(shape.len());
        for (i, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != cols {
                return Err(Error::other(format!(
                    "row {i} has {} columns, expected {cols}",
                    row.len()
                )));
            }
            data.extend_from_slice(row);
        }
        Self::from_data(shape, data)
    }

    /// Returns the image shape.
    #[inline]
    pub fn shape(&self) -> Shape {
        self.shape
    }

    /// Returns the number of rows.
    #[inline]
    pub fn rows(&self) -> usize {
        self.shape.rows
    }

    /// Returns the number of columns.
    #[inline]
    pub fn cols(&self) -> usize {
        self.shape.cols
    }

    /// Returns samples per pixel (1 for 2-D images).
    #[inline]
    pub fn channels(&self) -> usize {
        self.shape.channel_count()
    }

    /// Returns the total number of samples.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Always `false`: zero-sized images cannot be constructed.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns the raw samples.
    #[inline]
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    /// Returns the samples of row `r`.
    ///
    /// # Panics
    ///
    /// Panics if `r >= rows()`.
    #[inline]
    pub fn row(&self, r: usize) -> &[f32] {
        let len = self.shape.row_len();
        &self.data[r * len..(r + 1) * len]
    }

    /// Returns one sample, or `None` when out of bounds.
    #[inline]
    pub fn get(&self, row: usize, col: usize, channel: usize) -> Option<f32> {
        let ch = self.channels();
        if row >= self.rows() || col >= self.cols() || channel >= ch {
            return None;
        }
        Some(self.data[(row * self.cols() + col) * ch + channel])
    }

    /// Aspect ratio as rows / cols.
    #[inline]
    pub fn aspect_ratio(&self) -> f64 {
        self.shape.aspect_ratio()
    }

    /// Smallest and largest sample, ignoring NaN.
    ///
    /// Returns `None` when every sample is NaN.
    pub fn min_max(&self) -> Option<(f32, f32)> {
        let mut lo = f32::INFINITY;
        let mut hi = f32::NEG_INFINITY;
        let mut seen = false;
        for &v in self.data.iter() {
            if v.is_nan() {
                continue;
            }
            seen = true;
            lo = lo.min(v);
            hi = hi.max(v);
        }
        seen.then_some((lo, hi))
    }
}

impl fmt::Debug for Image {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Image")
            .field("shape", &self.shape)
            .field("samples", &self.data.len())
            .finish()
    }
}

/// Fails with [`Error::ShapeMismatch`] unless `a` and `b` have identical shapes.
pub fn ensure_same_shape(a: &Image, b: &Image) -> Result<()> {
    if a.shape() != b.shape() {
        return Err(Error::shape_mismatch(a.shape(), b.shape()));
    }
    Ok(())
}
