//! Shared display range for a comparison.
//!
//! All three panels of a comparison (A, B and the derived C) are drawn on one
//! intensity scale, derived from the two *sources* only. C may fall outside
//! that scale (a difference image is often negative); such samples saturate
//! instead of rescaling the panel, which keeps the panels visually comparable.
//!
//! # Example
//!
//! ```rust
//! use imgcmp_core::Image;
//! use imgcmp_ops::ColorRange;
//!
//! let a = Image::from_rows(&[[0.2, 0.9]]).unwrap();
//! let b = Image::from_rows(&[[-0.1, 0.5]]).unwrap();
//! let range = ColorRange::of_sources(&a, &b).unwrap();
//! assert_eq!((range.min, range.max), (-0.1, 0.9));
//!
//! assert_eq!(range.normalize(-0.1), 0.0);
//! assert_eq!(range.normalize(5.0), 1.0);
//! ```

use crate::{OpsError, OpsResult};
use imgcmp_core::Image;
use tracing::trace;

/// Inclusive display range `[min, max]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorRange {
    /// Value drawn at the bottom of the scale.
    pub min: f32,
    /// Value drawn at the top of the scale.
    pub max: f32,
}

impl ColorRange {
    /// Creates a range from explicit bounds.
    #[inline]
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// `[min(A ∪ B), max(A ∪ B)]`, ignoring NaN samples.
    ///
    /// # Errors
    ///
    /// [`OpsError::EmptyRange`] when both sources are entirely NaN.
    pub fn of_sources(a: &Image, b: &Image) -> OpsResult<Self> {
        let range = match (a.min_max(), b.min_max()) {
            (Some((lo_a, hi_a)), Some((lo_b, hi_b))) => Self::new(lo_a.min(lo_b), hi_a.max(hi_b)),
            (Some((lo, hi)), None) | (None, Some((lo, hi))) => Self::new(lo, hi),
            (None, None) => return Err(OpsError::EmptyRange),
        };
        trace!(min = range.min, max = range.max, "range::of_sources");
        Ok(range)
    }

    /// Width of the range.
    #[inline]
    pub fn span(&self) -> f32 {
        self.max - self.min
    }

    /// Returns `true` if `v` lies inside the inclusive range.
    #[inline]
    pub fn contains(&self, v: f32) -> bool {
        v >= self.min && v <= self.max
    }

    /// Maps `v` onto `[0, 1]`, saturating outside the range.
    ///
    /// A degenerate range (`min == max`) and NaN both map to `0.0`.
    #[inline]
    pub fn normalize(&self, v: f32) -> f32 {
        let span = self.span();
        if v.is_nan() || span.is_nan() || span <= 0.0 {
            return 0.0;
        }
        ((v - self.min) / span).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use imgcmp_core::Shape;

    #[test]
    fn test_bounds_cover_both_sources() {
        let a = Image::from_fn(Shape::new(3, 4), |r, c, _| (r as f32) - (c as f32) * 0.5).unwrap();
        let b = Image::from_fn(Shape::new(3, 4), |r, c, _| (r * c) as f32 * 0.75).unwrap();
        let range = ColorRange::of_sources(&a, &b).unwrap();

        let all: Vec<f32> = a.data().iter().chain(b.data()).copied().collect();
        assert!(all.iter().all(|&v| range.contains(v)));
        assert!(all.contains(&range.min));
        assert!(all.contains(&range.max));
    }

    #[test]
    fn test_range_spans_disjoint_sources() {
        let a = Image::zeros(Shape::new(4, 4)).unwrap();
        let b = Image::filled(Shape::new(4, 4), 1.0).unwrap();
        assert_eq!(ColorRange::of_sources(&a, &b).unwrap(), ColorRange::new(0.0, 1.0));
    }

    #[test]
    fn test_nan_ignored() {
        let a = Image::filled(Shape::new(2, 2), f32::NAN).unwrap();
        let b = Image::from_rows(&[[1.0, 2.0], [f32::NAN, 3.0]]).unwrap();
        assert_eq!(ColorRange::of_sources(&a, &b).unwrap(), ColorRange::new(1.0, 3.0));
        assert_eq!(ColorRange::of_sources(&a, &a).unwrap_err(), OpsError::EmptyRange);
    }

    #[test]
    fn test_normalize() {
        let range = ColorRange::new(-1.0, 3.0);
        assert_relative_eq!(range.normalize(1.0), 0.5);
        assert_eq!(range.normalize(-4.0), 0.0);
        assert_eq!(range.normalize(10.0), 1.0);
        assert_eq!(range.normalize(f32::NAN), 0.0);
    }

    #[test]
    fn test_normalize_degenerate() {
        let flat = ColorRange::new(0.5, 0.5);
        assert_eq!(flat.span(), 0.0);
        assert_eq!(flat.normalize(0.5), 0.0);
        assert_eq!(flat.normalize(2.0), 0.0);
    }
}
