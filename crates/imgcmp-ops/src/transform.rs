//! Comparison transforms.
//!
//! Every transform has the same signature, [`TransformFn`]: it takes the two
//! sources and a mixing parameter `alpha` and returns a new image shaped like
//! `a`. Neither source is modified.
//!
//! | Transform            | Result                                              |
//! |----------------------|-----------------------------------------------------|
//! | [`blend`]            | `(1 - alpha) * a + alpha * b`                       |
//! | [`difference`]       | `a - b` (alpha ignored)                             |
//! | [`horizontal_shade`] | rows `[0, r)` from `a`, the rest from `b`           |
//! | [`vertical_shade`]   | columns `[0, c)` from `a`, the rest from `b`        |
//!
//! The shade split index is `floor(alpha * n)` truncated toward zero and
//! clamped into `[0, n]`. So `alpha = 0` yields `b`, `alpha = 1` yields `a`,
//! and the boundary row/column belongs to `b`.
//!
//! `alpha` is meant to lie in `[0, 1]` but is not validated here: blend
//! extrapolates outside that interval and the shades clamp their split.
//!
//! # Example
//!
//! ```rust
//! use imgcmp_core::Image;
//! use imgcmp_ops::transform::horizontal_shade;
//!
//! let a = Image::from_rows(&[[1.0], [1.0], [1.0], [1.0]]).unwrap();
//! let b = Image::from_rows(&[[2.0], [2.0], [2.0], [2.0]]).unwrap();
//! let c = horizontal_shade(&a, &b, 0.5).unwrap();
//! assert_eq!(c.data(), &[1.0, 1.0, 2.0, 2.0]);
//! ```

use crate::rows::map_rows;
use crate::OpsResult;
use imgcmp_core::{ensure_same_shape, Image};
use tracing::trace;

/// Uniform transform signature used by the registry.
pub type TransformFn = fn(&Image, &Image, f64) -> OpsResult<Image>;

/// Linear interpolation between the sources.
///
/// `alpha = 0` reproduces `a`, `alpha = 1` reproduces `b`.
///
/// ```rust
/// use imgcmp_core::Image;
/// use imgcmp_ops::transform::blend;
///
/// let a = Image::from_rows(&[[0.0, 4.0]]).unwrap();
/// let b = Image::from_rows(&[[1.0, 0.0]]).unwrap();
/// assert_eq!(blend(&a, &b, 0.25).unwrap().data(), &[0.25, 3.0]);
/// ```
pub fn blend(a: &Image, b: &Image, alpha: f64) -> OpsResult<Image> {
    ensure_same_shape(a, b)?;
    trace!(shape = %a.shape(), alpha, "transform::blend");

    let wa = 1.0 - alpha;
    let data = map_rows(a, b, |_, ra, rb, out| {
        for ((o, &va), &vb) in out.iter_mut().zip(ra).zip(rb) {
            *o = (wa * f64::from(va) + alpha * f64::from(vb)) as f32;
        }
    });
    Ok(Image::from_data(a.shape(), data)?)
}

/// Signed element-wise difference `a - b`.
///
/// `alpha` is accepted only to keep the signature uniform; it has no effect.
pub fn difference(a: &Image, b: &Image, _alpha: f64) -> OpsResult<Image> {
    ensure_same_shape(a, b)?;
    trace!(shape = %a.shape(), "transform::difference");

    let data = map_rows(a, b, |_, ra, rb, out| {
        for ((o, &va), &vb) in out.iter_mut().zip(ra).zip(rb) {
            *o = va - vb;
        }
    });
    Ok(Image::from_data(a.shape(), data)?)
}

/// Top rows from `a`, bottom rows from `b`.
///
/// The first `floor(alpha * rows)` rows come from `a`.
pub fn horizontal_shade(a: &Image, b: &Image, alpha: f64) -> OpsResult<Image> {
    ensure_same_shape(a, b)?;
    let split = split_index(alpha, a.rows());
    trace!(shape = %a.shape(), alpha, split, "transform::horizontal_shade");

    let data = map_rows(a, b, |r, ra, rb, out| {
        out.copy_from_slice(if r < split { ra } else { rb });
    });
    Ok(Image::from_data(a.shape(), data)?)
}

/// Left columns from `a`, right columns from `b`.
///
/// The first `floor(alpha * cols)` columns come from `a`.
pub fn vertical_shade(a: &Image, b: &Image, alpha: f64) -> OpsResult<Image> {
    ensure_same_shape(a, b)?;
    let split = split_index(alpha, a.cols());
    trace!(shape = %a.shape(), alpha, split, "transform::vertical_shade");

    let edge = split * a.channels();
    let data = map_rows(a, b, |_, ra, rb, out| {
        out[..edge].copy_from_slice(&ra[..edge]);
        out[edge..].copy_from_slice(&rb[edge..]);
    });
    Ok(Image::from_data(a.shape(), data)?)
}

/// `floor(alpha * n)` by truncation, clamped into `[0, n]`. NaN maps to 0.
fn split_index(alpha: f64, n: usize) -> usize {
    let raw = (alpha * n as f64).trunc();
    if raw.is_nan() || raw <= 0.0 {
        0
    } else if raw >= n as f64 {
        n
    } else {
        raw as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use imgcmp_core::Shape;

    fn ramp(shape: Shape, offset: f32) -> Image {
        Image::from_fn(shape, |r, c, k| offset + (r * 31 + c * 7 + k) as f32 * 0.013).unwrap()
    }

    #[test]
    fn test_blend_endpoints_exact() {
        let shape = Shape::with_channels(5, 3, 3);
        let a = ramp(shape, 0.1);
        let b = ramp(shape, -0.7);
        assert_eq!(blend(&a, &b, 0.0).unwrap(), a);
        assert_eq!(blend(&a, &b, 1.0).unwrap(), b);
    }

    #[test]
    fn test_blend_midpoint() {
        let a = Image::filled(Shape::new(2, 2), 2.0).unwrap();
        let b = Image::filled(Shape::new(2, 2), 4.0).unwrap();
        let c = blend(&a, &b, 0.5).unwrap();
        for &v in c.data() {
            assert_relative_eq!(v, 3.0);
        }
    }

    #[test]
    fn test_blend_extrapolates() {
        let a = Image::filled(Shape::new(1, 1), 0.0).unwrap();
        let b = Image::filled(Shape::new(1, 1), 1.0).unwrap();
        assert_relative_eq!(blend(&a, &b, 1.5).unwrap().data()[0], 1.5);
        assert_relative_eq!(blend(&a, &b, -0.5).unwrap().data()[0], -0.5);
    }

    #[test]
    fn test_difference_ignores_alpha() {
        let a = ramp(Shape::new(4, 6), 1.0);
        let b = ramp(Shape::new(4, 6), 0.25);
        let d0 = difference(&a, &b, 0.0).unwrap();
        let d1 = difference(&a, &b, 0.7).unwrap();
        assert_eq!(d0, d1);
        for ((&d, &va), &vb) in d0.data().iter().zip(a.data()).zip(b.data()) {
            assert_eq!(d, va - vb);
        }
    }

    #[test]
    fn test_difference_can_be_negative() {
        let a = Image::zeros(Shape::new(2, 2)).unwrap();
        let b = Image::filled(Shape::new(2, 2), 1.0).unwrap();
        assert!(difference(&a, &b, 0.5).unwrap().data().iter().all(|&v| v == -1.0));
    }

    #[test]
    fn test_horizontal_shade_endpoints() {
        for rows in [1, 2, 7, 10] {
            let shape = Shape::new(rows, 3);
            let a = ramp(shape, 0.0);
            let b = ramp(shape, 100.0);
            assert_eq!(horizontal_shade(&a, &b, 0.0).unwrap(), b);
            assert_eq!(horizontal_shade(&a, &b, 1.0).unwrap(), a);
        }
    }

    #[test]
    fn test_horizontal_shade_truncates() {
        // 0.39 * 10 = 3.9 -> 3 rows from a, row 3 is the first b row
        let a = Image::filled(Shape::new(10, 2), 1.0).unwrap();
        let b = Image::filled(Shape::new(10, 2), 2.0).unwrap();
        let c = horizontal_shade(&a, &b, 0.39).unwrap();
        for r in 0..10 {
            let expected = if r < 3 { 1.0 } else { 2.0 };
            assert_eq!(c.row(r), &[expected, expected], "row {r}");
        }
    }

    #[test]
    fn test_vertical_shade_endpoints_channeled() {
        let shape = Shape::with_channels(4, 9, 3);
        let a = ramp(shape, 0.0);
        let b = ramp(shape, 50.0);
        assert_eq!(vertical_shade(&a, &b, 0.0).unwrap(), b);
        assert_eq!(vertical_shade(&a, &b, 1.0).unwrap(), a);
    }

    #[test]
    fn test_vertical_shade_splits_columns() {
        let shape = Shape::with_channels(2, 4, 2);
        let a = Image::filled(shape, 1.0).unwrap();
        let b = Image::filled(shape, 0.0).unwrap();
        let c = vertical_shade(&a, &b, 0.5).unwrap();
        for r in 0..2 {
            assert_eq!(c.row(r), &[1.0, 1.0, 1.0, 1.0, 0.0, 0.0, 0.0, 0.0]);
        }
    }

    #[test]
    fn test_shade_out_of_domain_clamps() {
        let a = Image::filled(Shape::new(3, 3), 1.0).unwrap();
        let b = Image::filled(Shape::new(3, 3), 2.0).unwrap();
        assert_eq!(horizontal_shade(&a, &b, -0.5).unwrap(), b);
        assert_eq!(horizontal_shade(&a, &b, 1.5).unwrap(), a);
        assert_eq!(vertical_shade(&a, &b, f64::NAN).unwrap(), b);
    }

    #[test]
    fn test_sources_untouched() {
        let a = ramp(Shape::new(3, 3), 0.0);
        let b = ramp(Shape::new(3, 3), 1.0);
        let (a0, b0) = (a.clone(), b.clone());
        let _ = blend(&a, &b, 0.3).unwrap();
        let _ = vertical_shade(&a, &b, 0.3).unwrap();
        assert_eq!(a, a0);
        assert_eq!(b, b0);
    }

    #[test]
    fn test_shape_mismatch_rejected() {
        let a = Image::zeros(Shape::new(10, 10)).unwrap();
        let b = Image::zeros(Shape::new(10, 11)).unwrap();
        let all: [TransformFn; 4] = [blend, difference, horizontal_shade, vertical_shade];
        for f in all {
            assert!(f(&a, &b, 0.5).unwrap_err().is_shape_mismatch());
        }
    }

    #[test]
    fn test_shade_split_at_slider_steps() {
        // k * 0.05 is what a 0.05-step slider yields for position k
        for n in 1..=64 {
            for k in 0..=20 {
                let alpha = f64::from(k) * 0.05;
                assert_eq!(split_index(alpha, n), k as usize * n / 20, "n={n} k={k}");
            }
        }

        let a = Image::filled(Shape::new(20, 2), 1.0).unwrap();
        let b = Image::filled(Shape::new(20, 2), 0.0).unwrap();
        let c = horizontal_shade(&a, &b, 0.35).unwrap();
        let from_a = (0..20).filter(|&r| c.row(r)[0] == 1.0).count();
        assert_eq!(from_a, 7);
    }

    #[test]
    fn test_split_index() {
        assert_eq!(split_index(0.0, 10), 0);
        assert_eq!(split_index(0.999, 10), 9);
        assert_eq!(split_index(1.0, 10), 10);
        assert_eq!(split_index(0.25, 3), 0);
        assert_eq!(split_index(-1.0, 3), 0);
        assert_eq!(split_index(2.0, 3), 3);
    }
}
