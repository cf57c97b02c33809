//! Sample-to-color mapping shared by every canvas.
//!
//! Color samples pass through [`ColorRange::normalize`], so all three panels
//! of a comparison share one scale. An alpha channel is opacity rather than
//! intensity and is clamped to `[0, 1]` directly.
//!
//! | Channels | Interpretation |
//! |----------|----------------|
//! | 1        | gray           |
//! | 2        | gray + alpha   |
//! | 3        | RGB            |
//! | 4        | RGBA           |

use imgcmp_core::Image;
use imgcmp_ops::ColorRange;

use crate::{ViewError, ViewResult};

/// Maps the pixels of one image to RGBA8 on a fixed range.
#[derive(Debug, Clone, Copy)]
pub struct Colorizer<'a> {
    image: &'a Image,
    range: ColorRange,
}

impl<'a> Colorizer<'a> {
    /// Checks the channel count and binds `image` to `range`.
    ///
    /// # Errors
    ///
    /// [`ViewError::UnsupportedChannels`] for more than 4 channels.
    pub fn new(image: &'a Image, range: ColorRange) -> ViewResult<Self> {
        match image.channels() {
            1..=4 => Ok(Self { image, range }),
            n => Err(ViewError::UnsupportedChannels(n)),
        }
    }

    /// RGBA8 color of the pixel at `(row, col)`.
    ///
    /// Callers stay inside the image bounds.
    pub fn pixel(&self, row: usize, col: usize) -> [u8; 4] {
        let n = self.image.channels();
        let start = col * n;
        let px = &self.image.row(row)[start..start + n];
        let v = |s: f32| to_u8(self.range.normalize(s));
        match *px {
            [g] => {
                let g = v(g);
                [g, g, g, 255]
            }
            [g, a] => {
                let g = v(g);
                [g, g, g, alpha_u8(a)]
            }
            [r, g, b] => [v(r), v(g), v(b), 255],
            [r, g, b, a] => [v(r), v(g), v(b), alpha_u8(a)],
            _ => [0, 0, 0, 0],
        }
    }
}

/// Converts a whole image to row-major RGBA8 pixels.
pub fn to_rgba8(image: &Image, range: ColorRange) -> ViewResult<Vec<[u8; 4]>> {
    let colorizer = Colorizer::new(image, range)?;
    let mut out = Vec::with_capacity(image.rows() * image.cols());
    for r in 0..image.rows() {
        for c in 0..image.cols() {
            out.push(colorizer.pixel(r, c));
        }
    }
    Ok(out)
}

#[inline]
fn to_u8(unit: f32) -> u8 {
    (unit * 255.0).round().clamp(0.0, 255.0) as u8
}

#[inline]
fn alpha_u8(a: f32) -> u8 {
    if a.is_nan() { 0 } else { to_u8(a.clamp(0.0, 1.0)) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use imgcmp_core::Shape;

    #[test]
    fn test_gray_uses_shared_range() {
        let img = Image::from_rows(&[[0.0, 0.5, 1.0, 2.0]]).unwrap();
        let px = to_rgba8(&img, ColorRange::new(0.0, 1.0)).unwrap();
        assert_eq!(px[0], [0, 0, 0, 255]);
        assert_eq!(px[1], [128, 128, 128, 255]);
        assert_eq!(px[2], [255, 255, 255, 255]);
        // saturates above max
        assert_eq!(px[3], [255, 255, 255, 255]);
    }

    #[test]
    fn test_negative_values_saturate_low() {
        let img = Image::from_rows(&[[-1.0]]).unwrap();
        assert_eq!(to_rgba8(&img, ColorRange::new(0.0, 1.0)).unwrap()[0], [0, 0, 0, 255]);
    }

    #[test]
    fn test_rgb_and_alpha_channels() {
        let rgba = Image::from_data(Shape::with_channels(1, 1, 4), vec![1.0, 0.0, 0.5, 0.25])
            .unwrap();
        let px = to_rgba8(&rgba, ColorRange::new(0.0, 1.0)).unwrap();
        assert_eq!(px[0], [255, 0, 128, 64]);

        // alpha is not rescaled by the range
        let ga = Image::from_data(Shape::with_channels(1, 1, 2), vec![10.0, 1.0]).unwrap();
        let px = to_rgba8(&ga, ColorRange::new(0.0, 20.0)).unwrap();
        assert_eq!(px[0], [128, 128, 128, 255]);
    }

    #[test]
    fn test_unsupported_channels() {
        let img = Image::zeros(Shape::with_channels(2, 2, 5)).unwrap();
        assert!(matches!(
            to_rgba8(&img, ColorRange::new(0.0, 1.0)),
            Err(ViewError::UnsupportedChannels(5))
        ));
    }

    #[test]
    fn test_degenerate_range_is_black() {
        let img = Image::filled(Shape::new(2, 2), 0.7).unwrap();
        let px = to_rgba8(&img, ColorRange::new(0.7, 0.7)).unwrap();
        assert!(px.iter().all(|p| *p == [0, 0, 0, 255]));
    }
}
