//! CLI command implementations

pub mod methods;
pub mod render;
#[cfg(feature = "viewer")]
pub mod view;

use std::path::Path;

use anyhow::{Context, Result};
use image::DynamicImage;
use imgcmp_core::{Image, Shape};
use imgcmp_view::{CompareParams, Layout};
use tracing::debug;

use crate::CompareArgs;

/// Load image from path
///
/// Grayscale images without alpha become 2-D; everything else becomes RGB or
/// RGBA. Integer samples are normalized to `[0, 1]`.
pub fn load_image(path: &Path) -> Result<Image> {
    let img = image::open(path).with_context(|| format!("Failed to load: {}", path.display()))?;
    let image = to_image(&img).with_context(|| format!("Unusable image: {}", path.display()))?;
    debug!(path = %path.display(), shape = %image.shape(), "Loaded image");
    Ok(image)
}

/// Converts a decoded image into a sample buffer.
pub fn to_image(img: &DynamicImage) -> Result<Image> {
    let (w, h) = (img.width() as usize, img.height() as usize);
    let color = img.color();
    let image = if !color.has_color() && !color.has_alpha() {
        Image::from_data(Shape::new(h, w), img.to_luma32f().into_raw())?
    } else if color.has_alpha() {
        Image::from_data(Shape::with_channels(h, w, 4), img.to_rgba32f().into_raw())?
    } else {
        Image::from_data(Shape::with_channels(h, w, 3), img.to_rgb32f().into_raw())?
    };
    Ok(image)
}

/// Loads both sources of a comparison.
pub fn load_pair(args: &CompareArgs) -> Result<(Image, Image)> {
    Ok((load_image(&args.a)?, load_image(&args.b)?))
}

impl CompareArgs {
    /// Comparison parameters from the command line.
    pub fn params(&self) -> Result<CompareParams> {
        let layout: Layout = self
            .layout
            .parse()
            .with_context(|| format!("Invalid --layout '{}'", self.layout))?;
        Ok(CompareParams::default()
            .with_method(&self.method)
            .with_alpha(self.alpha)
            .with_layout(layout)
            .with_swap(self.swap))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, Luma, Rgb, RgbImage, Rgba, RgbaImage};

    #[test]
    fn test_gray_stays_2d() {
        let img = DynamicImage::ImageLuma8(GrayImage::from_pixel(3, 2, Luma([255])));
        let out = to_image(&img).unwrap();
        assert_eq!(out.shape(), Shape::new(2, 3));
        assert!(out.data().iter().all(|&v| v == 1.0));
    }

    #[test]
    fn test_rgb_and_rgba_channels() {
        let rgb = DynamicImage::ImageRgb8(RgbImage::from_pixel(4, 1, Rgb([0, 255, 0])));
        let out = to_image(&rgb).unwrap();
        assert_eq!(out.shape(), Shape::with_channels(1, 4, 3));
        assert_eq!(out.get(0, 3, 1), Some(1.0));

        let rgba = DynamicImage::ImageRgba8(RgbaImage::from_pixel(2, 2, Rgba([0, 0, 0, 0])));
        assert_eq!(to_image(&rgba).unwrap().channels(), 4);
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_image(Path::new("/definitely/not/here.png")).unwrap_err();
        assert!(format!("{err:#}").contains("Failed to load"));
    }

    #[test]
    fn test_params_from_args() {
        let args = CompareArgs {
            a: "a.png".into(),
            b: "b.png".into(),
            method: "diff".into(),
            alpha: 0.2,
            layout: "Wide".into(),
            swap: true,
            width: 10.0,
        };
        let p = args.params().unwrap();
        assert_eq!(p.method, "diff");
        assert_eq!(p.layout, Layout::Wide);
        assert!(p.swap);

        let bad = CompareArgs {
            layout: "diagonal".into(),
            ..args
        };
        assert!(bad.params().is_err());
    }
}
