//! Software canvas.
//!
//! [`RasterCanvas`] turns a figure description into an RGBA8 bitmap:
//! figure units times `dpi` give the bitmap size, panel regions become pixel
//! rectangles, and each shown image is fitted into its panel with its aspect
//! ratio preserved and sampled nearest-neighbour. No axes are drawn, so
//! hidden ticks are only recorded.
//!
//! ```rust
//! use imgcmp_core::{Image, Region};
//! use imgcmp_ops::ColorRange;
//! use imgcmp_view::canvas::{Canvas, FigureSize};
//! use imgcmp_view::raster::RasterCanvas;
//!
//! let mut canvas = RasterCanvas::new().with_dpi(10.0).with_background([0, 0, 0, 255]);
//! canvas.figure(Some(FigureSize::new(2.0, 1.0))).unwrap();
//! let panel = canvas.add_region(Region::FULL).unwrap();
//! let img = Image::from_rows(&[[1.0]]).unwrap();
//! canvas.show(panel, &img, ColorRange::new(0.0, 1.0)).unwrap();
//! canvas.present().unwrap();
//!
//! let out = canvas.image().unwrap();
//! assert_eq!(out.dimensions(), (20, 10));
//! assert_eq!(out.get_pixel(10, 5).0, [255, 255, 255, 255]);
//! assert_eq!(out.get_pixel(0, 5).0, [0, 0, 0, 255]);
//! ```

use std::path::Path;

use image::{ImageFormat, Rgba, RgbaImage};
use imgcmp_core::{Image, Region};
use imgcmp_ops::ColorRange;
use tracing::{debug, trace};

use crate::canvas::{Canvas, FigureSize, PanelGeometry, PanelId};
use crate::colormap::Colorizer;
use crate::{ViewError, ViewResult};

/// Largest bitmap side, in pixels.
pub const MAX_SIDE: u32 = 16_384;

/// One shown image.
#[derive(Debug, Clone)]
struct Shown {
    panel: PanelId,
    image: Image,
    range: ColorRange,
}

/// Figure state between `figure` and `present`.
#[derive(Debug, Clone)]
struct Figure {
    size: FigureSize,
    panels: Vec<PanelGeometry>,
    hidden_ticks: Vec<PanelId>,
    spacing: (f32, f32),
    shown: Vec<Shown>,
}

/// Canvas rendering into an in-memory RGBA8 bitmap.
#[derive(Debug, Clone)]
pub struct RasterCanvas {
    /// Pixels per figure unit
    pub dpi: f32,
    /// Figure background
    pub background: [u8; 4],
    figure: Option<Figure>,
    output: Option<RgbaImage>,
}

impl RasterCanvas {
    /// Default pixels per figure unit.
    pub const DEFAULT_DPI: f32 = 100.0;

    /// Canvas with default dpi and a white background.
    pub fn new() -> Self {
        Self {
            dpi: Self::DEFAULT_DPI,
            background: [255, 255, 255, 255],
            figure: None,
            output: None,
        }
    }

    /// Sets the dpi.
    pub fn with_dpi(mut self, dpi: f32) -> Self {
        self.dpi = dpi;
        self
    }

    /// Sets the background color.
    pub fn with_background(mut self, rgba: [u8; 4]) -> Self {
        self.background = rgba;
        self
    }

    /// Bitmap produced by the last `present`.
    pub fn image(&self) -> Option<&RgbaImage> {
        self.output.as_ref()
    }

    /// Panels with hidden ticks in the current figure.
    pub fn hidden_ticks(&self) -> &[PanelId] {
        self.figure.as_ref().map_or(&[][..], |f| f.hidden_ticks.as_slice())
    }

    /// Writes the last bitmap as PNG.
    ///
    /// # Errors
    ///
    /// [`ViewError::Canvas`] if nothing was presented yet, [`ViewError::Save`]
    /// if encoding or writing fails.
    pub fn save(&self, path: impl AsRef<Path>) -> ViewResult<()> {
        let path = path.as_ref();
        let img = self
            .output
            .as_ref()
            .ok_or_else(|| ViewError::Canvas("nothing has been presented yet".into()))?;
        img.save_with_format(path, ImageFormat::Png)
            .map_err(|source| ViewError::Save {
                path: path.to_path_buf(),
                source,
            })?;
        debug!(path = %path.display(), width = img.width(), height = img.height(), "Saved figure");
        Ok(())
    }

    fn current(&mut self) -> ViewResult<&mut Figure> {
        self.figure
            .as_mut()
            .ok_or_else(|| ViewError::Canvas("no figure; call figure() first".into()))
    }

    fn pixel_size(&self, size: FigureSize) -> ViewResult<(u32, u32)> {
        let side = |units: f32| -> ViewResult<u32> {
            let px = (units * self.dpi).round();
            if !px.is_finite() || px < 1.0 || px > MAX_SIDE as f32 {
                return Err(ViewError::Canvas(format!(
                    "figure side of {units} units at {} dpi is outside 1..={MAX_SIDE} pixels",
                    self.dpi
                )));
            }
            Ok(px as u32)
        };
        Ok((side(size.width)?, side(size.height)?))
    }

    fn rasterize(&self, fig: &Figure) -> ViewResult<RgbaImage> {
        let (w, h) = self.pixel_size(fig.size)?;
        let mut out = RgbaImage::from_pixel(w, h, Rgba(self.background));
        for shown in &fig.shown {
            let geometry = fig
                .panels
                .get(shown.panel.0)
                .ok_or_else(|| ViewError::Canvas(format!("unknown panel {}", shown.panel.0)))?;
            let region = geometry.to_region(fig.spacing.0, fig.spacing.1);
            blit(&mut out, region, &shown.image, shown.range)?;
        }
        Ok(out)
    }
}

impl Default for RasterCanvas {
    fn default() -> Self {
        Self::new()
    }
}

/// Draws `image` fitted into `region` of `out`.
fn blit(out: &mut RgbaImage, region: Region, image: &Image, range: ColorRange) -> ViewResult<()> {
    let colorizer = Colorizer::new(image, range)?;
    let panel = region.to_pixels(out.width(), out.height());
    let fit = panel.fit(image.rows(), image.cols());
    trace!(?panel, ?fit, "raster::blit");
    if fit.is_empty() {
        return Ok(());
    }

    let (rows, cols) = (image.rows() as u64, image.cols() as u64);
    for dy in 0..fit.height {
        let r = (u64::from(dy) * rows / u64::from(fit.height)) as usize;
        for dx in 0..fit.width {
            let c = (u64::from(dx) * cols / u64::from(fit.width)) as usize;
            let src = colorizer.pixel(r, c);
            let dst = out.get_pixel_mut(fit.x + dx, fit.y + dy);
            dst.0 = over(src, dst.0);
        }
    }
    Ok(())
}

/// Source-over compositing of straight-alpha RGBA8.
fn over(src: [u8; 4], dst: [u8; 4]) -> [u8; 4] {
    match src[3] {
        255 => src,
        0 => dst,
        a => {
            let a = u32::from(a);
            let mix =
                |s: u8, d: u8| ((u32::from(s) * a + u32::from(d) * (255 - a) + 127) / 255) as u8;
            [
                mix(src[0], dst[0]),
                mix(src[1], dst[1]),
                mix(src[2], dst[2]),
                dst[3].max(src[3]),
            ]
        }
    }
}

impl Canvas for RasterCanvas {
    fn figure(&mut self, size: Option<FigureSize>) -> ViewResult<()> {
        let size = size.unwrap_or_default();
        self.pixel_size(size)?;
        trace!(width = size.width, height = size.height, "raster::figure");
        self.figure = Some(Figure {
            size,
            panels: Vec::new(),
            hidden_ticks: Vec::new(),
            spacing: (0.2, 0.2),
            shown: Vec::new(),
        });
        Ok(())
    }

    fn add_region(&mut self, region: Region) -> ViewResult<PanelId> {
        let fig = self.current()?;
        fig.panels.push(PanelGeometry::Region(region));
        Ok(PanelId(fig.panels.len() - 1))
    }

    fn add_grid(
        &mut self,
        rows: usize,
        cols: usize,
        _shared_axes: bool,
    ) -> ViewResult<Vec<PanelId>> {
        if rows == 0 || cols == 0 {
            return Err(ViewError::Canvas(format!("empty grid {rows}x{cols}")));
        }
        let fig = self.current()?;
        let first = fig.panels.len();
        for row in 0..rows {
            for col in 0..cols {
                fig.panels.push(PanelGeometry::Cell {
                    row,
                    col,
                    rows,
                    cols,
                });
            }
        }
        Ok((first..fig.panels.len()).map(PanelId).collect())
    }

    fn show(&mut self, panel: PanelId, image: &Image, range: ColorRange) -> ViewResult<()> {
        Colorizer::new(image, range)?;
        let fig = self.current()?;
        if panel.0 >= fig.panels.len() {
            return Err(ViewError::Canvas(format!("unknown panel {}", panel.0)));
        }
        fig.shown.push(Shown {
            panel,
            image: image.clone(),
            range,
        });
        Ok(())
    }

    fn hide_ticks(&mut self, panel: PanelId) -> ViewResult<()> {
        self.current()?.hidden_ticks.push(panel);
        Ok(())
    }

    fn set_spacing(&mut self, hspace: f32, vspace: f32) -> ViewResult<()> {
        self.current()?.spacing = (hspace, vspace);
        Ok(())
    }

    fn present(&mut self) -> ViewResult<()> {
        let fig = self
            .figure
            .as_ref()
            .ok_or_else(|| ViewError::Canvas("no figure to present".into()))?;
        let out = self.rasterize(fig)?;
        debug!(
            width = out.width(),
            height = out.height(),
            panels = fig.panels.len(),
            "Rasterized figure"
        );
        self.output = Some(out);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compare::{compare, CompareParams};
    use crate::layout::Layout;
    use imgcmp_core::Shape;

    #[test]
    fn test_default_figure_size() {
        let mut c = RasterCanvas::new();
        c.figure(None).unwrap();
        c.present().unwrap();
        assert_eq!(c.image().unwrap().dimensions(), (640, 480));
        assert_eq!(c.image().unwrap().get_pixel(0, 0).0, [255, 255, 255, 255]);
    }

    #[test]
    fn test_calls_before_figure_fail() {
        let mut c = RasterCanvas::new();
        assert!(matches!(c.add_region(Region::FULL), Err(ViewError::Canvas(_))));
        assert!(c.present().is_err());
        assert!(c.save("never.png").is_err());
    }

    #[test]
    fn test_oversized_figure_rejected() {
        let mut c = RasterCanvas::new();
        assert!(c.figure(Some(FigureSize::new(1000.0, 1.0))).is_err());
        assert!(c.figure(Some(FigureSize::new(0.0, 1.0))).is_err());
    }

    #[test]
    fn test_aspect_preserved_and_centered() {
        let mut c = RasterCanvas::new().with_dpi(1.0).with_background([0, 0, 255, 255]);
        c.figure(Some(FigureSize::new(30.0, 10.0))).unwrap();
        let p = c.add_region(Region::FULL).unwrap();
        let img = Image::filled(Shape::new(2, 2), 1.0).unwrap();
        c.show(p, &img, ColorRange::new(0.0, 1.0)).unwrap();
        c.present().unwrap();

        let out = c.image().unwrap();
        // 10x10 square centered in 30x10
        assert_eq!(out.get_pixel(9, 5).0, [0, 0, 255, 255]);
        assert_eq!(out.get_pixel(10, 5).0, [255, 255, 255, 255]);
        assert_eq!(out.get_pixel(19, 5).0, [255, 255, 255, 255]);
        assert_eq!(out.get_pixel(20, 5).0, [0, 0, 255, 255]);
    }

    #[test]
    fn test_nearest_neighbour_sampling() {
        let mut c = RasterCanvas::new().with_dpi(1.0);
        c.figure(Some(FigureSize::new(4.0, 4.0))).unwrap();
        let p = c.add_region(Region::FULL).unwrap();
        let img = Image::from_rows(&[[0.0, 1.0], [1.0, 0.0]]).unwrap();
        c.show(p, &img, ColorRange::new(0.0, 1.0)).unwrap();
        c.present().unwrap();
        let out = c.image().unwrap();
        assert_eq!(out.get_pixel(1, 1).0, [0, 0, 0, 255]);
        assert_eq!(out.get_pixel(2, 1).0, [255, 255, 255, 255]);
        assert_eq!(out.get_pixel(1, 2).0, [255, 255, 255, 255]);
        assert_eq!(out.get_pixel(3, 3).0, [0, 0, 0, 255]);
    }

    #[test]
    fn test_unsupported_channels_rejected_on_show() {
        let mut c = RasterCanvas::new();
        c.figure(None).unwrap();
        let p = c.add_region(Region::FULL).unwrap();
        let img = Image::zeros(Shape::with_channels(2, 2, 6)).unwrap();
        assert!(matches!(
            c.show(p, &img, ColorRange::new(0.0, 1.0)),
            Err(ViewError::UnsupportedChannels(6))
        ));
    }

    #[test]
    fn test_alpha_composites_over_background() {
        assert_eq!(over([0, 0, 0, 0], [10, 20, 30, 255]), [10, 20, 30, 255]);
        assert_eq!(over([200, 0, 0, 255], [10, 20, 30, 255]), [200, 0, 0, 255]);
        assert_eq!(over([255, 255, 255, 128], [0, 0, 0, 255]), [128, 128, 128, 255]);
    }

    #[test]
    fn test_wide_comparison_fills_three_columns() {
        let a = Image::zeros(Shape::new(2, 10)).unwrap();
        let b = Image::filled(Shape::new(2, 10), 1.0).unwrap();
        let mut c = RasterCanvas::new().with_dpi(10.0);
        let params = CompareParams::default().with_layout(Layout::Wide);
        compare(&mut c, &a, &b, &params).unwrap();
        let out = c.image().unwrap();
        assert_eq!(out.dimensions(), (64, 48));
        assert_eq!(c.hidden_ticks().len(), 3);
        // A (black) in the middle third, B (white) in the right third
        let mid = out.width() / 2;
        assert_eq!(out.get_pixel(mid, out.height() / 2).0, [0, 0, 0, 255]);
        assert_eq!(out.get_pixel(out.width() - 2, out.height() / 2).0, [255, 255, 255, 255]);
    }

    #[test]
    fn test_save_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("figure.png");
        let mut c = RasterCanvas::new().with_dpi(5.0);
        c.figure(None).unwrap();
        c.present().unwrap();
        c.save(&path).unwrap();
        let back = image::open(&path).unwrap().to_rgba8();
        assert_eq!(back.dimensions(), (32, 24));
    }
}
