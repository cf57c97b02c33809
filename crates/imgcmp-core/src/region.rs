//! Fractional figure regions and their pixel counterparts.
//!
//! Panel layouts are described in figure-relative coordinates so they are
//! independent of the final output resolution:
//!
//! - [`Region`] - Fractional rectangle, every edge in `[0, 1]`
//! - [`PixelRect`] - Integer rectangle once a figure size is known
//!
//! # Coordinate System
//!
//! Origin (0, 0) is the **top-left** corner of the figure, X grows to the
//! right and Y grows downward:
//!
//! ```text
//! (0,0) ─────────────── (1,0)
//!   │  ┌──────────┐ ┌───┐
//!   │  │    C     │ │ A │
//!   │  │          │ ├───┤
//!   │  │          │ │ B │
//!   │  └──────────┘ └───┘
//! (0,1) ─────────────── (1,1)
//! ```
//!
//! # Usage
//!
//! ```rust
//! use imgcmp_core::Region;
//!
//! let right_third = Region::new(2.0 / 3.0, 0.0, 1.0 / 3.0, 1.0);
//! let px = right_third.to_pixels(900, 300);
//! assert_eq!((px.x, px.width), (600, 300));
//! ```

/// Figure-relative rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Region {
    /// Left edge as a fraction of figure width
    pub x: f32,
    /// Top edge as a fraction of figure height
    pub y: f32,
    /// Width as a fraction of figure width
    pub width: f32,
    /// Height as a fraction of figure height
    pub height: f32,
}

impl Region {
    /// The whole figure.
    pub const FULL: Self = Self::new(0.0, 0.0, 1.0, 1.0);

    /// Creates a region from its top-left corner and size.
    #[inline]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge.
    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Bottom edge.
    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Returns `true` if the fractional point lies inside the region.
    ///
    /// Left/top edges are inclusive, right/bottom edges exclusive.
    #[inline]
    pub fn contains(&self, fx: f32, fy: f32) -> bool {
        fx >= self.x && fx < self.right() && fy >= self.y && fy < self.bottom()
    }

    /// Returns `true` if every edge lies inside `[0, 1]` and the size is positive.
    pub fn is_normalized(&self) -> bool {
        const EPS: f32 = 1e-6;
        self.width > 0.0
            && self.height > 0.0
            && self.x >= -EPS
            && self.y >= -EPS
            && self.right() <= 1.0 + EPS
            && self.bottom() <= 1.0 + EPS
    }

    /// Maps the region onto a figure of `width_px` x `height_px` pixels.
    ///
    /// Edges are rounded independently, so adjacent regions share their
    /// boundary pixel column/row without gaps or overlap.
    pub fn to_pixels(&self, width_px: u32, height_px: u32) -> PixelRect {
        let w = width_px as f32;
        let h = height_px as f32;
        let left = (self.x * w).round().clamp(0.0, w) as u32;
        let top = (self.y * h).round().clamp(0.0, h) as u32;
        let right = (self.right() * w).round().clamp(0.0, w) as u32;
        let bottom = (self.bottom() * h).round().clamp(0.0, h) as u32;
        PixelRect::new(
            left,
            top,
            right.saturating_sub(left),
            bottom.saturating_sub(top),
        )
    }
}

impl Default for Region {
    fn default() -> Self {
        Self::FULL
    }
}

/// Integer rectangle in output pixels, origin top-left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PixelRect {
    /// Left edge (inclusive)
    pub x: u32,
    /// Top edge (inclusive)
    pub y: u32,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl PixelRect {
    /// Creates a new pixel rectangle.
    #[inline]
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Returns `true` if the rectangle covers no pixels.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Largest rectangle with the given rows/cols proportions, centered inside `self`.
    ///
    /// Used to draw an image without distortion; the leftover band is split
    /// evenly on both sides.
    ///
    /// ```rust
    /// use imgcmp_core::PixelRect;
    ///
    /// let panel = PixelRect::new(0, 0, 300, 100);
    /// let fit = panel.fit(10, 10);
    /// assert_eq!(fit, PixelRect::new(100, 0, 100, 100));
    /// ```
    pub fn fit(&self, rows: usize, cols: usize) -> PixelRect {
        if self.is_empty() || rows == 0 || cols == 0 {
            return PixelRect::new(self.x, self.y, 0, 0);
        }
        let scale = (self.width as f64 / cols as f64).min(self.height as f64 / rows as f64);
        let w = ((cols as f64 * scale).round() as u32).clamp(1, self.width);
        let h = ((rows as f64 * scale).round() as u32).clamp(1, self.height);
        PixelRect::new(
            self.x + (self.width - w) / 2,
            self.y + (self.height - h) / 2,
            w,
            h,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_region() {
        assert!(Region::FULL.is_normalized());
        assert_eq!(Region::FULL.to_pixels(64, 32), PixelRect::new(0, 0, 64, 32));
    }

    #[test]
    fn test_contains_edges() {
        let r = Region::new(0.5, 0.0, 0.5, 0.5);
        assert!(r.contains(0.5, 0.0));
        assert!(!r.contains(1.0, 0.2));
        assert!(!r.contains(0.6, 0.5));
    }

    #[test]
    fn test_adjacent_regions_tile_without_gaps() {
        let left = Region::new(0.0, 0.0, 2.0 / 3.0, 1.0);
        let top = Region::new(2.0 / 3.0, 0.0, 1.0 / 3.0, 0.5);
        let bottom = Region::new(2.0 / 3.0, 0.5, 1.0 / 3.0, 0.5);
        let (l, t, b) = (
            left.to_pixels(100, 51),
            top.to_pixels(100, 51),
            bottom.to_pixels(100, 51),
        );
        assert_eq!(l.x + l.width, t.x);
        assert_eq!(t.x + t.width, 100);
        assert_eq!(t.y + t.height, b.y);
        assert_eq!(b.y + b.height, 51);
    }

    #[test]
    fn test_not_normalized() {
        assert!(!Region::new(0.5, 0.0, 0.6, 1.0).is_normalized());
        assert!(!Region::new(0.0, 0.0, 0.0, 1.0).is_normalized());
    }

    #[test]
    fn test_fit_tall_image() {
        let panel = PixelRect::new(10, 10, 100, 100);
        assert_eq!(panel.fit(40, 10), PixelRect::new(47, 10, 25, 100));
    }

    #[test]
    fn test_fit_empty() {
        assert!(PixelRect::new(0, 0, 0, 10).fit(5, 5).is_empty());
    }
}
