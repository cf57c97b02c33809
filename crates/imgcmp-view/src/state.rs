//! Zoom and pan state shared by linked panels.
//!
//! Panels created with shared axes show the same window of their images.
//! The window is kept in normalized image coordinates (UV, `[0, 1]` on both
//! axes, origin top-left), so it applies unchanged to every panel no matter
//! how large that panel is on screen.

/// Default zoom (whole image visible).
pub const DEFAULT_ZOOM: f32 = 1.0;

/// Zoom limits.
pub const MIN_ZOOM: f32 = 1.0;
/// Zoom limits.
pub const MAX_ZOOM: f32 = 64.0;

/// Visible window shared by linked panels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewState {
    /// Magnification (1.0 = whole image).
    pub zoom: f32,
    /// Center of the visible window in UV.
    pub center: [f32; 2],
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            zoom: DEFAULT_ZOOM,
            center: [0.5, 0.5],
        }
    }
}

impl ViewState {
    /// Shows the whole image again.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Returns `true` if the whole image is visible.
    pub fn is_reset(&self) -> bool {
        *self == Self::default()
    }

    /// Multiplies the zoom by `factor`, keeping UV point `anchor` in place.
    pub fn zoom_by(&mut self, factor: f32, anchor: [f32; 2]) {
        if !factor.is_finite() || factor <= 0.0 {
            return;
        }
        let old = self.zoom;
        self.zoom = (old * factor).clamp(MIN_ZOOM, MAX_ZOOM);
        let k = old / self.zoom;
        for i in 0..2 {
            self.center[i] = anchor[i] + (self.center[i] - anchor[i]) * k;
        }
        self.clamp_center();
    }

    /// Moves the window by `delta` in UV of the visible window.
    ///
    /// A delta of `[1.0, 0.0]` moves by one full window width.
    pub fn pan_by(&mut self, delta: [f32; 2]) {
        let extent = 1.0 / self.zoom;
        for i in 0..2 {
            self.center[i] -= delta[i] * extent;
        }
        self.clamp_center();
    }

    /// Visible window as `[min_u, min_v, max_u, max_v]`.
    pub fn uv_rect(&self) -> [f32; 4] {
        let half = 0.5 / self.zoom;
        [
            self.center[0] - half,
            self.center[1] - half,
            self.center[0] + half,
            self.center[1] + half,
        ]
    }

    /// Maps a point inside a panel (`[0, 1]` across the panel) to image UV.
    pub fn to_uv(&self, local: [f32; 2]) -> [f32; 2] {
        let [u0, v0, u1, v1] = self.uv_rect();
        [u0 + local[0] * (u1 - u0), v0 + local[1] * (v1 - v0)]
    }

    fn clamp_center(&mut self) {
        let half = 0.5 / self.zoom;
        for c in &mut self.center {
            *c = c.clamp(half, 1.0 - half);
        }
    }
}
