//! Canvas collaborator.
//!
//! The renderer never draws pixels itself. It describes a figure through the
//! [`Canvas`] trait: one figure, a few panels placed by fractional
//! [`Region`]s or an evenly split grid, an image shown in each panel on a
//! shared [`ColorRange`], and a final [`Canvas::present`].
//!
//! Implementations in this crate:
//!
//! - [`RasterCanvas`](crate::raster::RasterCanvas) - software RGBA8 figure, saved as PNG
//! - `EguiCanvas` (feature `viewer`) - retained scene drawn by the interactive viewer
//! - [`testing::RecordingCanvas`] - records every call, for tests

use imgcmp_core::{Image, Region};
use imgcmp_ops::ColorRange;

use crate::ViewResult;

/// Handle to a panel created on a canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PanelId(pub usize);

/// Figure dimensions in figure units (inches at the raster canvas' dpi).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FigureSize {
    /// Width
    pub width: f32,
    /// Height
    pub height: f32,
}

impl FigureSize {
    /// Size used when a figure is created without an explicit size.
    pub const DEFAULT: Self = Self::new(6.4, 4.8);

    /// Creates a figure size.
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

impl Default for FigureSize {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Where a panel sits inside its figure.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PanelGeometry {
    /// Explicit fractional region.
    Region(Region),
    /// One cell of a `rows x cols` grid.
    Cell {
        /// Row index
        row: usize,
        /// Column index
        col: usize,
        /// Grid rows
        rows: usize,
        /// Grid columns
        cols: usize,
    },
}

impl PanelGeometry {
    /// Resolves to a fractional region given the figure's panel spacing.
    ///
    /// Spacing is a fraction of the average cell size, as a subplot `wspace`
    /// / `hspace` would be. Explicit regions ignore spacing.
    pub fn to_region(&self, hspace: f32, vspace: f32) -> Region {
        match *self {
            Self::Region(r) => r,
            Self::Cell {
                row,
                col,
                rows,
                cols,
            } => {
                let (x, width) = grid_span(col, cols, hspace);
                let (y, height) = grid_span(row, rows, vspace);
                Region::new(x, y, width, height)
            }
        }
    }
}

/// Start and length of cell `i` of `n` along one axis of the unit interval.
fn grid_span(i: usize, n: usize, space: f32) -> (f32, f32) {
    let n = n.max(1) as f32;
    let space = space.max(0.0);
    let cell = 1.0 / (n + space * (n - 1.0));
    let gap = cell * space;
    (i as f32 * (cell + gap), cell)
}

/// Drawing surface the panel renderer talks to.
///
/// Calls arrive in a fixed order: `figure`, panel creation, `set_spacing`,
/// then `show`/`hide_ticks` per panel, then `present`. Each call to `figure`
/// starts a new figure and invalidates earlier panel ids.
pub trait Canvas {
    /// Starts a new figure. `None` selects [`FigureSize::DEFAULT`].
    fn figure(&mut self, size: Option<FigureSize>) -> ViewResult<()>;

    /// Adds a panel covering `region`.
    fn add_region(&mut self, region: Region) -> ViewResult<PanelId>;

    /// Adds a `rows x cols` grid of panels, returned in row-major order.
    ///
    /// With `shared_axes`, zooming or panning one panel moves all of them.
    fn add_grid(&mut self, rows: usize, cols: usize, shared_axes: bool)
        -> ViewResult<Vec<PanelId>>;

    /// Displays `image` in `panel` on the scale `range`.
    fn show(&mut self, panel: PanelId, image: &Image, range: ColorRange) -> ViewResult<()>;

    /// Hides axis ticks and tick labels of `panel`.
    fn hide_ticks(&mut self, panel: PanelId) -> ViewResult<()>;

    /// Sets horizontal and vertical spacing between grid panels.
    fn set_spacing(&mut self, hspace: f32, vspace: f32) -> ViewResult<()>;

    /// Finishes the figure.
    fn present(&mut self) -> ViewResult<()> {
        Ok(())
    }
}

impl<C: Canvas + ?Sized> Canvas for &mut C {
    fn figure(&mut self, size: Option<FigureSize>) -> ViewResult<()> {
        (**self).figure(size)
    }

    fn add_region(&mut self, region: Region) -> ViewResult<PanelId> {
        (**self).add_region(region)
    }

    fn add_grid(
        &mut self,
        rows: usize,
        cols: usize,
        shared_axes: bool,
    ) -> ViewResult<Vec<PanelId>> {
        (**self).add_grid(rows, cols, shared_axes)
    }

    fn show(&mut self, panel: PanelId, image: &Image, range: ColorRange) -> ViewResult<()> {
        (**self).show(panel, image, range)
    }

    fn hide_ticks(&mut self, panel: PanelId) -> ViewResult<()> {
        (**self).hide_ticks(panel)
    }

    fn set_spacing(&mut self, hspace: f32, vspace: f32) -> ViewResult<()> {
        (**self).set_spacing(hspace, vspace)
    }

    fn present(&mut self) -> ViewResult<()> {
        (**self).present()
    }
}

/// Test doubles.
pub mod testing {
    use super::*;

    /// One recorded canvas call.
    #[derive(Debug, Clone, PartialEq)]
    pub enum CanvasCall {
        /// `figure(size)`
        Figure(Option<FigureSize>),
        /// `add_region(region)` and the id handed out
        AddRegion(Region, PanelId),
        /// `add_grid(rows, cols, shared_axes)` and the ids handed out
        AddGrid {
            /// Grid rows
            rows: usize,
            /// Grid columns
            cols: usize,
            /// Shared zoom/pan
            shared_axes: bool,
            /// Panels, row-major
            panels: Vec<PanelId>,
        },
        /// `show(panel, image, range)`
        Show(PanelId, Image, ColorRange),
        /// `hide_ticks(panel)`
        HideTicks(PanelId),
        /// `set_spacing(h, v)`
        SetSpacing(f32, f32),
        /// `present()`
        Present,
    }

    /// Canvas that logs every call and draws nothing.
    #[derive(Debug, Default)]
    pub struct RecordingCanvas {
        /// Calls in arrival order, across all figures.
        pub calls: Vec<CanvasCall>,
        next_panel: usize,
    }

    impl RecordingCanvas {
        /// Creates an empty recorder.
        pub fn new() -> Self {
            Self::default()
        }

        /// Returns `true` if nothing has been called yet.
        pub fn is_untouched(&self) -> bool {
            self.calls.is_empty()
        }

        /// Number of figures started.
        pub fn figures(&self) -> usize {
            self.calls
                .iter()
                .filter(|c| matches!(c, CanvasCall::Figure(_)))
                .count()
        }

        /// Calls belonging to the most recent figure.
        pub fn last_figure(&self) -> &[CanvasCall] {
            let start = self
                .calls
                .iter()
                .rposition(|c| matches!(c, CanvasCall::Figure(_)))
                .unwrap_or(0);
            &self.calls[start..]
        }

        /// Images shown in the most recent figure, in call order.
        pub fn shown(&self) -> Vec<(PanelId, &Image, ColorRange)> {
            self.last_figure()
                .iter()
                .filter_map(|c| match c {
                    CanvasCall::Show(p, img, r) => Some((*p, img, *r)),
                    _ => None,
                })
                .collect()
        }

        /// Panels with hidden ticks in the most recent figure.
        pub fn hidden_ticks(&self) -> Vec<PanelId> {
            self.last_figure()
                .iter()
                .filter_map(|c| match c {
                    CanvasCall::HideTicks(p) => Some(*p),
                    _ => None,
                })
                .collect()
        }

        /// Clears the log.
        pub fn clear(&mut self) {
            self.calls.clear();
        }

        fn next_id(&mut self) -> PanelId {
            let id = PanelId(self.next_panel);
            self.next_panel += 1;
            id
        }
    }

    impl Canvas for RecordingCanvas {
        fn figure(&mut self, size: Option<FigureSize>) -> ViewResult<()> {
            self.next_panel = 0;
            self.calls.push(CanvasCall::Figure(size));
            Ok(())
        }

        fn add_region(&mut self, region: Region) -> ViewResult<PanelId> {
            let id = self.next_id();
            self.calls.push(CanvasCall::AddRegion(region, id));
            Ok(id)
        }

        fn add_grid(
            &mut self,
            rows: usize,
            cols: usize,
            shared_axes: bool,
        ) -> ViewResult<Vec<PanelId>> {
            let panels: Vec<_> = (0..rows * cols).map(|_| self.next_id()).collect();
            self.calls.push(CanvasCall::AddGrid {
                rows,
                cols,
                shared_axes,
                panels: panels.clone(),
            });
            Ok(panels)
        }

        fn show(&mut self, panel: PanelId, image: &Image, range: ColorRange) -> ViewResult<()> {
            self.calls.push(CanvasCall::Show(panel, image.clone(), range));
            Ok(())
        }

        fn hide_ticks(&mut self, panel: PanelId) -> ViewResult<()> {
            self.calls.push(CanvasCall::HideTicks(panel));
            Ok(())
        }

        fn set_spacing(&mut self, hspace: f32, vspace: f32) -> ViewResult<()> {
            self.calls.push(CanvasCall::SetSpacing(hspace, vspace));
            Ok(())
        }

        fn present(&mut self) -> ViewResult<()> {
            self.calls.push(CanvasCall::Present);
            Ok(())
        }
    }
}
