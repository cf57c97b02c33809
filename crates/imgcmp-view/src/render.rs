//! Panel renderer.
//!
//! Draws the three images of a comparison (the derived image C and the two
//! sources A and B) onto a [`Canvas`] in a resolved [`Arrangement`].
//!
//! ```text
//!  Square                      Wide                 Tall
//! +----------------+-----+    +-----+-----+-----+   +-----+
//! |                |  A  |    |  C  |  A  |  B  |   |  C  |
//! |       C        +-----+    +-----+-----+-----+   +-----+
//! |                |  B  |                          |  A  |
//! +----------------+-----+                          +-----+
//!                                                   |  B  |
//!                                                   +-----+
//! ```
//!
//! Every panel gets zero spacing, hidden ticks and the same [`ColorRange`].

use imgcmp_core::{Image, Region};
use imgcmp_ops::ColorRange;
use tracing::debug;

use crate::canvas::{Canvas, FigureSize, PanelId};
use crate::layout::Arrangement;
use crate::ViewResult;

/// Renderer settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderOptions {
    /// Figure width used by the square arrangement, in figure units.
    pub figure_width: f32,
}

impl RenderOptions {
    /// Default square figure width.
    pub const DEFAULT_FIGURE_WIDTH: f32 = 10.0;

    /// Sets the square figure width.
    pub fn with_figure_width(mut self, width: f32) -> Self {
        self.figure_width = width;
        self
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            figure_width: Self::DEFAULT_FIGURE_WIDTH,
        }
    }
}

/// The three images drawn by one render.
#[derive(Debug, Clone, Copy)]
pub struct ComparisonPanels<'a> {
    /// Derived comparison image C
    pub comparison: &'a Image,
    /// Source A (after any swap)
    pub a: &'a Image,
    /// Source B (after any swap)
    pub b: &'a Image,
}

impl<'a> ComparisonPanels<'a> {
    /// Bundles the panels.
    pub const fn new(comparison: &'a Image, a: &'a Image, b: &'a Image) -> Self {
        Self { comparison, a, b }
    }

    fn in_order(&self) -> [&'a Image; 3] {
        [self.comparison, self.a, self.b]
    }
}

/// Regions of C, A and B in the square arrangement.
pub const fn square_regions() -> [Region; 3] {
    [
        Region::new(0.0, 0.0, 2.0 / 3.0, 1.0),
        Region::new(2.0 / 3.0, 0.0, 1.0 / 3.0, 0.5),
        Region::new(2.0 / 3.0, 0.5, 1.0 / 3.0, 0.5),
    ]
}

/// Square figure size for a comparison with aspect ratio `aspect` (rows / cols).
///
/// The comparison panel spans two thirds of the width, so a height of
/// `2/3 * width * aspect` fits it exactly.
pub fn square_figure_size(width: f32, aspect: f64) -> FigureSize {
    FigureSize::new(width, (2.0 / 3.0 * f64::from(width) * aspect) as f32)
}

/// Draws `panels` in `arrangement` on one shared `range`.
pub fn render<C: Canvas + ?Sized>(
    canvas: &mut C,
    arrangement: Arrangement,
    panels: &ComparisonPanels<'_>,
    range: ColorRange,
    opts: &RenderOptions,
) -> ViewResult<()> {
    debug!(%arrangement, min = range.min, max = range.max, "Rendering comparison");
    match arrangement {
        Arrangement::Square => render_square(canvas, panels, range, opts),
        Arrangement::Tall | Arrangement::Wide => render_stack(canvas, arrangement, panels, range),
    }
}

/// Large C on the left, A over B on the right.
pub fn render_square<C: Canvas + ?Sized>(
    canvas: &mut C,
    panels: &ComparisonPanels<'_>,
    range: ColorRange,
    opts: &RenderOptions,
) -> ViewResult<()> {
    let size = square_figure_size(opts.figure_width, panels.comparison.aspect_ratio());
    canvas.figure(Some(size))?;
    let ids = square_regions()
        .into_iter()
        .map(|r| canvas.add_region(r))
        .collect::<ViewResult<Vec<_>>>()?;
    finish(canvas, &ids, panels, range)
}

/// C, A, B in one row (`Wide`) or one column (`Tall`) with shared axes.
///
/// `Square` is drawn as a row.
pub fn render_stack<C: Canvas + ?Sized>(
    canvas: &mut C,
    arrangement: Arrangement,
    panels: &ComparisonPanels<'_>,
    range: ColorRange,
) -> ViewResult<()> {
    let (rows, cols) = arrangement.grid().unwrap_or((1, 3));
    canvas.figure(None)?;
    let ids = canvas.add_grid(rows, cols, true)?;
    finish(canvas, &ids, panels, range)
}

fn finish<C: Canvas + ?Sized>(
    canvas: &mut C,
    ids: &[PanelId],
    panels: &ComparisonPanels<'_>,
    range: ColorRange,
) -> ViewResult<()> {
    canvas.set_spacing(0.0, 0.0)?;
    for (&id, image) in ids.iter().zip(panels.in_order()) {
        canvas.show(id, image, range)?;
        canvas.hide_ticks(id)?;
    }
    canvas.present()
}
