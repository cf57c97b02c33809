//! Retained figure for the interactive viewer.
//!
//! [`EguiCanvas`] implements [`Canvas`] by recording the figure into a
//! [`Scene`] shared with the viewer window. Images are converted to RGBA8 when
//! shown; the window uploads them as textures the next time it repaints.

use std::cell::RefCell;
use std::rc::Rc;

use imgcmp_core::{Image, Region};
use imgcmp_ops::ColorRange;
use tracing::trace;

use crate::canvas::{Canvas, FigureSize, PanelGeometry, PanelId};
use crate::colormap::to_rgba8;
use crate::{ViewError, ViewResult};

/// RGBA8 pixels of one shown image.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelPixels {
    /// Panel the image belongs to
    pub panel: PanelId,
    /// `[width, height]`
    pub size: [usize; 2],
    /// Row-major, unpremultiplied RGBA8
    pub rgba: Vec<u8>,
}

/// Last figure drawn on an [`EguiCanvas`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scene {
    /// Figure size in figure units
    pub figure: FigureSize,
    /// Panel placement, indexed by [`PanelId`]
    pub panels: Vec<PanelGeometry>,
    /// Whether grid panels zoom and pan together
    pub shared_axes: bool,
    /// Grid spacing `(h, v)`
    pub spacing: (f32, f32),
    /// Images, in show order
    pub shown: Vec<PanelPixels>,
    /// Bumped on every `present`
    pub generation: u64,
}

impl Scene {
    /// Fractional region of `panel`, if it exists.
    pub fn region(&self, panel: PanelId) -> Option<Region> {
        self.panels
            .get(panel.0)
            .map(|g| g.to_region(self.spacing.0, self.spacing.1))
    }

    /// Returns `true` if `panel` is a grid cell with shared axes.
    pub fn is_linked(&self, panel: PanelId) -> bool {
        self.shared_axes && matches!(self.panels.get(panel.0), Some(PanelGeometry::Cell { .. }))
    }
}

/// Scene shared between the canvas and the viewer window.
pub type SceneHandle = Rc<RefCell<Scene>>;

/// Canvas recording into a [`SceneHandle`].
#[derive(Debug, Clone, Default)]
pub struct EguiCanvas {
    scene: SceneHandle,
    pending: Option<Scene>,
}

impl EguiCanvas {
    /// Creates a canvas drawing into `scene`.
    pub fn new(scene: SceneHandle) -> Self {
        Self {
            scene,
            pending: None,
        }
    }

    /// The shared scene.
    pub fn scene(&self) -> &SceneHandle {
        &self.scene
    }

    fn pending(&mut self) -> ViewResult<&mut Scene> {
        self.pending
            .as_mut()
            .ok_or_else(|| ViewError::Canvas("no figure; call figure() first".into()))
    }
}

impl Canvas for EguiCanvas {
    fn figure(&mut self, size: Option<FigureSize>) -> ViewResult<()> {
        self.pending = Some(Scene {
            figure: size.unwrap_or_default(),
            spacing: (0.2, 0.2),
            ..Scene::default()
        });
        Ok(())
    }

    fn add_region(&mut self, region: Region) -> ViewResult<PanelId> {
        let scene = self.pending()?;
        scene.panels.push(PanelGeometry::Region(region));
        Ok(PanelId(scene.panels.len() - 1))
    }

    fn add_grid(
        &mut self,
        rows: usize,
        cols: usize,
        shared_axes: bool,
    ) -> ViewResult<Vec<PanelId>> {
        let scene = self.pending()?;
        scene.shared_axes |= shared_axes;
        let first = scene.panels.len();
        for row in 0..rows {
            for col in 0..cols {
                scene.panels.push(PanelGeometry::Cell {
                    row,
                    col,
                    rows,
                    cols,
                });
            }
        }
        Ok((first..scene.panels.len()).map(PanelId).collect())
    }

    fn show(&mut self, panel: PanelId, image: &Image, range: ColorRange) -> ViewResult<()> {
        let pixels = to_rgba8(image, range)?;
        let scene = self.pending()?;
        if panel.0 >= scene.panels.len() {
            return Err(ViewError::Canvas(format!("unknown panel {}", panel.0)));
        }
        scene.shown.push(PanelPixels {
            panel,
            size: [image.cols(), image.rows()],
            rgba: pixels.into_iter().flatten().collect(),
        });
        Ok(())
    }

    fn hide_ticks(&mut self, _panel: PanelId) -> ViewResult<()> {
        // the viewer draws no axes
        Ok(())
    }

    fn set_spacing(&mut self, hspace: f32, vspace: f32) -> ViewResult<()> {
        self.pending()?.spacing = (hspace, vspace);
        Ok(())
    }

    fn present(&mut self) -> ViewResult<()> {
        let mut next = self
            .pending
            .take()
            .ok_or_else(|| ViewError::Canvas("no figure to present".into()))?;
        let mut scene = self.scene.borrow_mut();
        next.generation = scene.generation + 1;
        trace!(generation = next.generation, panels = next.panels.len(), "scene::present");
        *scene = next;
        Ok(())
    }
}
