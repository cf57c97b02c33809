//! Comparison orchestrator.
//!
//! One call to [`Comparator::compare`] runs the whole pipeline:
//!
//! 1. check that A and B have identical shapes
//! 2. resolve the method name in the [`Registry`]
//! 3. swap A and B if requested
//! 4. compute the comparison image C
//! 5. derive the shared [`ColorRange`] from the (possibly swapped) sources
//! 6. resolve the [`Layout`] against C
//! 7. render C, A, B on the canvas
//!
//! Steps 1 to 6 touch no canvas, so an invalid request leaves the canvas
//! exactly as it was. The returned [`Comparison`] describes what was drawn.
//!
//! # Example
//!
//! ```rust
//! use imgcmp_core::{Image, Shape};
//! use imgcmp_view::canvas::testing::RecordingCanvas;
//! use imgcmp_view::{compare, CompareParams};
//!
//! let a = Image::zeros(Shape::new(4, 4)).unwrap();
//! let b = Image::filled(Shape::new(4, 4), 1.0).unwrap();
//! let mut canvas = RecordingCanvas::new();
//!
//! let params = CompareParams::default().with_alpha(0.25);
//! let cmp = compare(&mut canvas, &a, &b, &params).unwrap();
//! assert!(cmp.image.data().iter().all(|&v| v == 0.25));
//! assert_eq!((cmp.range.min, cmp.range.max), (0.0, 1.0));
//! ```

use imgcmp_core::{ensure_same_shape, Image};
use imgcmp_ops::{registry, ColorRange, Registry};
use tracing::{debug, info};

use crate::canvas::Canvas;
use crate::layout::{Arrangement, Layout};
use crate::render::{self, ComparisonPanels, RenderOptions};
use crate::ViewResult;

/// Parameters of one comparison.
#[derive(Debug, Clone, PartialEq)]
pub struct CompareParams {
    /// Registry name of the transform
    pub method: String,
    /// Mixing parameter, nominally in `[0, 1]`
    pub alpha: f64,
    /// Requested layout
    pub layout: Layout,
    /// Exchange A and B before anything else is computed
    pub swap: bool,
}

impl CompareParams {
    /// Default mixing parameter.
    pub const DEFAULT_ALPHA: f64 = 0.5;

    /// Sets the method name.
    pub fn with_method(mut self, method: impl Into<String>) -> Self {
        self.method = method.into();
        self
    }

    /// Sets alpha.
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    /// Sets the layout.
    pub fn with_layout(mut self, layout: Layout) -> Self {
        self.layout = layout;
        self
    }

    /// Sets the swap flag.
    pub fn with_swap(mut self, swap: bool) -> Self {
        self.swap = swap;
        self
    }
}

impl Default for CompareParams {
    fn default() -> Self {
        Self {
            method: registry::BLEND.to_string(),
            alpha: Self::DEFAULT_ALPHA,
            layout: Layout::Auto,
            swap: false,
        }
    }
}

/// What one comparison drew.
#[derive(Debug, Clone, PartialEq)]
pub struct Comparison {
    /// The comparison image C
    pub image: Image,
    /// Source shown as A (B's image when swapped)
    pub a: Image,
    /// Source shown as B (A's image when swapped)
    pub b: Image,
    /// Shared display range
    pub range: ColorRange,
    /// Resolved arrangement
    pub arrangement: Arrangement,
    /// Whether the sources were exchanged
    pub swapped: bool,
}

/// Runs comparisons against a fixed registry and renderer settings.
#[derive(Debug, Clone, Copy, Default)]
pub struct Comparator {
    registry: Registry,
    options: RenderOptions,
}

impl Comparator {
    /// Creates a comparator.
    pub const fn new(registry: Registry, options: RenderOptions) -> Self {
        Self { registry, options }
    }

    /// The registry methods are resolved in.
    pub const fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Renderer settings.
    pub const fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Computes and renders one comparison of `a` and `b`.
    ///
    /// # Errors
    ///
    /// Shape mismatch, unknown method and all-NaN sources fail before the
    /// canvas is touched. Canvas failures are propagated as they occur.
    pub fn compare<C: Canvas + ?Sized>(
        &self,
        canvas: &mut C,
        a: &Image,
        b: &Image,
        params: &CompareParams,
    ) -> ViewResult<Comparison> {
        ensure_same_shape(a, b)?;
        let transform = self.registry.get(&params.method)?;

        let (a, b) = if params.swap { (b, a) } else { (a, b) };
        let image = transform(a, b, params.alpha)?;
        let range = ColorRange::of_sources(a, b)?;
        let arrangement = params.layout.resolve(&image);
        debug!(
            method = %params.method,
            alpha = params.alpha,
            swap = params.swap,
            %arrangement,
            "Comparison prepared"
        );

        render::render(
            canvas,
            arrangement,
            &ComparisonPanels::new(&image, a, b),
            range,
            &self.options,
        )?;
        info!(shape = %image.shape(), method = %params.method, "Comparison rendered");

        Ok(Comparison {
            image,
            a: a.clone(),
            b: b.clone(),
            range,
            arrangement,
            swapped: params.swap,
        })
    }
}

/// Runs one comparison with the built-in registry and default render options.
pub fn compare<C: Canvas + ?Sized>(
    canvas: &mut C,
    a: &Image,
    b: &Image,
    params: &CompareParams,
) -> ViewResult<Comparison> {
    Comparator::default().compare(canvas, a, b, params)
}
