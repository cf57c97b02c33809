//! # imgcmp-view
//!
//! Layout, rendering and interactive binding for A/B image comparison.
//!
//! A comparison draws three panels: the two sources A and B and an image C
//! derived from them by a named transform (blend, difference, shades). This
//! crate decides how the panels are arranged, draws them on a [`Canvas`] with
//! one shared intensity scale, and re-runs the comparison whenever an
//! interactive control changes.
//!
//! # Pipeline
//!
//! ```text
//! A, B ──► shape check ──► method lookup ──► swap ──► transform ──► C
//!                                                                 │
//!              ColorRange::of_sources(A, B) ◄─────────────────────┤
//!              Layout::resolve(C) ◄────────────────────────────────┘
//!                          │
//!                          ▼
//!                render(canvas, C, A, B)
//! ```
//!
//! # Quick Start
//!
//! ```rust
//! use imgcmp_core::{Image, Shape};
//! use imgcmp_view::raster::RasterCanvas;
//! use imgcmp_view::{compare, CompareParams, Layout};
//!
//! let a = Image::zeros(Shape::new(16, 64)).unwrap();
//! let b = Image::filled(Shape::new(16, 64), 1.0).unwrap();
//!
//! let mut canvas = RasterCanvas::new().with_dpi(20.0);
//! let params = CompareParams::default()
//!     .with_method("vertical_shade")
//!     .with_layout(Layout::Wide);
//! let cmp = compare(&mut canvas, &a, &b, &params).unwrap();
//! assert_eq!(cmp.image.get(0, 0, 0), Some(1.0));
//! assert!(canvas.image().is_some());
//! ```
//!
//! # Interactive Viewer
//!
//! With the default `viewer` feature, [`run_viewer`] opens an egui window
//! with a method selector, an alpha slider, a layout selector and a swap
//! toggle.
//!
//! | Key / Mouse | Action |
//! |-------------|--------|
//! | Scroll      | Zoom linked panels |
//! | Drag        | Pan linked panels |
//! | `H`         | Home (whole image) |
//! | `Esc`       | Exit |

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod binding;
pub mod canvas;
pub mod colormap;
pub mod compare;
mod error;
pub mod layout;
pub mod raster;
pub mod render;
pub mod scene;
pub mod state;

#[cfg(feature = "viewer")]
mod app;

pub use binding::{interact, ComparisonSession, ControlSurface, ScriptedSurface};
pub use canvas::{Canvas, FigureSize, PanelId};
pub use compare::{compare, CompareParams, Comparator, Comparison};
pub use error::{ViewError, ViewResult};
pub use layout::{select_arrangement, Arrangement, Layout};
pub use render::RenderOptions;

#[cfg(feature = "viewer")]
pub use app::{run_viewer, ComparisonApp, EguiSurface, ViewerConfig};
