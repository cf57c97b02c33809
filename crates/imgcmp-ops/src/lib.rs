//! # imgcmp-ops
//!
//! Numeric side of an A/B image comparison.
//!
//! # Modules
//!
//! - [`transform`] - Comparison transforms `C = f(A, B, alpha)`
//! - [`registry`] - Fixed name -> transform mapping used for selection
//! - [`range`] - Shared display intensity range computed from the sources
//!
//! # Example
//!
//! ```rust
//! use imgcmp_core::{Image, Shape};
//! use imgcmp_ops::{ColorRange, Registry};
//!
//! let a = Image::zeros(Shape::new(4, 4)).unwrap();
//! let b = Image::filled(Shape::new(4, 4), 1.0).unwrap();
//!
//! let blend = Registry::builtin().get("blend").unwrap();
//! let c = blend(&a, &b, 0.25).unwrap();
//! assert!(c.data().iter().all(|&v| v == 0.25));
//!
//! let range = ColorRange::of_sources(&a, &b).unwrap();
//! assert_eq!((range.min, range.max), (0.0, 1.0));
//! ```
//!
//! # Feature Flags
//!
//! - `parallel` (default) - Split per-row work across the rayon pool

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
mod rows;
pub mod range;
pub mod registry;
pub mod transform;

pub use error::{OpsError, OpsResult};
pub use range::ColorRange;
pub use registry::Registry;
pub use transform::TransformFn;
