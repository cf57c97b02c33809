//! # imgcmp-core
//!
//! Core types for side-by-side image comparison.
//!
//! This crate provides the foundational types used throughout the imgcmp workspace:
//!
//! - [`Image`] - Immutable, cheaply clonable sample buffer (2-D or channeled)
//! - [`Shape`] - Rows x cols (x channels) descriptor with array-style equality
//! - [`Region`] - Fractional figure geometry used by the panel layouts
//! - [`Error`] - Shared error type for shape and buffer validation
//!
//! ## Crate Structure
//!
//! This crate has no internal dependencies. All other imgcmp crates build on it:
//!
//! ```text
//! imgcmp-core (this crate)
//!    ^
//!    |
//!    +-- imgcmp-ops (transforms, registry, color range)
//!    +-- imgcmp-view (layout, canvas, renderer, orchestration, binding)
//!    +-- imgcmp-cli (loading, `imgcmp` binary)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use imgcmp_core::{Image, Shape};
//!
//! let a = Image::zeros(Shape::new(4, 4)).unwrap();
//! let b = Image::filled(Shape::new(4, 4), 1.0).unwrap();
//! assert!(imgcmp_core::ensure_same_shape(&a, &b).is_ok());
//! assert_eq!(a.aspect_ratio(), 1.0);
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod error;
pub mod image;
pub mod region;

pub use error::{Error, Result};
pub use image::{ensure_same_shape, Image, Shape};
pub use region::{PixelRect, Region};
