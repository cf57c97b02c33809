//! Error types for imgcmp-core operations.
//!
//! # Overview
//!
//! The [`Error`] enum covers the failure modes of building and pairing images:
//! - Shape validation (zero-sized axes, buffer length)
//! - Pairing two images that must share a shape
//!
//! # Usage
//!
//! ```rust
//! use imgcmp_core::{Error, Shape};
//!
//! let err = Error::shape_mismatch(Shape::new(10, 10), Shape::new(10, 11));
//! assert!(err.is_shape_mismatch());
//! assert!(err.to_string().contains("(10, 11)"));
//! ```
//!
//! # Used By
//!
//! - [`crate::image::Image`] - Construction checks
//! - `imgcmp-ops` - Wrapped in `OpsError::Core`
//! - `imgcmp-view` - Surfaced through `ViewError`

use crate::Shape;
use thiserror::Error;

/// Result type alias using [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building or pairing images.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// Two images that must be compared element-wise have different shapes.
    ///
    /// This is never corrected (no cropping, no resampling): the caller gets
    /// the failure before any work is done.
    #[error("shape mismatch: {a} vs {b}")]
    ShapeMismatch {
        /// Shape of the first image
        a: Shape,
        /// Shape of the second image
        b: Shape,
    },

    /// Shape has a zero-length axis.
    #[error("invalid shape {shape}: {reason}")]
    InvalidShape {
        /// Offending shape
        shape: Shape,
        /// Why it was rejected
        reason: String,
    },

    /// Sample buffer length does not match the shape.
    #[error("shape {shape} needs {expected} samples, got {got}")]
    DataLength {
        /// Target shape
        shape: Shape,
        /// Samples required by the shape
        expected: usize,
        /// Samples supplied
        got: usize,
    },

    /// Generic error with custom message.
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Creates an [`Error::ShapeMismatch`] error.
    #[inline]
    pub fn shape_mismatch(a: Shape, b: Shape) -> Self {
        Self::ShapeMismatch { a, b }
    }

    /// Creates an [`Error::InvalidShape`] error.
    #[inline]
    pub fn invalid_shape(shape: Shape, reason: impl Into<String>) -> Self {
        Self::InvalidShape {
            shape,
            reason: reason.into(),
        }
    }

    /// Creates an [`Error::Other`] error.
    #[inline]
    pub fn other(msg: impl Into<String>) -> Self {
        Self::Other(msg.into())
    }

    /// Returns `true` if this is a shape mismatch between two images.
    #[inline]
    pub fn is_shape_mismatch(&self) -> bool {
        matches!(self, Self::ShapeMismatch { .. })
    }
}
