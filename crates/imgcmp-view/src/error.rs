//! Error type for layout, rendering and binding.

use std::path::PathBuf;
use thiserror::Error;

use imgcmp_ops::OpsError;

/// Errors raised while orchestrating or drawing a comparison.
#[derive(Debug, Error)]
pub enum ViewError {
    /// Source pairing or image construction failed.
    #[error(transparent)]
    Core(#[from] imgcmp_core::Error),

    /// Transform lookup, transform or color range failed.
    #[error(transparent)]
    Ops(#[from] OpsError),

    /// Layout name is not one of `auto`, `square`, `tall`, `wide`.
    #[error("unknown layout '{0}' (expected one of: auto, square, tall, wide)")]
    UnknownLayout(String),

    /// A control-surface value has the wrong kind or is not an allowed choice.
    #[error("invalid parameter '{name}': {reason}")]
    InvalidParameter {
        /// Parameter name
        name: String,
        /// Why it was rejected
        reason: String,
    },

    /// The image has a channel count no canvas can display.
    #[error("cannot display {0} channels (expected 1, 2, 3 or 4)")]
    UnsupportedChannels(usize),

    /// Canvas misuse or backend failure.
    #[error("canvas: {0}")]
    Canvas(String),

    /// Writing rendered output failed.
    #[error("failed to save {path}: {source}")]
    Save {
        /// Output path
        path: PathBuf,
        /// Encoder error
        #[source]
        source: image::ImageError,
    },
}

impl ViewError {
    /// Creates an [`ViewError::InvalidParameter`] error.
    pub fn invalid_parameter(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Returns `true` if the two sources had different shapes.
    pub fn is_shape_mismatch(&self) -> bool {
        match self {
            Self::Core(e) => e.is_shape_mismatch(),
            Self::Ops(e) => e.is_shape_mismatch(),
            _ => false,
        }
    }

    /// Returns `true` if the requested comparison method was not registered.
    pub const fn is_unknown_method(&self) -> bool {
        matches!(self, Self::Ops(OpsError::UnknownMethod { .. }))
    }
}

/// Result type for view operations.
pub type ViewResult<T> = Result<T, ViewError>;
