//! Error types for comparison operations.

use thiserror::Error;

/// Error type for comparison operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum OpsError {
    /// Image construction or shape pairing failed.
    #[error(transparent)]
    Core(#[from] imgcmp_core::Error),

    /// Requested transform name is not in the registry.
    #[error("unknown comparison method '{name}' (available: {})", available.join(", "))]
    UnknownMethod {
        /// Name that was requested
        name: String,
        /// Names the registry offers
        available: Vec<String>,
    },

    /// Source images contain no comparable samples (every value is NaN).
    #[error("cannot derive a color range: every source sample is NaN")]
    EmptyRange,
}

impl OpsError {
    /// Returns `true` if this wraps a shape mismatch between the two sources.
    pub fn is_shape_mismatch(&self) -> bool {
        matches!(self, Self::Core(e) if e.is_shape_mismatch())
    }
}

/// Result type for comparison operations.
pub type OpsResult<T> = Result<T, OpsError>;
