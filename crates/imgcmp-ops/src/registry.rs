//! Name -> transform mapping.
//!
//! The registry is the single place a comparison method is chosen by name.
//! Control surfaces enumerate [`Registry::names`] to build their selector, and
//! the orchestrator resolves the selected name with [`Registry::get`]. An
//! unknown name is an error; there is no default fallback.
//!
//! # Example
//!
//! ```rust
//! use imgcmp_ops::Registry;
//!
//! let registry = Registry::builtin();
//! assert_eq!(
//!     registry.names().collect::<Vec<_>>(),
//!     ["blend", "diff", "horizontal_shade", "vertical_shade"]
//! );
//! assert!(registry.get("sharpen").is_err());
//! ```

use crate::transform::{self, TransformFn};
use crate::{OpsError, OpsResult};
use imgcmp_core::Image;
use tracing::debug;

/// Name of the blend transform.
pub const BLEND: &str = "blend";
/// Name of the difference transform.
pub const DIFF: &str = "diff";
/// Name of the horizontal shade transform.
pub const HORIZONTAL_SHADE: &str = "horizontal_shade";
/// Name of the vertical shade transform.
pub const VERTICAL_SHADE: &str = "vertical_shade";

const BUILTIN: &[(&str, TransformFn)] = &[
    (BLEND, transform::blend),
    (DIFF, transform::difference),
    (HORIZONTAL_SHADE, transform::horizontal_shade),
    (VERTICAL_SHADE, transform::vertical_shade),
];

/// Fixed, ordered set of named comparison transforms.
#[derive(Clone, Copy)]
pub struct Registry {
    entries: &'static [(&'static str, TransformFn)],
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}

impl Registry {
    /// The built-in transforms, in selector order.
    pub const fn builtin() -> Self {
        Self { entries: BUILTIN }
    }

    /// Looks up a transform by name.
    ///
    /// # Errors
    ///
    /// [`OpsError::UnknownMethod`] listing the available names.
    pub fn get(&self, name: &str) -> OpsResult<TransformFn> {
        self.entries
            .iter()
            .find(|(n, _)| *n == name)
            .map(|&(_, f)| f)
            .ok_or_else(|| OpsError::UnknownMethod {
                name: name.to_string(),
                available: self.names().map(String::from).collect(),
            })
    }

    /// Returns `true` if `name` is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|(n, _)| *n == name)
    }

    /// Registered names, in selector order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|&(n, _)| n)
    }

    /// Number of registered transforms.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always `false` for the built-in registry.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Resolves `name` and applies it in one step.
    pub fn apply(&self, name: &str, a: &Image, b: &Image, alpha: f64) -> OpsResult<Image> {
        let f = self.get(name)?;
        debug!(method = name, alpha, "Applying comparison transform");
        f(a, b, alpha)
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use imgcmp_core::Shape;

    #[test]
    fn test_builtin_names() {
        let r = Registry::builtin();
        assert_eq!(r.len(), 4);
        for name in [BLEND, DIFF, HORIZONTAL_SHADE, VERTICAL_SHADE] {
            assert!(r.contains(name));
            assert!(r.get(name).is_ok());
        }
    }

    #[test]
    fn test_unknown_name_fails() {
        let Err(err) = Registry::builtin().get("Blend") else {
            panic!("lookup is case-sensitive");
        };
        match &err {
            OpsError::UnknownMethod { name, available } => {
                assert_eq!(name, "Blend");
                assert_eq!(available.len(), 4);
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(err.to_string().contains("horizontal_shade"));
    }

    #[test]
    fn test_apply_dispatches_by_name() {
        let a = Image::filled(Shape::new(2, 2), 3.0).unwrap();
        let b = Image::filled(Shape::new(2, 2), 1.0).unwrap();
        let r = Registry::builtin();
        assert!(r.apply(DIFF, &a, &b, 0.9).unwrap().data().iter().all(|&v| v == 2.0));
        assert_eq!(r.apply(HORIZONTAL_SHADE, &a, &b, 1.0).unwrap(), a);
        assert!(r.apply("nope", &a, &b, 0.5).is_err());
    }
}
