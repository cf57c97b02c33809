//! Layout selection.
//!
//! A comparison is drawn in one of three [`Arrangement`]s. The requested
//! [`Layout`] is either one of them verbatim or [`Layout::Auto`], which picks
//! from the aspect ratio (rows / cols) of the comparison image:
//!
//! | Aspect ratio      | Arrangement |
//! |-------------------|-------------|
//! | `ar > 3`          | `Tall`      |
//! | `ar < 1/3`        | `Wide`      |
//! | otherwise         | `Square`    |
//!
//! Both thresholds are strict, so `ar == 3` and `ar == 1/3` are square.

use std::fmt;
use std::str::FromStr;

use imgcmp_core::Image;

use crate::{ViewError, ViewResult};

/// Aspect ratio above which images are stacked in a column.
pub const TALL_ASPECT: f64 = 3.0;

/// Aspect ratio below which images are stacked in a row.
pub const WIDE_ASPECT: f64 = 1.0 / 3.0;

/// Requested panel layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Layout {
    /// Pick from the comparison image's aspect ratio.
    #[default]
    Auto,
    /// Large comparison panel with A and B stacked beside it.
    Square,
    /// Three panels in one column.
    Tall,
    /// Three panels in one row.
    Wide,
}

impl Layout {
    /// Every layout, in declaration order.
    pub const fn all() -> &'static [Self] {
        &[Self::Auto, Self::Square, Self::Tall, Self::Wide]
    }

    /// Layouts offered as a manual choice by the interactive binding.
    ///
    /// `Square` is only reachable through `Auto` there.
    pub const fn interactive_choices() -> &'static [Self] {
        &[Self::Auto, Self::Tall, Self::Wide]
    }

    /// Lowercase name used in selectors and on the command line.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Square => "square",
            Self::Tall => "tall",
            Self::Wide => "wide",
        }
    }

    /// Resolves against a comparison image.
    pub fn resolve(self, comparison: &Image) -> Arrangement {
        self.resolve_aspect(comparison.aspect_ratio())
    }

    /// Resolves against a raw aspect ratio (rows / cols).
    pub fn resolve_aspect(self, aspect: f64) -> Arrangement {
        match self {
            Self::Auto => select_arrangement(aspect),
            Self::Square => Arrangement::Square,
            Self::Tall => Arrangement::Tall,
            Self::Wide => Arrangement::Wide,
        }
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Layout {
    type Err = ViewError;

    fn from_str(s: &str) -> ViewResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "square" => Ok(Self::Square),
            "tall" => Ok(Self::Tall),
            "wide" => Ok(Self::Wide),
            _ => Err(ViewError::UnknownLayout(s.to_string())),
        }
    }
}

/// Resolved panel arrangement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Arrangement {
    /// Comparison on the left two thirds, A over B on the right third.
    Square,
    /// C, A, B top to bottom.
    Tall,
    /// C, A, B left to right.
    Wide,
}

impl Arrangement {
    /// Lowercase name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Square => "square",
            Self::Tall => "tall",
            Self::Wide => "wide",
        }
    }

    /// Grid shape `(rows, cols)` for the stacked arrangements.
    pub const fn grid(self) -> Option<(usize, usize)> {
        match self {
            Self::Square => None,
            Self::Tall => Some((3, 1)),
            Self::Wide => Some((1, 3)),
        }
    }
}

impl fmt::Display for Arrangement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Picks an arrangement from an aspect ratio (rows / cols).
///
/// ```rust
/// use imgcmp_view::layout::{select_arrangement, Arrangement};
///
/// assert_eq!(select_arrangement(4.0), Arrangement::Tall);
/// assert_eq!(select_arrangement(0.25), Arrangement::Wide);
/// assert_eq!(select_arrangement(3.0), Arrangement::Square);
/// ```
pub fn select_arrangement(aspect: f64) -> Arrangement {
    if aspect > TALL_ASPECT {
        Arrangement::Tall
    } else if aspect < WIDE_ASPECT {
        Arrangement::Wide
    } else {
        Arrangement::Square
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use imgcmp_core::Shape;

    #[test]
    fn test_thresholds() {
        assert_eq!(select_arrangement(4.0), Arrangement::Tall);
        assert_eq!(select_arrangement(0.25), Arrangement::Wide);
        assert_eq!(select_arrangement(1.0), Arrangement::Square);
    }

    #[test]
    fn test_boundaries_are_square() {
        assert_eq!(select_arrangement(3.0), Arrangement::Square);
        assert_eq!(select_arrangement(1.0 / 3.0), Arrangement::Square);
        assert_eq!(Layout::Auto.resolve_aspect(30.0 / 10.0), Arrangement::Square);
        assert_eq!(Layout::Auto.resolve_aspect(10.0 / 30.0), Arrangement::Square);
    }

    #[test]
    fn test_resolve_from_image() {
        let tall = Image::zeros(Shape::new(31, 10)).unwrap();
        let wide = Image::zeros(Shape::with_channels(10, 31, 3)).unwrap();
        let edge = Image::zeros(Shape::new(30, 10)).unwrap();
        assert_eq!(Layout::Auto.resolve(&tall), Arrangement::Tall);
        assert_eq!(Layout::Auto.resolve(&wide), Arrangement::Wide);
        assert_eq!(Layout::Auto.resolve(&edge), Arrangement::Square);
    }

    #[test]
    fn test_explicit_layout_bypasses_rule() {
        assert_eq!(Layout::Wide.resolve_aspect(10.0), Arrangement::Wide);
        assert_eq!(Layout::Tall.resolve_aspect(0.01), Arrangement::Tall);
        assert_eq!(Layout::Square.resolve_aspect(100.0), Arrangement::Square);
    }

    #[test]
    fn test_parse() {
        for &layout in Layout::all() {
            assert_eq!(layout.name().parse::<Layout>().unwrap(), layout);
        }
        assert_eq!(" Wide ".parse::<Layout>().unwrap(), Layout::Wide);
        assert!(matches!(
            "diagonal".parse::<Layout>(),
            Err(ViewError::UnknownLayout(s)) if s == "diagonal"
        ));
    }

    #[test]
    fn test_interactive_choices_exclude_square() {
        assert!(!Layout::interactive_choices().contains(&Layout::Square));
        assert_eq!(Layout::interactive_choices().len(), 3);
    }

    #[test]
    fn test_grid_shapes() {
        assert_eq!(Arrangement::Wide.grid(), Some((1, 3)));
        assert_eq!(Arrangement::Tall.grid(), Some((3, 1)));
        assert_eq!(Arrangement::Square.grid(), None);
    }
}
