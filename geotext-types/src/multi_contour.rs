//! Multi-contour geometry trait.

use crate::contour::Contour;

/// Geometry consisting of several contours.
pub trait MultiContour {
    /// Contour type.
    type Contour: Contour;

    /// Iterates over contours.
    fn contours(&self) -> impl Iterator<Item = &Self::Contour>;
}
