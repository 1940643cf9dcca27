//! Multipoint geometry trait.

use crate::cartesian::CartesianPoint2d;

/// Geometry consisting of several points.
pub trait MultiPoint {
    /// Point type.
    type Point: CartesianPoint2d;

    /// Iterates over the points. Empty points, if the implementation can contain them, are skipped.
    fn iter_points(&self) -> impl Iterator<Item = &'_ Self::Point>;
}
