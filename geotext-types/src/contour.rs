//! Contour is a sequence of points.
//!
//! Both OGC `LineString` and `LinearRing` are represented by the [`Contour`] trait. Unlike some geometry
//! libraries, this crate keeps the points exactly as they were read: a closed contour has its first point
//! repeated at the end, and nothing is appended or removed to make a contour closed.

use crate::cartesian::CartesianPoint2d;

/// Sequence of points. See module level documentation for details.
pub trait Contour {
    /// Type of the points the contour is consisted of.
    type Point: CartesianPoint2d;

    /// Iterate over the points of the contour.
    fn iter_points(&self) -> impl Iterator<Item = &'_ Self::Point>;

    /// Whether the contour is closed, i.e. has at least two points and the last point is exactly equal to
    /// the first one.
    fn is_closed(&self) -> bool {
        let mut points = self.iter_points();
        let Some(first) = points.next() else {
            return false;
        };

        match points.last() {
            Some(last) => first.equal(last),
            None => false,
        }
    }

    /// Number of points in the contour.
    fn point_count(&self) -> usize {
        self.iter_points().count()
    }
}
