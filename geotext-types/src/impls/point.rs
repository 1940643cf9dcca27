use serde::{Deserialize, Serialize};

use crate::cartesian::{Coord, Envelope};
use crate::geometry::Geometry;
use crate::geometry_type::GeometryType;

/// Point geometry.
///
/// A point is either a position or explicitly empty (`POINT EMPTY` in WKT). An empty point is a distinct
/// value: it is never equal to a point at the origin.
#[derive(Debug, Default, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Point(Option<Coord>);

impl Point {
    /// Creates a point at the given position.
    pub const fn new(x: f64, y: f64) -> Self {
        Self(Some(Coord::new(x, y)))
    }

    /// Creates an empty point.
    pub const fn empty() -> Self {
        Self(None)
    }

    /// Position of the point, or `None` for an empty point.
    pub fn coord(&self) -> Option<Coord> {
        self.0
    }

    /// Reference to the position of the point, or `None` for an empty point.
    pub fn coord_ref(&self) -> Option<&Coord> {
        self.0.as_ref()
    }
}

impl From<Coord> for Point {
    fn from(value: Coord) -> Self {
        Self(Some(value))
    }
}

impl From<Option<Coord>> for Point {
    fn from(value: Option<Coord>) -> Self {
        Self(value)
    }
}

impl Geometry for Point {
    fn geometry_type(&self) -> GeometryType {
        GeometryType::Point
    }

    fn envelope(&self) -> Option<Envelope> {
        self.0.as_ref().map(Envelope::from_point)
    }

    fn is_empty(&self) -> bool {
        self.0.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_point_is_not_origin() {
        assert_ne!(Point::empty(), Point::new(0.0, 0.0));
        assert!(Point::empty().is_empty());
        assert!(!Point::new(0.0, 0.0).is_empty());
        assert_eq!(Point::empty().coord(), None);
        assert_eq!(Point::empty().envelope(), None);
        assert_eq!(
            Point::new(2.0, 3.0).envelope(),
            Some(Envelope::new(2.0, 3.0, 2.0, 3.0))
        );
    }
}
