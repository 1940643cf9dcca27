use serde::{Deserialize, Serialize};

use crate::cartesian::{Coord, Envelope};
use crate::geometry::Geometry;
use crate::geometry_type::GeometryType;
use crate::impls::point::Point;

/// A set of points.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MultiPoint(Vec<Point>);

impl MultiPoint {
    /// Returns reference to the inner points.
    pub fn parts(&self) -> &[Point] {
        &self.0
    }
}

impl crate::multi_point::MultiPoint for MultiPoint {
    type Point = Coord;

    fn iter_points(&self) -> impl Iterator<Item = &'_ Self::Point> {
        self.0.iter().filter_map(Point::coord_ref)
    }
}

impl From<Vec<Point>> for MultiPoint {
    fn from(value: Vec<Point>) -> Self {
        Self(value)
    }
}

impl FromIterator<Point> for MultiPoint {
    fn from_iter<T: IntoIterator<Item = Point>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Geometry for MultiPoint {
    fn geometry_type(&self) -> GeometryType {
        GeometryType::MultiPoint
    }

    fn envelope(&self) -> Option<Envelope> {
        Envelope::of_multi_point(self)
    }

    fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
