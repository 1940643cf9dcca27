use serde::{Deserialize, Serialize};

use crate::cartesian::Envelope;
use crate::geometry::Geometry;
use crate::geometry_type::GeometryType;
use crate::impls::polygon::Polygon;

/// A set of polygons.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MultiPolygon(Vec<Polygon>);

impl MultiPolygon {
    /// Returns reference to the inner polygons.
    pub fn parts(&self) -> &[Polygon] {
        &self.0
    }
}

impl crate::multi_polygon::MultiPolygon for MultiPolygon {
    type Polygon = Polygon;

    fn polygons(&self) -> impl Iterator<Item = &Self::Polygon> {
        self.0.iter()
    }
}

impl From<Vec<Polygon>> for MultiPolygon {
    fn from(parts: Vec<Polygon>) -> Self {
        Self(parts)
    }
}

impl FromIterator<Polygon> for MultiPolygon {
    fn from_iter<T: IntoIterator<Item = Polygon>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Geometry for MultiPolygon {
    fn geometry_type(&self) -> GeometryType {
        GeometryType::MultiPolygon
    }

    fn envelope(&self) -> Option<Envelope> {
        Envelope::of_multi_polygon(self)
    }

    fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
