use serde::{Deserialize, Serialize};

use crate::cartesian::Envelope;
use crate::geometry::Geometry;
use crate::geometry_type::GeometryType;
use crate::impls::contour::LinearRing;

/// Polygon with exactly one exterior ring and zero or more holes.
///
/// An empty polygon has an exterior ring without points and no holes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Polygon {
    exterior: LinearRing,
    interiors: Vec<LinearRing>,
}

impl Polygon {
    /// Creates a new polygon.
    pub fn new(exterior: LinearRing, interiors: Vec<LinearRing>) -> Self {
        Self {
            exterior,
            interiors,
        }
    }

    /// Creates an empty polygon.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Exterior ring.
    pub fn exterior(&self) -> &LinearRing {
        &self.exterior
    }

    /// Holes of the polygon.
    pub fn interiors(&self) -> &[LinearRing] {
        &self.interiors
    }

    /// Copies contours of any other polygon.
    pub fn from_polygon(polygon: &impl crate::polygon::Polygon) -> Self {
        Self {
            exterior: LinearRing::from_contour(polygon.outer_contour()),
            interiors: polygon
                .inner_contours()
                .map(LinearRing::from_contour)
                .collect(),
        }
    }
}

impl crate::polygon::Polygon for Polygon {
    type Contour = LinearRing;

    fn outer_contour(&self) -> &Self::Contour {
        &self.exterior
    }

    fn inner_contours(&self) -> impl Iterator<Item = &'_ Self::Contour> {
        self.interiors.iter()
    }
}

impl From<LinearRing> for Polygon {
    fn from(value: LinearRing) -> Self {
        Self {
            exterior: value,
            interiors: vec![],
        }
    }
}

impl Geometry for Polygon {
    fn geometry_type(&self) -> GeometryType {
        GeometryType::Polygon
    }

    fn envelope(&self) -> Option<Envelope> {
        Envelope::of_polygon(self)
    }

    fn is_empty(&self) -> bool {
        self.exterior.is_empty() && self.interiors.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cartesian::Coord;

    #[test]
    fn empty_polygon_has_empty_exterior() {
        let polygon = Polygon::empty();
        assert!(polygon.is_empty());
        assert!(polygon.exterior().is_empty());
        assert!(polygon.interiors().is_empty());
        assert_eq!(polygon.envelope(), None);
    }

    #[test]
    fn envelope_covers_holes() {
        let polygon = Polygon::new(
            LinearRing::new(vec![
                Coord::new(0.0, 0.0),
                Coord::new(10.0, 0.0),
                Coord::new(0.0, 10.0),
                Coord::new(0.0, 0.0),
            ]),
            vec![LinearRing::new(vec![
                Coord::new(5.0, 5.0),
                Coord::new(7.0, 5.0),
                Coord::new(7.0, 7.0),
                Coord::new(5.0, 5.0),
            ])],
        );
        assert_eq!(polygon.envelope(), Some(Envelope::new(0.0, 0.0, 10.0, 10.0)));
        assert_eq!(polygon.interiors().len(), 1);
    }
}
