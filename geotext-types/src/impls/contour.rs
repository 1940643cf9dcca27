use serde::{Deserialize, Serialize};

use crate::cartesian::{Coord, Envelope};
use crate::geometry::Geometry;
use crate::geometry_type::GeometryType;

/// Open or closed sequence of points (OGC `LineString`).
///
/// There is no restriction on the number of points: an empty line string and a line string with a single
/// point are both valid values of this type.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineString {
    points: Vec<Coord>,
}

/// Sequence of points used as a polygon boundary (OGC `LinearRing`).
///
/// Closure (first point equal to the last one) is not enforced. Use
/// [`Contour::is_closed`](crate::Contour::is_closed) if the target profile requires it.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearRing {
    points: Vec<Coord>,
}

macro_rules! impl_contour {
    ($contour:ident) => {
        impl $contour {
            /// Creates a new contour from the given points.
            pub fn new(points: Vec<Coord>) -> Self {
                Self { points }
            }

            /// Points of the contour.
            pub fn points(&self) -> &[Coord] {
                &self.points
            }

            /// Consumes the contour returning its points.
            pub fn into_points(self) -> Vec<Coord> {
                self.points
            }

            /// Copies points of any other contour.
            pub fn from_contour(contour: &impl crate::contour::Contour) -> Self {
                Self {
                    points: contour.iter_points().map(Coord::from_point).collect(),
                }
            }
        }

        impl std::ops::Deref for $contour {
            type Target = [Coord];

            fn deref(&self) -> &Self::Target {
                &self.points
            }
        }

        impl From<Vec<Coord>> for $contour {
            fn from(points: Vec<Coord>) -> Self {
                Self { points }
            }
        }

        impl FromIterator<Coord> for $contour {
            fn from_iter<T: IntoIterator<Item = Coord>>(iter: T) -> Self {
                Self {
                    points: iter.into_iter().collect(),
                }
            }
        }

        impl crate::contour::Contour for $contour {
            type Point = Coord;

            fn iter_points(&self) -> impl Iterator<Item = &'_ Coord> {
                self.points.iter()
            }

            fn point_count(&self) -> usize {
                self.points.len()
            }
        }
    };
}

impl_contour!(LineString);
impl_contour!(LinearRing);

impl From<LinearRing> for LineString {
    fn from(value: LinearRing) -> Self {
        Self {
            points: value.points,
        }
    }
}

impl From<LineString> for LinearRing {
    fn from(value: LineString) -> Self {
        Self {
            points: value.points,
        }
    }
}

impl Geometry for LineString {
    fn geometry_type(&self) -> GeometryType {
        GeometryType::LineString
    }

    fn envelope(&self) -> Option<Envelope> {
        Envelope::of_contour(self)
    }

    fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contour::Contour;

    fn square() -> LinearRing {
        LinearRing::new(vec![
            Coord::new(0.0, 0.0),
            Coord::new(10.0, 0.0),
            Coord::new(10.0, 10.0),
            Coord::new(0.0, 10.0),
            Coord::new(0.0, 0.0),
        ])
    }

    #[test]
    fn closure_is_reported_not_enforced() {
        assert!(square().is_closed());

        let open = LinearRing::new(square()[..4].to_vec());
        assert!(!open.is_closed());
        assert_eq!(open.point_count(), 4);

        assert!(!LineString::default().is_closed());
        assert!(!LineString::new(vec![Coord::new(1.0, 1.0)]).is_closed());
    }

    #[test]
    fn line_string_envelope() {
        let line: LineString = [(0.0, 0.0), (10.0, 10.0), (20.0, 25.0), (50.0, 60.0)]
            .into_iter()
            .map(Coord::from)
            .collect();
        assert_eq!(line.len(), 4);
        assert_eq!(line.envelope(), Some(Envelope::new(0.0, 0.0, 50.0, 60.0)));
        assert_eq!(LineString::default().envelope(), None);
    }
}
