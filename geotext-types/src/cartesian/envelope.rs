use serde::{Deserialize, Serialize};

use crate::cartesian::{CartesianPoint2d, Coord};
use crate::contour::Contour;
use crate::multi_contour::MultiContour;
use crate::multi_point::MultiPoint;
use crate::multi_polygon::MultiPolygon;
use crate::polygon::Polygon;

/// Axis-aligned bounding rectangle of a geometry or a set of geometries.
///
/// An envelope always covers at least one point, so there is no "empty" envelope value. Places that need
/// an accumulator which is undefined until the first geometry is merged in use `Option<Envelope>` together
/// with [`merge_envelopes`].
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    x_min: f64,
    y_min: f64,
    x_max: f64,
    y_max: f64,
}

impl Envelope {
    /// Creates a new envelope. If the bounds are given in reverse order, they are swapped.
    pub fn new(x_min: f64, y_min: f64, x_max: f64, y_max: f64) -> Self {
        Self {
            x_min: x_min.min(x_max),
            y_min: y_min.min(y_max),
            x_max: x_min.max(x_max),
            y_max: y_min.max(y_max),
        }
    }

    /// Minimum x coordinate.
    pub fn x_min(&self) -> f64 {
        self.x_min
    }

    /// Maximum x coordinate.
    pub fn x_max(&self) -> f64 {
        self.x_max
    }

    /// Minimum y coordinate.
    pub fn y_min(&self) -> f64 {
        self.y_min
    }

    /// Maximum y coordinate.
    pub fn y_max(&self) -> f64 {
        self.y_max
    }

    /// Width of the envelope.
    pub fn width(&self) -> f64 {
        self.x_max - self.x_min
    }

    /// Height of the envelope.
    pub fn height(&self) -> f64 {
        self.y_max - self.y_min
    }

    /// Center point of the envelope.
    pub fn center(&self) -> Coord {
        Coord::new(
            (self.x_min + self.x_max) / 2.0,
            (self.y_min + self.y_max) / 2.0,
        )
    }

    /// Returns the smallest envelope covering both `self` and `other`.
    ///
    /// The operation is commutative and associative.
    pub fn merge(&self, other: Self) -> Self {
        Self {
            x_min: self.x_min.min(other.x_min),
            y_min: self.y_min.min(other.y_min),
            x_max: self.x_max.max(other.x_max),
            y_max: self.y_max.max(other.y_max),
        }
    }

    /// Envelope of a single point.
    pub fn from_point(p: &impl CartesianPoint2d) -> Self {
        Self {
            x_min: p.x(),
            x_max: p.x(),
            y_min: p.y(),
            y_max: p.y(),
        }
    }

    /// Envelope of a set of points. Returns `None` if the iterator is empty.
    pub fn from_points<'a, P: CartesianPoint2d + 'a>(
        points: impl IntoIterator<Item = &'a P>,
    ) -> Option<Self> {
        let mut points = points.into_iter();
        let first = points.next()?;
        let mut x_min = first.x();
        let mut y_min = first.y();
        let mut x_max = first.x();
        let mut y_max = first.y();

        for p in points {
            if x_min > p.x() {
                x_min = p.x();
            }
            if y_min > p.y() {
                y_min = p.y();
            }
            if x_max < p.x() {
                x_max = p.x();
            }
            if y_max < p.y() {
                y_max = p.y();
            }
        }

        Some(Self {
            x_min,
            y_min,
            x_max,
            y_max,
        })
    }

    /// Union of all envelopes in the iterator. Returns `None` if the iterator is empty.
    pub fn union_all(envelopes: impl IntoIterator<Item = Envelope>) -> Option<Self> {
        envelopes
            .into_iter()
            .fold(None, |acc, envelope| merge_envelopes(acc, Some(envelope)))
    }

    /// Envelope of all points of a contour.
    pub fn of_contour(contour: &impl Contour) -> Option<Self> {
        Self::from_points(contour.iter_points())
    }

    /// Envelope of all the contours of a polygon, including holes.
    pub fn of_polygon(polygon: &impl Polygon) -> Option<Self> {
        Self::union_all(polygon.iter_contours().filter_map(Self::of_contour))
    }

    /// Envelope of all non-empty points of a multipoint.
    pub fn of_multi_point(multi_point: &impl MultiPoint) -> Option<Self> {
        Self::from_points(multi_point.iter_points())
    }

    /// Envelope of all contours of a multi-contour.
    pub fn of_multi_contour(multi_contour: &impl MultiContour) -> Option<Self> {
        Self::union_all(multi_contour.contours().filter_map(Self::of_contour))
    }

    /// Envelope of all polygons of a multipolygon.
    pub fn of_multi_polygon(multi_polygon: &impl MultiPolygon) -> Option<Self> {
        Self::union_all(multi_polygon.polygons().filter_map(Self::of_polygon))
    }

    /// Returns true if the point is inside the envelope or on its border.
    pub fn contains(&self, point: &impl CartesianPoint2d) -> bool {
        self.x_min <= point.x()
            && self.x_max >= point.x()
            && self.y_min <= point.y()
            && self.y_max >= point.y()
    }

    /// Returns true if two envelopes share at least one point. Envelopes that only touch by an edge or a
    /// corner intersect.
    pub fn intersects(&self, other: &Envelope) -> bool {
        self.x_min <= other.x_max
            && other.x_min <= self.x_max
            && self.y_min <= other.y_max
            && other.y_min <= self.y_max
    }

    /// Returns the overlapping part of two envelopes, or `None` if they do not intersect.
    pub fn intersection(&self, other: &Envelope) -> Option<Self> {
        if !self.intersects(other) {
            return None;
        }

        Some(Self {
            x_min: self.x_min.max(other.x_min),
            y_min: self.y_min.max(other.y_min),
            x_max: self.x_max.min(other.x_max),
            y_max: self.y_max.min(other.y_max),
        })
    }
}

/// Merges two optional envelopes. An undefined (`None`) envelope is the neutral element of the operation.
pub fn merge_envelopes(a: Option<Envelope>, b: Option<Envelope>) -> Option<Envelope> {
    match (a, b) {
        (Some(a), Some(b)) => Some(a.merge(b)),
        (Some(v), None) | (None, Some(v)) => Some(v),
        (None, None) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn samples() -> [Envelope; 4] {
        [
            Envelope::new(0.0, 0.0, 10.0, 10.0),
            Envelope::new(-5.0, 3.0, 2.0, 4.0),
            Envelope::new(20.0, -7.5, 21.0, 100.0),
            Envelope::new(1.0, 1.0, 1.0, 1.0),
        ]
    }

    #[test]
    fn new_normalizes_bounds() {
        let envelope = Envelope::new(10.0, 5.0, 0.0, -5.0);
        assert_eq!(envelope, Envelope::new(0.0, -5.0, 10.0, 5.0));
        assert_eq!(envelope.width(), 10.0);
        assert_eq!(envelope.height(), 10.0);
        assert_eq!(envelope.center(), Coord::new(5.0, 0.0));
    }

    #[test]
    fn merge_is_commutative_and_associative() {
        let samples = samples();
        for a in samples {
            for b in samples {
                assert_eq!(a.merge(b), b.merge(a));
                for c in samples {
                    assert_eq!(a.merge(b).merge(c), a.merge(b.merge(c)));
                }
            }
        }
    }

    #[test]
    fn merge_with_undefined() {
        let a = Envelope::new(0.0, 0.0, 1.0, 1.0);
        assert_eq!(merge_envelopes(None, None), None);
        assert_eq!(merge_envelopes(Some(a), None), Some(a));
        assert_eq!(merge_envelopes(None, Some(a)), Some(a));
        assert_eq!(Envelope::union_all([]), None);
        assert_eq!(
            Envelope::union_all(samples()),
            Some(Envelope::new(-5.0, -7.5, 21.0, 100.0))
        );
    }

    #[test]
    fn from_points() {
        let points = [
            Coord::new(3.0, -1.0),
            Coord::new(-2.0, 4.0),
            Coord::new(0.0, 0.0),
        ];
        assert_eq!(
            Envelope::from_points(&points),
            Some(Envelope::new(-2.0, -1.0, 3.0, 4.0))
        );
        assert_eq!(Envelope::from_points(&[] as &[Coord]), None);
    }

    #[test]
    fn intersects_includes_touching_edges() {
        let a = Envelope::new(0.0, 0.0, 10.0, 10.0);
        assert!(a.intersects(&Envelope::new(10.0, 10.0, 20.0, 20.0)));
        assert!(a.intersects(&Envelope::new(10.0, 0.0, 20.0, 10.0)));
        assert!(a.intersects(&Envelope::new(2.0, 2.0, 3.0, 3.0)));
        assert!(a.intersects(&a));
        assert!(!a.intersects(&Envelope::new(10.1, 0.0, 20.0, 10.0)));
        assert!(!a.intersects(&Envelope::new(0.0, -5.0, 10.0, -0.1)));
    }

    #[test]
    fn intersection() {
        let a = Envelope::new(0.0, 0.0, 10.0, 10.0);
        let b = Envelope::new(5.0, -5.0, 15.0, 5.0);
        assert_eq!(a.intersection(&b), Some(Envelope::new(5.0, 0.0, 10.0, 5.0)));
        assert_eq!(a.intersection(&Envelope::new(11.0, 11.0, 12.0, 12.0)), None);
    }

    #[test]
    fn contains_point() {
        let a = Envelope::new(0.0, 0.0, 10.0, 10.0);
        assert!(a.contains(&Coord::new(10.0, 0.0)));
        assert!(!a.contains(&Coord::new(10.0, -0.5)));
    }
}
