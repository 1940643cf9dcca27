//! [`Geom`] enum and the [`Geometry`] trait.

use serde::{Deserialize, Serialize};

use crate::cartesian::Envelope;
use crate::geometry_type::GeometryType;
use crate::impls::{
    GeometryCollection, LineString, MultiLineString, MultiPoint, MultiPolygon, Point, Polygon,
};

/// Common operations on all geometry types.
pub trait Geometry {
    /// Type of the geometry.
    fn geometry_type(&self) -> GeometryType;

    /// Bounding envelope of the geometry. Returns `None` if the geometry contains no points.
    fn envelope(&self) -> Option<Envelope>;

    /// Returns true if the geometry contains no elements.
    fn is_empty(&self) -> bool;
}

/// Any geometry supported by the crate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Geom {
    /// Point.
    Point(Point),
    /// Line string.
    LineString(LineString),
    /// Polygon.
    Polygon(Polygon),
    /// Set of points.
    MultiPoint(MultiPoint),
    /// Set of line strings.
    MultiLineString(MultiLineString),
    /// Set of polygons.
    MultiPolygon(MultiPolygon),
    /// Set of any geometries.
    GeometryCollection(GeometryCollection),
}

impl Geometry for Geom {
    fn geometry_type(&self) -> GeometryType {
        match self {
            Geom::Point(v) => v.geometry_type(),
            Geom::LineString(v) => v.geometry_type(),
            Geom::Polygon(v) => v.geometry_type(),
            Geom::MultiPoint(v) => v.geometry_type(),
            Geom::MultiLineString(v) => v.geometry_type(),
            Geom::MultiPolygon(v) => v.geometry_type(),
            Geom::GeometryCollection(v) => v.geometry_type(),
        }
    }

    fn envelope(&self) -> Option<Envelope> {
        match self {
            Geom::Point(v) => v.envelope(),
            Geom::LineString(v) => v.envelope(),
            Geom::Polygon(v) => v.envelope(),
            Geom::MultiPoint(v) => v.envelope(),
            Geom::MultiLineString(v) => v.envelope(),
            Geom::MultiPolygon(v) => v.envelope(),
            Geom::GeometryCollection(v) => v.envelope(),
        }
    }

    fn is_empty(&self) -> bool {
        match self {
            Geom::Point(v) => v.is_empty(),
            Geom::LineString(v) => Geometry::is_empty(v),
            Geom::Polygon(v) => v.is_empty(),
            Geom::MultiPoint(v) => v.is_empty(),
            Geom::MultiLineString(v) => v.is_empty(),
            Geom::MultiPolygon(v) => v.is_empty(),
            Geom::GeometryCollection(v) => v.is_empty(),
        }
    }
}

macro_rules! impl_from {
    ($geom:ident) => {
        impl From<$geom> for Geom {
            fn from(value: $geom) -> Self {
                Self::$geom(value)
            }
        }
    };
}

impl_from!(Point);
impl_from!(LineString);
impl_from!(Polygon);
impl_from!(MultiPoint);
impl_from!(MultiLineString);
impl_from!(MultiPolygon);
impl_from!(GeometryCollection);
