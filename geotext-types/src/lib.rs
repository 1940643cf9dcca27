//! Geometry model shared by the `geotext` readers.
//!
//! The crate follows the OGC Simple Features hierarchy, restricted to two dimensional geometries:
//!
//! * [`Point`](impls::Point), which can be explicitly empty,
//! * [`LineString`](impls::LineString) and [`LinearRing`](impls::LinearRing),
//! * [`Polygon`](impls::Polygon),
//! * [`MultiPoint`](impls::MultiPoint), [`MultiLineString`](impls::MultiLineString) and
//!   [`MultiPolygon`](impls::MultiPolygon),
//! * [`GeometryCollection`](impls::GeometryCollection).
//!
//! All of them can be wrapped into the [`Geom`] enum, and all of them implement the [`Geometry`] trait,
//! which gives access to the geometry type and its bounding [`Envelope`](cartesian::Envelope).
//!
//! Besides concrete types the crate defines a set of iteration traits ([`Contour`], [`Polygon`],
//! [`MultiPoint`], [`MultiContour`], [`MultiPolygon`]). Envelopes are computed through these traits, so
//! any type implementing them (e.g. `geo-types` geometries with the `geo-types` feature) can be measured
//! the same way.
//!
//! Values are immutable after construction.

pub mod cartesian;
pub mod contour;
pub mod error;
pub mod geometry;
pub mod geometry_type;
pub mod impls;
pub mod multi_contour;
pub mod multi_point;
pub mod multi_polygon;
pub mod polygon;

#[cfg(feature = "geo-types")]
mod geo_types;

pub use contour::Contour;
pub use geometry::{Geom, Geometry};
pub use geometry_type::GeometryType;
pub use multi_contour::MultiContour;
pub use multi_point::MultiPoint;
pub use multi_polygon::MultiPolygon;
pub use polygon::Polygon;
