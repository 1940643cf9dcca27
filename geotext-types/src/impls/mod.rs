//! Implementations of geometry traits.

mod collection;
mod contour;
mod multi_contour;
mod multi_point;
mod multi_polygon;
mod point;
mod polygon;

pub use collection::GeometryCollection;
pub use contour::{LineString, LinearRing};
pub use multi_contour::MultiLineString;
pub use multi_point::MultiPoint;
pub use multi_polygon::MultiPolygon;
pub use point::Point;
pub use polygon::Polygon;
