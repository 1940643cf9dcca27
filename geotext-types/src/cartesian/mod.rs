//! Types and functions on geometries in cartesian coordinates.

mod coord;
mod envelope;
mod point;

pub use coord::Coord;
pub use envelope::{merge_envelopes, Envelope};
pub use point::CartesianPoint2d;
