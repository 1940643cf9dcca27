//! Reader and writer of the OGC Well-Known Text (WKT) geometry format.
//!
//! The reader supports the seven two-dimensional tagged-text productions of the Simple Features grammar:
//! `POINT`, `LINESTRING`, `POLYGON`, `MULTIPOINT`, `MULTILINESTRING`, `MULTIPOLYGON` and
//! `GEOMETRYCOLLECTION`, each either with a parenthesized body or `EMPTY`. Keywords are case-insensitive.
//!
//! ```
//! use geotext_types::Geometry;
//! use geotext_types::cartesian::Envelope;
//! use geotext_wkt::{parse, to_wkt};
//!
//! let geom = parse("POLYGON((0 0, 10 0, 10 10, 0 10, 0 0))").unwrap();
//! assert_eq!(geom.envelope(), Some(Envelope::new(0.0, 0.0, 10.0, 10.0)));
//! assert_eq!(to_wkt(&geom), "POLYGON((0 0,10 0,10 10,0 10,0 0))");
//! ```
//!
//! Parsing is strict: the first unexpected token fails the whole parse and no partial geometry is
//! returned. Nesting depth is limited (see [`WktReader::with_max_depth`]) so hostile input cannot
//! exhaust the stack.

use geotext_types::Geom;

pub mod error;
mod parser;
pub mod tokenizer;
mod writer;

pub use error::WktError;
pub use parser::{WktReader, DEFAULT_MAX_DEPTH};
pub use writer::{to_wkt, WktDisplay};

/// Parses a geometry from WKT text with the default [`WktReader`] settings.
pub fn parse(text: &str) -> Result<Geom, WktError> {
    WktReader::default().parse(text)
}
