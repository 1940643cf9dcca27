//! Geotext reads geometry text formats into a typed geometry model.
//!
//! # Quick start
//!
//! Well-known text is parsed with [`wkt::parse`]:
//!
//! ```
//! use geotext::geotext_types::{Geom, Geometry};
//! use geotext::wkt;
//!
//! let geom = wkt::parse("POLYGON ((0 0, 4 0, 4 3, 0 0))")?;
//! assert!(matches!(geom, Geom::Polygon(_)));
//! assert_eq!(geom.envelope().map(|e| e.width()), Some(4.0));
//! # Ok::<(), geotext::wkt::WktError>(())
//! ```
//!
//! GML documents and WFS `GetFeature` responses are read with a [`GmlProvider`](gml::GmlProvider) into a
//! [`ShapeLayer`]:
//!
//! ```
//! use geotext::geotext_types::cartesian::Envelope;
//! use geotext::gml::GmlProvider;
//!
//! let xml = r#"
//!   <gml:featureMember>
//!     <app:stop><app:id>1</app:id><app:geom><gml:Point><gml:pos>1 1</gml:pos></gml:Point></app:geom></app:stop>
//!   </gml:featureMember>
//!   <gml:featureMember>
//!     <app:stop><app:id>2</app:id><app:geom><gml:Point><gml:pos>5 5</gml:pos></gml:Point></app:geom></app:stop>
//!   </gml:featureMember>"#;
//!
//! let layer = GmlProvider::builder().with_layer_name("stops").build()?.populate(xml)?;
//! let found = layer.shapes_intersecting(&Envelope::new(0.0, 0.0, 2.0, 2.0));
//! assert_eq!(found.len(), 1);
//! assert_eq!(found[0].attribute("id"), Some("1"));
//! # Ok::<(), geotext::error::GeoTextError>(())
//! ```
//!
//! # Main components
//!
//! * [`geotext_types`] defines the geometry model: points, line strings, polygons, their multi-versions and
//!   collections, all measurable with an [`Envelope`](geotext_types::cartesian::Envelope).
//! * [`wkt`] contains the WKT tokenizer, parser and writer.
//! * [`gml`] detects the geometry type of a GML document and reads its features into [`Shape`]s.
//! * [`source`] abstracts where the document text comes from, so that the readers never touch the file
//!   system on their own.

#![warn(clippy::unwrap_used)]
#![warn(missing_docs)]

pub mod error;
pub mod feature;
pub mod gml;
pub mod shape;
pub mod source;

pub use error::GeoTextError;
pub use feature::{Feature, FeatureStore};
pub use shape::{Shape, ShapeLayer};

// Reexport the model and the WKT reader
pub use geotext_types;
pub use geotext_wkt as wkt;
