//! Error types used by the crate.

use quick_xml::events::attributes::AttrError;
use thiserror::Error;

/// Geotext error type.
#[derive(Debug, Error)]
pub enum GeoTextError {
    /// Layer name is not given in the layer schema and the document has no `gml:name` element.
    #[error("layer name is not specified")]
    MissingLayerName,
    /// Geometry type is unspecified and the document contains no recognized geometry element.
    #[error("document does not contain any supported geometry")]
    UnresolvedGeometryType,
    /// Geometry element is structurally invalid.
    #[error("invalid geometry: {0}")]
    InvalidGeometry(String),
    /// Coordinate text cannot be read.
    #[error("invalid coordinates: {0}")]
    InvalidCoordinates(String),
    /// Element nesting exceeds the configured maximum depth.
    #[error("element nesting is deeper than {max_depth} levels")]
    NestingTooDeep {
        /// Configured maximum depth.
        max_depth: usize,
    },
    /// Document ended before the element was closed.
    #[error("element <{0}> is not closed")]
    UnclosedElement(String),
    /// Malformed XML.
    #[error("xml error: {0}")]
    Xml(#[from] quick_xml::Error),
    /// Malformed XML attribute.
    #[error("xml attribute error: {0}")]
    XmlAttribute(#[from] AttrError),
    /// Invalid reader configuration.
    #[error("invalid configuration: {0}")]
    Configuration(String),
    /// Error reading data from the FS.
    #[error("failed to read file")]
    FsIo(#[from] std::io::Error),
    /// Item not found.
    #[error("item not found")]
    NotFound,
}

impl GeoTextError {
    /// Returns true if the error concerns one geometry only, so the feature containing it can be
    /// skipped without losing track of the document structure.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            GeoTextError::InvalidGeometry(_) | GeoTextError::InvalidCoordinates(_)
        )
    }
}
