//! Error type used by the crate.

use thiserror::Error;

/// Error enum.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeoTextTypesError {
    /// Geometry conversion error.
    #[error("invalid input geometry: {0}")]
    Conversion(String),
    /// The name does not denote any of the supported geometry types.
    #[error("unknown geometry type: {0}")]
    UnknownGeometryType(String),
}
