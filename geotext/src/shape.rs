//! Output of the GML reader: [`Shape`] and [`ShapeLayer`].

use std::collections::HashMap;

use geotext_types::cartesian::Envelope;
use geotext_types::Geom;
use serde::{Deserialize, Serialize};

use crate::feature::{Feature, FeatureStore};
use crate::gml::GmlGeometryType;

/// A geometry paired with the attribute values of the feature it belongs to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shape {
    geometry: Geom,
    attributes: HashMap<String, String>,
}

impl Shape {
    /// Creates a new shape.
    pub fn new(geometry: Geom, attributes: HashMap<String, String>) -> Self {
        Self {
            geometry,
            attributes,
        }
    }

    /// Attributes of the shape keyed by the property name.
    pub fn attributes(&self) -> &HashMap<String, String> {
        &self.attributes
    }

    /// Value of the attribute with the given name.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Consumes the shape returning its parts.
    pub fn into_parts(self) -> (Geom, HashMap<String, String>) {
        (self.geometry, self.attributes)
    }
}

impl Feature for Shape {
    type Geom = Geom;

    fn geometry(&self) -> &Self::Geom {
        &self.geometry
    }
}

/// Shapes read from one document.
#[derive(Debug, Clone)]
pub struct ShapeLayer {
    name: String,
    geometry_type: GmlGeometryType,
    shapes: FeatureStore<Shape>,
    envelope: Option<Envelope>,
}

impl ShapeLayer {
    /// Creates a new layer.
    pub fn new(
        name: impl Into<String>,
        geometry_type: GmlGeometryType,
        shapes: Vec<Shape>,
        envelope: Option<Envelope>,
    ) -> Self {
        Self {
            name: name.into(),
            geometry_type,
            shapes: FeatureStore::new(shapes),
            envelope,
        }
    }

    /// Layer name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Geometry type the layer was read with.
    pub fn geometry_type(&self) -> GmlGeometryType {
        self.geometry_type
    }

    /// Shapes in document order.
    pub fn shapes(&self) -> &[Shape] {
        self.shapes.as_slice()
    }

    /// Number of shapes.
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    /// Returns true if the layer has no shapes.
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Extent of the layer. `None` if no shape has a non-empty geometry.
    pub fn envelope(&self) -> Option<Envelope> {
        self.envelope
    }

    /// Returns the shapes whose bounding box intersects the envelope, in document order.
    pub fn shapes_intersecting(&self, envelope: &Envelope) -> Vec<&Shape> {
        self.shapes.intersecting(envelope).collect()
    }

    /// Consumes the layer returning the shapes.
    pub fn into_shapes(self) -> Vec<Shape> {
        self.shapes.into_vec()
    }
}
