use serde::{Deserialize, Serialize};

use crate::cartesian::Envelope;
use crate::geometry::{Geom, Geometry};
use crate::geometry_type::GeometryType;

/// Ordered set of geometries of any type, including other collections.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GeometryCollection(Vec<Geom>);

impl GeometryCollection {
    /// Returns reference to the member geometries.
    pub fn parts(&self) -> &[Geom] {
        &self.0
    }
}

impl From<Vec<Geom>> for GeometryCollection {
    fn from(value: Vec<Geom>) -> Self {
        Self(value)
    }
}

impl FromIterator<Geom> for GeometryCollection {
    fn from_iter<T: IntoIterator<Item = Geom>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Geometry for GeometryCollection {
    fn geometry_type(&self) -> GeometryType {
        GeometryType::GeometryCollection
    }

    fn envelope(&self) -> Option<Envelope> {
        Envelope::union_all(self.0.iter().filter_map(Geom::envelope))
    }

    fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
