use serde::{Deserialize, Serialize};

use crate::cartesian::Envelope;
use crate::geometry::Geometry;
use crate::geometry_type::GeometryType;
use crate::impls::contour::LineString;

/// A set of line strings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MultiLineString(Vec<LineString>);

impl MultiLineString {
    /// Returns reference to the inner line strings.
    pub fn parts(&self) -> &[LineString] {
        &self.0
    }
}

impl crate::multi_contour::MultiContour for MultiLineString {
    type Contour = LineString;

    fn contours(&self) -> impl Iterator<Item = &Self::Contour> {
        self.0.iter()
    }
}

impl From<Vec<LineString>> for MultiLineString {
    fn from(value: Vec<LineString>) -> Self {
        Self(value)
    }
}

impl FromIterator<LineString> for MultiLineString {
    fn from_iter<T: IntoIterator<Item = LineString>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Geometry for MultiLineString {
    fn geometry_type(&self) -> GeometryType {
        GeometryType::MultiLineString
    }

    fn envelope(&self) -> Option<Envelope> {
        Envelope::of_multi_contour(self)
    }

    fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
