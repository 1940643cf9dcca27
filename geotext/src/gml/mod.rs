//! Reading shapes from GML documents and WFS responses.
//!
//! Both GML2 (`gml:coordinates`, `outerBoundaryIs`) and GML3 (`gml:pos`, `gml:posList`, `exterior`,
//! curves and surfaces) encodings are supported.
//!
//! ```
//! use geotext::gml::{GmlGeometryType, GmlProvider};
//!
//! let xml = r#"
//!   <wfs:FeatureCollection xmlns:wfs="http://www.opengis.net/wfs" xmlns:gml="http://www.opengis.net/gml">
//!     <gml:name>cities</gml:name>
//!     <gml:featureMember>
//!       <app:city xmlns:app="http://example.com/app">
//!         <app:name>Lisbon</app:name>
//!         <app:location><gml:Point><gml:pos>-9.14 38.72</gml:pos></gml:Point></app:location>
//!       </app:city>
//!     </gml:featureMember>
//!   </wfs:FeatureCollection>"#;
//!
//! let layer = GmlProvider::builder().build()?.populate(xml)?;
//! assert_eq!(layer.name(), "cities");
//! assert_eq!(layer.geometry_type(), GmlGeometryType::Point);
//! assert_eq!(layer.shapes()[0].attribute("name"), Some("Lisbon"));
//! # Ok::<(), geotext::error::GeoTextError>(())
//! ```

mod convert;
mod element;
mod factory;
mod provider;

use std::fmt::{Display, Formatter};
use std::str::FromStr;

pub use factory::{GeometryFactory, ShapeReader};
pub use provider::{GmlOptions, GmlProvider, GmlProviderBuilder, LayerSchema, MultiGeometryMode};
use serde::{Deserialize, Serialize};

use crate::error::GeoTextError;

/// Geometry property type of a GML layer.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GmlGeometryType {
    /// `gml:Point`
    Point,
    /// `gml:LineString`
    LineString,
    /// `gml:Polygon`
    Polygon,
    /// `gml:MultiPoint`
    MultiPoint,
    /// `gml:MultiLineString`
    MultiLineString,
    /// `gml:MultiPolygon`
    MultiPolygon,
    /// `gml:MultiCurve` (GML3)
    MultiCurve,
    /// `gml:MultiSurface` (GML3)
    MultiSurface,
    /// Geometry type is not known in advance.
    Unspecified,
}

impl GmlGeometryType {
    /// Types in the order they are checked by [`detect`].
    pub const DETECTION_ORDER: [GmlGeometryType; 8] = [
        GmlGeometryType::Point,
        GmlGeometryType::LineString,
        GmlGeometryType::Polygon,
        GmlGeometryType::MultiPoint,
        GmlGeometryType::MultiLineString,
        GmlGeometryType::MultiPolygon,
        GmlGeometryType::MultiCurve,
        GmlGeometryType::MultiSurface,
    ];

    /// Local name of the GML element of this type. `None` for [`GmlGeometryType::Unspecified`].
    pub fn element_name(&self) -> Option<&'static str> {
        Some(match self {
            GmlGeometryType::Point => "Point",
            GmlGeometryType::LineString => "LineString",
            GmlGeometryType::Polygon => "Polygon",
            GmlGeometryType::MultiPoint => "MultiPoint",
            GmlGeometryType::MultiLineString => "MultiLineString",
            GmlGeometryType::MultiPolygon => "MultiPolygon",
            GmlGeometryType::MultiCurve => "MultiCurve",
            GmlGeometryType::MultiSurface => "MultiSurface",
            GmlGeometryType::Unspecified => return None,
        })
    }
}

impl Display for GmlGeometryType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.element_name().unwrap_or("Unspecified"))
    }
}

impl FromStr for GmlGeometryType {
    type Err = GeoTextError;

    /// Parses a layer type hint: either an element name (`MultiSurface`) or a WFS property type name
    /// (`MultiSurfacePropertyType`), optionally prefixed (`gml:PointPropertyType`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.rsplit(':').next().unwrap_or(s);
        let name = name.strip_suffix("PropertyType").unwrap_or(name);

        Ok(match name {
            "Point" => GmlGeometryType::Point,
            "LineString" | "Curve" => GmlGeometryType::LineString,
            "Polygon" | "Surface" => GmlGeometryType::Polygon,
            "MultiPoint" => GmlGeometryType::MultiPoint,
            "MultiLineString" => GmlGeometryType::MultiLineString,
            "MultiPolygon" => GmlGeometryType::MultiPolygon,
            "MultiCurve" => GmlGeometryType::MultiCurve,
            "MultiSurface" => GmlGeometryType::MultiSurface,
            "Geometry" | "Unspecified" => GmlGeometryType::Unspecified,
            _ => {
                return Err(GeoTextError::Configuration(format!(
                    "unknown geometry type hint: {s}"
                )))
            }
        })
    }
}

/// Classifies a GML document by the geometry elements it contains.
///
/// Looks for the `<gml:NAME` start tags in the fixed [`GmlGeometryType::DETECTION_ORDER`] and returns the
/// first type found, regardless of where in the document the element is. Documents mixing several
/// geometry types are classified by the highest priority type only.
pub fn detect(xml: &str) -> GmlGeometryType {
    GmlGeometryType::DETECTION_ORDER
        .into_iter()
        .find(|geometry_type| {
            geometry_type
                .element_name()
                .is_some_and(|name| contains_start_tag(xml, name))
        })
        .unwrap_or(GmlGeometryType::Unspecified)
}

fn contains_start_tag(xml: &str, name: &str) -> bool {
    let marker = format!("<gml:{name}");
    xml.match_indices(&marker).any(|(index, _)| {
        matches!(
            xml.as_bytes().get(index + marker.len()),
            Some(b'>' | b'/' | b' ' | b'\t' | b'\n' | b'\r')
        )
    })
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn detect_single_point() {
        assert_eq!(
            detect("<gml:Point><gml:coordinates>1,2</gml:coordinates></gml:Point>"),
            GmlGeometryType::Point
        );
        assert_eq!(
            detect(r#"<gml:Point srsName="EPSG:4326"><gml:pos>1 2</gml:pos></gml:Point>"#),
            GmlGeometryType::Point
        );
        assert_eq!(detect("<gml:Point/>"), GmlGeometryType::Point);
    }

    #[test]
    fn detect_uses_priority_not_position() {
        let xml = "<gml:MultiPolygon></gml:MultiPolygon><gml:LineString></gml:LineString>";
        assert_eq!(detect(xml), GmlGeometryType::LineString);

        let xml = "<gml:MultiPoint><gml:pointMember><gml:Point/></gml:pointMember></gml:MultiPoint>";
        assert_eq!(detect(xml), GmlGeometryType::Point);
    }

    #[test]
    fn detect_requires_full_element_name() {
        assert_eq!(
            detect("<gml:pointMember></gml:pointMember><gml:PointProperty/>"),
            GmlGeometryType::Unspecified
        );
        assert_eq!(
            detect("<gml:MultiSurface>\n</gml:MultiSurface>"),
            GmlGeometryType::MultiSurface
        );
        assert_eq!(detect("<Point></Point>"), GmlGeometryType::Unspecified);
        assert_eq!(detect(""), GmlGeometryType::Unspecified);
    }

    #[test]
    fn parse_type_hints() {
        let cases = [
            ("gml:PointPropertyType", GmlGeometryType::Point),
            ("CurvePropertyType", GmlGeometryType::LineString),
            ("SurfacePropertyType", GmlGeometryType::Polygon),
            ("MultiLineStringPropertyType", GmlGeometryType::MultiLineString),
            ("MultiCurvePropertyType", GmlGeometryType::MultiCurve),
            ("MultiSurface", GmlGeometryType::MultiSurface),
            ("GeometryPropertyType", GmlGeometryType::Unspecified),
        ];

        for (hint, expected) in cases {
            assert_eq!(hint.parse::<GmlGeometryType>().ok(), Some(expected), "{hint}");
        }

        assert_matches!(
            "TrianglePropertyType".parse::<GmlGeometryType>(),
            Err(GeoTextError::Configuration(_))
        );
    }

    #[test]
    fn element_names_parse_back() {
        for geometry_type in GmlGeometryType::DETECTION_ORDER {
            assert_eq!(
                geometry_type.to_string().parse::<GmlGeometryType>().ok(),
                Some(geometry_type)
            );
        }
        assert_eq!(
            GmlGeometryType::Unspecified
                .to_string()
                .parse::<GmlGeometryType>()
                .ok(),
            Some(GmlGeometryType::Unspecified)
        );
    }
}
