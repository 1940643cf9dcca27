use std::collections::{HashMap, VecDeque};
use std::iter::FusedIterator;

use geotext_types::cartesian::{merge_envelopes, Envelope};
use geotext_types::{Geom, Geometry};
use log::{debug, warn};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::error::GeoTextError;
use crate::feature::Feature;
use crate::gml::convert::{to_geom, GEOMETRY_ELEMENTS};
use crate::gml::element::{append_text, local_name, GmlElement};
use crate::gml::provider::{GmlOptions, MultiGeometryMode};
use crate::gml::GmlGeometryType;
use crate::shape::Shape;

/// Elements whose children are features.
const MEMBER_ELEMENTS: [&str; 3] = ["featureMember", "featureMembers", "member"];

/// Selects the geometry elements that become shapes.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum GeometryFactory {
    /// `Point` elements.
    Point,
    /// `LineString` and `Curve` elements.
    LineString,
    /// `Polygon` elements and patches of `Surface` elements.
    Polygon,
    /// `MultiPoint` elements.
    MultiPoint,
    /// `MultiLineString` and `MultiCurve` elements.
    MultiLineString,
    /// `MultiPolygon` and `MultiSurface` elements.
    MultiPolygon,
    /// Any geometry element. Only the outermost geometry element becomes a shape.
    Unspecified,
}

impl GeometryFactory {
    /// Factory for the layer geometry type.
    ///
    /// Curves and surfaces are read as separate line strings and polygons unless `mode` is
    /// [`MultiGeometryMode::PreserveMulti`].
    pub fn for_type(geometry_type: GmlGeometryType, mode: MultiGeometryMode) -> Self {
        match (geometry_type, mode) {
            (GmlGeometryType::Point, _) => GeometryFactory::Point,
            (GmlGeometryType::LineString, _) => GeometryFactory::LineString,
            (GmlGeometryType::Polygon, _) => GeometryFactory::Polygon,
            (GmlGeometryType::MultiPoint, _) => GeometryFactory::MultiPoint,
            (GmlGeometryType::MultiLineString, _) => GeometryFactory::MultiLineString,
            (GmlGeometryType::MultiPolygon, _) => GeometryFactory::MultiPolygon,
            (GmlGeometryType::MultiCurve, MultiGeometryMode::AlwaysCollapse) => {
                GeometryFactory::LineString
            }
            (GmlGeometryType::MultiCurve, MultiGeometryMode::PreserveMulti) => {
                GeometryFactory::MultiLineString
            }
            (GmlGeometryType::MultiSurface, MultiGeometryMode::AlwaysCollapse) => {
                GeometryFactory::Polygon
            }
            (GmlGeometryType::MultiSurface, MultiGeometryMode::PreserveMulti) => {
                GeometryFactory::MultiPolygon
            }
            (GmlGeometryType::Unspecified, _) => GeometryFactory::Unspecified,
        }
    }

    /// Returns true if the element with the given local name is converted into a shape as a whole.
    ///
    /// Elements that are not accepted are descended into.
    pub fn accepts(&self, local_name: &str) -> bool {
        match self {
            GeometryFactory::Point => local_name == "Point",
            GeometryFactory::LineString => matches!(local_name, "LineString" | "Curve"),
            GeometryFactory::Polygon => matches!(local_name, "Polygon" | "PolygonPatch"),
            GeometryFactory::MultiPoint => local_name == "MultiPoint",
            GeometryFactory::MultiLineString => {
                matches!(local_name, "MultiLineString" | "MultiCurve")
            }
            GeometryFactory::MultiPolygon => matches!(local_name, "MultiPolygon" | "MultiSurface"),
            GeometryFactory::Unspecified => GEOMETRY_ELEMENTS.contains(&local_name),
        }
    }
}

/// Streaming reader of shapes from a GML document.
///
/// Children of `featureMember`, `featureMembers` and `member` elements are features. Simple-content
/// children of a feature are its attributes, and every geometry element accepted by the factory inside a
/// feature becomes a shape carrying a copy of the feature attributes. Shapes of a feature are yielded when
/// the feature element is closed. Geometries outside of any feature become shapes without attributes.
///
/// The reader accumulates the envelope of all yielded shapes, see [`ShapeReader::envelope`]. After the
/// first error the iterator returns `None`.
pub struct ShapeReader<'a> {
    reader: Reader<&'a [u8]>,
    factory: GeometryFactory,
    fields: &'a [String],
    options: GmlOptions,
    stack: Vec<Frame>,
    pending: VecDeque<Shape>,
    envelope: Option<Envelope>,
    geometries_found: usize,
    shapes_read: usize,
    skipped_features: usize,
    can_continue: bool,
}

struct Frame {
    name: String,
    kind: FrameKind,
}

enum FrameKind {
    Members,
    Feature(FeatureBuilder),
    Property { text: String, is_simple: bool },
    Other,
}

#[derive(Default)]
struct FeatureBuilder {
    attributes: HashMap<String, String>,
    geometries: Vec<Geom>,
    error: Option<GeoTextError>,
}

impl<'a> ShapeReader<'a> {
    /// Creates a reader over the document.
    ///
    /// If `fields` is not empty, only the listed attributes are kept.
    pub fn new(
        xml: &'a str,
        factory: GeometryFactory,
        fields: &'a [String],
        options: GmlOptions,
    ) -> Self {
        let mut reader = Reader::from_str(xml);
        reader.config_mut().trim_text(true);

        Self {
            reader,
            factory,
            fields,
            options,
            stack: vec![],
            pending: VecDeque::new(),
            envelope: None,
            geometries_found: 0,
            shapes_read: 0,
            skipped_features: 0,
            can_continue: true,
        }
    }

    /// Factory used by the reader.
    pub fn factory(&self) -> GeometryFactory {
        self.factory
    }

    /// Envelope of the shapes read so far. `None` until a shape with non-empty geometry is read.
    pub fn envelope(&self) -> Option<Envelope> {
        self.envelope
    }

    /// Number of features skipped because of invalid geometries.
    pub fn skipped_features(&self) -> usize {
        self.skipped_features
    }

    fn advance(&mut self) -> Result<bool, GeoTextError> {
        match self.reader.read_event()? {
            Event::Start(e) => self.start_element(&e, false)?,
            Event::Empty(e) => self.start_element(&e, true)?,
            Event::Text(e) => {
                if let Some(text) = self.property_text() {
                    append_text(text, &e.unescape()?);
                }
            }
            Event::CData(e) => {
                if let Some(text) = self.property_text() {
                    append_text(text, &String::from_utf8_lossy(&e));
                }
            }
            Event::End(_) => self.end_element(),
            Event::Eof => {
                self.finish()?;
                return Ok(false);
            }
            _ => {}
        }

        Ok(true)
    }

    fn property_text(&mut self) -> Option<&mut String> {
        match self.stack.last_mut() {
            Some(Frame {
                kind: FrameKind::Property { text, .. },
                ..
            }) => Some(text),
            _ => None,
        }
    }

    fn start_element(&mut self, start: &BytesStart<'_>, is_empty: bool) -> Result<(), GeoTextError> {
        let max_depth = self.options.max_depth;
        if self.stack.len() >= max_depth {
            return Err(GeoTextError::NestingTooDeep { max_depth });
        }

        let name = local_name(start).into_owned();
        let kind = match self.stack.last_mut() {
            Some(Frame {
                kind: FrameKind::Property { is_simple, .. },
                ..
            }) => {
                *is_simple = false;
                FrameKind::Other
            }
            Some(Frame {
                kind: FrameKind::Members,
                ..
            }) => FrameKind::Feature(FeatureBuilder::default()),
            Some(Frame {
                kind: FrameKind::Feature(_),
                ..
            }) => FrameKind::Property {
                text: String::new(),
                is_simple: true,
            },
            _ if MEMBER_ELEMENTS.contains(&name.as_str()) => FrameKind::Members,
            _ => FrameKind::Other,
        };

        if self.factory.accepts(&name) {
            let element =
                GmlElement::read(&mut self.reader, start, is_empty, self.stack.len(), max_depth)?;
            self.geometries_found += 1;
            return self.add_geometry(to_geom(&element));
        }

        self.stack.push(Frame { name, kind });
        if is_empty {
            self.end_element();
        }

        Ok(())
    }

    fn end_element(&mut self) {
        let Some(frame) = self.stack.pop() else {
            return;
        };

        match frame.kind {
            FrameKind::Property {
                text,
                is_simple: true,
            } => {
                let is_selected =
                    self.fields.is_empty() || self.fields.iter().any(|field| *field == frame.name);
                if let Some(Frame {
                    kind: FrameKind::Feature(feature),
                    ..
                }) = self.stack.last_mut()
                {
                    if is_selected {
                        feature.attributes.insert(frame.name, text);
                    }
                }
            }
            FrameKind::Feature(feature) => self.finish_feature(feature),
            _ => {}
        }
    }

    fn add_geometry(&mut self, geometry: Result<Geom, GeoTextError>) -> Result<(), GeoTextError> {
        let skip_invalid = self.options.skip_invalid_features;
        let feature = self
            .stack
            .iter_mut()
            .rev()
            .find_map(|frame| match &mut frame.kind {
                FrameKind::Feature(feature) => Some(feature),
                _ => None,
            });

        match (feature, geometry) {
            (Some(feature), Ok(geometry)) => feature.geometries.push(geometry),
            (None, Ok(geometry)) => self.push_shape(Shape::new(geometry, HashMap::new())),
            (Some(feature), Err(err)) if skip_invalid && err.is_recoverable() => {
                feature.error.get_or_insert(err);
            }
            (None, Err(err)) if skip_invalid && err.is_recoverable() => {
                warn!("Skipping invalid geometry: {err}");
            }
            (_, Err(err)) => return Err(err),
        }

        Ok(())
    }

    fn finish_feature(&mut self, feature: FeatureBuilder) {
        let FeatureBuilder {
            attributes,
            geometries,
            error,
        } = feature;

        if let Some(err) = error {
            warn!("Skipping feature with invalid geometry: {err}");
            self.skipped_features += 1;
            return;
        }

        for geometry in geometries {
            self.push_shape(Shape::new(geometry, attributes.clone()));
        }
    }

    fn push_shape(&mut self, shape: Shape) {
        self.envelope = merge_envelopes(self.envelope, shape.geometry().envelope());
        self.shapes_read += 1;
        self.pending.push_back(shape);
    }

    fn finish(&mut self) -> Result<(), GeoTextError> {
        if let Some(frame) = self.stack.last() {
            return Err(GeoTextError::UnclosedElement(frame.name.clone()));
        }

        if self.factory == GeometryFactory::Unspecified && self.geometries_found == 0 {
            return Err(GeoTextError::UnresolvedGeometryType);
        }

        debug!(
            "Read {} shapes with {:?} factory, {} features skipped",
            self.shapes_read, self.factory, self.skipped_features
        );

        Ok(())
    }
}

impl Iterator for ShapeReader<'_> {
    type Item = Result<Shape, GeoTextError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(shape) = self.pending.pop_front() {
                return Some(Ok(shape));
            }

            if !self.can_continue {
                return None;
            }

            match self.advance() {
                Ok(true) => {}
                Ok(false) => self.can_continue = false,
                Err(err) => {
                    self.can_continue = false;
                    self.pending.clear();
                    return Some(Err(err));
                }
            }
        }
    }
}

impl FusedIterator for ShapeReader<'_> {}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use geotext_types::impls::Point;

    use super::*;

    const MULTI_CURVE: &str = r#"
      <wfs:FeatureCollection xmlns:wfs="http://www.opengis.net/wfs" xmlns:gml="http://www.opengis.net/gml">
        <gml:featureMember>
          <app:road>
            <app:id>7</app:id>
            <app:geom>
              <gml:MultiCurve>
                <gml:curveMember><gml:LineString><gml:posList>0 0 1 1</gml:posList></gml:LineString></gml:curveMember>
                <gml:curveMember><gml:LineString><gml:posList>2 2 3 3</gml:posList></gml:LineString></gml:curveMember>
              </gml:MultiCurve>
            </app:geom>
          </app:road>
        </gml:featureMember>
      </wfs:FeatureCollection>"#;

    fn read(xml: &str, factory: GeometryFactory) -> Result<Vec<Shape>, GeoTextError> {
        ShapeReader::new(xml, factory, &[], GmlOptions::default()).collect()
    }

    #[test]
    fn factory_for_type() {
        use GmlGeometryType as T;
        use MultiGeometryMode::{AlwaysCollapse, PreserveMulti};

        let cases = [
            (T::Point, AlwaysCollapse, GeometryFactory::Point),
            (T::MultiPoint, PreserveMulti, GeometryFactory::MultiPoint),
            (T::MultiCurve, AlwaysCollapse, GeometryFactory::LineString),
            (T::MultiCurve, PreserveMulti, GeometryFactory::MultiLineString),
            (T::MultiSurface, AlwaysCollapse, GeometryFactory::Polygon),
            (T::MultiSurface, PreserveMulti, GeometryFactory::MultiPolygon),
            (T::Unspecified, PreserveMulti, GeometryFactory::Unspecified),
        ];

        for (geometry_type, mode, expected) in cases {
            assert_eq!(GeometryFactory::for_type(geometry_type, mode), expected);
        }
    }

    #[test]
    fn collapsed_multi_curve_gives_shape_per_member() {
        let shapes = read(MULTI_CURVE, GeometryFactory::LineString).expect("valid document");
        assert_eq!(shapes.len(), 2);
        assert!(shapes.iter().all(|s| s.attribute("id") == Some("7")));
    }

    #[test]
    fn preserved_multi_curve_gives_one_shape() {
        let shapes = read(MULTI_CURVE, GeometryFactory::MultiLineString).expect("valid document");
        assert_eq!(shapes.len(), 1);
        assert_matches!(shapes[0].geometry(), Geom::MultiLineString(lines) if lines.parts().len() == 2);
    }

    #[test]
    fn unspecified_factory_takes_outermost_geometry() {
        let shapes = read(MULTI_CURVE, GeometryFactory::Unspecified).expect("valid document");
        assert_eq!(shapes.len(), 1);
        assert_matches!(shapes[0].geometry(), Geom::MultiLineString(_));
    }

    #[test]
    fn typed_factory_without_matches_gives_no_shapes() {
        let shapes = read(MULTI_CURVE, GeometryFactory::Point).expect("valid document");
        assert!(shapes.is_empty());
    }

    #[test]
    fn attribute_text_split_by_comment() {
        let xml = "<gml:featureMember><app:river>
                     <app:name>Rio<!-- local name -->Tejo</app:name>
                     <app:geom><gml:Point><gml:pos>1<!-- x -->2</gml:pos></gml:Point></app:geom>
                   </app:river></gml:featureMember>";
        let shapes = read(xml, GeometryFactory::Point).expect("valid document");

        assert_eq!(shapes[0].attribute("name"), Some("Rio Tejo"));
        assert_eq!(shapes[0].geometry(), &Geom::from(Point::new(1.0, 2.0)));
    }

    #[test]
    fn unresolved_geometry() {
        assert_matches!(
            read("<a><b>text</b></a>", GeometryFactory::Unspecified),
            Err(GeoTextError::UnresolvedGeometryType)
        );
    }

    #[test]
    fn geometry_outside_of_features() {
        let xml = "<gml:Point><gml:pos>1 2</gml:pos></gml:Point><gml:Point><gml:pos>3 4</gml:pos></gml:Point>";
        let mut reader = ShapeReader::new(xml, GeometryFactory::Point, &[], GmlOptions::default());
        let shapes: Vec<_> = reader
            .by_ref()
            .collect::<Result<_, _>>()
            .expect("valid document");

        assert_eq!(shapes.len(), 2);
        assert!(shapes[0].attributes().is_empty());
        assert_eq!(shapes[1].geometry(), &Geom::from(Point::new(3.0, 4.0)));
        assert_eq!(
            reader.envelope(),
            Some(Envelope::new(1.0, 2.0, 3.0, 4.0))
        );
    }

    #[test]
    fn envelope_covers_all_shapes() {
        let mut reader = ShapeReader::new(
            MULTI_CURVE,
            GeometryFactory::LineString,
            &[],
            GmlOptions::default(),
        );
        let envelopes: Vec<_> = reader
            .by_ref()
            .map(|shape| shape.expect("valid shape").geometry().envelope())
            .collect();

        let expected = envelopes.into_iter().fold(None, merge_envelopes);
        assert_eq!(reader.envelope(), expected);
        assert_eq!(reader.envelope(), Some(Envelope::new(0.0, 0.0, 3.0, 3.0)));
    }

    #[test]
    fn error_stops_iteration() {
        let xml = "<gml:Point><gml:pos>1 2</gml:pos></gml:Point><gml:Point><gml:pos>x</gml:pos></gml:Point><gml:Point><gml:pos>5 6</gml:pos></gml:Point>";
        let mut reader = ShapeReader::new(xml, GeometryFactory::Point, &[], GmlOptions::default());
        assert_matches!(reader.next(), Some(Ok(_)));
        assert_matches!(reader.next(), Some(Err(GeoTextError::InvalidCoordinates(_))));
        assert_matches!(reader.next(), None);
    }

    #[test]
    fn malformed_xml() {
        assert_matches!(
            read("<a><b></a>", GeometryFactory::Point),
            Err(GeoTextError::Xml(_))
        );
        assert_matches!(
            read("<a><b></b>", GeometryFactory::Point),
            Err(GeoTextError::UnclosedElement(name)) if name == "a"
        );
    }

    #[test]
    fn nesting_is_limited() {
        let xml = format!("{}{}", "<a>".repeat(200), "</a>".repeat(200));
        let options = GmlOptions {
            max_depth: 100,
            ..GmlOptions::default()
        };
        let result: Result<Vec<_>, _> =
            ShapeReader::new(&xml, GeometryFactory::Point, &[], options).collect();
        assert_matches!(result, Err(GeoTextError::NestingTooDeep { max_depth: 100 }));
    }
}
