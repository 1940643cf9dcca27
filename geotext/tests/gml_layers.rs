use approx::assert_abs_diff_eq;
use assert_matches::assert_matches;
use geotext::error::GeoTextError;
use geotext::geotext_types::cartesian::Envelope;
use geotext::geotext_types::{Geom, Geometry};
use geotext::gml::{self, GmlGeometryType, GmlProvider, MultiGeometryMode};
use geotext::source::{FileSource, MemorySource};
use geotext::{Feature, Shape};

const POINTS: &str = include_str!("../test-data/points.gml");
const POLYGONS: &str = include_str!("../test-data/polygons.gml");
const PARCELS: &str = include_str!("../test-data/parcels.gml");
const ROADS: &str = include_str!("../test-data/roads.gml");
const MIXED: &str = include_str!("../test-data/mixed.gml");
const INVALID: &str = include_str!("../test-data/invalid.gml");
const RIVERS: &str = include_str!("../test-data/rivers.gml");
const ISLANDS: &str = include_str!("../test-data/islands.gml");

fn provider() -> GmlProvider {
    GmlProvider::builder()
        .build()
        .expect("valid configuration")
}

fn attribute_values<'a>(shapes: impl IntoIterator<Item = &'a Shape>, name: &str) -> Vec<String> {
    shapes
        .into_iter()
        .map(|shape| shape.attribute(name).unwrap_or_default().to_string())
        .collect()
}

#[test]
fn points_layer() {
    let layer = provider().populate(POINTS).expect("valid document");

    assert_eq!(layer.name(), "cities");
    assert_eq!(layer.geometry_type(), GmlGeometryType::Point);
    assert_eq!(layer.len(), POINTS.matches("<gml:Point").count());
    assert!(layer
        .shapes()
        .iter()
        .all(|shape| matches!(shape.geometry(), Geom::Point(_))));

    assert_eq!(
        attribute_values(layer.shapes(), "name"),
        ["Lisbon", "Porto", "Berlin", "Toulouse"]
    );

    let toulouse = &layer.shapes()[3];
    assert_eq!(toulouse.attribute("population"), Some(""));
    assert_eq!(toulouse.attribute("location"), None);
}

#[test]
fn points_layer_envelope() {
    let layer = provider().populate(POINTS).expect("valid document");
    let envelope = layer.envelope().expect("layer is not empty");

    assert_abs_diff_eq!(envelope.x_min(), -9.14);
    assert_abs_diff_eq!(envelope.y_min(), 38.72);
    assert_abs_diff_eq!(envelope.x_max(), 13.40);
    assert_abs_diff_eq!(envelope.y_max(), 52.52);

    let expected = Envelope::union_all(
        layer
            .shapes()
            .iter()
            .filter_map(|shape| shape.geometry().envelope()),
    );
    assert_eq!(layer.envelope(), expected);
}

#[test]
fn selected_fields_only() {
    let provider = GmlProvider::builder()
        .with_fields(["name", "capital"])
        .build()
        .expect("valid configuration");
    let layer = provider.populate(POINTS).expect("valid document");

    for shape in layer.shapes() {
        let mut keys: Vec<_> = shape.attributes().keys().map(String::as_str).collect();
        keys.sort();
        assert_eq!(keys, ["capital", "name"]);
    }
}

#[test]
fn gml2_polygons() {
    let layer = provider().populate(POLYGONS).expect("valid document");

    assert_eq!(layer.name(), "lakes");
    assert_eq!(layer.geometry_type(), GmlGeometryType::Polygon);
    assert_eq!(layer.len(), 3);
    assert_matches!(layer.shapes()[0].geometry(), Geom::Polygon(p) if p.interiors().len() == 1);
    assert_eq!(layer.envelope(), Some(Envelope::new(0.0, 0.0, 110.0, 110.0)));
}

#[test]
fn intersecting_shapes_include_touching() {
    let layer = provider().populate(POLYGONS).expect("valid document");

    let found = layer.shapes_intersecting(&Envelope::new(-5.0, -5.0, 10.0, 20.0));
    assert_eq!(attribute_values(found, "name"), ["Round", "Long"]);

    let found = layer.shapes_intersecting(&Envelope::new(50.0, 50.0, 60.0, 60.0));
    assert!(found.is_empty());

    let found = layer.shapes_intersecting(&Envelope::new(-1000.0, -1000.0, 1000.0, 1000.0));
    assert_eq!(found.len(), layer.len());
}

#[test]
fn intersecting_shapes_match_linear_scan() {
    let layer = provider().populate(PARCELS).expect("valid document");
    let queries = [
        Envelope::new(4.0, 4.0, 11.0, 11.0),
        Envelope::new(16.0, 0.0, 19.0, 20.0),
        Envelope::new(30.0, 8.0, 31.0, 9.0),
    ];

    for query in queries {
        let expected: Vec<&Shape> = layer
            .shapes()
            .iter()
            .filter(|shape| {
                shape
                    .geometry()
                    .envelope()
                    .is_some_and(|envelope| envelope.intersects(&query))
            })
            .collect();
        assert_eq!(layer.shapes_intersecting(&query), expected);
    }
}

#[test]
fn multi_surface_is_collapsed_by_default() {
    let layer = GmlProvider::builder()
        .with_geometry_type(GmlGeometryType::MultiSurface)
        .build()
        .expect("valid configuration")
        .populate(PARCELS)
        .expect("valid document");

    assert_eq!(layer.len(), 3);
    assert!(layer
        .shapes()
        .iter()
        .all(|shape| matches!(shape.geometry(), Geom::Polygon(_))));
    assert_eq!(attribute_values(layer.shapes(), "code"), ["A-1", "A-1", "B-7"]);
}

#[test]
fn multi_surface_is_preserved() {
    let layer = GmlProvider::builder()
        .with_geometry_type(GmlGeometryType::MultiSurface)
        .with_multi_geometries(MultiGeometryMode::PreserveMulti)
        .build()
        .expect("valid configuration")
        .populate(PARCELS)
        .expect("valid document");

    assert_eq!(layer.len(), 2);
    assert_matches!(layer.shapes()[0].geometry(), Geom::MultiPolygon(p) if p.parts().len() == 2);
    assert_matches!(layer.shapes()[1].geometry(), Geom::MultiPolygon(p) if p.parts().len() == 1);
    assert_eq!(layer.envelope(), Some(Envelope::new(0.0, 0.0, 30.0, 15.0)));
}

#[test]
fn detection_prefers_simple_types() {
    assert_eq!(gml::detect(PARCELS), GmlGeometryType::Polygon);
    assert_eq!(gml::detect(ROADS), GmlGeometryType::LineString);
    assert_eq!(gml::detect(MIXED), GmlGeometryType::Point);
}

#[test]
fn multi_curve_modes() {
    let collapsed = provider().populate(ROADS).expect("valid document");
    assert_eq!(collapsed.name(), "roads");
    assert_eq!(collapsed.len(), 3);
    assert_matches!(collapsed.shapes()[1].geometry(), Geom::LineString(l) if l.points().len() == 3);

    let preserved = GmlProvider::builder()
        .with_geometry_type(GmlGeometryType::MultiCurve)
        .with_multi_geometries(MultiGeometryMode::PreserveMulti)
        .build()
        .expect("valid configuration")
        .populate(ROADS)
        .expect("valid document");
    assert_eq!(preserved.len(), 2);
    assert_eq!(attribute_values(preserved.shapes(), "ref"), ["N1", "N2"]);
    assert_eq!(preserved.envelope(), collapsed.envelope());
}

#[test]
fn gml2_multi_line_strings() {
    let layer = GmlProvider::builder()
        .with_geometry_type(GmlGeometryType::MultiLineString)
        .build()
        .expect("valid configuration")
        .populate(RIVERS)
        .expect("valid document");

    assert_eq!(layer.name(), "rivers");
    assert_eq!(layer.len(), 2);
    assert_eq!(attribute_values(layer.shapes(), "name"), ["Tagus", "Douro"]);

    let Geom::MultiLineString(tagus) = layer.shapes()[0].geometry() else {
        panic!("invalid geometry type");
    };
    assert_eq!(tagus.parts().len(), 2);
    assert_eq!(tagus.parts()[0].points().len(), 3);
    assert_matches!(layer.shapes()[1].geometry(), Geom::MultiLineString(l) if l.parts().len() == 1);
    assert_eq!(layer.envelope(), Some(Envelope::new(0.0, 0.0, 14.0, 15.0)));
}

#[test]
fn gml2_multi_line_strings_detected_as_lines() {
    let layer = provider().populate(RIVERS).expect("valid document");

    assert_eq!(layer.geometry_type(), GmlGeometryType::LineString);
    assert_eq!(layer.len(), 3);
    assert_eq!(
        attribute_values(layer.shapes(), "name"),
        ["Tagus", "Tagus", "Douro"]
    );
    assert_eq!(layer.envelope(), Some(Envelope::new(0.0, 0.0, 14.0, 15.0)));
}

#[test]
fn gml2_multi_polygons() {
    let layer = GmlProvider::builder()
        .with_geometry_type(GmlGeometryType::MultiPolygon)
        .build()
        .expect("valid configuration")
        .populate(ISLANDS)
        .expect("valid document");

    assert_eq!(layer.name(), "islands");
    assert_eq!(layer.len(), 2);

    let Geom::MultiPolygon(azores) = layer.shapes()[0].geometry() else {
        panic!("invalid geometry type");
    };
    assert_eq!(azores.parts().len(), 3);
    assert_eq!(azores.parts()[1].interiors().len(), 1);
    assert_matches!(layer.shapes()[1].geometry(), Geom::MultiPolygon(p) if p.parts().len() == 1);
    assert_eq!(layer.envelope(), Some(Envelope::new(-4.0, 0.0, 21.0, 22.0)));

    let found = layer.shapes_intersecting(&Envelope::new(15.0, 15.0, 20.0, 20.0));
    assert_eq!(attribute_values(found, "name"), ["Berlengas"]);
}

#[test]
fn gml2_multi_polygons_detected_as_polygons() {
    let layer = provider().populate(ISLANDS).expect("valid document");

    assert_eq!(layer.geometry_type(), GmlGeometryType::Polygon);
    assert_eq!(layer.len(), 4);
    assert_eq!(layer.envelope(), Some(Envelope::new(-4.0, 0.0, 21.0, 22.0)));
}

#[test]
fn unspecified_type_reads_any_geometry() {
    let layer = GmlProvider::builder()
        .with_geometry_type(GmlGeometryType::Unspecified)
        .build()
        .expect("valid configuration")
        .populate(MIXED)
        .expect("valid document");

    assert_eq!(layer.len(), 3);
    assert_matches!(layer.shapes()[0].geometry(), Geom::Point(_));
    assert_matches!(layer.shapes()[1].geometry(), Geom::LineString(_));
    assert_matches!(layer.shapes()[2].geometry(), Geom::MultiPoint(_));
}

#[test]
fn point_factory_finds_points_inside_multi_points() {
    let layer = provider().populate(MIXED).expect("valid document");
    assert_eq!(layer.len(), 3);
    assert_eq!(
        attribute_values(layer.shapes(), "kind"),
        ["tower", "islands", "islands"]
    );
}

#[test]
fn unresolved_geometry_type() {
    let xml = "<wfs:FeatureCollection><gml:name>empty</gml:name></wfs:FeatureCollection>";
    assert_matches!(
        provider().populate(xml),
        Err(GeoTextError::UnresolvedGeometryType)
    );

    let typed = GmlProvider::builder()
        .with_geometry_type(GmlGeometryType::Point)
        .build()
        .expect("valid configuration")
        .populate(xml)
        .expect("valid document");
    assert!(typed.is_empty());
    assert_eq!(typed.envelope(), None);
}

#[test]
fn missing_layer_name() {
    let xml = POINTS.replace("<gml:name>cities</gml:name>", "");
    assert_matches!(
        provider().populate(&xml),
        Err(GeoTextError::MissingLayerName)
    );
}

#[test]
fn invalid_feature_fails_document() {
    assert_matches!(
        provider().populate(INVALID),
        Err(GeoTextError::InvalidCoordinates(_))
    );
}

#[test]
fn invalid_feature_is_skipped_in_lenient_mode() {
    let _ = env_logger::builder().is_test(true).try_init();

    let provider = GmlProvider::builder()
        .with_lenient_features()
        .build()
        .expect("valid configuration");
    let layer = provider.populate(INVALID).expect("valid document");
    assert_eq!(attribute_values(layer.shapes(), "id"), ["1", "3"]);

    let mut reader = provider.shapes(INVALID);
    assert_eq!(reader.by_ref().count(), 2);
    assert_eq!(reader.skipped_features(), 1);
}

#[test]
fn broken_xml_is_never_skipped() {
    let provider = GmlProvider::builder()
        .with_lenient_features()
        .build()
        .expect("valid configuration");
    let truncated = &POINTS[..POINTS.len() / 2];

    assert_matches!(
        provider.populate(truncated),
        Err(GeoTextError::UnclosedElement(_) | GeoTextError::Xml(_))
    );
}

#[test]
fn populate_from_memory() {
    let source = MemorySource::new().with_document("roads", ROADS);
    let layer = provider()
        .populate_from(&source, "roads")
        .expect("valid document");
    assert_eq!(layer.len(), 3);

    assert_matches!(
        provider().populate_from(&source, "rivers"),
        Err(GeoTextError::NotFound)
    );
}

#[test]
fn populate_from_files() {
    let source = FileSource::new(concat!(env!("CARGO_MANIFEST_DIR"), "/test-data"));
    let layer = provider()
        .populate_from(&source, "polygons.gml")
        .expect("valid document");
    assert_eq!(layer.name(), "lakes");

    assert_matches!(
        provider().populate_from(&source, "missing.gml"),
        Err(GeoTextError::FsIo(_))
    );
}
