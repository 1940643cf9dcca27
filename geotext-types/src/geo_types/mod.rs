//! Interoperability with the `geo-types` crate.
//!
//! `geo-types` geometries implement the iteration traits of this crate, and [`Geom`] can be converted
//! from and into [`::geo_types::Geometry`].

mod linestring;
mod point;
mod polygon;

use ::geo_types::Geometry as GeoGeometry;

use crate::cartesian::Coord;
use crate::error::GeoTextTypesError;
use crate::geometry::Geom;
use crate::impls::{
    GeometryCollection, LineString, LinearRing, MultiLineString, MultiPoint, MultiPolygon, Point,
    Polygon,
};

impl From<GeoGeometry<f64>> for Geom {
    fn from(value: GeoGeometry<f64>) -> Self {
        match value {
            GeoGeometry::Point(p) => Point::from(Coord::from_point(&p)).into(),
            GeoGeometry::Line(line) => LineString::new(vec![
                Coord::from_point(&line.start),
                Coord::from_point(&line.end),
            ])
            .into(),
            GeoGeometry::LineString(line) => LineString::from_contour(&line).into(),
            GeoGeometry::Polygon(polygon) => Polygon::from_polygon(&polygon).into(),
            GeoGeometry::MultiPoint(points) => points
                .0
                .iter()
                .map(|p| Point::from(Coord::from_point(p)))
                .collect::<MultiPoint>()
                .into(),
            GeoGeometry::MultiLineString(lines) => lines
                .0
                .iter()
                .map(LineString::from_contour)
                .collect::<MultiLineString>()
                .into(),
            GeoGeometry::MultiPolygon(polygons) => polygons
                .0
                .iter()
                .map(Polygon::from_polygon)
                .collect::<MultiPolygon>()
                .into(),
            GeoGeometry::GeometryCollection(collection) => collection
                .0
                .into_iter()
                .map(Geom::from)
                .collect::<GeometryCollection>()
                .into(),
            GeoGeometry::Rect(rect) => Polygon::from_polygon(&rect.to_polygon()).into(),
            GeoGeometry::Triangle(triangle) => Polygon::from_polygon(&triangle.to_polygon()).into(),
        }
    }
}

/// Fails with [`GeoTextTypesError::Conversion`] if the geometry contains an empty point, since
/// `geo-types` has no representation for it.
///
/// Note that `geo-types` closes polygon rings on construction, so open rings gain a closing point.
impl TryFrom<Geom> for GeoGeometry<f64> {
    type Error = GeoTextTypesError;

    fn try_from(value: Geom) -> Result<Self, Self::Error> {
        Ok(match value {
            Geom::Point(p) => GeoGeometry::Point(to_geo_point(&p)?),
            Geom::LineString(line) => GeoGeometry::LineString(to_geo_line(line.points())),
            Geom::Polygon(polygon) => GeoGeometry::Polygon(to_geo_polygon(&polygon)),
            Geom::MultiPoint(points) => GeoGeometry::MultiPoint(::geo_types::MultiPoint(
                points
                    .parts()
                    .iter()
                    .map(to_geo_point)
                    .collect::<Result<_, _>>()?,
            )),
            Geom::MultiLineString(lines) => {
                GeoGeometry::MultiLineString(::geo_types::MultiLineString(
                    lines.parts().iter().map(|l| to_geo_line(l.points())).collect(),
                ))
            }
            Geom::MultiPolygon(polygons) => GeoGeometry::MultiPolygon(::geo_types::MultiPolygon(
                polygons.parts().iter().map(to_geo_polygon).collect(),
            )),
            Geom::GeometryCollection(collection) => {
                GeoGeometry::GeometryCollection(::geo_types::GeometryCollection(
                    collection
                        .parts()
                        .iter()
                        .cloned()
                        .map(GeoGeometry::try_from)
                        .collect::<Result<_, _>>()?,
                ))
            }
        })
    }
}

fn to_geo_point(point: &Point) -> Result<::geo_types::Point<f64>, GeoTextTypesError> {
    let coord = point.coord().ok_or_else(|| {
        GeoTextTypesError::Conversion("empty point cannot be represented by geo-types".into())
    })?;
    Ok(::geo_types::Point::new(coord.x(), coord.y()))
}

fn to_geo_line(points: &[Coord]) -> ::geo_types::LineString<f64> {
    ::geo_types::LineString(
        points
            .iter()
            .map(|c| ::geo_types::Coord { x: c.x(), y: c.y() })
            .collect(),
    )
}

fn to_geo_polygon(polygon: &Polygon) -> ::geo_types::Polygon<f64> {
    ::geo_types::Polygon::new(
        to_geo_line(polygon.exterior().points()),
        polygon
            .interiors()
            .iter()
            .map(|ring: &LinearRing| to_geo_line(ring.points()))
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;
    use crate::cartesian::Envelope;
    use crate::geometry::Geometry;
    use crate::multi_contour::MultiContour;

    #[test]
    fn rect_becomes_polygon() {
        let rect = ::geo_types::Rect::new(
            ::geo_types::coord! { x: 0.0, y: 0.0 },
            ::geo_types::coord! { x: 2.0, y: 3.0 },
        );
        let geom = Geom::from(GeoGeometry::Rect(rect));
        assert_matches!(geom, Geom::Polygon(_));
        assert_eq!(geom.envelope(), Some(Envelope::new(0.0, 0.0, 2.0, 3.0)));
    }

    #[test]
    fn geo_types_envelope_through_traits() {
        let lines = ::geo_types::MultiLineString(vec![
            ::geo_types::LineString::from(vec![(0.0, 0.0), (1.0, 1.0)]),
            ::geo_types::LineString::from(vec![(-5.0, 2.0), (3.0, 4.0)]),
        ]);
        assert_eq!(lines.contours().count(), 2);
        assert_eq!(
            Envelope::of_multi_contour(&lines),
            Some(Envelope::new(-5.0, 0.0, 3.0, 4.0))
        );
    }

    #[test]
    fn converts_back_and_forth() {
        let geom: Geom = MultiPoint::from(vec![Point::new(1.0, 2.0), Point::new(3.0, 4.0)]).into();
        let geo = GeoGeometry::try_from(geom.clone()).expect("conversion failed");
        assert_matches!(&geo, GeoGeometry::MultiPoint(mp) if mp.0.len() == 2);
        assert_eq!(Geom::from(geo), geom);
    }

    #[test]
    fn empty_point_is_not_convertible() {
        let geom: Geom = GeometryCollection::from(vec![Point::empty().into()]).into();
        assert_matches!(
            GeoGeometry::try_from(geom),
            Err(GeoTextTypesError::Conversion(_))
        );
    }
}
