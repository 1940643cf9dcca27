//! Writes geometries as WKT.

use std::fmt::{Display, Formatter, Result, Write};

use geotext_types::cartesian::Coord;
use geotext_types::impls::{Point, Polygon};
use geotext_types::{Geom, Geometry};

/// Returns canonical WKT representation of the geometry.
///
/// Numbers are written in the shortest form that reads back to the same value, so
/// `parse(&to_wkt(&geom)) == Ok(geom)` holds for every geometry with finite coordinates.
///
/// ```
/// use geotext_wkt::{parse, to_wkt};
///
/// let geom = parse("MultiPoint (1 2, 3.5 4)").unwrap();
/// assert_eq!(to_wkt(&geom), "MULTIPOINT((1 2),(3.5 4))");
/// ```
pub fn to_wkt(geom: &Geom) -> String {
    WktDisplay(geom).to_string()
}

/// [`Display`] adapter writing a geometry as WKT.
#[derive(Debug, Copy, Clone)]
pub struct WktDisplay<'a>(pub &'a Geom);

impl Display for WktDisplay<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write_geom(f, self.0)
    }
}

fn write_geom(f: &mut Formatter<'_>, geom: &Geom) -> Result {
    f.write_str(geom.geometry_type().wkt_keyword())?;
    if geom.is_empty() {
        return f.write_str(" EMPTY");
    }

    match geom {
        Geom::Point(point) => write_point(f, point),
        Geom::LineString(line) => write_coords(f, line.points()),
        Geom::Polygon(polygon) => write_polygon(f, polygon),
        Geom::MultiPoint(points) => write_list(f, points.parts(), write_point),
        Geom::MultiLineString(lines) => {
            write_list(f, lines.parts(), |f, line| write_coords(f, line.points()))
        }
        Geom::MultiPolygon(polygons) => write_list(f, polygons.parts(), write_polygon),
        Geom::GeometryCollection(collection) => write_list(f, collection.parts(), write_geom),
    }
}

fn write_list<T>(
    f: &mut Formatter<'_>,
    items: &[T],
    write_item: impl Fn(&mut Formatter<'_>, &T) -> Result,
) -> Result {
    if items.is_empty() {
        return f.write_str("EMPTY");
    }

    f.write_char('(')?;
    for (index, item) in items.iter().enumerate() {
        if index > 0 {
            f.write_char(',')?;
        }
        write_item(f, item)?;
    }
    f.write_char(')')
}

fn write_point(f: &mut Formatter<'_>, point: &Point) -> Result {
    match point.coord() {
        Some(coord) => write_coords(f, &[coord]),
        None => f.write_str("EMPTY"),
    }
}

fn write_coords(f: &mut Formatter<'_>, coords: &[Coord]) -> Result {
    write_list(f, coords, |f, coord| write!(f, "{} {}", coord.x(), coord.y()))
}

fn write_polygon(f: &mut Formatter<'_>, polygon: &Polygon) -> Result {
    if polygon.exterior().is_empty() && polygon.interiors().is_empty() {
        return f.write_str("EMPTY");
    }

    let rings: Vec<&[Coord]> = std::iter::once(polygon.exterior().points())
        .chain(polygon.interiors().iter().map(|ring| ring.points()))
        .collect();
    write_list(f, &rings, |f, ring| write_coords(f, ring))
}
