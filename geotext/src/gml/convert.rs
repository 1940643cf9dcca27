//! Conversion of GML geometry elements into [`Geom`].

use geotext_types::cartesian::Coord;
use geotext_types::impls::{
    GeometryCollection, LineString, LinearRing, MultiLineString, MultiPoint, MultiPolygon, Point,
    Polygon,
};
use geotext_types::Geom;

use crate::error::GeoTextError;
use crate::gml::element::GmlElement;

/// Local names of all elements that can be converted by [`to_geom`].
pub(crate) const GEOMETRY_ELEMENTS: [&str; 12] = [
    "Point",
    "LineString",
    "Curve",
    "Polygon",
    "PolygonPatch",
    "Surface",
    "MultiPoint",
    "MultiLineString",
    "MultiCurve",
    "MultiPolygon",
    "MultiSurface",
    "MultiGeometry",
];

pub(crate) fn to_geom(element: &GmlElement) -> Result<Geom, GeoTextError> {
    Ok(match element.name.as_str() {
        "Point" => point(element)?.into(),
        "LineString" | "Curve" => line_string(element)?.into(),
        "Polygon" | "PolygonPatch" => polygon(element)?.into(),
        "Surface" => {
            let mut polygons = surface(element)?;
            if polygons.len() == 1 {
                polygons.remove(0).into()
            } else {
                MultiPolygon::from(polygons).into()
            }
        }
        "MultiPoint" => multi_point(element)?.into(),
        "MultiLineString" | "MultiCurve" => multi_line_string(element)?.into(),
        "MultiPolygon" | "MultiSurface" => multi_polygon(element)?.into(),
        "MultiGeometry" => members(element)
            .map(to_geom)
            .collect::<Result<GeometryCollection, _>>()?
            .into(),
        other => {
            return Err(GeoTextError::InvalidGeometry(format!(
                "unsupported geometry element <{other}>"
            )))
        }
    })
}

/// Children of all `*Member` and `*Members` elements.
fn members(element: &GmlElement) -> impl Iterator<Item = &GmlElement> {
    element
        .children
        .iter()
        .filter(|child| child.name.ends_with("Member") || child.name.ends_with("Members"))
        .flat_map(|member| member.children.iter())
}

fn point(element: &GmlElement) -> Result<Point, GeoTextError> {
    coordinates(element)?
        .first()
        .map(|coord| Point::from(*coord))
        .ok_or_else(|| GeoTextError::InvalidGeometry("point has no coordinates".into()))
}

fn line_string(element: &GmlElement) -> Result<LineString, GeoTextError> {
    if element.name != "Curve" {
        return coordinates(element).map(LineString::new);
    }

    let segments = element
        .child("segments")
        .ok_or_else(|| GeoTextError::InvalidGeometry("curve has no segments".into()))?;

    let mut points = vec![];
    for segment in &segments.children {
        append_joined(&mut points, coordinates(segment)?);
    }

    Ok(LineString::new(points))
}

/// Consecutive segments share the end point, it is kept only once.
fn append_joined(points: &mut Vec<Coord>, segment: Vec<Coord>) {
    let skip = usize::from(points.last().is_some() && points.last() == segment.first());
    points.extend(segment.into_iter().skip(skip));
}

fn ring(boundary: &GmlElement) -> Result<LinearRing, GeoTextError> {
    let ring = boundary
        .children
        .first()
        .ok_or_else(|| GeoTextError::InvalidGeometry(format!("<{}> is empty", boundary.name)))?;

    match ring.name.as_str() {
        "LinearRing" => coordinates(ring).map(LinearRing::new),
        "Ring" => {
            let mut points = vec![];
            for curve in members(ring) {
                append_joined(&mut points, line_string(curve)?.into_points());
            }
            Ok(LinearRing::new(points))
        }
        other => Err(GeoTextError::InvalidGeometry(format!(
            "unexpected ring element <{other}>"
        ))),
    }
}

fn polygon(element: &GmlElement) -> Result<Polygon, GeoTextError> {
    let mut exterior = None;
    let mut interiors = vec![];
    for child in &element.children {
        match child.name.as_str() {
            "outerBoundaryIs" | "exterior" => exterior = Some(ring(child)?),
            "innerBoundaryIs" | "interior" => interiors.push(ring(child)?),
            _ => {}
        }
    }

    let exterior = exterior
        .ok_or_else(|| GeoTextError::InvalidGeometry("polygon has no exterior ring".into()))?;
    Ok(Polygon::new(exterior, interiors))
}

fn surface(element: &GmlElement) -> Result<Vec<Polygon>, GeoTextError> {
    let patches = element
        .child("patches")
        .map(|patches| patches.children.as_slice())
        .unwrap_or_default();

    if patches.is_empty() {
        return Err(GeoTextError::InvalidGeometry(
            "surface has no patches".into(),
        ));
    }

    patches.iter().map(polygon).collect()
}

fn multi_point(element: &GmlElement) -> Result<MultiPoint, GeoTextError> {
    members(element)
        .map(|member| match member.name.as_str() {
            "Point" => point(member),
            other => Err(unexpected_member(other, &element.name)),
        })
        .collect()
}

fn multi_line_string(element: &GmlElement) -> Result<MultiLineString, GeoTextError> {
    members(element)
        .map(|member| match member.name.as_str() {
            "LineString" | "Curve" => line_string(member),
            other => Err(unexpected_member(other, &element.name)),
        })
        .collect()
}

fn multi_polygon(element: &GmlElement) -> Result<MultiPolygon, GeoTextError> {
    let mut polygons = vec![];
    for member in members(element) {
        match member.name.as_str() {
            "Polygon" | "PolygonPatch" => polygons.push(polygon(member)?),
            "Surface" => polygons.extend(surface(member)?),
            other => return Err(unexpected_member(other, &element.name)),
        }
    }

    Ok(polygons.into())
}

fn unexpected_member(member: &str, parent: &str) -> GeoTextError {
    GeoTextError::InvalidGeometry(format!("<{member}> cannot be a member of <{parent}>"))
}

/// Reads all coordinates written directly inside the element.
fn coordinates(element: &GmlElement) -> Result<Vec<Coord>, GeoTextError> {
    let mut coords = vec![];
    for child in &element.children {
        match child.name.as_str() {
            "coordinates" => coords.extend(parse_coordinates(child)?),
            "pos" => coords.push(parse_pos(child)?),
            "posList" => coords.extend(parse_pos_list(child)?),
            "coord" => coords.push(parse_coord(child)?),
            "pointProperty" | "pointRep" => {
                if let Some(point) = child.child("Point") {
                    coords.extend(coordinates(point)?.first());
                }
            }
            _ => {}
        }
    }

    Ok(coords)
}

fn parse_number(value: &str) -> Result<f64, GeoTextError> {
    value
        .trim()
        .parse()
        .map_err(|_| GeoTextError::InvalidCoordinates(format!("{value:?} is not a number")))
}

/// GML2 `coordinates` with `decimal`, `cs` and `ts` separators.
fn parse_coordinates(element: &GmlElement) -> Result<Vec<Coord>, GeoTextError> {
    let decimal = element.attribute("decimal").unwrap_or(".");
    let cs = element.attribute("cs").unwrap_or(",");
    let ts = element.attribute("ts").filter(|ts| !ts.trim().is_empty());

    if cs.is_empty() || decimal.is_empty() {
        return Err(GeoTextError::InvalidCoordinates(
            "empty coordinate separator".into(),
        ));
    }

    let tuples: Vec<String> = match ts {
        Some(ts) => element.text.split(ts).map(str::to_string).collect(),
        None => {
            // Whitespace around the coordinate separator does not split tuples.
            let joined = element
                .text
                .split(cs)
                .map(str::trim)
                .collect::<Vec<_>>()
                .join(cs);
            joined.split_whitespace().map(str::to_string).collect()
        }
    };

    tuples
        .iter()
        .map(|tuple| tuple.trim())
        .filter(|tuple| !tuple.is_empty())
        .map(|tuple| {
            let mut values = tuple.split(cs).map(|value| {
                if decimal == "." {
                    parse_number(value)
                } else {
                    parse_number(&value.replace(decimal, "."))
                }
            });

            match (values.next(), values.next()) {
                (Some(x), Some(y)) => Ok(Coord::new(x?, y?)),
                _ => Err(GeoTextError::InvalidCoordinates(format!(
                    "{tuple:?} has less than two ordinates"
                ))),
            }
        })
        .collect()
}

fn parse_pos(element: &GmlElement) -> Result<Coord, GeoTextError> {
    let mut values = element.text.split_whitespace().map(parse_number);
    match (values.next(), values.next()) {
        (Some(x), Some(y)) => Ok(Coord::new(x?, y?)),
        _ => Err(GeoTextError::InvalidCoordinates(format!(
            "position {:?} has less than two ordinates",
            element.text
        ))),
    }
}

fn parse_pos_list(element: &GmlElement) -> Result<Vec<Coord>, GeoTextError> {
    let dimension = match element
        .attribute("srsDimension")
        .or_else(|| element.attribute("dimension"))
    {
        Some(value) => value.trim().parse::<usize>().map_err(|_| {
            GeoTextError::InvalidCoordinates(format!("invalid dimension {value:?}"))
        })?,
        None => 2,
    };

    if dimension < 2 {
        return Err(GeoTextError::InvalidCoordinates(format!(
            "unsupported dimension {dimension}"
        )));
    }

    let values = element
        .text
        .split_whitespace()
        .map(parse_number)
        .collect::<Result<Vec<_>, _>>()?;

    if values.len() % dimension != 0 {
        return Err(GeoTextError::InvalidCoordinates(format!(
            "{} values cannot be split into {dimension}D positions",
            values.len()
        )));
    }

    Ok(values
        .chunks(dimension)
        .map(|position| Coord::new(position[0], position[1]))
        .collect())
}

fn parse_coord(element: &GmlElement) -> Result<Coord, GeoTextError> {
    let ordinate = |name: &str| {
        element
            .child(name)
            .ok_or_else(|| GeoTextError::InvalidCoordinates(format!("<coord> has no <{name}>")))
            .and_then(|child| parse_number(&child.text))
    };

    Ok(Coord::new(ordinate("X")?, ordinate("Y")?))
}
