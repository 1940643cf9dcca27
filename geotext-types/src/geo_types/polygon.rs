use geo_types::{LineString, MultiPoint, MultiPolygon, Point, Polygon};

impl crate::polygon::Polygon for Polygon<f64> {
    type Contour = LineString<f64>;

    fn outer_contour(&self) -> &Self::Contour {
        self.exterior()
    }

    fn inner_contours(&self) -> impl Iterator<Item = &'_ Self::Contour> {
        self.interiors().iter()
    }
}

impl crate::multi_polygon::MultiPolygon for MultiPolygon<f64> {
    type Polygon = Polygon<f64>;

    fn polygons(&self) -> impl Iterator<Item = &Self::Polygon> {
        self.0.iter()
    }
}

impl crate::multi_point::MultiPoint for MultiPoint<f64> {
    type Point = Point<f64>;

    fn iter_points(&self) -> impl Iterator<Item = &'_ Self::Point> {
        self.0.iter()
    }
}
