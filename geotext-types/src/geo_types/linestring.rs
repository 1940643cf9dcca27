use geo_types::{Coord, LineString, MultiLineString};

use crate::contour::Contour;
use crate::multi_contour::MultiContour;

impl Contour for LineString<f64> {
    type Point = Coord<f64>;

    fn iter_points(&self) -> impl Iterator<Item = &'_ Self::Point> {
        self.0.iter()
    }
}

impl MultiContour for MultiLineString<f64> {
    type Contour = LineString<f64>;

    fn contours(&self) -> impl Iterator<Item = &Self::Contour> {
        self.0.iter()
    }
}
