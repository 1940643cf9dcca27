/// A point in 2d cartesian space.
pub trait CartesianPoint2d {
    /// X coordinate of the point.
    fn x(&self) -> f64;
    /// Y coordinate of the point.
    fn y(&self) -> f64;

    /// Returns true if both coordinates of the points are exactly equal.
    fn equal(&self, other: &impl CartesianPoint2d) -> bool {
        self.x() == other.x() && self.y() == other.y()
    }

    /// Squared euclidean distance between two points.
    fn distance_sq(&self, other: &impl CartesianPoint2d) -> f64 {
        let dx = self.x() - other.x();
        let dy = self.y() - other.y();
        dx * dx + dy * dy
    }
}
