/// A 2D coordinate. Points carry no identity beyond their coordinates and are copied freely.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Return a new point offset by `(dx, dy)`.
    pub fn translate(self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    /// `true` iff the point lies inside `[0, max_x] x [0, max_y]` (borders included).
    pub fn within_limits(self, max_x: f64, max_y: f64) -> bool {
        (0.0..=max_x).contains(&self.x) && (0.0..=max_y).contains(&self.y)
    }

    /// `true` iff the Euclidean distance to `other` is strictly less than `radius`.
    pub fn within_perimeter(self, other: Point, radius: f64) -> bool {
        self.distance(other) < radius
    }

    pub fn distance(self, other: Point) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    /// Nearest point inside `[0, max_x] x [0, max_y]`.
    pub fn clamp(self, max_x: f64, max_y: f64) -> Self {
        Self::new(self.x.clamp(0.0, max_x), self.y.clamp(0.0, max_y))
    }
}

impl From<Point> for kurbo::Point {
    fn from(p: Point) -> Self {
        kurbo::Point::new(p.x, p.y)
    }
}

impl From<kurbo::Point> for Point {
    fn from(p: kurbo::Point) -> Self {
        Point::new(p.x, p.y)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/point.rs"]
mod tests;
