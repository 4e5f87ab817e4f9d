use kurbo::BezPath;

use crate::geometry::point::Point;

/// Closed polygon produced by [`Flash::outline`](crate::Flash::outline).
///
/// The first `forward` vertices trace the centerline; the rest are the backflash side in
/// reverse, ending back at the bolt's start.
#[derive(Clone, Debug, PartialEq)]
pub struct Outline {
    vertices: Vec<Point>,
    forward: usize,
}

impl Outline {
    pub(crate) fn new(vertices: Vec<Point>, forward: usize) -> Self {
        Self { vertices, forward }
    }

    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    /// Number of centerline vertices at the front of [`Self::vertices`].
    pub fn forward_len(&self) -> usize {
        self.forward
    }

    /// Number of backflash vertices at the back of [`Self::vertices`].
    pub fn backflash_len(&self) -> usize {
        self.vertices.len() - self.forward
    }

    pub fn is_closed(&self) -> bool {
        match (self.vertices.first(), self.vertices.last()) {
            (Some(first), Some(last)) => first == last,
            _ => false,
        }
    }

    /// Fillable path: move to the first vertex, line through the rest, close.
    pub fn to_bez_path(&self) -> BezPath {
        let mut path = BezPath::new();
        let mut vertices = self.vertices.iter();
        if let Some(first) = vertices.next() {
            path.move_to(*first);
            for v in vertices {
                path.line_to(*v);
            }
            path.close_path();
        }
        path
    }
}
