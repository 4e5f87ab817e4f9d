use std::f64::consts::{FRAC_PI_2, PI};

use kurbo::Vec2;

use crate::geometry::point::Point;

/// Directed segment from `a` to `b`.
///
/// Length, heading and angles are derived on demand; nothing besides the two endpoints is
/// stored.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Vector {
    pub a: Point,
    pub b: Point,
}

impl Vector {
    pub const fn new(a: Point, b: Point) -> Self {
        Self { a, b }
    }

    /// Segment starting at `origin` with direction `phi` (radians, `cos`/`sin` convention).
    pub fn from_polar(origin: Point, phi: f64, length: f64) -> Self {
        let (sin, cos) = phi.sin_cos();
        Self::new(origin, origin.translate(length * cos, length * sin))
    }

    /// Displacement `b - a`.
    pub fn delta(&self) -> Vec2 {
        Vec2::new(self.b.x - self.a.x, self.b.y - self.a.y)
    }

    pub fn length(&self) -> f64 {
        self.delta().hypot()
    }

    /// Unit direction of the segment, or the zero vector for a degenerate segment.
    pub fn heading(&self) -> Vec2 {
        let len = self.length();
        if len == 0.0 {
            return Vec2::ZERO;
        }
        self.delta() / len
    }

    /// Heading angle as `atan2(x, y)`.
    ///
    /// The swapped argument order measures the angle from the `+y` axis; [`Self::polar_angle`]
    /// converts it back for use with [`Self::from_polar`].
    pub fn phi(&self) -> f64 {
        let h = self.heading();
        h.x.atan2(h.y)
    }

    /// Conventional direction angle (`atan2(y, x)`), derived from [`Self::phi`].
    pub fn polar_angle(&self) -> f64 {
        FRAC_PI_2 - self.phi()
    }

    /// Angle between the displacements of `self` and `other`, in `[0, π]`.
    ///
    /// Falls back to `π` whenever the cosine leaves `[-1, 1]` through rounding or either
    /// segment has zero length.
    pub fn angle_between(&self, other: &Vector) -> f64 {
        let d1 = self.delta();
        let d2 = other.delta();
        angle_from_cosine(d1.dot(d2) / (self.length() * other.length()))
    }

    /// Signed turn direction from `self` to `other`: `1.0` counter-clockwise in the
    /// `cos`/`sin` convention, `-1.0` clockwise, `0.0` when collinear.
    pub fn turn_sign(&self, other: &Vector) -> f64 {
        let cross = self.delta().cross(other.delta());
        if cross > 0.0 {
            1.0
        } else if cross < 0.0 {
            -1.0
        } else {
            0.0
        }
    }
}

pub(crate) fn angle_from_cosine(cosine: f64) -> f64 {
    let angle = cosine.acos();
    if angle.is_finite() { angle } else { PI }
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/vector.rs"]
mod tests;
