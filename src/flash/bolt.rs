use std::f64::consts::FRAC_PI_2;

use kurbo::BezPath;
use rand::Rng;

use crate::{
    flash::outline::Outline,
    geometry::{point::Point, vector::Vector},
};

/// Redraws allowed for an out-of-canvas candidate before [`Flash::random_walk`] falls back to
/// a jitter around the current node.
pub const MAX_WALK_RETRIES: usize = 10;

/// Full width of the fallback jitter box, centered on the current node.
pub const JITTER_SPAN: f64 = 10.0;

/// Range the call-time default step length is drawn from.
pub const DEFAULT_STEP_RANGE: std::ops::RangeInclusive<u32> = 1..=10;

/// One lightning bolt: a centerline grown node by node from `start` toward `end`.
///
/// Every instance owns its node list. `nodes[0]` is always `start` and the list only grows.
#[derive(Clone, Debug, PartialEq)]
pub struct Flash {
    width: f64,
    height: f64,
    start: Point,
    end: Point,
    nodes: Vec<Point>,
}

/// Bookkeeping for a single [`Flash::random_walk`] call.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WalkStep {
    /// The node that was appended.
    pub node: Point,
    /// Candidates rejected for leaving the canvas.
    pub rejected: usize,
    /// `true` when every candidate was rejected and the jitter fallback produced `node`.
    pub jittered: bool,
}

impl Flash {
    /// Bolt from the bottom-center to the top-center of a `width x height` canvas.
    pub fn new(width: f64, height: f64) -> Self {
        let cx = width * 0.5;
        Self::with_endpoints(width, height, Point::new(cx, height), Point::new(cx, 0.0))
    }

    pub fn with_endpoints(width: f64, height: f64, start: Point, end: Point) -> Self {
        Self {
            width,
            height,
            start,
            end,
            nodes: vec![start],
        }
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn start(&self) -> Point {
        self.start
    }

    pub fn end(&self) -> Point {
        self.end
    }

    pub fn nodes(&self) -> &[Point] {
        &self.nodes
    }

    /// The most recently appended node.
    pub fn current_point(&self) -> Point {
        self.nodes.last().copied().unwrap_or(self.start)
    }

    /// Consecutive node pairs as segments.
    pub fn edges(&self) -> Vec<Vector> {
        self.nodes
            .windows(2)
            .map(|pair| Vector::new(pair[0], pair[1]))
            .collect()
    }

    pub fn last_edge(&self) -> Option<Vector> {
        match self.nodes.as_slice() {
            [.., a, b] => Some(Vector::new(*a, *b)),
            _ => None,
        }
    }

    /// `true` once the current node is strictly within `radius` of `end`.
    pub fn is_spent(&self, radius: f64) -> bool {
        self.current_point().within_perimeter(self.end, radius)
    }

    /// Grow the bolt by exactly one node.
    ///
    /// `length` is the base step, `data` an external bias (typically in `[-1, 1]`) and `mix`
    /// the blend weight in `[0, 1]` between pure randomness and `data`.
    pub fn random_walk<R: Rng>(
        &mut self,
        rng: &mut R,
        length: f64,
        data: f64,
        mix: f64,
    ) -> WalkStep {
        for rejected in 0..=MAX_WALK_RETRIES {
            let candidate = self.candidate(rng, length, data, mix);
            if candidate.within_limits(self.width, self.height) {
                self.nodes.push(candidate);
                return WalkStep {
                    node: candidate,
                    rejected,
                    jittered: false,
                };
            }
        }

        let half = JITTER_SPAN * 0.5;
        let node = self
            .current_point()
            .translate(rng.random_range(-half..=half), rng.random_range(-half..=half))
            .clamp(self.width, self.height);
        tracing::trace!(x = node.x, y = node.y, "walk fell back to jitter");
        self.nodes.push(node);
        WalkStep {
            node,
            rejected: MAX_WALK_RETRIES + 1,
            jittered: true,
        }
    }

    /// [`Self::random_walk`] with a step length drawn from [`DEFAULT_STEP_RANGE`] on every call.
    pub fn random_walk_default<R: Rng>(&mut self, rng: &mut R) -> WalkStep {
        let length = f64::from(rng.random_range(DEFAULT_STEP_RANGE));
        self.random_walk(rng, length, 0.0, 0.0)
    }

    // Angles below live in the bolt's frame, where π/2 points from the current node to `end`.
    fn candidate<R: Rng>(&self, rng: &mut R, length: f64, data: f64, mix: f64) -> Point {
        let current = self.current_point();
        let to_end = Vector::new(current, self.end);
        let frame = to_end.polar_angle() - FRAC_PI_2;

        let deflect = rng.random::<f64>() * (1.0 - mix) + data * mix;
        let factor: i8 = rng.random_range(-1..=1);

        let (angle, step) = if factor == 0 {
            let bend = self
                .last_edge()
                .map_or(0.0, |edge| edge.angle_between(&to_end));
            (FRAC_PI_2 - bend + (deflect - 0.5), length * length)
        } else {
            (FRAC_PI_2 - f64::from(factor) * deflect * FRAC_PI_2, length)
        };

        Vector::from_polar(current, frame + angle, step).b
    }

    /// Centerline through every node as an open polyline.
    pub fn path(&self) -> BezPath {
        let mut path = BezPath::new();
        let mut nodes = self.nodes.iter();
        if let Some(first) = nodes.next() {
            path.move_to(*first);
            for node in nodes {
                path.line_to(*node);
            }
        }
        path
    }

    /// Closed, tapering polygon around the centerline.
    ///
    /// The forward side traces every node; the backflash side starts at `start` and offsets
    /// each interior node along the bisector of its two edges by
    /// `thickness - thickness / (i + 1)` for edge index `i`, so the shape widens toward the tip.
    pub fn outline(&self, thickness: f64) -> Outline {
        let edges = self.edges();
        let mut backflash = Vec::with_capacity(edges.len());
        backflash.push(self.start);

        for (i, pair) in edges.windows(2).enumerate() {
            let (incoming, outgoing) = (pair[0], pair[1]);
            let bend = incoming.angle_between(&outgoing);
            let bisector =
                incoming.polar_angle() + incoming.turn_sign(&outgoing) * bend * 0.5 + FRAC_PI_2;
            let offset = thickness - thickness / (i as f64 + 1.0);
            backflash.push(Vector::from_polar(incoming.b, bisector, offset).b);
        }

        let mut vertices = Vec::with_capacity(self.nodes.len() + backflash.len());
        vertices.extend_from_slice(&self.nodes);
        vertices.extend(backflash.iter().rev());
        Outline::new(vertices, self.nodes.len())
    }
}

impl std::fmt::Display for Flash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, node) in self.nodes.iter().enumerate() {
            if i > 0 {
                f.write_str(" → ")?;
            }
            write!(f, "<{}, {}>", node.x, node.y)?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/flash/bolt.rs"]
mod tests;
