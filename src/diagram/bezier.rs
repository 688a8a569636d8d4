//! Cubic connector curves sampled by arc length.

use iced::Point;

/// Fraction of the horizontal distance used for both tangent handles.
pub const HANDLE_FRACTION: f32 = 0.45;

/// Polyline resolution of the arc-length table.
pub const DEFAULT_SUBDIVISIONS: usize = 128;

/// Curves shorter than this are measured as a single point. Sampling a
/// curve whose control points coincide still yields float noise.
pub const MIN_LENGTH: f32 = 1e-3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicBezier {
    pub from: Point,
    pub control_a: Point,
    pub control_b: Point,
    pub to: Point,
}

impl CubicBezier {
    /// S-shaped connector from `from` to `to`.
    ///
    /// Both handles are offset horizontally only: the first leaves `from`
    /// towards `to`, the second arrives at `to` from the side of `from`.
    pub fn connector(from: Point, to: Point, handle_fraction: f32) -> Self {
        let dx = to.x - from.x;

        Self {
            from,
            control_a: Point::new(from.x + dx * handle_fraction, from.y),
            control_b: Point::new(to.x - dx * handle_fraction, to.y),
            to,
        }
    }

    /// Point at curve parameter `t` in `[0, 1]`.
    pub fn eval(&self, t: f32) -> Point {
        let t = t.clamp(0.0, 1.0);
        let u = 1.0 - t;

        let w0 = u * u * u;
        let w1 = 3.0 * u * u * t;
        let w2 = 3.0 * u * t * t;
        let w3 = t * t * t;

        Point::new(
            w0 * self.from.x + w1 * self.control_a.x + w2 * self.control_b.x + w3 * self.to.x,
            w0 * self.from.y + w1 * self.control_a.y + w2 * self.control_b.y + w3 * self.to.y,
        )
    }
}

/// A [`CubicBezier`] flattened into a polyline with cumulative lengths, so a
/// point can be looked up by distance travelled along the curve.
#[derive(Debug, Clone, PartialEq)]
pub struct ArcLengthPath {
    curve: CubicBezier,
    samples: Vec<Point>,
    /// `cumulative[i]` is the length from the start to `samples[i]`.
    cumulative: Vec<f32>,
}

impl ArcLengthPath {
    pub fn new(curve: CubicBezier, subdivisions: usize) -> Self {
        let subdivisions = subdivisions.max(1);

        let samples: Vec<Point> = (0..=subdivisions)
            .map(|i| curve.eval(i as f32 / subdivisions as f32))
            .collect();

        let mut cumulative = Vec::with_capacity(samples.len());
        let mut travelled = 0.0;
        cumulative.push(travelled);

        for pair in samples.windows(2) {
            travelled += pair[0].distance(pair[1]);
            cumulative.push(travelled);
        }

        if !(travelled >= MIN_LENGTH) {
            return Self {
                curve,
                samples: vec![curve.from],
                cumulative: vec![0.0],
            };
        }

        Self {
            curve,
            samples,
            cumulative,
        }
    }

    /// Nothing to travel along: the curve collapsed to its start point.
    pub fn is_degenerate(&self) -> bool {
        !(self.total_length() > 0.0)
    }

    pub fn curve(&self) -> &CubicBezier {
        &self.curve
    }

    pub fn total_length(&self) -> f32 {
        self.cumulative.last().copied().unwrap_or(0.0)
    }

    /// Point `distance` along the curve. Distances outside `[0, total]` are
    /// clamped to the ends.
    pub fn point_at_length(&self, distance: f32) -> Point {
        if self.is_degenerate() {
            return self.curve.from;
        }

        let total = self.total_length();

        let distance = if distance.is_nan() { 0.0 } else { distance.clamp(0.0, total) };

        // first sample at or beyond `distance`
        let upper = self
            .cumulative
            .partition_point(|&length| length < distance)
            .clamp(1, self.samples.len() - 1);
        let lower = upper - 1;

        let span = self.cumulative[upper] - self.cumulative[lower];
        let t = if span > 0.0 {
            (distance - self.cumulative[lower]) / span
        } else {
            0.0
        };

        let (a, b) = (self.samples[lower], self.samples[upper]);
        Point::new(a.x + (b.x - a.x) * t, a.y + (b.y - a.y) * t)
    }

    /// Point halfway along the curve.
    pub fn midpoint(&self) -> Point {
        self.point_at_length(self.total_length() / 2.0)
    }
}
