//! Mapping of percentage series into chart space.
//!
//! Every chart owns a fixed chart-space viewport (width, height and vertical
//! padding). Samples are spread evenly across the width and plotted so that
//! larger values sit higher.

use serde::{Deserialize, Serialize};

/// Upper bound of the percentage domain.
pub const VALUE_MAX: f32 = 100.0;

// ================================================================================
// Utility Types
// ================================================================================

/// Which end of the X axis index 0 is plotted at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Direction {
    /// Index 0 at the left edge.
    #[default]
    LeftToRight,
    /// Index 0 at the right edge.
    RightToLeft,
}

/// Fixed chart-space viewport of a chart instance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartGeometry {
    pub width: f32,
    pub height: f32,
    pub pad_top: f32,
    pub pad_bottom: f32,
}

impl ChartGeometry {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            pad_top: 0.0,
            pad_bottom: 0.0,
        }
    }

    pub fn with_padding(mut self, pad_top: f32, pad_bottom: f32) -> Self {
        self.pad_top = pad_top;
        self.pad_bottom = pad_bottom;
        self
    }

    pub fn usable_height(&self) -> f32 {
        (self.height - self.pad_top - self.pad_bottom).max(0.0)
    }

    /// Horizontal distance between two neighbouring samples, 0 when `len <= 1`.
    pub fn step_x(&self, len: usize) -> f32 {
        if len > 1 {
            self.width / (len - 1) as f32
        } else {
            0.0
        }
    }

    /// X coordinate of sample `index` out of `len`.
    pub fn x_at(&self, index: usize, len: usize, direction: Direction) -> f32 {
        if len <= 1 {
            return 0.0;
        }

        let offset = index as f32 * self.step_x(len);
        match direction {
            Direction::LeftToRight => offset,
            Direction::RightToLeft => self.width - offset,
        }
    }

    /// Y coordinate of a value, clamped to `[0, 100]` first.
    pub fn y_for(&self, value: f32) -> f32 {
        let clamped = sanitize(value).clamp(0.0, VALUE_MAX);
        self.pad_top + ((VALUE_MAX - clamped) / VALUE_MAX) * self.usable_height()
    }
}

impl Default for ChartGeometry {
    fn default() -> Self {
        Self::new(200.0, 50.0)
    }
}

/// A sample placed in chart space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartPoint {
    pub x: f32,
    pub y: f32,
    /// The sample as received, after NaN coercion but before clamping.
    pub value: f32,
}

/// An ordered run of samples.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Series(Vec<f32>);

impl Series {
    pub fn new(values: Vec<f32>) -> Self {
        Self(values.into_iter().map(sanitize).collect())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn values(&self) -> &[f32] {
        &self.0
    }

    pub fn latest(&self) -> Option<f32> {
        self.0.first().copied()
    }
}

impl From<Vec<f32>> for Series {
    fn from(values: Vec<f32>) -> Self {
        Self::new(values)
    }
}

impl FromIterator<f32> for Series {
    fn from_iter<T: IntoIterator<Item = f32>>(iter: T) -> Self {
        Self(iter.into_iter().map(sanitize).collect())
    }
}

impl FromIterator<Option<f32>> for Series {
    fn from_iter<T: IntoIterator<Item = Option<f32>>>(iter: T) -> Self {
        Self(iter.into_iter().map(|v| sanitize(v.unwrap_or(0.0))).collect())
    }
}

// ================================================================================
// Free Functions
// ================================================================================

/// NaN becomes 0. Infinities are left to the clamp.
pub fn sanitize(value: f32) -> f32 {
    if value.is_nan() { 0.0 } else { value }
}

/// Places every sample of `values` in chart space.
pub fn map_series(values: &[f32], geometry: &ChartGeometry, direction: Direction) -> Vec<ChartPoint> {
    let len = values.len();

    values
        .iter()
        .enumerate()
        .map(|(i, &v)| {
            let value = sanitize(v);
            ChartPoint {
                x: geometry.x_at(i, len, direction),
                y: geometry.y_for(value),
                value,
            }
        })
        .collect()
}

/// Maps two series into one coordinate space after trimming both to the
/// shorter length, so that index `i` refers to the same step in each.
pub fn map_pair(
    first: &[f32],
    second: &[f32],
    geometry: &ChartGeometry,
    direction: Direction,
) -> (Vec<ChartPoint>, Vec<ChartPoint>) {
    let len = first.len().min(second.len());

    (
        map_series(&first[..len], geometry, direction),
        map_series(&second[..len], geometry, direction),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dual_geometry() -> ChartGeometry {
        ChartGeometry::new(400.0, 168.0).with_padding(10.0, 10.0)
    }

    #[test]
    fn test_step_degenerate_lengths() {
        let geometry = dual_geometry();
        assert!(map_series(&[], &geometry, Direction::LeftToRight).is_empty());

        let single = map_series(&[42.0], &geometry, Direction::RightToLeft);
        assert_eq!(single.len(), 1);
        assert_eq!(single[0].x, 0.0);
        assert!(single[0].y.is_finite());
    }

    #[test]
    fn test_out_of_range_values_clamp() {
        let geometry = dual_geometry();
        let points = map_series(&[-10.0, 0.0, 150.0, 100.0], &geometry, Direction::LeftToRight);

        assert_eq!(points[0].y, points[1].y);
        assert_eq!(points[2].y, points[3].y);
        assert_eq!(points[1].y, 158.0);
        assert_eq!(points[3].y, 10.0);
        // the raw sample is kept for tooltips
        assert_eq!(points[0].value, -10.0);
    }

    #[test]
    fn test_nan_maps_like_zero() {
        let geometry = dual_geometry();
        let points = map_series(&[f32::NAN, 0.0], &geometry, Direction::LeftToRight);
        assert_eq!(points[0].y, points[1].y);
        assert_eq!(points[0].value, 0.0);
    }

    #[test]
    fn test_mid_value_sits_halfway() {
        let geometry = dual_geometry();
        let points = map_series(&[10.0, 50.0, 90.0], &geometry, Direction::LeftToRight);

        let mid = (points[0].y + points[2].y) / 2.0;
        assert!((points[1].y - mid).abs() < 1e-4);
        assert_eq!(points[0].x, 0.0);
        assert_eq!(points[1].x, 200.0);
        assert_eq!(points[2].x, 400.0);
    }

    #[test]
    fn test_reversed_direction_starts_at_right_edge() {
        let geometry = ChartGeometry::new(200.0, 50.0);
        let points = map_series(&[1.0, 2.0, 3.0, 4.0, 5.0], &geometry, Direction::RightToLeft);

        assert_eq!(points[0].x, 200.0);
        assert_eq!(points[4].x, 0.0);
        assert!(points.windows(2).all(|w| w[0].x > w[1].x));
    }

    #[test]
    fn test_pair_trims_to_shorter() {
        let geometry = dual_geometry();
        let a = [1.0, 2.0, 3.0, 4.0, 5.0];
        let b = [10.0, 20.0, 30.0, 40.0, 50.0, 60.0, 70.0, 80.0];

        let (pa, pb) = map_pair(&a, &b, &geometry, Direction::LeftToRight);
        assert_eq!(pa.len(), 5);
        assert_eq!(pb.len(), 5);
        for (p, q) in pa.iter().zip(&pb) {
            assert_eq!(p.x, q.x);
        }
        assert_eq!(pa[4].x, 400.0);
    }

    #[test]
    fn test_series_from_optional_samples() {
        let series: Series = vec![Some(12.5), None, Some(f32::NAN)].into_iter().collect();
        assert_eq!(series.values(), &[12.5, 0.0, 0.0]);
        assert_eq!(series.latest(), Some(12.5));
    }
}
