//! Pointer hit testing for the line charts.
//!
//! The inverse of [`crate::series::map_series`]: a cursor position inside the
//! widget is brought back into chart space and snapped to the closest sample.

use crate::series::{ChartGeometry, Direction};

use iced::{Point, Size};

/// Scales between widget-local screen coordinates and the chart viewport.
///
/// The viewport is stretched to the widget on both axes independently, so a
/// chart keeps its shape no matter how the layout sizes it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenTransform {
    scale_x: f32,
    scale_y: f32,
}

impl ScreenTransform {
    pub fn new(size: Size, geometry: &ChartGeometry) -> Self {
        let scale = |chart: f32, screen: f32| if screen > 0.0 { chart / screen } else { 0.0 };

        Self {
            scale_x: scale(geometry.width, size.width),
            scale_y: scale(geometry.height, size.height),
        }
    }

    /// Screen to chart space. A zero-sized widget maps everything to the origin.
    pub fn to_chart(&self, screen: Point) -> Point {
        Point::new(screen.x * self.scale_x, screen.y * self.scale_y)
    }

    /// Chart to screen space.
    pub fn to_screen(&self, chart: Point) -> Point {
        let unscale = |v: f32, s: f32| if s > 0.0 { v / s } else { 0.0 };
        Point::new(unscale(chart.x, self.scale_x), unscale(chart.y, self.scale_y))
    }

    /// Chart-space width expressed in screen pixels.
    pub fn width_to_screen(&self, width: f32) -> f32 {
        if self.scale_x > 0.0 { width / self.scale_x } else { 0.0 }
    }

    pub fn height_to_screen(&self, height: f32) -> f32 {
        if self.scale_y > 0.0 { height / self.scale_y } else { 0.0 }
    }
}

/// Snaps a chart-space X coordinate to the nearest sample index.
///
/// `x` is clamped to the viewport first. Returns `None` only for an empty
/// series; a single sample (or a zero step) always resolves to 0.
pub fn resolve_index(x: f32, len: usize, geometry: &ChartGeometry, direction: Direction) -> Option<usize> {
    if len == 0 {
        return None;
    }

    let clamped = x.clamp(0.0, geometry.width.max(0.0));
    let step = geometry.step_x(len);

    if step <= 0.0 {
        return Some(0);
    }

    let offset = match direction {
        Direction::LeftToRight => clamped,
        Direction::RightToLeft => geometry.width - clamped,
    };

    let index = (offset / step).round().max(0.0) as usize;
    Some(index.min(len - 1))
}

/// Transient hover state of one chart. Not persisted.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct HoverState {
    /// Chart-space X of the cursor guide, already clamped to the viewport.
    pub pointer_x: Option<f32>,
    pub active_index: Option<usize>,
}

impl HoverState {
    /// Resolves the hover for a pointer at `chart` (chart space). Returns
    /// whether anything visible changed.
    pub fn track(
        &mut self,
        chart: Point,
        len: usize,
        geometry: &ChartGeometry,
        direction: Direction,
    ) -> bool {
        let previous = *self;

        match resolve_index(chart.x, len, geometry, direction) {
            Some(index) => {
                self.pointer_x = Some(chart.x.clamp(0.0, geometry.width.max(0.0)));
                self.active_index = Some(index);
            }
            None => {
                self.clear();
            }
        }

        log::trace!("hover at x={:.1} resolved to {:?}", chart.x, self.active_index);

        *self != previous
    }

    /// Drops every hover artifact. Returns whether anything was cleared.
    pub fn clear(&mut self) -> bool {
        let was_active = self.is_active();
        self.pointer_x = None;
        self.active_index = None;
        was_active
    }

    pub fn is_active(&self) -> bool {
        self.pointer_x.is_some() || self.active_index.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::series::map_series;

    #[test]
    fn test_round_trip_both_directions() {
        let geometry = ChartGeometry::new(400.0, 168.0).with_padding(10.0, 10.0);

        for direction in [Direction::LeftToRight, Direction::RightToLeft] {
            for len in 2..40 {
                let values: Vec<f32> = (0..len).map(|i| (i * 7 % 101) as f32).collect();
                let points = map_series(&values, &geometry, direction);

                for (i, p) in points.iter().enumerate() {
                    assert_eq!(resolve_index(p.x, len, &geometry, direction), Some(i));
                }
            }
        }
    }

    #[test]
    fn test_degenerate_series() {
        let geometry = ChartGeometry::default();
        assert_eq!(resolve_index(120.0, 0, &geometry, Direction::LeftToRight), None);
        assert_eq!(resolve_index(120.0, 1, &geometry, Direction::RightToLeft), Some(0));
    }

    #[test]
    fn test_pointer_outside_viewport_clamps() {
        let geometry = ChartGeometry::new(200.0, 50.0);
        assert_eq!(resolve_index(-30.0, 5, &geometry, Direction::LeftToRight), Some(0));
        assert_eq!(resolve_index(999.0, 5, &geometry, Direction::LeftToRight), Some(4));
        assert_eq!(resolve_index(999.0, 5, &geometry, Direction::RightToLeft), Some(0));
    }

    #[test]
    fn test_stretched_widget_maps_back_to_viewport() {
        let geometry = ChartGeometry::new(200.0, 50.0);
        let transform = ScreenTransform::new(Size::new(800.0, 100.0), &geometry);

        let chart = transform.to_chart(Point::new(400.0, 50.0));
        assert_eq!(chart, Point::new(100.0, 25.0));
        assert_eq!(transform.to_screen(chart), Point::new(400.0, 50.0));
    }

    #[test]
    fn test_screen_cursor_on_stretched_widget() {
        let geometry = ChartGeometry::new(200.0, 50.0);
        let transform = ScreenTransform::new(Size::new(600.0, 120.0), &geometry);

        // 5 samples, 50 chart units apart, 150 px apart on screen
        let cursor = transform.to_chart(Point::new(140.0, 60.0));
        let mut hover = HoverState::default();

        assert!(hover.track(cursor, 5, &geometry, Direction::LeftToRight));
        assert_eq!(hover.active_index, Some(1));

        hover.track(cursor, 5, &geometry, Direction::RightToLeft);
        assert_eq!(hover.active_index, Some(3));

        let edge = transform.to_chart(Point::new(599.0, 60.0));
        hover.track(edge, 5, &geometry, Direction::LeftToRight);
        assert_eq!(hover.active_index, Some(4));
        hover.track(edge, 5, &geometry, Direction::RightToLeft);
        assert_eq!(hover.active_index, Some(0));
    }

    #[test]
    fn test_zero_sized_widget() {
        let geometry = ChartGeometry::default();
        let transform = ScreenTransform::new(Size::new(0.0, 0.0), &geometry);
        assert_eq!(transform.to_chart(Point::new(10.0, 10.0)), Point::ORIGIN);
    }

    #[test]
    fn test_hover_track_and_clear() {
        let geometry = ChartGeometry::new(200.0, 50.0);
        let mut hover = HoverState::default();

        assert!(hover.track(Point::new(210.0, 5.0), 3, &geometry, Direction::RightToLeft));
        assert_eq!(hover.pointer_x, Some(200.0));
        assert_eq!(hover.active_index, Some(0));

        // same sample, same guide: nothing to redraw
        assert!(!hover.track(Point::new(220.0, 5.0), 3, &geometry, Direction::RightToLeft));

        assert!(hover.clear());
        assert!(!hover.is_active());
        assert!(!hover.clear());
    }

    #[test]
    fn test_hover_on_empty_series_stays_clear() {
        let geometry = ChartGeometry::default();
        let mut hover = HoverState::default();
        assert!(!hover.track(Point::new(10.0, 10.0), 0, &geometry, Direction::LeftToRight));
        assert!(!hover.is_active());
    }
}
