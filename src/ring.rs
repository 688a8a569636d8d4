//! Two-part ring chart with angular hit testing.
//!
//! The first part sweeps clockwise from twelve o'clock, the second part fills
//! the remainder. The middle of the ring is a hole and never hovers.

use crate::series::sanitize;
use crate::style::ChartStyle;

use iced::widget::canvas::{self, Canvas, Path, Stroke, path::Arc};
use iced::{Alignment, Element, Event, Length, Point, Radians, Rectangle, Renderer, Theme, mouse};
use serde::{Deserialize, Serialize};

/// Screen angles start at three o'clock; the ring starts at twelve.
const START_OFFSET_DEGREES: f32 = 90.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Segment {
    First,
    Second,
}

impl Segment {
    fn index(self) -> usize {
        match self {
            Segment::First => 0,
            Segment::Second => 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, bon::Builder)]
pub struct RingOptions {
    /// Hole radius as a fraction of the outer radius.
    #[builder(default = 0.5)]
    pub inner_ratio: f32,
}

impl Default for RingOptions {
    fn default() -> Self {
        Self::builder().build()
    }
}

// ================================================================================
// Proportions
// ================================================================================

/// How a two-part total divides the circle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RingSplit {
    pub total: f32,
    pub percents: [f32; 2],
    /// Clockwise sweep of the first part, in degrees.
    pub sweep_degrees: f32,
}

impl RingSplit {
    /// Negative and NaN parts count as 0.
    pub fn new(parts: [f32; 2]) -> Self {
        let parts = parts.map(|v| sanitize(v).max(0.0));
        let total = parts[0] + parts[1];

        if !(total > 0.0) || !total.is_finite() {
            return Self {
                total: 0.0,
                percents: [0.0, 0.0],
                sweep_degrees: 0.0,
            };
        }

        let percents = parts.map(|v| v / total * 100.0);

        Self {
            total,
            percents,
            sweep_degrees: percents[0] / 100.0 * 360.0,
        }
    }

    /// Nothing to split: drawn in the neutral color, never hovers.
    pub fn is_empty(&self) -> bool {
        self.total <= 0.0
    }

    /// Segment under `degrees`, measured clockwise from twelve o'clock.
    /// The boundary itself belongs to the first segment.
    pub fn classify(&self, degrees: f32) -> Segment {
        if degrees <= self.sweep_degrees {
            Segment::First
        } else {
            Segment::Second
        }
    }

    pub fn percent(&self, segment: Segment) -> f32 {
        self.percents[segment.index()]
    }

    pub fn label(&self, segment: Segment) -> String {
        format!("{:.1}%", self.percent(segment))
    }
}

// ================================================================================
// Hit Testing
// ================================================================================

/// Angle of `offset` (from the ring center, screen axes) in `[0, 360)`,
/// clockwise from twelve o'clock.
pub fn pointer_angle(dx: f32, dy: f32) -> f32 {
    (dy.atan2(dx).to_degrees() + START_OFFSET_DEGREES).rem_euclid(360.0)
}

/// Outer and inner radius of a ring drawn inside `bounds`.
pub fn radii(bounds: Rectangle, options: &RingOptions) -> (f32, f32) {
    let outer = bounds.width.min(bounds.height).max(0.0) / 2.0;
    (outer, outer * options.inner_ratio.clamp(0.0, 1.0))
}

/// Which segment lies under `pointer`. `bounds` and `pointer` must share a
/// coordinate space; the ring is centered in `bounds`.
pub fn hit_test(
    split: &RingSplit,
    bounds: Rectangle,
    pointer: Point,
    options: &RingOptions,
) -> Option<Segment> {
    if split.is_empty() {
        return None;
    }

    let center = bounds.center();
    let (dx, dy) = (pointer.x - center.x, pointer.y - center.y);
    let distance = dx.hypot(dy);
    let (outer, inner) = radii(bounds, options);

    if distance < inner || distance > outer {
        return None;
    }

    Some(split.classify(pointer_angle(dx, dy)))
}

// ================================================================================
// Ring Chart
// ================================================================================

pub struct RingChart {
    split: RingSplit,
    options: RingOptions,
    style: Option<ChartStyle>,
}

impl RingChart {
    pub fn new(parts: [f32; 2]) -> Self {
        Self {
            split: RingSplit::new(parts),
            options: RingOptions::default(),
            style: None,
        }
    }

    pub fn with_options(mut self, options: RingOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_style(mut self, style: ChartStyle) -> Self {
        self.style = Some(style);
        self
    }

    pub fn split(&self) -> &RingSplit {
        &self.split
    }

    pub fn view<'a, Message: 'a>(self) -> Element<'a, Message> {
        Canvas::new(self).width(Length::Fill).height(Length::Fill).into()
    }
}

fn ring_arc(center: Point, radius: f32, from_degrees: f32, to_degrees: f32) -> Path {
    let screen = |degrees: f32| Radians((degrees - START_OFFSET_DEGREES).to_radians());

    Path::new(|builder| {
        builder.arc(Arc {
            center,
            radius,
            start_angle: screen(from_degrees),
            end_angle: screen(to_degrees),
        });
    })
}

impl<Message> canvas::Program<Message> for RingChart {
    /// Hovered segment.
    type State = Option<Segment>;

    fn update(
        &self,
        state: &mut Self::State,
        event: &Event,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> Option<canvas::Action<Message>> {
        let hovered = match event {
            Event::Mouse(mouse::Event::CursorMoved { .. }) => cursor
                .position()
                .and_then(|pointer| hit_test(&self.split, bounds, pointer, &self.options)),
            Event::Mouse(mouse::Event::CursorLeft) => None,
            _ => return None,
        };

        if *state == hovered {
            return None;
        }

        *state = hovered;
        Some(canvas::Action::request_redraw())
    }

    fn draw(
        &self,
        state: &Self::State,
        renderer: &Renderer,
        theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<canvas::Geometry> {
        let mut frame = canvas::Frame::new(renderer, bounds.size());
        let style = self.style.unwrap_or_else(|| ChartStyle::for_theme(theme));

        let local = Rectangle::with_size(bounds.size());
        let center = local.center();
        let (outer, inner) = radii(local, &self.options);
        let thickness = outer - inner;

        if thickness <= 0.0 {
            return vec![frame.into_geometry()];
        }

        let radius = inner + thickness / 2.0;
        let band = |color| Stroke::default().with_color(color).with_width(thickness);
        let sweep = self.split.sweep_degrees;

        if self.split.is_empty() {
            frame.stroke(&Path::circle(center, radius), band(style.neutral));
        } else {
            if sweep > 0.0 {
                frame.stroke(&ring_arc(center, radius, 0.0, sweep), band(style.series_a));
            }
            if sweep < 360.0 {
                frame.stroke(&ring_arc(center, radius, sweep, 360.0), band(style.series_b));
            }
        }

        if let Some(segment) = state {
            frame.fill_text(canvas::Text {
                content: self.split.label(*segment),
                position: center,
                color: theme.palette().text,
                size: (style.text_size * 1.5).into(),
                align_x: Alignment::Center.into(),
                align_y: Alignment::Center.into(),
                ..canvas::Text::default()
            });
        }

        vec![frame.into_geometry()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounds() -> Rectangle {
        Rectangle::new(Point::new(40.0, 20.0), iced::Size::new(140.0, 140.0))
    }

    /// A point at `degrees` clockwise from twelve o'clock, `distance` away from
    /// the center of `bounds()`.
    fn at(degrees: f32, distance: f32) -> Point {
        let center = bounds().center();
        let radians = degrees.to_radians();
        Point::new(
            center.x + distance * radians.sin(),
            center.y - distance * radians.cos(),
        )
    }

    #[test]
    fn test_sweep_of_thirty_seventy() {
        let split = RingSplit::new([30.0, 70.0]);
        assert!((split.sweep_degrees - 108.0).abs() < 1e-4);
        assert_eq!(split.label(Segment::First), "30.0%");
        assert_eq!(split.label(Segment::Second), "70.0%");
    }

    #[test]
    fn test_boundary_belongs_to_first_segment() {
        let split = RingSplit {
            total: 100.0,
            percents: [30.0, 70.0],
            sweep_degrees: 108.0,
        };
        assert_eq!(split.classify(108.0), Segment::First);
        assert_eq!(split.classify(108.01), Segment::Second);
        assert_eq!(split.classify(0.0), Segment::First);
    }

    #[test]
    fn test_pointer_angle_reference_frame() {
        assert!((pointer_angle(0.0, -1.0) - 0.0).abs() < 1e-4);
        assert!((pointer_angle(1.0, 0.0) - 90.0).abs() < 1e-4);
        assert!((pointer_angle(0.0, 1.0) - 180.0).abs() < 1e-4);
        assert!((pointer_angle(-1.0, 0.0) - 270.0).abs() < 1e-4);
    }

    #[test]
    fn test_hit_test_inside_band() {
        let split = RingSplit::new([30.0, 70.0]);
        let options = RingOptions::default();

        assert_eq!(hit_test(&split, bounds(), at(45.0, 50.0), &options), Some(Segment::First));
        assert_eq!(hit_test(&split, bounds(), at(100.0, 50.0), &options), Some(Segment::First));
        assert_eq!(hit_test(&split, bounds(), at(120.0, 50.0), &options), Some(Segment::Second));
        assert_eq!(hit_test(&split, bounds(), at(300.0, 50.0), &options), Some(Segment::Second));
    }

    #[test]
    fn test_hole_and_outside_do_not_hover() {
        let split = RingSplit::new([30.0, 70.0]);
        let options = RingOptions::default();

        // outer radius 70, inner 35
        assert_eq!(hit_test(&split, bounds(), at(45.0, 20.0), &options), None);
        assert_eq!(hit_test(&split, bounds(), at(45.0, 80.0), &options), None);
        assert_eq!(hit_test(&split, bounds(), bounds().center(), &options), None);
    }

    #[test]
    fn test_empty_total_is_neutral() {
        let split = RingSplit::new([0.0, 0.0]);
        assert!(split.is_empty());
        assert_eq!(split.percents, [0.0, 0.0]);
        assert_eq!(hit_test(&split, bounds(), at(45.0, 50.0), &RingOptions::default()), None);

        let malformed = RingSplit::new([f32::NAN, -5.0]);
        assert!(malformed.is_empty());
    }

    #[test]
    fn test_one_sided_split() {
        let split = RingSplit::new([0.0, 12.0]);
        assert_eq!(split.sweep_degrees, 0.0);
        assert_eq!(split.percent(Segment::Second), 100.0);
    }
}
