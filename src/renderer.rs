//! Drawing helpers shared by the line charts.
//!
//! Geometry arrives in chart space and is scaled into the frame here, so
//! markers stay round and strokes keep their width however the chart is
//! stretched.

use crate::pointer::ScreenTransform;
use crate::series::{ChartGeometry, ChartPoint};
use crate::style::ChartStyle;

use iced::widget::canvas::{self, Frame, Path, Stroke};
use iced::{Color, Point, Rectangle, Size};

const TOOLTIP_INSET: f32 = 4.0;
const TOOLTIP_LINE_GAP: f32 = 2.0;

// ================================================================================
// Free Functions
// ================================================================================

/// Connected line through `points`, `None` when there is nothing to connect.
pub(crate) fn polyline(points: &[ChartPoint], transform: &ScreenTransform) -> Option<Path> {
    if points.len() < 2 {
        return None;
    }

    Some(Path::new(|builder| {
        let mut screen = points
            .iter()
            .map(|p| transform.to_screen(Point::new(p.x, p.y)));

        if let Some(first) = screen.next() {
            builder.move_to(first);
        }
        for point in screen {
            builder.line_to(point);
        }
    }))
}

pub(crate) fn stroke_series(frame: &mut Frame, path: &Path, color: Color, style: &ChartStyle) {
    frame.stroke(
        path,
        Stroke::default()
            .with_color(color)
            .with_width(style.line_width)
            .with_line_join(canvas::LineJoin::Round)
            .with_line_cap(canvas::LineCap::Round),
    );
}

/// Horizontal grid lines at the given chart-space heights.
pub(crate) fn draw_grid(
    frame: &mut Frame,
    transform: &ScreenTransform,
    geometry: &ChartGeometry,
    lines: &[f32],
    style: &ChartStyle,
) {
    for &y in lines {
        let from = transform.to_screen(Point::new(0.0, y));
        let to = transform.to_screen(Point::new(geometry.width, y));

        frame.stroke(
            &Path::line(from, to),
            Stroke::default().with_color(style.grid).with_width(1.0),
        );
    }
}

/// Vertical guide following the pointer across the full chart height.
pub(crate) fn draw_cursor(
    frame: &mut Frame,
    transform: &ScreenTransform,
    geometry: &ChartGeometry,
    x: f32,
    style: &ChartStyle,
) {
    let top = transform.to_screen(Point::new(x, 0.0));
    let bottom = transform.to_screen(Point::new(x, geometry.height));

    frame.stroke(
        &Path::line(top, bottom),
        Stroke::default().with_color(style.cursor).with_width(1.0),
    );
}

pub(crate) fn draw_marker(
    frame: &mut Frame,
    transform: &ScreenTransform,
    point: &ChartPoint,
    color: Color,
    style: &ChartStyle,
) {
    let center = transform.to_screen(Point::new(point.x, point.y));
    frame.fill(&Path::circle(center, style.marker_radius), color);
}

/// Tooltip box with one text line per entry, `rect` in chart space.
pub(crate) fn draw_tooltip(
    frame: &mut Frame,
    transform: &ScreenTransform,
    rect: Rectangle,
    lines: &[String],
    style: &ChartStyle,
) {
    let top_left = transform.to_screen(rect.position());
    let size = Size::new(
        transform.width_to_screen(rect.width),
        transform.height_to_screen(rect.height),
    );

    frame.fill_rectangle(top_left, size, style.tooltip_background);

    for (i, line) in lines.iter().enumerate() {
        let offset = i as f32 * (style.text_size + TOOLTIP_LINE_GAP);

        frame.fill_text(canvas::Text {
            content: line.clone(),
            position: Point::new(top_left.x + TOOLTIP_INSET, top_left.y + TOOLTIP_LINE_GAP + offset),
            color: style.tooltip_text,
            size: style.text_size.into(),
            ..canvas::Text::default()
        });
    }
}

/// Tooltip label of a percentage sample.
pub(crate) fn percent_label(value: f32) -> String {
    format!("{value:.1}%")
}
