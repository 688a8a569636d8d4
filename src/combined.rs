//! Two series over one coordinate space, hovered together.

use crate::pointer::{HoverState, ScreenTransform};
use crate::renderer;
use crate::series::{ChartGeometry, ChartPoint, Direction, map_pair};
use crate::style::ChartStyle;
use crate::ticks::{GridConfig, grid_lines};
use crate::tooltip::TooltipLayout;

use iced::widget::canvas::{self, Canvas};
use iced::{Element, Event, Length, Point, Rectangle, Renderer, Size, Theme, Vector, mouse};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, bon::Builder)]
pub struct CombinedChartOptions {
    #[builder(default = ChartGeometry::new(400.0, 168.0).with_padding(10.0, 10.0))]
    pub geometry: ChartGeometry,
    #[builder(default)]
    pub direction: Direction,
    #[builder(default)]
    pub grid: GridConfig,
    #[builder(into, default = "CPU".to_string())]
    pub first_label: String,
    #[builder(into, default = "RAM".to_string())]
    pub second_label: String,
}

impl Default for CombinedChartOptions {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// The tooltip hangs from the top of the chart next to the hovered column.
const TOOLTIP: TooltipLayout = TooltipLayout {
    size: Size::new(82.0, 28.0),
    offset: Vector::new(8.0, 0.0),
    margin: 4.0,
};
const TOOLTIP_TOP: f32 = 8.0;

/// Hover artifacts shared by both series, in chart space.
#[derive(Debug, Clone, PartialEq)]
pub struct DualOverlay {
    pub guide_x: f32,
    pub first: ChartPoint,
    pub second: ChartPoint,
    pub tooltip: Rectangle,
    pub lines: [String; 2],
}

pub struct CombinedLineChart<'a> {
    first: &'a [f32],
    second: &'a [f32],
    options: CombinedChartOptions,
    style: Option<ChartStyle>,
}

impl<'a> CombinedLineChart<'a> {
    pub fn new(first: &'a [f32], second: &'a [f32]) -> Self {
        Self {
            first,
            second,
            options: CombinedChartOptions::default(),
            style: None,
        }
    }

    pub fn with_options(mut self, options: CombinedChartOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_style(mut self, style: ChartStyle) -> Self {
        self.style = Some(style);
        self
    }

    /// Number of aligned samples: the shorter of the two inputs.
    pub fn len(&self) -> usize {
        self.first.len().min(self.second.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn points(&self) -> (Vec<ChartPoint>, Vec<ChartPoint>) {
        map_pair(
            self.first,
            self.second,
            &self.options.geometry,
            self.options.direction,
        )
    }

    pub fn overlay(&self, hover: &HoverState) -> Option<DualOverlay> {
        let guide_x = hover.pointer_x?;
        let index = hover.active_index?;
        let (first, second) = self.points();
        let (first, second) = (*first.get(index)?, *second.get(index)?);

        let anchor = Point::new(first.x, TOOLTIP_TOP);

        Some(DualOverlay {
            guide_x,
            first,
            second,
            tooltip: TOOLTIP.place(anchor, &self.options.geometry),
            lines: [
                format!("{}: {}", self.options.first_label, renderer::percent_label(first.value)),
                format!("{}: {}", self.options.second_label, renderer::percent_label(second.value)),
            ],
        })
    }

    pub fn view<Message: 'a>(self) -> Element<'a, Message> {
        Canvas::new(self).width(Length::Fill).height(Length::Fill).into()
    }
}

impl<Message> canvas::Program<Message> for CombinedLineChart<'_> {
    type State = HoverState;

    fn update(
        &self,
        state: &mut Self::State,
        event: &Event,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> Option<canvas::Action<Message>> {
        let changed = match event {
            Event::Mouse(mouse::Event::CursorMoved { .. }) => match cursor.position_in(bounds) {
                Some(position) => {
                    let geometry = &self.options.geometry;
                    let transform = ScreenTransform::new(bounds.size(), geometry);

                    state.track(
                        transform.to_chart(position),
                        self.len(),
                        geometry,
                        self.options.direction,
                    )
                }
                None => state.clear(),
            },
            Event::Mouse(mouse::Event::CursorLeft) => state.clear(),
            _ => false,
        };

        changed.then(canvas::Action::request_redraw)
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
        let geometry = &self.options.geometry;
        let transform = ScreenTransform::new(bounds.size(), geometry);
        let style = self.style.unwrap_or_else(|| ChartStyle::for_theme(theme));

        let grid = grid_lines(geometry, &self.options.grid);
        renderer::draw_grid(&mut frame, &transform, geometry, &grid, &style);

        let (first, second) = self.points();
        for (points, color) in [(&first, style.series_a), (&second, style.series_b)] {
            if let Some(path) = renderer::polyline(points, &transform) {
                renderer::stroke_series(&mut frame, &path, color, &style);
            }
        }

        if let Some(overlay) = self.overlay(state) {
            renderer::draw_cursor(&mut frame, &transform, geometry, overlay.guide_x, &style);
            renderer::draw_marker(&mut frame, &transform, &overlay.first, style.series_a, &style);
            renderer::draw_marker(&mut frame, &transform, &overlay.second, style.series_b, &style);
            renderer::draw_tooltip(&mut frame, &transform, overlay.tooltip, &overlay.lines, &style);
        }

        vec![frame.into_geometry()]
    }

    fn mouse_interaction(
        &self,
        _state: &Self::State,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> mouse::Interaction {
        if cursor.is_over(bounds) && !self.is_empty() {
            mouse::Interaction::Crosshair
        } else {
            mouse::Interaction::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CPU: [f32; 5] = [12.0, 25.5, 40.0, 33.0, 90.0];
    const RAM: [f32; 8] = [60.0, 61.0, 62.0, 63.0, 64.0, 65.0, 66.0, 67.0];

    #[test]
    fn test_unequal_inputs_are_trimmed() {
        let chart = CombinedLineChart::new(&CPU, &RAM);
        assert_eq!(chart.len(), 5);

        let (cpu, ram) = chart.points();
        assert_eq!(cpu.len(), 5);
        assert_eq!(ram.len(), 5);
        assert!(cpu.iter().zip(&ram).all(|(a, b)| a.x == b.x));
    }

    #[test]
    fn test_shared_index_highlights_both_series() {
        let chart = CombinedLineChart::new(&CPU, &RAM);
        let geometry = chart.options.geometry;

        let mut hover = HoverState::default();
        // step is 100, so x = 290 snaps to index 3
        hover.track(Point::new(290.0, 80.0), chart.len(), &geometry, Direction::LeftToRight);

        let overlay = chart.overlay(&hover).expect("hovered");
        assert_eq!(overlay.first.value, 33.0);
        assert_eq!(overlay.second.value, 63.0);
        assert_eq!(overlay.first.x, overlay.second.x);
        assert_eq!(overlay.lines, ["CPU: 33.0%".to_string(), "RAM: 63.0%".to_string()]);
    }

    #[test]
    fn test_tooltip_anchored_on_first_series_and_clamped() {
        let chart = CombinedLineChart::new(&CPU, &RAM);
        let hover = HoverState {
            pointer_x: Some(400.0),
            active_index: Some(4),
        };

        let overlay = chart.overlay(&hover).expect("hovered");
        assert_eq!(overlay.tooltip.x, 400.0 - 82.0 - 4.0);
        assert_eq!(overlay.tooltip.y, TOOLTIP_TOP);

        let left = HoverState {
            pointer_x: Some(0.0),
            active_index: Some(0),
        };
        let overlay = chart.overlay(&left).expect("hovered");
        assert_eq!(overlay.tooltip.x, 8.0);
    }

    #[test]
    fn test_custom_labels() {
        let options = CombinedChartOptions::builder()
            .first_label("CPU")
            .second_label("Memory")
            .build();
        let chart = CombinedLineChart::new(&CPU, &RAM).with_options(options);
        let hover = HoverState {
            pointer_x: Some(0.0),
            active_index: Some(0),
        };

        let overlay = chart.overlay(&hover).expect("hovered");
        assert_eq!(overlay.lines[1], "Memory: 60.0%");
    }

    #[test]
    fn test_one_empty_input_draws_nothing() {
        let chart = CombinedLineChart::new(&CPU, &[]);
        assert!(chart.is_empty());

        let (cpu, ram) = chart.points();
        assert!(cpu.is_empty() && ram.is_empty());
        assert!(
            chart
                .overlay(&HoverState {
                    pointer_x: Some(10.0),
                    active_index: Some(0)
                })
                .is_none()
        );
    }
}
