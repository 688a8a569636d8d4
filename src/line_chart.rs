//! Single-series line chart with a hover tooltip.

use crate::pointer::{HoverState, ScreenTransform};
use crate::renderer;
use crate::series::{ChartGeometry, ChartPoint, Direction, map_series};
use crate::style::ChartStyle;
use crate::ticks::{GridConfig, grid_lines};
use crate::tooltip::TooltipLayout;

use iced::widget::canvas::{self, Canvas};
use iced::{Element, Event, Length, Rectangle, Renderer, Size, Theme, Vector, mouse};
use serde::{Deserialize, Serialize};

// ================================================================================
// Options
// ================================================================================

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, bon::Builder)]
pub struct LineChartOptions {
    #[builder(default = ChartGeometry::new(200.0, 50.0))]
    pub geometry: ChartGeometry,
    /// The dashboard plots the newest sample (index 0) at the right edge.
    #[builder(default = Direction::RightToLeft)]
    pub direction: Direction,
    #[builder(default)]
    pub grid: GridConfig,
}

impl Default for LineChartOptions {
    fn default() -> Self {
        Self::builder().build()
    }
}

const TOOLTIP: TooltipLayout = TooltipLayout {
    size: Size::new(46.0, 14.0),
    offset: Vector::new(6.0, -18.0),
    margin: 2.0,
};

// ================================================================================
// Line Chart
// ================================================================================

/// Hover artifacts of the active sample, all in chart space.
#[derive(Debug, Clone, PartialEq)]
pub struct HoverOverlay {
    pub guide_x: f32,
    pub marker: ChartPoint,
    pub tooltip: Rectangle,
    pub label: String,
}

pub struct LineChart<'a> {
    values: &'a [f32],
    options: LineChartOptions,
    style: Option<ChartStyle>,
}

impl<'a> LineChart<'a> {
    pub fn new(values: &'a [f32]) -> Self {
        Self {
            values,
            options: LineChartOptions::default(),
            style: None,
        }
    }

    pub fn with_options(mut self, options: LineChartOptions) -> Self {
        self.options = options;
        self
    }

    /// Overrides the palette otherwise derived from the iced theme.
    pub fn with_style(mut self, style: ChartStyle) -> Self {
        self.style = Some(style);
        self
    }

    pub fn points(&self) -> Vec<ChartPoint> {
        map_series(self.values, &self.options.geometry, self.options.direction)
    }

    /// What to draw for `hover`, `None` when nothing is hovered.
    pub fn overlay(&self, hover: &HoverState) -> Option<HoverOverlay> {
        let guide_x = hover.pointer_x?;
        let marker = *self.points().get(hover.active_index?)?;

        Some(HoverOverlay {
            guide_x,
            marker,
            tooltip: TOOLTIP.place(iced::Point::new(marker.x, marker.y), &self.options.geometry),
            label: renderer::percent_label(marker.value),
        })
    }

    pub fn view<Message: 'a>(self) -> Element<'a, Message> {
        Canvas::new(self).width(Length::Fill).height(Length::Fill).into()
    }
}

impl<Message> canvas::Program<Message> for LineChart<'_> {
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
                        self.values.len(),
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

        if let Some(path) = renderer::polyline(&self.points(), &transform) {
            renderer::stroke_series(&mut frame, &path, style.series_a, &style);
        }

        if let Some(overlay) = self.overlay(state) {
            renderer::draw_cursor(&mut frame, &transform, geometry, overlay.guide_x, &style);
            renderer::draw_marker(&mut frame, &transform, &overlay.marker, style.series_a, &style);
            renderer::draw_tooltip(&mut frame, &transform, overlay.tooltip, &[overlay.label], &style);
        }

        vec![frame.into_geometry()]
    }

    fn mouse_interaction(
        &self,
        _state: &Self::State,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> mouse::Interaction {
        if cursor.is_over(bounds) && !self.values.is_empty() {
            mouse::Interaction::Crosshair
        } else {
            mouse::Interaction::default()
        }
    }
}
