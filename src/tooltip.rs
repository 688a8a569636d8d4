use crate::series::ChartGeometry;

use iced::{Point, Rectangle, Size, Vector};

/// Where a tooltip box sits relative to the point it describes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TooltipLayout {
    pub size: Size,
    /// Offset of the box's top-left corner from the anchor.
    pub offset: Vector,
    /// Minimum gap kept between the box and the viewport edges.
    pub margin: f32,
}

impl TooltipLayout {
    /// Places the box next to `anchor`, clamped so it never leaves the viewport.
    ///
    /// A box larger than the viewport is pinned to the top-left margin.
    pub fn place(&self, anchor: Point, geometry: &ChartGeometry) -> Rectangle {
        let x = clamp_start(
            anchor.x + self.offset.x,
            self.size.width,
            geometry.width,
            self.margin,
        );
        let y = clamp_start(
            anchor.y + self.offset.y,
            self.size.height,
            geometry.height,
            self.margin,
        );

        Rectangle::new(Point::new(x, y), self.size)
    }
}

fn clamp_start(start: f32, extent: f32, limit: f32, margin: f32) -> f32 {
    let low = margin;
    let high = (limit - extent - margin).max(low);
    start.max(low).min(high)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout() -> TooltipLayout {
        TooltipLayout {
            size: Size::new(46.0, 14.0),
            offset: Vector::new(6.0, -18.0),
            margin: 2.0,
        }
    }

    #[test]
    fn test_tooltip_inside_viewport() {
        let geometry = ChartGeometry::new(200.0, 50.0);
        let rect = layout().place(Point::new(100.0, 30.0), &geometry);
        assert_eq!(rect.position(), Point::new(106.0, 12.0));
    }

    #[test]
    fn test_tooltip_clamped_at_edges() {
        let geometry = ChartGeometry::new(200.0, 50.0);

        let right = layout().place(Point::new(200.0, 0.0), &geometry);
        assert_eq!(right.x, 200.0 - 46.0 - 2.0);
        assert_eq!(right.y, 2.0);

        let bottom = layout().place(Point::new(0.0, 200.0), &geometry);
        assert_eq!(bottom.y + bottom.height, 48.0);
    }

    #[test]
    fn test_tooltip_larger_than_viewport() {
        let geometry = ChartGeometry::new(20.0, 10.0);
        let rect = layout().place(Point::new(15.0, 5.0), &geometry);
        assert_eq!(rect.position(), Point::new(2.0, 2.0));
    }
}
