//! Colors and stroke widths shared by every chart.

use iced::{Color, Theme};

pub const SERIES_A: Color = Color::from_rgb8(0x3b, 0x82, 0xf6);
pub const SERIES_B: Color = Color::from_rgb8(0x10, 0xb9, 0x81);
pub const NEUTRAL: Color = Color::from_rgb8(0xe5, 0xe7, 0xeb);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartStyle {
    pub series_a: Color,
    pub series_b: Color,
    /// Empty ring and idle diagram connectors.
    pub neutral: Color,
    pub grid: Color,
    pub cursor: Color,
    pub tooltip_background: Color,
    pub tooltip_text: Color,
    pub line_width: f32,
    pub marker_radius: f32,
    pub text_size: f32,
}

impl ChartStyle {
    pub fn light() -> Self {
        Self {
            series_a: SERIES_A,
            series_b: SERIES_B,
            neutral: NEUTRAL,
            grid: Color::from_rgba8(0x94, 0xa3, 0xb8, 0.35),
            cursor: Color::from_rgba8(0x64, 0x74, 0x8b, 0.6),
            tooltip_background: Color::from_rgba8(0x0f, 0x17, 0x2a, 0.85),
            tooltip_text: Color::WHITE,
            line_width: 2.0,
            marker_radius: 3.0,
            text_size: 11.0,
        }
    }

    pub fn dark() -> Self {
        Self {
            neutral: Color::from_rgb8(0x37, 0x41, 0x51),
            grid: Color::from_rgba8(0x94, 0xa3, 0xb8, 0.2),
            cursor: Color::from_rgba8(0xcb, 0xd5, 0xe1, 0.6),
            tooltip_background: Color::from_rgba8(0xf8, 0xfa, 0xfc, 0.9),
            tooltip_text: Color::from_rgb8(0x0f, 0x17, 0x2a),
            ..Self::light()
        }
    }

    /// Picks the palette matching the brightness of an iced theme.
    pub fn for_theme(theme: &Theme) -> Self {
        if theme.extended_palette().is_dark {
            Self::dark()
        } else {
            Self::light()
        }
    }
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self::light()
    }
}
