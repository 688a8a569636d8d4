use crate::series::{ChartGeometry, VALUE_MAX};

use serde::{Deserialize, Serialize};

/// How dense the horizontal grid of a chart is.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GridConfig {
    pub min_lines: usize,
    pub max_lines: usize,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            min_lines: 2,
            max_lines: 4,
        }
    }
}

/// Rounds a raw step up to 1, 2 or 5 times a power of ten.
fn nice_step(raw: f32) -> f32 {
    let magnitude = 10.0_f32.powf(raw.log10().floor());

    let factor = match raw / magnitude {
        n if n <= 1.0 => 1.0,
        n if n <= 2.0 => 2.0,
        n if n <= 5.0 => 5.0,
        _ => 10.0,
    };

    factor * magnitude
}

/// Evenly spaced values covering `[lo, hi]`, aligned on a nice step.
pub fn compute_ticks(lo: f32, hi: f32, config: &GridConfig) -> Vec<f32> {
    let (lo, hi) = if lo <= hi { (lo, hi) } else { (hi, lo) };

    if hi - lo < f32::EPSILON {
        return vec![lo];
    }

    let target = ((config.min_lines + config.max_lines) / 2).max(2) as f32;
    let step = nice_step((hi - lo) / target);
    let first = (lo / step).ceil() * step;

    let count = ((hi - first) / step + 1e-3).floor() as usize + 1;
    (0..count).map(|i| first + i as f32 * step).collect()
}

/// Chart-space Y of each grid line across the percentage domain.
pub fn grid_lines(geometry: &ChartGeometry, config: &GridConfig) -> Vec<f32> {
    compute_ticks(0.0, VALUE_MAX, config)
        .into_iter()
        .map(|v| geometry.y_for(v))
        .collect()
}
