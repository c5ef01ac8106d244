use serde::Serialize;

use crate::color::ColorInterpolator;
use crate::render_context::Layout;

/// Sampling step of the legend gradient, in severity units
pub const LEGEND_STEP: f64 = 0.02;

const LEGEND_MARGIN: f64 = 20.0;
const LEGEND_BOTTOM_OFFSET: f64 = 40.0;
const LEGEND_BAR_HEIGHT: f64 = 10.0;
const LEGEND_MIN_WIDTH: f64 = 120.0;
const LEGEND_MAX_WIDTH: f64 = 260.0;
const LEGEND_WIDTH_RATIO: f64 = 0.35;
const TICK_FRACTIONS: [f64; 5] = [0.0, 0.25, 0.5, 0.75, 1.0];

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct GradientStop {
    /// Offset along the bar in percent
    pub offset: f64,
    pub color: String,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct LegendTick {
    pub x: f64,
    pub label: String,
}

/// Samples the colour scale every `step` from 0 to 1 inclusive.
///
/// Offsets are computed from the sample index so the last stop lands on
/// exactly 100 %.
pub fn gradient_stops(interpolator: &ColorInterpolator, step: f64) -> Vec<GradientStop> {
    let count = (1.0 / step).round().max(1.0) as usize;
    (0..=count)
        .map(|i| {
            let t = i as f64 / count as f64;
            GradientStop {
                offset: (t * 10000.0).round() / 100.0,
                color: interpolator.color_at(t).to_string(),
            }
        })
        .collect()
}

/// Legend bar placement, ticks and gradient
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct LegendLayout {
    pub title: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub title_y: f64,
    pub tick_y: f64,
    pub ticks: Vec<LegendTick>,
    pub stops: Vec<GradientStop>,
}

impl LegendLayout {
    /// Bottom-left legend sized relative to the map width
    pub fn for_layout(layout: &Layout, interpolator: &ColorInterpolator, title: &str) -> Self {
        let width = (layout.width * LEGEND_WIDTH_RATIO)
            .round()
            .clamp(LEGEND_MIN_WIDTH, LEGEND_MAX_WIDTH);
        let x = LEGEND_MARGIN;
        let y = layout.height - LEGEND_BOTTOM_OFFSET;

        let ticks = TICK_FRACTIONS
            .iter()
            .map(|fraction| LegendTick {
                x: x + fraction * width,
                label: format!("{:.0}%", fraction * 100.0),
            })
            .collect();

        Self {
            title: title.to_string(),
            x,
            y,
            width,
            height: LEGEND_BAR_HEIGHT,
            title_y: y - 6.0,
            tick_y: y + LEGEND_BAR_HEIGHT + 12.0,
            ticks,
            stops: gradient_stops(interpolator, LEGEND_STEP),
        }
    }
}
