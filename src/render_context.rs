//! Everything an exporter needs to draw, bundled once per run.
//!
//! A [`RenderContext`] is built from the plan's render settings and the
//! loaded data, then handed by reference to each exporter. Nothing in it
//! changes after construction.

use anyhow::{anyhow, Result};
use geo::{BoundingRect, MultiPoint, Point, Rect};
use serde::Serialize;
use std::cmp::Ordering;

use crate::airport::AirportRecord;
use crate::boundary::Boundary;
use crate::color::ColorInterpolator;
use crate::interaction::{DefaultTooltip, DisplayText, HoverText};
use crate::legend::LegendLayout;
use crate::projection::Projection;

pub const MIN_WIDTH: f64 = 320.0;
pub const MAX_WIDTH: f64 = 1200.0;
pub const DEFAULT_WIDTH: f64 = 600.0;
pub const MIN_ZOOM: f64 = 1.0;
pub const MAX_ZOOM: f64 = 8.0;

/// Output dimensions in pixels
#[derive(Serialize, Debug, Clone, Copy, PartialEq)]
pub struct Layout {
    pub width: f64,
    pub height: f64,
}

impl Layout {
    /// Width follows the container within `[MIN_WIDTH, MAX_WIDTH]`, height
    /// follows the width through `aspect` (height / width).
    pub fn responsive(container_width: f64, aspect: f64) -> Self {
        let width = if container_width.is_finite() {
            container_width.clamp(MIN_WIDTH, MAX_WIDTH)
        } else {
            DEFAULT_WIDTH
        };
        let aspect = if aspect.is_finite() && aspect > 0.0 {
            aspect
        } else {
            1.0
        };
        Self {
            width,
            height: (width * aspect).round(),
        }
    }
}

/// Zoom and pan applied to the map layer
#[derive(Serialize, Debug, Clone, Copy, PartialEq)]
pub struct ViewTransform {
    pub scale: f64,
    pub translate_x: f64,
    pub translate_y: f64,
}

impl ViewTransform {
    pub fn new(scale: f64, translate_x: f64, translate_y: f64) -> Self {
        let scale = if scale.is_finite() {
            scale.clamp(MIN_ZOOM, MAX_ZOOM)
        } else {
            MIN_ZOOM
        };
        Self {
            scale,
            translate_x,
            translate_y,
        }
    }

    pub fn identity() -> Self {
        Self::new(1.0, 0.0, 0.0)
    }

    pub fn to_svg_transform(&self) -> String {
        format!(
            "translate({:.2},{:.2}) scale({})",
            self.translate_x, self.translate_y, self.scale
        )
    }

    /// Undoes the zoom for sizes that should stay constant on screen
    pub fn unscaled(&self, size: f64) -> f64 {
        size / self.scale
    }
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self::identity()
    }
}

/// Square-root scale from traffic volume to marker radius
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerScale {
    pub min_radius: f64,
    pub max_radius: f64,
    domain: (f64, f64),
}

impl MarkerScale {
    pub fn new(min_radius: f64, max_radius: f64, values: impl IntoIterator<Item = f64>) -> Self {
        let domain = values
            .into_iter()
            .filter(|v| v.is_finite())
            .map(|v| v.max(0.0).sqrt())
            .fold(None, |acc: Option<(f64, f64)>, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
            .unwrap_or((0.0, 0.0));

        Self {
            min_radius,
            max_radius,
            domain,
        }
    }

    pub fn radius(&self, value: f64) -> f64 {
        let (lo, hi) = self.domain;
        if hi <= lo {
            return (self.min_radius + self.max_radius) / 2.0;
        }
        let t = ((value.max(0.0).sqrt() - lo) / (hi - lo)).clamp(0.0, 1.0);
        self.min_radius + (self.max_radius - self.min_radius) * t
    }
}

/// A positioned, coloured airport marker
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Marker {
    pub identifier: String,
    pub cx: f64,
    pub cy: f64,
    pub r: f64,
    pub fill: String,
    pub stroke_width: f64,
    pub reduction_percent: f64,
    pub display: DisplayText,
    pub tooltip: String,
}

/// Render options taken from the plan
#[derive(Debug, Clone, PartialEq)]
pub struct RenderSettings {
    pub title: String,
    pub container_width: f64,
    pub aspect: f64,
    pub padding: f64,
    pub min_radius: f64,
    pub max_radius: f64,
    pub stroke_width: f64,
    pub view: ViewTransform,
    pub legend_title: String,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            title: "Airport traffic reduction".to_string(),
            container_width: DEFAULT_WIDTH,
            aspect: 1.6,
            padding: 20.0,
            min_radius: 3.0,
            max_radius: 12.0,
            stroke_width: 0.5,
            view: ViewTransform::identity(),
            legend_title: "Traffic reduction".to_string(),
        }
    }
}

pub struct RenderContext {
    pub title: String,
    pub layout: Layout,
    pub projection: Projection,
    pub view: ViewTransform,
    pub interpolator: ColorInterpolator,
    pub marker_scale: MarkerScale,
    pub stroke_width: f64,
    pub legend: LegendLayout,
    tooltip: Box<dyn HoverText>,
}

fn records_extent(records: &[AirportRecord]) -> Option<Rect<f64>> {
    let points: MultiPoint<f64> = records
        .iter()
        .map(|r| Point::new(r.longitude, r.latitude))
        .collect();
    points.bounding_rect()
}

impl RenderContext {
    /// Fits the projection to the boundary, or to the records without one.
    pub fn build(
        settings: &RenderSettings,
        interpolator: ColorInterpolator,
        boundary: Option<&Boundary>,
        records: &[AirportRecord],
    ) -> Result<Self> {
        let layout = Layout::responsive(settings.container_width, settings.aspect);

        let extent = boundary
            .and_then(Boundary::bounding_rect)
            .or_else(|| records_extent(records))
            .ok_or_else(|| anyhow!("Nothing to draw: no boundary and no valid airport records"))?;

        let projection =
            Projection::fit_extent(extent, layout.width, layout.height, settings.padding);
        let marker_scale = MarkerScale::new(
            settings.min_radius,
            settings.max_radius,
            records.iter().map(|r| r.prior_value),
        );
        let legend = LegendLayout::for_layout(&layout, &interpolator, &settings.legend_title);

        Ok(Self {
            title: settings.title.clone(),
            layout,
            projection,
            view: settings.view,
            interpolator,
            marker_scale,
            stroke_width: settings.stroke_width,
            legend,
            tooltip: Box::new(DefaultTooltip::default()),
        })
    }

    pub fn with_tooltip(mut self, tooltip: Box<dyn HoverText>) -> Self {
        self.tooltip = tooltip;
        self
    }

    pub fn on_hover(&self, record: &AirportRecord) -> DisplayText {
        self.tooltip.on_hover(record)
    }

    pub fn marker(&self, record: &AirportRecord) -> Marker {
        let (cx, cy) = self.projection.project(record.longitude, record.latitude);
        let display = self.on_hover(record);

        Marker {
            identifier: record.identifier.clone(),
            cx,
            cy,
            r: self.view.unscaled(self.marker_scale.radius(record.prior_value)),
            fill: self.interpolator.color_at(record.severity()).to_string(),
            stroke_width: self.view.unscaled(self.stroke_width),
            reduction_percent: record.reduction_percent,
            tooltip: display.to_plain_text(),
            display,
        }
    }

    /// Markers largest first, so smaller ones are drawn on top
    pub fn markers(&self, records: &[AirportRecord]) -> Vec<Marker> {
        let mut markers: Vec<Marker> = records.iter().map(|r| self.marker(r)).collect();
        markers.sort_by(|a, b| b.r.partial_cmp(&a.r).unwrap_or(Ordering::Equal));
        markers
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(identifier: &str, lat: f64, lon: f64, prior: f64, reduction: f64) -> AirportRecord {
        AirportRecord {
            identifier: identifier.to_string(),
            latitude: lat,
            longitude: lon,
            prior_value: prior,
            current_value: prior * (1.0 - reduction / 100.0),
            reduction_percent: reduction,
        }
    }

    fn records() -> Vec<AirportRecord> {
        vec![
            record("SCL", -33.393, -70.785, 10000.0, 60.0),
            record("ARI", -18.348, -70.338, 100.0, 30.0),
            record("PUQ", -53.002, -70.854, 2500.0, 45.0),
        ]
    }

    #[test]
    fn layout_follows_container_within_bounds() {
        assert_eq!(Layout::responsive(500.0, 1.5), Layout { width: 500.0, height: 750.0 });
        assert_eq!(Layout::responsive(100.0, 2.0).width, MIN_WIDTH);
        assert_eq!(Layout::responsive(5000.0, 1.0).width, MAX_WIDTH);
        assert_eq!(Layout::responsive(400.0, -1.0).height, 400.0);
        assert_eq!(
            Layout::responsive(f64::NAN, 1.5),
            Layout { width: DEFAULT_WIDTH, height: 900.0 }
        );
        assert_eq!(Layout::responsive(f64::INFINITY, 1.0).width, DEFAULT_WIDTH);
    }

    #[test]
    fn zoom_is_clamped_to_extent() {
        assert_eq!(ViewTransform::new(20.0, 0.0, 0.0).scale, MAX_ZOOM);
        assert_eq!(ViewTransform::new(0.1, 0.0, 0.0).scale, MIN_ZOOM);
        assert_eq!(ViewTransform::new(f64::NAN, 0.0, 0.0).scale, MIN_ZOOM);
        assert_eq!(
            ViewTransform::new(2.0, -10.0, 5.5).to_svg_transform(),
            "translate(-10.00,5.50) scale(2)"
        );
    }

    #[test]
    fn marker_scale_uses_square_root() {
        let scale = MarkerScale::new(2.0, 12.0, vec![0.0, 100.0]);
        assert_eq!(scale.radius(0.0), 2.0);
        assert_eq!(scale.radius(100.0), 12.0);
        assert_eq!(scale.radius(25.0), 7.0);
        assert_eq!(scale.radius(1000.0), 12.0);
    }

    #[test]
    fn flat_marker_scale_uses_mid_radius() {
        let scale = MarkerScale::new(4.0, 8.0, vec![50.0, 50.0]);
        assert_eq!(scale.radius(50.0), 6.0);
        assert_eq!(MarkerScale::new(4.0, 8.0, Vec::new()).radius(1.0), 6.0);
    }

    #[test]
    fn markers_are_coloured_by_reduction_and_sorted_by_size() {
        let records = records();
        let context = RenderContext::build(
            &RenderSettings::default(),
            ColorInterpolator::default(),
            None,
            &records,
        )
        .expect("context");

        let markers = context.markers(&records);
        let ids: Vec<&str> = markers.iter().map(|m| m.identifier.as_str()).collect();
        assert_eq!(ids, vec!["SCL", "PUQ", "ARI"]);
        assert_eq!(markers[0].fill, "rgb(172,38,196)");
        assert!(markers[0].tooltip.starts_with("SCL\n"));
    }

    #[test]
    fn zoom_keeps_marker_size_on_screen() {
        let records = records();
        let settings = RenderSettings {
            view: ViewTransform::new(4.0, 0.0, 0.0),
            ..RenderSettings::default()
        };
        let context =
            RenderContext::build(&settings, ColorInterpolator::default(), None, &records)
                .expect("context");
        let marker = context.marker(&records[0]);
        assert_eq!(marker.r, 3.0);
        assert_eq!(marker.stroke_width, 0.125);
    }

    #[test]
    fn custom_hover_text_is_used() {
        struct CodeOnly;
        impl HoverText for CodeOnly {
            fn on_hover(&self, record: &AirportRecord) -> DisplayText {
                DisplayText {
                    title: record.identifier.to_lowercase(),
                    lines: Vec::new(),
                }
            }
        }

        let records = records();
        let context = RenderContext::build(
            &RenderSettings::default(),
            ColorInterpolator::default(),
            None,
            &records,
        )
        .expect("context")
        .with_tooltip(Box::new(CodeOnly));
        assert_eq!(context.marker(&records[1]).tooltip, "ari");
    }

    #[test]
    fn nothing_to_draw_is_an_error() {
        let result = RenderContext::build(
            &RenderSettings::default(),
            ColorInterpolator::default(),
            None,
            &[],
        );
        assert!(result.is_err());
    }
}
