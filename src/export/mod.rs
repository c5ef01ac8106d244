pub mod to_csv;
pub mod to_custom;
pub mod to_geojson;
pub mod to_svg;

/// Template context shared by the SVG and custom exporters
pub mod renderer {
    use crate::airport::AirportRecord;
    use crate::boundary::Boundary;
    use crate::render_context::RenderContext;
    use serde_json::{json, Value};

    const BOUNDARY_STROKE_WIDTH: f64 = 0.8;

    /// Creates the context object handed to map templates
    pub fn create_standard_context(
        context: &RenderContext,
        records: &[AirportRecord],
        boundary: Option<&Boundary>,
    ) -> Value {
        let boundary_paths = boundary
            .map(|b| b.to_svg_paths(&context.projection))
            .unwrap_or_default();

        json!({
            "title": context.title,
            "width": context.layout.width,
            "height": context.layout.height,
            "view": context.view,
            "view_transform": context.view.to_svg_transform(),
            "boundary_paths": boundary_paths,
            "boundary_stroke_width": context.view.unscaled(BOUNDARY_STROKE_WIDTH),
            "markers": context.markers(records),
            "records": records,
            "legend": context.legend,
        })
    }
}
