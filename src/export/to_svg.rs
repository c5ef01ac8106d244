use crate::airport::AirportRecord;
use crate::boundary::Boundary;
use crate::render_context::RenderContext;
use std::error::Error;

pub fn render(
    context: &RenderContext,
    records: &[AirportRecord],
    boundary: Option<&Boundary>,
) -> Result<String, Box<dyn Error>> {
    let handlebars = crate::common::get_handlebars();
    let data = crate::export::renderer::create_standard_context(context, records, boundary);

    let res = handlebars.render_template(&get_template(), &data)?;
    Ok(res)
}

pub fn get_template() -> String {
    include_str!("to_svg.hbs").to_string()
}
