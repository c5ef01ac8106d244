use crate::airport::AirportRecord;
use crate::boundary::Boundary;
use crate::plan::CustomExportProfile;
use crate::render_context::RenderContext;
use std::error::Error;
use std::fs;
use std::path::Path;

/// Renders a user template with the same context as the SVG exporter.
///
/// Template and partial paths are resolved against `base_dir`.
pub fn render(
    context: &RenderContext,
    records: &[AirportRecord],
    boundary: Option<&Boundary>,
    params: &CustomExportProfile,
    base_dir: &Path,
) -> Result<String, Box<dyn Error>> {
    let mut handlebars = crate::common::get_handlebars();

    if let Some(partials) = &params.partials {
        for (name, partial) in partials {
            let partial_path = base_dir.join(partial);
            let partial_content = fs::read_to_string(&partial_path).map_err(|err| {
                format!(
                    "Failed to read partial file '{}': {}",
                    partial_path.display(),
                    err
                )
            })?;
            handlebars.register_partial(name, partial_content)?;
        }
    }

    let template_path = base_dir.join(&params.template);
    let template_content = fs::read_to_string(&template_path).map_err(|err| {
        format!(
            "Failed to read template file '{}': {}",
            template_path.display(),
            err
        )
    })?;

    let data = crate::export::renderer::create_standard_context(context, records, boundary);
    let res = handlebars.render_template(&template_content, &data)?;
    Ok(res)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::ColorInterpolator;
    use crate::render_context::RenderSettings;
    use std::collections::HashMap;

    fn context_and_records() -> (RenderContext, Vec<AirportRecord>) {
        let records = vec![AirportRecord {
            identifier: "SCL".to_string(),
            latitude: -33.669,
            longitude: -70.645,
            prior_value: 100.0,
            current_value: 40.0,
            reduction_percent: 60.0,
        }];
        let context = RenderContext::build(
            &RenderSettings::default(),
            ColorInterpolator::default(),
            None,
            &records,
        )
        .expect("context");
        (context, records)
    }

    #[test]
    fn template_and_partials_are_read_relative_to_base_dir() {
        let dir = tempfile::tempdir().expect("tempdir");
        fs::write(
            dir.path().join("list.hbs"),
            "{{#each markers as |m|}}{{> row m}}\n{{/each}}",
        )
        .unwrap();
        fs::write(dir.path().join("row.hbs"), "{{identifier}} {{fill}} {{percent reduction_percent}}")
            .unwrap();

        let params = CustomExportProfile {
            template: "list.hbs".to_string(),
            partials: Some(HashMap::from([("row".to_string(), "row.hbs".to_string())])),
        };
        let (context, records) = context_and_records();
        let output = render(&context, &records, None, &params, dir.path()).expect("render");

        assert_eq!(output, "SCL rgb(172,38,196) 60.0%\n");
    }

    #[test]
    fn missing_template_is_reported() {
        let dir = tempfile::tempdir().expect("tempdir");
        let params = CustomExportProfile {
            template: "absent.hbs".to_string(),
            partials: None,
        };
        let (context, records) = context_and_records();
        let err = render(&context, &records, None, &params, dir.path()).expect_err("missing");
        assert!(err.to_string().starts_with("Failed to read template file"));
    }
}
