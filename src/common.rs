use handlebars::{handlebars_helper, Handlebars};
use serde_json::Value;
use tracing::info;

use std::fs::File;
use std::io::Write;
use std::path::Path;

pub fn create_path_if_not_exists(path: &Path) -> anyhow::Result<()> {
    let parent = path
        .parent()
        .ok_or_else(|| anyhow::anyhow!("Invalid path: no parent directory for '{}'", path.display()))?;
    if !parent.as_os_str().is_empty() && !parent.exists() {
        info!("Creating path: {:?}", parent);
        std::fs::create_dir_all(parent)?;
    }
    Ok(())
}

pub fn write_string_to_file(path: &Path, content: &str) -> anyhow::Result<()> {
    create_path_if_not_exists(path)?;
    let mut file = File::create(path)?;
    file.write_all(content.as_bytes())?;
    Ok(())
}

pub fn get_handlebars() -> Handlebars<'static> {
    let mut handlebars = Handlebars::new();

    handlebars_helper!(exists: |v: Value| {
        match v {
            Value::Null => false,
            Value::String(s) => !s.trim().is_empty(),
            _ => true,
        }
    });
    handlebars.register_helper("exists", Box::new(exists));

    handlebars_helper!(fixed: |v: f64, digits: u64| format!("{:.*}", digits as usize, v));
    handlebars.register_helper("fixed", Box::new(fixed));

    handlebars_helper!(percent: |v: f64| format!("{:.1}%", v));
    handlebars.register_helper("percent", Box::new(percent));

    handlebars
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn fixed_rounds_to_requested_digits() {
        let handlebars = get_handlebars();
        let res = handlebars
            .render_template(r#"<circle cx="{{fixed x 2}}" />"#, &json!({"x": 12.34567}))
            .expect("This to render");
        assert_eq!(res, r#"<circle cx="12.35" />"#);
    }

    #[test]
    fn percent_formats_one_decimal() {
        let handlebars = get_handlebars();
        let res = handlebars
            .render_template("{{percent p}}", &json!({"p": 60}))
            .expect("This to render");
        assert_eq!(res, "60.0%");
    }

    #[test]
    fn exists_treats_blank_strings_as_missing() {
        let handlebars = get_handlebars();
        let template = r#"{{#if (exists name)}}[{{name}}]{{else}}none{{/if}}"#;
        let with_name = handlebars
            .render_template(template, &json!({"name": "Chile"}))
            .expect("This to render");
        let blank = handlebars
            .render_template(template, &json!({"name": "  "}))
            .expect("This to render");
        let missing = handlebars
            .render_template(template, &json!({}))
            .expect("This to render");

        assert_eq!(with_name, "[Chile]");
        assert_eq!(blank, "none");
        assert_eq!(missing, "none");
    }

    #[test]
    fn text_is_escaped() {
        let handlebars = get_handlebars();
        let res = handlebars
            .render_template("<title>{{t}}</title>", &json!({"t": "A & B <C>"}))
            .expect("This to render");
        assert_eq!(res, "<title>A &amp; B &lt;C&gt;</title>");
    }

    #[test]
    fn files_are_written_with_missing_directories() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("out/nested/map.svg");
        write_string_to_file(&path, "<svg/>").expect("write");
        assert_eq!(std::fs::read_to_string(path).expect("read"), "<svg/>");
    }
}
