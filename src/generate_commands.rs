use anyhow::{anyhow, Result};
use include_dir::{include_dir, Dir};
use std::fs;
use std::path::Path;
use tracing::{debug, info};

static SAMPLE_DIR: Dir = include_dir!("sample/chile");

pub fn generate_template(exporter: String) -> Result<()> {
    info!("Generating exporter template: {}", exporter);
    match exporter.as_str() {
        "svg" => {
            println!("{}", crate::export::to_svg::get_template());
            Ok(())
        }
        _ => Err(anyhow!("Unsupported exporter: {} - use svg", exporter)),
    }
}

fn write_dir_contents(dir: &Dir, target_path: &Path) -> Result<()> {
    // file paths are relative to the sample root, subdirectories included
    for file in dir.files() {
        let target_file_path = target_path.join(file.path());
        debug!("Writing {:?}", target_file_path);
        if let Some(parent) = target_file_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&target_file_path, file.contents())?;
    }

    for sub_dir in dir.dirs() {
        fs::create_dir_all(target_path.join(sub_dir.path()))?;
        write_dir_contents(sub_dir, target_path)?;
    }
    Ok(())
}

/// Writes the bundled Chile sample project into `dir`
pub fn generate_sample(dir: String) -> Result<()> {
    info!("Generating sample project in {:?}", dir);
    let target_path = Path::new(&dir);
    fs::create_dir_all(target_path)
        .map_err(|e| anyhow!("Failed to create target directory {}: {}", dir, e))?;

    write_dir_contents(&SAMPLE_DIR, target_path)?;

    info!("Sample project generated successfully at: {:?}", dir);
    Ok(())
}
