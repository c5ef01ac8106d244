use crate::airport::AirportRecord;
use crate::boundary::Boundary;
use crate::data_loader;
use crate::interaction::DefaultTooltip;
use crate::plan::{ExportFileType, ExportProfileItem, Plan};
use crate::render_context::RenderContext;
use notify::{Config, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use std::sync::mpsc::channel;
use tracing::{debug, error, info, warn};

use anyhow::{anyhow, Result};

/// Outcome of loading the airport table
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedAirports {
    pub records: Vec<AirportRecord>,
    pub skipped: usize,
}

/// Outcome of a single plan run
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub records: usize,
    pub skipped: usize,
    pub exported: Vec<PathBuf>,
    pub failed: Vec<PathBuf>,
}

fn plan_dir(plan_file_path: &Path) -> Result<&Path> {
    plan_file_path
        .parent()
        .ok_or_else(|| anyhow!("Plan file has no parent directory"))
}

/// Loads and normalises airport rows, skipping rows that cannot be repaired
pub fn load_airports(path: &Path) -> Result<LoadedAirports> {
    info!("Importing airports: {}", path.display());
    let data = data_loader::load_file(path)?;
    let rows = data.records;

    let profile = data_loader::create_airport_load_profile(&data.headers)?;
    info!("{}", profile);

    if let Some(column) = profile.identifier_column {
        let duplicates = data_loader::find_duplicate_identifiers(&rows, column);
        if !duplicates.is_empty() {
            warn!("Duplicate airport identifiers: {:?}", duplicates);
        }
    }

    let mut records = Vec::with_capacity(rows.len());
    let mut skipped = data.unreadable;
    // row numbers count the header as line 1
    for (index, row) in rows.iter().enumerate() {
        let row_number = row
            .position()
            .map(|p| p.line() as usize)
            .unwrap_or(index + 2);
        match AirportRecord::from_row(row, &profile, row_number) {
            Ok(record) => records.push(record),
            Err(e) => {
                skipped += 1;
                warn!("Skipping row {}: {}", row_number, e);
            }
        }
    }

    info!(
        "Loaded {} airport records, skipped {}",
        records.len(),
        skipped
    );
    Ok(LoadedAirports { records, skipped })
}

fn load_boundary(plan: &Plan, base_dir: &Path) -> Result<Option<Boundary>> {
    match &plan.import.boundary {
        Some(filename) => {
            let path = base_dir.join(filename);
            info!("Importing boundary: {}", path.display());
            Ok(Some(Boundary::load(&path)?))
        }
        None => {
            debug!("No boundary configured, fitting map to airports");
            Ok(None)
        }
    }
}

fn build_render_context(plan: &Plan, boundary: Option<&Boundary>, records: &[AirportRecord]) -> Result<RenderContext> {
    let interpolator = plan
        .get_interpolator()
        .map_err(|e| anyhow!("Invalid palette: {}", e))?;

    let defaults = DefaultTooltip::default();
    let (prior_label, current_label) = plan.get_tooltip_labels();
    let tooltip = DefaultTooltip {
        prior_label: prior_label.unwrap_or(defaults.prior_label),
        current_label: current_label.unwrap_or(defaults.current_label),
    };

    let context = RenderContext::build(&plan.get_render_settings(), interpolator, boundary, records)?
        .with_tooltip(Box::new(tooltip));
    debug!(
        "Render layout {}x{} with projection scale {:.2}",
        context.layout.width,
        context.layout.height,
        context.projection.scale()
    );
    Ok(context)
}

/// Exports the map to the specified file using the appropriate renderer
fn export_map(
    context: &RenderContext,
    records: &[AirportRecord],
    boundary: Option<&Boundary>,
    profile: &ExportProfileItem,
    base_dir: &Path,
) -> Result<PathBuf> {
    let output_path = base_dir.join(&profile.filename);
    info!(
        "Starting export to file: {} using exporter {:?}",
        output_path.display(),
        profile.exporter
    );

    let output = match &profile.exporter {
        ExportFileType::SVG => crate::export::to_svg::render(context, records, boundary),
        ExportFileType::GeoJSON => crate::export::to_geojson::render(context, records),
        ExportFileType::CSV => crate::export::to_csv::render(context, records),
        ExportFileType::Custom(template_config) => crate::export::to_custom::render(
            context,
            records,
            boundary,
            template_config,
            base_dir,
        ),
    }
    .map_err(|e| anyhow!("Failed to export file {}: {}", profile.filename, e))?;

    crate::common::write_string_to_file(&output_path, &output)?;
    Ok(output_path)
}

/// Executes a single plan
pub fn run_plan(plan: &Plan, plan_file_path: &Path) -> Result<RunSummary> {
    let base_dir = plan_dir(plan_file_path)?;

    let loaded = load_airports(&base_dir.join(&plan.import.airports))?;
    let boundary = load_boundary(plan, base_dir)?;
    let context = build_render_context(plan, boundary.as_ref(), &loaded.records)?;

    let mut exported = Vec::new();
    let mut failed = Vec::new();
    for profile in &plan.export.profiles {
        match export_map(&context, &loaded.records, boundary.as_ref(), profile, base_dir) {
            Ok(path) => exported.push(path),
            Err(e) => {
                error!("{}", e);
                failed.push(base_dir.join(&profile.filename));
            }
        }
    }

    info!(
        "Exported {} file(s), {} failed",
        exported.len(),
        failed.len()
    );

    Ok(RunSummary {
        records: loaded.records.len(),
        skipped: loaded.skipped,
        exported,
        failed,
    })
}

pub fn load_plan(plan_file_path: &Path) -> Result<Plan> {
    let path_content = std::fs::read_to_string(plan_file_path)
        .map_err(|e| anyhow!("Failed to read plan {}: {}", plan_file_path.display(), e))?;
    let plan: Plan = serde_yaml::from_str(&path_content)?;
    Ok(plan)
}

/// Main function to execute a plan, with optional file watching
pub fn execute_plan(plan: String, watch: bool) -> Result<()> {
    info!("Executing plan {}", plan);

    let plan_file_path = Path::new(&plan);
    let plan = load_plan(plan_file_path)?;

    debug!("Executing plan: {:?}", plan);
    run_plan(&plan, plan_file_path)?;

    if watch {
        watch_for_changes(plan, plan_file_path)?;
    }

    Ok(())
}

/// Sets up file watching for input files to re-run the plan on changes
fn watch_for_changes(plan: Plan, plan_file_path: &Path) -> Result<()> {
    info!("Watching for changes");
    let base_dir = plan_dir(plan_file_path)?;

    let mut files = vec![plan.import.airports.clone()];
    files.extend(plan.import.boundary.clone());

    let (tx, rx) = channel();
    let mut watcher = RecommendedWatcher::new(tx, Config::default())?;
    for file in &files {
        watcher.watch(&base_dir.join(file), RecursiveMode::NonRecursive)?;
    }

    loop {
        match rx.recv() {
            Ok(Ok(event)) => {
                if let EventKind::Modify(_) = event.kind {
                    debug!("File modified {:?}", event.paths);
                    info!("Change detected, re-executing plan");
                    // a broken edit should not end the watch
                    if let Err(e) = run_plan(&plan, plan_file_path) {
                        error!("Plan run failed: {}", e);
                    }
                }
            }
            Ok(Err(e)) => error!("Watch error: {:?}", e),
            Err(e) => return Err(anyhow!("Watcher disconnected: {}", e)),
        }
    }
}
