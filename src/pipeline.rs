//! End-to-end run: cut-list table in, drilling programs out.

use crate::cli::Cli;
use crate::preview::render_preview;
use anyhow::Context;
use profiledrill_camtools::{
    extract_profiles, flat_json, geometry_json, CutListTable, Extraction, GcodeRenderer,
    ProgramWriter, ToolpathGenerator,
};
use profiledrill_settings::Config;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// What a run produced
#[derive(Debug, Default)]
pub struct RunSummary {
    pub profiles: usize,
    pub dropped: usize,
    pub written: Vec<PathBuf>,
    /// Profile name and error message of every program that could not be written
    pub failed: Vec<(String, String)>,
}

/// Loads a cut-list table from a JSON file.
pub fn load_table(path: &Path) -> anyhow::Result<CutListTable> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("Failed to open cut-list {}", path.display()))?;
    CutListTable::from_reader(std::io::BufReader::new(file))
        .with_context(|| format!("Failed to read cut-list {}", path.display()))
}

pub fn run(cli: &Cli) -> anyhow::Result<RunSummary> {
    let config = Config::load_or_default(cli.config.as_deref()).context("Failed to load configuration")?;
    let table = load_table(&cli.table)?;

    let extraction = extract_profiles(&table).context("Hole extraction failed")?;
    print_preview(cli, &extraction)?;

    export(cli.export_geometry.as_deref(), || geometry_json(&extraction.profiles))?;
    export(cli.export_flat.as_deref(), || flat_json(&extraction.profiles))?;

    let mut summary = RunSummary {
        profiles: extraction.profiles.len(),
        dropped: extraction.dropped.len(),
        ..RunSummary::default()
    };

    if cli.no_gcode || extraction.profiles.is_empty() {
        return Ok(summary);
    }

    let generator = ToolpathGenerator::new(&config.toolpath, &config.heights)
        .context("Invalid toolpath configuration")?;
    let programs = generator.generate_all(&extraction.profiles);

    let output_dir = cli
        .out
        .clone()
        .unwrap_or_else(|| config.output.output_directory.clone());
    let writer = ProgramWriter::new(output_dir)
        .with_extension(config.output.extension.clone())
        .with_combined_name(config.output.combined_name.clone())
        .with_renderer(GcodeRenderer::with_line_numbers(config.output.line_numbers_enabled));

    if cli.combined {
        let path = writer
            .write_combined(&programs)
            .context("Failed to write combined program")?;
        summary.written.push(path);
    } else {
        for outcome in writer.write_each(&programs) {
            match outcome.result {
                Ok(path) => summary.written.push(path),
                Err(e) => summary.failed.push((outcome.profile_name, e.to_string())),
            }
        }
    }

    info!(
        "{} programs written to {}",
        summary.written.len(),
        writer.output_dir().display()
    );
    Ok(summary)
}

fn print_preview(cli: &Cli, extraction: &Extraction) -> anyhow::Result<()> {
    if extraction.profiles.is_empty() {
        warn!("No profiles with holes found in {}", cli.table.display());
        return Ok(());
    }
    print!("{}", render_preview(&extraction.profiles, cli.show, cli.max_rows)?);
    Ok(())
}

fn export(
    path: Option<&Path>,
    render: impl FnOnce() -> profiledrill_camtools::CamToolResult<String>,
) -> anyhow::Result<()> {
    let Some(path) = path else {
        return Ok(());
    };
    let json = render().context("Failed to serialize geometry")?;
    std::fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))?;
    info!("Exported geometry -> {}", path.display());
    Ok(())
}
