//! Command line interface

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(name = "profiledrill")]
#[command(version, about = "Cut-list hole extraction and Mach3 drilling programs per profile", long_about = None)]
pub struct Cli {
    /// Cut-list table as JSON: {"columns": [...], "rows": [[...], ...]}
    pub table: PathBuf,

    /// Configuration file (.toml or .json); defaults to the user config directory
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Output directory for programs, overrides the configured one
    #[arg(short, long)]
    pub out: Option<PathBuf>,

    /// Write all profiles into one combined program
    #[arg(long)]
    pub combined: bool,

    /// How holes are shown in the preview table
    #[arg(long, value_enum, default_value_t = ShowMode::Flat)]
    pub show: ShowMode,

    /// Maximum number of profiles shown in the preview table
    #[arg(long, default_value_t = 25)]
    pub max_rows: usize,

    /// Export the nested per-face geometry as JSON
    #[arg(long)]
    pub export_geometry: Option<PathBuf>,

    /// Export one row per hole as JSON
    #[arg(long)]
    pub export_flat: Option<PathBuf>,

    /// Only extract and preview, do not write programs
    #[arg(long)]
    pub no_gcode: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShowMode {
    /// Compact `FACE: x@d,...` summary
    #[default]
    Flat,
    /// Nested JSON per profile
    Json,
    /// Identity columns only
    None,
}
