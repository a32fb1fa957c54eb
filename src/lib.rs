//! # ProfileDrill
//!
//! Drilling programs for aluminium profiles, straight from a cut-list.
//!
//! A cut-list names each profile once and lists its drilling rows below it,
//! one row per face with tokens such as `390@4.3`. ProfileDrill rebuilds the
//! profiles from that layout and writes one Mach3 program per profile, with a
//! manual flip between the top, side and remaining faces.
//!
//! ## Architecture
//!
//! ProfileDrill is organized as a workspace with multiple crates:
//!
//! 1. **profiledrill-core** - Geometry model, machine configuration, height catalog
//! 2. **profiledrill-camtools** - Extraction, height resolution, toolpath generation, G-code output
//! 3. **profiledrill-settings** - Configuration file loading and validation
//! 4. **profiledrill** - Command line binary that wires the crates together

pub mod cli;
pub mod pipeline;
pub mod preview;

pub use cli::{Cli, ShowMode};
pub use pipeline::{load_table, run, RunSummary};

pub use profiledrill_camtools::{
    extract_profiles, CutListTable, DrillProgram, Extraction, GcodeRenderer, ProgramWriter,
    ToolpathGenerator, ToolpathOp,
};
pub use profiledrill_core::{HeightCatalog, ProfileRecord, ToolpathConfig};
pub use profiledrill_settings::Config;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Console output on stderr, so previews on stdout stay clean
/// - RUST_LOG environment variable support
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
