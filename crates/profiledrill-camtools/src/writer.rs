//! Program output
//!
//! Writes rendered programs to disk, either one file per profile or a single
//! combined file. In per-file mode a failing profile is reported and the rest
//! are still written; in combined mode the file is written to a temporary name
//! first so a failure never leaves a partial program behind.

use crate::error::{CamToolError, CamToolResult};
use crate::gcode::GcodeRenderer;
use crate::toolpath::{concat_programs, DrillProgram};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

pub const DEFAULT_EXTENSION: &str = "tap";
pub const DEFAULT_COMBINED_NAME: &str = "all_profiles";

/// Result of writing one profile in per-file mode
#[derive(Debug)]
pub struct ProgramOutcome {
    pub profile_name: String,
    pub result: CamToolResult<PathBuf>,
}

/// Writes drilling programs into an output directory
#[derive(Debug, Clone)]
pub struct ProgramWriter {
    output_dir: PathBuf,
    extension: String,
    combined_name: String,
    renderer: GcodeRenderer,
}

impl ProgramWriter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            extension: DEFAULT_EXTENSION.to_string(),
            combined_name: DEFAULT_COMBINED_NAME.to_string(),
            renderer: GcodeRenderer::new(),
        }
    }

    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into().trim_start_matches('.').to_string();
        self
    }

    pub fn with_combined_name(mut self, name: impl Into<String>) -> Self {
        self.combined_name = name.into();
        self
    }

    pub fn with_renderer(mut self, renderer: GcodeRenderer) -> Self {
        self.renderer = renderer;
        self
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Writes one file per program. Names that collide after sanitizing get
    /// a numeric suffix (`P_1.tap`, `P_1_2.tap`).
    pub fn write_each(&self, programs: &[DrillProgram]) -> Vec<ProgramOutcome> {
        if let Err(e) = self.ensure_output_dir() {
            warn!("Cannot create output directory: {}", e);
            let message = e.to_string();
            return programs
                .iter()
                .map(|p| ProgramOutcome {
                    profile_name: p.profile_name.clone(),
                    result: Err(CamToolError::WriteFailed {
                        path: self.output_dir.clone(),
                        source: std::io::Error::other(message.clone()),
                    }),
                })
                .collect();
        }

        let mut used = HashSet::new();
        programs
            .iter()
            .map(|program| {
                let stem = unique_stem(&mut used, &file_stem(&program.profile_name));
                let path = self.output_dir.join(format!("{}.{}", stem, self.extension));
                let result = write_text(&path, &self.renderer.render(&program.ops));
                match &result {
                    Ok(path) => info!("Wrote {} -> {}", program.profile_name, path.display()),
                    Err(e) => warn!("Skipping profile {}: {}", program.profile_name, e),
                }
                ProgramOutcome {
                    profile_name: program.profile_name.clone(),
                    result,
                }
            })
            .collect()
    }

    /// Writes all programs into one combined file, blank-line separated.
    pub fn write_combined(&self, programs: &[DrillProgram]) -> CamToolResult<PathBuf> {
        self.ensure_output_dir()?;

        let ops = concat_programs(programs.iter().map(|p| p.ops.clone()));

        let path = self
            .output_dir
            .join(format!("{}.{}", file_stem(&self.combined_name), self.extension));
        let partial = path.with_extension(format!("{}.partial", self.extension));
        let result = write_text(&partial, &self.renderer.render(&ops)).and_then(|_| {
            std::fs::rename(&partial, &path).map_err(|source| CamToolError::WriteFailed {
                path: path.clone(),
                source,
            })
        });
        if let Err(e) = result {
            let _ = std::fs::remove_file(&partial);
            return Err(e);
        }

        info!("Wrote {} programs -> {}", programs.len(), path.display());
        Ok(path)
    }

    fn ensure_output_dir(&self) -> CamToolResult<()> {
        std::fs::create_dir_all(&self.output_dir).map_err(|source| CamToolError::WriteFailed {
            path: self.output_dir.clone(),
            source,
        })
    }
}

fn write_text(path: &Path, text: &str) -> CamToolResult<PathBuf> {
    let ascii: String = text.chars().filter(char::is_ascii).collect();
    std::fs::write(path, ascii).map_err(|source| CamToolError::WriteFailed {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(path.to_path_buf())
}

/// File stem for a profile name: spaces and path characters become `_`,
/// non-ASCII characters are dropped.
pub fn file_stem(name: &str) -> String {
    let stem: String = name
        .trim()
        .chars()
        .filter(char::is_ascii)
        .map(|c| match c {
            ' ' | '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_ascii_control() => '_',
            c => c,
        })
        .collect();
    if stem.is_empty() || stem.chars().all(|c| c == '.') {
        "profile".to_string()
    } else {
        stem
    }
}

fn unique_stem(used: &mut HashSet<String>, stem: &str) -> String {
    let mut candidate = stem.to_string();
    let mut n = 2;
    while !used.insert(candidate.to_lowercase()) {
        candidate = format!("{}_{}", stem, n);
        n += 1;
    }
    candidate
}
