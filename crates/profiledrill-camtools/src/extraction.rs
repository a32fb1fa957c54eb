//! Cut-list hole extraction
//!
//! Rebuilds profile records from a cut-list whose layout relies on merged
//! cells: a profile's identity (name, type, orientation, length, qty) is
//! written once on its header row and left blank on the face rows below it.
//! Identity fields are carried forward row by row, consecutive rows sharing
//! the same carried identity form one profile, and each face row contributes
//! the hole tokens found to the right of its face marker.

use crate::error::{ExtractionError, ExtractionResult};
use crate::face_marker::normalize_face_marker;
use crate::hole_token::parse_hole_cells;
use crate::table::CutListTable;
use profiledrill_core::{CellValue, FaceBuckets, FaceLabel, ProfileRecord};
use serde::Serialize;
use tracing::{debug, info, warn};

/// Header aliases for the profile name column
pub const NAME_ALIASES: &[&str] = &["profile", "profiel_naam"];
/// Header aliases for the cross-section type column
pub const TYPE_ALIASES: &[&str] = &["profiel_type", "type"];
/// Header aliases for the orientation column
pub const ORIENTATION_ALIASES: &[&str] = &["orientatie", "orientation"];
/// Header aliases for the length column
pub const LENGTH_ALIASES: &[&str] = &["length_mm", "lengte_mm"];
/// Header aliases for the quantity column
pub const QTY_ALIASES: &[&str] = &["qty", "aantal"];
/// Header aliases for the face marker column
pub const FACE_MARKER_ALIASES: &[&str] = &["zijde", "side", "face"];

/// How hole-candidate columns relate to faces
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum ExtractionMode {
    /// Rows carry a face marker; hole columns follow the marker column.
    Faced {
        marker_column: usize,
        hole_columns: Vec<usize>,
    },
    /// No face marker column: every non-identity column may hold holes and
    /// all holes land in the single [`FaceLabel::unmarked`] bucket.
    Ungrouped { hole_columns: Vec<usize> },
}

impl ExtractionMode {
    pub fn hole_columns(&self) -> &[usize] {
        match self {
            Self::Faced { hole_columns, .. } | Self::Ungrouped { hole_columns } => hole_columns,
        }
    }
}

/// Column indices of each role in a cut-list table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnRoles {
    pub name: usize,
    pub length: usize,
    pub profile_type: Option<usize>,
    pub orientation: Option<usize>,
    pub qty: Option<usize>,
    pub mode: ExtractionMode,
}

impl ColumnRoles {
    /// Locates column roles by header name.
    ///
    /// Fails when the name or length column is absent: rows cannot be
    /// grouped into profiles without them.
    pub fn infer(table: &CutListTable) -> ExtractionResult<Self> {
        if table.columns.is_empty() {
            return Err(ExtractionError::EmptyTable);
        }

        let name = table.find_column(NAME_ALIASES);
        let length = table.find_column(LENGTH_ALIASES);
        let (name, length) = match (name, length) {
            (Some(name), Some(length)) => (name, length),
            (name, length) => {
                let mut missing = Vec::new();
                if name.is_none() {
                    missing.push(NAME_ALIASES.join("/"));
                }
                if length.is_none() {
                    missing.push(LENGTH_ALIASES.join("/"));
                }
                return Err(ExtractionError::MissingColumns { missing });
            }
        };

        let profile_type = table.find_column(TYPE_ALIASES);
        let orientation = table.find_column(ORIENTATION_ALIASES);
        let qty = table.find_column(QTY_ALIASES);
        let identity = [Some(name), Some(length), profile_type, orientation, qty];
        let is_identity = |idx: usize| identity.contains(&Some(idx));

        let mode = match table.find_column(FACE_MARKER_ALIASES) {
            Some(marker_column) => ExtractionMode::Faced {
                marker_column,
                hole_columns: (marker_column + 1..table.width())
                    .filter(|idx| !is_identity(*idx))
                    .collect(),
            },
            None => {
                warn!(
                    "No face marker column found; treating every non-identity column as holes without face grouping"
                );
                ExtractionMode::Ungrouped {
                    hole_columns: (0..table.width()).filter(|idx| !is_identity(*idx)).collect(),
                }
            }
        };

        let roles = Self {
            name,
            length,
            profile_type,
            orientation,
            qty,
            mode,
        };
        debug!("Inferred column roles: {:?}", roles);
        Ok(roles)
    }

    /// Checks every role index against the table width.
    pub fn validate(&self, width: usize) -> ExtractionResult<()> {
        let marker = match &self.mode {
            ExtractionMode::Faced { marker_column, .. } => Some(*marker_column),
            ExtractionMode::Ungrouped { .. } => None,
        };
        let indices = [Some(self.name), Some(self.length), self.profile_type, self.orientation, self.qty, marker]
            .into_iter()
            .flatten()
            .chain(self.mode.hole_columns().iter().copied());
        for index in indices {
            if index >= width {
                return Err(ExtractionError::ColumnOutOfRange { index, width });
            }
        }
        Ok(())
    }
}

/// Result of a successful extraction
#[derive(Debug, Clone, PartialEq)]
pub struct Extraction {
    /// Profiles with at least one hole, stably sorted by name
    pub profiles: Vec<ProfileRecord>,
    /// Names of profile groups that carried no holes and were left out
    pub dropped: Vec<String>,
    pub mode: ExtractionMode,
}

/// Extracts profile records, inferring column roles from the header.
pub fn extract_profiles(table: &CutListTable) -> ExtractionResult<Extraction> {
    let roles = ColumnRoles::infer(table)?;
    extract_with_roles(table, &roles)
}

/// Extracts profile records using explicit column roles.
pub fn extract_with_roles(table: &CutListTable, roles: &ColumnRoles) -> ExtractionResult<Extraction> {
    roles.validate(table.width())?;

    let mut carry = IdentityCarry::default();
    let mut current: Option<ProfileRun> = None;
    let mut profiles = Vec::new();
    let mut dropped = Vec::new();

    for row_idx in 0..table.rows.len() {
        carry.absorb(table, row_idx, roles);

        let Some(identity) = carry.identity() else {
            debug!("Row {} has no profile identity yet, skipping", row_idx);
            if let Some(run) = current.take() {
                run.finish(&mut profiles, &mut dropped);
            }
            continue;
        };

        let run = match current.take() {
            Some(run) if run.identity == identity => current.insert(run),
            previous => {
                if let Some(run) = previous {
                    run.finish(&mut profiles, &mut dropped);
                }
                current.insert(ProfileRun::new(identity))
            }
        };
        run.accumulate(table, row_idx, roles);
    }

    if let Some(run) = current.take() {
        run.finish(&mut profiles, &mut dropped);
    }

    profiles.sort_by(|a, b| a.name.cmp(&b.name));
    info!(
        "Extracted {} profiles with holes ({} without holes dropped)",
        profiles.len(),
        dropped.len()
    );

    Ok(Extraction {
        profiles,
        dropped,
        mode: roles.mode.clone(),
    })
}

/// Last-seen raw value per identity field
#[derive(Debug, Default)]
struct IdentityCarry {
    name: Option<String>,
    profile_type: Option<String>,
    orientation: Option<String>,
    length: Option<CellValue>,
    qty: Option<CellValue>,
}

impl IdentityCarry {
    fn absorb(&mut self, table: &CutListTable, row: usize, roles: &ColumnRoles) {
        let present = |col: Option<usize>| {
            col.map(|c| table.cell(row, c))
                .filter(|cell| !cell.is_empty())
        };

        if let Some(cell) = present(Some(roles.name)) {
            self.name = cell.as_text();
        }
        if let Some(cell) = present(roles.profile_type) {
            self.profile_type = cell.as_text();
        }
        if let Some(cell) = present(roles.orientation) {
            self.orientation = cell.as_text();
        }
        if let Some(cell) = present(Some(roles.length)) {
            self.length = Some(cell.clone());
        }
        if let Some(cell) = present(roles.qty) {
            self.qty = Some(cell.clone());
        }
    }

    fn identity(&self) -> Option<Identity> {
        let name = self.name.clone()?;
        let length_mm = self.length.as_ref()?.as_f64()?;
        let qty = self
            .qty
            .as_ref()
            .and_then(CellValue::as_f64)
            .filter(|q| *q >= 0.0 && *q <= f64::from(u32::MAX))
            .map(|q| q.round() as u32)
            .unwrap_or(1);

        Some(Identity {
            name,
            length_mm,
            profile_type: self.profile_type.clone(),
            orientation: self.orientation.clone(),
            qty,
        })
    }
}

/// Carried identity tuple shared by all rows of one profile
#[derive(Debug, Clone, PartialEq)]
struct Identity {
    name: String,
    length_mm: f64,
    profile_type: Option<String>,
    orientation: Option<String>,
    qty: u32,
}

/// A maximal run of rows sharing one identity
#[derive(Debug)]
struct ProfileRun {
    identity: Identity,
    holes_by_face: FaceBuckets,
}

impl ProfileRun {
    fn new(identity: Identity) -> Self {
        Self {
            identity,
            holes_by_face: FaceBuckets::new(),
        }
    }

    fn accumulate(&mut self, table: &CutListTable, row: usize, roles: &ColumnRoles) {
        let label = match &roles.mode {
            ExtractionMode::Faced { marker_column, .. } => {
                let marker = table.cell(row, *marker_column).as_text();
                match marker.as_deref().and_then(normalize_face_marker) {
                    Some(label) => label,
                    None => return,
                }
            }
            ExtractionMode::Ungrouped { .. } => FaceLabel::unmarked(),
        };

        let holes = parse_hole_cells(
            roles
                .mode
                .hole_columns()
                .iter()
                .map(|col| table.cell(row, *col)),
        );
        self.holes_by_face.extend(label, holes);
    }

    fn finish(self, profiles: &mut Vec<ProfileRecord>, dropped: &mut Vec<String>) {
        let Identity {
            name,
            length_mm,
            profile_type,
            orientation,
            qty,
        } = self.identity;

        if self.holes_by_face.is_empty() {
            debug!("Profile {} has no holes, dropping", name);
            dropped.push(name);
            return;
        }

        debug!(
            "Profile {}: {} holes on {} faces",
            name,
            self.holes_by_face.hole_count(),
            self.holes_by_face.len()
        );
        profiles.push(ProfileRecord {
            name,
            cross_section_type: profile_type,
            orientation,
            length_mm,
            qty,
            holes_by_face: self.holes_by_face,
        });
    }
}
