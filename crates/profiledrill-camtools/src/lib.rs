//! # ProfileDrill CAM Tools
//!
//! Turns a cut-list table into drilling programs for aluminium profiles.
//!
//! ## Pipeline
//!
//! - **Hole Tokens**: `offset@diameter` cells parsed into hole specs
//! - **Face Markers**: free-text markers such as `BOVENKANT Y10` normalized into face labels
//! - **Extraction**: carry-forward grouping of spreadsheet rows into profile records
//! - **Height Resolution**: cross-section type to physical face height
//! - **Toolpath**: ordered drilling operations per profile, with manual face flips
//! - **G-code**: Mach3 text rendering of the operations
//!
//! ## Supporting Infrastructure
//!
//! - **Projection**: flat, per-face and long-form views of extracted geometry
//! - **Writer**: per-profile or combined program files

pub mod error;
pub mod extraction;
pub mod face_marker;
pub mod gcode;
pub mod height;
pub mod hole_token;
pub mod projection;
pub mod table;
pub mod toolpath;
pub mod writer;

// Re-export commonly used items
pub use error::{CamToolError, CamToolResult, ExtractionError, ExtractionResult};
pub use extraction::{extract_profiles, extract_with_roles, ColumnRoles, Extraction, ExtractionMode};
pub use face_marker::normalize_face_marker;
pub use gcode::{render_op, GcodeRenderer};
pub use height::{normalize_type, HeightResolver};
pub use hole_token::{format_hole_token, parse_hole_cells, parse_hole_token};
pub use projection::{
    face_columns, flat_json, flatten_profiles, geometry_json, holes_flat, FaceColumns, FlatHoleRow,
};
pub use table::CutListTable;
pub use toolpath::{
    concat_programs, DrillProgram, HomeAxes, ToolpathGenerator, ToolpathOp, FLIP_MESSAGE,
};
pub use writer::{file_stem, ProgramOutcome, ProgramWriter};
