//! # ProfileDrill Core
//!
//! Core types shared by the ProfileDrill crates.
//! Provides the spreadsheet cell model, the per-profile drilling geometry,
//! the profile height catalog and the immutable machine configuration that
//! the toolpath generator consumes.

pub mod cell;
pub mod error;
pub mod geometry;
pub mod heights;
pub mod machine;
pub mod units;

pub use cell::CellValue;
pub use error::{ConfigError, ConfigResult, GeometryError, GeometryResult};
pub use geometry::{FaceBucket, FaceBuckets, FaceGroup, FaceLabel, HoleSpec, ProfileRecord};
pub use heights::{HeightCatalog, HeightPair};
pub use machine::ToolpathConfig;
pub use units::MachineUnits;
