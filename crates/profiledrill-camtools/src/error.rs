//! Error types for the CAM tools crate.
//!
//! This module provides structured error types for cut-list extraction,
//! configuration and program output.

use profiledrill_core::ConfigError;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during CAM tool operations.
#[derive(Error, Debug)]
pub enum CamToolError {
    /// The cut-list could not be grouped into profiles.
    #[error("Extraction failed: {0}")]
    Extraction(#[from] ExtractionError),

    /// The toolpath configuration is invalid.
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    /// A program file could not be written.
    #[error("Failed to write {}: {source}", .path.display())]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// JSON serialization/deserialization error.
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

/// Structural errors that abort extraction with no partial output.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExtractionError {
    /// Identity columns needed to group rows are absent from the header.
    #[error("Required columns missing: {}", .missing.join(", "))]
    MissingColumns { missing: Vec<String> },

    /// The table has no header at all.
    #[error("Cut-list table has no columns")]
    EmptyTable,

    /// A column role points outside the header.
    #[error("Column index {index} out of range (table has {width} columns)")]
    ColumnOutOfRange { index: usize, width: usize },
}

/// Result type alias for CAM tool operations.
pub type CamToolResult<T> = Result<T, CamToolError>;

/// Result type alias for extraction.
pub type ExtractionResult<T> = Result<T, ExtractionError>;
