//! Error handling for ProfileDrill core types
//!
//! Provides the error types raised when constructing geometry values and when
//! validating machine configuration:
//! - Geometry errors (hole specs, height pairs)
//! - Configuration errors (toolpath parameters, height catalog entries)
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Geometry error type
///
/// Raised when a value would violate the invariants of the drilling model.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    /// Hole offset along the profile is negative or not finite
    #[error("Invalid hole offset: {offset_mm}")]
    InvalidOffset {
        /// The rejected offset in millimeters.
        offset_mm: f64,
    },

    /// Hole diameter is zero, negative or not finite
    #[error("Invalid hole diameter: {diameter_mm}")]
    InvalidDiameter {
        /// The rejected diameter in millimeters.
        diameter_mm: f64,
    },

    /// Height pair dimension is zero, negative or not finite
    #[error("Invalid profile dimension: {value_mm}")]
    InvalidDimension {
        /// The rejected dimension in millimeters.
        value_mm: f64,
    },
}

/// Configuration error type
///
/// Represents validation failures of the toolpath configuration or the
/// height catalog.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// A parameter value is out of the valid range
    #[error("Parameter '{name}' out of range: {value} ({reason})")]
    OutOfRange {
        /// The parameter name.
        name: String,
        /// The rejected value.
        value: f64,
        /// What the valid range is.
        reason: String,
    },

    /// Parameters are mutually incompatible
    #[error("Incompatible parameters: {0}")]
    Incompatible(String),
}

/// Result type alias for geometry construction.
pub type GeometryResult<T> = Result<T, GeometryError>;

/// Result type alias for configuration validation.
pub type ConfigResult<T> = Result<T, ConfigError>;
