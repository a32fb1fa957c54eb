//! ProfileDrill Settings Crate
//!
//! Handles the configuration file: toolpath parameters, the height catalog and
//! output preferences.

pub mod config;
pub mod error;

pub use config::{Config, OutputSettings, CONFIG_FILE_NAME};
pub use error::{SettingsError, SettingsResult};
