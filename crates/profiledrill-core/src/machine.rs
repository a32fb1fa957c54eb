//! Machine and drilling parameters
//!
//! Z=0 is the bottom of the stock (the spoilboard). Heights are absolute
//! machine Z values in that frame; depths are positive magnitudes.

use crate::error::{ConfigError, ConfigResult};
use crate::units::MachineUnits;
use serde::{Deserialize, Serialize};

/// Parameters of the toolpath generator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolpathConfig {
    /// Unit system written into the program header
    pub units: MachineUnits,
    /// Spindle speed (RPM)
    pub spindle_rpm: u32,
    /// Travel height above the drilled face (mm)
    pub clearance_margin_mm: f64,
    /// Depth below the face drilled at the soft feed (mm)
    pub soft_zone_depth_mm: f64,
    /// Depth drilled below Z=0 to guarantee a through hole (mm)
    pub overtravel_depth_mm: f64,
    /// Feed for the soft plunge zone (units/min)
    pub soft_feed: f64,
    /// Feed for the rest of the plunge (units/min)
    pub drill_feed: f64,
    /// Absolute Z the spindle parks at while the operator flips the profile
    pub park_height_mm: f64,
    /// Y position the carriage clears to after each face group
    pub clear_y_mm: f64,
}

impl Default for ToolpathConfig {
    fn default() -> Self {
        Self {
            units: MachineUnits::Millimeters,
            spindle_rpm: 6000,
            clearance_margin_mm: 15.0,
            soft_zone_depth_mm: 3.0,
            overtravel_depth_mm: 1.0,
            soft_feed: 50.0,
            drill_feed: 150.0,
            park_height_mm: 50.0,
            clear_y_mm: 300.0,
        }
    }
}

impl ToolpathConfig {
    /// Validate parameter ranges
    pub fn validate(&self) -> ConfigResult<()> {
        if self.spindle_rpm == 0 {
            return Err(out_of_range("spindle_rpm", 0.0, "must be > 0"));
        }

        for (name, value) in [("soft_feed", self.soft_feed), ("drill_feed", self.drill_feed)] {
            if !value.is_finite() || value <= 0.0 {
                return Err(out_of_range(name, value, "must be > 0"));
            }
        }

        for (name, value) in [
            ("clearance_margin_mm", self.clearance_margin_mm),
            ("soft_zone_depth_mm", self.soft_zone_depth_mm),
            ("overtravel_depth_mm", self.overtravel_depth_mm),
            ("park_height_mm", self.park_height_mm),
            ("clear_y_mm", self.clear_y_mm),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(out_of_range(name, value, "must be >= 0"));
            }
        }

        Ok(())
    }
}

fn out_of_range(name: &str, value: f64, reason: &str) -> ConfigError {
    ConfigError::OutOfRange {
        name: name.to_string(),
        value,
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = ToolpathConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.spindle_rpm, 6000);
        assert_eq!(config.clearance_margin_mm, 15.0);
        assert_eq!(config.soft_zone_depth_mm, 3.0);
        assert_eq!(config.overtravel_depth_mm, 1.0);
    }

    #[test]
    fn test_rejects_zero_feed() {
        let config = ToolpathConfig {
            drill_feed: 0.0,
            ..ToolpathConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::OutOfRange { ref name, .. }) if name == "drill_feed"
        ));
    }

    #[test]
    fn test_rejects_negative_depth() {
        let config = ToolpathConfig {
            overtravel_depth_mm: -1.0,
            ..ToolpathConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: ToolpathConfig =
            serde_json::from_str(r#"{"spindle_rpm": 12000, "units": "mm"}"#).unwrap();
        assert_eq!(config.spindle_rpm, 12000);
        assert_eq!(config.drill_feed, 150.0);
    }
}
