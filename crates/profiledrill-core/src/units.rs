//! Machine unit selection
//!
//! The generated programs are written in the unit system selected here; all
//! geometry is stored in millimeters.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Unit system of the generated machine program
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MachineUnits {
    /// Millimeters (G21)
    #[default]
    #[serde(alias = "mm")]
    Millimeters,
    /// Inches (G20)
    #[serde(alias = "in", alias = "inch")]
    Inches,
}

impl MachineUnits {
    /// G-code word selecting this unit system
    pub fn gcode(&self) -> &'static str {
        match self {
            Self::Millimeters => "G21",
            Self::Inches => "G20",
        }
    }

    /// Short unit label ("mm" or "in")
    pub fn label(&self) -> &'static str {
        match self {
            Self::Millimeters => "mm",
            Self::Inches => "in",
        }
    }
}

impl fmt::Display for MachineUnits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Millimeters => write!(f, "millimeters"),
            Self::Inches => write!(f, "inches"),
        }
    }
}

impl FromStr for MachineUnits {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mm" | "millimeters" | "metric" => Ok(Self::Millimeters),
            "in" | "inch" | "inches" | "imperial" => Ok(Self::Inches),
            _ => Err(format!("Unknown machine units: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gcode_words() {
        assert_eq!(MachineUnits::Millimeters.gcode(), "G21");
        assert_eq!(MachineUnits::Inches.gcode(), "G20");
    }

    #[test]
    fn test_parse_units() {
        assert_eq!("MM".parse::<MachineUnits>(), Ok(MachineUnits::Millimeters));
        assert_eq!(" inch ".parse::<MachineUnits>(), Ok(MachineUnits::Inches));
        assert!("furlong".parse::<MachineUnits>().is_err());
    }

    #[test]
    fn test_default_is_metric() {
        assert_eq!(MachineUnits::default(), MachineUnits::Millimeters);
        assert_eq!(MachineUnits::default().label(), "mm");
    }
}
