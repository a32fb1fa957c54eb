//! Profile cross-section heights
//!
//! A [`HeightPair`] holds the two physical face heights of a profile; the
//! [`HeightCatalog`] maps profile names and cross-section types to pairs.

use crate::error::{ConfigError, ConfigResult, GeometryError, GeometryResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Small and large face height of a profile (mm), `small_mm <= large_mm`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "(f64, f64)", into = "(f64, f64)")]
pub struct HeightPair {
    small_mm: f64,
    large_mm: f64,
}

impl HeightPair {
    /// Builds a pair from two dimensions in any order.
    pub fn new(a_mm: f64, b_mm: f64) -> GeometryResult<Self> {
        for value_mm in [a_mm, b_mm] {
            if !value_mm.is_finite() || value_mm <= 0.0 {
                return Err(GeometryError::InvalidDimension { value_mm });
            }
        }
        Ok(Self {
            small_mm: a_mm.min(b_mm),
            large_mm: a_mm.max(b_mm),
        })
    }

    /// Square profile helper
    pub fn square(side_mm: f64) -> GeometryResult<Self> {
        Self::new(side_mm, side_mm)
    }

    pub fn small_mm(&self) -> f64 {
        self.small_mm
    }

    pub fn large_mm(&self) -> f64 {
        self.large_mm
    }
}

impl TryFrom<(f64, f64)> for HeightPair {
    type Error = GeometryError;

    fn try_from((a, b): (f64, f64)) -> Result<Self, Self::Error> {
        Self::new(a, b)
    }
}

impl From<HeightPair> for (f64, f64) {
    fn from(pair: HeightPair) -> Self {
        (pair.small_mm, pair.large_mm)
    }
}

/// Height lookup tables passed explicitly to the height resolver
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeightCatalog {
    /// Exact profile-name overrides
    pub by_name: BTreeMap<String, HeightPair>,
    /// Cross-section types, keyed in normalized form ("20x40")
    pub by_type: BTreeMap<String, HeightPair>,
    /// Pair used when nothing else resolves
    pub fallback: HeightPair,
}

impl HeightCatalog {
    /// Catalog with no entries and the given fallback pair
    pub fn empty(fallback: HeightPair) -> Self {
        Self {
            by_name: BTreeMap::new(),
            by_type: BTreeMap::new(),
            fallback,
        }
    }

    /// Adds a name override
    pub fn with_name(mut self, name: impl Into<String>, pair: HeightPair) -> Self {
        self.by_name.insert(name.into(), pair);
        self
    }

    /// Adds a cross-section type entry
    pub fn with_type(mut self, key: impl Into<String>, pair: HeightPair) -> Self {
        self.by_type.insert(key.into(), pair);
        self
    }

    /// Checks catalog keys. Pair values are validated on construction.
    pub fn validate(&self) -> ConfigResult<()> {
        for key in self.by_type.keys() {
            if key.trim().is_empty() {
                return Err(ConfigError::Incompatible(
                    "height catalog contains an empty type key".to_string(),
                ));
            }
        }
        for key in self.by_name.keys() {
            if key.trim().is_empty() {
                return Err(ConfigError::Incompatible(
                    "height catalog contains an empty profile name".to_string(),
                ));
            }
        }
        Ok(())
    }
}

impl Default for HeightCatalog {
    fn default() -> Self {
        let pair = |a, b| HeightPair {
            small_mm: a,
            large_mm: b,
        };
        Self {
            by_name: BTreeMap::new(),
            by_type: BTreeMap::from([
                ("20x20".to_string(), pair(20.0, 20.0)),
                ("20x40".to_string(), pair(20.0, 40.0)),
                ("40x40".to_string(), pair(40.0, 40.0)),
            ]),
            fallback: pair(20.0, 20.0),
        }
    }
}
