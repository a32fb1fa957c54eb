//! Profile height resolution
//!
//! Maps a profile's cross-section type (or a name override) to the physical
//! height of the face being drilled. Z=0 is the bottom of the stock, so this
//! height is also the Z of the drilled surface.
//!
//! Resolution order, first match wins:
//! 1. exact profile name in the catalog's name overrides
//! 2. normalized type in the catalog's type table
//! 3. normalized type parsed as `AxB`
//! 4. the catalog fallback pair
//!
//! Resolution never fails.

use profiledrill_core::{FaceGroup, HeightCatalog, HeightPair};
use tracing::debug;

/// Separator between the two dimensions of a cross-section type
pub const TYPE_SEPARATOR: char = 'x';

/// Resolves profile heights against a catalog
#[derive(Debug, Clone, Copy)]
pub struct HeightResolver<'a> {
    catalog: &'a HeightCatalog,
}

impl<'a> HeightResolver<'a> {
    pub fn new(catalog: &'a HeightCatalog) -> Self {
        Self { catalog }
    }

    /// Resolves the height pair for a profile.
    pub fn resolve_pair(&self, cross_section_type: Option<&str>, profile_name: Option<&str>) -> HeightPair {
        if let Some(pair) = profile_name.and_then(|name| self.catalog.by_name.get(name.trim())) {
            return *pair;
        }

        let Some(key) = cross_section_type.map(normalize_type).filter(|k| !k.is_empty()) else {
            return self.catalog.fallback;
        };

        let catalog_hit = self
            .catalog
            .by_type
            .get(&key)
            .or_else(|| {
                self.catalog
                    .by_type
                    .iter()
                    .find(|(k, _)| normalize_type(k) == key)
                    .map(|(_, pair)| pair)
            });
        if let Some(pair) = catalog_hit {
            return *pair;
        }

        match parse_dimensions(&key) {
            Some(pair) => pair,
            None => {
                debug!("Unresolvable profile type {:?}, using fallback heights", key);
                self.catalog.fallback
            }
        }
    }

    /// Height of the drilled surface for one face group: the large
    /// dimension when the profile lies flat (TOP), the small one otherwise.
    pub fn side_height(
        &self,
        cross_section_type: Option<&str>,
        profile_name: Option<&str>,
        group: FaceGroup,
    ) -> f64 {
        let pair = self.resolve_pair(cross_section_type, profile_name);
        match group {
            FaceGroup::Top => pair.large_mm(),
            FaceGroup::Side | FaceGroup::Other => pair.small_mm(),
        }
    }
}

/// Normalizes a cross-section type: trimmed, lower-cased, inner whitespace
/// removed and the unicode multiplication sign mapped to `x`.
pub fn normalize_type(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .map(|c| if c == '×' { TYPE_SEPARATOR } else { c })
        .collect()
}

/// Parses a normalized `AxB` type into a pair.
fn parse_dimensions(key: &str) -> Option<HeightPair> {
    let (a, b) = key.split_once(TYPE_SEPARATOR)?;
    let a = a.replace(',', ".").parse::<f64>().ok()?;
    let b = b.replace(',', ".").parse::<f64>().ok()?;
    HeightPair::new(a, b).ok()
}
