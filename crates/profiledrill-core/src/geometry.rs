//! Drilling geometry of cut-list profiles
//!
//! One [`ProfileRecord`] per physical profile, its holes bucketed by
//! normalized [`FaceLabel`]. Buckets keep first-appearance order and holes keep
//! spreadsheet row order; nothing here depends on hash iteration order.

use crate::error::{GeometryError, GeometryResult};
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use std::fmt;

/// A single hole: position along the profile length and drill diameter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HoleSpec {
    offset_mm: f64,
    diameter_mm: f64,
}

impl HoleSpec {
    /// Creates a hole spec, rejecting negative offsets and non-positive diameters.
    pub fn new(offset_mm: f64, diameter_mm: f64) -> GeometryResult<Self> {
        if !offset_mm.is_finite() || offset_mm < 0.0 {
            return Err(GeometryError::InvalidOffset { offset_mm });
        }
        if !diameter_mm.is_finite() || diameter_mm <= 0.0 {
            return Err(GeometryError::InvalidDiameter { diameter_mm });
        }
        Ok(Self {
            offset_mm,
            diameter_mm,
        })
    }

    /// Distance along the profile's length axis (mm)
    pub fn offset_mm(&self) -> f64 {
        self.offset_mm
    }

    /// Drill diameter (mm)
    pub fn diameter_mm(&self) -> f64 {
        self.diameter_mm
    }
}

impl fmt::Display for HoleSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.offset_mm, self.diameter_mm)
    }
}

/// Which way up the profile is clamped while a face is drilled.
///
/// Declaration order is the visiting order of the toolpath generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FaceGroup {
    /// Broad face up, profile lying flat
    Top,
    /// Narrow face up, profile standing on its side
    Side,
    /// Any marker that is neither top nor side
    Other,
}

impl FaceGroup {
    /// All groups in visiting order
    pub const ORDER: [FaceGroup; 3] = [FaceGroup::Top, FaceGroup::Side, FaceGroup::Other];

    /// Upper-case label used in programs and summaries
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Top => "TOP",
            Self::Side => "SIDE",
            Self::Other => "OTHER",
        }
    }
}

impl fmt::Display for FaceGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Axis marker preceding the row position inside a face suffix
pub const ROW_AXIS_MARKER: char = 'Y';

/// Canonical identity of one drilling face/row of a profile.
///
/// Two labels are equal iff group and suffix are equal; the row offset is
/// derived from the suffix.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FaceLabel {
    group: FaceGroup,
    raw_suffix: String,
}

impl FaceLabel {
    /// Creates a label from an already normalized group and suffix.
    pub fn new(group: FaceGroup, raw_suffix: impl Into<String>) -> Self {
        Self {
            group,
            raw_suffix: raw_suffix.into(),
        }
    }

    /// The single bucket used when a table has no face-marker column.
    pub fn unmarked() -> Self {
        Self::new(FaceGroup::Top, "")
    }

    pub fn group(&self) -> FaceGroup {
        self.group
    }

    pub fn raw_suffix(&self) -> &str {
        &self.raw_suffix
    }

    /// Row position across the face, read from the digits following the
    /// `Y` marker in the suffix. Absent or unparsable positions yield 0.
    pub fn row_offset_mm(&self) -> f64 {
        let upper = self.raw_suffix.to_uppercase();
        let Some(idx) = upper.find(ROW_AXIS_MARKER) else {
            return 0.0;
        };
        let digits: String = upper[idx + ROW_AXIS_MARKER.len_utf8()..]
            .chars()
            .take_while(|c| c.is_ascii_digit() || *c == '.' || *c == ',')
            .map(|c| if c == ',' { '.' } else { c })
            .collect();
        digits.parse::<f64>().unwrap_or(0.0)
    }
}

impl fmt::Display for FaceLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.group, self.raw_suffix.is_empty()) {
            (FaceGroup::Other, true) => f.write_str(FaceGroup::Other.as_str()),
            (FaceGroup::Other, false) => f.write_str(&self.raw_suffix),
            (group, true) => f.write_str(group.as_str()),
            (group, false) => write!(f, "{}_{}", group.as_str(), self.raw_suffix),
        }
    }
}

impl Serialize for FaceLabel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Holes accumulated for one face label
#[derive(Debug, Clone, PartialEq)]
pub struct FaceBucket {
    pub label: FaceLabel,
    pub holes: Vec<HoleSpec>,
}

/// Face label to holes mapping in first-appearance order
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FaceBuckets {
    buckets: Vec<FaceBucket>,
}

impl FaceBuckets {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends holes to the bucket of `label`, creating it on first use.
    /// An empty hole list never creates a bucket.
    pub fn extend(&mut self, label: FaceLabel, holes: impl IntoIterator<Item = HoleSpec>) {
        let mut holes = holes.into_iter().peekable();
        if holes.peek().is_none() {
            return;
        }
        match self.buckets.iter_mut().find(|b| b.label == label) {
            Some(bucket) => bucket.holes.extend(holes),
            None => self.buckets.push(FaceBucket {
                label,
                holes: holes.collect(),
            }),
        }
    }

    pub fn get(&self, label: &FaceLabel) -> Option<&[HoleSpec]> {
        self.buckets
            .iter()
            .find(|b| &b.label == label)
            .map(|b| b.holes.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = &FaceBucket> {
        self.buckets.iter()
    }

    /// Number of face buckets
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Total number of holes across all faces
    pub fn hole_count(&self) -> usize {
        self.buckets.iter().map(|b| b.holes.len()).sum()
    }
}

impl Serialize for FaceBuckets {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.buckets.len()))?;
        for bucket in &self.buckets {
            map.serialize_entry(&bucket.label, &bucket.holes)?;
        }
        map.end()
    }
}

/// One physical profile to be machined
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfileRecord {
    pub name: String,
    /// Nominal cross-section, e.g. "20x40"
    pub cross_section_type: Option<String>,
    /// Passthrough metadata
    pub orientation: Option<String>,
    pub length_mm: f64,
    pub qty: u32,
    pub holes_by_face: FaceBuckets,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hole(x: f64, d: f64) -> HoleSpec {
        HoleSpec::new(x, d).unwrap()
    }

    #[test]
    fn test_hole_spec_validation() {
        assert!(HoleSpec::new(0.0, 4.3).is_ok());
        assert_eq!(
            HoleSpec::new(10.0, 0.0),
            Err(GeometryError::InvalidDiameter { diameter_mm: 0.0 })
        );
        assert_eq!(
            HoleSpec::new(-1.0, 5.0),
            Err(GeometryError::InvalidOffset { offset_mm: -1.0 })
        );
        assert_eq!(hole(711.5, 4.3).to_string(), "711.5@4.3");
    }

    #[test]
    fn test_face_label_display() {
        assert_eq!(FaceLabel::new(FaceGroup::Top, "Y10").to_string(), "TOP_Y10");
        assert_eq!(FaceLabel::new(FaceGroup::Side, "").to_string(), "SIDE");
        assert_eq!(FaceLabel::new(FaceGroup::Other, "KOPS_Y5").to_string(), "KOPS_Y5");
        assert_eq!(FaceLabel::unmarked().to_string(), "TOP");
    }

    #[test]
    fn test_row_offset() {
        assert_eq!(FaceLabel::new(FaceGroup::Top, "Y10").row_offset_mm(), 10.0);
        assert_eq!(FaceLabel::new(FaceGroup::Side, "Y12,5").row_offset_mm(), 12.5);
        assert_eq!(FaceLabel::new(FaceGroup::Other, "KOPS_Y5MM").row_offset_mm(), 5.0);
        assert_eq!(FaceLabel::new(FaceGroup::Top, "").row_offset_mm(), 0.0);
        assert_eq!(FaceLabel::new(FaceGroup::Top, "YX").row_offset_mm(), 0.0);
    }

    #[test]
    fn test_buckets_merge_equal_labels() {
        let mut buckets = FaceBuckets::new();
        buckets.extend(FaceLabel::new(FaceGroup::Top, "Y10"), [hole(390.0, 4.3)]);
        buckets.extend(FaceLabel::new(FaceGroup::Side, "Y10"), [hole(20.0, 5.0)]);
        buckets.extend(FaceLabel::new(FaceGroup::Top, "Y10"), [hole(711.5, 4.3)]);
        buckets.extend(FaceLabel::new(FaceGroup::Top, "Y30"), []);

        assert_eq!(buckets.len(), 2);
        assert_eq!(buckets.hole_count(), 3);
        assert_eq!(
            buckets.get(&FaceLabel::new(FaceGroup::Top, "Y10")),
            Some(&[hole(390.0, 4.3), hole(711.5, 4.3)][..])
        );
        assert!(buckets.get(&FaceLabel::new(FaceGroup::Top, "Y30")).is_none());
    }

    #[test]
    fn test_buckets_serialize_in_insertion_order() {
        let mut buckets = FaceBuckets::new();
        buckets.extend(FaceLabel::new(FaceGroup::Side, "Y30"), [hole(20.0, 5.0)]);
        buckets.extend(FaceLabel::new(FaceGroup::Top, "Y10"), [hole(390.0, 4.3)]);

        let json = serde_json::to_string(&buckets).unwrap();
        assert_eq!(
            json,
            r#"{"SIDE_Y30":[{"offset_mm":20.0,"diameter_mm":5.0}],"TOP_Y10":[{"offset_mm":390.0,"diameter_mm":4.3}]}"#
        );
    }
}
