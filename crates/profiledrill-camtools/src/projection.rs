//! Tabular projections of extracted geometry
//!
//! Views over [`ProfileRecord`]s for inspection and export: a compact one-line
//! summary per profile, one column per face across a record set, the nested
//! JSON structure and a long form with one row per hole.

use crate::error::CamToolResult;
use crate::hole_token::format_hole_token;
use profiledrill_core::{FaceLabel, HoleSpec, ProfileRecord};
use serde::Serialize;

/// Compact summary, e.g. `TOP_Y10: 390@4.3,711.5@4.3 | SIDE_Y30: 20@5`.
/// Faces appear in extraction order, holes in spreadsheet order.
pub fn holes_flat(profile: &ProfileRecord) -> String {
    profile
        .holes_by_face
        .iter()
        .map(|bucket| format!("{}: {}", bucket.label, join_tokens(&bucket.holes)))
        .collect::<Vec<_>>()
        .join(" | ")
}

fn join_tokens(holes: &[HoleSpec]) -> String {
    holes
        .iter()
        .map(format_hole_token)
        .collect::<Vec<_>>()
        .join(",")
}

/// One column per distinct face label across all profiles
#[derive(Debug, Clone, PartialEq)]
pub struct FaceColumns {
    /// Face labels sorted by display string
    pub faces: Vec<FaceLabel>,
    /// One row per profile, one cell per face; empty when the profile has no
    /// holes on that face
    pub rows: Vec<Vec<String>>,
}

impl FaceColumns {
    /// Column header for a face, e.g. `holes_top_y10`.
    pub fn header(face: &FaceLabel) -> String {
        format!("holes_{}", face.to_string().to_lowercase())
    }
}

/// Spreads the holes of every profile over one column per face label.
pub fn face_columns(profiles: &[ProfileRecord]) -> FaceColumns {
    let mut faces: Vec<FaceLabel> = Vec::new();
    for label in profiles.iter().flat_map(|p| p.holes_by_face.iter().map(|b| &b.label)) {
        if !faces.contains(label) {
            faces.push(label.clone());
        }
    }
    faces.sort_by_cached_key(|face| face.to_string());

    let rows = profiles
        .iter()
        .map(|p| {
            faces
                .iter()
                .map(|face| p.holes_by_face.get(face).map(join_tokens).unwrap_or_default())
                .collect()
        })
        .collect();

    FaceColumns { faces, rows }
}

/// Long-form row: one per hole, profile identity repeated
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlatHoleRow {
    pub profile_name: String,
    pub profile_type: Option<String>,
    pub orientation: Option<String>,
    pub length_mm: f64,
    pub qty: u32,
    pub face: String,
    pub x_mm: f64,
    pub d_mm: f64,
}

pub fn flatten_profiles(profiles: &[ProfileRecord]) -> Vec<FlatHoleRow> {
    profiles
        .iter()
        .flat_map(|p| {
            p.holes_by_face.iter().flat_map(move |bucket| {
                bucket.holes.iter().map(move |hole| FlatHoleRow {
                    profile_name: p.name.clone(),
                    profile_type: p.cross_section_type.clone(),
                    orientation: p.orientation.clone(),
                    length_mm: p.length_mm,
                    qty: p.qty,
                    face: bucket.label.to_string(),
                    x_mm: hole.offset_mm(),
                    d_mm: hole.diameter_mm(),
                })
            })
        })
        .collect()
}

/// Nested geometry of all profiles as pretty JSON.
pub fn geometry_json(profiles: &[ProfileRecord]) -> CamToolResult<String> {
    Ok(serde_json::to_string_pretty(profiles)?)
}

/// Long-form rows of all profiles as pretty JSON.
pub fn flat_json(profiles: &[ProfileRecord]) -> CamToolResult<String> {
    Ok(serde_json::to_string_pretty(&flatten_profiles(profiles))?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use profiledrill_core::{FaceBuckets, FaceGroup};

    fn hole(x: f64, d: f64) -> HoleSpec {
        HoleSpec::new(x, d).unwrap()
    }

    fn record(name: &str, faces: Vec<(FaceLabel, Vec<HoleSpec>)>) -> ProfileRecord {
        let mut holes_by_face = FaceBuckets::new();
        for (label, holes) in faces {
            holes_by_face.extend(label, holes);
        }
        ProfileRecord {
            name: name.to_string(),
            cross_section_type: Some("20x40".to_string()),
            orientation: None,
            length_mm: 1200.0,
            qty: 2,
            holes_by_face,
        }
    }

    fn sample() -> Vec<ProfileRecord> {
        vec![
            record(
                "P1",
                vec![
                    (
                        FaceLabel::new(FaceGroup::Top, "Y10"),
                        vec![hole(390.0, 4.3), hole(711.5, 4.3)],
                    ),
                    (FaceLabel::new(FaceGroup::Side, "Y30"), vec![hole(20.0, 5.0)]),
                ],
            ),
            record(
                "P2",
                vec![(FaceLabel::new(FaceGroup::Side, "Y30"), vec![hole(100.0, 8.0)])],
            ),
        ]
    }

    #[test]
    fn test_holes_flat() {
        let profiles = sample();
        assert_eq!(
            holes_flat(&profiles[0]),
            "TOP_Y10: 390@4.3,711.5@4.3 | SIDE_Y30: 20@5"
        );
        assert_eq!(holes_flat(&profiles[1]), "SIDE_Y30: 100@8");
    }

    #[test]
    fn test_face_columns() {
        let columns = face_columns(&sample());
        let headers: Vec<String> = columns.faces.iter().map(FaceColumns::header).collect();
        assert_eq!(headers, vec!["holes_side_y30", "holes_top_y10"]);
        assert_eq!(
            columns.rows,
            vec![
                vec!["20@5".to_string(), "390@4.3,711.5@4.3".to_string()],
                vec!["100@8".to_string(), String::new()],
            ]
        );
    }

    #[test]
    fn test_face_columns_follow_label_text() {
        let profiles = vec![record(
            "P1",
            vec![
                (FaceLabel::new(FaceGroup::Top, "Y10"), vec![hole(1.0, 5.0)]),
                (FaceLabel::new(FaceGroup::Other, "KOPS"), vec![hole(2.0, 5.0)]),
                (FaceLabel::new(FaceGroup::Side, ""), vec![hole(3.0, 5.0)]),
            ],
        )];
        let columns = face_columns(&profiles);
        let labels: Vec<String> = columns.faces.iter().map(|f| f.to_string()).collect();
        assert_eq!(labels, vec!["KOPS", "SIDE", "TOP_Y10"]);
    }

    #[test]
    fn test_flatten_profiles() {
        let rows = flatten_profiles(&sample());
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0].profile_name, "P1");
        assert_eq!(rows[0].face, "TOP_Y10");
        assert_eq!(rows[1].x_mm, 711.5);
        assert_eq!(rows[3].profile_name, "P2");
        assert_eq!(rows[3].d_mm, 8.0);
        assert_eq!(rows[3].qty, 2);
    }

    #[test]
    fn test_geometry_json_is_nested_by_face() {
        let json = geometry_json(&sample()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value[0]["name"], "P1");
        assert_eq!(value[0]["holes_by_face"]["TOP_Y10"][1]["offset_mm"], 711.5);
        assert_eq!(value[1]["holes_by_face"]["SIDE_Y30"][0]["diameter_mm"], 8.0);
    }
}
