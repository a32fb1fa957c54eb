//! Face marker normalization
//!
//! Cut-lists mark each drilling row with free text such as `BOVENKANT Y10`
//! or `zijkant y30`. Normalization turns that text into a [`FaceLabel`] so that
//! rows describing the same face always merge.

use profiledrill_core::{FaceGroup, FaceLabel};

/// Leading tokens recognised per group, longest first within a group. The
/// flag marks short tokens that must end at a word boundary.
const FACE_TOKENS: &[(&str, FaceGroup, bool)] = &[
    ("BOVENKANT", FaceGroup::Top, false),
    ("TOP", FaceGroup::Top, true),
    ("ZIJKANT", FaceGroup::Side, false),
    ("SIDE", FaceGroup::Side, true),
];

/// Normalizes a raw face marker. Returns `None` for empty markers, which
/// belong to header or continuation rows and carry no holes.
pub fn normalize_face_marker(raw: &str) -> Option<FaceLabel> {
    let upper = raw.trim().to_uppercase();
    if upper.is_empty() || upper == "NAN" {
        return None;
    }

    for (token, group, bounded) in FACE_TOKENS {
        if let Some(rest) = upper
            .strip_prefix(token)
            .filter(|rest| !bounded || at_word_boundary(rest))
        {
            let suffix: String = rest.chars().filter(|c| !c.is_whitespace()).collect();
            return Some(FaceLabel::new(*group, suffix));
        }
    }

    let suffix = upper.split_whitespace().collect::<Vec<_>>().join("_");
    Some(FaceLabel::new(FaceGroup::Other, suffix))
}

/// True when a token ends here: end of text, whitespace, or the `Y` axis
/// marker followed by its position.
fn at_word_boundary(rest: &str) -> bool {
    let mut chars = rest.chars();
    match chars.next() {
        None => true,
        Some(c) if c.is_whitespace() => true,
        Some('Y') => match chars.next() {
            None => true,
            Some(c) => c.is_whitespace() || c.is_ascii_digit() || matches!(c, '.' | ',' | '-' | '+'),
        },
        Some(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_top_marker() {
        let label = normalize_face_marker("BOVENKANT Y10").unwrap();
        assert_eq!(label.group(), FaceGroup::Top);
        assert_eq!(label.raw_suffix(), "Y10");
        assert_eq!(label.row_offset_mm(), 10.0);
        assert_eq!(label.to_string(), "TOP_Y10");
    }

    #[test]
    fn test_side_marker_is_case_folded() {
        let label = normalize_face_marker("  zijkant  y 30 ").unwrap();
        assert_eq!(label.group(), FaceGroup::Side);
        assert_eq!(label.raw_suffix(), "Y30");
        assert_eq!(label.row_offset_mm(), 30.0);
    }

    #[test]
    fn test_english_markers() {
        assert_eq!(
            normalize_face_marker("Top Y5"),
            Some(FaceLabel::new(FaceGroup::Top, "Y5"))
        );
        assert_eq!(
            normalize_face_marker("side"),
            Some(FaceLabel::new(FaceGroup::Side, ""))
        );
    }

    #[test]
    fn test_other_marker_keeps_full_text() {
        let label = normalize_face_marker("kopse kant  Y5").unwrap();
        assert_eq!(label.group(), FaceGroup::Other);
        assert_eq!(label.raw_suffix(), "KOPSE_KANT_Y5");
        assert_eq!(label.row_offset_mm(), 5.0);
    }

    #[test]
    fn test_english_tokens_need_word_boundary() {
        assert_eq!(
            normalize_face_marker("TOPLAAG"),
            Some(FaceLabel::new(FaceGroup::Other, "TOPLAAG"))
        );
        assert_eq!(
            normalize_face_marker("sidewall y5"),
            Some(FaceLabel::new(FaceGroup::Other, "SIDEWALL_Y5"))
        );
        assert_eq!(
            normalize_face_marker("TOPY10"),
            Some(FaceLabel::new(FaceGroup::Top, "Y10"))
        );
        assert_eq!(
            normalize_face_marker("side y 30"),
            Some(FaceLabel::new(FaceGroup::Side, "Y30"))
        );
    }

    #[test]
    fn test_marker_without_position() {
        let label = normalize_face_marker("BOVENKANT").unwrap();
        assert_eq!(label.raw_suffix(), "");
        assert_eq!(label.row_offset_mm(), 0.0);
    }

    #[test]
    fn test_empty_marker() {
        assert!(normalize_face_marker("").is_none());
        assert!(normalize_face_marker("   ").is_none());
        assert!(normalize_face_marker("nan").is_none());
    }

    #[test]
    fn test_spacing_variants_merge() {
        assert_eq!(
            normalize_face_marker("BOVENKANT Y10"),
            normalize_face_marker("bovenkant   Y10")
        );
        assert_eq!(
            normalize_face_marker("BOVENKANT Y10"),
            normalize_face_marker("BOVENKANTY10")
        );
    }
}
