//! Hole token parsing
//!
//! Hole cells carry `offset@diameter` tokens such as `390@4.3` or
//! `711.5 @ 4.3`. Anything else is simply not a hole.

use profiledrill_core::{CellValue, HoleSpec};
use regex::Regex;
use std::sync::OnceLock;
use tracing::debug;

fn hole_regex() -> &'static Regex {
    static HOLE_REGEX: OnceLock<Regex> = OnceLock::new();
    HOLE_REGEX.get_or_init(|| {
        Regex::new(r"^\s*(\d+(?:\.\d+)?)\s*@\s*(\d+(?:\.\d+)?)").expect("invalid hole token regex")
    })
}

/// Parses one cell as a hole token.
///
/// Returns `None` for blanks, numbers, non-matching text and tokens whose
/// values are not a valid [`HoleSpec`] (e.g. a zero diameter).
pub fn parse_hole_token(cell: &CellValue) -> Option<HoleSpec> {
    let CellValue::Text(text) = cell else {
        return None;
    };
    if !text.contains('@') {
        return None;
    }

    let caps = hole_regex().captures(text)?;
    let offset = caps.get(1)?.as_str().parse::<f64>().ok()?;
    let diameter = caps.get(2)?.as_str().parse::<f64>().ok()?;

    match HoleSpec::new(offset, diameter) {
        Ok(hole) => Some(hole),
        Err(e) => {
            debug!("Ignoring hole token {:?}: {}", text, e);
            None
        }
    }
}

/// Parses every cell of a row slice, keeping column order.
pub fn parse_hole_cells<'a>(cells: impl IntoIterator<Item = &'a CellValue>) -> Vec<HoleSpec> {
    cells.into_iter().filter_map(parse_hole_token).collect()
}

/// Formats a hole back into token form (`offset@diameter`).
pub fn format_hole_token(hole: &HoleSpec) -> String {
    hole.to_string()
}
