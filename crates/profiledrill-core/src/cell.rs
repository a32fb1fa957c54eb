//! Spreadsheet cell values
//!
//! Cut-list tables arrive with loosely typed cells: blanks, numbers and free
//! text share a column. Parsing code matches on [`CellValue`] instead of
//! probing the raw value.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single cell of an ingested cut-list table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(untagged)]
pub enum CellValue {
    /// Blank cell (JSON `null`)
    #[default]
    Empty,
    /// Numeric cell
    Number(f64),
    /// Text cell
    Text(String),
}

impl CellValue {
    /// True for blank cells, whitespace-only text, `NaN` numbers and the
    /// literal text `nan` that spreadsheet exports write for missing values.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Empty => true,
            Self::Number(n) => n.is_nan(),
            Self::Text(s) => {
                let trimmed = s.trim();
                trimmed.is_empty() || trimmed.eq_ignore_ascii_case("nan")
            }
        }
    }

    /// Cell rendered as trimmed text, `None` when empty.
    pub fn as_text(&self) -> Option<String> {
        if self.is_empty() {
            return None;
        }
        match self {
            Self::Empty => None,
            Self::Number(n) => Some(n.to_string()),
            Self::Text(s) => Some(s.trim().to_string()),
        }
    }

    /// Cell read as a finite number; numeric text is accepted.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Empty => None,
            Self::Number(n) => n.is_finite().then_some(*n),
            Self::Text(s) => s
                .trim()
                .replace(',', ".")
                .parse::<f64>()
                .ok()
                .filter(|n| n.is_finite()),
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => Ok(()),
            Self::Number(n) => write!(f, "{}", n),
            Self::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Self::Empty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_detection() {
        assert!(CellValue::Empty.is_empty());
        assert!(CellValue::from("   ").is_empty());
        assert!(CellValue::from("NaN").is_empty());
        assert!(CellValue::Number(f64::NAN).is_empty());
        assert!(!CellValue::from("BOVENKANT").is_empty());
        assert!(!CellValue::Number(0.0).is_empty());
    }

    #[test]
    fn test_as_text() {
        assert_eq!(CellValue::Number(47.0).as_text().as_deref(), Some("47"));
        assert_eq!(CellValue::Number(4.3).as_text().as_deref(), Some("4.3"));
        assert_eq!(CellValue::from("  20x40 ").as_text().as_deref(), Some("20x40"));
        assert_eq!(CellValue::Empty.as_text(), None);
    }

    #[test]
    fn test_as_f64() {
        assert_eq!(CellValue::Number(1200.0).as_f64(), Some(1200.0));
        assert_eq!(CellValue::from(" 1200,5 ").as_f64(), Some(1200.5));
        assert_eq!(CellValue::from("abc").as_f64(), None);
        assert_eq!(CellValue::Number(f64::INFINITY).as_f64(), None);
    }

    #[test]
    fn test_deserialize_mixed_row() {
        let row: Vec<CellValue> =
            serde_json::from_str(r#"[null, 3, "BOVENKANT Y10", "390@4.3"]"#).unwrap();
        assert_eq!(
            row,
            vec![
                CellValue::Empty,
                CellValue::Number(3.0),
                CellValue::from("BOVENKANT Y10"),
                CellValue::from("390@4.3"),
            ]
        );
    }
}
