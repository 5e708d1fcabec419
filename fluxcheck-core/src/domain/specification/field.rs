// fluxcheck-core/src/domain/specification/field.rs

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::specification::tokens::{
    ALPHANUMERIC_LABELS, BOOLEAN_LABELS, DATE_LABELS, NUMERIC_LABELS, label_in,
};

/// Declared lengths of exactly this value get the date formatting allowance.
const DATE_LENGTH: usize = 8;
const DATE_LENGTH_ALLOWANCE: usize = 2;

/// Type vocabulary of the cahier des charges.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    Numeric,
    Alphanumeric,
    /// `YYYYMMDD` ("Date aaaammjj").
    Date8,
    Boolean,
    /// Declared label outside the vocabulary (or no label at all). Never checked.
    Unrecognized(String),
}

impl FieldType {
    pub fn from_label(label: Option<&str>) -> Self {
        match label {
            Some(l) if label_in(l, NUMERIC_LABELS) => Self::Numeric,
            Some(l) if label_in(l, ALPHANUMERIC_LABELS) => Self::Alphanumeric,
            Some(l) if label_in(l, DATE_LABELS) => Self::Date8,
            Some(l) if label_in(l, BOOLEAN_LABELS) => Self::Boolean,
            Some(l) => Self::Unrecognized(l.to_string()),
            None => Self::Unrecognized(String::new()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Numeric => "Numeric",
            Self::Alphanumeric => "Alphanumeric",
            Self::Date8 => "Date YYYYMMDD",
            Self::Boolean => "Boolean",
            Self::Unrecognized(label) => label,
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One `(field_name, declared_type, declared_max_length)` row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldRule {
    pub name: String,
    pub declared_type: FieldType,
    pub max_length: Option<usize>,
}

impl FieldRule {
    pub fn new(name: &str, type_label: Option<&str>, length_cell: Option<&str>) -> Self {
        Self {
            name: name.trim().to_string(),
            declared_type: FieldType::from_label(type_label),
            max_length: length_cell.and_then(parse_declared_length),
        }
    }

    /// Length actually enforced: a declared 8 allows 10 (two separator characters in
    /// formatted dates), every other length is used verbatim.
    pub fn effective_max_length(&self) -> Option<usize> {
        self.max_length.map(|n| {
            if n == DATE_LENGTH {
                n + DATE_LENGTH_ALLOWANCE
            } else {
                n
            }
        })
    }
}

/// Sheets exported from Excel carry lengths as "8", "8.0" or "8,0".
fn parse_declared_length(cell: &str) -> Option<usize> {
    let value: f64 = cell.trim().replace(',', ".").parse().ok()?;
    if value.is_finite() && value >= 0.0 && value.fract() == 0.0 {
        Some(value as usize)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_vocabulary() {
        assert_eq!(FieldType::from_label(Some("Numérique")), FieldType::Numeric);
        assert_eq!(FieldType::from_label(Some("NUMBER")), FieldType::Numeric);
        assert_eq!(
            FieldType::from_label(Some("Alpha Numérique")),
            FieldType::Alphanumeric
        );
        assert_eq!(FieldType::from_label(Some("Date aaaammjj")), FieldType::Date8);
        assert_eq!(FieldType::from_label(Some("Booléen")), FieldType::Boolean);
        assert_eq!(
            FieldType::from_label(Some("Montant")),
            FieldType::Unrecognized("Montant".into())
        );
        assert_eq!(FieldType::from_label(None), FieldType::Unrecognized(String::new()));
    }

    #[test]
    fn test_declared_length_parsing() {
        assert_eq!(FieldRule::new("A", None, Some("12")).max_length, Some(12));
        assert_eq!(FieldRule::new("A", None, Some("8.0")).max_length, Some(8));
        assert_eq!(FieldRule::new("A", None, Some("8,0")).max_length, Some(8));
        assert_eq!(FieldRule::new("A", None, Some("N/A")).max_length, None);
        assert_eq!(FieldRule::new("A", None, Some("2.5")).max_length, None);
        assert_eq!(FieldRule::new("A", None, None).max_length, None);
    }

    #[test]
    fn test_effective_length_irregularity() {
        assert_eq!(
            FieldRule::new("D", None, Some("8")).effective_max_length(),
            Some(10)
        );
        assert_eq!(
            FieldRule::new("D", None, Some("7")).effective_max_length(),
            Some(7)
        );
        assert_eq!(
            FieldRule::new("D", None, Some("10")).effective_max_length(),
            Some(10)
        );
        assert_eq!(FieldRule::new("D", None, None).effective_max_length(), None);
    }
}
