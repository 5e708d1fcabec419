// fluxcheck-core/src/domain/validation/content.rs

use chrono::NaiveDate;
use regex::Regex;
use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;
use std::sync::OnceLock;
use tracing::{debug, info};

use crate::domain::specification::field::{FieldRule, FieldType};
use crate::domain::specification::store::FluxSpecification;
use crate::domain::specification::tokens::is_null_like;
use crate::domain::validation::table::DataTable;

/// Offending values shown per violation, the rest is counted.
const SHOWN_VALUES: usize = 5;

fn re_alphanumeric() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^[\p{L}\p{N} ,%]*$").unwrap_or_else(|_| {
            // Hardcoded pattern: cannot fail.
            Regex::new("$^").unwrap_or_else(|_| unreachable!())
        })
    })
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LengthViolation {
    pub field: String,
    pub max_allowed: usize,
    pub found: usize,
}

impl fmt::Display for LengthViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (max {}, found {})",
            self.field, self.max_allowed, self.found
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeViolation {
    pub field: String,
    pub expected: FieldType,
    /// Distinct offending values, sorted.
    pub values: Vec<String>,
}

impl fmt::Display for TypeViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let shown: Vec<String> = self
            .values
            .iter()
            .take(SHOWN_VALUES)
            .map(|v| format!("'{v}'"))
            .collect();
        write!(
            f,
            "{} expected {}, invalid values [{}]",
            self.field,
            self.expected,
            shown.join(", ")
        )?;
        if self.values.len() > SHOWN_VALUES {
            write!(f, " (+{} more)", self.values.len() - SHOWN_VALUES)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentVerdict {
    /// Exactly one data row: accepted without checks.
    SingleRow,
    Valid,
    /// Terminal: length and type were not checked.
    MissingFields(Vec<String>),
    Violations {
        length: Vec<LengthViolation>,
        types: Vec<TypeViolation>,
    },
}

impl ContentVerdict {
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::SingleRow | Self::Valid)
    }
}

/// Structural checks of a data table against the rules of its flux.
#[derive(Debug, Default, Clone, Copy)]
pub struct ContentValidator;

impl ContentValidator {
    pub fn new() -> Self {
        Self
    }

    pub fn validate(&self, table: &DataTable, spec: &FluxSpecification) -> ContentVerdict {
        if table.row_count() == 1 {
            info!(flux = %spec.canonical_name, "Single data row, content checks skipped");
            return ContentVerdict::SingleRow;
        }

        let missing: Vec<String> = spec
            .mandatory_fields
            .iter()
            .filter(|field| !table.has_column(field))
            .cloned()
            .collect();
        if !missing.is_empty() {
            return ContentVerdict::MissingFields(missing);
        }

        let mut length = Vec::new();
        let mut types = Vec::new();
        for rule in &spec.field_rules {
            if !table.has_column(&rule.name) {
                continue;
            }
            if let Some(v) = check_length(table, rule) {
                length.push(v);
            }
            if let Some(v) = check_type(table, rule) {
                types.push(v);
            }
        }

        if length.is_empty() && types.is_empty() {
            ContentVerdict::Valid
        } else {
            ContentVerdict::Violations { length, types }
        }
    }
}

fn check_length(table: &DataTable, rule: &FieldRule) -> Option<LengthViolation> {
    let max_allowed = rule.effective_max_length()?;
    let found = table
        .column(&rule.name)?
        .map(|v| v.chars().count())
        .max()
        .unwrap_or(0);
    (found > max_allowed).then(|| LengthViolation {
        field: rule.name.clone(),
        max_allowed,
        found,
    })
}

fn check_type(table: &DataTable, rule: &FieldRule) -> Option<TypeViolation> {
    let accepts: fn(&str) -> bool = match &rule.declared_type {
        FieldType::Numeric => is_numeric_value,
        FieldType::Alphanumeric => is_alphanumeric_value,
        FieldType::Date8 => is_date8_value,
        FieldType::Boolean => is_boolean_value,
        FieldType::Unrecognized(label) => {
            debug!(field = %rule.name, label = %label, "Declared type not checked");
            return None;
        }
    };
    // Numeric blanks normalise to 0, the other types ignore empty cells.
    let skip_empty = rule.declared_type != FieldType::Numeric;

    let offending: BTreeSet<String> = table
        .column(&rule.name)?
        .filter(|v| !(skip_empty && v.trim().is_empty()))
        .filter(|v| !accepts(v))
        .map(str::to_string)
        .collect();

    (!offending.is_empty()).then(|| TypeViolation {
        field: rule.name.clone(),
        expected: rule.declared_type.clone(),
        values: offending.into_iter().collect(),
    })
}

/// Null-like tokens and blanks count as 0, decimal comma accepted.
pub fn normalize_numeric(value: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() || is_null_like(trimmed) {
        "0".to_string()
    } else {
        trimmed.replace(',', ".")
    }
}

fn is_numeric_value(value: &str) -> bool {
    normalize_numeric(value).parse::<f64>().is_ok()
}

fn is_alphanumeric_value(value: &str) -> bool {
    re_alphanumeric().is_match(value)
}

fn is_date8_value(value: &str) -> bool {
    value.len() == 8
        && value.bytes().all(|b| b.is_ascii_digit())
        && NaiveDate::parse_from_str(value, "%Y%m%d").is_ok()
}

fn is_boolean_value(value: &str) -> bool {
    value == "0" || value == "1"
}
