// fluxcheck-core/src/domain/specification/tokens.rs
//
// Every "whatever matches this token" rule of the cahier des charges, as explicit sets.
// Comparisons go through `fold` so each set is the single point of truth for membership.

/// Flag values marking a field as mandatory ("Obligatoire").
pub const AFFIRMATIVE_TOKENS: &[&str] = &["oui"];

/// Cell values that count as "no value" in numeric columns.
pub const NULL_LIKE_TOKENS: &[&str] = &["nan", "NaN", "None", "-", "NULL"];

/// Declared type labels, case-folded.
pub const NUMERIC_LABELS: &[&str] = &["numérique", "numerique", "numeric", "number"];
pub const ALPHANUMERIC_LABELS: &[&str] = &[
    "alphanumérique",
    "alpha numérique",
    "alphanumerique",
    "alpha numerique",
    "alphanumeric",
];
pub const DATE_LABELS: &[&str] = &["date aaaammjj", "date yyyymmdd"];
pub const BOOLEAN_LABELS: &[&str] = &["booléen", "booleen", "boolean"];

/// Trim + case fold.
pub fn fold(value: &str) -> String {
    value.trim().to_lowercase()
}

pub fn is_affirmative(flag: &str) -> bool {
    let folded = fold(flag);
    AFFIRMATIVE_TOKENS.contains(&folded.as_str())
}

/// Null-like tokens are matched exactly (after trimming): "null" is a value, "NULL" is not.
pub fn is_null_like(value: &str) -> bool {
    NULL_LIKE_TOKENS.contains(&value.trim())
}

pub fn label_in(label: &str, set: &[&str]) -> bool {
    let folded = fold(label);
    set.contains(&folded.as_str())
}
