// fluxcheck-core/src/domain/validation/mod.rs

pub mod content;
pub mod table;

pub use content::{ContentValidator, ContentVerdict, LengthViolation, TypeViolation};
pub use table::DataTable;
