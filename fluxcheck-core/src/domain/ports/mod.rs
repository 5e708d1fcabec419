// src/domain/ports/mod.rs

use std::path::Path;

use crate::domain::error::DomainError;
use crate::domain::specification::SpecificationDocument;
use crate::domain::validation::DataTable;

/// Loads the cahier des charges as raw sheets.
pub trait SpecificationSource: Send + Sync {
    fn load(&self, path: &Path) -> Result<SpecificationDocument, DomainError>;
}

/// Reads one delimited data file into memory.
pub trait TableReader: Send + Sync {
    fn read(&self, path: &Path) -> Result<DataTable, DomainError>;
}
