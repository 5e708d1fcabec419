// fluxcheck-core/src/infrastructure/adapters/mod.rs

pub mod csv_table;
pub mod sheets;
#[cfg(feature = "excel")]
pub mod workbook;

use std::path::Path;

use crate::domain::ports::SpecificationSource;
use crate::infrastructure::error::InfrastructureError;

pub use csv_table::CsvTableReader;
pub use sheets::SheetDirectorySource;

pub const WORKBOOK_EXTENSIONS: [&str; 5] = ["xlsx", "xlsm", "xlsb", "xls", "ods"];

/// Picks the reader of the cahier des charges from the shape of its path.
pub fn specification_source_for(
    path: &Path,
    delimiter: u8,
) -> Result<Box<dyn SpecificationSource>, InfrastructureError> {
    if path.is_dir() {
        return Ok(Box::new(SheetDirectorySource::new(delimiter)));
    }

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    if WORKBOOK_EXTENSIONS.contains(&extension.as_str()) {
        #[cfg(feature = "excel")]
        return Ok(Box::new(workbook::WorkbookSource));

        #[cfg(not(feature = "excel"))]
        return Err(InfrastructureError::UnsupportedDocument(format!(
            "{} is a workbook but fluxcheck was built without the 'excel' feature",
            path.display()
        )));
    }

    Err(InfrastructureError::UnsupportedDocument(format!(
        "{} is neither a directory of sheets nor a workbook",
        path.display()
    )))
}
