// fluxcheck-core/src/infrastructure/adapters/workbook.rs
//
// Excel / ODS cahier des charges, behind the `excel` feature.

use calamine::{Data, Range, Reader, open_workbook_auto};
use std::path::Path;
use tracing::{debug, info};

use crate::domain::error::DomainError;
use crate::domain::ports::SpecificationSource;
use crate::domain::specification::{Sheet, SheetGrid, SpecificationDocument};
use crate::infrastructure::error::InfrastructureError;

pub struct WorkbookSource;

impl WorkbookSource {
    fn load_workbook(&self, path: &Path) -> Result<SpecificationDocument, InfrastructureError> {
        let mut workbook = open_workbook_auto(path)?;
        let mut sheets = Vec::new();
        for name in workbook.sheet_names() {
            let range = workbook.worksheet_range(&name)?;
            let grid = grid_from_range(&range);
            debug!(sheet = %name, rows = grid.height(), columns = grid.width(), "Worksheet read");
            sheets.push(Sheet { name, grid });
        }
        info!(path = ?path, sheets = sheets.len(), "📄 Workbook loaded");
        Ok(SpecificationDocument::new(sheets))
    }
}

impl SpecificationSource for WorkbookSource {
    fn load(&self, path: &Path) -> Result<SpecificationDocument, DomainError> {
        self.load_workbook(path)
            .map_err(|e| DomainError::SpecificationUnreadable(e.to_string()))
    }
}

/// calamine ranges start at the first used cell; pad so row/column 0 is A1.
fn grid_from_range(range: &Range<Data>) -> SheetGrid {
    let (first_row, first_col) = range.start().unwrap_or((0, 0));
    let mut rows: Vec<Vec<String>> = (0..first_row).map(|_| Vec::new()).collect();
    for row in range.rows() {
        let mut cells: Vec<String> = (0..first_col).map(|_| String::new()).collect();
        cells.extend(row.iter().map(cell_text));
        rows.push(cells);
    }
    SheetGrid::new(rows)
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        other => other.to_string(),
    }
}
