// fluxcheck-core/src/domain/specification/document.rs

use crate::domain::specification::layout::SheetGrid;

/// One named sheet of the cahier des charges.
#[derive(Debug, Clone, PartialEq)]
pub struct Sheet {
    pub name: String,
    pub grid: SheetGrid,
}

/// The cahier des charges as loaded by an adapter, sheets in document order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpecificationDocument {
    pub sheets: Vec<Sheet>,
}

impl SpecificationDocument {
    pub fn new(sheets: Vec<Sheet>) -> Self {
        Self { sheets }
    }

    /// Case-insensitive lookup, surrounding blanks ignored.
    pub fn sheet(&self, name: &str) -> Option<&Sheet> {
        let wanted = name.trim();
        self.sheets
            .iter()
            .find(|s| s.name.trim().eq_ignore_ascii_case(wanted))
    }

    pub fn sheet_names(&self) -> impl Iterator<Item = &str> {
        self.sheets.iter().map(|s| s.name.as_str())
    }
}
