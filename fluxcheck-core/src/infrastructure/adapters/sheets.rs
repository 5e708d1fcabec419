// fluxcheck-core/src/infrastructure/adapters/sheets.rs

use csv::{ByteRecord, ReaderBuilder};
use std::fs;
use std::path::Path;
use tracing::{debug, info};

use crate::domain::error::DomainError;
use crate::domain::ports::SpecificationSource;
use crate::domain::specification::{Sheet, SheetGrid, SpecificationDocument};
use crate::infrastructure::error::InfrastructureError;
use crate::infrastructure::fs::list_files;

pub const SHEET_EXTENSIONS: [&str; 3] = ["csv", "tsv", "txt"];

/// Cahier des charges exported as one delimited file per sheet (sheet name = file stem).
pub struct SheetDirectorySource {
    delimiter: u8,
}

impl SheetDirectorySource {
    pub fn new(delimiter: u8) -> Self {
        Self { delimiter }
    }

    fn load_dir(&self, dir: &Path) -> Result<SpecificationDocument, InfrastructureError> {
        let mut sheets = Vec::new();
        for path in list_files(dir)? {
            let is_sheet = path
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| SHEET_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()));
            let Some(name) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            if !is_sheet {
                debug!(path = ?path, "Not a sheet file, ignored");
                continue;
            }
            let grid = read_grid(&path, self.delimiter)?;
            debug!(sheet = name, rows = grid.height(), columns = grid.width(), "Sheet read");
            sheets.push(Sheet {
                name: name.to_string(),
                grid,
            });
        }
        info!(dir = ?dir, sheets = sheets.len(), "📄 Sheet directory loaded");
        Ok(SpecificationDocument::new(sheets))
    }
}

impl SpecificationSource for SheetDirectorySource {
    fn load(&self, path: &Path) -> Result<SpecificationDocument, DomainError> {
        if !path.is_dir() {
            return Err(DomainError::SpecificationUnreadable(format!(
                "{} is not a directory of sheet files",
                path.display()
            )));
        }
        self.load_dir(path)
            .map_err(|e| DomainError::SpecificationUnreadable(e.to_string()))
    }
}

/// Reads a sheet as a position-indexed grid. Every empty line is kept as an empty row
/// so that row offsets match the original sheet; a quoted cell spanning several lines
/// still counts as one row.
pub fn read_grid(path: &Path, delimiter: u8) -> Result<SheetGrid, InfrastructureError> {
    let content = fs::read(path)?;
    let mut rows: Vec<Vec<String>> = Vec::new();

    for line in logical_lines(&content) {
        if line.iter().all(u8::is_ascii_whitespace) {
            rows.push(Vec::new());
            continue;
        }
        let mut reader = ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(false)
            .flexible(true)
            .from_reader(line);
        let mut record = ByteRecord::new();
        if reader.read_byte_record(&mut record)? {
            rows.push(
                record
                    .iter()
                    .map(|field| String::from_utf8_lossy(field).into_owned())
                    .collect(),
            );
        } else {
            rows.push(Vec::new());
        }
    }
    Ok(SheetGrid::new(rows))
}

/// Splits on line breaks outside double quotes. `\r\n` endings are stripped; a final
/// line break does not open an extra line.
fn logical_lines(content: &[u8]) -> Vec<&[u8]> {
    let mut lines = Vec::new();
    let mut in_quotes = false;
    let mut start = 0;
    for (i, byte) in content.iter().enumerate() {
        match byte {
            b'"' => in_quotes = !in_quotes,
            b'\n' if !in_quotes => {
                lines.push(strip_cr(&content[start..i]));
                start = i + 1;
            }
            _ => {}
        }
    }
    if start < content.len() {
        lines.push(strip_cr(&content[start..]));
    }
    lines
}

fn strip_cr(line: &[u8]) -> &[u8] {
    line.strip_suffix(b"\r").unwrap_or(line)
}
