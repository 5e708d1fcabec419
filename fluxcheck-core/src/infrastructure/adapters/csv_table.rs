// fluxcheck-core/src/infrastructure/adapters/csv_table.rs

use csv::ReaderBuilder;
use std::fs::File;
use std::path::Path;

use crate::domain::error::DomainError;
use crate::domain::ports::TableReader;
use crate::domain::validation::DataTable;
use crate::infrastructure::error::InfrastructureError;

/// Flux data file: first line is the header, fixed delimiter, UTF-8.
pub struct CsvTableReader {
    delimiter: u8,
}

impl CsvTableReader {
    pub fn new(delimiter: u8) -> Self {
        Self { delimiter }
    }

    fn read_table(&self, path: &Path) -> Result<DataTable, InfrastructureError> {
        let file = File::open(path)?;
        let mut reader = ReaderBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(true)
            .flexible(true)
            .from_reader(file);

        let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            rows.push(record.iter().map(str::to_string).collect());
        }
        Ok(DataTable::new(headers, rows))
    }
}

impl TableReader for CsvTableReader {
    fn read(&self, path: &Path) -> Result<DataTable, DomainError> {
        self.read_table(path)
            .map_err(|e| DomainError::UnreadableContent(e.to_string()))
    }
}
