// fluxcheck-core/src/domain/validation/table.rs

/// In-memory content of one data file: trimmed headers, string cells.
/// Short rows are padded with empty cells, long rows truncated to the header width.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DataTable {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl DataTable {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        let headers: Vec<String> = headers.into_iter().map(|h| h.trim().to_string()).collect();
        let width = headers.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, String::new());
                row
            })
            .collect();
        Self { headers, rows }
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.headers.iter().any(|h| h == name)
    }

    /// Number of data rows (header excluded).
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Cells of a column, in row order. `None` if the header is absent.
    pub fn column<'a>(&'a self, name: &str) -> Option<impl Iterator<Item = &'a str> + 'a> {
        let idx = self.headers.iter().position(|h| h == name)?;
        Some(self.rows.iter().map(move |row| row[idx].as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn test_headers_are_trimmed() {
        let table = DataTable::new(strings(&[" A ", "B\t"]), vec![strings(&["1", "2"])]);
        assert_eq!(table.headers(), &["A".to_string(), "B".to_string()]);
        assert!(table.has_column("A"));
        assert!(!table.has_column(" A "));
    }

    #[test]
    fn test_ragged_rows_are_normalised() {
        let table = DataTable::new(
            strings(&["A", "B"]),
            vec![strings(&["1"]), strings(&["2", "x", "overflow"])],
        );
        let b: Vec<&str> = table.column("B").into_iter().flatten().collect();
        assert_eq!(b, vec!["", "x"]);
        assert_eq!(table.row_count(), 2);
        assert!(table.column("C").is_none());
    }
}
