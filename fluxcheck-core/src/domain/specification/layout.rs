// fluxcheck-core/src/domain/specification/layout.rs

//! Position-indexed access to the sheets of the cahier des charges.
//!
//! The document is read as a raw grid of cells: row 0 is the first row of the sheet,
//! column 0 its first column. Every "magic" offset the rule extraction depends on lives
//! in [`SheetLayout`], nowhere else.

/// A sheet as an ordered table of trimmed cells.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SheetGrid {
    rows: Vec<Vec<String>>,
}

impl SheetGrid {
    pub fn new(rows: Vec<Vec<String>>) -> Self {
        Self { rows }
    }

    /// Number of rows, blank ones included.
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Number of structural columns (widest row).
    pub fn width(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// Trimmed cell content, `None` when the cell is absent or blank.
    pub fn cell(&self, row: usize, col: usize) -> Option<&str> {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .map(|c| c.trim())
            .filter(|c| !c.is_empty())
    }
}

/// Fixed offsets of the standard cahier des charges layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SheetLayout {
    /// Sheets narrower than this are not flux specifications.
    pub min_columns: usize,
    pub field_name_col: usize,
    pub mandatory_col: usize,
    pub type_col: usize,
    pub length_col: usize,
    /// First row of the (field, mandatory flag) table.
    pub mandatory_first_row: usize,
    /// First row of the (field, type, length) table.
    pub rules_first_row: usize,
    /// First row of the sanctioned filename templates in the Notice sheet: the sheet's
    /// header line, then eleven lines of free text.
    pub notice_first_row: usize,
    pub notice_col: usize,
}

impl SheetLayout {
    pub const STANDARD: SheetLayout = SheetLayout {
        min_columns: 4,
        field_name_col: 2,
        mandatory_col: 3,
        type_col: 5,
        length_col: 6,
        mandatory_first_row: 3,
        rules_first_row: 4,
        notice_first_row: 12,
        notice_col: 1,
    };

    pub fn is_flux_sheet(&self, grid: &SheetGrid) -> bool {
        grid.width() >= self.min_columns
    }

    /// `(field_name, mandatory_flag)` pairs from the mandatory table, to the end of the sheet.
    /// Rows without a field name are ignored.
    pub fn mandatory_rows<'a>(
        &'a self,
        grid: &'a SheetGrid,
    ) -> impl Iterator<Item = (&'a str, Option<&'a str>)> + 'a {
        (self.mandatory_first_row..grid.height()).filter_map(move |row| {
            grid.cell(row, self.field_name_col)
                .map(|name| (name, grid.cell(row, self.mandatory_col)))
        })
    }

    /// `(field_name, declared_type, declared_length)` triples, stopping at the first blank
    /// field name. Trailing rows may hold free-form notes, hence the hard stop.
    pub fn rule_rows<'a>(
        &'a self,
        grid: &'a SheetGrid,
    ) -> impl Iterator<Item = (&'a str, Option<&'a str>, Option<&'a str>)> + 'a {
        (self.rules_first_row..grid.height())
            .map_while(move |row| {
                grid.cell(row, self.field_name_col).map(|name| {
                    (
                        name,
                        grid.cell(row, self.type_col),
                        grid.cell(row, self.length_col),
                    )
                })
            })
    }

    /// Non-blank Notice entries.
    pub fn notice_entries<'a>(&'a self, grid: &'a SheetGrid) -> impl Iterator<Item = &'a str> + 'a {
        (self.notice_first_row..grid.height()).filter_map(move |row| grid.cell(row, self.notice_col))
    }
}

impl Default for SheetLayout {
    fn default() -> Self {
        Self::STANDARD
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(rows: &[&[&str]]) -> SheetGrid {
        SheetGrid::new(
            rows.iter()
                .map(|r| r.iter().map(|c| c.to_string()).collect())
                .collect(),
        )
    }

    #[test]
    fn test_cell_trims_and_hides_blanks() {
        let g = grid(&[&["a", "  b  ", "   "]]);
        assert_eq!(g.cell(0, 1), Some("b"));
        assert_eq!(g.cell(0, 2), None);
        assert_eq!(g.cell(0, 9), None);
        assert_eq!(g.cell(4, 0), None);
    }

    #[test]
    fn test_width_uses_widest_row() {
        let g = grid(&[&["a"], &["a", "b", "c", "d"], &[]]);
        assert_eq!(g.width(), 4);
        assert_eq!(g.height(), 3);
        assert!(SheetLayout::STANDARD.is_flux_sheet(&g));
        assert!(!SheetLayout::STANDARD.is_flux_sheet(&grid(&[&["a", "b", "c"]])));
    }

    #[test]
    fn test_rule_rows_stop_at_first_blank_name() {
        let g = grid(&[
            &["", "", "", ""],
            &["", "", "", ""],
            &["", "", "", ""],
            &["N", "Bloc", "Champ", "Obligatoire", "", "Type", "Longueur"],
            &["1", "", "A", "Oui", "", "Numérique", "5"],
            &["2", "", "B", "Non", "", "Booléen", ""],
            &["", "", "", "", "", "", ""],
            &["", "", "NOTE", "Oui", "", "", ""],
        ]);
        let rules: Vec<_> = SheetLayout::STANDARD.rule_rows(&g).collect();
        assert_eq!(
            rules,
            vec![("A", Some("Numérique"), Some("5")), ("B", Some("Booléen"), None)]
        );

        // The mandatory table does not stop at blank rows.
        let mandatory: Vec<_> = SheetLayout::STANDARD.mandatory_rows(&g).collect();
        assert_eq!(mandatory.len(), 4);
        assert_eq!(mandatory[0], ("Champ", Some("Obligatoire")));
        assert_eq!(mandatory[3], ("NOTE", Some("Oui")));
    }

    #[test]
    fn test_notice_entries_start_after_header_and_preamble() {
        let mut rows: Vec<Vec<String>> = (0..11).map(|i| vec![String::new(), format!("intro {i}")]).collect();
        rows.push(vec![String::new(), "Nommage des fichiers".into()]);
        rows.push(vec![String::new(), "Client_N°Flux_HONORAIRES_FREQUENCE".into()]);
        rows.push(vec![String::new(), String::new()]);
        rows.push(vec![String::new(), "Client_N°Flux_MOD1_PRESTATIONSANTE_FREQUENCE".into()]);
        let g = SheetGrid::new(rows);

        let entries: Vec<&str> = SheetLayout::STANDARD.notice_entries(&g).collect();
        assert_eq!(
            entries,
            vec![
                "Client_N°Flux_HONORAIRES_FREQUENCE",
                "Client_N°Flux_MOD1_PRESTATIONSANTE_FREQUENCE"
            ]
        );
    }
}
