//! Table types.

use serde::{Deserialize, Serialize};

/// A table recovered from a pipe-delimited markdown block.
///
/// Every row holds exactly [`Table::column_count`] cells; rows that were
/// shorter in the source are right-padded with empty strings when the
/// table is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    /// Rows in the table
    pub rows: Vec<TableRow>,

    /// Number of cells appended as padding across all rows
    #[serde(default)]
    pub padded_cells: usize,
}

impl Table {
    /// Create a new empty table.
    pub fn new() -> Self {
        Self {
            rows: Vec::new(),
            padded_cells: 0,
        }
    }

    /// Build a table from raw rows, padding ragged rows to the widest one.
    pub fn from_rows(rows: Vec<Vec<String>>) -> Self {
        let width = rows.iter().map(Vec::len).max().unwrap_or(0);
        let mut padded_cells = 0;

        let rows = rows
            .into_iter()
            .map(|mut cells| {
                padded_cells += width - cells.len();
                cells.resize(width, String::new());
                TableRow::new(cells)
            })
            .collect();

        Self { rows, padded_cells }
    }

    /// Get the number of rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Get the number of columns.
    pub fn column_count(&self) -> usize {
        self.rows.iter().map(|r| r.cells.len()).max().unwrap_or(0)
    }

    /// Check if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Cell text at `(row, col)`; positions outside the grid read as empty.
    pub fn cell(&self, row: usize, col: usize) -> &str {
        self.rows
            .get(row)
            .and_then(|r| r.cells.get(col))
            .map(String::as_str)
            .unwrap_or("")
    }

    /// Rows as plain string vectors.
    pub fn to_vecs(&self) -> Vec<Vec<String>> {
        self.rows.iter().map(|r| r.cells.clone()).collect()
    }

    /// Get plain text representation of the table.
    pub fn plain_text(&self) -> String {
        self.rows
            .iter()
            .map(|row| row.plain_text())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Default for Table {
    fn default() -> Self {
        Self::new()
    }
}

/// A table row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableRow {
    /// Cell texts, trimmed
    pub cells: Vec<String>,
}

impl TableRow {
    /// Create a new row with cells.
    pub fn new(cells: Vec<String>) -> Self {
        Self { cells }
    }

    /// Create a row from text values.
    pub fn from_strings<S: Into<String>>(values: impl IntoIterator<Item = S>) -> Self {
        Self::new(values.into_iter().map(Into::into).collect())
    }

    /// Get plain text representation.
    pub fn plain_text(&self) -> String {
        self.cells.join("\t")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn test_table_new() {
        let table = Table::new();
        assert!(table.is_empty());
        assert_eq!(table.row_count(), 0);
        assert_eq!(table.column_count(), 0);
    }

    #[test]
    fn test_from_rows_pads_ragged_rows() {
        let table = Table::from_rows(vec![row(&["a", "b", "c"]), row(&["d", "e"])]);

        assert_eq!(table.column_count(), 3);
        assert!(table.rows.iter().all(|r| r.cells.len() == 3));
        assert_eq!(table.cell(1, 2), "");
        assert_eq!(table.padded_cells, 1);
    }

    #[test]
    fn test_cell_out_of_range_is_empty() {
        let table = Table::from_rows(vec![row(&["x"])]);
        assert_eq!(table.cell(0, 0), "x");
        assert_eq!(table.cell(5, 5), "");
    }

    #[test]
    fn test_plain_text() {
        let mut table = Table::new();
        table.rows.push(TableRow::from_strings(["Name", "Age"]));
        table.rows.push(TableRow::from_strings(["Alice", "30"]));

        assert_eq!(table.plain_text(), "Name\tAge\nAlice\t30");
    }
}
