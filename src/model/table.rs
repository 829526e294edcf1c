//! Table types.

use serde::{Deserialize, Serialize};

/// A table structure.
///
/// Cells are flattened to the grid: a horizontally merged cell appears once
/// per grid column it spans, and a vertically merged continuation repeats
/// the text of the cell it continues.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Table {
    /// Rows in the table
    pub rows: Vec<TableRow>,
}

impl Table {
    /// Create a new empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a table from rows of text values.
    pub fn from_rows<R, S>(rows: impl IntoIterator<Item = R>) -> Self
    where
        R: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            rows: rows.into_iter().map(TableRow::from_strings).collect(),
        }
    }

    /// Add a row to the table.
    pub fn add_row(&mut self, row: TableRow) {
        self.rows.push(row);
    }

    /// Get the number of rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Get the number of columns (based on first row).
    pub fn column_count(&self) -> usize {
        self.rows.first().map(|r| r.cells.len()).unwrap_or(0)
    }

    /// Check if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Get the header row (always the first row).
    pub fn header(&self) -> Option<&TableRow> {
        self.rows.first()
    }

    /// Get body rows (every row after the first).
    pub fn body(&self) -> &[TableRow] {
        self.rows.get(1..).unwrap_or(&[])
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

/// A table row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableRow {
    /// Cells in the row
    pub cells: Vec<TableCell>,
}

impl TableRow {
    /// Create a new row with cells.
    pub fn new(cells: Vec<TableCell>) -> Self {
        Self { cells }
    }

    /// Create a row from text values.
    pub fn from_strings<S: Into<String>>(values: impl IntoIterator<Item = S>) -> Self {
        Self::new(values.into_iter().map(TableCell::text).collect())
    }

    /// Get plain text representation.
    pub fn plain_text(&self) -> String {
        self.cells
            .iter()
            .map(|c| c.text.as_str())
            .collect::<Vec<_>>()
            .join("\t")
    }
}

/// A table cell.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableCell {
    /// Cell text; paragraphs are joined with `\n`
    pub text: String,
}

impl TableCell {
    /// Create a new cell with text content.
    pub fn text(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Create an empty cell.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Get the whitespace-trimmed text.
    pub fn trimmed_text(&self) -> &str {
        self.text.trim()
    }

    /// Check if the cell is empty.
    pub fn is_empty(&self) -> bool {
        self.trimmed_text().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_new() {
        let table = Table::new();
        assert!(table.is_empty());
        assert_eq!(table.row_count(), 0);
        assert_eq!(table.column_count(), 0);
        assert!(table.header().is_none());
        assert!(table.body().is_empty());
    }

    #[test]
    fn test_table_with_data() {
        let table = Table::from_rows([["Name", "Age"], ["Alice", "30"], ["Bob", "25"]]);

        assert_eq!(table.row_count(), 3);
        assert_eq!(table.column_count(), 2);
        assert_eq!(table.header().unwrap().cells[0].text, "Name");
        assert_eq!(table.body().len(), 2);
    }

    #[test]
    fn test_cell_text() {
        let cell = TableCell::text("  Hello \n");
        assert_eq!(cell.trimmed_text(), "Hello");
        assert!(!cell.is_empty());
        assert!(TableCell::empty().is_empty());
    }
}
