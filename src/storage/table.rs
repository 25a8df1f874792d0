// Table implementation
// A table keeps the header it was loaded with and its typed rows

use super::index::KeyIndex;
use super::Keyed;

/// An in-memory relation of typed rows
#[derive(Debug, Clone, PartialEq)]
pub struct Table<R> {
    /// The name of the table (the dataset it came from)
    pub name: String,
    /// Column names as they appeared in the source header
    pub columns: Vec<String>,
    rows: Vec<R>,
}

impl<R> Table<R> {
    /// Create a table from already materialized rows
    pub fn new(name: impl Into<String>, columns: Vec<String>, rows: Vec<R>) -> Self {
        Self {
            name: name.into(),
            columns,
            rows,
        }
    }

    pub fn rows(&self) -> &[R] {
        &self.rows
    }

    /// Mutable access to the rows; the row set itself cannot grow or shrink
    pub fn rows_mut(&mut self) -> &mut [R] {
        &mut self.rows
    }

    pub fn get(&self, row_id: usize) -> Option<&R> {
        self.rows.get(row_id)
    }

    /// Get the number of rows in the table
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c == name)
    }
}

impl<R: Keyed> Table<R> {
    /// Build the composite key index over this table
    pub fn key_index(&self) -> KeyIndex {
        KeyIndex::build(&self.rows)
    }
}
