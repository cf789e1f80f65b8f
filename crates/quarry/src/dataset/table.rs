//! The in-memory table: declared columns plus row-major cells.

use serde::{Deserialize, Serialize};

use crate::error::{QuarryError, Result};

use super::types::ColumnType;

/// A column's header and declared type.
///
/// Cell values live in the owning [`Dataset`]'s rows; use
/// [`Dataset::column_values`] to walk a column top to bottom.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    /// Column header. Unique across the dataset, compared trimmed and
    /// case-insensitively.
    pub header: String,
    /// Declared type used for cleaning and materialization.
    pub column_type: ColumnType,
}

impl Column {
    /// Create a new column.
    pub fn new(header: impl Into<String>, column_type: ColumnType) -> Self {
        Self {
            header: header.into(),
            column_type,
        }
    }
}

/// One row of cells. `None` is the missing marker.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DataRow {
    pub cells: Vec<Option<String>>,
}

impl DataRow {
    /// Create a row from optional cell values.
    pub fn new(cells: Vec<Option<String>>) -> Self {
        Self { cells }
    }

    /// Create a row from raw strings, treating blank strings as missing.
    pub fn from_strings<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let cells = values
            .into_iter()
            .map(|v| {
                let v = v.into();
                if v.trim().is_empty() { None } else { Some(v) }
            })
            .collect();
        Self { cells }
    }
}

/// A loaded table. Cells are addressed by `(row, column)` and the dataset is
/// the single owner of its storage.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    /// Display name, usually the source file name.
    pub name: String,
    columns: Vec<Column>,
    rows: Vec<DataRow>,
}

impl Dataset {
    /// Create a dataset, checking that every row has one cell per column.
    pub fn new(name: impl Into<String>, columns: Vec<Column>, rows: Vec<DataRow>) -> Result<Self> {
        let width = columns.len();
        if let Some((idx, row)) = rows.iter().enumerate().find(|(_, r)| r.cells.len() != width) {
            return Err(QuarryError::InvalidRequest(format!(
                "row {} has {} cells but the dataset has {} columns",
                idx,
                row.cells.len(),
                width
            )));
        }

        Ok(Self {
            name: name.into(),
            columns,
            rows,
        })
    }

    /// Get the number of columns.
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Get the number of rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn rows(&self) -> &[DataRow] {
        &self.rows
    }

    /// Rewrite every cell in place. `f` receives the column, the row index
    /// and the cell, and returns the new value.
    pub fn update_cells<F>(&mut self, mut f: F)
    where
        F: FnMut(&Column, usize, Option<&str>) -> Option<String>,
    {
        for (row_idx, row) in self.rows.iter_mut().enumerate() {
            for (column, cell) in self.columns.iter().zip(row.cells.iter_mut()) {
                *cell = f(column, row_idx, cell.as_deref());
            }
        }
    }

    /// Get a column by index.
    pub fn column(&self, index: usize) -> Option<&Column> {
        self.columns.get(index)
    }

    /// Mutable access to a column, for header and type edits.
    pub fn column_mut(&mut self, index: usize) -> Option<&mut Column> {
        self.columns.get_mut(index)
    }

    /// All headers in column order.
    pub fn headers(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.header.as_str()).collect()
    }

    /// Find a column by header: exact match first, then trimmed and
    /// case-insensitive.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns
            .iter()
            .position(|c| c.header == name)
            .or_else(|| {
                let wanted = name.trim().to_lowercase();
                self.columns
                    .iter()
                    .position(|c| c.header.trim().to_lowercase() == wanted)
            })
    }

    /// Get a specific cell value. `None` for missing cells and bad addresses.
    pub fn cell(&self, row: usize, col: usize) -> Option<&str> {
        self.rows
            .get(row)
            .and_then(|r| r.cells.get(col))
            .and_then(|c| c.as_deref())
    }

    /// Overwrite a cell.
    pub fn set_cell(&mut self, row: usize, col: usize, value: Option<String>) -> Result<()> {
        let slot = self
            .rows
            .get_mut(row)
            .and_then(|r| r.cells.get_mut(col))
            .ok_or(QuarryError::CellOutOfBounds { row, column: col })?;
        *slot = value;
        Ok(())
    }

    /// Get all values for a column by index, top to bottom.
    pub fn column_values(&self, index: usize) -> impl Iterator<Item = Option<&str>> {
        self.rows
            .iter()
            .map(move |row| row.cells.get(index).and_then(|c| c.as_deref()))
    }

    /// Check that an address falls inside the table.
    pub fn check_bounds(&self, row: usize, col: usize) -> Result<()> {
        if row < self.row_count() && col < self.column_count() {
            Ok(())
        } else {
            Err(QuarryError::CellOutOfBounds { row, column: col })
        }
    }
}
