//! Keeps cells consistent with their column's declared type.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::dataset::{ColumnType, Dataset};
use crate::error::{QuarryError, Result};
use crate::validation::ValidatorSet;

use super::headers::HeaderIndex;

/// A cell address reported by cleaning and missing-value scans.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellLocation {
    pub row_index: usize,
    pub column_header: String,
}

impl CellLocation {
    pub fn new(row_index: usize, column_header: impl Into<String>) -> Self {
        Self {
            row_index,
            column_header: column_header.into(),
        }
    }
}

/// Applies type validators to cells and enforces header uniqueness.
#[derive(Debug, Clone)]
pub struct DataCleaner {
    validators: Arc<ValidatorSet>,
}

impl DataCleaner {
    /// Create a cleaner over the given validator set.
    pub fn new(validators: Arc<ValidatorSet>) -> Self {
        Self { validators }
    }

    /// Clean a raw value for a column type.
    ///
    /// Blank input and values the type's validator rejects become missing;
    /// anything else is returned trimmed.
    pub fn clean_value(&self, column_type: ColumnType, raw: Option<&str>) -> Option<String> {
        let trimmed = raw?.trim();
        if trimmed.is_empty() || !self.validators.is_valid(column_type, trimmed) {
            return None;
        }
        Some(trimmed.to_string())
    }

    /// Clean a raw value against a column of `dataset`.
    ///
    /// Only an unknown column index is an error; invalid values are
    /// downgraded to missing.
    pub fn clean_value_for_column(
        &self,
        dataset: &Dataset,
        column: usize,
        raw: Option<&str>,
    ) -> Result<Option<String>> {
        let column_type = dataset
            .column(column)
            .map(|c| c.column_type)
            .ok_or_else(|| QuarryError::InvalidRequest(format!("column {} does not exist", column)))?;
        Ok(self.clean_value(column_type, raw))
    }

    /// Clean a single edited cell and write the result back.
    ///
    /// Returns the stored value, which is `None` when the edit was rejected
    /// by the column's validator.
    pub fn clean_edited_cell(
        &self,
        dataset: &mut Dataset,
        row: usize,
        column: usize,
        raw: Option<&str>,
    ) -> Result<Option<String>> {
        dataset.check_bounds(row, column)?;
        let cleaned = self.clean_value_for_column(dataset, column, raw)?;
        dataset.set_cell(row, column, cleaned.clone())?;

        debug!(row, column, missing = cleaned.is_none(), "cleaned edited cell");
        Ok(cleaned)
    }

    /// Clean every cell in place.
    ///
    /// Returns the cells that went from present to missing. Cells that were
    /// already missing are not reported.
    pub fn clean_entire_dataset(&self, dataset: &mut Dataset) -> Vec<CellLocation> {
        let mut changes = Vec::new();

        dataset.update_cells(|column, row_idx, cell| {
            let cleaned = self.clean_value(column.column_type, cell);
            if cell.is_some() && cleaned.is_none() {
                changes.push(CellLocation::new(row_idx, column.header.clone()));
            }
            cleaned
        });

        if changes.is_empty() {
            info!(dataset = %dataset.name, "cleaned entire dataset");
        } else {
            warn!(
                dataset = %dataset.name,
                downgraded = changes.len(),
                "cleaning cleared invalid cells"
            );
        }
        changes
    }

    /// Rename a column.
    ///
    /// Fails if the new header is blank or collides (trimmed,
    /// case-insensitive) with a different column. Renaming a column to its
    /// own name succeeds. The uniqueness index is rebuilt from the dataset on
    /// every call, so a dataset that already holds blank or duplicate headers
    /// is reported as [`QuarryError::CorruptHeaders`].
    pub fn edit_header(
        &self,
        dataset: &mut Dataset,
        column: usize,
        new_header: Option<&str>,
    ) -> Result<()> {
        let header = new_header
            .map(str::trim)
            .filter(|h| !h.is_empty())
            .ok_or(QuarryError::BlankHeader)?;

        if column >= dataset.column_count() {
            return Err(QuarryError::InvalidRequest(format!(
                "column {} does not exist",
                column
            )));
        }

        let index = HeaderIndex::build(dataset)?;
        if let Some(owner) = index.owner(header) {
            if owner != column {
                return Err(QuarryError::DuplicateHeader(header.to_string()));
            }
        }

        if let Some(col) = dataset.column_mut(column) {
            debug!(column, from = %col.header, to = header, "renamed column");
            col.header = header.to_string();
        }
        Ok(())
    }

    /// Every cell that is currently missing.
    pub fn find_missing_cells(&self, dataset: &Dataset) -> Vec<CellLocation> {
        let mut missing = Vec::new();
        for (row_idx, row) in dataset.rows().iter().enumerate() {
            for (col_idx, cell) in row.cells.iter().enumerate() {
                if cell.is_none() {
                    if let Some(column) = dataset.column(col_idx) {
                        missing.push(CellLocation::new(row_idx, column.header.clone()));
                    }
                }
            }
        }
        missing
    }
}

impl Default for DataCleaner {
    fn default() -> Self {
        Self::new(Arc::new(ValidatorSet::default()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{Column, DataRow};

    fn dataset() -> Dataset {
        Dataset::new(
            "people",
            vec![
                Column::new("Name", ColumnType::Categorical),
                Column::new("Age", ColumnType::Numeric),
                Column::new("Active", ColumnType::Boolean),
            ],
            vec![
                DataRow::from_strings(["Alice", " 30 ", "true"]),
                DataRow::from_strings(["Bob", "abc", "maybe"]),
                DataRow::from_strings(["", "41", "FALSE"]),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_clean_value_downgrades_invalid() {
        let cleaner = DataCleaner::default();
        assert_eq!(cleaner.clean_value(ColumnType::Numeric, Some("abc")), None);
        assert_eq!(cleaner.clean_value(ColumnType::Numeric, Some(" 4.5 ")), Some("4.5".into()));
        assert_eq!(cleaner.clean_value(ColumnType::Categorical, Some("   ")), None);
        assert_eq!(cleaner.clean_value(ColumnType::Date, None), None);
    }

    #[test]
    fn test_clean_value_for_unknown_column() {
        let cleaner = DataCleaner::default();
        let ds = dataset();
        assert!(cleaner.clean_value_for_column(&ds, 9, Some("1")).is_err());
    }

    #[test]
    fn test_clean_edited_cell_writes_back() {
        let cleaner = DataCleaner::default();
        let mut ds = dataset();

        let stored = cleaner.clean_edited_cell(&mut ds, 0, 1, Some("not a number")).unwrap();
        assert_eq!(stored, None);
        assert_eq!(ds.cell(0, 1), None);

        let stored = cleaner.clean_edited_cell(&mut ds, 0, 1, Some(" 31 ")).unwrap();
        assert_eq!(stored.as_deref(), Some("31"));
        assert_eq!(ds.cell(0, 1), Some("31"));
    }

    #[test]
    fn test_clean_entire_dataset_reports_only_downgrades() {
        let cleaner = DataCleaner::default();
        let mut ds = dataset();

        let changes = cleaner.clean_entire_dataset(&mut ds);

        assert_eq!(
            changes,
            vec![CellLocation::new(1, "Age"), CellLocation::new(1, "Active")]
        );
        assert_eq!(ds.cell(0, 1), Some("30"));
        assert_eq!(ds.cell(2, 0), None);
    }

    #[test]
    fn test_clean_entire_dataset_writes_every_cell() {
        let cleaner = DataCleaner::default();
        let mut ds = dataset();
        cleaner.clean_entire_dataset(&mut ds);

        let cells: Vec<Vec<Option<&str>>> = (0..ds.row_count())
            .map(|row| (0..ds.column_count()).map(|col| ds.cell(row, col)).collect())
            .collect();
        assert_eq!(
            cells,
            vec![
                vec![Some("Alice"), Some("30"), Some("true")],
                vec![Some("Bob"), None, None],
                vec![None, Some("41"), Some("FALSE")],
            ]
        );
    }

    #[test]
    fn test_clean_entire_dataset_is_idempotent() {
        let cleaner = DataCleaner::default();
        let mut ds = dataset();
        cleaner.clean_entire_dataset(&mut ds);
        assert!(cleaner.clean_entire_dataset(&mut ds).is_empty());
    }

    #[test]
    fn test_edit_header() {
        let cleaner = DataCleaner::default();
        let mut ds = dataset();

        assert!(cleaner.edit_header(&mut ds, 1, Some("  Years ")).is_ok());
        assert_eq!(ds.column(1).unwrap().header, "Years");

        let err = cleaner.edit_header(&mut ds, 1, Some("name")).unwrap_err();
        assert!(err.to_string().starts_with("Header already exists"));

        assert!(cleaner.edit_header(&mut ds, 0, Some(" NAME ")).is_ok());
        assert!(matches!(
            cleaner.edit_header(&mut ds, 0, Some("  ")),
            Err(QuarryError::BlankHeader)
        ));
        assert!(matches!(
            cleaner.edit_header(&mut ds, 0, None),
            Err(QuarryError::BlankHeader)
        ));
    }

    #[test]
    fn test_edit_header_detects_corruption() {
        let cleaner = DataCleaner::default();
        let mut ds = dataset();
        ds.column_mut(2).unwrap().header = "age".into();

        let err = cleaner.edit_header(&mut ds, 0, Some("Person")).unwrap_err();
        assert!(matches!(err, QuarryError::CorruptHeaders(_)));
    }

    #[test]
    fn test_find_missing_cells() {
        let cleaner = DataCleaner::default();
        let ds = dataset();
        assert_eq!(cleaner.find_missing_cells(&ds), vec![CellLocation::new(2, "Name")]);
    }
}
