//! The single-slot current table and subset materialization.

use std::sync::Arc;

use tracing::debug;

use crate::dataset::{DataSubsetData, DataSubsetSpec, Dataset};
use crate::error::{QuarryError, Result};
use crate::validation::{ValidatorSet, parse_number};

/// Loads materialized subset data.
pub trait SubsetSource {
    /// Materialize `spec`.
    ///
    /// Returns [`QuarryError::NoDatasetLoaded`] when nothing is loaded.
    fn load_subset(&self, spec: &DataSubsetSpec) -> Result<DataSubsetData>;

    /// Like [`load_subset`](Self::load_subset), but any failure other than
    /// the unloaded signal comes back as [`QuarryError::SubsetLoad`].
    fn load_for_request(&self, spec: &DataSubsetSpec) -> Result<DataSubsetData> {
        self.load_subset(spec).map_err(|e| match e {
            QuarryError::NoDatasetLoaded => QuarryError::NoDatasetLoaded,
            other => QuarryError::SubsetLoad(other.to_string()),
        })
    }
}

/// Holds the one live dataset. Last write wins.
pub trait TableStore {
    fn save(&mut self, dataset: Dataset);
    fn load(&self) -> Option<&Dataset>;
    fn load_mut(&mut self) -> Option<&mut Dataset>;
    /// Remove and return the current dataset.
    fn clear(&mut self) -> Option<Dataset>;
}

/// In-memory [`TableStore`] that also serves subsets of its dataset.
#[derive(Debug, Default)]
pub struct CurrentTable {
    slot: Option<Dataset>,
    validators: Arc<ValidatorSet>,
}

impl CurrentTable {
    /// Create an empty store.
    pub fn new(validators: Arc<ValidatorSet>) -> Self {
        Self {
            slot: None,
            validators,
        }
    }

    fn materialize(&self, dataset: &Dataset, spec: &DataSubsetSpec) -> Result<DataSubsetData> {
        if let Some(&row) = spec.row_indices.iter().find(|&&r| r >= dataset.row_count()) {
            return Err(QuarryError::InvalidRequest(format!(
                "row {} is beyond the last row ({} rows loaded)",
                row,
                dataset.row_count()
            )));
        }

        let mut data = DataSubsetData::new(spec.clone());

        for name in &spec.column_names {
            let col = dataset
                .column_index(name)
                .ok_or_else(|| QuarryError::UnknownColumn(name.clone()))?;
            let Some(column) = dataset.column(col) else {
                continue;
            };

            let cells = spec
                .row_indices
                .iter()
                .map(|&row| dataset.cell(row, col).map(str::trim).filter(|v| !v.is_empty()));

            if column.column_type.is_numeric() {
                let validator = self.validators.for_type(column.column_type);
                let values = cells
                    .map(|v| v.filter(|v| validator.is_valid(v)).and_then(parse_number))
                    .collect();
                data.numeric.insert(name.clone(), values);
            } else {
                let values = cells.map(|v| v.map(str::to_string)).collect();
                data.categorical.insert(name.clone(), values);
            }
        }

        debug!(
            subset = %spec.id,
            numeric = data.numeric.len(),
            categorical = data.categorical.len(),
            rows = spec.row_count(),
            "materialized subset"
        );
        Ok(data)
    }
}

impl TableStore for CurrentTable {
    fn save(&mut self, dataset: Dataset) {
        self.slot = Some(dataset);
    }

    fn load(&self) -> Option<&Dataset> {
        self.slot.as_ref()
    }

    fn load_mut(&mut self) -> Option<&mut Dataset> {
        self.slot.as_mut()
    }

    fn clear(&mut self) -> Option<Dataset> {
        self.slot.take()
    }
}

impl SubsetSource for CurrentTable {
    fn load_subset(&self, spec: &DataSubsetSpec) -> Result<DataSubsetData> {
        let dataset = self.slot.as_ref().ok_or(QuarryError::NoDatasetLoaded)?;
        self.materialize(dataset, spec)
    }
}
