//! Subset specifications and their materialized data.

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{QuarryError, Result};

use super::table::Dataset;

static ROW_TOKEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(\d+)\s*(?:-\s*(\d+)\s*)?$").expect("row token pattern is valid")
});

/// A named selection of columns and rows. Defines a view, not a copy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataSubsetSpec {
    /// Identifier of the selection (and of the dataset it was drawn from).
    pub id: String,
    /// Selected column names, unique, in selection order.
    pub column_names: Vec<String>,
    /// 0-based row indices into the owning dataset. May repeat.
    pub row_indices: Vec<usize>,
}

impl DataSubsetSpec {
    /// Create a spec. Duplicate column names keep their first occurrence.
    pub fn new(
        id: impl Into<String>,
        column_names: impl IntoIterator<Item = impl Into<String>>,
        row_indices: Vec<usize>,
    ) -> Self {
        let mut names: Vec<String> = Vec::new();
        for name in column_names {
            let name = name.into();
            if !names.contains(&name) {
                names.push(name);
            }
        }

        Self {
            id: id.into(),
            column_names: names,
            row_indices,
        }
    }

    /// Select every row of `dataset` for the given columns.
    pub fn all_rows(
        id: impl Into<String>,
        dataset: &Dataset,
        column_names: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self::new(id, column_names, (0..dataset.row_count()).collect())
    }

    /// The same rows, restricted to a single column.
    pub fn narrowed_to(&self, column: &str) -> Self {
        Self {
            id: self.id.clone(),
            column_names: vec![column.to_string()],
            row_indices: self.row_indices.clone(),
        }
    }

    /// Number of selected row positions.
    pub fn row_count(&self) -> usize {
        self.row_indices.len()
    }
}

/// Materialized values for a [`DataSubsetSpec`].
///
/// Every sequence has one entry per row position of the spec; position `i`
/// corresponds to `spec.row_indices[i]`. Missing or invalid cells are `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataSubsetData {
    pub spec: DataSubsetSpec,
    /// Numeric columns, in selection order.
    pub numeric: IndexMap<String, Vec<Option<f64>>>,
    /// Non-numeric columns, in selection order.
    pub categorical: IndexMap<String, Vec<Option<String>>>,
}

impl DataSubsetData {
    /// Create an empty view for `spec`.
    pub fn new(spec: DataSubsetSpec) -> Self {
        Self {
            spec,
            numeric: IndexMap::new(),
            categorical: IndexMap::new(),
        }
    }

    /// Add a numeric column.
    pub fn with_numeric(mut self, name: impl Into<String>, values: Vec<Option<f64>>) -> Self {
        self.numeric.insert(name.into(), values);
        self
    }

    /// Add a categorical column.
    pub fn with_categorical(
        mut self,
        name: impl Into<String>,
        values: Vec<Option<String>>,
    ) -> Self {
        self.categorical.insert(name.into(), values);
        self
    }

    /// Values of a numeric column.
    pub fn numeric_column(&self, name: &str) -> Option<&[Option<f64>]> {
        self.numeric.get(name).map(Vec::as_slice)
    }

    /// Numeric column names in first-seen order.
    pub fn numeric_names(&self) -> Vec<&str> {
        self.numeric.keys().map(String::as_str).collect()
    }

    /// Returns true if at least one numeric column was materialized.
    pub fn has_numeric(&self) -> bool {
        !self.numeric.is_empty()
    }

    /// Number of row positions in the view.
    pub fn row_count(&self) -> usize {
        self.spec.row_count()
    }
}

/// Parse a row selection such as `0-4,7,9-10` against a table of `row_count`
/// rows. `all`, `*` and an empty expression select every row.
pub fn parse_row_selection(expr: &str, row_count: usize) -> Result<Vec<usize>> {
    let trimmed = expr.trim();
    if trimmed.is_empty() || trimmed == "*" || trimmed.eq_ignore_ascii_case("all") {
        return Ok((0..row_count).collect());
    }

    let mut rows = Vec::new();
    for token in trimmed.split(',') {
        let caps = ROW_TOKEN.captures(token).ok_or_else(|| {
            QuarryError::InvalidRequest(format!("invalid row selection '{}'", token.trim()))
        })?;

        let start = parse_index(&caps[1])?;
        let end = match caps.get(2) {
            Some(m) => parse_index(m.as_str())?,
            None => start,
        };

        if start > end {
            return Err(QuarryError::InvalidRequest(format!(
                "row range {}-{} is reversed",
                start, end
            )));
        }
        if end >= row_count {
            return Err(QuarryError::InvalidRequest(format!(
                "row {} is beyond the last row ({} rows loaded)",
                end, row_count
            )));
        }

        rows.extend(start..=end);
    }

    Ok(rows)
}

fn parse_index(text: &str) -> Result<usize> {
    text.parse::<usize>()
        .map_err(|_| QuarryError::InvalidRequest(format!("row index '{}' is too large", text)))
}
