//! Header uniqueness index.

use std::collections::HashMap;

use crate::dataset::Dataset;
use crate::error::{QuarryError, Result};

/// Normalized form used for header comparisons: trimmed and lowercased.
pub fn normalize_header(header: &str) -> String {
    header.trim().to_lowercase()
}

/// Maps normalized headers to the column that owns them.
#[derive(Debug, Clone, Default)]
pub struct HeaderIndex {
    owners: HashMap<String, usize>,
}

impl HeaderIndex {
    /// Build the index from the live dataset.
    ///
    /// Fails with [`QuarryError::CorruptHeaders`] if the dataset already holds
    /// a blank header or two headers that normalize to the same key.
    pub fn build(dataset: &Dataset) -> Result<Self> {
        let mut owners = HashMap::with_capacity(dataset.column_count());

        for (idx, column) in dataset.columns().iter().enumerate() {
            let key = normalize_header(&column.header);
            if key.is_empty() {
                return Err(QuarryError::CorruptHeaders(format!(
                    "column {} has a blank header",
                    idx
                )));
            }
            if let Some(previous) = owners.insert(key, idx) {
                return Err(QuarryError::CorruptHeaders(format!(
                    "columns {} and {} share the header '{}'",
                    previous,
                    idx,
                    column.header.trim()
                )));
            }
        }

        Ok(Self { owners })
    }

    /// The column currently holding `header`, if any.
    pub fn owner(&self, header: &str) -> Option<usize> {
        self.owners.get(&normalize_header(header)).copied()
    }

    pub fn len(&self) -> usize {
        self.owners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.owners.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{Column, ColumnType};

    fn dataset(headers: &[&str]) -> Dataset {
        let columns = headers
            .iter()
            .map(|h| Column::new(*h, ColumnType::Categorical))
            .collect();
        Dataset::new("t", columns, Vec::new()).unwrap()
    }

    #[test]
    fn test_owner_lookup_is_normalized() {
        let index = HeaderIndex::build(&dataset(&["Age", "Name"])).unwrap();
        assert_eq!(index.owner("  age "), Some(0));
        assert_eq!(index.owner("NAME"), Some(1));
        assert_eq!(index.owner("city"), None);
        assert_eq!(index.len(), 2);
    }

    #[test]
    fn test_duplicate_headers_are_corrupt() {
        let err = HeaderIndex::build(&dataset(&["Age", " age"])).unwrap_err();
        assert!(matches!(err, QuarryError::CorruptHeaders(_)));
    }

    #[test]
    fn test_blank_header_is_corrupt() {
        let err = HeaderIndex::build(&dataset(&["Age", "  "])).unwrap_err();
        assert!(matches!(err, QuarryError::CorruptHeaders(_)));
    }
}
