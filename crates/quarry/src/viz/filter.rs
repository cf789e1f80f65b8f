//! Row-wise null filtering across every selected column.

use tracing::debug;

use crate::dataset::{DataSubsetData, DataSubsetSpec};

/// Drop every row position at which any selected column is missing.
///
/// The same positions are removed from every column and from the spec's row
/// indices, so all series stay equal length and aligned.
pub fn drop_incomplete_rows(data: &DataSubsetData) -> DataSubsetData {
    let positions = data.row_count();
    let keep: Vec<usize> = (0..positions)
        .filter(|&pos| {
            data.numeric
                .values()
                .all(|values| matches!(values.get(pos), Some(Some(_))))
                && data
                    .categorical
                    .values()
                    .all(|values| matches!(values.get(pos), Some(Some(_))))
        })
        .collect();

    if keep.len() < positions {
        debug!(dropped = positions - keep.len(), kept = keep.len(), "dropped incomplete rows");
    }

    let spec = DataSubsetSpec {
        id: data.spec.id.clone(),
        column_names: data.spec.column_names.clone(),
        row_indices: keep.iter().map(|&pos| data.spec.row_indices[pos]).collect(),
    };

    DataSubsetData {
        spec,
        numeric: data
            .numeric
            .iter()
            .map(|(name, values)| (name.clone(), keep.iter().map(|&pos| values[pos]).collect()))
            .collect(),
        categorical: data
            .categorical
            .iter()
            .map(|(name, values)| {
                (
                    name.clone(),
                    keep.iter().map(|&pos| values[pos].clone()).collect(),
                )
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drops_rows_consistently() {
        let spec = DataSubsetSpec::new("s", ["col1", "col2"], vec![0, 1, 2]);
        let data = DataSubsetData::new(spec)
            .with_numeric("col1", vec![Some(1.0), None, Some(3.0)])
            .with_numeric("col2", vec![Some(4.0), Some(5.0), Some(6.0)]);

        let filtered = drop_incomplete_rows(&data);

        assert_eq!(filtered.spec.row_indices, vec![0, 2]);
        assert_eq!(filtered.numeric["col1"], vec![Some(1.0), Some(3.0)]);
        assert_eq!(filtered.numeric["col2"], vec![Some(4.0), Some(6.0)]);
    }

    #[test]
    fn test_categorical_gaps_drop_numeric_rows() {
        let spec = DataSubsetSpec::new("s", ["n", "c"], vec![5, 6, 7]);
        let data = DataSubsetData::new(spec)
            .with_numeric("n", vec![Some(1.0), Some(2.0), Some(3.0)])
            .with_categorical("c", vec![Some("a".into()), Some("b".into()), None]);

        let filtered = drop_incomplete_rows(&data);

        assert_eq!(filtered.spec.row_indices, vec![5, 6]);
        assert_eq!(filtered.numeric["n"], vec![Some(1.0), Some(2.0)]);
        assert_eq!(filtered.categorical["c"].len(), 2);
    }

    #[test]
    fn test_complete_data_is_unchanged() {
        let spec = DataSubsetSpec::new("s", ["n"], vec![0, 1]);
        let data = DataSubsetData::new(spec).with_numeric("n", vec![Some(1.0), Some(2.0)]);
        assert_eq!(drop_incomplete_rows(&data), data);
    }
}
