//! Property-based tests for Quarry's statistics and cleaning.
//!
//! # Running Property Tests
//!
//! ```bash
//! cargo test -p quarry --test property_tests
//!
//! # More cases (slower but more thorough)
//! PROPTEST_CASES=10000 cargo test -p quarry --test property_tests
//! ```

use std::sync::Arc;

use proptest::prelude::*;

use quarry::stats::calculator::{
    correlation_matrix, count_missing, count_non_missing, detect_outliers, mean, median,
    pearson_correlation, standard_deviation, z_score,
};
use quarry::viz::drop_incomplete_rows;
use quarry::{ColumnType, DataCleaner, DataSubsetData, DataSubsetSpec, ValidatorSet};

// =============================================================================
// Test Strategies
// =============================================================================

/// Finite values in a range that keeps sums well away from overflow.
fn value() -> impl Strategy<Value = f64> {
    -1.0e6..1.0e6f64
}

/// Finite values anywhere in the f64 range, weighted toward the extremes.
fn extreme_value() -> impl Strategy<Value = f64> {
    prop_oneof![
        Just(f64::MAX),
        Just(-f64::MAX),
        Just(1e308),
        Just(-1e308),
        -1.0e308..1.0e308f64,
        value(),
    ]
}

/// Sequences with roughly a quarter of the values missing.
fn sparse_values() -> impl Strategy<Value = Vec<Option<f64>>> {
    prop::collection::vec(prop::option::weighted(0.75, value()), 0..60)
}

/// Two equal-length sparse sequences.
fn paired_values() -> impl Strategy<Value = (Vec<Option<f64>>, Vec<Option<f64>>)> {
    (0usize..40).prop_flat_map(|n| {
        (
            prop::collection::vec(prop::option::weighted(0.8, value()), n),
            prop::collection::vec(prop::option::weighted(0.8, value()), n),
        )
    })
}

fn present(values: &[Option<f64>]) -> Vec<f64> {
    values.iter().flatten().copied().collect()
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-9 * (1.0 + a.abs().max(b.abs()))
}

// =============================================================================
// Calculator Properties
// =============================================================================

proptest! {
    #[test]
    fn counts_partition_the_sequence(values in sparse_values()) {
        prop_assert_eq!(count_missing(&values) + count_non_missing(&values), values.len());
    }

    #[test]
    fn stddev_matches_closed_form(values in sparse_values()) {
        let xs = present(&values);
        let m = mean(&values);
        let sd = standard_deviation(&values, m);

        if xs.len() < 2 {
            prop_assert_eq!(sd, 0.0);
        } else {
            let expected = (xs.iter().map(|x| (x - m).powi(2)).sum::<f64>()
                / (xs.len() - 1) as f64)
                .sqrt();
            prop_assert!(close(sd, expected), "sd {} vs {}", sd, expected);
        }
    }

    #[test]
    fn median_ignores_missing(values in sparse_values()) {
        let dense: Vec<Option<f64>> = present(&values).into_iter().map(Some).collect();
        prop_assert_eq!(median(&values), median(&dense));
    }

    #[test]
    fn median_is_within_range(values in sparse_values()) {
        let xs = present(&values);
        prop_assume!(!xs.is_empty());
        let lo = xs.iter().copied().fold(f64::INFINITY, f64::min);
        let hi = xs.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let med = median(&values);
        prop_assert!(med >= lo && med <= hi);
    }

    #[test]
    fn zero_stddev_means_zero_z(v in value(), m in value()) {
        prop_assert_eq!(z_score(v, m, 0.0), 0.0);
    }

    #[test]
    fn pearson_is_symmetric_and_bounded((x, y) in paired_values()) {
        let xy = pearson_correlation(&x, &y);
        let yx = pearson_correlation(&y, &x);
        prop_assert_eq!(xy, yx);
        prop_assert!(xy.is_finite());
        prop_assert!((-1.0 - 1e-9..=1.0 + 1e-9).contains(&xy));
    }

    #[test]
    fn pearson_uses_pairwise_deletion((x, y) in paired_values()) {
        let (px, py): (Vec<Option<f64>>, Vec<Option<f64>>) = x
            .iter()
            .zip(&y)
            .filter(|(a, b)| a.is_some() && b.is_some())
            .map(|(a, b)| (*a, *b))
            .unzip();
        prop_assert!(close(pearson_correlation(&x, &y), pearson_correlation(&px, &py)));
    }

    #[test]
    fn correlation_matrix_is_symmetric_with_unit_diagonal(
        columns in (2usize..5, 3usize..20).prop_flat_map(|(k, n)| {
            prop::collection::vec(prop::collection::vec(prop::option::of(value()), n), k)
        })
    ) {
        let slices: Vec<&[Option<f64>]> = columns.iter().map(Vec::as_slice).collect();
        let matrix = correlation_matrix(&slices);

        prop_assert_eq!(matrix.len(), columns.len());
        for i in 0..matrix.len() {
            prop_assert_eq!(matrix[i][i], 1.0);
            for j in 0..matrix.len() {
                prop_assert_eq!(matrix[i][j], matrix[j][i]);
            }
        }
    }

    #[test]
    fn outliers_exceed_threshold_strictly(values in sparse_values(), threshold in 0.5..4.0f64) {
        for outlier in detect_outliers(&values, threshold) {
            prop_assert!(outlier.z_score > threshold);
            prop_assert_eq!(values[outlier.position], Some(outlier.value));
        }
    }

    #[test]
    fn extreme_values_give_finite_statistics(
        (x, y) in (1usize..20).prop_flat_map(|n| {
            (
                prop::collection::vec(prop::option::weighted(0.9, extreme_value()), n),
                prop::collection::vec(prop::option::weighted(0.9, extreme_value()), n),
            )
        })
    ) {
        let m = mean(&x);
        prop_assert!(m.is_finite());
        prop_assert!(standard_deviation(&x, m).is_finite());
        prop_assert!(median(&x).is_finite());

        let matrix = correlation_matrix(&[&x, &y]);
        prop_assert!(matrix[0][1].is_finite());
        prop_assert_eq!(matrix[0][1], matrix[1][0]);

        for outlier in detect_outliers(&x, 1.0) {
            prop_assert!(outlier.z_score.is_finite());
        }
    }

    #[test]
    fn constant_columns_have_no_outliers(v in -1000i32..1000, n in 0usize..30, threshold in 0.0..4.0f64) {
        let values = vec![Some(f64::from(v)); n];
        prop_assert!(detect_outliers(&values, threshold).is_empty());
    }
}

// =============================================================================
// Cleaning Properties
// =============================================================================

proptest! {
    #[test]
    fn cleaning_never_fails_and_is_idempotent(raw in ".{0,30}") {
        let cleaner = DataCleaner::new(Arc::new(ValidatorSet::default()));
        for column_type in [
            ColumnType::Numeric,
            ColumnType::Boolean,
            ColumnType::Date,
            ColumnType::Categorical,
        ] {
            let once = cleaner.clean_value(column_type, Some(&raw));
            let twice = cleaner.clean_value(column_type, once.as_deref());
            prop_assert_eq!(&once, &twice);
            if let Some(value) = once {
                prop_assert_eq!(value.trim(), value.as_str());
                prop_assert!(!value.is_empty());
            }
        }
    }

    #[test]
    fn numeric_cleaning_keeps_only_finite_numbers(raw in "[-+0-9.eE a-z]{0,12}") {
        let cleaner = DataCleaner::default();
        if let Some(value) = cleaner.clean_value(ColumnType::Numeric, Some(&raw)) {
            let parsed = value.parse::<f64>();
            prop_assert!(parsed.is_ok_and(f64::is_finite));
        }
    }
}

// =============================================================================
// Null-row Filtering Properties
// =============================================================================

proptest! {
    #[test]
    fn filtered_rows_are_complete_and_aligned((a, b) in paired_values()) {
        let n = a.len();
        let spec = DataSubsetSpec::new("s", ["a", "b"], (0..n).map(|i| i * 2).collect());
        let data = DataSubsetData::new(spec).with_numeric("a", a.clone()).with_numeric("b", b.clone());

        let filtered = drop_incomplete_rows(&data);
        let kept = &filtered.spec.row_indices;

        prop_assert_eq!(filtered.numeric["a"].len(), kept.len());
        prop_assert_eq!(filtered.numeric["b"].len(), kept.len());
        prop_assert!(kept.windows(2).all(|w| w[0] < w[1]));

        for (pos, &row) in kept.iter().enumerate() {
            prop_assert_eq!(filtered.numeric["a"][pos], a[row / 2]);
            prop_assert_eq!(filtered.numeric["b"][pos], b[row / 2]);
            prop_assert!(a[row / 2].is_some() && b[row / 2].is_some());
        }

        let complete = a.iter().zip(&b).filter(|(x, y)| x.is_some() && y.is_some()).count();
        prop_assert_eq!(kept.len(), complete);
    }
}
