//! Column type inference for freshly loaded tables.

use serde::{Deserialize, Serialize};

use crate::dataset::ColumnType;

use super::validators::ValidatorSet;

/// Candidate types in tie-break order.
const CANDIDATES: [ColumnType; 3] = [ColumnType::Numeric, ColumnType::Date, ColumnType::Boolean];

/// Type inference settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InferenceConfig {
    /// Share of present values a type must match to be chosen (0.0-1.0).
    pub min_type_ratio: f64,
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            min_type_ratio: 0.8,
        }
    }
}

/// Infer the declared type of a column from its present values.
///
/// The candidate matching the most values wins when its share reaches
/// `min_type_ratio`; equal counts resolve Numeric, then Date, then Boolean.
/// Columns without a qualifying candidate, including all-missing columns,
/// are Categorical.
pub fn infer_column_type<'a, I>(
    values: I,
    validators: &ValidatorSet,
    config: &InferenceConfig,
) -> ColumnType
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    let mut counts = [0usize; CANDIDATES.len()];
    let mut present = 0usize;

    for value in values.into_iter().flatten() {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            continue;
        }
        present += 1;
        for (slot, candidate) in counts.iter_mut().zip(CANDIDATES) {
            if validators.is_valid(candidate, trimmed) {
                *slot += 1;
            }
        }
    }

    if present == 0 {
        return ColumnType::Categorical;
    }

    // Strict `>` keeps the earlier candidate on ties.
    let mut best: Option<(ColumnType, usize)> = None;
    for (candidate, count) in CANDIDATES.into_iter().zip(counts) {
        if count > 0 && best.is_none_or(|(_, c)| count > c) {
            best = Some((candidate, count));
        }
    }

    match best {
        Some((column_type, count)) if count as f64 / present as f64 >= config.min_type_ratio => {
            column_type
        }
        _ => ColumnType::Categorical,
    }
}
