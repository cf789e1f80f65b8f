//! Summary reports and their primitives-only projection.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::dataset::DataSubsetSpec;

use super::metric::{MetricKind, OutlierPoint, SummaryMetric};

/// The result of one statistics run. Never modified after it is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryReport {
    id: u64,
    name: String,
    subset: DataSubsetSpec,
    metrics: Vec<SummaryMetric>,
    created_at: DateTime<Utc>,
}

impl SummaryReport {
    /// Build a report.
    pub fn new(
        id: u64,
        name: impl Into<String>,
        subset: DataSubsetSpec,
        metrics: Vec<SummaryMetric>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            subset,
            metrics,
            created_at: Utc::now(),
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn subset(&self) -> &DataSubsetSpec {
        &self.subset
    }

    pub fn metrics(&self) -> &[SummaryMetric] {
        &self.metrics
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Points of the first outlier metric, if any.
    pub fn outlier_points(&self) -> Option<&[OutlierPoint]> {
        self.metrics.iter().find_map(|m| match m {
            SummaryMetric::Outliers { points, .. } => Some(points.as_slice()),
            _ => None,
        })
    }

    /// All heatmap metrics.
    pub fn heatmaps(&self) -> Vec<&SummaryMetric> {
        self.metrics
            .iter()
            .filter(|m| m.kind() == MetricKind::Heatmap)
            .collect()
    }

    /// Scalar value of `kind` for a single column.
    pub fn scalar(&self, column: &str, kind: MetricKind) -> Option<f64> {
        self.metrics.iter().find_map(|m| match m {
            SummaryMetric::Scalar {
                kind: k,
                subset,
                value,
            } if *k == kind && subset.column_names.iter().any(|c| c == column) => Some(*value),
            _ => None,
        })
    }

    /// Project the report onto primitives for presentation.
    pub fn project(&self, decimal_places: usize) -> SummaryProjection {
        let mut column_statistics: IndexMap<String, IndexMap<String, String>> = IndexMap::new();

        for metric in &self.metrics {
            if let SummaryMetric::Scalar {
                kind,
                subset,
                value,
            } = metric
            {
                let Some(column) = subset.column_names.first() else {
                    continue;
                };
                let formatted = if *kind == MetricKind::Count {
                    format!("{}", *value as u64)
                } else {
                    format!("{:.*}", decimal_places, value)
                };
                column_statistics
                    .entry(column.clone())
                    .or_default()
                    .insert(kind.key().to_string(), formatted);
            }
        }

        let correlations = self.metrics.iter().find_map(|m| match m {
            SummaryMetric::CorrelationMatrix {
                matrix,
                variable_names,
                ..
            } => Some((variable_names.clone(), matrix.clone())),
            _ => None,
        });

        SummaryProjection {
            report_id: self.id,
            report_name: self.name.clone(),
            dataset_id: self.subset.id.clone(),
            column_count: self.subset.column_names.len(),
            row_count: self.subset.row_count(),
            column_statistics,
            outlier_count: self.outlier_points().map_or(0, <[OutlierPoint]>::len),
            correlation_variables: correlations
                .as_ref()
                .map(|(names, _)| names.clone())
                .unwrap_or_default(),
            correlation_matrix: correlations.map(|(_, m)| m).unwrap_or_default(),
        }
    }
}

/// Primitive view of a [`SummaryReport`] handed to presenters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryProjection {
    pub report_id: u64,
    pub report_name: String,
    /// Identifier of the subset the report was computed over.
    pub dataset_id: String,
    pub column_count: usize,
    pub row_count: usize,
    /// Column name → statistic key → formatted value.
    pub column_statistics: IndexMap<String, IndexMap<String, String>>,
    pub outlier_count: usize,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub correlation_variables: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub correlation_matrix: Vec<Vec<f64>>,
}
