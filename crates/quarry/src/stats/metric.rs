//! Summary metrics produced by a statistics run.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::dataset::DataSubsetSpec;

/// Kind of a summary metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricKind {
    Mean,
    Median,
    Mode,
    Min,
    Max,
    Count,
    StdDev,
    Outliers,
    Heatmap,
    CorrelationMatrix,
}

impl MetricKind {
    /// Short key used in projections and output.
    pub fn key(&self) -> &'static str {
        match self {
            MetricKind::Mean => "mean",
            MetricKind::Median => "median",
            MetricKind::Mode => "mode",
            MetricKind::Min => "min",
            MetricKind::Max => "max",
            MetricKind::Count => "count",
            MetricKind::StdDev => "std_dev",
            MetricKind::Outliers => "outliers",
            MetricKind::Heatmap => "heatmap",
            MetricKind::CorrelationMatrix => "correlation_matrix",
        }
    }
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// A flagged value, addressed in the original dataset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OutlierPoint {
    /// Row in the original dataset.
    pub row_index: usize,
    /// Column position within the subset's numeric columns.
    pub col_index: usize,
    pub z_score: f64,
}

/// One entry of a summary report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SummaryMetric {
    /// A single number for one column.
    Scalar {
        kind: MetricKind,
        subset: DataSubsetSpec,
        value: f64,
    },
    /// Every outlier found across the subset's numeric columns.
    Outliers {
        subset: DataSubsetSpec,
        z_threshold: f64,
        points: Vec<OutlierPoint>,
    },
    /// Pairwise Pearson correlations between numeric columns.
    CorrelationMatrix {
        subset: DataSubsetSpec,
        matrix: Vec<Vec<f64>>,
        variable_names: Vec<String>,
    },
    /// A labelled matrix ready to render as a heatmap.
    Heatmap {
        subset: DataSubsetSpec,
        matrix: Vec<Vec<f64>>,
        row_labels: Vec<String>,
        col_labels: Vec<String>,
    },
}

impl SummaryMetric {
    /// Get the kind of this metric.
    pub fn kind(&self) -> MetricKind {
        match self {
            SummaryMetric::Scalar { kind, .. } => *kind,
            SummaryMetric::Outliers { .. } => MetricKind::Outliers,
            SummaryMetric::CorrelationMatrix { .. } => MetricKind::CorrelationMatrix,
            SummaryMetric::Heatmap { .. } => MetricKind::Heatmap,
        }
    }

    /// The subset this metric was computed over.
    pub fn subset(&self) -> &DataSubsetSpec {
        match self {
            SummaryMetric::Scalar { subset, .. }
            | SummaryMetric::Outliers { subset, .. }
            | SummaryMetric::CorrelationMatrix { subset, .. }
            | SummaryMetric::Heatmap { subset, .. } => subset,
        }
    }

    /// Heatmap view of a correlation matrix, labelled by variable on both axes.
    pub fn heatmap_of(&self) -> Option<SummaryMetric> {
        match self {
            SummaryMetric::CorrelationMatrix {
                subset,
                matrix,
                variable_names,
            } => Some(SummaryMetric::Heatmap {
                subset: subset.clone(),
                matrix: matrix.clone(),
                row_labels: variable_names.clone(),
                col_labels: variable_names.clone(),
            }),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec() -> DataSubsetSpec {
        DataSubsetSpec::new("s", ["a", "b"], vec![0, 1])
    }

    #[test]
    fn test_kind_and_subset() {
        let metric = SummaryMetric::Scalar {
            kind: MetricKind::Median,
            subset: spec().narrowed_to("a"),
            value: 2.0,
        };
        assert_eq!(metric.kind(), MetricKind::Median);
        assert_eq!(metric.subset().column_names, vec!["a"]);
    }

    #[test]
    fn test_heatmap_of_correlation() {
        let corr = SummaryMetric::CorrelationMatrix {
            subset: spec(),
            matrix: vec![vec![1.0, 0.5], vec![0.5, 1.0]],
            variable_names: vec!["a".into(), "b".into()],
        };
        let heatmap = corr.heatmap_of().unwrap();
        assert_eq!(heatmap.kind(), MetricKind::Heatmap);
        if let SummaryMetric::Heatmap { row_labels, col_labels, .. } = heatmap {
            assert_eq!(row_labels, col_labels);
        }

        let outliers = SummaryMetric::Outliers {
            subset: spec(),
            z_threshold: 3.0,
            points: Vec::new(),
        };
        assert!(outliers.heatmap_of().is_none());
    }

    #[test]
    fn test_metric_serializes_with_type_tag() {
        let metric = SummaryMetric::Outliers {
            subset: spec(),
            z_threshold: 3.0,
            points: vec![OutlierPoint {
                row_index: 4,
                col_index: 0,
                z_score: 3.5,
            }],
        };
        let json = serde_json::to_value(&metric).unwrap();
        assert_eq!(json["type"], "outliers");
        assert_eq!(json["points"][0]["row_index"], 4);
    }
}
