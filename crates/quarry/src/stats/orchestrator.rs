//! Summary statistics runs: load a subset, compute metrics, persist a report.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::dataset::{DataSubsetData, DataSubsetSpec};
use crate::error::{QuarryError, Result};
use crate::presenter::{OutputBoundary, present};
use crate::store::{ReportStore, SubsetSource};

use super::calculator;
use super::metric::{MetricKind, OutlierPoint, SummaryMetric};
use super::report::{SummaryProjection, SummaryReport};

/// Z-score beyond which a value is reported as an outlier.
pub const DEFAULT_OUTLIER_THRESHOLD: f64 = 3.0;

/// Statistics run settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StatisticsConfig {
    /// Z-score threshold for outlier detection.
    pub outlier_threshold: f64,
    /// Decimal places in the formatted projection.
    pub decimal_places: usize,
    /// Also emit a heatmap metric mirroring the correlation matrix.
    pub correlation_heatmap: bool,
}

impl Default for StatisticsConfig {
    fn default() -> Self {
        Self {
            outlier_threshold: DEFAULT_OUTLIER_THRESHOLD,
            decimal_places: 2,
            correlation_heatmap: false,
        }
    }
}

/// Input to a statistics run.
#[derive(Debug, Clone)]
pub struct SummaryRequest {
    pub subset: Option<DataSubsetSpec>,
    pub report_name: String,
}

impl SummaryRequest {
    pub fn new(subset: DataSubsetSpec, report_name: impl Into<String>) -> Self {
        Self {
            subset: Some(subset),
            report_name: report_name.into(),
        }
    }
}

/// Runs summary statistics over a subset and stores the resulting report.
#[derive(Debug, Clone, Default)]
pub struct SummaryStatistics {
    config: StatisticsConfig,
}

impl SummaryStatistics {
    pub fn new(config: StatisticsConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &StatisticsConfig {
        &self.config
    }

    /// Run a request and hand the outcome to `presenter`.
    pub fn run(
        &self,
        request: &SummaryRequest,
        source: &dyn SubsetSource,
        reports: &mut dyn ReportStore,
        presenter: &mut dyn OutputBoundary<SummaryProjection>,
    ) {
        present(self.execute(request, source, reports), presenter);
    }

    /// Run a request: validate, load, compute, persist, project.
    pub fn execute(
        &self,
        request: &SummaryRequest,
        source: &dyn SubsetSource,
        reports: &mut dyn ReportStore,
    ) -> Result<SummaryProjection> {
        let (spec, name) = validate(request)?;

        let data = source.load_for_request(spec)?;
        let metrics = self.compute_metrics(&data)?;

        let id = reports.next_id()?;
        let report = SummaryReport::new(id, name, spec.clone(), metrics);
        reports.save(&report).map_err(|e| {
            QuarryError::Persistence(format!("Failed to save report '{}': {}", name, e))
        })?;

        info!(
            report = id,
            name,
            metrics = report.metrics().len(),
            "summary statistics complete"
        );
        Ok(report.project(self.config.decimal_places))
    }

    /// Compute every metric for loaded subset data.
    ///
    /// Fails if the subset has no numeric columns.
    pub fn compute_metrics(&self, data: &DataSubsetData) -> Result<Vec<SummaryMetric>> {
        if !data.has_numeric() {
            return Err(QuarryError::NoNumericColumns);
        }

        let mut metrics = self.column_metrics(data);

        if let Some(outliers) = self.outlier_metric(data) {
            metrics.push(outliers);
        }

        if let Some(correlation) = correlation_metric(data) {
            if self.config.correlation_heatmap {
                let heatmap = correlation.heatmap_of();
                metrics.push(correlation);
                metrics.extend(heatmap);
            } else {
                metrics.push(correlation);
            }
        }

        Ok(metrics)
    }

    /// Scalar metrics for each numeric column with at least one value.
    fn column_metrics(&self, data: &DataSubsetData) -> Vec<SummaryMetric> {
        let mut metrics = Vec::new();

        for (name, values) in &data.numeric {
            let count = calculator::count_non_missing(values);
            if count == 0 {
                debug!(column = %name, "skipping column without values");
                continue;
            }

            let mean = calculator::mean(values);
            let scalars = [
                (MetricKind::Mean, mean),
                (MetricKind::Median, calculator::median(values)),
                (MetricKind::StdDev, calculator::standard_deviation(values, mean)),
                (MetricKind::Min, calculator::min(values)),
                (MetricKind::Max, calculator::max(values)),
                (MetricKind::Count, count as f64),
            ];

            let subset = data.spec.narrowed_to(name);
            metrics.extend(scalars.into_iter().map(|(kind, value)| SummaryMetric::Scalar {
                kind,
                subset: subset.clone(),
                value,
            }));
        }

        metrics
    }

    /// One metric holding the outliers of every numeric column, if any.
    fn outlier_metric(&self, data: &DataSubsetData) -> Option<SummaryMetric> {
        let threshold = self.config.outlier_threshold;
        let rows = &data.spec.row_indices;

        let points: Vec<OutlierPoint> = data
            .numeric
            .values()
            .enumerate()
            .flat_map(|(col_index, values)| {
                calculator::detect_outliers(values, threshold)
                    .into_iter()
                    .map(move |o| OutlierPoint {
                        row_index: rows.get(o.position).copied().unwrap_or(o.position),
                        col_index,
                        z_score: o.z_score,
                    })
            })
            .collect();

        if points.is_empty() {
            return None;
        }

        debug!(count = points.len(), threshold, "detected outliers");
        Some(SummaryMetric::Outliers {
            subset: data.spec.clone(),
            z_threshold: threshold,
            points,
        })
    }
}

/// Correlation matrix across numeric columns, when there are at least two.
fn correlation_metric(data: &DataSubsetData) -> Option<SummaryMetric> {
    if data.numeric.len() < 2 {
        return None;
    }

    let columns: Vec<&[Option<f64>]> = data.numeric.values().map(Vec::as_slice).collect();
    Some(SummaryMetric::CorrelationMatrix {
        subset: data.spec.clone(),
        matrix: calculator::correlation_matrix(&columns),
        variable_names: data.numeric.keys().cloned().collect(),
    })
}

fn validate(request: &SummaryRequest) -> Result<(&DataSubsetSpec, &str)> {
    let spec = request
        .subset
        .as_ref()
        .ok_or_else(|| QuarryError::InvalidRequest("no data subset was provided".to_string()))?;

    if spec.column_names.is_empty() {
        return Err(QuarryError::InvalidRequest(
            "select at least one column".to_string(),
        ));
    }

    let name = request.report_name.trim();
    if name.is_empty() {
        return Err(QuarryError::InvalidRequest(
            "report name cannot be blank".to_string(),
        ));
    }

    Ok((spec, name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presenter::Presented;
    use crate::store::InMemoryReportStore;

    struct FixedSource(DataSubsetData);

    impl SubsetSource for FixedSource {
        fn load_subset(&self, _spec: &DataSubsetSpec) -> Result<DataSubsetData> {
            Ok(self.0.clone())
        }
    }

    struct FailingSource(fn() -> QuarryError);

    impl SubsetSource for FailingSource {
        fn load_subset(&self, _spec: &DataSubsetSpec) -> Result<DataSubsetData> {
            Err((self.0)())
        }
    }

    struct BrokenStore;

    impl ReportStore for BrokenStore {
        fn next_id(&mut self) -> Result<u64> {
            Ok(1)
        }
        fn save(&mut self, _report: &SummaryReport) -> Result<()> {
            Err(QuarryError::Persistence("disk full".into()))
        }
        fn get_by_id(&self, _id: u64) -> Result<Option<SummaryReport>> {
            Ok(None)
        }
        fn list_ids(&self) -> Result<Vec<u64>> {
            Ok(Vec::new())
        }
    }

    fn spec() -> DataSubsetSpec {
        DataSubsetSpec::new("people", ["Age", "NetWorth", "City"], vec![0, 1, 2, 3, 4])
    }

    fn data() -> DataSubsetData {
        DataSubsetData::new(spec())
            .with_numeric(
                "Age",
                vec![Some(25.0), Some(30.0), Some(28.0), Some(32.0), Some(150.0)],
            )
            .with_numeric(
                "NetWorth",
                vec![Some(10.0), None, Some(12.0), Some(15.0), Some(90.0)],
            )
            .with_categorical("City", vec![Some("Oslo".into()); 5])
    }

    #[test]
    fn test_rejects_invalid_requests() {
        let engine = SummaryStatistics::default();
        let source = FixedSource(data());
        let mut store = InMemoryReportStore::new();

        let no_subset = SummaryRequest {
            subset: None,
            report_name: "r".into(),
        };
        let no_columns = SummaryRequest::new(DataSubsetSpec::new("s", Vec::<String>::new(), vec![0]), "r");
        let blank_name = SummaryRequest::new(spec(), "   ");

        for request in [no_subset, no_columns, blank_name] {
            assert!(matches!(
                engine.execute(&request, &source, &mut store),
                Err(QuarryError::InvalidRequest(_))
            ));
        }
        assert!(store.list_ids().unwrap().is_empty());
    }

    #[test]
    fn test_load_failures_are_distinguished() {
        let engine = SummaryStatistics::default();
        let mut store = InMemoryReportStore::new();
        let request = SummaryRequest::new(spec(), "r");

        let unloaded = FailingSource(|| QuarryError::NoDatasetLoaded);
        assert!(matches!(
            engine.execute(&request, &unloaded, &mut store),
            Err(QuarryError::NoDatasetLoaded)
        ));

        let broken = FailingSource(|| QuarryError::UnknownColumn("Age".into()));
        let err = engine.execute(&request, &broken, &mut store).unwrap_err();
        assert!(matches!(err, QuarryError::SubsetLoad(_)));
        assert!(err.to_string().contains("Unknown column"));
    }

    #[test]
    fn test_requires_numeric_columns() {
        let engine = SummaryStatistics::default();
        let only_text = DataSubsetData::new(DataSubsetSpec::new("s", ["City"], vec![0]))
            .with_categorical("City", vec![Some("Oslo".into())]);
        assert!(matches!(
            engine.compute_metrics(&only_text),
            Err(QuarryError::NoNumericColumns)
        ));
    }

    #[test]
    fn test_scalar_metrics_are_narrowed() {
        let engine = SummaryStatistics::default();
        let metrics = engine.compute_metrics(&data()).unwrap();

        let scalars: Vec<_> = metrics
            .iter()
            .filter(|m| matches!(m, SummaryMetric::Scalar { .. }))
            .collect();
        assert_eq!(scalars.len(), 12);
        for metric in scalars {
            assert_eq!(metric.subset().column_names.len(), 1);
            assert_eq!(metric.subset().row_indices, spec().row_indices);
        }
    }

    #[test]
    fn test_empty_numeric_column_is_skipped() {
        let engine = SummaryStatistics::default();
        let data = DataSubsetData::new(DataSubsetSpec::new("s", ["a", "b"], vec![0, 1]))
            .with_numeric("a", vec![Some(1.0), Some(2.0)])
            .with_numeric("b", vec![None, None]);

        let metrics = engine.compute_metrics(&data).unwrap();
        assert!(
            metrics
                .iter()
                .filter(|m| matches!(m, SummaryMetric::Scalar { .. }))
                .all(|m| m.subset().column_names == ["a"])
        );
        // The empty column still takes part in the correlation matrix.
        assert!(metrics.iter().any(|m| m.kind() == MetricKind::CorrelationMatrix));
    }

    #[test]
    fn test_outlier_rows_are_translated() {
        let engine = SummaryStatistics::new(StatisticsConfig {
            outlier_threshold: 1.5,
            ..StatisticsConfig::default()
        });
        let spec = DataSubsetSpec::new("s", ["Age"], vec![10, 11, 12, 13, 14]);
        let data = DataSubsetData::new(spec).with_numeric(
            "Age",
            vec![Some(25.0), Some(30.0), Some(28.0), Some(32.0), Some(150.0)],
        );

        let metrics = engine.compute_metrics(&data).unwrap();
        let points = metrics
            .iter()
            .find_map(|m| match m {
                SummaryMetric::Outliers { points, z_threshold, .. } => {
                    assert_eq!(*z_threshold, 1.5);
                    Some(points.clone())
                }
                _ => None,
            })
            .unwrap();

        assert_eq!(points.len(), 1);
        assert_eq!(points[0].row_index, 14);
        assert_eq!(points[0].col_index, 0);
    }

    #[test]
    fn test_no_outlier_metric_without_outliers() {
        let engine = SummaryStatistics::default();
        let metrics = engine.compute_metrics(&data()).unwrap();
        assert!(metrics.iter().all(|m| m.kind() != MetricKind::Outliers));
    }

    #[test]
    fn test_correlation_matrix_shape() {
        let engine = SummaryStatistics::default();
        let metrics = engine.compute_metrics(&data()).unwrap();

        let (matrix, names) = metrics
            .iter()
            .find_map(|m| match m {
                SummaryMetric::CorrelationMatrix {
                    matrix,
                    variable_names,
                    ..
                } => Some((matrix.clone(), variable_names.clone())),
                _ => None,
            })
            .unwrap();

        assert_eq!(names, vec!["Age", "NetWorth"]);
        assert_eq!(matrix[0][0], 1.0);
        assert_eq!(matrix[1][1], 1.0);
        assert_eq!(matrix[0][1], matrix[1][0]);
        assert!(metrics.iter().all(|m| m.kind() != MetricKind::Heatmap));
    }

    #[test]
    fn test_heatmap_emitted_when_configured() {
        let engine = SummaryStatistics::new(StatisticsConfig {
            correlation_heatmap: true,
            ..StatisticsConfig::default()
        });
        let metrics = engine.compute_metrics(&data()).unwrap();
        assert_eq!(
            metrics.iter().filter(|m| m.kind() == MetricKind::Heatmap).count(),
            1
        );
    }

    #[test]
    fn test_run_persists_and_projects() {
        let engine = SummaryStatistics::default();
        let source = FixedSource(data());
        let mut store = InMemoryReportStore::new();
        let mut presented = Presented::new();

        engine.run(&SummaryRequest::new(spec(), " Ages "), &source, &mut store, &mut presented);

        let projection = presented.into_result().unwrap();
        assert_eq!(projection.report_name, "Ages");
        assert_eq!(projection.dataset_id, "people");
        assert_eq!(projection.column_count, 3);
        assert_eq!(projection.row_count, 5);
        assert_eq!(projection.column_statistics["Age"]["mean"], "53.00");
        assert_eq!(projection.column_statistics["NetWorth"]["count"], "4");

        let stored = store.get_by_id(projection.report_id).unwrap().unwrap();
        assert_eq!(stored.name(), "Ages");
    }

    #[test]
    fn test_save_failure_is_reported() {
        let engine = SummaryStatistics::default();
        let source = FixedSource(data());
        let mut presented = Presented::new();

        engine.run(&SummaryRequest::new(spec(), "r"), &source, &mut BrokenStore, &mut presented);

        let message = presented.failure().unwrap();
        assert!(message.contains("Failed to save report"));
        assert!(message.contains("disk full"));
    }
}
