//! Summary statistics: pure calculations, metrics, reports, and the run that
//! ties them together.

pub mod calculator;
mod metric;
mod orchestrator;
mod report;

pub use calculator::DetectedOutlier;
pub use metric::{MetricKind, OutlierPoint, SummaryMetric};
pub use orchestrator::{
    DEFAULT_OUTLIER_THRESHOLD, StatisticsConfig, SummaryRequest, SummaryStatistics,
};
pub use report::{SummaryProjection, SummaryReport};
