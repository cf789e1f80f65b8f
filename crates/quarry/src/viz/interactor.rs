//! Visualization requests: load, filter, look up the prior report, build.

use tracing::info;

use crate::dataset::DataSubsetSpec;
use crate::error::{QuarryError, Result};
use crate::presenter::{OutputBoundary, present};
use crate::store::{ReportStore, SubsetSource};

use super::builder::{BuildContext, build_model};
use super::filter::drop_incomplete_rows;
use super::model::{PlotKind, VisualizationModel};

/// Input to a visualization run.
#[derive(Debug, Clone)]
pub struct VisualizationRequest {
    pub subset: Option<DataSubsetSpec>,
    pub plot_kind: PlotKind,
    pub title: String,
    pub x_column: Option<String>,
    pub y_column: Option<String>,
    /// Report whose outliers or heatmap the model should use.
    pub report_id: Option<u64>,
}

impl VisualizationRequest {
    pub fn new(subset: DataSubsetSpec, plot_kind: PlotKind) -> Self {
        Self {
            title: plot_kind.label().to_string(),
            subset: Some(subset),
            plot_kind,
            x_column: None,
            y_column: None,
            report_id: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_axes(mut self, x: Option<String>, y: Option<String>) -> Self {
        self.x_column = x;
        self.y_column = y;
        self
    }

    pub fn with_report(mut self, id: u64) -> Self {
        self.report_id = Some(id);
        self
    }
}

/// Builds visualization models from subsets and prior reports.
#[derive(Debug, Clone, Copy, Default)]
pub struct Visualizer;

impl Visualizer {
    pub fn new() -> Self {
        Self
    }

    /// Run a request and hand the outcome to `presenter`.
    pub fn run(
        &self,
        request: &VisualizationRequest,
        source: &dyn SubsetSource,
        reports: &dyn ReportStore,
        presenter: &mut dyn OutputBoundary<VisualizationModel>,
    ) {
        present(self.execute(request, source, reports), presenter);
    }

    pub fn execute(
        &self,
        request: &VisualizationRequest,
        source: &dyn SubsetSource,
        reports: &dyn ReportStore,
    ) -> Result<VisualizationModel> {
        let spec = request
            .subset
            .as_ref()
            .ok_or_else(|| QuarryError::InvalidRequest("no data subset was provided".to_string()))?;
        if spec.column_names.is_empty() {
            return Err(QuarryError::InvalidRequest(
                "select at least one column".to_string(),
            ));
        }

        let data = drop_incomplete_rows(&source.load_for_request(spec)?);

        let report = match request.report_id {
            Some(id) => Some(reports.get_by_id(id)?.ok_or(QuarryError::ReportNotFound(id))?),
            None => None,
        };

        let model = build_model(&BuildContext {
            title: &request.title,
            plot_kind: request.plot_kind,
            data: &data,
            report: report.as_ref(),
            x_column: request.x_column.as_deref(),
            y_column: request.y_column.as_deref(),
        })?;

        info!(kind = %request.plot_kind, rows = data.row_count(), "built visualization");
        Ok(model)
    }
}
