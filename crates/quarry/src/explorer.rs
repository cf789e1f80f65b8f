//! A single-owner exploration session.

use std::path::Path;
use std::sync::Arc;

use tracing::info;

use crate::cleaning::{CellLocation, DataCleaner};
use crate::config::QuarryConfig;
use crate::dataset::{DataSubsetSpec, Dataset, parse_row_selection};
use crate::error::{QuarryError, Result};
use crate::input::{Parser, SourceMetadata, delimiter_for_path, write_dataset};
use crate::presenter::OutputBoundary;
use crate::stats::{SummaryProjection, SummaryReport, SummaryRequest, SummaryStatistics};
use crate::store::{CurrentTable, InMemoryReportStore, ReportStore, TableStore};
use crate::viz::{VisualizationModel, VisualizationRequest, Visualizer};

/// Owns the current table, the report store, and everything that works on
/// them. Every request runs to completion before the next one starts.
pub struct Explorer {
    config: QuarryConfig,
    table: CurrentTable,
    reports: Box<dyn ReportStore>,
    cleaner: DataCleaner,
    statistics: SummaryStatistics,
    visualizer: Visualizer,
    source: Option<SourceMetadata>,
}

impl Explorer {
    /// Create a session with an in-memory report store.
    pub fn new(config: QuarryConfig) -> Self {
        let validators = Arc::new(config.validators());
        Self {
            table: CurrentTable::new(Arc::clone(&validators)),
            reports: Box::new(InMemoryReportStore::new()),
            cleaner: DataCleaner::new(validators),
            statistics: SummaryStatistics::new(config.statistics.clone()),
            visualizer: Visualizer::new(),
            source: None,
            config,
        }
    }

    /// Use a different report store.
    pub fn with_report_store(mut self, store: impl ReportStore + 'static) -> Self {
        self.reports = Box::new(store);
        self
    }

    pub fn config(&self) -> &QuarryConfig {
        &self.config
    }

    /// Load a file and make it the current table.
    pub fn open(&mut self, path: impl AsRef<Path>) -> Result<&SourceMetadata> {
        let validators = Arc::new(self.config.validators());
        let parser = Parser::with_config(self.config.parser.clone())
            .with_inference(validators, self.config.inference.clone());
        let (dataset, source) = parser.parse_file(path)?;

        self.table.save(dataset);
        Ok(self.source.insert(source))
    }

    /// Make `dataset` the current table, replacing any previous one.
    pub fn load_dataset(&mut self, dataset: Dataset) {
        info!(dataset = %dataset.name, rows = dataset.row_count(), "loaded dataset");
        self.source = None;
        self.table.save(dataset);
    }

    /// The current table, if one is loaded.
    pub fn dataset(&self) -> Option<&Dataset> {
        self.table.load()
    }

    /// Metadata of the file the current table was opened from.
    pub fn source(&self) -> Option<&SourceMetadata> {
        self.source.as_ref()
    }

    fn loaded(&self) -> Result<&Dataset> {
        self.table.load().ok_or(QuarryError::NoDatasetLoaded)
    }

    fn loaded_mut(&mut self) -> Result<&mut Dataset> {
        self.table.load_mut().ok_or(QuarryError::NoDatasetLoaded)
    }

    pub fn clean_entire_dataset(&mut self) -> Result<Vec<CellLocation>> {
        let cleaner = self.cleaner.clone();
        Ok(cleaner.clean_entire_dataset(self.loaded_mut()?))
    }

    pub fn clean_edited_cell(
        &mut self,
        row: usize,
        column: usize,
        raw: Option<&str>,
    ) -> Result<Option<String>> {
        let cleaner = self.cleaner.clone();
        cleaner.clean_edited_cell(self.loaded_mut()?, row, column, raw)
    }

    pub fn edit_header(&mut self, column: usize, new_header: Option<&str>) -> Result<()> {
        let cleaner = self.cleaner.clone();
        cleaner.edit_header(self.loaded_mut()?, column, new_header)
    }

    pub fn find_missing_cells(&self) -> Result<Vec<CellLocation>> {
        Ok(self.cleaner.find_missing_cells(self.loaded()?))
    }

    /// Build a subset spec over the current table.
    ///
    /// No columns selects every column; `rows` is a row selection such as
    /// `0-4,7` (see [`parse_row_selection`]).
    pub fn select(&self, columns: &[String], rows: &str) -> Result<DataSubsetSpec> {
        let dataset = self.loaded()?;
        let row_indices = parse_row_selection(rows, dataset.row_count())?;
        let names: Vec<String> = if columns.is_empty() {
            dataset.headers().into_iter().map(str::to_string).collect()
        } else {
            columns.to_vec()
        };
        Ok(DataSubsetSpec::new(dataset.name.clone(), names, row_indices))
    }

    /// Run summary statistics and present the projection.
    pub fn summarize(
        &mut self,
        request: &SummaryRequest,
        presenter: &mut dyn OutputBoundary<SummaryProjection>,
    ) {
        self.statistics
            .run(request, &self.table, self.reports.as_mut(), presenter);
    }

    /// Build a visualization model and present it.
    pub fn visualize(
        &self,
        request: &VisualizationRequest,
        presenter: &mut dyn OutputBoundary<VisualizationModel>,
    ) {
        self.visualizer
            .run(request, &self.table, self.reports.as_ref(), presenter);
    }

    /// Fetch a stored report.
    pub fn report(&self, id: u64) -> Result<SummaryReport> {
        self.reports
            .get_by_id(id)?
            .ok_or(QuarryError::ReportNotFound(id))
    }

    /// Ids of every stored report.
    pub fn report_ids(&self) -> Result<Vec<u64>> {
        self.reports.list_ids()
    }

    /// Write the current table to `path`. The delimiter comes from the
    /// parser config, or from the file extension when none is configured.
    pub fn export(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let delimiter = self
            .config
            .parser
            .delimiter
            .unwrap_or_else(|| delimiter_for_path(path));
        write_dataset(self.loaded()?, path, delimiter)
    }
}

impl Default for Explorer {
    fn default() -> Self {
        Self::new(QuarryConfig::default())
    }
}

impl std::fmt::Debug for Explorer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Explorer")
            .field("config", &self.config)
            .field("table", &self.table)
            .field("source", &self.source)
            .finish_non_exhaustive()
    }
}
