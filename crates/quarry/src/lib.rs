//! Quarry: load, clean, summarize, and plot tabular data.
//!
//! A dataset is loaded into a single current table, cleaned against its
//! columns' declared types, and explored through subsets: named selections of
//! columns and rows. Summary statistics over a subset produce a stored report;
//! visualizations turn a subset (and optionally a report's outliers or
//! heatmap) into a renderable model.
//!
//! # Core Principles
//!
//! - **Missing is not zero**: absent values are skipped, never counted as 0
//! - **Cells degrade quietly, headers fail loudly**: invalid cell input
//!   becomes missing; a duplicate header is an error
//! - **Aligned outputs**: every plotted series and overlay shares row positions
//!
//! # Example
//!
//! ```no_run
//! use quarry::{Explorer, Presented, QuarryConfig, SummaryRequest};
//!
//! let mut explorer = Explorer::new(QuarryConfig::default());
//! explorer.open("people.csv").unwrap();
//!
//! let spec = explorer.select(&[], "all").unwrap();
//! let mut presented = Presented::new();
//! explorer.summarize(&SummaryRequest::new(spec, "overview"), &mut presented);
//!
//! if let Some(summary) = presented.output() {
//!     println!("Report {} covers {} rows", summary.report_id, summary.row_count);
//! }
//! ```

pub mod cleaning;
pub mod config;
pub mod dataset;
pub mod error;
pub mod input;
pub mod presenter;
pub mod stats;
pub mod store;
pub mod validation;
pub mod viz;

mod explorer;

pub use cleaning::{CellLocation, DataCleaner};
pub use config::QuarryConfig;
pub use dataset::{Column, ColumnType, DataRow, DataSubsetData, DataSubsetSpec, Dataset};
pub use error::{QuarryError, Result};
pub use explorer::Explorer;
pub use input::{Parser, ParserConfig, SourceMetadata};
pub use presenter::{OutputBoundary, Presented};
pub use stats::{
    MetricKind, StatisticsConfig, SummaryMetric, SummaryProjection, SummaryReport, SummaryRequest,
    SummaryStatistics,
};
pub use store::{CurrentTable, InMemoryReportStore, JsonReportStore, ReportStore, SubsetSource};
pub use validation::{TypeValidator, ValidatorSet};
pub use viz::{DataPoint, PlotKind, VisualizationModel, VisualizationRequest, Visualizer};
