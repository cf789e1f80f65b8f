//! Visualization: turn a subset (and optionally a prior summary report) into a
//! renderable model.
//!
//! Rows with any missing selected value are dropped before building, so every
//! series is aligned with every other and with the outlier overlay.

mod builder;
mod filter;
mod interactor;
mod model;

pub use builder::{BuildContext, build_model};
pub use filter::drop_incomplete_rows;
pub use interactor::{VisualizationRequest, Visualizer};
pub use model::{DataPoint, PlotKind, VisualizationModel};
