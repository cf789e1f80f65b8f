//! Renderable visualization models.

use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::QuarryError;

/// Kind of plot to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlotKind {
    Scatter,
    Line,
    Bar,
    Histogram,
    Heatmap,
}

impl PlotKind {
    pub const ALL: [PlotKind; 5] = [
        PlotKind::Scatter,
        PlotKind::Line,
        PlotKind::Bar,
        PlotKind::Histogram,
        PlotKind::Heatmap,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            PlotKind::Scatter => "scatter",
            PlotKind::Line => "line",
            PlotKind::Bar => "bar",
            PlotKind::Histogram => "histogram",
            PlotKind::Heatmap => "heatmap",
        }
    }

    /// Returns true for kinds rendered as x/y points.
    pub fn is_point_plot(&self) -> bool {
        !matches!(self, PlotKind::Heatmap)
    }
}

impl fmt::Display for PlotKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for PlotKind {
    type Err = QuarryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        PlotKind::ALL
            .into_iter()
            .find(|kind| kind.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| QuarryError::InvalidRequest(format!("unknown plot kind '{}'", wanted)))
    }
}

/// One plotted point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    pub x: f64,
    pub y: f64,
    /// Extra facts about the point, such as `row_index`.
    #[serde(default)]
    pub metadata: IndexMap<String, Value>,
}

impl DataPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            metadata: IndexMap::new(),
        }
    }

    pub fn with_meta(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Row of the original dataset this point came from.
    pub fn row_index(&self) -> Option<usize> {
        self.metadata
            .get("row_index")
            .and_then(Value::as_u64)
            .map(|v| v as usize)
    }
}

/// A model ready to hand to a renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum VisualizationModel {
    PointPlot {
        title: String,
        plot_kind: PlotKind,
        x_label: String,
        y_label: String,
        points: Vec<DataPoint>,
        /// Overlay series. May repeat points of the main series.
        outliers: Vec<DataPoint>,
        annotations: Vec<String>,
    },
    Heatmap {
        title: String,
        matrix: Vec<Vec<f64>>,
        row_labels: Vec<String>,
        col_labels: Vec<String>,
    },
}

impl VisualizationModel {
    pub fn title(&self) -> &str {
        match self {
            VisualizationModel::PointPlot { title, .. } | VisualizationModel::Heatmap { title, .. } => {
                title
            }
        }
    }

    pub fn plot_kind(&self) -> PlotKind {
        match self {
            VisualizationModel::PointPlot { plot_kind, .. } => *plot_kind,
            VisualizationModel::Heatmap { .. } => PlotKind::Heatmap,
        }
    }

    /// Attach an annotation. Heatmaps carry none and are returned unchanged.
    pub fn with_annotation(mut self, text: impl Into<String>) -> Self {
        if let VisualizationModel::PointPlot { annotations, .. } = &mut self {
            annotations.push(text.into());
        }
        self
    }
}
