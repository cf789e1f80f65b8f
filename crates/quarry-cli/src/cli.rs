//! CLI argument definitions using clap.

use clap::{Parser, Subcommand};
use quarry::PlotKind;
use std::path::PathBuf;

/// Quarry: load, clean, summarize, and plot tabular data
#[derive(Parser)]
#[command(name = "quarry")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// JSON configuration file
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show columns, inferred types, and missing counts
    Inspect {
        /// Path to the data file (CSV/TSV)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Clean every cell against its column type and write the result
    Clean {
        /// Path to the data file (CSV/TSV)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output path (default: <file>_cleaned.<ext>)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Rename a column header
    Rename {
        /// Path to the data file (CSV/TSV)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Column to rename, by 0-based index or current header
        #[arg(short, long)]
        column: String,

        /// New header
        #[arg(long)]
        header: String,

        /// Output path (default: <file>_renamed.<ext>)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Compute summary statistics over a subset and store the report
    Summarize {
        /// Path to the data file (CSV/TSV)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Comma-separated columns (default: all)
        #[arg(short, long)]
        columns: Option<String>,

        /// Rows to include, e.g. "0-9,15" (default: all)
        #[arg(short, long, default_value = "all")]
        rows: String,

        /// Report name
        #[arg(short, long)]
        name: String,

        /// Directory to store reports in (default: keep in memory)
        #[arg(long, value_name = "DIR")]
        reports: Option<PathBuf>,

        /// Also store a correlation heatmap metric
        #[arg(long)]
        heatmap: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Build a plot model and print it as JSON
    Plot {
        /// Path to the data file (CSV/TSV)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Plot kind: scatter, line, bar, histogram, heatmap
        #[arg(short, long)]
        kind: PlotKind,

        /// Comma-separated columns (default: all)
        #[arg(short, long)]
        columns: Option<String>,

        /// Rows to include, e.g. "0-9,15" (default: all)
        #[arg(short, long, default_value = "all")]
        rows: String,

        /// X axis column
        #[arg(short)]
        x: Option<String>,

        /// Y axis column
        #[arg(short)]
        y: Option<String>,

        /// Plot title (default: the plot kind)
        #[arg(long)]
        title: Option<String>,

        /// Id of a stored report to take outliers or a heatmap from
        #[arg(long, requires = "reports")]
        report: Option<u64>,

        /// Directory holding stored reports
        #[arg(long, value_name = "DIR")]
        reports: Option<PathBuf>,

        /// Write the model here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}
