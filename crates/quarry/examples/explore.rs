//! Example: Summarize and plot a tabular data file with Quarry.
//!
//! Usage:
//!   cargo run --example explore -- <file_path>
//!
//! Example:
//!   cargo run --example explore -- people.csv

use std::env;
use std::path::Path;

use quarry::{
    Explorer, PlotKind, Presented, QuarryConfig, SummaryRequest, VisualizationModel,
    VisualizationRequest,
};

fn main() -> quarry::Result<()> {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: cargo run --example explore -- <file_path>");
        std::process::exit(1);
    }

    let path = Path::new(&args[1]);
    if !path.exists() {
        eprintln!("Error: File not found: {}", path.display());
        std::process::exit(1);
    }

    let mut explorer = Explorer::new(QuarryConfig::default());
    let source = explorer.open(path)?;
    println!(
        "Loaded {} ({} rows, {} columns, {})",
        source.file, source.row_count, source.column_count, source.format
    );

    let changes = explorer.clean_entire_dataset()?;
    println!("Cleaning cleared {} invalid cells", changes.len());

    let spec = explorer.select(&[], "all")?;
    let mut summary = Presented::new();
    explorer.summarize(&SummaryRequest::new(spec.clone(), "overview"), &mut summary);

    let summary = match summary.into_result() {
        Ok(summary) => summary,
        Err(message) => {
            eprintln!("Summary failed: {}", message);
            std::process::exit(1);
        }
    };

    println!("\nReport {} '{}'", summary.report_id, summary.report_name);
    for (column, stats) in &summary.column_statistics {
        let line: Vec<String> = stats.iter().map(|(k, v)| format!("{}={}", k, v)).collect();
        println!("  {:<20} {}", column, line.join("  "));
    }
    println!("  outliers: {}", summary.outlier_count);

    let request = VisualizationRequest::new(spec, PlotKind::Scatter).with_report(summary.report_id);
    let mut plot = Presented::new();
    explorer.visualize(&request, &mut plot);

    match plot.output() {
        Some(VisualizationModel::PointPlot {
            x_label,
            y_label,
            points,
            outliers,
            ..
        }) => println!(
            "\nScatter of {} vs {}: {} points, {} highlighted",
            x_label,
            y_label,
            points.len(),
            outliers.len()
        ),
        Some(other) => println!("\nBuilt {}", other.title()),
        None => println!("\nNo plot: {}", plot.failure().unwrap_or("unknown error")),
    }

    Ok(())
}
