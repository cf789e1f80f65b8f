//! Summarize command - summary statistics over a subset.

use std::path::{Path, PathBuf};

use colored::Colorize;
use quarry::{OutputBoundary, SummaryProjection, SummaryRequest};

use super::{load_config, open_session, print_loaded, split_columns};

pub struct SummarizeArgs {
    pub file: PathBuf,
    pub columns: Option<String>,
    pub rows: String,
    pub name: String,
    pub reports: Option<PathBuf>,
    pub heatmap: bool,
    pub json: bool,
}

pub fn run(args: SummarizeArgs, config: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = load_config(config)?;
    if args.heatmap {
        config.statistics.correlation_heatmap = true;
    }

    let mut explorer = open_session(&args.file, config, args.reports.as_deref())?;
    if !args.json {
        print_loaded(&explorer);
    }

    let spec = explorer.select(&split_columns(args.columns.as_deref()), &args.rows)?;
    let request = SummaryRequest::new(spec, args.name);

    let mut printer = SummaryPrinter {
        json: args.json,
        failure: None,
    };
    explorer.summarize(&request, &mut printer);

    match printer.failure {
        Some(message) => Err(message.into()),
        None => {
            if let (Some(dir), false) = (&args.reports, args.json) {
                println!("Reports stored in {}", dir.display().to_string().white());
            }
            Ok(())
        }
    }
}

/// Prints projections as they arrive.
struct SummaryPrinter {
    json: bool,
    failure: Option<String>,
}

impl OutputBoundary<SummaryProjection> for SummaryPrinter {
    fn on_success(&mut self, summary: SummaryProjection) {
        if self.json {
            match serde_json::to_string_pretty(&summary) {
                Ok(text) => println!("{}", text),
                Err(e) => self.failure = Some(e.to_string()),
            }
            return;
        }
        print_summary(&summary);
    }

    fn on_failure(&mut self, message: String) {
        self.failure = Some(message);
    }
}

fn print_summary(summary: &SummaryProjection) {
    println!();
    println!(
        "{} #{} {} ({} columns, {} rows)",
        "Report".cyan().bold(),
        summary.report_id,
        summary.report_name.white().bold(),
        summary.column_count,
        summary.row_count
    );
    println!();

    println!("{}", "Statistics:".yellow().bold());
    for (column, stats) in &summary.column_statistics {
        println!("  {}", column.white().bold());
        for (key, value) in stats {
            println!("    {:10} {}", key, value);
        }
    }
    println!();

    let outliers = if summary.outlier_count == 0 {
        "0".green()
    } else {
        summary.outlier_count.to_string().red()
    };
    println!("{} {}", "Outliers:".yellow().bold(), outliers);

    if !summary.correlation_variables.is_empty() {
        println!();
        println!("{}", "Correlations:".yellow().bold());
        print!("  {:12}", "");
        for name in &summary.correlation_variables {
            print!(" {:>10}", truncate(name, 10));
        }
        println!();
        for (name, row) in summary
            .correlation_variables
            .iter()
            .zip(&summary.correlation_matrix)
        {
            print!("  {:12}", truncate(name, 12));
            for value in row {
                print!(" {:>10.3}", value);
            }
            println!();
        }
    }
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        text.to_string()
    } else {
        text.chars().take(width.saturating_sub(1)).chain(['~']).collect()
    }
}
