//! Plot command - build a visualization model and emit it as JSON.

use std::fs;
use std::path::{Path, PathBuf};

use colored::Colorize;
use quarry::{PlotKind, Presented, VisualizationModel, VisualizationRequest};

use super::{load_config, open_session, split_columns};

pub struct PlotArgs {
    pub file: PathBuf,
    pub kind: PlotKind,
    pub columns: Option<String>,
    pub rows: String,
    pub x: Option<String>,
    pub y: Option<String>,
    pub title: Option<String>,
    pub report: Option<u64>,
    pub reports: Option<PathBuf>,
    pub output: Option<PathBuf>,
}

pub fn run(args: PlotArgs, config: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let explorer = open_session(&args.file, load_config(config)?, args.reports.as_deref())?;

    let spec = explorer.select(&split_columns(args.columns.as_deref()), &args.rows)?;
    let mut request = VisualizationRequest::new(spec, args.kind).with_axes(args.x, args.y);
    if let Some(title) = args.title {
        request = request.with_title(title);
    }
    if let Some(id) = args.report {
        request = request.with_report(id);
    }

    let mut presented = Presented::new();
    explorer.visualize(&request, &mut presented);
    let model = presented.into_result()?;

    let text = serde_json::to_string_pretty(&model)?;
    match args.output {
        Some(path) => {
            fs::write(&path, text)?;
            println!(
                "{} {} model ({}) to {}",
                "Wrote".green().bold(),
                model.plot_kind(),
                describe(&model),
                path.display().to_string().white()
            );
        }
        None => println!("{}", text),
    }

    Ok(())
}

fn describe(model: &VisualizationModel) -> String {
    match model {
        VisualizationModel::PointPlot {
            points, outliers, ..
        } => format!("{} points, {} outliers", points.len(), outliers.len()),
        VisualizationModel::Heatmap {
            row_labels,
            col_labels,
            ..
        } => {
            format!("{}x{} cells", row_labels.len(), col_labels.len())
        }
    }
}
