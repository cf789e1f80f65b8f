//! Quarry CLI - load, clean, summarize, and plot tabular data.

mod cli;
mod commands;
mod logging;

use clap::Parser;
use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let config = cli.config.as_deref();
    let result = match cli.command {
        Commands::Inspect { file, json } => commands::inspect::run(file, json, config),

        Commands::Clean { file, output } => commands::clean::run(file, output, config),

        Commands::Rename {
            file,
            column,
            header,
            output,
        } => commands::rename::run(file, column, header, output, config),

        Commands::Summarize {
            file,
            columns,
            rows,
            name,
            reports,
            heatmap,
            json,
        } => commands::summarize::run(
            commands::summarize::SummarizeArgs {
                file,
                columns,
                rows,
                name,
                reports,
                heatmap,
                json,
            },
            config,
        ),

        Commands::Plot {
            file,
            kind,
            columns,
            rows,
            x,
            y,
            title,
            report,
            reports,
            output,
        } => commands::plot::run(
            commands::plot::PlotArgs {
                file,
                kind,
                columns,
                rows,
                x,
                y,
                title,
                report,
                reports,
                output,
            },
            config,
        ),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
