//! Inspect command - show columns, declared types, and missing counts.

use std::path::{Path, PathBuf};

use colored::Colorize;

use super::{load_config, open_session};

pub fn run(
    file: PathBuf,
    json_output: bool,
    config: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let explorer = open_session(&file, load_config(config)?, None)?;
    let dataset = explorer.dataset().ok_or("No dataset was loaded")?;

    let missing = explorer.find_missing_cells()?;
    let missing_in = |header: &str| missing.iter().filter(|m| m.column_header == header).count();

    if json_output {
        let columns: Vec<_> = dataset
            .columns()
            .iter()
            .map(|c| {
                serde_json::json!({
                    "header": c.header,
                    "type": c.column_type,
                    "missing": missing_in(&c.header),
                })
            })
            .collect();
        let report = serde_json::json!({
            "source": explorer.source(),
            "rows": dataset.row_count(),
            "columns": columns,
            "missing_cells": missing.len(),
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!(
        "{} {}",
        "Inspecting".cyan().bold(),
        file.display().to_string().white()
    );
    if let Some(source) = explorer.source() {
        println!("  Format: {}  Size: {} bytes", source.format, source.size_bytes);
        println!("  Hash:   {}", source.hash.dimmed());
    }
    println!(
        "  Rows:   {}  Columns: {}",
        dataset.row_count().to_string().white().bold(),
        dataset.column_count().to_string().white().bold()
    );
    println!();

    println!("{}", "Columns:".yellow().bold());
    for (idx, column) in dataset.columns().iter().enumerate() {
        let count = missing_in(&column.header);
        let missing_text = if count == 0 {
            "0".green()
        } else {
            count.to_string().yellow()
        };
        println!(
            "  {:>3}  {:24} {:12} missing: {}",
            idx,
            column.header,
            column.column_type.label(),
            missing_text
        );
    }

    Ok(())
}
