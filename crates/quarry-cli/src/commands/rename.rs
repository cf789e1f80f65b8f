//! Rename command - change a column header.

use std::path::{Path, PathBuf};

use colored::Colorize;

use super::{derived_path, load_config, open_session};

pub fn run(
    file: PathBuf,
    column: String,
    header: String,
    output: Option<PathBuf>,
    config: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut explorer = open_session(&file, load_config(config)?, None)?;
    let dataset = explorer.dataset().ok_or("No dataset was loaded")?;

    let index = match column.trim().parse::<usize>() {
        Ok(index) => index,
        Err(_) => dataset
            .column_index(&column)
            .ok_or_else(|| format!("Unknown column: '{}'", column))?,
    };
    let old = dataset
        .column(index)
        .map(|c| c.header.clone())
        .ok_or_else(|| format!("Column {} does not exist", index))?;

    explorer.edit_header(index, Some(&header))?;
    println!(
        "{} '{}' -> '{}'",
        "Renamed".cyan().bold(),
        old,
        header.trim().white().bold()
    );

    let output = output.unwrap_or_else(|| derived_path(&file, "renamed"));
    explorer.export(&output)?;
    println!(
        "{} {}",
        "Wrote".green().bold(),
        output.display().to_string().white()
    );

    Ok(())
}
