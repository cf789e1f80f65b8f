//! Clean command - downgrade invalid cells to missing and write the result.

use std::path::{Path, PathBuf};

use colored::Colorize;

use super::{derived_path, load_config, open_session, print_loaded};

pub fn run(
    file: PathBuf,
    output: Option<PathBuf>,
    config: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut explorer = open_session(&file, load_config(config)?, None)?;
    print_loaded(&explorer);

    let changes = explorer.clean_entire_dataset()?;
    if changes.is_empty() {
        println!("{} every cell matches its column type", "Clean:".green().bold());
    } else {
        println!(
            "{} {} cells downgraded to missing",
            "Cleaned:".yellow().bold(),
            changes.len().to_string().white().bold()
        );
        for change in &changes {
            println!("  row {:>6}  {}", change.row_index, change.column_header);
        }
    }

    let output = output.unwrap_or_else(|| derived_path(&file, "cleaned"));
    explorer.export(&output)?;
    println!(
        "{} {}",
        "Wrote".green().bold(),
        output.display().to_string().white()
    );

    Ok(())
}
