//! CLI command implementations.

pub mod clean;
pub mod inspect;
pub mod plot;
pub mod rename;
pub mod summarize;

use std::path::{Path, PathBuf};

use colored::Colorize;
use quarry::{Explorer, JsonReportStore, QuarryConfig};

/// Load `--config`, or the defaults when it was not given.
pub fn load_config(path: Option<&Path>) -> Result<QuarryConfig, Box<dyn std::error::Error>> {
    Ok(match path {
        Some(path) => QuarryConfig::from_file(path)?,
        None => QuarryConfig::default(),
    })
}

/// Open `file` in a fresh session. Reports go to `reports` when given and
/// stay in memory otherwise.
pub fn open_session(
    file: &Path,
    config: QuarryConfig,
    reports: Option<&Path>,
) -> Result<Explorer, Box<dyn std::error::Error>> {
    if !file.exists() {
        return Err(format!("File not found: {}", file.display()).into());
    }

    let mut explorer = Explorer::new(config);
    if let Some(dir) = reports {
        explorer = explorer.with_report_store(JsonReportStore::new(dir));
    }
    explorer.open(file)?;
    Ok(explorer)
}

/// Split a comma-separated column list. `None` selects every column.
pub fn split_columns(columns: Option<&str>) -> Vec<String> {
    columns
        .map(|list| {
            list.split(',')
                .map(str::trim)
                .filter(|c| !c.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

/// `<dir>/<stem>_<suffix>.<ext>` next to `file`.
pub fn derived_path(file: &Path, suffix: &str) -> PathBuf {
    let stem = file.file_stem().unwrap_or_default().to_string_lossy();
    let ext = file
        .extension()
        .map(|e| e.to_string_lossy().into_owned())
        .unwrap_or_else(|| "csv".to_string());
    file.with_file_name(format!("{}_{}.{}", stem, suffix, ext))
}

/// Print the "Loaded ..." banner.
pub fn print_loaded(explorer: &Explorer) {
    if let Some(dataset) = explorer.dataset() {
        println!(
            "{} {} ({} rows, {} columns)",
            "Loaded".cyan().bold(),
            dataset.name.white(),
            dataset.row_count(),
            dataset.column_count()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_columns() {
        assert_eq!(split_columns(Some(" Age, ,NetWorth ")), vec!["Age", "NetWorth"]);
        assert!(split_columns(None).is_empty());
    }

    #[test]
    fn test_derived_path() {
        assert_eq!(
            derived_path(Path::new("/data/people.tsv"), "cleaned"),
            PathBuf::from("/data/people_cleaned.tsv")
        );
        assert_eq!(
            derived_path(Path::new("people"), "renamed"),
            PathBuf::from("people_renamed.csv")
        );
    }
}
