//! Report persistence: in-memory and JSON-file stores.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use tracing::debug;

use crate::error::{QuarryError, Result};
use crate::stats::SummaryReport;

/// Saves and retrieves summary reports by id.
pub trait ReportStore {
    /// Allocate an id for the next report.
    fn next_id(&mut self) -> Result<u64>;

    /// Persist a report.
    fn save(&mut self, report: &SummaryReport) -> Result<()>;

    /// Fetch a report. `Ok(None)` if no report has this id.
    fn get_by_id(&self, id: u64) -> Result<Option<SummaryReport>>;

    /// Ids of all stored reports, ascending.
    fn list_ids(&self) -> Result<Vec<u64>>;
}

/// Keeps reports in memory for the lifetime of the session.
#[derive(Debug, Default)]
pub struct InMemoryReportStore {
    reports: IndexMap<u64, SummaryReport>,
    last_id: u64,
}

impl InMemoryReportStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ReportStore for InMemoryReportStore {
    fn next_id(&mut self) -> Result<u64> {
        self.last_id += 1;
        Ok(self.last_id)
    }

    fn save(&mut self, report: &SummaryReport) -> Result<()> {
        self.last_id = self.last_id.max(report.id());
        self.reports.insert(report.id(), report.clone());
        Ok(())
    }

    fn get_by_id(&self, id: u64) -> Result<Option<SummaryReport>> {
        Ok(self.reports.get(&id).cloned())
    }

    fn list_ids(&self) -> Result<Vec<u64>> {
        let mut ids: Vec<u64> = self.reports.keys().copied().collect();
        ids.sort_unstable();
        Ok(ids)
    }
}

/// Stores each report as `report-<id>.json` in a directory.
#[derive(Debug, Clone)]
pub struct JsonReportStore {
    dir: PathBuf,
    reserved: u64,
}

impl JsonReportStore {
    /// Open a store rooted at `dir`. The directory is created on first save.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            reserved: 0,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl ReportStore for JsonReportStore {
    fn next_id(&mut self) -> Result<u64> {
        let highest = self.list_ids()?.last().copied().unwrap_or(0);
        self.reserved = self.reserved.max(highest) + 1;
        Ok(self.reserved)
    }

    fn save(&mut self, report: &SummaryReport) -> Result<()> {
        if !self.dir.exists() {
            fs::create_dir_all(&self.dir).map_err(|e| {
                QuarryError::Persistence(format!(
                    "Failed to create directory '{}': {}",
                    self.dir.display(),
                    e
                ))
            })?;
        }

        let path = report_path(&self.dir, report.id());
        let file = File::create(&path).map_err(|e| {
            QuarryError::Persistence(format!(
                "Failed to create file '{}': {}",
                path.display(),
                e
            ))
        })?;

        let writer = BufWriter::new(file);
        serde_json::to_writer_pretty(writer, report).map_err(|e| {
            QuarryError::Persistence(format!("Failed to serialize report {}: {}", report.id(), e))
        })?;

        debug!(id = report.id(), path = %path.display(), "saved report");
        Ok(())
    }

    fn get_by_id(&self, id: u64) -> Result<Option<SummaryReport>> {
        let path = report_path(&self.dir, id);
        if !path.exists() {
            return Ok(None);
        }

        let file = File::open(&path).map_err(|e| {
            QuarryError::Persistence(format!("Failed to open file '{}': {}", path.display(), e))
        })?;

        let reader = BufReader::new(file);
        let report = serde_json::from_reader(reader).map_err(|e| {
            QuarryError::Persistence(format!(
                "Failed to parse report '{}': {}",
                path.display(),
                e
            ))
        })?;

        Ok(Some(report))
    }

    fn list_ids(&self) -> Result<Vec<u64>> {
        if !self.dir.exists() {
            return Ok(Vec::new());
        }

        let mut ids: Vec<u64> = fs::read_dir(&self.dir)
            .map_err(|e| {
                QuarryError::Persistence(format!(
                    "Failed to read report directory '{}': {}",
                    self.dir.display(),
                    e
                ))
            })?
            .filter_map(|entry| entry.ok())
            .filter_map(|entry| {
                let name = entry.file_name();
                let name = name.to_str()?;
                name.strip_prefix("report-")?
                    .strip_suffix(".json")?
                    .parse::<u64>()
                    .ok()
            })
            .collect();

        ids.sort_unstable();
        Ok(ids)
    }
}

/// Path of the JSON file holding report `id`.
///
/// # Example
///
/// ```
/// use quarry::store::report_path;
///
/// let path = report_path("reports", 3);
/// assert_eq!(path.to_string_lossy(), "reports/report-3.json");
/// ```
pub fn report_path(dir: impl AsRef<Path>, id: u64) -> PathBuf {
    dir.as_ref().join(format!("report-{}.json", id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::DataSubsetSpec;

    fn report(id: u64) -> SummaryReport {
        SummaryReport::new(id, "r", DataSubsetSpec::new("s", ["a"], vec![0]), Vec::new())
    }

    #[test]
    fn test_in_memory_ids_and_lookup() {
        let mut store = InMemoryReportStore::new();
        let id = store.next_id().unwrap();
        assert_eq!(id, 1);
        store.save(&report(id)).unwrap();

        assert_eq!(store.get_by_id(1).unwrap().map(|r| r.id()), Some(1));
        assert!(store.get_by_id(2).unwrap().is_none());
        assert_eq!(store.next_id().unwrap(), 2);
        assert_eq!(store.list_ids().unwrap(), vec![1]);
    }

    #[test]
    fn test_json_store_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonReportStore::new(dir.path().join("reports"));

        assert!(store.list_ids().unwrap().is_empty());
        let id = store.next_id().unwrap();
        store.save(&report(id)).unwrap();

        let loaded = store.get_by_id(id).unwrap().unwrap();
        assert_eq!(loaded.id(), id);
        assert_eq!(loaded.name(), "r");
        assert_eq!(loaded.subset().column_names, vec!["a"]);
        assert_eq!(store.next_id().unwrap(), id + 1);
        assert!(store.get_by_id(99).unwrap().is_none());
    }

    #[test]
    fn test_json_store_ignores_foreign_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("notes.txt"), "hello").unwrap();
        fs::write(dir.path().join("report-x.json"), "{}").unwrap();
        let store = JsonReportStore::new(dir.path());
        assert!(store.list_ids().unwrap().is_empty());
    }

    #[test]
    fn test_json_store_rejects_corrupt_report() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(report_path(dir.path(), 4), "not json").unwrap();
        let store = JsonReportStore::new(dir.path());
        assert!(matches!(store.get_by_id(4), Err(QuarryError::Persistence(_))));
    }
}
