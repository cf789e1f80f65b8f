//! Collaborator boundaries: the current table, subset loading, and report
//! persistence.
//!
//! Stores assume a single writer; callers that add concurrency must keep a
//! single owner in front of them.

mod reports;
mod table;

pub use reports::{InMemoryReportStore, JsonReportStore, ReportStore, report_path};
pub use table::{CurrentTable, SubsetSource, TableStore};
