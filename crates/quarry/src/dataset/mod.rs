//! Tabular data model: columns, rows, and subset views.

mod subset;
mod table;
mod types;

pub use subset::{DataSubsetData, DataSubsetSpec, parse_row_selection};
pub use table::{Column, DataRow, Dataset};
pub use types::ColumnType;
