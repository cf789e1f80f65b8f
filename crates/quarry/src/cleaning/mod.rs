//! Cell cleaning and header maintenance.
//!
//! Cell cleaning never fails on bad input: a value the column's validator
//! rejects is stored as missing. Header edits fail loudly instead.

mod cleaner;
mod headers;

pub use cleaner::{CellLocation, DataCleaner};
pub use headers::{HeaderIndex, normalize_header};
