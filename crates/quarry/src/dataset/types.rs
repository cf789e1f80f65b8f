//! Declared column types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Declared data type for a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnType {
    /// Floating-point numbers.
    Numeric,
    /// `true` / `false`, case-insensitive.
    Boolean,
    /// Calendar dates.
    Date,
    /// Any non-empty text.
    Categorical,
}

impl ColumnType {
    /// Returns true if this type is numeric.
    pub fn is_numeric(&self) -> bool {
        matches!(self, ColumnType::Numeric)
    }

    /// Get a human-readable label for the type.
    pub fn label(&self) -> &'static str {
        match self {
            ColumnType::Numeric => "Numeric",
            ColumnType::Boolean => "Boolean",
            ColumnType::Date => "Date",
            ColumnType::Categorical => "Categorical",
        }
    }
}

impl Default for ColumnType {
    fn default() -> Self {
        ColumnType::Categorical
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
