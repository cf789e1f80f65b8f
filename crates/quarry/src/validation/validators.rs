//! Validators deciding whether a trimmed cell value fits a declared type.

use chrono::NaiveDate;

use crate::dataset::ColumnType;

/// Date pattern used when none is configured.
pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d";

/// Trait for type validators.
///
/// Callers pass a trimmed, non-empty value; validators are pure predicates.
pub trait TypeValidator: Send + Sync {
    /// Returns true if the value is acceptable for this type.
    fn is_valid(&self, value: &str) -> bool;
}

/// Accepts finite floating-point numbers.
#[derive(Debug, Clone, Copy, Default)]
pub struct NumericValidator;

impl TypeValidator for NumericValidator {
    fn is_valid(&self, value: &str) -> bool {
        parse_number(value).is_some()
    }
}

/// Accepts `true` or `false`, ignoring case.
#[derive(Debug, Clone, Copy, Default)]
pub struct BooleanValidator;

impl TypeValidator for BooleanValidator {
    fn is_valid(&self, value: &str) -> bool {
        value.eq_ignore_ascii_case("true") || value.eq_ignore_ascii_case("false")
    }
}

/// Accepts dates in a single fixed pattern.
#[derive(Debug, Clone)]
pub struct DateValidator {
    format: String,
}

impl DateValidator {
    /// Create a validator for a chrono format string.
    pub fn new(format: impl Into<String>) -> Self {
        Self {
            format: format.into(),
        }
    }
}

impl Default for DateValidator {
    fn default() -> Self {
        Self::new(DEFAULT_DATE_FORMAT)
    }
}

impl TypeValidator for DateValidator {
    fn is_valid(&self, value: &str) -> bool {
        NaiveDate::parse_from_str(value, &self.format).is_ok()
    }
}

/// Accepts any non-empty string.
#[derive(Debug, Clone, Copy, Default)]
pub struct CategoricalValidator;

impl TypeValidator for CategoricalValidator {
    fn is_valid(&self, value: &str) -> bool {
        !value.is_empty()
    }
}

/// The type → validator mapping handed to the cleaner and the stores.
pub struct ValidatorSet {
    numeric: Box<dyn TypeValidator>,
    boolean: Box<dyn TypeValidator>,
    date: Box<dyn TypeValidator>,
    categorical: Box<dyn TypeValidator>,
}

impl ValidatorSet {
    /// The standard validators with the given date pattern.
    pub fn new(date_format: &str) -> Self {
        Self {
            numeric: Box::new(NumericValidator),
            boolean: Box::new(BooleanValidator),
            date: Box::new(DateValidator::new(date_format)),
            categorical: Box::new(CategoricalValidator),
        }
    }

    /// Replace the validator used for one column type.
    pub fn with_validator(
        mut self,
        column_type: ColumnType,
        validator: impl TypeValidator + 'static,
    ) -> Self {
        let slot = match column_type {
            ColumnType::Numeric => &mut self.numeric,
            ColumnType::Boolean => &mut self.boolean,
            ColumnType::Date => &mut self.date,
            ColumnType::Categorical => &mut self.categorical,
        };
        *slot = Box::new(validator);
        self
    }

    /// Get the validator for a column type.
    pub fn for_type(&self, column_type: ColumnType) -> &dyn TypeValidator {
        match column_type {
            ColumnType::Numeric => self.numeric.as_ref(),
            ColumnType::Boolean => self.boolean.as_ref(),
            ColumnType::Date => self.date.as_ref(),
            ColumnType::Categorical => self.categorical.as_ref(),
        }
    }

    /// Check a trimmed value against a column type.
    pub fn is_valid(&self, column_type: ColumnType, value: &str) -> bool {
        self.for_type(column_type).is_valid(value)
    }
}

impl Default for ValidatorSet {
    fn default() -> Self {
        Self::new(DEFAULT_DATE_FORMAT)
    }
}

impl std::fmt::Debug for ValidatorSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValidatorSet").finish_non_exhaustive()
    }
}

/// Parse a trimmed value as a finite number.
///
/// `NaN` and infinities parse under Rust's float grammar but are rejected so
/// they never reach the statistics.
pub fn parse_number(value: &str) -> Option<f64> {
    value.parse::<f64>().ok().filter(|v| v.is_finite())
}
