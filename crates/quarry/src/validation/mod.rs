//! Per-type value validators and column type inference.

mod infer;
mod validators;

pub use infer::{InferenceConfig, infer_column_type};
pub use validators::{
    BooleanValidator, CategoricalValidator, DEFAULT_DATE_FORMAT, DateValidator, NumericValidator,
    TypeValidator, ValidatorSet, parse_number,
};
