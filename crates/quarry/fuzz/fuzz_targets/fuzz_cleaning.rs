//! Fuzz target for cell cleaning.
//!
//! Cleaning must never panic, must be idempotent, and must only keep
//! numeric values that parse back to finite numbers.

#![no_main]

use libfuzzer_sys::fuzz_target;
use quarry::{ColumnType, DataCleaner};

fuzz_target!(|data: &[u8]| {
    if data.len() > 10_000 {
        return;
    }

    let Ok(raw) = std::str::from_utf8(data) else {
        return;
    };

    let cleaner = DataCleaner::default();
    for column_type in [
        ColumnType::Numeric,
        ColumnType::Boolean,
        ColumnType::Date,
        ColumnType::Categorical,
    ] {
        let once = cleaner.clean_value(column_type, Some(raw));
        let twice = cleaner.clean_value(column_type, once.as_deref());
        assert_eq!(once, twice);

        if column_type == ColumnType::Numeric {
            if let Some(value) = &once {
                assert!(value.parse::<f64>().is_ok_and(f64::is_finite));
            }
        }
    }
});
