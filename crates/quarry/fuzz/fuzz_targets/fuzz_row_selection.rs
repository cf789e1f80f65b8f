//! Fuzz target for row selection expressions.
//!
//! Accepted selections must only name rows inside the table.

#![no_main]

use libfuzzer_sys::fuzz_target;
use quarry::dataset::parse_row_selection;

fuzz_target!(|input: (&str, u16)| {
    let (expr, row_count) = input;
    let row_count = usize::from(row_count);

    if let Ok(rows) = parse_row_selection(expr, row_count) {
        assert!(rows.iter().all(|&r| r < row_count));
    }
});
