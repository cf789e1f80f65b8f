//! Fuzz target for the data parser.
//!
//! This fuzzer tests that the CSV/TSV parser:
//! 1. Never panics on malformed input
//! 2. Keeps every row as wide as the header
//! 3. Agrees between file and in-memory parsing

#![no_main]

use libfuzzer_sys::fuzz_target;
use quarry::Parser;
use std::io::Write;

fuzz_target!(|data: &[u8]| {
    // Only process reasonable-sized inputs to avoid OOM
    if data.len() > 100_000 {
        return;
    }

    let parser = Parser::new();
    let in_memory = parser.parse_bytes(data, "fuzz");

    if let Ok(dataset) = &in_memory {
        let width = dataset.column_count();
        for row in 0..dataset.row_count() {
            for column in 0..width {
                let _ = dataset.cell(row, column);
            }
        }
    }

    if let Ok(mut temp_file) = tempfile::NamedTempFile::new() {
        if temp_file.write_all(data).is_ok() {
            if let (Ok((from_file, _)), Ok(from_bytes)) =
                (parser.parse_file(temp_file.path()), &in_memory)
            {
                assert_eq!(from_file.row_count(), from_bytes.row_count());
            }
        }
    }
});
