//! Write the current table back out as delimited text.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use tracing::info;

use crate::dataset::Dataset;
use crate::error::{QuarryError, Result};

/// Write `dataset` to `path` with a header row. Missing cells become empty
/// fields.
pub fn write_dataset(dataset: &Dataset, path: impl AsRef<Path>, delimiter: u8) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|e| QuarryError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    write_to(dataset, file, delimiter)?;
    info!(path = %path.display(), rows = dataset.row_count(), "wrote dataset");
    Ok(())
}

fn write_to<W: Write>(dataset: &Dataset, writer: W, delimiter: u8) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(writer);

    wtr.write_record(dataset.headers())?;
    for row in dataset.rows() {
        wtr.write_record(row.cells.iter().map(|c| c.as_deref().unwrap_or("")))?;
    }

    wtr.flush().map_err(|e| QuarryError::Persistence(format!("Failed to flush output: {}", e)))?;
    Ok(())
}
