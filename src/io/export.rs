//! Export the latest-per-country snapshot to CSV.
//!
//! The export uses the same column layout as the input file, so it can be fed
//! straight back into `covid-dash` or opened in a spreadsheet.

use std::path::Path;

use tracing::info;

use crate::domain::Record;
use crate::error::{AppError, write_error};

/// Write snapshot rows to a CSV file (header is always written).
pub fn write_snapshot_csv(path: &Path, rows: &[Record]) -> Result<(), AppError> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .map_err(|e| write_error(path, e))?;

    // Serde-driven headers are skipped when there are no rows; write them explicitly.
    writer
        .write_record(crate::io::ingest::REQUIRED_COLUMNS)
        .map_err(|e| write_error(path, e))?;
    for r in rows {
        writer.serialize(r).map_err(|e| write_error(path, e))?;
    }
    writer.flush().map_err(|e| write_error(path, e))?;

    info!(path = %path.display(), rows = rows.len(), "exported latest snapshot");
    Ok(())
}
