//! Delimited output of consolidated rows.

use std::io::Write;
use std::path::Path;

use serde::Serialize;

use crate::IngestError;

/// Writes `rows` as CSV with a header row taken from the field names.
///
/// # Errors
///
/// Returns [`IngestError::Csv`] if serialization or the underlying writer
/// fails.
pub fn write_rows<W: Write, T: Serialize>(writer: W, rows: &[T]) -> Result<(), IngestError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for row in rows {
        csv_writer.serialize(row)?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Writes `rows` to the CSV file at `path`, creating parent directories.
///
/// # Errors
///
/// Returns [`IngestError::Io`] if the file cannot be created, or
/// [`IngestError::Csv`] if writing fails.
pub fn write_csv<T: Serialize>(path: &Path, rows: &[T]) -> Result<(), IngestError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let file = std::fs::File::create(path)?;
    write_rows(std::io::BufWriter::new(file), rows)?;
    log::info!("Wrote {} rows to {}", rows.len(), path.display());
    Ok(())
}
