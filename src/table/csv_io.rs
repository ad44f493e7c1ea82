//! CSV reading and writing for table frames
//!
//! The CSV layer is the only place that knows about files; everything else
//! works on [`TableFrame`]. Empty fields map to null cells on the way in and
//! back to empty fields on the way out.

use super::frame::TableFrame;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

/// Errors from reading or writing a table.
#[derive(Debug, Error)]
pub enum TableError {
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Read a CSV file (first row is the header) into a frame.
pub fn read_frame(path: impl AsRef<Path>) -> Result<TableFrame, TableError> {
    let path = path.as_ref();
    let mut reader = csv::Reader::from_path(path)?;
    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    let mut frame = TableFrame::new(headers);
    for record in reader.records() {
        let record = record?;
        let row = record
            .iter()
            .map(|field| {
                if field.is_empty() {
                    None
                } else {
                    Some(field.to_string())
                }
            })
            .collect();
        frame.push_row(row);
    }
    debug!("read {} rows from {}", frame.row_count(), path.display());
    Ok(frame)
}

/// Write a frame as CSV, header row first.
pub fn write_frame(frame: &TableFrame, path: impl AsRef<Path>) -> Result<(), TableError> {
    let path = path.as_ref();
    if frame.columns().is_empty() {
        // A frame with no columns still produces a (blank) file
        std::fs::File::create(path)?;
        return Ok(());
    }
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(frame.columns())?;
    for row in frame.rows() {
        writer.write_record(row.iter().map(|cell| cell.as_deref().unwrap_or("")))?;
    }
    writer.flush()?;
    debug!("wrote {} rows to {}", frame.row_count(), path.display());
    Ok(())
}
