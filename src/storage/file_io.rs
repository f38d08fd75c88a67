//! Table file I/O with atomic writes
//!
//! Tables are stored one record per line, cells separated by `;`, without a
//! header row. Writes go to a temporary file that is renamed over the
//! original, so a table file is either fully written or untouched.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use csv::{ReaderBuilder, WriterBuilder};

use crate::error::ErpError;
use crate::models::{Row, Table};

/// Cell delimiter of table files
pub const DELIMITER: u8 = b';';

/// Read a table file, returning an empty table if the file doesn't exist
pub fn read_table<P: AsRef<Path>>(path: P) -> Result<Table, ErpError> {
    let path = path.as_ref();

    if !path.exists() {
        return Ok(Table::new());
    }

    let file = File::open(path)
        .map_err(|e| ErpError::Storage(format!("Failed to open {}: {}", path.display(), e)))?;

    let mut reader = ReaderBuilder::new()
        .delimiter(DELIMITER)
        .has_headers(false)
        .flexible(true)
        .from_reader(BufReader::new(file));

    let mut table = Table::new();
    for (line_num, record) in reader.records().enumerate() {
        let record = record.map_err(|e| {
            ErpError::Storage(format!(
                "Failed to parse {} at line {}: {}",
                path.display(),
                line_num + 1,
                e
            ))
        })?;
        table.push(Row::from_cells(record.iter()));
    }

    Ok(table)
}

/// Write a table file atomically (write to temp, then rename)
pub fn write_table_atomic<P: AsRef<Path>>(path: P, table: &Table) -> Result<(), ErpError> {
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            ErpError::Storage(format!(
                "Failed to create directory {}: {}",
                parent.display(),
                e
            ))
        })?;
    }

    // Same directory as the target so the rename stays on one filesystem
    let temp_path = path.with_extension("csv.tmp");

    let file = File::create(&temp_path)
        .map_err(|e| ErpError::Storage(format!("Failed to create temp file: {}", e)))?;

    let mut writer = WriterBuilder::new()
        .delimiter(DELIMITER)
        .has_headers(false)
        .flexible(true)
        .from_writer(BufWriter::new(file));

    for row in table {
        writer
            .write_record(row.cells())
            .map_err(|e| ErpError::Storage(format!("Failed to write record {}: {}", row.id(), e)))?;
    }

    let mut inner = writer
        .into_inner()
        .map_err(|e| ErpError::Storage(format!("Failed to flush data: {}", e)))?;

    inner
        .flush()
        .map_err(|e| ErpError::Storage(format!("Failed to flush data: {}", e)))?;

    inner
        .get_ref()
        .sync_all()
        .map_err(|e| ErpError::Storage(format!("Failed to sync data: {}", e)))?;

    drop(inner);

    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        ErpError::Storage(format!("Failed to rename temp file: {}", e))
    })?;

    Ok(())
}
