//! Append-only JSONL audit log
//!
//! One JSON object per line. Entries are appended and flushed as they
//! happen; reading tolerates blank lines and a log that was never written.

use std::collections::VecDeque;
use std::fs::{File, OpenOptions};
use std::io::{self, BufRead, BufReader, Write};
use std::path::PathBuf;

use crate::error::{ErpError, ErpResult};

use super::entry::AuditEntry;

/// Writes and reads the audit log of table changes
pub struct AuditLogger {
    log_path: PathBuf,
}

impl AuditLogger {
    pub fn new(log_path: PathBuf) -> Self {
        Self { log_path }
    }

    /// Append one entry and flush it
    pub fn log(&self, entry: &AuditEntry) -> ErpResult<()> {
        let line = serde_json::to_string(entry)
            .map_err(|e| ErpError::Json(format!("Failed to serialize audit entry: {}", e)))?;

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)
            .map_err(|e| ErpError::Io(format!("Failed to open audit log: {}", e)))?;
        writeln!(file, "{}", line)
            .and_then(|_| file.flush())
            .map_err(|e| ErpError::Io(format!("Failed to write audit entry: {}", e)))
    }

    /// Every entry, oldest first
    pub fn read_all(&self) -> ErpResult<Vec<AuditEntry>> {
        let mut entries = Vec::new();
        self.for_each_entry(|entry| entries.push(entry))?;
        Ok(entries)
    }

    /// The last `count` entries, oldest first
    pub fn read_recent(&self, count: usize) -> ErpResult<Vec<AuditEntry>> {
        let mut recent = VecDeque::with_capacity(count);
        self.for_each_entry(|entry| {
            if count == 0 {
                return;
            }
            if recent.len() == count {
                recent.pop_front();
            }
            recent.push_back(entry);
        })?;
        Ok(recent.into())
    }

    fn for_each_entry<F>(&self, mut visit: F) -> ErpResult<()>
    where
        F: FnMut(AuditEntry),
    {
        let file = match File::open(&self.log_path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(()),
            Err(e) => return Err(ErpError::Io(format!("Failed to open audit log: {}", e))),
        };

        for (index, line) in BufReader::new(file).lines().enumerate() {
            let line_num = index + 1;
            let line = line.map_err(|e| {
                ErpError::Io(format!("Failed to read audit log line {}: {}", line_num, e))
            })?;
            if line.trim().is_empty() {
                continue;
            }
            let entry = serde_json::from_str(&line).map_err(|e| {
                ErpError::Json(format!("Bad audit entry at line {}: {}", line_num, e))
            })?;
            visit(entry);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::entry::Operation;
    use crate::models::{Row, TableKind};
    use tempfile::TempDir;

    fn create_test_logger() -> (AuditLogger, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let log_path = temp_dir.path().join("audit.log");
        let logger = AuditLogger::new(log_path);
        (logger, temp_dir)
    }

    fn customer(id: &str) -> Row {
        Row::from_cells([id, "Lieselotte Rainey", "hv8@qsuotla508.com", "1"])
    }

    #[test]
    fn test_log_and_read() {
        let (logger, _temp) = create_test_logger();
        let entry = AuditEntry::create(TableKind::Crm, &customer("kH38Jm#&"));

        logger.log(&entry).unwrap();

        let entries = logger.read_all().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].operation, Operation::Create);
        assert_eq!(entries[0].table, TableKind::Crm);
    }

    #[test]
    fn test_read_recent_keeps_the_tail() {
        let (logger, _temp) = create_test_logger();

        for i in 0..10 {
            let entry = AuditEntry::create(TableKind::Crm, &customer(&format!("id-{}", i)));
            logger.log(&entry).unwrap();
        }

        let recent = logger.read_recent(3).unwrap();
        let ids: Vec<&str> = recent.iter().map(|e| e.record_id.as_str()).collect();
        assert_eq!(ids, ["id-7", "id-8", "id-9"]);
        assert_eq!(logger.read_recent(50).unwrap().len(), 10);
        assert!(logger.read_recent(0).unwrap().is_empty());
    }

    #[test]
    fn test_missing_log_reads_empty() {
        let (logger, temp) = create_test_logger();

        assert!(logger.read_all().unwrap().is_empty());
        assert!(logger.read_recent(5).unwrap().is_empty());
        assert!(!temp.path().join("audit.log").exists());
    }

    #[test]
    fn test_blank_lines_skipped_and_garbage_reported() {
        let (logger, temp) = create_test_logger();
        logger
            .log(&AuditEntry::create(TableKind::Store, &customer("a")))
            .unwrap();
        let path = temp.path().join("audit.log");
        let mut contents = std::fs::read_to_string(&path).unwrap();
        contents.push('\n');
        std::fs::write(&path, &contents).unwrap();
        assert_eq!(logger.read_all().unwrap().len(), 1);

        contents.push_str("not json\n");
        std::fs::write(&path, contents).unwrap();
        assert!(matches!(logger.read_all(), Err(ErpError::Json(msg)) if msg.contains("line 3")));
    }

    #[test]
    fn test_update_and_delete_logged() {
        let (logger, _temp) = create_test_logger();
        let before = customer("kH38Jm#&");
        let after = Row::from_cells(["kH38Jm#&", "Lieselotte Rainey", "hv8@qsuotla508.com", "0"]);

        logger
            .log(&AuditEntry::update(TableKind::Crm, &before, &after, None))
            .unwrap();
        logger.log(&AuditEntry::delete(TableKind::Crm, &after)).unwrap();

        let entries = logger.read_all().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].operation, Operation::Update);
        assert_eq!(entries[0].before, Some(before));
        assert_eq!(entries[1].operation, Operation::Delete);
        assert!(entries[1].after.is_none());
    }

    #[test]
    fn test_survives_restart() {
        let (logger, temp) = create_test_logger();
        logger
            .log(&AuditEntry::create(TableKind::Hr, &customer("a")))
            .unwrap();

        let logger2 = AuditLogger::new(temp.path().join("audit.log"));
        assert_eq!(logger2.read_all().unwrap().len(), 1);
    }
}
