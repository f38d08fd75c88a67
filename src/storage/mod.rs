//! Storage layer for erp-cli
//!
//! Holds every manager's table in memory, loads them from their `;`-separated
//! files and writes changed tables back atomically. Mutations are recorded in
//! the audit log when auditing is enabled.

pub mod file_io;
pub mod init;

pub use file_io::{read_table, write_table_atomic};
pub use init::{initialize_storage, needs_initialization};

use std::collections::BTreeSet;

use crate::audit::{generate_row_diff, AuditEntry, AuditLogger};
use crate::config::paths::ErpPaths;
use crate::config::settings::Settings;
use crate::error::ErpError;
use crate::models::{Row, Table, TableKind};

/// Main storage coordinator that provides access to all tables
pub struct Storage {
    paths: ErpPaths,
    tables: [Table; 8],
    dirty: BTreeSet<TableKind>,
    audit: Option<AuditLogger>,
}

impl Storage {
    /// Create a Storage instance with empty tables and auditing enabled
    pub fn new(paths: ErpPaths) -> Result<Self, ErpError> {
        paths.ensure_directories()?;

        Ok(Self {
            audit: Some(AuditLogger::new(paths.audit_log())),
            tables: std::array::from_fn(|_| Table::new()),
            dirty: BTreeSet::new(),
            paths,
        })
    }

    /// Create a Storage instance and load every table from disk
    pub fn open(paths: ErpPaths, settings: &Settings) -> Result<Self, ErpError> {
        let mut storage = Self::new(paths)?;
        if !settings.audit_enabled {
            storage.audit = None;
        }
        storage.load_all()?;
        Ok(storage)
    }

    /// Get the paths configuration
    pub fn paths(&self) -> &ErpPaths {
        &self.paths
    }

    /// Load all tables from disk, discarding unsaved changes
    pub fn load_all(&mut self) -> Result<(), ErpError> {
        for kind in TableKind::ALL {
            self.tables[kind.index()] = read_table(self.paths.table_file(kind.file_name()))?;
        }
        self.dirty.clear();
        Ok(())
    }

    pub fn table(&self, kind: TableKind) -> &Table {
        &self.tables[kind.index()]
    }

    /// Mutable access to a table; the table is written on the next save
    pub fn table_mut(&mut self, kind: TableKind) -> &mut Table {
        self.dirty.insert(kind);
        &mut self.tables[kind.index()]
    }

    /// Check whether a table has unsaved changes
    pub fn is_dirty(&self, kind: TableKind) -> bool {
        self.dirty.contains(&kind)
    }

    /// Write one table to disk
    pub fn save(&mut self, kind: TableKind) -> Result<(), ErpError> {
        write_table_atomic(
            self.paths.table_file(kind.file_name()),
            &self.tables[kind.index()],
        )?;
        self.dirty.remove(&kind);
        Ok(())
    }

    /// Write every table with unsaved changes to disk
    pub fn save_all(&mut self) -> Result<(), ErpError> {
        let pending: Vec<TableKind> = self.dirty.iter().copied().collect();
        for kind in pending {
            self.save(kind)?;
        }
        Ok(())
    }

    /// The audit logger, if auditing is enabled
    pub fn audit(&self) -> Option<&AuditLogger> {
        self.audit.as_ref()
    }

    /// Record an added row in the audit log
    pub fn log_create(&self, kind: TableKind, row: &Row) -> Result<(), ErpError> {
        match &self.audit {
            Some(logger) => logger.log(&AuditEntry::create(kind, row)),
            None => Ok(()),
        }
    }

    /// Record an updated row in the audit log, with a diff of changed cells
    pub fn log_update(
        &self,
        kind: TableKind,
        headers: &[String],
        before: &Row,
        after: &Row,
    ) -> Result<(), ErpError> {
        match &self.audit {
            Some(logger) => {
                let diff = generate_row_diff(headers, before, after);
                logger.log(&AuditEntry::update(kind, before, after, diff))
            }
            None => Ok(()),
        }
    }

    /// Record a removed row in the audit log
    pub fn log_delete(&self, kind: TableKind, row: &Row) -> Result<(), ErpError> {
        match &self.audit {
            Some(logger) => logger.log(&AuditEntry::delete(kind, row)),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_storage() -> (Storage, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let paths = ErpPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::open(paths, &Settings::default()).unwrap();
        (storage, temp_dir)
    }

    #[test]
    fn test_storage_creation() {
        let (storage, temp_dir) = create_storage();

        assert!(temp_dir.path().join("data").exists());
        assert!(!temp_dir.path().join("config.json").exists());
        for kind in TableKind::ALL {
            assert!(storage.table(kind).is_empty());
        }
    }

    #[test]
    fn test_save_all_writes_only_dirty_tables() {
        let (mut storage, temp_dir) = create_storage();

        storage
            .table_mut(TableKind::Store)
            .push(Row::from_cells(["kH34Ju#&", "Age of Empires II", "Microsoft", "43", "4"]));
        assert!(storage.is_dirty(TableKind::Store));

        storage.save_all().unwrap();

        assert!(!storage.is_dirty(TableKind::Store));
        assert!(temp_dir.path().join("data/store/games.csv").exists());
        assert!(!temp_dir.path().join("data/sales/sales.csv").exists());
    }

    #[test]
    fn test_reload_after_save() {
        let (mut storage, temp_dir) = create_storage();
        storage
            .table_mut(TableKind::Hr)
            .push(Row::from_cells(["kH14Ju#&", "Joe Doe", "1980"]));
        storage.save(TableKind::Hr).unwrap();

        let paths = ErpPaths::with_base_dir(temp_dir.path().to_path_buf());
        let reopened = Storage::open(paths, &Settings::default()).unwrap();
        assert_eq!(reopened.table(TableKind::Hr).len(), 1);
        assert_eq!(
            reopened.table(TableKind::Hr).get(0).unwrap().cell(1),
            Some("Joe Doe")
        );
    }

    #[test]
    fn test_audit_disabled() {
        let temp_dir = TempDir::new().unwrap();
        let paths = ErpPaths::with_base_dir(temp_dir.path().to_path_buf());
        let settings = Settings {
            audit_enabled: false,
            ..Settings::default()
        };
        let storage = Storage::open(paths, &settings).unwrap();

        let row = Row::from_cells(["a", "b"]);
        storage.log_create(TableKind::Crm, &row).unwrap();

        assert!(storage.audit().is_none());
        assert!(!temp_dir.path().join("audit.log").exists());
    }

    #[test]
    fn test_audit_records_update_diff() {
        let (storage, _temp) = create_storage();
        let headers = vec!["ID".to_string(), "Name".to_string()];
        let before = Row::from_cells(["a", "Old"]);
        let after = Row::from_cells(["a", "New"]);

        storage
            .log_update(TableKind::Partners, &headers, &before, &after)
            .unwrap();

        let entries = storage.audit().unwrap().read_all().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(
            entries[0].diff_summary.as_deref(),
            Some("Name: \"Old\" -> \"New\"")
        );
    }
}
