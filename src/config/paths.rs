//! Path management for erp-cli
//!
//! Resolves where settings, table files and the audit log live.
//!
//! ## Path Resolution Order
//!
//! 1. `ERP_CLI_DATA_DIR` environment variable (if set)
//! 2. The platform configuration directory joined with `erp-cli`
//!    (`~/.config/erp-cli` on Linux, `%APPDATA%\erp-cli` on Windows)

use std::path::PathBuf;

use crate::error::ErpError;

/// Environment variable overriding the base directory
pub const DATA_DIR_ENV: &str = "ERP_CLI_DATA_DIR";

/// Manages all paths used by erp-cli
#[derive(Debug, Clone)]
pub struct ErpPaths {
    /// Base directory for all erp-cli data
    base_dir: PathBuf,
}

impl ErpPaths {
    /// Create a new ErpPaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if no configuration directory can be determined.
    pub fn new() -> Result<Self, ErpError> {
        let base_dir = if let Ok(custom) = std::env::var(DATA_DIR_ENV) {
            PathBuf::from(custom)
        } else {
            resolve_default_path()?
        };

        Ok(Self { base_dir })
    }

    /// Create ErpPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the data directory holding one sub-directory per manager
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to the audit log
    pub fn audit_log(&self) -> PathBuf {
        self.base_dir.join("audit.log")
    }

    /// Get the path of a table file relative to the data directory
    pub fn table_file(&self, relative: &str) -> PathBuf {
        self.data_dir().join(relative)
    }

    /// Ensure the base and data directories exist
    pub fn ensure_directories(&self) -> Result<(), ErpError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| ErpError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| ErpError::Io(format!("Failed to create data directory: {}", e)))?;

        Ok(())
    }

    /// Check if erp-cli has been initialized (config file exists)
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}

/// Resolve the default base directory from the platform conventions
fn resolve_default_path() -> Result<PathBuf, ErpError> {
    directories::BaseDirs::new()
        .map(|dirs| dirs.config_dir().join("erp-cli"))
        .ok_or_else(|| ErpError::Config("Could not determine a configuration directory".into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_custom_base_dir() {
        let temp_dir = TempDir::new().unwrap();
        let paths = ErpPaths::with_base_dir(temp_dir.path().to_path_buf());

        assert_eq!(paths.base_dir(), temp_dir.path());
        assert_eq!(paths.data_dir(), temp_dir.path().join("data"));
        assert_eq!(paths.audit_log(), temp_dir.path().join("audit.log"));
    }

    #[test]
    fn test_ensure_directories() {
        let temp_dir = TempDir::new().unwrap();
        let paths = ErpPaths::with_base_dir(temp_dir.path().join("nested"));

        paths.ensure_directories().unwrap();

        assert!(paths.data_dir().exists());
        assert!(!paths.is_initialized());
    }

    #[test]
    fn test_file_paths() {
        let temp_dir = TempDir::new().unwrap();
        let paths = ErpPaths::with_base_dir(temp_dir.path().to_path_buf());

        assert_eq!(paths.settings_file(), temp_dir.path().join("config.json"));
        assert_eq!(
            paths.table_file("sales/sales.csv"),
            temp_dir.path().join("data").join("sales/sales.csv")
        );
    }
}
