//! Storage initialization
//!
//! Handles first-run setup: directories, default settings and an empty file
//! for every table that doesn't have one yet.

use crate::config::paths::ErpPaths;
use crate::config::settings::Settings;
use crate::error::ErpError;
use crate::models::{Table, TableKind};

use super::file_io::write_table_atomic;

/// Initialize storage for a fresh installation
///
/// Existing settings and table files are left untouched.
pub fn initialize_storage(paths: &ErpPaths) -> Result<Settings, ErpError> {
    paths.ensure_directories()?;

    let settings = Settings::load_or_create(paths)?;
    if !paths.settings_file().exists() {
        settings.save(paths)?;
    }

    for kind in TableKind::ALL {
        let file = paths.table_file(kind.file_name());
        if !file.exists() {
            write_table_atomic(&file, &Table::new())?;
        }
    }

    Ok(settings)
}

/// Check if storage needs initialization
pub fn needs_initialization(paths: &ErpPaths) -> bool {
    !paths.is_initialized()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_initialize_storage() {
        let temp_dir = TempDir::new().unwrap();
        let paths = ErpPaths::with_base_dir(temp_dir.path().to_path_buf());

        assert!(needs_initialization(&paths));

        initialize_storage(&paths).unwrap();

        assert!(!needs_initialization(&paths));
        assert!(paths.settings_file().exists());
        for kind in TableKind::ALL {
            assert!(paths.table_file(kind.file_name()).exists());
        }
    }

    #[test]
    fn test_doesnt_overwrite_existing() {
        let temp_dir = TempDir::new().unwrap();
        let paths = ErpPaths::with_base_dir(temp_dir.path().to_path_buf());
        initialize_storage(&paths).unwrap();

        let games = paths.table_file(TableKind::Store.file_name());
        std::fs::write(&games, "kH34Ju#&;Age of Empires II;Microsoft;43;4\n").unwrap();
        Settings::with_current_year(2017).save(&paths).unwrap();

        let settings = initialize_storage(&paths).unwrap();

        assert_eq!(settings.current_year, 2017);
        let content = std::fs::read_to_string(&games).unwrap();
        assert!(content.contains("Age of Empires II"));
    }
}
