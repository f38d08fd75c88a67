//! Audit log CLI command

use crate::error::ErpResult;
use crate::storage::Storage;

/// Render the most recent audit entries, oldest first
pub fn format_audit_log(storage: &Storage, limit: usize) -> ErpResult<String> {
    let Some(logger) = storage.audit() else {
        return Ok("Audit logging is disabled.".to_string());
    };

    let entries = logger.read_recent(limit)?;
    if entries.is_empty() {
        return Ok("No audit entries found.".to_string());
    }

    let lines: Vec<String> = entries
        .iter()
        .map(|entry| entry.format_human_readable())
        .collect();
    Ok(lines.join("\n"))
}

/// Handle the audit command
pub fn handle_audit_command(storage: &Storage, limit: usize) -> ErpResult<()> {
    println!("{}", format_audit_log(storage, limit)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::ErpPaths;
    use crate::config::Settings;
    use crate::models::{Row, TableKind};
    use tempfile::TempDir;

    #[test]
    fn test_empty_and_recent_entries() {
        let temp_dir = TempDir::new().unwrap();
        let paths = ErpPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::open(paths, &Settings::with_current_year(2017)).unwrap();

        assert_eq!(format_audit_log(&storage, 10).unwrap(), "No audit entries found.");

        let first = Row::from_cells(["kH14Ju#&", "Joe Doe", "1980"]);
        let second = Row::from_cells(["jH34Ju#&", "Ann Smith", "1985"]);
        storage.log_create(TableKind::Hr, &first).unwrap();
        storage.log_delete(TableKind::Hr, &second).unwrap();

        let output = format_audit_log(&storage, 1).unwrap();
        assert!(output.contains("jH34Ju#&"));
        assert!(!output.contains("kH14Ju#&"));
    }

    #[test]
    fn test_disabled_audit() {
        let temp_dir = TempDir::new().unwrap();
        let paths = ErpPaths::with_base_dir(temp_dir.path().to_path_buf());
        let settings = Settings {
            audit_enabled: false,
            ..Settings::with_current_year(2017)
        };
        let storage = Storage::open(paths, &settings).unwrap();

        assert_eq!(
            format_audit_log(&storage, 10).unwrap(),
            "Audit logging is disabled."
        );
    }
}
