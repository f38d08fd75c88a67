//! User settings for erp-cli
//!
//! Manages the reference year used by year validators and reports, the words
//! that cancel a multi-field entry, and whether changes are audited.

use chrono::Datelike;
use serde::{Deserialize, Serialize};

use super::paths::ErpPaths;
use crate::error::ErpError;

/// User settings for erp-cli
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Reference year for "year by"/"year from" checks and durability reports
    #[serde(default = "default_current_year")]
    pub current_year: i32,

    /// Inputs that abort a multi-field entry (compared case-insensitively)
    #[serde(default = "default_cancel_words")]
    pub cancel_words: Vec<String>,

    /// Whether create/update/delete operations are written to the audit log
    #[serde(default = "default_audit_enabled")]
    pub audit_enabled: bool,
}

fn default_schema_version() -> u32 {
    1
}

fn default_current_year() -> i32 {
    chrono::Local::now().year()
}

fn default_cancel_words() -> Vec<String> {
    ["esc", "quit", "bye", "exit"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn default_audit_enabled() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            current_year: default_current_year(),
            cancel_words: default_cancel_words(),
            audit_enabled: default_audit_enabled(),
        }
    }
}

impl Settings {
    /// Settings with a fixed reference year
    pub fn with_current_year(current_year: i32) -> Self {
        Self {
            current_year,
            ..Self::default()
        }
    }

    /// Check if an input is one of the cancel words
    pub fn is_cancel_word(&self, input: &str) -> bool {
        let input = input.trim();
        self.cancel_words
            .iter()
            .any(|word| word.eq_ignore_ascii_case(input))
    }

    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &ErpPaths) -> Result<Self, ErpError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path)
                .map_err(|e| ErpError::Io(format!("Failed to read settings file: {}", e)))?;

            let settings: Settings = serde_json::from_str(&contents)
                .map_err(|e| ErpError::Config(format!("Failed to parse settings file: {}", e)))?;

            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &ErpPaths) -> Result<(), ErpError> {
        paths.ensure_directories()?;

        let settings_path = paths.settings_file();
        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| ErpError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(&settings_path, contents)
            .map_err(|e| ErpError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }
}
