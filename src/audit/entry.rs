//! Audit entry data structures
//!
//! Defines the structure of audit log entries: which table a record belongs
//! to, what happened to it, and the record's cells before and after.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{Row, TableKind};

/// Types of operations that can be audited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    /// Record was added
    Create,
    /// Record fields were changed
    Update,
    /// Record was removed
    Delete,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operation::Create => write!(f, "CREATE"),
            Operation::Update => write!(f, "UPDATE"),
            Operation::Delete => write!(f, "DELETE"),
        }
    }
}

/// A single audit log entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    /// When the operation occurred (UTC)
    pub timestamp: DateTime<Utc>,

    /// Type of operation performed
    pub operation: Operation,

    /// Table holding the record
    pub table: TableKind,

    /// Identifier of the affected record
    pub record_id: String,

    /// Human-readable label of the record (its first non-ID cell)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record_name: Option<String>,

    /// Cells before the operation (for updates/deletes)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub before: Option<Row>,

    /// Cells after the operation (for creates/updates)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub after: Option<Row>,

    /// Human-readable diff summary
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diff_summary: Option<String>,
}

fn record_name(row: &Row) -> Option<String> {
    row.cell(1).map(str::to_string)
}

impl AuditEntry {
    /// Create a new audit entry for an added record
    pub fn create(table: TableKind, row: &Row) -> Self {
        Self {
            timestamp: Utc::now(),
            operation: Operation::Create,
            table,
            record_id: row.id().to_string(),
            record_name: record_name(row),
            before: None,
            after: Some(row.clone()),
            diff_summary: None,
        }
    }

    /// Create a new audit entry for an updated record
    pub fn update(table: TableKind, before: &Row, after: &Row, diff_summary: Option<String>) -> Self {
        Self {
            timestamp: Utc::now(),
            operation: Operation::Update,
            table,
            record_id: after.id().to_string(),
            record_name: record_name(after),
            before: Some(before.clone()),
            after: Some(after.clone()),
            diff_summary,
        }
    }

    /// Create a new audit entry for a removed record
    pub fn delete(table: TableKind, row: &Row) -> Self {
        Self {
            timestamp: Utc::now(),
            operation: Operation::Delete,
            table,
            record_id: row.id().to_string(),
            record_name: record_name(row),
            before: Some(row.clone()),
            after: None,
            diff_summary: None,
        }
    }

    /// Format the entry for human-readable output
    pub fn format_human_readable(&self) -> String {
        let mut output = format!(
            "[{}] {} {} {}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
            self.operation,
            self.table,
            self.record_id
        );

        if let Some(name) = &self.record_name {
            output.push_str(&format!(" ({})", name));
        }

        if let Some(diff) = &self.diff_summary {
            output.push_str(&format!("\n  Changes: {}", diff));
        }

        output
    }
}
