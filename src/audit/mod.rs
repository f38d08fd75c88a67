//! Audit logging for erp-cli
//!
//! Records every add, update and remove performed on a table, with the
//! record's cells before and after, in an append-only audit log.
//!
//! # Architecture
//!
//! - `AuditEntry`: a single entry with timestamp, operation, table, record
//!   identifier and optional before/after rows.
//! - `AuditLogger`: writes entries to the audit log file as line-delimited
//!   JSON (JSONL).
//! - `generate_row_diff`: human-readable summary of the cells an update
//!   changed.

mod diff;
mod entry;
mod logger;

pub use diff::generate_row_diff;
pub use entry::{AuditEntry, Operation};
pub use logger::AuditLogger;
