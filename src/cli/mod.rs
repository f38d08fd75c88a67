//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod audit;
pub mod menu;
pub mod report;
pub mod table;

pub use audit::{format_audit_log, handle_audit_command};
pub use menu::run_menu;
pub use report::{handle_report_command, run_report, ReportCommands};
pub use table::{handle_table_command, TableArgs, TableCommands};
