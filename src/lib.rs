//! erp-cli - record managers for a small shop
//!
//! This library provides the table-manipulation core shared by eight record
//! managers (accounting, CRM, HR, inventory, logistics, partners, sales and
//! store) and the data analyser that reports across them.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `sort`: Hoare quicksort with key extraction and a reverse flag
//! - `models`: Rows, tables, dates, IDs and field schemas
//! - `validation`: Input validators used by the schemas
//! - `managers`: Per-table schemas and reports, plus the data analyser
//! - `storage`: `;`-delimited table files with atomic writes
//! - `services`: Schema-driven add/update/remove
//! - `audit`: Audit logging system
//! - `prompt`: Line-oriented prompting for interactive flows
//! - `display`: Table and report formatting
//! - `cli`: Command handlers and the interactive menu
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//!
//! # Example
//!
//! ```rust,ignore
//! use erp::config::{ErpPaths, Settings};
//! use erp::managers::sales;
//! use erp::models::TableKind;
//! use erp::storage::Storage;
//!
//! let paths = ErpPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let storage = Storage::open(paths, &settings)?;
//! let cheapest = sales::lowest_price_item_id(storage.table(TableKind::Sales))?;
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod managers;
pub mod models;
pub mod prompt;
pub mod services;
pub mod sort;
pub mod storage;
pub mod validation;

pub use error::{ErpError, ErpResult};
