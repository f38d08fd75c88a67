//! Core data models for erp-cli
//!
//! This module contains the value types every record manager is built on:
//! rows and tables, the date value, record identifiers, table schemas and the
//! set of tables the managers own.

pub mod date;
pub mod ids;
pub mod kind;
pub mod schema;
pub mod table;

pub use date::Date;
pub use ids::{could_be_a_valid_id, generate_id, generate_id_with, CharClass};
pub use kind::TableKind;
pub use schema::{Field, Schema, Validator};
pub use table::{rows_between, sum_where, Row, Table, ID};
