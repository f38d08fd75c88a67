//! Service layer for erp-cli
//!
//! The service layer applies schema-driven record operations to the tables
//! held by the storage layer, prompting and validating input and recording
//! changes in the audit log.

pub mod records;

pub use records::{
    add_row, collect_inputs, insert_values, remove_row, update_row, update_values, RecordService,
    RowChange,
};
