//! Record managers
//!
//! One module per table: its column indices, display headers, input schema
//! and the reports computed from it. `analyser` holds reports that join
//! several tables.

pub mod accounting;
pub mod analyser;
pub mod crm;
pub mod hr;
pub mod inventory;
pub mod logistics;
pub mod partners;
pub mod sales;
pub mod store;

use crate::config::Settings;
use crate::models::{Schema, TableKind};

/// Input schema of a table
pub fn schema_for(kind: TableKind, settings: &Settings) -> Schema {
    match kind {
        TableKind::Accounting => accounting::schema(settings),
        TableKind::Crm => crm::schema(settings),
        TableKind::Hr => hr::schema(settings),
        TableKind::Inventory => inventory::schema(settings),
        TableKind::Logistics => logistics::schema(settings),
        TableKind::Partners => partners::schema(settings),
        TableKind::Sales => sales::schema(settings),
        TableKind::Store => store::schema(settings),
    }
}

/// Display headers of a table, ID first
pub fn headers_for(kind: TableKind) -> &'static [&'static str] {
    match kind {
        TableKind::Accounting => &accounting::HEADERS,
        TableKind::Crm => &crm::HEADERS,
        TableKind::Hr => &hr::HEADERS,
        TableKind::Inventory => &inventory::HEADERS,
        TableKind::Logistics => &logistics::HEADERS,
        TableKind::Partners => &partners::HEADERS,
        TableKind::Sales => &sales::HEADERS,
        TableKind::Store => &store::HEADERS,
    }
}
