//! The record tables managed by erp-cli

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ErpError;

/// One table per record manager
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TableKind {
    Accounting,
    Crm,
    Hr,
    Inventory,
    Logistics,
    Partners,
    Sales,
    Store,
}

impl TableKind {
    pub const ALL: [TableKind; 8] = [
        TableKind::Accounting,
        TableKind::Crm,
        TableKind::Hr,
        TableKind::Inventory,
        TableKind::Logistics,
        TableKind::Partners,
        TableKind::Sales,
        TableKind::Store,
    ];

    /// Position in [`TableKind::ALL`]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Table file relative to the data directory
    pub fn file_name(self) -> &'static str {
        match self {
            Self::Accounting => "accounting/items.csv",
            Self::Crm => "crm/customers.csv",
            Self::Hr => "hr/persons.csv",
            Self::Inventory => "inventory/inventory.csv",
            Self::Logistics => "logistics/orders.csv",
            Self::Partners => "partners/partners.csv",
            Self::Sales => "sales/sales.csv",
            Self::Store => "store/games.csv",
        }
    }

    /// Menu title of the manager owning this table
    pub fn title(self) -> &'static str {
        match self {
            Self::Accounting => "Accounting manager",
            Self::Crm => "Customer relationship management (CRM)",
            Self::Hr => "Human resources manager",
            Self::Inventory => "Inventory manager",
            Self::Logistics => "Logistics manager",
            Self::Partners => "Partner registry",
            Self::Sales => "Sales manager",
            Self::Store => "Store manager",
        }
    }

    /// Short name used on the command line and in the audit log
    pub fn name(self) -> &'static str {
        match self {
            Self::Accounting => "accounting",
            Self::Crm => "crm",
            Self::Hr => "hr",
            Self::Inventory => "inventory",
            Self::Logistics => "logistics",
            Self::Partners => "partners",
            Self::Sales => "sales",
            Self::Store => "store",
        }
    }
}

impl fmt::Display for TableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for TableKind {
    type Err = ErpError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|kind| kind.name() == wanted)
            .ok_or_else(|| {
                ErpError::Validation(format!(
                    "Unknown table '{}'. Valid tables: {}",
                    s,
                    Self::ALL.map(TableKind::name).join(", ")
                ))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_matches_all_order() {
        for (position, kind) in TableKind::ALL.iter().enumerate() {
            assert_eq!(kind.index(), position);
        }
    }

    #[test]
    fn test_parse() {
        assert_eq!("sales".parse::<TableKind>().unwrap(), TableKind::Sales);
        assert_eq!(" CRM ".parse::<TableKind>().unwrap(), TableKind::Crm);
        assert!("warehouse".parse::<TableKind>().is_err());
    }

    #[test]
    fn test_file_names_are_distinct() {
        let mut files: Vec<&str> = TableKind::ALL.iter().map(|k| k.file_name()).collect();
        files.sort_unstable();
        files.dedup();
        assert_eq!(files.len(), TableKind::ALL.len());
    }

    #[test]
    fn test_serialization() {
        let json = serde_json::to_string(&TableKind::Hr).unwrap();
        assert_eq!(json, "\"hr\"");
    }
}
