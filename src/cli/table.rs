//! Table CLI commands
//!
//! List, show, add, update and remove records of any manager's table.

use clap::{Args, Subcommand};

use crate::config::Settings;
use crate::display::{format_row_details, format_rows};
use crate::error::{ErpError, ErpResult};
use crate::managers::headers_for;
use crate::models::TableKind;
use crate::prompt::Prompter;
use crate::services::RecordService;
use crate::storage::Storage;

/// Arguments of `erp table`
#[derive(Args)]
pub struct TableArgs {
    /// Manager owning the table (accounting, crm, hr, inventory, logistics,
    /// partners, sales, store)
    pub manager: TableKind,

    #[command(subcommand)]
    pub command: TableCommands,
}

/// Table subcommands
#[derive(Subcommand)]
pub enum TableCommands {
    /// List all records
    List {
        /// Column header to sort by
        #[arg(short, long)]
        sort: Option<String>,
        /// Sort in descending order
        #[arg(short, long)]
        reverse: bool,
    },
    /// Show one record
    Show {
        /// Record ID
        id: String,
    },
    /// Add a record; prompts for each field when no values are given
    Add {
        /// One value per field, in column order
        values: Vec<String>,
    },
    /// Update a record; prompts for each field when no --set is given
    Update {
        /// Record ID
        id: String,
        /// Field change as HEADER=VALUE (repeatable)
        #[arg(short, long = "set", value_name = "HEADER=VALUE")]
        set: Vec<String>,
    },
    /// Remove a record
    Remove {
        /// Record ID
        id: String,
    },
}

/// Split `HEADER=VALUE` at the first `=`
pub fn parse_assignment(assignment: &str) -> ErpResult<(String, String)> {
    assignment
        .split_once('=')
        .map(|(header, value)| (header.trim().to_string(), value.to_string()))
        .ok_or_else(|| {
            ErpError::Validation(format!(
                "Expected HEADER=VALUE, got '{}'",
                assignment
            ))
        })
}

/// Handle a table command
pub fn handle_table_command<P: Prompter + ?Sized>(
    storage: &mut Storage,
    settings: &Settings,
    args: TableArgs,
    prompter: &mut P,
) -> ErpResult<()> {
    let kind = args.manager;
    let headers = headers_for(kind);
    let mut service = RecordService::new(storage, settings);

    match args.command {
        TableCommands::List { sort, reverse } => {
            let table = service.list(kind, sort.as_deref(), reverse)?;
            println!("{}", kind.title());
            println!("{}", format_rows(headers, &table));
        }
        TableCommands::Show { id } => {
            let row = service.get(kind, &id)?;
            print!("{}", format_row_details(headers, &row));
        }
        TableCommands::Add { values } => {
            let added = if values.is_empty() {
                service.add_interactive(kind, prompter)?
            } else {
                Some(service.add(kind, &values)?)
            };
            match added {
                Some(id) => println!("Added record {}", id),
                None => println!("Cancelled."),
            }
        }
        TableCommands::Update { id, set } => {
            let change = if set.is_empty() {
                service.update_interactive(kind, &id, prompter)?
            } else {
                let changes = set
                    .iter()
                    .map(|assignment| parse_assignment(assignment))
                    .collect::<ErpResult<Vec<_>>>()?;
                Some(service.update(kind, &id, &changes)?)
            };
            match change {
                Some(change) if change.is_unchanged() => println!("No changes to record {}", id),
                Some(_) => println!("Updated record {}", id),
                None => println!("Cancelled."),
            }
        }
        TableCommands::Remove { id } => {
            service.remove(kind, &id)?;
            println!("Removed record {}", id);
        }
    }

    storage.save_all()
}
