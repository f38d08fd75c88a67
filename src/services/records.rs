//! Record service
//!
//! Generic add/update/remove over any table, driven by the table's schema.
//! The free functions work on a bare [`Table`]; [`RecordService`] applies
//! them to the tables held by [`Storage`] and records each change in the
//! audit log.

use crate::config::Settings;
use crate::error::{ErpError, ErpResult};
use crate::managers::schema_for;
use crate::models::{generate_id, Row, Schema, Table, TableKind, ID};
use crate::prompt::{ask, Prompter};
use crate::sort::{sort_table_by_column, sort_table_by_column_with};
use crate::storage::Storage;

/// A row before and after an update
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowChange {
    pub before: Row,
    pub after: Row,
}

impl RowChange {
    pub fn is_unchanged(&self) -> bool {
        self.before == self.after
    }
}

/// Ask for every field of `schema`, re-prompting until each answer is valid
///
/// Returns `Ok(None)` if a cancel word was entered. In update mode an empty
/// answer is accepted and yields `None` for that field, meaning "keep the
/// current value".
pub fn collect_inputs<P: Prompter + ?Sized>(
    prompter: &mut P,
    schema: &Schema,
    update_mode: bool,
    settings: &Settings,
) -> ErpResult<Option<Vec<Option<String>>>> {
    prompter.message(&format!(
        "Please enter item details. Type any of the following strings to cancel: {}",
        settings.cancel_words.join(", ")
    ))?;

    let mut values = Vec::with_capacity(schema.len());
    for field in schema.fields() {
        loop {
            let answer = ask(prompter, field.prompt())?;
            if settings.is_cancel_word(&answer) {
                return Ok(None);
            }
            if update_mode && answer.trim().is_empty() {
                prompter.message("Value not changed.")?;
                values.push(None);
                break;
            }
            if field.accepts(&answer) {
                values.push(Some(answer));
                break;
            }
            prompter.error("Incorrect input!")?;
        }
    }

    Ok(Some(values))
}

/// Append a row with a freshly generated ID and return the ID
fn append_row(table: &mut Table, values: Vec<String>) -> String {
    let id = generate_id(table);
    table.push(Row::from_cells(std::iter::once(id.clone()).chain(values)));
    id
}

/// Prompt for a new row and append it
///
/// Returns the new row's ID, or `None` when the entry was cancelled, in which
/// case the table is unchanged.
pub fn add_row<P: Prompter + ?Sized>(
    table: &mut Table,
    schema: &Schema,
    prompter: &mut P,
    settings: &Settings,
) -> ErpResult<Option<String>> {
    let Some(inputs) = collect_inputs(prompter, schema, false, settings)? else {
        return Ok(None);
    };
    let values = inputs.into_iter().map(Option::unwrap_or_default).collect();
    Ok(Some(append_row(table, values)))
}

/// Prompt for new values of an existing row
///
/// Fails with `NotFound` before prompting if `id` is absent. Empty answers
/// keep the current value; the ID cell is never changed.
pub fn update_row<P: Prompter + ?Sized>(
    table: &mut Table,
    id: &str,
    schema: &Schema,
    prompter: &mut P,
    settings: &Settings,
) -> ErpResult<Option<RowChange>> {
    let index = table
        .find_index_by_id(id)
        .ok_or_else(|| ErpError::record_not_found(id))?;

    let Some(inputs) = collect_inputs(prompter, schema, true, settings)? else {
        return Ok(None);
    };

    let changes = inputs
        .into_iter()
        .enumerate()
        .filter_map(|(field, value)| value.map(|value| (field + 1, value)));
    Ok(Some(apply_changes(table, index, changes)))
}

fn apply_changes<I>(table: &mut Table, index: usize, changes: I) -> RowChange
where
    I: IntoIterator<Item = (usize, String)>,
{
    let before = table.rows()[index].clone();
    let mut after = before.clone();
    for (column, value) in changes {
        after.set(column, value);
    }
    if let Some(row) = table.get_mut(index) {
        *row = after.clone();
    }
    RowChange { before, after }
}

/// Remove the row with the given ID and return it
pub fn remove_row(table: &mut Table, id: &str) -> ErpResult<Row> {
    let index = table
        .find_index_by_id(id)
        .ok_or_else(|| ErpError::record_not_found(id))?;
    Ok(table.remove_at(index))
}

fn check_value(schema: &Schema, field: usize, value: &str) -> ErpResult<()> {
    let field = &schema.fields()[field];
    if field.accepts(value) {
        Ok(())
    } else {
        Err(ErpError::Validation(format!(
            "Invalid value for {}: '{}'",
            field.header(),
            value
        )))
    }
}

/// Append a row from ready-made values, one per schema field
pub fn insert_values(table: &mut Table, schema: &Schema, values: &[String]) -> ErpResult<String> {
    if values.len() != schema.len() {
        return Err(ErpError::Validation(format!(
            "Expected {} values ({}), got {}",
            schema.len(),
            schema.headers()[1..].join(", "),
            values.len()
        )));
    }
    for (field, value) in values.iter().enumerate() {
        check_value(schema, field, value)?;
    }
    Ok(append_row(table, values.to_vec()))
}

/// Change named fields of an existing row
///
/// Every header must belong to the schema and every value must pass its
/// validator; nothing is changed otherwise.
pub fn update_values(
    table: &mut Table,
    id: &str,
    schema: &Schema,
    changes: &[(String, String)],
) -> ErpResult<RowChange> {
    let index = table
        .find_index_by_id(id)
        .ok_or_else(|| ErpError::record_not_found(id))?;

    let mut resolved = Vec::with_capacity(changes.len());
    for (header, value) in changes {
        let column = schema
            .column_of(header)
            .ok_or_else(|| ErpError::column_not_found(header.clone()))?;
        check_value(schema, column - 1, value)?;
        resolved.push((column, value.clone()));
    }

    Ok(apply_changes(table, index, resolved))
}

/// Table operations against [`Storage`], with audit logging
///
/// Changes stay in memory until [`Storage::save_all`] is called.
pub struct RecordService<'a> {
    storage: &'a mut Storage,
    settings: &'a Settings,
}

impl<'a> RecordService<'a> {
    pub fn new(storage: &'a mut Storage, settings: &'a Settings) -> Self {
        Self { storage, settings }
    }

    pub fn schema(&self, kind: TableKind) -> Schema {
        schema_for(kind, self.settings)
    }

    /// Rows of a table, optionally sorted by a column header
    ///
    /// Columns holding only integers sort numerically, others by text.
    pub fn list(&self, kind: TableKind, sort_by: Option<&str>, reverse: bool) -> ErpResult<Table> {
        let table = self.storage.table(kind);
        let Some(header) = sort_by else {
            return Ok(table.clone());
        };

        let column = if header.eq_ignore_ascii_case("id") {
            ID
        } else {
            self.schema(kind)
                .column_of(header)
                .ok_or_else(|| ErpError::column_not_found(header))?
        };

        let numeric = !table.is_empty()
            && table
                .iter()
                .all(|row| row.cell(column).is_some_and(|c| c.trim().parse::<i64>().is_ok()));

        if numeric {
            sort_table_by_column_with(
                table,
                column,
                |cell| {
                    cell.trim()
                        .parse::<i64>()
                        .map_err(|e| ErpError::Data(e.to_string()))
                },
                reverse,
            )
        } else {
            Ok(sort_table_by_column(table, column, reverse))
        }
    }

    pub fn get(&self, kind: TableKind, id: &str) -> ErpResult<Row> {
        self.storage
            .table(kind)
            .get_by_id(id)
            .cloned()
            .ok_or_else(|| ErpError::record_not_found(id))
    }

    /// Add a row from values given up front
    pub fn add(&mut self, kind: TableKind, values: &[String]) -> ErpResult<String> {
        let schema = self.schema(kind);
        let id = insert_values(self.storage.table_mut(kind), &schema, values)?;
        self.log_added(kind, &id)?;
        Ok(id)
    }

    /// Add a row by prompting for each field
    pub fn add_interactive<P: Prompter + ?Sized>(
        &mut self,
        kind: TableKind,
        prompter: &mut P,
    ) -> ErpResult<Option<String>> {
        let schema = self.schema(kind);
        let table = self.storage.table_mut(kind);
        let added = add_row(table, &schema, prompter, self.settings)?;
        if let Some(id) = &added {
            self.log_added(kind, id)?;
        }
        Ok(added)
    }

    fn log_added(&self, kind: TableKind, id: &str) -> ErpResult<()> {
        match self.storage.table(kind).get_by_id(id) {
            Some(row) => self.storage.log_create(kind, row),
            None => Ok(()),
        }
    }

    /// Update named fields of a row
    pub fn update(
        &mut self,
        kind: TableKind,
        id: &str,
        changes: &[(String, String)],
    ) -> ErpResult<RowChange> {
        let schema = self.schema(kind);
        let change = update_values(self.storage.table_mut(kind), id, &schema, changes)?;
        self.log_changed(kind, &schema, &change)?;
        Ok(change)
    }

    /// Update a row by prompting for each field
    pub fn update_interactive<P: Prompter + ?Sized>(
        &mut self,
        kind: TableKind,
        id: &str,
        prompter: &mut P,
    ) -> ErpResult<Option<RowChange>> {
        let schema = self.schema(kind);
        let table = self.storage.table_mut(kind);
        let change = update_row(table, id, &schema, prompter, self.settings)?;
        if let Some(change) = &change {
            self.log_changed(kind, &schema, change)?;
        }
        Ok(change)
    }

    fn log_changed(&self, kind: TableKind, schema: &Schema, change: &RowChange) -> ErpResult<()> {
        if change.is_unchanged() {
            return Ok(());
        }
        self.storage
            .log_update(kind, &schema.headers(), &change.before, &change.after)
    }

    pub fn remove(&mut self, kind: TableKind, id: &str) -> ErpResult<Row> {
        let removed = remove_row(self.storage.table_mut(kind), id)?;
        self.storage.log_delete(kind, &removed)?;
        Ok(removed)
    }
}
