//! Row-level operations shared by every registered table.
//!
//! Unlike a per-entity data layer, inserts and fetches here are generic
//! over the table registry: the insert statement is assembled from the
//! same ordered column list that produced the form fields, and fetches
//! return rows already flattened to display text so the UI never talks
//! to SQLite types directly.

use rusqlite::params_from_iter;
use rusqlite::types::ValueRef;

use crate::registry::{ColumnValue, TableKind};

use super::connection::Store;
use super::error::Result;

/// One fetched row, flattened to display text per column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordRow {
    /// Column values in `SELECT *` order, NULLs rendered as `NULL`.
    pub values: Vec<String>,
}

impl RecordRow {
    /// Parenthesized tuple rendering used by the record list.
    pub fn tuple_display(&self) -> String {
        format!("({})", self.values.join(", "))
    }
}

/// Insert one row into `table`. The column/value pairing is structural:
/// each `ColumnValue` carries its own column name, so the statement can
/// never mis-align values against columns. Blank fields arrive as
/// `None` and are bound as SQL NULL; everything else is bound as text
/// and left to SQLite affinity and the schema's constraints to accept
/// or reject. Table and column names come from the fixed registry, so
/// splicing them into the statement text is safe.
pub fn insert_record(store: &Store, table: TableKind, values: &[ColumnValue]) -> Result<()> {
    let columns: Vec<&str> = values.iter().map(|entry| entry.column).collect();
    let placeholders: Vec<String> = (1..=values.len()).map(|n| format!("?{n}")).collect();
    let sql = format!(
        "INSERT INTO {} ({}) VALUES ({})",
        table.name(),
        columns.join(", "),
        placeholders.join(", ")
    );

    let conn = store.connect()?;
    conn.execute(
        &sql,
        params_from_iter(values.iter().map(|entry| entry.value.as_deref())),
    )?;
    Ok(())
}

/// Fetch every row of `table`, unfiltered and in storage order. The
/// result is fully materialized before returning, so a caller can keep
/// its previous rows on display whenever this returns an error.
pub fn fetch_all_rows(store: &Store, table: TableKind) -> Result<Vec<RecordRow>> {
    let conn = store.connect()?;
    let mut stmt = conn.prepare(&format!("SELECT * FROM {}", table.name()))?;
    let column_count = stmt.column_count();

    let rows = stmt
        .query_map([], |row| {
            let mut values = Vec::with_capacity(column_count);
            for index in 0..column_count {
                values.push(display_value(row.get_ref(index)?));
            }
            Ok(RecordRow { values })
        })?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(rows)
}

/// Flatten one SQLite value to the text shown in the record list.
fn display_value(value: ValueRef<'_>) -> String {
    match value {
        ValueRef::Null => "NULL".to_string(),
        ValueRef::Integer(value) => value.to_string(),
        ValueRef::Real(value) => value.to_string(),
        ValueRef::Text(text) => String::from_utf8_lossy(text).into_owned(),
        ValueRef::Blob(blob) => format!("<{} bytes>", blob.len()),
    }
}
