//! Backing state for the record entry screen.

use crate::db::{fetch_all_rows, RecordRow, Result, Store};
use crate::registry::TableKind;

use super::forms::RecordForm;

/// Everything the records screen owns for the selected table: the
/// table itself, its entry form, and the last successfully fetched
/// rows. Selecting a table builds a new session from scratch, so no
/// state can leak from the previously open table.
pub(crate) struct RecordSession {
    pub(crate) table: TableKind,
    pub(crate) form: RecordForm,
    pub(crate) rows: Vec<RecordRow>,
    pub(crate) selected: usize,
}

impl RecordSession {
    /// Fresh session with an empty form and nothing on display yet.
    /// Callers follow up with [`refresh`](Self::refresh) to load rows.
    pub(crate) fn new(table: TableKind) -> Self {
        Self {
            table,
            form: RecordForm::for_table(table),
            rows: Vec::new(),
            selected: 0,
        }
    }

    /// Re-read every row of the session's table. The display is only
    /// replaced once the fetch has fully succeeded; on error the rows
    /// from the last successful fetch stay visible.
    pub(crate) fn refresh(&mut self, store: &Store) -> Result<()> {
        let rows = fetch_all_rows(store, self.table)?;
        self.rows = rows;
        self.ensure_in_bounds();
        Ok(())
    }

    pub(crate) fn move_selection(&mut self, offset: isize) {
        if self.rows.is_empty() {
            return;
        }
        let len = self.rows.len() as isize;
        let mut new = self.selected as isize + offset;
        if new < 0 {
            new = 0;
        }
        if new >= len {
            new = len - 1;
        }
        self.selected = new as usize;
    }

    pub(crate) fn select_first(&mut self) {
        if !self.rows.is_empty() {
            self.selected = 0;
        }
    }

    pub(crate) fn select_last(&mut self) {
        if !self.rows.is_empty() {
            self.selected = self.rows.len() - 1;
        }
    }

    fn ensure_in_bounds(&mut self) {
        if self.rows.is_empty() {
            self.selected = 0;
        } else if self.selected >= self.rows.len() {
            self.selected = self.rows.len() - 1;
        }
    }
}
