//! Form state for the record entry screen.
//!
//! The form is rebuilt from the table registry every time a table is
//! selected: one text input per registered column, in registry order.
//! Fields accept any printable character regardless of the column's
//! declared affinity; type and constraint enforcement is the store's
//! job, and its errors come back through the status line.

use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

use crate::registry::{ColumnSpec, ColumnType, ColumnValue, TableKind};

/// A single text input paired with the registry column it feeds.
#[derive(Clone)]
pub(crate) struct FieldInput {
    pub(crate) column: ColumnSpec,
    pub(crate) value: String,
}

/// Editable state for the active table: an explicit, ordered field
/// list plus the index of the focused field.
#[derive(Clone)]
pub(crate) struct RecordForm {
    fields: Vec<FieldInput>,
    active: usize,
}

impl RecordForm {
    /// Build a fresh, empty form for `table`, one field per registered
    /// column, with focus on the first field.
    pub(crate) fn for_table(table: TableKind) -> Self {
        let fields = table
            .columns()
            .iter()
            .map(|column| FieldInput {
                column: *column,
                value: String::new(),
            })
            .collect();
        Self { fields, active: 0 }
    }

    /// The ordered fields.
    #[cfg(test)]
    pub(crate) fn fields(&self) -> &[FieldInput] {
        &self.fields
    }

    /// Number of fields, which the layout uses to size the form block.
    pub(crate) fn len(&self) -> usize {
        self.fields.len()
    }

    /// Index of the focused field.
    #[cfg(test)]
    pub(crate) fn active_index(&self) -> usize {
        self.active
    }

    /// Switch focus to a particular field.
    #[cfg(test)]
    pub(crate) fn focus(&mut self, index: usize) {
        if index < self.fields.len() {
            self.active = index;
        }
    }

    /// Move focus to the next field, wrapping at the end.
    pub(crate) fn next_field(&mut self) {
        self.active = (self.active + 1) % self.fields.len();
    }

    /// Move focus to the previous field, wrapping at the start.
    pub(crate) fn prev_field(&mut self) {
        self.active = (self.active + self.fields.len() - 1) % self.fields.len();
    }

    /// Append a character to the focused field. Control characters are
    /// rejected; everything else is accepted as-is, including letters
    /// in integer columns.
    pub(crate) fn push_char(&mut self, ch: char) -> bool {
        if ch.is_control() {
            return false;
        }
        self.fields[self.active].value.push(ch);
        true
    }

    /// Remove the last character from the focused field.
    pub(crate) fn backspace(&mut self) {
        self.fields[self.active].value.pop();
    }

    /// Pair every field with its column name, in form order. Values are
    /// trimmed; fields left blank become `None` so they are stored as
    /// SQL NULL rather than empty strings.
    pub(crate) fn column_values(&self) -> Vec<ColumnValue> {
        self.fields
            .iter()
            .map(|field| {
                let trimmed = field.value.trim();
                ColumnValue {
                    column: field.column.name,
                    value: if trimmed.is_empty() {
                        None
                    } else {
                        Some(trimmed.to_string())
                    },
                }
            })
            .collect()
    }

    /// Render a single styled line for the form widget.
    pub(crate) fn build_line(&self, index: usize) -> Line<'static> {
        let field = &self.fields[index];
        let is_active = index == self.active;

        let placeholder = match field.column.column_type {
            ColumnType::Integer => "<int>",
            ColumnType::Text => "<text>",
        };
        let display = if field.value.is_empty() {
            placeholder.to_string()
        } else {
            field.value.clone()
        };

        let style = if is_active {
            Style::default().fg(Color::Yellow)
        } else if field.value.is_empty() {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default()
        };

        Line::from(vec![
            Span::raw(format!("{}: ", field.column.name)),
            Span::styled(display, style),
        ])
    }

    /// Cursor offset inside the form block: column within the focused
    /// line, then the line's row.
    pub(crate) fn cursor_position(&self) -> (u16, u16) {
        let field = &self.fields[self.active];
        let prefix = field.column.name.len() + 2;
        let column = (prefix + field.value.chars().count()) as u16;
        (column, self.active as u16)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn form_mirrors_the_registry_column_list() {
        let form = RecordForm::for_table(TableKind::Department);
        let names: Vec<&str> = form.fields().iter().map(|field| field.column.name).collect();
        assert_eq!(names, ["dep_name", "head_id"]);
        assert_eq!(form.active_index(), 0);
    }

    #[test]
    fn selecting_another_table_rebuilds_every_field() {
        let mut form = RecordForm::for_table(TableKind::Department);
        for ch in "Physics".chars() {
            form.push_char(ch);
        }

        form = RecordForm::for_table(TableKind::Student);
        assert_eq!(form.len(), TableKind::Student.columns().len());
        assert!(form.fields().iter().all(|field| field.value.is_empty()));
        assert_eq!(form.active_index(), 0);
    }

    #[test]
    fn focus_cycles_through_fields_in_both_directions() {
        let mut form = RecordForm::for_table(TableKind::Course);
        assert_eq!(form.active_index(), 0);
        form.next_field();
        assert_eq!(form.active_index(), 1);
        form.prev_field();
        form.prev_field();
        assert_eq!(form.active_index(), form.len() - 1, "focus wraps backwards");
        form.next_field();
        assert_eq!(form.active_index(), 0, "focus wraps forwards");
    }

    #[test]
    fn integer_fields_accept_free_text() {
        let mut form = RecordForm::for_table(TableKind::Course);
        form.focus(1); // credit_hours
        assert!(form.push_char('x'));
        assert!(form.push_char('3'));
        assert!(!form.push_char('\t'), "control characters are rejected");
        assert_eq!(form.fields()[1].value, "x3");
        form.backspace();
        assert_eq!(form.fields()[1].value, "x");
    }

    #[test]
    fn blank_and_whitespace_fields_become_null() {
        let mut form = RecordForm::for_table(TableKind::Department);
        for ch in " Physics ".chars() {
            form.push_char(ch);
        }
        form.next_field();
        form.push_char(' ');

        let values = form.column_values();
        assert_eq!(values[0].column, "dep_name");
        assert_eq!(values[0].value.as_deref(), Some("Physics"));
        assert_eq!(values[1].column, "head_id");
        assert_eq!(values[1].value, None);
    }

    #[test]
    fn cursor_tracks_the_focused_field() {
        let mut form = RecordForm::for_table(TableKind::Department);
        form.push_char('P');
        form.push_char('h');
        // "dep_name: " is ten columns wide
        assert_eq!(form.cursor_position(), (12, 0));
        form.next_field();
        assert_eq!(form.cursor_position(), (9, 1));
    }
}
