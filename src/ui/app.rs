use anyhow::Result;
use crossterm::event::KeyCode;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap};
use ratatui::Frame;

use crate::db::{insert_record, Store, StoreError};
use crate::registry::TableKind;

use super::screens::RecordSession;

/// Footer space reserved for status messages and instructions.
const FOOTER_HEIGHT: u16 = 3;

/// High-level navigation states. Keeping this explicit makes it easy to
/// reason about which rendering path runs and what keyboard shortcuts
/// should do.
enum Screen {
    /// The table picker shown at startup.
    Tables,
    /// Entry form plus record list for one selected table.
    Records(RecordSession),
}

/// Holds the footer message text plus its severity.
struct StatusMessage {
    text: String,
    kind: StatusKind,
}

/// Severity levels shown in the footer. Warnings are reserved for
/// transient conditions such as a locked database, where retrying is
/// the right response; errors mean the input itself was rejected.
enum StatusKind {
    Info,
    Warning,
    Error,
}

impl StatusKind {
    fn style(&self) -> Style {
        match self {
            StatusKind::Info => Style::default().fg(Color::Green),
            StatusKind::Warning => Style::default().fg(Color::Yellow),
            StatusKind::Error => Style::default().fg(Color::Red),
        }
    }
}

/// Central application state shared across the TUI.
pub struct App {
    store: Store,
    screen: Screen,
    table_index: usize,
    status: Option<StatusMessage>,
}

impl App {
    pub fn new(store: Store) -> Self {
        Self {
            store,
            screen: Screen::Tables,
            table_index: 0,
            status: None,
        }
    }

    pub fn handle_key(&mut self, code: KeyCode) -> Result<bool> {
        match self.screen {
            Screen::Tables => self.handle_tables_key(code),
            Screen::Records(_) => self.handle_records_key(code),
        }
    }

    fn handle_tables_key(&mut self, code: KeyCode) -> Result<bool> {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => return Ok(true),
            KeyCode::Up => {
                if self.table_index > 0 {
                    self.table_index -= 1;
                }
            }
            KeyCode::Down => {
                if self.table_index + 1 < TableKind::ALL.len() {
                    self.table_index += 1;
                }
            }
            KeyCode::Char(ch @ '1'..='4') => {
                self.table_index = ch as usize - '1' as usize;
                self.open_table(TableKind::ALL[self.table_index]);
            }
            KeyCode::Enter => self.open_table(TableKind::ALL[self.table_index]),
            _ => {}
        }
        Ok(false)
    }

    fn handle_records_key(&mut self, code: KeyCode) -> Result<bool> {
        let mut status_to_set: Option<(String, StatusKind)> = None;
        let mut back_to_tables = false;

        {
            let session = match &mut self.screen {
                Screen::Records(session) => session,
                Screen::Tables => return Ok(false),
            };

            match code {
                KeyCode::Esc => back_to_tables = true,
                KeyCode::Tab => session.form.next_field(),
                KeyCode::BackTab => session.form.prev_field(),
                KeyCode::Backspace => session.form.backspace(),
                KeyCode::Up => session.move_selection(-1),
                KeyCode::Down => session.move_selection(1),
                KeyCode::PageUp => session.move_selection(-5),
                KeyCode::PageDown => session.move_selection(5),
                KeyCode::Home => session.select_first(),
                KeyCode::End => session.select_last(),
                KeyCode::Enter => {
                    let values = session.form.column_values();
                    status_to_set =
                        Some(match insert_record(&self.store, session.table, &values) {
                            Ok(()) => match session.refresh(&self.store) {
                                Ok(()) => ("Record added successfully.".to_string(), StatusKind::Info),
                                Err(err) => store_error_status(err),
                            },
                            Err(err) => store_error_status(err),
                        });
                }
                KeyCode::Char(ch) => {
                    session.form.push_char(ch);
                }
                _ => {}
            }
        }

        if back_to_tables {
            self.clear_status();
            self.screen = Screen::Tables;
        } else if let Some((text, kind)) = status_to_set {
            self.set_status(text, kind);
        }

        Ok(false)
    }

    pub(crate) fn handle_ctrl_r(&mut self) -> Result<()> {
        let status = {
            let session = match &mut self.screen {
                Screen::Records(session) => session,
                Screen::Tables => return Ok(()),
            };
            match session.refresh(&self.store) {
                Ok(()) => (
                    format!(
                        "Loaded {} record(s) from {}.",
                        session.rows.len(),
                        session.table
                    ),
                    StatusKind::Info,
                ),
                Err(err) => store_error_status(err),
            }
        };
        self.set_status(status.0, status.1);
        Ok(())
    }

    /// Enter the records screen for `table`: a fresh form with one
    /// field per registered column, followed by a single fetch of the
    /// table's rows. The screen is entered even when that first fetch
    /// fails; the error lands in the footer and the list stays empty
    /// until a retry succeeds.
    fn open_table(&mut self, table: TableKind) {
        let mut session = RecordSession::new(table);
        let status = match session.refresh(&self.store) {
            Ok(()) => (
                format!("Loaded {} record(s) from {}.", session.rows.len(), table),
                StatusKind::Info,
            ),
            Err(err) => store_error_status(err),
        };
        self.screen = Screen::Records(session);
        self.set_status(status.0, status.1);
    }

    pub(crate) fn draw(&self, frame: &mut Frame) {
        let area = frame.area();
        let footer_height = FOOTER_HEIGHT.min(area.height);

        let (content_area, footer_area) = if area.height > footer_height {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(0), Constraint::Length(footer_height)])
                .split(area);
            (chunks[0], chunks[1])
        } else {
            (area, area)
        };

        match &self.screen {
            Screen::Tables => self.draw_table_picker(frame, content_area),
            Screen::Records(session) => self.draw_records(frame, content_area, session),
        }

        if area.height >= footer_height {
            self.draw_footer(frame, footer_area);
        }
    }

    fn draw_table_picker(&self, frame: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(4), Constraint::Min(1)])
            .split(area);

        let header = Paragraph::new(vec![
            Line::from(Span::styled(
                "University Records",
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from("Select a table to enter and browse records."),
        ])
        .block(Block::default().borders(Borders::ALL))
        .alignment(Alignment::Left);
        frame.render_widget(header, chunks[0]);

        let items: Vec<ListItem> = TableKind::ALL
            .iter()
            .enumerate()
            .map(|(index, table)| {
                let columns = table
                    .columns()
                    .iter()
                    .map(|column| format!("{} {}", column.name, column.column_type.label()))
                    .collect::<Vec<_>>()
                    .join(", ");
                ListItem::new(vec![
                    Line::from(Span::styled(
                        format!("[{}] {}", index + 1, table.name()),
                        Style::default().add_modifier(Modifier::BOLD),
                    )),
                    Line::from(Span::styled(
                        format!("    {columns}"),
                        Style::default().fg(Color::DarkGray),
                    )),
                ])
            })
            .collect();

        let list = List::new(items)
            .block(Block::default().borders(Borders::ALL).title("Tables"))
            .highlight_style(Style::default().fg(Color::Yellow))
            .highlight_symbol("▶ ");

        let mut list_state = ListState::default();
        list_state.select(Some(self.table_index));
        frame.render_stateful_widget(list, chunks[1], &mut list_state);
    }

    fn draw_records(&self, frame: &mut Frame, area: Rect, session: &RecordSession) {
        let form_height = session.form.len() as u16 + 2;
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(form_height),
                Constraint::Min(1),
            ])
            .split(area);

        let header = Paragraph::new(Line::from(vec![
            Span::styled(
                format!("Current Table: {}", session.table),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw(format!("  •  {} record(s)", session.rows.len())),
        ]))
        .block(Block::default().borders(Borders::ALL));
        frame.render_widget(header, chunks[0]);

        let form_block = Block::default().borders(Borders::ALL).title("New Record");
        let lines: Vec<Line> = (0..session.form.len())
            .map(|index| session.form.build_line(index))
            .collect();
        let form = Paragraph::new(lines).block(form_block.clone());
        frame.render_widget(form, chunks[1]);

        let inner = form_block.inner(chunks[1]);
        let (cursor_x, cursor_y) = session.form.cursor_position();
        frame.set_cursor_position((inner.x + cursor_x, inner.y + cursor_y));

        if session.rows.is_empty() {
            let message = Paragraph::new("No records yet. Fill the fields and press Enter.")
                .alignment(Alignment::Center)
                .block(Block::default().borders(Borders::ALL).title("Records"));
            frame.render_widget(message, chunks[2]);
            return;
        }

        let items: Vec<ListItem> = session
            .rows
            .iter()
            .map(|row| ListItem::new(row.tuple_display()))
            .collect();
        let list = List::new(items)
            .block(Block::default().borders(Borders::ALL).title("Records"))
            .highlight_style(Style::default().fg(Color::Yellow))
            .highlight_symbol("▶ ");

        let mut list_state = ListState::default();
        list_state.select(Some(session.selected));
        frame.render_stateful_widget(list, chunks[2], &mut list_state);
    }

    fn draw_footer(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::TOP);
        frame.render_widget(block.clone(), area);
        let inner = block.inner(area);

        let status_line = if let Some(status) = &self.status {
            Line::from(vec![Span::styled(status.text.clone(), status.kind.style())])
        } else {
            Line::from("")
        };

        let instructions = self.footer_instructions();

        let paragraph = Paragraph::new(vec![status_line, instructions]).wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }

    fn footer_instructions(&self) -> Line<'static> {
        let key_style = Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD);
        match &self.screen {
            Screen::Tables => Line::from(vec![
                Span::styled("[↑↓]", key_style),
                Span::raw(" Select   "),
                Span::styled("[1-4]", key_style),
                Span::raw(" Jump   "),
                Span::styled("[Enter]", key_style),
                Span::raw(" Open   "),
                Span::styled("[q]", key_style),
                Span::raw(" Quit"),
            ]),
            Screen::Records(_) => Line::from(vec![
                Span::styled("[Tab]", key_style),
                Span::raw(" Next Field   "),
                Span::styled("[Enter]", key_style),
                Span::raw(" Add Record   "),
                Span::styled("[Ctrl+R]", key_style),
                Span::raw(" View Records   "),
                Span::styled("[↑↓]", key_style),
                Span::raw(" Scroll   "),
                Span::styled("[Esc]", key_style),
                Span::raw(" Tables"),
            ]),
        }
    }

    fn set_status<S: Into<String>>(&mut self, text: S, kind: StatusKind) {
        self.status = Some(StatusMessage {
            text: text.into(),
            kind,
        });
    }

    fn clear_status(&mut self) {
        self.status = None;
    }
}

/// Map a store failure to its footer representation: transient
/// conditions show as warnings, everything else as errors.
fn store_error_status(err: StoreError) -> (String, StatusKind) {
    let kind = if err.is_transient() {
        StatusKind::Warning
    } else {
        StatusKind::Error
    };
    (err.to_string(), kind)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::testutil::temp_store;
    use crate::registry::ColumnValue;

    fn professor(email: &str) -> Vec<ColumnValue> {
        vec![
            ColumnValue {
                column: "f_name",
                value: Some("Aya".to_string()),
            },
            ColumnValue {
                column: "last_name",
                value: Some("Hassan".to_string()),
            },
            ColumnValue {
                column: "email",
                value: Some(email.to_string()),
            },
            ColumnValue {
                column: "phonenumber",
                value: None,
            },
        ]
    }

    fn type_text(app: &mut App, text: &str) {
        for ch in text.chars() {
            app.handle_key(KeyCode::Char(ch)).expect("type into the form");
        }
    }

    fn open_session(app: &App) -> &RecordSession {
        match &app.screen {
            Screen::Records(session) => session,
            Screen::Tables => panic!("expected the records screen to be open"),
        }
    }

    #[test]
    fn selecting_a_table_fetches_and_shows_its_rows() {
        let (_dir, store) = temp_store();
        insert_record(&store, TableKind::Professor, &professor("aya@uni.edu"))
            .expect("seed a professor");

        let mut app = App::new(store);
        let quit = app.handle_key(KeyCode::Char('2')).expect("select Professor");
        assert!(!quit);

        let session = open_session(&app);
        assert_eq!(session.table, TableKind::Professor);
        assert_eq!(session.rows.len(), 1);

        let status = app.status.as_ref().expect("the fetch reports a status");
        assert_eq!(status.text, "Loaded 1 record(s) from Professor.");
        assert!(matches!(status.kind, StatusKind::Info));
    }

    #[test]
    fn enter_adds_the_typed_record_and_refreshes_the_list() {
        let (_dir, store) = temp_store();
        insert_record(&store, TableKind::Professor, &professor("aya@uni.edu"))
            .expect("seed the department head");

        let mut app = App::new(store);
        app.handle_key(KeyCode::Enter)
            .expect("open the highlighted table");
        assert!(open_session(&app).rows.is_empty());

        type_text(&mut app, "Physics");
        app.handle_key(KeyCode::Tab).expect("move to head_id");
        type_text(&mut app, "1");
        app.handle_key(KeyCode::Enter).expect("submit the form");

        let session = open_session(&app);
        assert_eq!(session.table, TableKind::Department);
        assert_eq!(session.rows.len(), 1, "the new row is fetched back");
        assert_eq!(session.rows[0].tuple_display(), "(1, Physics, 1)");

        let status = app.status.as_ref().expect("the insert reports a status");
        assert_eq!(status.text, "Record added successfully.");
        assert!(matches!(status.kind, StatusKind::Info));
    }

    #[test]
    fn a_rejected_insert_keeps_the_display_and_the_typed_fields() {
        let (_dir, store) = temp_store();
        insert_record(&store, TableKind::Professor, &professor("aya@uni.edu"))
            .expect("seed a professor");

        let mut app = App::new(store);
        app.handle_key(KeyCode::Char('2')).expect("select Professor");
        type_text(&mut app, "Lina");
        app.handle_key(KeyCode::Enter)
            .expect("submit a form missing required fields");

        let session = open_session(&app);
        assert_eq!(session.rows.len(), 1, "the seeded row stays on display");
        assert_eq!(
            session.form.column_values()[0].value.as_deref(),
            Some("Lina"),
            "typed text survives a rejected insert"
        );

        let status = app.status.as_ref().expect("the failure reports a status");
        assert!(matches!(status.kind, StatusKind::Error));
        assert!(status.text.contains("NOT NULL"));
    }
}
