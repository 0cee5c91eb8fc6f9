//! # Book Table Component
//!
//! The list screen: a sortable table of books with edit and delete actions.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `BookTableState` lives in `TuiState` (cursor, delete confirmation)
//! - `BookTable` is created each frame with borrowed state and props
//!
//! ## Keys
//!
//! ```text
//! ↑/↓ j/k   move        t a y   sort by title/author/year
//! Enter e   edit        d d     delete (press twice)
//! n         add         r       reload
//! q Esc     quit
//! ```

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Padding, Paragraph, Row, Table, TableState, Wrap};

use crate::core::book_list::{BookListState, ListPhase, MISC};
use crate::core::sort::SortKey;
use crate::tui::component::EventHandler;
use crate::tui::components::star_rating::StarRating;
use crate::tui::event::TuiEvent;

/// Persistent state for the book table.
pub struct BookTableState {
    pub selected: usize,
    pub confirm_delete: bool,
    pub table_state: TableState,
    /// Number of rows, synced from the book list before each event/render.
    pub row_count: usize,
}

impl Default for BookTableState {
    fn default() -> Self {
        Self::new()
    }
}

impl BookTableState {
    pub fn new() -> Self {
        Self {
            selected: 0,
            confirm_delete: false,
            table_state: TableState::default(),
            row_count: 0,
        }
    }

    /// Keep the cursor inside the list after loads and deletes.
    pub fn sync_rows(&mut self, row_count: usize) {
        self.row_count = row_count;
        if row_count == 0 {
            self.selected = 0;
            self.table_state.select(None);
        } else {
            self.selected = self.selected.min(row_count - 1);
            self.table_state.select(Some(self.selected));
        }
    }
}

/// Events emitted by the book table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookTableEvent {
    Sort(SortKey),
    Edit(usize),
    Delete(usize),
    Add,
    Reload,
    Quit,
}

impl EventHandler for BookTableState {
    type Event = BookTableEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<BookTableEvent> {
        // Reset delete confirmation on any non-delete key
        let is_delete_key = matches!(event, TuiEvent::InputChar('d'));
        if !is_delete_key {
            self.confirm_delete = false;
        }

        let has_rows = self.row_count > 0;
        match event {
            TuiEvent::Escape | TuiEvent::InputChar('q') => Some(BookTableEvent::Quit),
            TuiEvent::CursorUp | TuiEvent::InputChar('k') => {
                if has_rows {
                    self.selected = self.selected.saturating_sub(1);
                    self.table_state.select(Some(self.selected));
                }
                None
            }
            TuiEvent::CursorDown | TuiEvent::InputChar('j') => {
                if has_rows {
                    self.selected = (self.selected + 1).min(self.row_count - 1);
                    self.table_state.select(Some(self.selected));
                }
                None
            }
            TuiEvent::InputChar('t') => Some(BookTableEvent::Sort(SortKey::Title)),
            TuiEvent::InputChar('a') => Some(BookTableEvent::Sort(SortKey::Author)),
            TuiEvent::InputChar('y') => Some(BookTableEvent::Sort(SortKey::Year)),
            TuiEvent::Submit | TuiEvent::InputChar('e') => {
                has_rows.then_some(BookTableEvent::Edit(self.selected))
            }
            TuiEvent::InputChar('n') => Some(BookTableEvent::Add),
            TuiEvent::InputChar('r') => Some(BookTableEvent::Reload),
            TuiEvent::InputChar('d') => {
                if !has_rows {
                    return None;
                }
                if self.confirm_delete {
                    self.confirm_delete = false;
                    Some(BookTableEvent::Delete(self.selected))
                } else {
                    self.confirm_delete = true;
                    None
                }
            }
            _ => None,
        }
    }
}

/// Transient render wrapper for the book table.
pub struct BookTable<'a> {
    state: &'a mut BookTableState,
    list: &'a BookListState,
}

impl<'a> BookTable<'a> {
    pub fn new(state: &'a mut BookTableState, list: &'a BookListState) -> Self {
        Self { state, list }
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        self.state.sync_rows(self.list.books.len());

        let help_text = if self.state.confirm_delete {
            " Press d again to confirm delete | any other key cancels "
        } else {
            " t/a/y Sort  Enter Edit  d Delete  n Add  r Reload  q Quit "
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" All Books ")
            .title_alignment(Alignment::Left)
            .title_bottom(Line::from(help_text).centered())
            .padding(Padding::horizontal(1));

        let misc_error = self.list.errors.get(MISC);
        let [table_area, error_area] = Layout::vertical([
            Constraint::Min(0),
            Constraint::Length(if misc_error.is_some() { 1 } else { 0 }),
        ])
        .areas(area);

        if let Some(message) = misc_error {
            frame.render_widget(
                Span::styled(message.to_string(), Style::default().fg(Color::Red)),
                error_area,
            );
        }

        match &self.list.phase {
            ListPhase::Loading => {
                let loading = Paragraph::new("Loading books...")
                    .style(Style::default().fg(Color::DarkGray))
                    .alignment(Alignment::Center)
                    .block(block);
                frame.render_widget(loading, table_area);
                return;
            }
            ListPhase::Failed(message) => {
                let failed = Paragraph::new(vec![
                    Line::from(Span::styled(
                        "Could not load your books.",
                        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                    )),
                    Line::from(message.clone()),
                    Line::default(),
                    Line::from("Press r to try again."),
                ])
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true })
                .block(block.title(" ERROR "));
                frame.render_widget(failed, table_area);
                return;
            }
            ListPhase::Ready => {}
        }

        if self.list.books.is_empty() {
            let empty = Paragraph::new("No books yet. Press n to add one.")
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center)
                .block(block);
            frame.render_widget(empty, table_area);
            return;
        }

        let header = Row::new(vec![
            Cell::from(self.header_label(SortKey::Title)),
            Cell::from(self.header_label(SortKey::Author)),
            Cell::from(self.header_label(SortKey::Year)),
            Cell::from("Read"),
            Cell::from("Rating"),
        ])
        .style(
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        );

        let rows: Vec<Row> = self
            .list
            .books
            .iter()
            .enumerate()
            .map(|(i, book)| {
                let read = if book.read {
                    Span::styled("✓", Style::default().fg(Color::Green))
                } else {
                    Span::raw(" ")
                };
                let mut style = Style::default().fg(Color::Gray);
                if self.list.is_delete_pending(book.id) {
                    style = style.add_modifier(Modifier::DIM | Modifier::CROSSED_OUT);
                }
                if i == self.state.selected && self.state.confirm_delete {
                    style = Style::default().fg(Color::Red).add_modifier(Modifier::BOLD);
                }
                Row::new(vec![
                    Cell::from(book.title.clone()),
                    Cell::from(book.author.clone()),
                    Cell::from(book.year.clone()),
                    Cell::from(read),
                    Cell::from(StarRating::compact(book.rating)),
                ])
                .style(style)
            })
            .collect();

        let widths = [
            Constraint::Fill(3),
            Constraint::Fill(2),
            Constraint::Length(8),
            Constraint::Length(4),
            Constraint::Length(6),
        ];

        let table = Table::new(rows, widths)
            .header(header)
            .block(block)
            .column_spacing(2)
            .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED));

        frame.render_stateful_widget(table, table_area, &mut self.state.table_state);
    }

    /// Column header with a marker on the column the list was last sorted by.
    fn header_label(&self, key: SortKey) -> String {
        if self.list.last_sort == Some(key) {
            format!("{} ▼", key.label())
        } else {
            key.label().to_string()
        }
    }
}
