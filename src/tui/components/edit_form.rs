//! # Edit Form Component
//!
//! Renders the edit screen for an `EditForm` and turns key presses into
//! form edits or save/cancel requests.
//!
//! Text fields take typed characters directly. On `Read`, space toggles.
//! On `Rating`, digits 0-5 or ←/→ pick the star count.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Padding, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::core::book_list::MISC;
use crate::core::edit::{EditForm, Field};
use crate::core::route::EditMode;
use crate::tui::components::star_rating::StarRating;
use crate::tui::event::TuiEvent;

/// Width reserved for field labels, including the trailing ": ".
const LABEL_WIDTH: u16 = 9;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormEvent {
    Save,
    Cancel,
    RatingSelected(u8),
}

/// Apply a key press to the form. Returns an event when the screen needs
/// to do more than edit a field.
pub fn handle_form_event(form: &mut EditForm, event: &TuiEvent) -> Option<FormEvent> {
    match event {
        TuiEvent::Escape => Some(FormEvent::Cancel),
        TuiEvent::Submit => Some(FormEvent::Save),
        TuiEvent::NextField | TuiEvent::CursorDown => {
            form.focus = form.focus.next();
            None
        }
        TuiEvent::PrevField | TuiEvent::CursorUp => {
            form.focus = form.focus.prev();
            None
        }
        TuiEvent::CursorRight if form.focus == Field::Rating => {
            Some(FormEvent::RatingSelected(form.rating.saturating_add(1)))
        }
        TuiEvent::CursorLeft if form.focus == Field::Rating => {
            Some(FormEvent::RatingSelected(form.rating.saturating_sub(1)))
        }
        TuiEvent::CursorLeft | TuiEvent::CursorRight if form.focus == Field::Read => {
            form.read = !form.read;
            None
        }
        TuiEvent::InputChar(c @ '0'..='5') if form.focus == Field::Rating => {
            c.to_digit(10).map(|d| FormEvent::RatingSelected(d as u8))
        }
        TuiEvent::InputChar(c) => {
            form.input_char(*c);
            None
        }
        TuiEvent::Paste(text) if form.focus.is_text() => {
            // Fields are single-line
            for c in text.chars().filter(|c| !c.is_control()) {
                form.input_char(c);
            }
            None
        }
        TuiEvent::Backspace => {
            form.backspace();
            None
        }
        _ => None,
    }
}

/// Transient render wrapper for the edit screen.
pub struct EditFormView<'a> {
    form: &'a EditForm,
}

impl<'a> EditFormView<'a> {
    pub fn new(form: &'a EditForm) -> Self {
        Self { form }
    }

    fn field_value(&self, field: Field) -> Line<'static> {
        let focused = self.form.focus == field;
        match field {
            Field::Title => Line::from(self.form.title.clone()),
            Field::Author => Line::from(self.form.author.clone()),
            Field::Year => Line::from(self.form.year.clone()),
            Field::Read => Line::from(if self.form.read { "[x] read" } else { "[ ] not read" }),
            Field::Rating => StarRating::new(self.form.rating, focused).line(),
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let title = match self.form.mode {
            EditMode::Edit => format!(" Edit Book #{} ", self.form.book_id),
            EditMode::Add => " Add Book ".to_string(),
        };
        let help_text = if self.form.saving {
            " Saving... "
        } else {
            " Tab Next field  Enter Save  Esc Cancel "
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(title)
            .title_alignment(Alignment::Left)
            .title_bottom(Line::from(help_text).centered())
            .padding(Padding::uniform(1));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        // Each field takes two rows: value, then its error (if any).
        let mut constraints: Vec<Constraint> =
            Field::ALL.iter().map(|_| Constraint::Length(2)).collect();
        constraints.push(Constraint::Length(1));
        constraints.push(Constraint::Min(0));
        let rows = Layout::vertical(constraints).split(inner);

        for (i, field) in Field::ALL.iter().enumerate() {
            let focused = self.form.focus == *field;
            let label_style = if focused {
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };
            let [value_row, error_row] =
                Layout::vertical([Constraint::Length(1), Constraint::Length(1)]).areas(rows[i]);
            let [label_area, value_area] =
                Layout::horizontal([Constraint::Length(LABEL_WIDTH), Constraint::Min(0)])
                    .areas(value_row);

            frame.render_widget(
                Span::styled(format!("{}:", field.label()), label_style),
                label_area,
            );
            frame.render_widget(self.field_value(*field), value_area);

            if let Some(message) = self.form.errors.get(field.name()) {
                frame.render_widget(
                    Span::styled(message.to_string(), Style::default().fg(Color::Red)),
                    Rect {
                        x: value_area.x,
                        width: value_area.width,
                        ..error_row
                    },
                );
            }

            if focused && field.is_text() {
                let text = match field {
                    Field::Title => &self.form.title,
                    Field::Author => &self.form.author,
                    _ => &self.form.year,
                };
                let offset = (text.width() as u16).min(value_area.width.saturating_sub(1));
                frame.set_cursor_position(Position::new(value_area.x + offset, value_area.y));
            }
        }

        if let Some(message) = self.form.errors.get(MISC) {
            let misc_row = rows[Field::ALL.len()];
            frame.render_widget(
                Paragraph::new(message.to_string()).style(Style::default().fg(Color::Red)),
                misc_row,
            );
        }
    }
}
