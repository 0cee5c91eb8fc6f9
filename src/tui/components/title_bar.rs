//! # TitleBar Component
//!
//! Top status bar: server, status message, and the session menu.
//!
//! ## Session Menu
//!
//! The right-hand side of the bar is the shell's menu. While a session is
//! active it shows `Logout` and hides `Login`/`Register`; otherwise the
//! reverse. The book list screen turns the session signal on when it mounts.
//!
//! ## Conditional Formatting
//!
//! 1. **Status message**: `"Bookshelf (server: http://...) | 3 books"`
//! 2. **Default**: `"Bookshelf (server: http://...)"`

use crate::tui::component::Component;
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

/// Menu entries shown for the current session state.
pub fn menu_items(session_active: bool) -> &'static [&'static str] {
    if session_active {
        &["Logout"]
    } else {
        &["Login", "Register"]
    }
}

/// Top status bar component.
///
/// # Props
///
/// - `server_url`: API base URL
/// - `status_message`: Transient status (e.g., "Loading books...", "Sorted by Title")
/// - `session_active`: Whether the session menu shows Logout or Login/Register
pub struct TitleBar {
    pub server_url: String,
    pub status_message: String,
    pub session_active: bool,
}

impl TitleBar {
    pub fn new(server_url: String, status_message: String, session_active: bool) -> Self {
        Self {
            server_url,
            status_message,
            session_active,
        }
    }

    fn title_text(&self) -> String {
        if self.status_message.is_empty() {
            format!("Bookshelf (server: {})", self.server_url)
        } else {
            format!(
                "Bookshelf (server: {}) | {}",
                self.server_url, self.status_message
            )
        }
    }

    fn menu_line(&self) -> Line<'static> {
        let mut spans = Vec::new();
        for item in menu_items(self.session_active) {
            spans.push(Span::styled(
                format!("[{item}]"),
                Style::default().fg(Color::Cyan),
            ));
            spans.push(Span::raw(" "));
        }
        Line::from(spans).right_aligned()
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let menu = self.menu_line();
        let menu_width = menu.width() as u16;
        let [title_area, menu_area] =
            Layout::horizontal([Constraint::Min(0), Constraint::Length(menu_width)]).areas(area);

        frame.render_widget(Span::raw(self.title_text()), title_area);
        frame.render_widget(menu, menu_area);
    }
}
