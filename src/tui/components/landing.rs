//! # Landing Page Component
//!
//! Centered splash used by the landing screen while the session is checked,
//! and by the login screen to explain how to supply a token.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::component::Component;

pub struct LandingPage {
    lines: Vec<String>,
}

impl LandingPage {
    /// Splash shown while the landing screen decides where to go.
    pub fn checking_session() -> Self {
        Self {
            lines: vec!["Checking session...".to_string()],
        }
    }

    /// Shown on the login screen. Logging in happens outside this client.
    pub fn login_required() -> Self {
        Self {
            lines: vec![
                "You are not logged in.".to_string(),
                String::new(),
                "Log in with the web app, then start Bookshelf with one of:".to_string(),
                "  --token <TOKEN>".to_string(),
                "  BOOKSHELF_TOKEN=<TOKEN>".to_string(),
                "  ~/.bookshelf/session.json  {\"token\": \"<TOKEN>\"}".to_string(),
                String::new(),
                "Press q to quit".to_string(),
            ],
        }
    }
}

impl Component for LandingPage {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let mut text_lines = vec![
            Line::from(Span::styled(
                "Book Manager",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                format!("v{}", env!("CARGO_PKG_VERSION")),
                Style::default().fg(Color::DarkGray),
            )),
            Line::default(),
        ];
        text_lines.extend(
            self.lines
                .iter()
                .map(|l| Line::from(Span::styled(l.clone(), Style::default().fg(Color::Gray)))),
        );

        let text_height = text_lines.len() as u16;
        let [text_area] = Layout::vertical([Constraint::Length(text_height)])
            .flex(Flex::Center)
            .areas(area);

        let paragraph = Paragraph::new(text_lines).alignment(Alignment::Center);
        frame.render_widget(paragraph, text_area);
    }
}
