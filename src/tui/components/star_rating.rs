//! # Star Rating
//!
//! Displays a 0–5 rating as stars. Stateless; used in table cells and on
//! the edit form.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use crate::core::book::MAX_RATING;
use crate::tui::component::Component;

pub struct StarRating {
    pub rating: u8,
    /// Highlight the widget when it has keyboard focus.
    pub focused: bool,
}

impl StarRating {
    pub fn new(rating: u8, focused: bool) -> Self {
        Self { rating, focused }
    }

    /// Compact form for table cells: `4 ★`, or blank for an unrated book.
    pub fn compact(rating: u8) -> Line<'static> {
        if rating == 0 {
            return Line::default();
        }
        Line::from(vec![
            Span::raw(format!("{rating} ")),
            Span::styled("★", Style::default().fg(Color::Yellow)),
        ])
    }

    pub fn line(&self) -> Line<'static> {
        let filled = self.rating.min(MAX_RATING) as usize;
        let empty = MAX_RATING as usize - filled;
        let mut star_style = Style::default().fg(Color::Yellow);
        if self.focused {
            star_style = star_style.add_modifier(Modifier::BOLD);
        }
        Line::from(vec![
            Span::styled("★".repeat(filled), star_style),
            Span::styled("☆".repeat(empty), Style::default().fg(Color::DarkGray)),
        ])
    }
}

impl Component for StarRating {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        frame.render_widget(self.line(), area);
    }
}
