//! # Edit Form
//!
//! Form state for the edit screen, rebuilt from the edit route's parameters.

use crate::core::book::{Book, MAX_RATING};
use crate::core::book_list::{FieldErrors, MISC};
use crate::core::route::{EditMode, EditParams};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Title,
    Author,
    Year,
    Read,
    Rating,
}

impl Field {
    pub const ALL: [Field; 5] = [
        Field::Title,
        Field::Author,
        Field::Year,
        Field::Read,
        Field::Rating,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Field::Title => "title",
            Field::Author => "author",
            Field::Year => "year",
            Field::Read => "read",
            Field::Rating => "rating",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Field::Title => "Title",
            Field::Author => "Author",
            Field::Year => "Year",
            Field::Read => "Read",
            Field::Rating => "Rating",
        }
    }

    pub fn next(self) -> Self {
        match self {
            Field::Title => Field::Author,
            Field::Author => Field::Year,
            Field::Year => Field::Read,
            Field::Read => Field::Rating,
            Field::Rating => Field::Title,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Field::Title => Field::Rating,
            Field::Author => Field::Title,
            Field::Year => Field::Author,
            Field::Read => Field::Year,
            Field::Rating => Field::Read,
        }
    }

    pub fn is_text(self) -> bool {
        matches!(self, Field::Title | Field::Author | Field::Year)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditForm {
    pub mode: EditMode,
    pub book_id: i64,
    pub title: String,
    pub author: String,
    pub year: String,
    pub read: bool,
    pub rating: u8,
    pub focus: Field,
    pub errors: FieldErrors,
    /// A save request is in flight.
    pub saving: bool,
}

impl EditForm {
    pub fn from_params(params: &EditParams) -> Self {
        Self {
            mode: params.mode,
            book_id: params.book_id,
            title: params.book_title.clone(),
            author: params.book_author.clone(),
            year: params.book_year.clone(),
            read: params.book_read,
            rating: params.book_rating.min(MAX_RATING),
            focus: Field::Title,
            errors: FieldErrors::new(),
            saving: false,
        }
    }

    fn text_mut(&mut self, field: Field) -> Option<&mut String> {
        match field {
            Field::Title => Some(&mut self.title),
            Field::Author => Some(&mut self.author),
            Field::Year => Some(&mut self.year),
            Field::Read | Field::Rating => None,
        }
    }

    pub fn input_char(&mut self, c: char) {
        let focus = self.focus;
        if let Some(text) = self.text_mut(focus) {
            text.push(c);
            return;
        }
        match (focus, c) {
            (Field::Read, ' ') => self.read = !self.read,
            (Field::Rating, '0'..='5') => {
                self.on_rating_selected(c.to_digit(10).map_or(0, |d| d as u8));
            }
            _ => {}
        }
    }

    pub fn backspace(&mut self) {
        let focus = self.focus;
        if let Some(text) = self.text_mut(focus) {
            text.pop();
        }
    }

    pub fn on_rating_selected(&mut self, rating: u8) {
        self.rating = rating.min(MAX_RATING);
    }

    pub fn increase_rating(&mut self) {
        self.on_rating_selected(self.rating.saturating_add(1));
    }

    pub fn decrease_rating(&mut self) {
        self.on_rating_selected(self.rating.saturating_sub(1));
    }

    /// Check the fields, replacing `errors` with what was found.
    pub fn validate(&mut self) -> bool {
        self.errors.clear();
        if self.title.trim().is_empty() {
            self.errors.set(Field::Title.name(), "Title is required");
        }
        if self.author.trim().is_empty() {
            self.errors.set(Field::Author.name(), "Author is required");
        }
        if self.year.trim().is_empty() {
            self.errors.set(Field::Year.name(), "Year is required");
        }
        if self.rating > MAX_RATING {
            self.errors
                .set(Field::Rating.name(), "Rating must be between 0 and 5");
        }
        self.errors.is_empty()
    }

    /// Validate and, if the form is clean, produce the book to send.
    pub fn submit(&mut self) -> Option<Book> {
        if !self.validate() {
            return None;
        }
        Some(Book {
            id: self.book_id,
            title: self.title.trim().to_string(),
            author: self.author.trim().to_string(),
            year: self.year.trim().to_string(),
            read: self.read,
            rating: self.rating,
        })
    }

    pub fn set_save_error(&mut self, message: impl Into<String>) {
        self.saving = false;
        self.errors.set(MISC, message);
    }
}
