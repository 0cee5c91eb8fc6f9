//! # Column Sorting
//!
//! Case-insensitive, ascending, in-place sorts over the book list.
//!
//! Every column is compared as a lowercased string. That includes `year`,
//! so "10" sorts before "2". The year is stored as free text by the API and
//! the existing ordering is kept as-is.
//!
//! `slice::sort_by` is stable, so books with equal keys keep their relative
//! order and sorting twice by the same key is a no-op.

use std::cmp::Ordering;

use crate::core::book::Book;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Title,
    Author,
    Year,
}

impl SortKey {
    pub fn label(self) -> &'static str {
        match self {
            SortKey::Title => "Title",
            SortKey::Author => "Author",
            SortKey::Year => "Year",
        }
    }

    fn field(self, book: &Book) -> &str {
        match self {
            SortKey::Title => &book.title,
            SortKey::Author => &book.author,
            SortKey::Year => &book.year,
        }
    }
}

/// Three-way, case-insensitive comparison of two strings.
pub fn compare_ci(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}

pub fn sort_books(books: &mut [Book], key: SortKey) {
    books.sort_by(|a, b| compare_ci(key.field(a), key.field(b)));
}
