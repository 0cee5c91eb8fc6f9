//! Wire types for the books API.
//!
//! Book entries are kept as raw `serde_json::Value`s here and decoded one by
//! one with [`decode_book`](crate::core::book::decode_book).

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::core::book::Book;

/// Body of `GET /api/v1/books`.
#[derive(Deserialize, Debug)]
pub struct BooksResponse {
    #[serde(default)]
    pub message: Option<String>,
    pub books: Vec<Value>,
}

/// Body of most other responses, success or failure.
#[derive(Deserialize, Debug, Default)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: Option<String>,
    /// Only present after a successful `POST`.
    #[serde(default)]
    pub id: Option<i64>,
}

/// Request body for `POST` and `PUT`. The id travels in the path, not here.
#[derive(Serialize, Debug, PartialEq, Eq)]
pub struct BookPayload<'a> {
    pub title: &'a str,
    pub author: &'a str,
    pub year: &'a str,
    pub read: bool,
    pub rating: u8,
}

impl<'a> From<&'a Book> for BookPayload<'a> {
    fn from(book: &'a Book) -> Self {
        Self {
            title: &book.title,
            author: &book.author,
            year: &book.year,
            read: book.read,
            rating: book.rating,
        }
    }
}
