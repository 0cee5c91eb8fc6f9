//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::api::{ApiError, BooksApi};
use crate::core::book::Book;
use crate::core::session::SessionContext;
use crate::core::state::App;

/// An in-memory `BooksApi` that records the calls it receives.
#[derive(Default)]
pub struct FakeApi {
    pub books: Mutex<Vec<Book>>,
    pub calls: Mutex<Vec<String>>,
    pub fail_with: Option<ApiError>,
}

impl FakeApi {
    pub fn with_books(books: Vec<Book>) -> Self {
        Self {
            books: Mutex::new(books),
            ..Default::default()
        }
    }

    fn record(&self, call: String) -> Result<(), ApiError> {
        self.calls.lock().unwrap().push(call);
        match &self.fail_with {
            Some(e) => Err(e.clone()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl BooksApi for FakeApi {
    async fn list_books(&self, token: &str) -> Result<Vec<Book>, ApiError> {
        self.record(format!("GET {token}"))?;
        Ok(self.books.lock().unwrap().clone())
    }

    async fn delete_book(&self, token: &str, id: i64) -> Result<(), ApiError> {
        self.record(format!("DELETE {id} {token}"))?;
        self.books.lock().unwrap().retain(|b| b.id != id);
        Ok(())
    }

    async fn update_book(&self, token: &str, book: &Book) -> Result<(), ApiError> {
        self.record(format!("PUT {} {token}", book.id))?;
        let mut books = self.books.lock().unwrap();
        if let Some(existing) = books.iter_mut().find(|b| b.id == book.id) {
            *existing = book.clone();
        }
        Ok(())
    }

    async fn create_book(&self, token: &str, book: &Book) -> Result<i64, ApiError> {
        self.record(format!("POST {token}"))?;
        let mut books = self.books.lock().unwrap();
        let id = books.iter().map(|b| b.id).max().unwrap_or(0) + 1;
        books.push(Book { id, ..book.clone() });
        Ok(id)
    }
}

pub fn sample_books() -> Vec<Book> {
    vec![
        Book {
            id: 11,
            title: "Zebra Crossing".to_string(),
            author: "Amy Walker".to_string(),
            year: "9".to_string(),
            read: true,
            rating: 4,
        },
        Book {
            id: 12,
            title: "apple orchards".to_string(),
            author: "bo Chen".to_string(),
            year: "10".to_string(),
            read: false,
            rating: 0,
        },
        Book {
            id: 13,
            title: "Middlemarch".to_string(),
            author: "George Eliot".to_string(),
            year: "2".to_string(),
            read: true,
            rating: 5,
        },
    ]
}

/// Creates a test App backed by a `FakeApi` holding `sample_books()`.
pub fn test_app(token: Option<&str>) -> App {
    App::new(
        Arc::new(FakeApi::with_books(sample_books())),
        SessionContext::new(token.map(str::to_string)),
        "http://localhost:9080".to_string(),
    )
}
