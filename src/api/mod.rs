//! # Books API
//!
//! The remote REST API is an external collaborator. This module defines the
//! `BooksApi` seam the rest of the client talks to, and `HttpBooksApi`, the
//! `reqwest` implementation of it.
//!
//! The session token always travels as the `token` query parameter, never as
//! a header. The server only understands that form.

pub mod client;
pub mod types;

use std::fmt;

use async_trait::async_trait;

use crate::core::book::{Book, DecodeError};

pub use client::HttpBooksApi;

/// Errors that can occur while talking to the books API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Network-level failure (timeout, DNS, connection refused).
    Network(String),
    /// The API answered with a non-success status.
    Api { status: u16, message: String },
    /// The response body was not the JSON we expected.
    Parse(String),
    /// A book in the response was malformed.
    Decode(DecodeError),
}

impl ApiError {
    /// Short text suitable for showing to the user.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Api { status: 401, .. } => {
                "Not authorized. Your session may have expired.".to_string()
            }
            ApiError::Api { message, .. } if !message.is_empty() => message.clone(),
            other => other.to_string(),
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Network(msg) => write!(f, "network error: {msg}"),
            ApiError::Api { status, message } => {
                write!(f, "API error (HTTP {status}): {message}")
            }
            ApiError::Parse(msg) => write!(f, "parse error: {msg}"),
            ApiError::Decode(e) => write!(f, "decode error: {e}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<DecodeError> for ApiError {
    fn from(e: DecodeError) -> Self {
        ApiError::Decode(e)
    }
}

#[async_trait]
pub trait BooksApi: Send + Sync {
    /// All books belonging to the user the token identifies.
    async fn list_books(&self, token: &str) -> Result<Vec<Book>, ApiError>;

    async fn delete_book(&self, token: &str, id: i64) -> Result<(), ApiError>;

    /// Replace the stored fields of `book.id` with those of `book`.
    async fn update_book(&self, token: &str, book: &Book) -> Result<(), ApiError>;

    /// Store a new book and return the id the API assigned to it.
    async fn create_book(&self, token: &str, book: &Book) -> Result<i64, ApiError>;
}
