use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info, warn};

use super::types::{BookPayload, BooksResponse, MessageResponse};
use super::{ApiError, BooksApi};
use crate::core::book::{Book, decode_books};

/// `BooksApi` over HTTP.
///
/// # Example
/// ```no_run
/// use std::time::Duration;
/// use bookshelf::api::{BooksApi, HttpBooksApi};
///
/// # async fn demo() -> Result<(), bookshelf::api::ApiError> {
/// let api = HttpBooksApi::new("http://localhost:9080".to_string(), Duration::from_secs(30));
/// let books = api.list_books("my-session-token").await?;
/// for book in &books {
///     println!("{} by {}", book.title, book.author);
/// }
/// # Ok(())
/// # }
/// ```
pub struct HttpBooksApi {
    base_url: String,
    client: reqwest::Client,
}

impl HttpBooksApi {
    pub fn new(base_url: String, timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|e| {
                warn!("Failed to build HTTP client with timeout ({}), using defaults", e);
                reqwest::Client::new()
            });
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    fn books_url(&self) -> String {
        format!("{}/api/v1/books", self.base_url)
    }

    fn book_url(&self, id: i64) -> String {
        format!("{}/api/v1/books/{}", self.base_url, id)
    }
}

/// Turns a non-success response into `ApiError::Api`, pulling the server's
/// `message` out of the body when there is one.
async fn error_for_status(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "unknown error".to_string());
    let message = serde_json::from_str::<MessageResponse>(&body)
        .ok()
        .and_then(|m| m.message)
        .unwrap_or(body);
    warn!("Books API error: {} - {}", status, message);
    Err(ApiError::Api {
        status: status.as_u16(),
        message,
    })
}

#[async_trait]
impl BooksApi for HttpBooksApi {
    async fn list_books(&self, token: &str) -> Result<Vec<Book>, ApiError> {
        info!("GET {}", self.books_url());
        let response = self
            .client
            .get(self.books_url())
            .query(&[("token", token)])
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        debug!("List books response status: {}", response.status());

        let response = error_for_status(response).await?;
        let body: BooksResponse = response
            .json()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))?;

        let books = decode_books(&body.books)?;
        info!("Loaded {} books", books.len());
        Ok(books)
    }

    async fn delete_book(&self, token: &str, id: i64) -> Result<(), ApiError> {
        info!("DELETE {}", self.book_url(id));
        let response = self
            .client
            .delete(self.book_url(id))
            .query(&[("token", token)])
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        debug!("Delete book {} response status: {}", id, response.status());

        // The body carries nothing we need.
        error_for_status(response).await?;
        Ok(())
    }

    async fn update_book(&self, token: &str, book: &Book) -> Result<(), ApiError> {
        info!("PUT {}", self.book_url(book.id));
        let response = self
            .client
            .put(self.book_url(book.id))
            .query(&[("token", token)])
            .json(&BookPayload::from(book))
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        debug!("Update book {} response status: {}", book.id, response.status());

        error_for_status(response).await?;
        Ok(())
    }

    async fn create_book(&self, token: &str, book: &Book) -> Result<i64, ApiError> {
        info!("POST {}", self.books_url());
        let response = self
            .client
            .post(self.books_url())
            .query(&[("token", token)])
            .json(&BookPayload::from(book))
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        debug!("Create book response status: {}", response.status());

        let response = error_for_status(response).await?;
        let body: MessageResponse = response
            .json()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))?;
        body.id
            .ok_or_else(|| ApiError::Parse("response is missing the new book id".to_string()))
    }
}
