use std::time::Duration;

use bookshelf::api::{ApiError, BooksApi, HttpBooksApi};
use bookshelf::core::book::Book;
use serde_json::json;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_json, header_exists, method, path, query_param},
};

// ============================================================================
// Helper Functions
// ============================================================================

fn api_for(server: &MockServer) -> HttpBooksApi {
    HttpBooksApi::new(server.uri(), Duration::from_secs(5))
}

fn dune() -> Book {
    Book {
        id: 7,
        title: "Dune".to_string(),
        author: "Frank Herbert".to_string(),
        year: "1965".to_string(),
        read: true,
        rating: 5,
    }
}

// ============================================================================
// List
// ============================================================================

#[tokio::test]
async fn test_list_books_normalizes_entries() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/books"))
        .and(query_param("token", "tok"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "OK",
            "books": [
                {"id": 1, "title": "Emma", "author": "Jane Austen", "year": "1815", "read": 1, "rating": 3},
                {"id": 2, "title": "Ulysses", "author": "James Joyce", "year": "1922", "read": 0, "rating": 0}
            ]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let books = api_for(&mock_server).list_books("tok").await.unwrap();

    assert_eq!(books.len(), 2);
    assert_eq!(books[0].title, "Emma");
    assert!(books[0].read);
    assert_eq!(books[0].rating, 3);
    assert!(!books[1].read);
}

#[tokio::test]
async fn test_list_books_empty_collection() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/books"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"books": []})))
        .mount(&mock_server)
        .await;

    let books = api_for(&mock_server).list_books("tok").await.unwrap();
    assert!(books.is_empty());
}

#[tokio::test]
async fn test_list_books_malformed_entry_is_decode_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/books"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "books": [{"id": 1, "author": "No Title", "year": "2000", "read": false, "rating": 0}]
        })))
        .mount(&mock_server)
        .await;

    let result = api_for(&mock_server).list_books("tok").await;
    assert!(matches!(result, Err(ApiError::Decode(_))));
}

#[tokio::test]
async fn test_list_books_non_json_body_is_parse_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/books"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&mock_server)
        .await;

    let result = api_for(&mock_server).list_books("tok").await;
    assert!(matches!(result, Err(ApiError::Parse(_))));
}

#[tokio::test]
async fn test_unauthorized_has_session_message() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/books"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({"message": "Invalid token"})),
        )
        .mount(&mock_server)
        .await;

    let err = api_for(&mock_server).list_books("expired").await.unwrap_err();
    assert_eq!(
        err,
        ApiError::Api {
            status: 401,
            message: "Invalid token".to_string()
        }
    );
    assert!(err.user_message().contains("session may have expired"));
}

#[tokio::test]
async fn test_token_is_never_sent_as_header() {
    let mock_server = MockServer::start().await;

    // Anything carrying an Authorization header is rejected
    Mock::given(method("GET"))
        .and(header_exists("authorization"))
        .respond_with(ResponseTemplate::new(400))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(query_param("token", "tok"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"books": []})))
        .mount(&mock_server)
        .await;

    assert!(api_for(&mock_server).list_books("tok").await.is_ok());
}

// ============================================================================
// Delete
// ============================================================================

#[tokio::test]
async fn test_delete_book_targets_id() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/api/v1/books/12"))
        .and(query_param("token", "tok"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "Book removed"})))
        .expect(1)
        .mount(&mock_server)
        .await;

    api_for(&mock_server).delete_book("tok", 12).await.unwrap();
}

#[tokio::test]
async fn test_delete_failure_carries_server_message() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/api/v1/books/12"))
        .respond_with(
            ResponseTemplate::new(500)
                .set_body_json(json!({"message": "ERROR. Book not removed."})),
        )
        .mount(&mock_server)
        .await;

    let err = api_for(&mock_server).delete_book("tok", 12).await.unwrap_err();
    assert_eq!(err.user_message(), "ERROR. Book not removed.");
}

#[tokio::test]
async fn test_error_body_without_json_keeps_raw_text() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(503).set_body_string("Service Unavailable"))
        .mount(&mock_server)
        .await;

    let err = api_for(&mock_server).delete_book("tok", 1).await.unwrap_err();
    assert_eq!(
        err,
        ApiError::Api {
            status: 503,
            message: "Service Unavailable".to_string()
        }
    );
}

// ============================================================================
// Save
// ============================================================================

#[tokio::test]
async fn test_update_book_sends_fields_without_id() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/api/v1/books/7"))
        .and(query_param("token", "tok"))
        .and(body_json(json!({
            "title": "Dune",
            "author": "Frank Herbert",
            "year": "1965",
            "read": true,
            "rating": 5
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "Book updated"})))
        .expect(1)
        .mount(&mock_server)
        .await;

    api_for(&mock_server).update_book("tok", &dune()).await.unwrap();
}

#[tokio::test]
async fn test_create_book_returns_new_id() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/books"))
        .and(query_param("token", "tok"))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(json!({"message": "Book added", "id": 42})),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let id = api_for(&mock_server).create_book("tok", &dune()).await.unwrap();
    assert_eq!(id, 42);
}

#[tokio::test]
async fn test_create_book_without_id_is_parse_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/books"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"message": "Book added"})))
        .mount(&mock_server)
        .await;

    let result = api_for(&mock_server).create_book("tok", &dune()).await;
    assert!(matches!(result, Err(ApiError::Parse(_))));
}
