//! # Routes
//!
//! Every screen the client can show, plus the parameters the edit screen is
//! built from.
//!
//! The edit screen never re-fetches its book. Everything it shows comes from
//! `EditParams`, which mirrors the query string of the edit route:
//!
//! ```text
//! edit?mode=edit&book_id=7&book_title=Dune&book_author=Frank%20Herbert
//!     &book_year=1965&book_read=true&book_rating=4
//! ```

use reqwest::Url;
use std::fmt;

use crate::core::book::{Book, MAX_RATING};
use crate::core::session::SessionContext;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// Landing screen. Immediately redirects based on the session.
    Home,
    Login,
    BookList,
    Edit(EditParams),
}

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Route::Home => "home",
            Route::Login => "login",
            Route::BookList => "book-manager",
            Route::Edit(_) => "edit",
        }
    }
}

/// Where the landing screen sends the user: the book list with a token,
/// the login screen without one.
pub fn landing_route(session: &SessionContext) -> Route {
    if session.is_authenticated() {
        Route::BookList
    } else {
        Route::Login
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditMode {
    Edit,
    Add,
}

impl EditMode {
    pub fn as_str(self) -> &'static str {
        match self {
            EditMode::Edit => "edit",
            EditMode::Add => "add",
        }
    }
}

/// Navigation parameters for the edit route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditParams {
    pub mode: EditMode,
    pub book_id: i64,
    pub book_title: String,
    pub book_author: String,
    pub book_year: String,
    pub book_read: bool,
    pub book_rating: u8,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    Missing(&'static str),
    Invalid { key: &'static str, value: String },
}

impl fmt::Display for QueryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryError::Missing(key) => write!(f, "missing query parameter `{key}`"),
            QueryError::Invalid { key, value } => {
                write!(f, "invalid value `{value}` for query parameter `{key}`")
            }
        }
    }
}

impl std::error::Error for QueryError {}

impl EditParams {
    /// Parameters for editing an existing book, taken from its current values.
    pub fn for_book(book: &Book) -> Self {
        Self {
            mode: EditMode::Edit,
            book_id: book.id,
            book_title: book.title.clone(),
            book_author: book.author.clone(),
            book_year: book.year.clone(),
            book_read: book.read,
            book_rating: book.rating,
        }
    }

    /// Parameters for a blank "add book" form. The id stays 0 until the API
    /// assigns one.
    pub fn new_book() -> Self {
        Self {
            mode: EditMode::Add,
            book_id: 0,
            book_title: String::new(),
            book_author: String::new(),
            book_year: String::new(),
            book_read: false,
            book_rating: 0,
        }
    }

    /// Render as an encoded `edit?...` route string.
    pub fn to_query(&self) -> String {
        let mut url = route_base();
        url.query_pairs_mut()
            .append_pair("mode", self.mode.as_str())
            .append_pair("book_id", &self.book_id.to_string())
            .append_pair("book_title", &self.book_title)
            .append_pair("book_author", &self.book_author)
            .append_pair("book_year", &self.book_year)
            .append_pair("book_read", &self.book_read.to_string())
            .append_pair("book_rating", &self.book_rating.to_string());
        format!("edit?{}", url.query().unwrap_or_default())
    }

    /// Parse an `edit?...` route string produced by [`EditParams::to_query`].
    pub fn from_query(route: &str) -> Result<Self, QueryError> {
        let query = route.split_once('?').map_or(route, |(_, q)| q);
        let mut url = route_base();
        url.set_query(Some(query));
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        let get = |key: &'static str| -> Result<String, QueryError> {
            pairs
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.clone())
                .ok_or(QueryError::Missing(key))
        };
        let invalid = |key: &'static str, value: &str| QueryError::Invalid {
            key,
            value: value.to_string(),
        };

        let mode = match get("mode")?.as_str() {
            "edit" => EditMode::Edit,
            "add" => EditMode::Add,
            other => return Err(invalid("mode", other)),
        };
        let id = get("book_id")?;
        let book_title = get("book_title")?;
        let book_author = get("book_author")?;
        let book_year = get("book_year")?;
        let read = get("book_read")?;
        let rating = get("book_rating")?;

        Ok(Self {
            mode,
            book_id: id.parse().map_err(|_| invalid("book_id", &id))?,
            book_title,
            book_author,
            book_year,
            book_read: match read.as_str() {
                "true" | "1" => true,
                "false" | "0" => false,
                other => return Err(invalid("book_read", other)),
            },
            book_rating: rating
                .parse::<u8>()
                .ok()
                .filter(|r| *r <= MAX_RATING)
                .ok_or_else(|| invalid("book_rating", &rating))?,
        })
    }
}

fn route_base() -> Url {
    // Only used as a carrier for the query-string encoder.
    Url::parse("app://bookshelf/edit").expect("static route URL parses")
}
