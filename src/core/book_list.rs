//! # Book List State
//!
//! In-memory state behind the book table: the ordered collection, the scratch
//! copy that seeds the edit flow, and the per-field error messages.
//!
//! ```text
//! BookListState
//! ├── books: Vec<Book>             // rendered order
//! ├── selected_book: Book          // independent copy for editing
//! ├── errors: FieldErrors          // field name -> message
//! ├── phase: ListPhase             // Loading | Ready | Failed
//! └── pending_deletes: HashSet     // ids with a DELETE in flight
//! ```
//!
//! Deletes are keyed by id. The index is only used to find the id when the
//! user asks for the delete. When the response arrives the list may have been
//! re-sorted, so the entry is located again by id.

use log::{debug, info, warn};
use std::collections::{BTreeMap, HashSet};
use std::fmt;

use crate::api::ApiError;
use crate::core::book::{Book, MAX_RATING};
use crate::core::route::EditParams;
use crate::core::sort::{SortKey, sort_books};

/// Field name used for errors that do not belong to a single field.
pub const MISC: &str = "misc";

/// Validation and request errors keyed by field name (`title`, `author`,
/// `year`, `rating`, `misc`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, field: &str, message: impl Into<String>) {
        self.0.insert(field.to_string(), message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListPhase {
    /// Mounted, waiting for the first fetch to finish.
    Loading,
    /// Fetch completed. The list may be empty.
    Ready,
    /// Fetch failed. Whatever was in `books` before is left untouched.
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListError {
    IndexOutOfRange { index: usize, len: usize },
    /// A delete for this book is already in flight.
    DeletePending(i64),
}

impl fmt::Display for ListError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListError::IndexOutOfRange { index, len } => {
                write!(f, "row {index} does not exist (list has {len} books)")
            }
            ListError::DeletePending(id) => write!(f, "book {id} is already being deleted"),
        }
    }
}

impl std::error::Error for ListError {}

#[derive(Debug, Clone)]
pub struct BookListState {
    pub books: Vec<Book>,
    pub selected_book: Book,
    pub errors: FieldErrors,
    pub phase: ListPhase,
    pub last_sort: Option<SortKey>,
    pending_deletes: HashSet<i64>,
}

impl Default for BookListState {
    fn default() -> Self {
        Self::new()
    }
}

impl BookListState {
    pub fn new() -> Self {
        Self {
            books: Vec::new(),
            selected_book: Book::default(),
            errors: FieldErrors::new(),
            phase: ListPhase::Loading,
            last_sort: None,
            pending_deletes: HashSet::new(),
        }
    }

    /// Apply the result of the mount-time fetch.
    pub fn apply_load(&mut self, result: Result<Vec<Book>, ApiError>) {
        match result {
            Ok(books) => {
                info!("Book list loaded: {} books", books.len());
                self.books = books;
                self.phase = ListPhase::Ready;
            }
            Err(e) => {
                warn!("Book list load failed: {}", e);
                self.phase = ListPhase::Failed(e.user_message());
            }
        }
    }

    pub fn sort_by(&mut self, key: SortKey) {
        debug!("Sorting {} books by {:?}", self.books.len(), key);
        sort_books(&mut self.books, key);
        self.last_sort = Some(key);
    }

    pub fn sort_by_title(&mut self) {
        self.sort_by(SortKey::Title);
    }

    pub fn sort_by_author(&mut self) {
        self.sort_by(SortKey::Author);
    }

    pub fn sort_by_year(&mut self) {
        self.sort_by(SortKey::Year);
    }

    /// Copy the book at `index` into `selected_book` and return the
    /// parameters for the edit route.
    pub fn on_edit(&mut self, index: usize) -> Result<EditParams, ListError> {
        self.selected_book = self.book_at(index)?.clone();
        info!(
            "Editing book {} ({})",
            self.selected_book.id, self.selected_book.title
        );
        Ok(EditParams::for_book(&self.selected_book))
    }

    /// Resolve the id of the book at `index` and mark it as being deleted.
    /// The caller issues the `DELETE` for the returned id.
    pub fn on_delete(&mut self, index: usize) -> Result<i64, ListError> {
        let id = self.book_at(index)?.id;
        if !self.pending_deletes.insert(id) {
            return Err(ListError::DeletePending(id));
        }
        info!("Deleting book {} (row {})", id, index);
        Ok(id)
    }

    /// Apply the result of a `DELETE` for `id`.
    ///
    /// Success removes the one entry whose id matches, wherever it is now.
    /// Failure stores a message under `misc`.
    pub fn apply_delete(&mut self, id: i64, result: Result<(), ApiError>) {
        self.pending_deletes.remove(&id);
        match result {
            Ok(()) => match self.books.iter().position(|b| b.id == id) {
                Some(pos) => {
                    self.books.remove(pos);
                    self.errors.clear();
                    debug!("Removed book {} from row {}", id, pos);
                }
                None => debug!("Deleted book {} was no longer in the list", id),
            },
            Err(e) => {
                warn!("Delete of book {} failed: {}", id, e);
                self.errors.set(MISC, e.user_message());
            }
        }
    }

    pub fn is_delete_pending(&self, id: i64) -> bool {
        self.pending_deletes.contains(&id)
    }

    /// Set the rating on the scratch copy. Values above 5 are clamped.
    pub fn on_rating_selected(&mut self, rating: u8) {
        self.selected_book.rating = rating.min(MAX_RATING);
    }

    fn book_at(&self, index: usize) -> Result<&Book, ListError> {
        self.books.get(index).ok_or_else(|| {
            let err = ListError::IndexOutOfRange {
                index,
                len: self.books.len(),
            };
            warn!("Ignoring action on invalid row: {}", err);
            err
        })
    }
}
