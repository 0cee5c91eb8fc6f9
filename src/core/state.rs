//! # Application State
//!
//! Core business state for Bookshelf. Domain logic only, no TUI types.
//! Presentation state (table cursor, confirmations) lives in the `tui` module.
//!
//! ```text
//! App
//! ├── api: Arc<dyn BooksApi>        // remote books API
//! ├── session: SessionContext       // read-only token
//! ├── route: Route                  // current screen
//! ├── generation: u64               // bumps on every navigation
//! ├── book_list: BookListState      // list screen state
//! ├── edit_form: Option<EditForm>   // edit screen state
//! ├── session_active: bool          // shell shows Logout, hides Login/Register
//! ├── server_url: String            // shown in the title bar
//! └── status_message: String        // status bar text
//! ```
//!
//! State changes go through `update(state, action)` in action.rs. The one
//! exception is typing into the edit form, which the TUI applies to
//! `edit_form` directly.

use std::sync::Arc;

use crate::api::BooksApi;
use crate::core::book_list::BookListState;
use crate::core::config::ResolvedConfig;
use crate::core::edit::EditForm;
use crate::core::route::Route;
use crate::core::session::SessionContext;

pub struct App {
    pub api: Arc<dyn BooksApi>,
    pub session: SessionContext,
    pub route: Route,
    /// Identifies the currently mounted view. Results tagged with an older
    /// generation belong to a view that has been torn down.
    pub generation: u64,
    pub book_list: BookListState,
    pub edit_form: Option<EditForm>,
    pub session_active: bool,
    pub server_url: String,
    pub status_message: String,
}

impl App {
    pub fn new(api: Arc<dyn BooksApi>, session: SessionContext, server_url: String) -> Self {
        Self {
            api,
            session,
            route: Route::Home,
            generation: 0,
            book_list: BookListState::new(),
            edit_form: None,
            session_active: false,
            server_url,
            status_message: String::from("Welcome to Bookshelf!"),
        }
    }

    pub fn from_config(
        api: Arc<dyn BooksApi>,
        session: SessionContext,
        config: &ResolvedConfig,
    ) -> Self {
        Self::new(api, session, config.base_url.clone())
    }
}
