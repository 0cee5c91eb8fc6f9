//! # TUI Components
//!
//! All UI components for the terminal interface.
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! - `TitleBar`: Top status bar with the session menu
//! - `LandingPage`: Centered splash for the landing and login screens
//! - `StarRating`: 0–5 star display
//!
//! ### Stateful Components (Event-Driven)
//!
//! - `BookTable`: Sortable book list with edit/delete
//! - `EditFormView`: Field editor for one book
//!
//! Components receive external data as props, never by reaching into
//! global state, which keeps them testable with `TestBackend`.
//!
//! ```text
//! components/
//! ├── mod.rs          (this file)
//! ├── title_bar.rs    (Top status bar)
//! ├── landing.rs      (Landing / login splash)
//! ├── star_rating.rs  (Rating display)
//! ├── book_table.rs   (List screen)
//! └── edit_form.rs    (Edit screen)
//! ```

mod title_bar;
pub use title_bar::TitleBar;

pub mod book_table;
pub mod edit_form;
pub mod landing;
pub mod star_rating;
pub use book_table::{BookTable, BookTableEvent, BookTableState};
pub use edit_form::{EditFormView, FormEvent, handle_form_event};
pub use landing::LandingPage;
