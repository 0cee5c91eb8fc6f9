//! # Core Application Logic
//!
//! This module contains Bookshelf's business logic.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • State (app data)     │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │                         │
//!                    │  No I/O. No UI.         │
//!                    └───────────┬─────────────┘
//!                                │
//!                    ┌───────────┴───────────┐
//!                    ▼                       ▼
//!             ┌────────────┐          ┌────────────┐
//!             │    TUI     │          │    API     │
//!             │  Adapter   │          │  (reqwest) │
//!             │ (ratatui)  │          │            │
//!             └────────────┘          └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`book`]: The `Book` entity and its wire decoder
//! - [`sort`]: Column sorting
//! - [`book_list`]: List screen state (load, sort, edit, delete)
//! - [`edit`]: Edit screen form
//! - [`route`]: Screens and edit-route parameters
//! - [`session`]: Read-only session token
//! - [`state`]: The `App` struct holding all application state
//! - [`action`]: The `Action` enum and the `update()` reducer
//! - [`config`]: Layered configuration

pub mod action;
pub mod book;
pub mod book_list;
pub mod config;
pub mod edit;
pub mod route;
pub mod session;
pub mod sort;
pub mod state;
