//! # Actions
//!
//! Everything that can happen in Bookshelf becomes an `Action`.
//! User presses `t` on the table? That's `Action::Sort(SortKey::Title)`.
//! The API answers? That's `Action::BooksLoaded { .. }`.
//!
//! `update()` takes the current state and an action, mutates the state, and
//! returns an `Effect` describing the I/O the adapter should start. No I/O
//! happens here.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```

use log::{debug, info, warn};

use crate::api::ApiError;
use crate::core::book::Book;
use crate::core::book_list::{BookListState, ListPhase};
use crate::core::edit::EditForm;
use crate::core::route::{EditMode, EditParams, Route, landing_route};
use crate::core::sort::SortKey;
use crate::core::state::App;

#[derive(Debug)]
pub enum Action {
    /// Show a screen. `Route::Home` redirects based on the session.
    Navigate(Route),
    /// Fetch the book list again (list screen only).
    Reload,
    BooksLoaded {
        generation: u64,
        result: Result<Vec<Book>, ApiError>,
    },
    Sort(SortKey),
    /// Open the edit screen for the book in this row.
    EditBook(usize),
    /// Open a blank edit screen in add mode.
    AddBook,
    DeleteBook(usize),
    BookDeleted {
        generation: u64,
        id: i64,
        result: Result<(), ApiError>,
    },
    /// Star rating picked on the list screen's scratch copy.
    RatingSelected(u8),
    SaveEdit,
    /// `Ok` carries the id of the saved book.
    BookSaved {
        generation: u64,
        result: Result<i64, ApiError>,
    },
    CancelEdit,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    Quit,
    FetchBooks {
        token: String,
        generation: u64,
    },
    DeleteBook {
        token: String,
        generation: u64,
        id: i64,
    },
    SaveBook {
        token: String,
        generation: u64,
        mode: EditMode,
        book: Book,
    },
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::Navigate(route) => navigate(app, route),
        Action::Reload => {
            if app.route != Route::BookList {
                return Effect::None;
            }
            app.book_list.phase = ListPhase::Loading;
            fetch_books(app)
        }
        Action::BooksLoaded { generation, result } => {
            if generation != app.generation {
                debug!("Dropping book list from stale view (generation {generation})");
                return Effect::None;
            }
            app.book_list.apply_load(result);
            app.status_message = format!("{} books", app.book_list.books.len());
            Effect::None
        }
        Action::Sort(key) => {
            app.book_list.sort_by(key);
            app.status_message = format!("Sorted by {}", key.label());
            Effect::None
        }
        Action::EditBook(index) => match app.book_list.on_edit(index) {
            Ok(params) => navigate(app, Route::Edit(params)),
            Err(e) => {
                app.status_message = e.to_string();
                Effect::None
            }
        },
        Action::AddBook => navigate(app, Route::Edit(EditParams::new_book())),
        Action::DeleteBook(index) => {
            let Some(token) = app.session.token().map(str::to_string) else {
                return navigate(app, Route::Login);
            };
            match app.book_list.on_delete(index) {
                Ok(id) => {
                    app.status_message = format!("Deleting book {id}...");
                    Effect::DeleteBook {
                        token,
                        generation: app.generation,
                        id,
                    }
                }
                Err(e) => {
                    app.status_message = e.to_string();
                    Effect::None
                }
            }
        }
        Action::BookDeleted {
            generation,
            id,
            result,
        } => {
            if generation != app.generation {
                debug!("Dropping delete result for book {id} from stale view");
                return Effect::None;
            }
            let ok = result.is_ok();
            app.book_list.apply_delete(id, result);
            app.status_message = if ok {
                format!("Deleted book {id}")
            } else {
                "Delete failed".to_string()
            };
            Effect::None
        }
        Action::RatingSelected(rating) => {
            match app.edit_form.as_mut() {
                Some(form) => form.on_rating_selected(rating),
                None => app.book_list.on_rating_selected(rating),
            }
            Effect::None
        }
        Action::SaveEdit => save_edit(app),
        Action::BookSaved { generation, result } => {
            if generation != app.generation {
                debug!("Dropping save result from stale view");
                return Effect::None;
            }
            match result {
                Ok(id) => {
                    info!("Saved book {id}");
                    let effect = navigate(app, Route::BookList);
                    app.status_message = format!("Saved book {id}");
                    effect
                }
                Err(e) => {
                    warn!("Saving book failed: {}", e);
                    if let Some(form) = app.edit_form.as_mut() {
                        form.set_save_error(e.user_message());
                    }
                    app.status_message = "Save failed".to_string();
                    Effect::None
                }
            }
        }
        Action::CancelEdit => navigate(app, Route::BookList),
        Action::Quit => Effect::Quit,
    }
}

/// Tear down the current view and mount the one for `route`.
fn navigate(app: &mut App, route: Route) -> Effect {
    let route = match route {
        Route::Home => landing_route(&app.session),
        other => other,
    };
    match &route {
        Route::Edit(params) => info!("Navigating to {}", params.to_query()),
        other => info!("Navigating to {}", other.path()),
    }

    app.generation += 1;
    app.edit_form = None;
    app.route = route.clone();

    match route {
        Route::Home => Effect::None,
        Route::Login => {
            app.session_active = false;
            app.status_message = "Not logged in".to_string();
            Effect::None
        }
        Route::BookList => {
            app.session_active = true;
            // Fresh state on every mount; the selection and errors from a
            // previous visit are gone.
            app.book_list = BookListState::new();
            app.status_message = "Loading books...".to_string();
            fetch_books(app)
        }
        Route::Edit(params) => {
            app.edit_form = Some(EditForm::from_params(&params));
            app.status_message = match params.mode {
                EditMode::Edit => format!("Editing book {}", params.book_id),
                EditMode::Add => "Adding a book".to_string(),
            };
            Effect::None
        }
    }
}

fn fetch_books(app: &mut App) -> Effect {
    match app.session.token() {
        Some(token) => Effect::FetchBooks {
            token: token.to_string(),
            generation: app.generation,
        },
        None => {
            warn!("Book list mounted without a session token");
            navigate(app, Route::Login)
        }
    }
}

fn save_edit(app: &mut App) -> Effect {
    let Some(token) = app.session.token().map(str::to_string) else {
        return navigate(app, Route::Login);
    };
    let generation = app.generation;
    let Some(form) = app.edit_form.as_mut() else {
        return Effect::None;
    };
    if form.saving {
        return Effect::None;
    }
    match form.submit() {
        Some(book) => {
            form.saving = true;
            app.status_message = "Saving...".to_string();
            Effect::SaveBook {
                token,
                generation,
                mode: form.mode,
                book,
            }
        }
        None => {
            app.status_message = "Please fix the highlighted fields".to_string();
            Effect::None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::book_list::MISC;
    use crate::test_support::{sample_books, test_app};

    fn mounted_list(app: &mut App) -> u64 {
        let effect = update(app, Action::Navigate(Route::Home));
        let Effect::FetchBooks { generation, .. } = effect else {
            panic!("expected FetchBooks, got {effect:?}");
        };
        update(
            app,
            Action::BooksLoaded {
                generation,
                result: Ok(sample_books()),
            },
        );
        generation
    }

    #[test]
    fn test_home_with_token_mounts_book_list() {
        let mut app = test_app(Some("tok"));
        let effect = update(&mut app, Action::Navigate(Route::Home));
        assert_eq!(app.route, Route::BookList);
        assert!(app.session_active);
        assert_eq!(
            effect,
            Effect::FetchBooks {
                token: "tok".to_string(),
                generation: app.generation
            }
        );
    }

    #[test]
    fn test_home_without_token_goes_to_login() {
        let mut app = test_app(None);
        let effect = update(&mut app, Action::Navigate(Route::Home));
        assert_eq!(app.route, Route::Login);
        assert!(!app.session_active);
        assert_eq!(effect, Effect::None);
    }

    #[test]
    fn test_loaded_books_become_ready() {
        let mut app = test_app(Some("tok"));
        mounted_list(&mut app);
        assert_eq!(app.book_list.phase, ListPhase::Ready);
        assert_eq!(app.book_list.books.len(), sample_books().len());
    }

    #[test]
    fn test_stale_load_is_ignored() {
        let mut app = test_app(Some("tok"));
        let effect = update(&mut app, Action::Navigate(Route::BookList));
        let Effect::FetchBooks { generation, .. } = effect else {
            panic!("expected FetchBooks");
        };
        // User leaves and comes back before the first fetch returns
        update(&mut app, Action::AddBook);
        update(&mut app, Action::CancelEdit);

        update(
            &mut app,
            Action::BooksLoaded {
                generation,
                result: Ok(sample_books()),
            },
        );
        assert_eq!(app.book_list.phase, ListPhase::Loading);
        assert!(app.book_list.books.is_empty());
    }

    #[test]
    fn test_edit_navigates_with_copied_book() {
        let mut app = test_app(Some("tok"));
        mounted_list(&mut app);
        let expected = app.book_list.books[1].clone();

        update(&mut app, Action::EditBook(1));
        match &app.route {
            Route::Edit(params) => {
                assert_eq!(*params, EditParams::for_book(&expected));
                // The logged route string decodes back to the same params
                assert_eq!(EditParams::from_query(&params.to_query()).as_ref(), Ok(params));
            }
            other => panic!("expected edit route, got {other:?}"),
        }
        let form = app.edit_form.as_ref().unwrap();
        assert_eq!(form.title, expected.title);
    }

    #[test]
    fn test_edit_invalid_row_stays_on_list() {
        let mut app = test_app(Some("tok"));
        mounted_list(&mut app);
        let effect = update(&mut app, Action::EditBook(99));
        assert_eq!(effect, Effect::None);
        assert_eq!(app.route, Route::BookList);
    }

    #[test]
    fn test_delete_round_trip() {
        let mut app = test_app(Some("tok"));
        let generation = mounted_list(&mut app);
        let target = app.book_list.books[1].id;

        let effect = update(&mut app, Action::DeleteBook(1));
        assert_eq!(
            effect,
            Effect::DeleteBook {
                token: "tok".to_string(),
                generation,
                id: target
            }
        );
        update(
            &mut app,
            Action::BookDeleted {
                generation,
                id: target,
                result: Ok(()),
            },
        );
        assert_eq!(app.book_list.books.len(), sample_books().len() - 1);
        assert!(app.book_list.books.iter().all(|b| b.id != target));
    }

    #[test]
    fn test_delete_failure_is_reported() {
        let mut app = test_app(Some("tok"));
        let generation = mounted_list(&mut app);
        update(&mut app, Action::DeleteBook(0));
        let id = app.book_list.books[0].id;
        update(
            &mut app,
            Action::BookDeleted {
                generation,
                id,
                result: Err(ApiError::Api {
                    status: 500,
                    message: "ERROR. Book not removed.".to_string(),
                }),
            },
        );
        assert_eq!(
            app.book_list.errors.get(MISC),
            Some("ERROR. Book not removed.")
        );
        assert_eq!(app.status_message, "Delete failed");
    }

    #[test]
    fn test_save_edit_emits_put_then_returns_to_list() {
        let mut app = test_app(Some("tok"));
        mounted_list(&mut app);
        update(&mut app, Action::EditBook(0));
        update(&mut app, Action::RatingSelected(5));

        let effect = update(&mut app, Action::SaveEdit);
        let Effect::SaveBook {
            generation,
            mode,
            book,
            ..
        } = effect
        else {
            panic!("expected SaveBook, got {effect:?}");
        };
        assert_eq!(mode, EditMode::Edit);
        assert_eq!(book.rating, 5);

        // A second save while the first is in flight does nothing
        assert_eq!(update(&mut app, Action::SaveEdit), Effect::None);

        let effect = update(
            &mut app,
            Action::BookSaved {
                generation,
                result: Ok(book.id),
            },
        );
        assert_eq!(app.route, Route::BookList);
        assert!(matches!(effect, Effect::FetchBooks { .. }));
    }

    #[test]
    fn test_save_failure_stays_on_form() {
        let mut app = test_app(Some("tok"));
        mounted_list(&mut app);
        update(&mut app, Action::EditBook(0));
        let Effect::SaveBook { generation, .. } = update(&mut app, Action::SaveEdit) else {
            panic!("expected SaveBook");
        };
        update(
            &mut app,
            Action::BookSaved {
                generation,
                result: Err(ApiError::Network("timeout".to_string())),
            },
        );
        assert!(matches!(app.route, Route::Edit(_)));
        let form = app.edit_form.as_ref().unwrap();
        assert!(!form.saving);
        assert!(form.errors.get(MISC).unwrap().contains("timeout"));
    }

    #[test]
    fn test_invalid_form_does_not_save() {
        let mut app = test_app(Some("tok"));
        update(&mut app, Action::AddBook);
        assert_eq!(update(&mut app, Action::SaveEdit), Effect::None);
        assert!(app.edit_form.as_ref().unwrap().errors.get("title").is_some());
    }

    #[test]
    fn test_rating_on_list_updates_scratch_copy_only() {
        let mut app = test_app(Some("tok"));
        mounted_list(&mut app);
        let before = app.book_list.books[0].rating;
        update(&mut app, Action::RatingSelected(1));
        assert_eq!(app.book_list.selected_book.rating, 1);
        assert_eq!(app.book_list.books[0].rating, before);
    }

    #[test]
    fn test_reload_refetches_only_on_list() {
        let mut app = test_app(Some("tok"));
        mounted_list(&mut app);
        assert!(matches!(
            update(&mut app, Action::Reload),
            Effect::FetchBooks { .. }
        ));
        update(&mut app, Action::AddBook);
        assert_eq!(update(&mut app, Action::Reload), Effect::None);
    }

    #[test]
    fn test_quit() {
        let mut app = test_app(None);
        assert_eq!(update(&mut app, Action::Quit), Effect::Quit);
    }
}
