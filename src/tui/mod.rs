//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! translates keyboard events into core::Action values, and runs the
//! `Effect`s the reducer asks for as tokio tasks.
//!
//! ## Request Lifetime
//!
//! Every request is spawned on behalf of the view that was mounted at the
//! time. `ViewRequests` keeps the abort handles for that view; when the
//! reducer navigates somewhere else (the app's generation changes), every
//! outstanding request of the old view is aborted. Results that still slip
//! through carry the old generation and are dropped by `update()`.
//!
//! ## Redraw Strategy
//!
//! Draws only after an event or a background action arrived. While idle the
//! loop sleeps up to 250ms waiting for input.

mod component;
mod components;
mod event;
mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::sync::{Arc, mpsc};
use std::time::Duration;

use crossterm::cursor::{Hide, SetCursorStyle, Show};
use crossterm::event::{DisableBracketedPaste, EnableBracketedPaste};
use crossterm::execute;
use tokio::task::{AbortHandle, JoinHandle};

use crate::api::{BooksApi, HttpBooksApi};
use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::route::{EditMode, Route};
use crate::core::session;
use crate::core::state::App;
use crate::tui::component::EventHandler;
use crate::tui::components::{BookTableEvent, BookTableState, FormEvent, handle_form_event};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub book_table: BookTableState,
}

impl Default for TuiState {
    fn default() -> Self {
        Self::new()
    }
}

impl TuiState {
    pub fn new() -> Self {
        Self {
            book_table: BookTableState::new(),
        }
    }
}

/// Abort handles for the requests of the currently mounted view.
pub struct ViewRequests {
    generation: u64,
    handles: Vec<AbortHandle>,
}

impl ViewRequests {
    pub fn new(generation: u64) -> Self {
        Self {
            generation,
            handles: Vec::new(),
        }
    }

    /// Abort everything that belongs to an older view. Returns true if the
    /// view changed.
    pub fn sync(&mut self, generation: u64) -> bool {
        if generation == self.generation {
            return false;
        }
        let outstanding = self.handles.iter().filter(|h| !h.is_finished()).count();
        if outstanding > 0 {
            info!(
                "View changed ({} -> {}), cancelling {} request(s)",
                self.generation, generation, outstanding
            );
        }
        for handle in self.handles.drain(..) {
            handle.abort();
        }
        self.generation = generation;
        true
    }

    pub fn track(&mut self, handle: AbortHandle) {
        self.handles.retain(|h| !h.is_finished());
        self.handles.push(handle);
    }

    pub fn cancel_all(&mut self) {
        for handle in self.handles.drain(..) {
            handle.abort();
        }
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(
            stdout(),
            EnableBracketedPaste,
            Show,                        // Cursor is positioned on the edit form
            SetCursorStyle::SteadyBlock, // Non-blinking: avoids blink timer reset from redraws
        )?;
        info!("Terminal modes enabled (bracketed paste, steady block cursor)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), DisableBracketedPaste, Hide);
    }
}

/// Build the HTTP API client from a resolved config.
pub fn build_api(config: &ResolvedConfig) -> Arc<dyn BooksApi> {
    Arc::new(HttpBooksApi::new(config.base_url.clone(), config.timeout))
}

/// Everything the loop needs to turn actions into effects.
struct Dispatcher {
    tx: mpsc::Sender<Action>,
    requests: ViewRequests,
}

impl Dispatcher {
    /// Run `action` through the reducer and start whatever it asks for.
    /// Returns true when the app should quit.
    fn dispatch(&mut self, app: &mut App, tui: &mut TuiState, action: Action) -> bool {
        let effect = update(app, action);
        if self.requests.sync(app.generation) {
            // New view, fresh presentation state
            *tui = TuiState::new();
        }
        match effect {
            Effect::Quit => true,
            Effect::None => false,
            effect => {
                if let Some(handle) = spawn_effect(effect, app.api.clone(), self.tx.clone()) {
                    self.requests.track(handle.abort_handle());
                }
                false
            }
        }
    }
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let api = build_api(&config);
    let session = session::load_session(config.token.clone(), config.token_file.as_deref());
    let mut app = App::from_config(api, session, &config);
    let mut tui = TuiState::new();

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    // Channel for actions from background tasks
    let (tx, rx) = mpsc::channel();
    let mut dispatcher = Dispatcher {
        tx,
        requests: ViewRequests::new(app.generation),
    };

    // Landing screen for one frame, then let it route
    terminal.draw(|f| ui::draw_ui(f, &app, &mut tui))?;
    let mut should_quit = dispatcher.dispatch(&mut app, &mut tui, Action::Navigate(Route::Home));
    let mut needs_redraw = true;

    while !should_quit {
        if needs_redraw {
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui))?;
            needs_redraw = false;
        }

        let first_event = poll_event_timeout(Duration::from_millis(250));
        if first_event.is_some() {
            needs_redraw = true;
        }

        // Process first event + drain ALL pending events before next draw
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            if let Some(action) = action_for_event(&mut app, &mut tui, &event) {
                if dispatcher.dispatch(&mut app, &mut tui, action) {
                    should_quit = true;
                    break;
                }
            }
        }

        // Handle background task actions (API responses)
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            if dispatcher.dispatch(&mut app, &mut tui, action) {
                should_quit = true;
            }
        }
    }

    dispatcher.requests.cancel_all();
    ratatui::restore();
    Ok(())
}

/// Route a terminal event to the component for the current screen.
fn action_for_event(app: &mut App, tui: &mut TuiState, event: &TuiEvent) -> Option<Action> {
    // Resize just needs a redraw
    if matches!(event, TuiEvent::Resize) {
        return None;
    }
    // Ctrl+C always quits regardless of screen
    if matches!(event, TuiEvent::ForceQuit) {
        return Some(Action::Quit);
    }

    match &app.route {
        Route::Home => None,
        Route::Login => matches!(event, TuiEvent::Escape | TuiEvent::InputChar('q'))
            .then_some(Action::Quit),
        Route::BookList => {
            tui.book_table.sync_rows(app.book_list.books.len());
            tui.book_table.handle_event(event).map(|e| match e {
                BookTableEvent::Sort(key) => Action::Sort(key),
                BookTableEvent::Edit(index) => Action::EditBook(index),
                BookTableEvent::Delete(index) => Action::DeleteBook(index),
                BookTableEvent::Add => Action::AddBook,
                BookTableEvent::Reload => Action::Reload,
                BookTableEvent::Quit => Action::Quit,
            })
        }
        Route::Edit(_) => {
            // Field edits happen in place; only save/cancel/rating go
            // through the reducer.
            let form = app.edit_form.as_mut()?;
            handle_form_event(form, event).map(|e| match e {
                FormEvent::Save => Action::SaveEdit,
                FormEvent::Cancel => Action::CancelEdit,
                FormEvent::RatingSelected(rating) => Action::RatingSelected(rating),
            })
        }
    }
}

/// Start the request an effect describes. The spawned task reports back
/// through `tx`.
pub fn spawn_effect(
    effect: Effect,
    api: Arc<dyn BooksApi>,
    tx: mpsc::Sender<Action>,
) -> Option<JoinHandle<()>> {
    match effect {
        Effect::None | Effect::Quit => None,
        Effect::FetchBooks { token, generation } => {
            info!("Spawning book list request (generation {generation})");
            Some(tokio::spawn(async move {
                let result = api.list_books(&token).await;
                if tx.send(Action::BooksLoaded { generation, result }).is_err() {
                    warn!("Failed to send BooksLoaded: receiver dropped");
                }
            }))
        }
        Effect::DeleteBook {
            token,
            generation,
            id,
        } => {
            info!("Spawning delete request for book {id}");
            Some(tokio::spawn(async move {
                let result = api.delete_book(&token, id).await;
                if tx
                    .send(Action::BookDeleted {
                        generation,
                        id,
                        result,
                    })
                    .is_err()
                {
                    warn!("Failed to send BookDeleted for book {id}: receiver dropped");
                }
            }))
        }
        Effect::SaveBook {
            token,
            generation,
            mode,
            book,
        } => {
            info!("Spawning {} request for book {}", mode.as_str(), book.id);
            Some(tokio::spawn(async move {
                let result = match mode {
                    EditMode::Edit => api.update_book(&token, &book).await.map(|()| book.id),
                    EditMode::Add => api.create_book(&token, &book).await,
                };
                if tx.send(Action::BookSaved { generation, result }).is_err() {
                    warn!("Failed to send BookSaved: receiver dropped");
                }
            }))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiError;
    use crate::core::book::Book;
    use crate::test_support::{FakeApi, sample_books};

    #[tokio::test]
    async fn test_fetch_effect_reports_loaded_books() {
        let api = Arc::new(FakeApi::with_books(sample_books()));
        let (tx, rx) = mpsc::channel();
        let effect = Effect::FetchBooks {
            token: "tok".to_string(),
            generation: 3,
        };
        spawn_effect(effect, api.clone(), tx).unwrap().await.unwrap();

        match rx.try_recv().unwrap() {
            Action::BooksLoaded { generation, result } => {
                assert_eq!(generation, 3);
                assert_eq!(result.unwrap().len(), 3);
            }
            other => panic!("unexpected action {other:?}"),
        }
        assert_eq!(*api.calls.lock().unwrap(), vec!["GET tok".to_string()]);
    }

    #[tokio::test]
    async fn test_delete_effect_failure_is_reported() {
        let api = Arc::new(FakeApi {
            fail_with: Some(ApiError::Api {
                status: 500,
                message: "ERROR. Book not removed.".to_string(),
            }),
            ..Default::default()
        });
        let (tx, rx) = mpsc::channel();
        let effect = Effect::DeleteBook {
            token: "tok".to_string(),
            generation: 1,
            id: 12,
        };
        spawn_effect(effect, api, tx).unwrap().await.unwrap();

        match rx.try_recv().unwrap() {
            Action::BookDeleted { id, result, .. } => {
                assert_eq!(id, 12);
                assert!(result.is_err());
            }
            other => panic!("unexpected action {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_add_effect_returns_new_id() {
        let api = Arc::new(FakeApi::with_books(sample_books()));
        let (tx, rx) = mpsc::channel();
        let effect = Effect::SaveBook {
            token: "tok".to_string(),
            generation: 1,
            mode: EditMode::Add,
            book: Book {
                title: "New".to_string(),
                author: "Someone".to_string(),
                year: "2024".to_string(),
                ..Default::default()
            },
        };
        spawn_effect(effect, api.clone(), tx).unwrap().await.unwrap();

        match rx.try_recv().unwrap() {
            Action::BookSaved { result, .. } => assert_eq!(result, Ok(14)),
            other => panic!("unexpected action {other:?}"),
        }
        assert_eq!(api.books.lock().unwrap().len(), 4);
    }

    #[tokio::test]
    async fn test_view_change_aborts_outstanding_requests() {
        let mut requests = ViewRequests::new(1);
        let pending = tokio::spawn(async {
            tokio::time::sleep(Duration::from_secs(60)).await;
        });
        requests.track(pending.abort_handle());

        assert!(!requests.sync(1));
        assert!(requests.sync(2));
        assert!(pending.await.unwrap_err().is_cancelled());
    }

    #[test]
    fn test_no_effect_spawns_nothing() {
        let (tx, _rx) = mpsc::channel();
        let api: Arc<dyn BooksApi> = Arc::new(FakeApi::default());
        assert!(spawn_effect(Effect::None, api.clone(), tx.clone()).is_none());
        assert!(spawn_effect(Effect::Quit, api, tx).is_none());
    }

    #[test]
    fn test_events_route_to_current_screen() {
        let mut app = crate::test_support::test_app(Some("tok"));
        let mut tui = TuiState::new();
        update(&mut app, Action::Navigate(Route::Home));
        let generation = app.generation;
        update(
            &mut app,
            Action::BooksLoaded {
                generation,
                result: Ok(sample_books()),
            },
        );

        assert!(matches!(
            action_for_event(&mut app, &mut tui, &TuiEvent::InputChar('y')),
            Some(Action::Sort(crate::core::sort::SortKey::Year))
        ));
        assert!(matches!(
            action_for_event(&mut app, &mut tui, &TuiEvent::Submit),
            Some(Action::EditBook(0))
        ));
        assert!(matches!(
            action_for_event(&mut app, &mut tui, &TuiEvent::ForceQuit),
            Some(Action::Quit)
        ));
    }
}
