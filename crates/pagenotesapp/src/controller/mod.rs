//! # Presentation Controller
//!
//! The popup's behaviour, without any rendering toolkit attached. A UI client
//! (the CLI binary, a webview, a test) drives a [`PopupController`] and reads
//! back a [`PopupState`] snapshot to draw.
//!
//! ## Responsibilities
//!
//! - Hold the resolved [`PageContext`] (URL and title of the active page).
//! - Keep the rendered list (or empty state) in sync after every change.
//! - Run the inline edit session: begin, type, save or cancel.
//! - Debounce search input (see [`debounce`]).
//! - Surface success and error feedback as expiring [`StatusMessage`]s.
//!
//! ## Failure Policy
//!
//! Store failures never propagate out of the controller. Each one becomes an
//! error message and the previously rendered list is left untouched. Nothing
//! is retried.

use crate::config::NotesConfig;
use crate::services::{Clock, SystemClock};
use crate::store::NoteService;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::warn;

pub mod debounce;
pub mod page;
pub mod status;
pub mod view;

pub use debounce::Debouncer;
pub use page::{PageContext, PageError, TabInfo};
pub use status::{MessageLevel, MessageTimings, StatusMessage};
pub use view::{NoteCard, NoteListView};

pub const MSG_EMPTY_INPUT: &str = "Please enter some content for your note";
pub const MSG_EMPTY_EDIT: &str = "Note content cannot be empty";
pub const MSG_SAVED: &str = "Note saved successfully!";
pub const MSG_SAVE_FAILED: &str = "Failed to save note. Please try again.";
pub const MSG_UPDATE_FAILED: &str = "Failed to update note. Please try again.";
pub const MSG_DELETE_FAILED: &str = "Failed to delete note. Please try again.";
pub const MSG_LOAD_FAILED: &str = "Failed to load notes";
pub const MSG_SEARCH_FAILED: &str = "Failed to search notes";
pub const DELETE_PROMPT: &str =
    "Are you sure you want to delete this note? This action cannot be undone.";

/// How a user action ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Completed,
    /// Rejected locally before reaching the store (empty input, unknown note).
    Rejected,
    /// The user declined a confirmation.
    Cancelled,
    /// The store reported an error. A change that was stored but could not
    /// be reloaded also ends here.
    Failed,
}

impl Outcome {
    pub fn is_success(self) -> bool {
        matches!(self, Outcome::Completed | Outcome::Cancelled)
    }
}

/// A note currently swapped into its editable form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditSession {
    pub note_id: String,
    pub text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PopupState {
    pub view: NoteListView,
    pub draft: String,
    pub editing: Option<EditSession>,
    pub status: Option<StatusMessage>,
}

pub struct PopupController<S> {
    store: Arc<S>,
    page: PageContext,
    clock: Arc<dyn Clock>,
    timings: MessageTimings,
    debouncer: Debouncer,
    state: Mutex<PopupState>,
}

impl<S: NoteService> PopupController<S> {
    pub fn new(store: Arc<S>, page: PageContext, config: &NotesConfig) -> Self {
        Self {
            store,
            page,
            clock: Arc::new(SystemClock),
            timings: MessageTimings {
                success: config.success_message_ttl(),
                error: config.error_message_ttl(),
            },
            debouncer: Debouncer::new(config.search_debounce()),
            state: Mutex::new(PopupState::default()),
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn page(&self) -> &PageContext {
        &self.page
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// A copy of the current state, with expired status messages removed.
    pub fn state(&self) -> PopupState {
        let now = self.clock.now_millis();
        let mut state = self.lock().clone();
        if state.status.as_ref().is_some_and(|s| !s.is_visible(now)) {
            state.status = None;
        }
        state
    }

    pub fn view(&self) -> NoteListView {
        self.lock().view.clone()
    }

    /// The visible status message, if it has not expired yet.
    pub fn status(&self) -> Option<StatusMessage> {
        self.state().status
    }

    // --- Loading ---

    pub async fn load_notes(&self) -> Outcome {
        match self.store.get_notes_by_url(&self.page.url).await {
            Ok(notes) => {
                self.render(&notes);
                Outcome::Completed
            }
            Err(e) => {
                warn!(error = %e, "Error loading notes");
                self.show_error(MSG_LOAD_FAILED);
                Outcome::Failed
            }
        }
    }

    // --- Creating ---

    pub fn set_draft(&self, text: impl Into<String>) {
        self.lock().draft = text.into();
    }

    /// Saves the draft as a new note for the current page.
    pub async fn save_draft(&self) -> Outcome {
        let content = self.lock().draft.trim().to_string();
        if content.is_empty() {
            self.show_error(MSG_EMPTY_INPUT);
            return Outcome::Rejected;
        }

        match self
            .store
            .create_note(&content, &self.page.url, &self.page.title)
            .await
        {
            Ok(_) => {
                self.lock().draft.clear();
                self.show_success(MSG_SAVED);
                self.load_notes().await
            }
            Err(e) => {
                warn!(error = %e, "Error creating note");
                self.show_error(MSG_SAVE_FAILED);
                Outcome::Failed
            }
        }
    }

    // --- Editing ---

    /// Swaps a rendered note into edit mode. Returns false if it is not on screen.
    pub fn begin_edit(&self, note_id: &str) -> bool {
        let mut state = self.lock();
        let Some(card) = state.view.find(note_id) else {
            return false;
        };
        let session = EditSession {
            note_id: card.id.clone(),
            text: card.content.clone(),
        };
        state.editing = Some(session);
        true
    }

    pub fn set_edit_text(&self, text: impl Into<String>) {
        if let Some(session) = self.lock().editing.as_mut() {
            session.text = text.into();
        }
    }

    /// Restores the static view of the note being edited.
    pub fn cancel_edit(&self) {
        self.lock().editing = None;
    }

    pub async fn save_edit(&self) -> Outcome {
        let Some(session) = self.lock().editing.clone() else {
            return Outcome::Rejected;
        };
        let content = session.text.trim().to_string();
        if content.is_empty() {
            self.show_error(MSG_EMPTY_EDIT);
            return Outcome::Rejected;
        }

        match self.store.update_note(&session.note_id, &content).await {
            Ok(_) => {
                self.lock().editing = None;
                self.load_notes().await
            }
            Err(e) => {
                warn!(error = %e, note_id = %session.note_id, "Error updating note");
                self.show_error(MSG_UPDATE_FAILED);
                Outcome::Failed
            }
        }
    }

    // --- Deleting ---

    /// Deletes a note after `confirm` approves [`DELETE_PROMPT`].
    pub async fn delete_note<F>(&self, note_id: &str, confirm: F) -> Outcome
    where
        F: FnOnce(&str) -> bool,
    {
        if !confirm(DELETE_PROMPT) {
            return Outcome::Cancelled;
        }

        match self.store.delete_note(note_id).await {
            Ok(()) => self.load_notes().await,
            Err(e) => {
                warn!(error = %e, note_id, "Error deleting note");
                self.show_error(MSG_DELETE_FAILED);
                Outcome::Failed
            }
        }
    }

    // --- Searching ---

    /// Runs a search immediately and renders the results.
    pub async fn search(&self, query: &str) -> Outcome {
        match self.store.search_notes(query, &self.page.url).await {
            Ok(notes) => {
                self.render(&notes);
                Outcome::Completed
            }
            Err(e) => {
                warn!(error = %e, "Error searching notes");
                self.show_error(MSG_SEARCH_FAILED);
                Outcome::Failed
            }
        }
    }

    // --- Internals ---

    fn render(&self, notes: &[crate::model::Note]) {
        let view = NoteListView::render(notes, self.clock.now_millis());
        self.lock().view = view;
    }

    fn show_success(&self, content: &str) {
        self.show(MessageLevel::Success, content);
    }

    fn show_error(&self, content: &str) {
        self.show(MessageLevel::Error, content);
    }

    fn show(&self, level: MessageLevel, content: &str) {
        let message = StatusMessage::new(
            level,
            content,
            self.clock.now_millis(),
            self.timings.ttl(level),
        );
        self.lock().status = Some(message);
    }

    fn lock(&self) -> MutexGuard<'_, PopupState> {
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl<S: NoteService + 'static> PopupController<S> {
    /// Debounced search: runs `query` once typing has paused for the configured delay.
    pub fn schedule_search(self: &Arc<Self>, query: impl Into<String>) {
        let controller = Arc::clone(self);
        let query = query.into();
        self.debouncer.call(async move {
            controller.search(&query).await;
        });
    }
}
