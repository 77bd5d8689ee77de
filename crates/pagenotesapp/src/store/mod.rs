//! # Storage Layer
//!
//! This module defines the storage abstraction for page notes. The
//! [`NoteService`] trait is the contract the presentation layer consumes; the
//! [`note_store::NoteStore`] implements it on top of any [`backend::KeyValueBackend`].
//!
//! ## One Key, One Value
//!
//! The entire collection lives under a single key (`"notes"`) as a JSON
//! object mapping note id to record. Every operation follows the same shape:
//!
//! 1. **Load** the whole value.
//! 2. **Validate** each record, silently dropping anything malformed.
//! 3. **Mutate** the in-memory collection (or just read from it).
//! 4. **Persist** the whole collection back (writes only).
//!
//! ## Concurrent Writers
//!
//! There is no locking and no compare-and-swap. Two writers that load the
//! same state and then persist will each overwrite the whole collection, and
//! the last one to persist wins: the other writer's change is lost. This is
//! the accepted contract of the store, and `tests/concurrency.rs` pins it.
//!
//! ## Self-Healing by Omission
//!
//! Invalid records are excluded on every load and disappear from disk on the
//! next write. They are never repaired. Each drop is logged at WARN level and
//! counted in [`StoreDiagnostics`].
//!
//! ## Implementations
//!
//! - [`fs::FileStore`]: notes in a JSON file on disk.
//! - [`memory::InMemoryStore`]: for testing logic without filesystem I/O.

use crate::error::OpResult;
use crate::model::Note;
use async_trait::async_trait;

pub mod backend;
pub mod fs;
pub mod fs_backend;
pub mod mem_backend;
pub mod memory;
pub mod note_store;

/// Counters describing what validation has discarded.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct StoreDiagnostics {
    /// Records dropped by validation since the store was created.
    /// A corrupt record is counted again on every load until a write removes it.
    pub dropped_records: usize,
}

/// The five operations offered to UI clients.
#[async_trait]
pub trait NoteService: Send + Sync {
    /// Create a note attached to `url`.
    async fn create_note(&self, content: &str, url: &str, page_title: &str) -> OpResult<Note>;

    /// All notes for exactly this `url`, newest first.
    async fn get_notes_by_url(&self, url: &str) -> OpResult<Vec<Note>>;

    /// Replace a note's content.
    async fn update_note(&self, id: &str, content: &str) -> OpResult<Note>;

    /// Permanently remove a note.
    async fn delete_note(&self, id: &str) -> OpResult<()>;

    /// Notes for `url` whose content or page title contains `query`, newest first.
    async fn search_notes(&self, query: &str, url: &str) -> OpResult<Vec<Note>>;
}
