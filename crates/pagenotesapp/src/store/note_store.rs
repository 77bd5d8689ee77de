use super::backend::KeyValueBackend;
use super::{NoteService, StoreDiagnostics};
use crate::error::{NoteError, OpResult, Operation, OperationError, Result};
use crate::model::{sort_newest_first, Note, NoteCollection, STORAGE_KEY};
use crate::sanitize::sanitize;
use crate::services::{Clock, IdGenerator, SystemClock, UuidV4Generator};
use crate::validation::filter_valid_notes;
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::{debug, error};

pub struct NoteStore<B, C = SystemClock, I = UuidV4Generator> {
    pub(crate) backend: B,
    clock: C,
    ids: I,
    dropped: AtomicUsize,
}

impl<B: KeyValueBackend> NoteStore<B> {
    pub fn with_backend(backend: B) -> Self {
        Self::with_services(backend, SystemClock, UuidV4Generator)
    }
}

impl<B, C, I> NoteStore<B, C, I>
where
    B: KeyValueBackend,
    C: Clock,
    I: IdGenerator,
{
    pub fn with_services(backend: B, clock: C, ids: I) -> Self {
        Self {
            backend,
            clock,
            ids,
            dropped: AtomicUsize::new(0),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn diagnostics(&self) -> StoreDiagnostics {
        StoreDiagnostics {
            dropped_records: self.dropped.load(Ordering::Relaxed),
        }
    }

    /// Loads the collection and drops every record that fails validation.
    async fn load(&self) -> Result<NoteCollection> {
        let raw = self.backend.get(STORAGE_KEY).await?;
        let validated = filter_valid_notes(raw.as_ref());
        if !validated.dropped.is_empty() {
            self.dropped
                .fetch_add(validated.dropped.len(), Ordering::Relaxed);
        }
        debug!(notes = validated.notes.len(), "loaded note collection");
        Ok(validated.notes)
    }

    /// Overwrites the whole collection.
    async fn persist(&self, notes: &NoteCollection) -> Result<()> {
        let value = serde_json::to_value(notes)?;
        self.backend.set(STORAGE_KEY, value).await?;
        debug!(notes = notes.len(), "persisted note collection");
        Ok(())
    }

    async fn notes_for_url(&self, url: &str) -> Result<Vec<Note>> {
        let notes = self.load().await?;
        let mut matching: Vec<Note> = notes.into_values().filter(|n| n.url == url).collect();
        sort_newest_first(&mut matching);
        Ok(matching)
    }

    async fn try_create(&self, content: &str, url: &str, page_title: &str) -> Result<Note> {
        let content = sanitize(content);
        let url = sanitize(url);
        let page_title = sanitize(page_title);

        if content.is_empty() {
            return Err(NoteError::Validation(
                "Note content cannot be empty".to_string(),
            ));
        }
        if url.is_empty() {
            return Err(NoteError::Validation("URL cannot be empty".to_string()));
        }

        let now = self.clock.now_millis();
        let note = Note {
            id: self.ids.next_id(),
            content,
            url,
            page_title,
            created_at: now,
            updated_at: now,
        };

        let mut notes = self.load().await?;
        notes.insert(note.id.clone(), note.clone());
        self.persist(&notes).await?;
        Ok(note)
    }

    async fn try_update(&self, id: &str, content: &str) -> Result<Note> {
        let content = sanitize(content);
        if content.is_empty() {
            return Err(NoteError::Validation(
                "Note content cannot be empty".to_string(),
            ));
        }

        let mut notes = self.load().await?;
        let note = notes
            .get_mut(id)
            .ok_or_else(|| NoteError::NotFound(id.to_string()))?;

        note.content = content;
        // updated_at never moves backwards, even if the clock does.
        note.updated_at = self.clock.now_millis().max(note.updated_at);
        let updated = note.clone();

        self.persist(&notes).await?;
        Ok(updated)
    }

    async fn try_delete(&self, id: &str) -> Result<()> {
        let mut notes = self.load().await?;
        if notes.remove(id).is_none() {
            return Err(NoteError::NotFound(id.to_string()));
        }
        self.persist(&notes).await
    }

    async fn try_search(&self, query: &str, url: &str) -> Result<Vec<Note>> {
        let notes = self.notes_for_url(url).await?;
        if query.trim().is_empty() {
            return Ok(notes);
        }
        let lower_query = query.to_lowercase();
        Ok(notes.into_iter().filter(|n| n.matches(&lower_query)).collect())
    }

    fn fail(&self, operation: Operation, cause: NoteError) -> OperationError {
        error!(op = %operation, error = %cause, "note operation failed");
        OperationError::new(operation, cause)
    }
}

#[async_trait]
impl<B, C, I> NoteService for NoteStore<B, C, I>
where
    B: KeyValueBackend,
    C: Clock,
    I: IdGenerator,
{
    async fn create_note(&self, content: &str, url: &str, page_title: &str) -> OpResult<Note> {
        self.try_create(content, url, page_title)
            .await
            .map_err(|e| self.fail(Operation::Create, e))
    }

    async fn get_notes_by_url(&self, url: &str) -> OpResult<Vec<Note>> {
        self.notes_for_url(url)
            .await
            .map_err(|e| self.fail(Operation::Retrieve, e))
    }

    async fn update_note(&self, id: &str, content: &str) -> OpResult<Note> {
        self.try_update(id, content)
            .await
            .map_err(|e| self.fail(Operation::Update, e))
    }

    async fn delete_note(&self, id: &str) -> OpResult<()> {
        self.try_delete(id)
            .await
            .map_err(|e| self.fail(Operation::Delete, e))
    }

    async fn search_notes(&self, query: &str, url: &str) -> OpResult<Vec<Note>> {
        self.try_search(query, url)
            .await
            .map_err(|e| self.fail(Operation::Search, e))
    }
}
