use super::mem_backend::MemBackend;
use super::note_store::NoteStore;

pub type InMemoryStore = NoteStore<MemBackend>;

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryStore {
    pub fn new() -> Self {
        NoteStore::with_backend(MemBackend::new())
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::model::{Note, STORAGE_KEY};
    use crate::store::backend::KeyValueBackend;
    use crate::store::NoteService;
    use serde_json::{json, Value};

    pub struct StoreFixture {
        pub store: InMemoryStore,
    }

    impl Default for StoreFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl StoreFixture {
        pub fn new() -> Self {
            Self {
                store: InMemoryStore::new(),
            }
        }

        pub async fn with_notes(self, count: usize, url: &str) -> Self {
            for i in 0..count {
                let content = format!("Content for note {}", i + 1);
                self.store
                    .create_note(&content, url, "Test Page")
                    .await
                    .unwrap();
            }
            self
        }

        pub async fn with_note(self, content: &str, url: &str, title: &str) -> Self {
            self.store.create_note(content, url, title).await.unwrap();
            self
        }

        /// Writes a record straight to storage, bypassing sanitization and validation.
        pub async fn with_raw_record(self, key: &str, record: Value) -> Self {
            let mut all = self
                .store
                .backend()
                .get(STORAGE_KEY)
                .await
                .unwrap()
                .unwrap_or_else(|| json!({}));
            all[key] = record;
            self.store.backend().set(STORAGE_KEY, all).await.unwrap();
            self
        }

        pub async fn notes(&self, url: &str) -> Vec<Note> {
            self.store.get_notes_by_url(url).await.unwrap()
        }
    }
}
