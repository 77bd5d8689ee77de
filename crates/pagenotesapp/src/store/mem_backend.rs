use super::backend::KeyValueBackend;
use crate::error::{NoteError, Result};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

/// In-memory storage backend for testing.
///
/// Uses a `Mutex` because the backend trait is `Send + Sync`; no lock is
/// ever held across an `.await`.
#[derive(Default)]
pub struct MemBackend {
    values: Mutex<HashMap<String, Value>>,
    simulate_read_error: AtomicBool,
    simulate_write_error: AtomicBool,
    writes: AtomicUsize,
}

impl MemBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable read error simulation for testing error handling.
    pub fn set_simulate_read_error(&self, simulate: bool) {
        self.simulate_read_error.store(simulate, Ordering::SeqCst);
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        self.simulate_write_error.store(simulate, Ordering::SeqCst);
    }

    /// Number of successful `set` calls so far.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// Test helper to peek at a stored value without going through the trait.
    pub fn snapshot(&self, key: &str) -> Option<Value> {
        self.lock().get(key).cloned()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, Value>> {
        // A poisoned map is still a valid map; keep serving it.
        self.values
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl KeyValueBackend for MemBackend {
    async fn get(&self, key: &str) -> Result<Option<Value>> {
        if self.simulate_read_error.load(Ordering::SeqCst) {
            return Err(NoteError::Persistence("Simulated read error".to_string()));
        }
        Ok(self.lock().get(key).cloned())
    }

    async fn set(&self, key: &str, value: Value) -> Result<()> {
        if self.simulate_write_error.load(Ordering::SeqCst) {
            return Err(NoteError::Persistence("Simulated write error".to_string()));
        }
        self.lock().insert(key.to_string(), value);
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
