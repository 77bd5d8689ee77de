use crate::error::Result;
use async_trait::async_trait;
use serde_json::Value;

/// Abstract interface for raw key-value persistence.
///
/// This trait handles the "how" of storage (filesystem vs memory), while
/// [`super::note_store::NoteStore`] handles the "what" (sanitizing,
/// validation, ordering). Both calls move whole values: there is no partial
/// update, and no compare-and-swap.
#[async_trait]
pub trait KeyValueBackend: Send + Sync {
    /// Read the value stored under `key`. Returns `Ok(None)` if nothing is stored.
    async fn get(&self, key: &str) -> Result<Option<Value>>;

    /// Replace the value stored under `key`.
    async fn set(&self, key: &str, value: Value) -> Result<()>;
}

#[async_trait]
impl<B: KeyValueBackend + ?Sized> KeyValueBackend for std::sync::Arc<B> {
    async fn get(&self, key: &str) -> Result<Option<Value>> {
        (**self).get(key).await
    }

    async fn set(&self, key: &str, value: Value) -> Result<()> {
        (**self).set(key, value).await
    }
}
