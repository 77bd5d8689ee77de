use super::backend::KeyValueBackend;
use crate::error::{NoteError, Result};
use async_trait::async_trait;
use serde_json::{Map, Value};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;
use uuid::Uuid;

pub const STORAGE_FILE: &str = "storage.json";

/// Key-value storage in a single JSON file.
///
/// The file holds one JSON object whose top-level keys are the storage keys.
/// Writes go to a temp file that is renamed over the original, so readers
/// never observe a half-written file.
pub struct FsBackend {
    root: PathBuf,
}

impl FsBackend {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn storage_path(&self) -> PathBuf {
        self.root.join(STORAGE_FILE)
    }

    async fn load_all(&self) -> Result<Map<String, Value>> {
        let path = self.storage_path();
        let content = match fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Map::new()),
            Err(e) => return Err(NoteError::Io(e)),
        };
        if content.trim().is_empty() {
            return Ok(Map::new());
        }
        match serde_json::from_str::<Value>(&content)? {
            Value::Object(map) => Ok(map),
            _ => Err(NoteError::Persistence(format!(
                "{} does not contain a JSON object",
                path.display()
            ))),
        }
    }

    async fn save_all(&self, all: &Map<String, Value>) -> Result<()> {
        fs::create_dir_all(&self.root).await?;

        let content = serde_json::to_string_pretty(all)?;
        let tmp_path = self.root.join(format!(".storage-{}.tmp", Uuid::new_v4()));
        fs::write(&tmp_path, content).await?;
        fs::rename(&tmp_path, self.storage_path()).await?;
        Ok(())
    }
}

#[async_trait]
impl KeyValueBackend for FsBackend {
    async fn get(&self, key: &str) -> Result<Option<Value>> {
        let mut all = self.load_all().await?;
        debug!(key, path = %self.storage_path().display(), "loaded storage");
        Ok(all.remove(key))
    }

    async fn set(&self, key: &str, value: Value) -> Result<()> {
        let mut all = self.load_all().await?;
        all.insert(key.to_string(), value);
        self.save_all(&all).await?;
        debug!(key, path = %self.storage_path().display(), "saved storage");
        Ok(())
    }
}
