//! # Configuration
//!
//! Configuration is managed by [`confique`], layered from environment
//! variables, an optional TOML file and compiled defaults.
//!
//! ## Storage Hierarchy
//!
//! Configuration is resolved in priority order:
//! 1. **Environment variables**: `PAGENOTES_DATA_DIR`, `PAGENOTES_SEARCH_DEBOUNCE_MS`, ...
//! 2. **Config file**: `pagenotes.toml` in the OS config directory (via `directories`).
//! 3. **Compiled Defaults**: Built-in fallbacks via `#[config(default = ...)]`.
//!
//! ## Available Settings
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `data_dir` | OS data dir | Where `storage.json` lives |
//! | `search_debounce_ms` | `300` | Quiet period before a search runs |
//! | `success_message_ms` | `3000` | How long success messages stay visible |
//! | `error_message_ms` | `5000` | How long error messages stay visible |

use crate::error::{NoteError, Result};
use confique::Config;
use directories::ProjectDirs;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const CONFIG_FILE: &str = "pagenotes.toml";

#[derive(Config, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct NotesConfig {
    /// Directory holding the note storage file. Defaults to the OS data dir.
    #[config(env = "PAGENOTES_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Milliseconds of quiet typing before a search runs.
    #[config(env = "PAGENOTES_SEARCH_DEBOUNCE_MS", default = 300)]
    pub search_debounce_ms: u64,

    /// Milliseconds a success message stays visible.
    #[config(env = "PAGENOTES_SUCCESS_MESSAGE_MS", default = 3000)]
    pub success_message_ms: u64,

    /// Milliseconds an error message stays visible.
    #[config(env = "PAGENOTES_ERROR_MESSAGE_MS", default = 5000)]
    pub error_message_ms: u64,
}

impl Default for NotesConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            search_debounce_ms: 300,
            success_message_ms: 3000,
            error_message_ms: 5000,
        }
    }
}

impl NotesConfig {
    /// Loads from the environment, then the default config file if it exists.
    pub fn load() -> Result<Self> {
        Self::load_from(default_config_file().as_deref())
    }

    /// Loads from the environment, then `file` if given and present.
    pub fn load_from(file: Option<&Path>) -> Result<Self> {
        let mut builder = Self::builder().env();
        if let Some(path) = file {
            builder = builder.file(path);
        }
        builder
            .load()
            .map_err(|e| NoteError::Config(e.to_string()))
    }

    /// The configured data directory, falling back to the OS data directory.
    pub fn data_dir(&self) -> Result<PathBuf> {
        if let Some(dir) = &self.data_dir {
            return Ok(dir.clone());
        }
        project_dirs()
            .map(|dirs| dirs.data_dir().to_path_buf())
            .ok_or_else(|| NoteError::Config("Could not determine data directory".to_string()))
    }

    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }

    pub fn success_message_ttl(&self) -> Duration {
        Duration::from_millis(self.success_message_ms)
    }

    pub fn error_message_ttl(&self) -> Duration {
        Duration::from_millis(self.error_message_ms)
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "pagenotes", "pagenotes")
}

pub fn default_config_file() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE))
}
