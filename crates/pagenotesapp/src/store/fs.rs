use super::fs_backend::FsBackend;
use super::note_store::NoteStore;
use std::path::{Path, PathBuf};

pub type FileStore = NoteStore<FsBackend>;

impl FileStore {
    /// Opens (without touching disk) a store rooted at `data_dir`.
    /// The directory and storage file are created on the first write.
    pub fn open(data_dir: impl Into<PathBuf>) -> Self {
        NoteStore::with_backend(FsBackend::new(data_dir))
    }

    pub fn data_dir(&self) -> &Path {
        self.backend.root()
    }
}
