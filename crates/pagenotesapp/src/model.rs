//! # Domain Model
//!
//! A [`Note`] is a piece of free text attached to exactly one page URL.
//!
//! ## On-Disk Shape
//!
//! Notes are stored as one JSON object under the `"notes"` key, mapping note
//! ids to records:
//!
//! ```text
//! {
//!   "0b6f...": {
//!     "id": "0b6f...",
//!     "content": "Remember to cite this",
//!     "url": "https://example.com/article",
//!     "pageTitle": "An Article",
//!     "createdAt": 1704067200000,
//!     "updatedAt": 1704067200000
//!   }
//! }
//! ```
//!
//! Timestamps are epoch milliseconds. There is no schema version; every load
//! re-validates each record structurally (see [`crate::validation`]).
//!
//! ## Ordering
//!
//! Lists are newest first by `created_at`. Notes created in the same
//! millisecond are ordered by `id` so results are reproducible.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// Key under which the whole collection is persisted.
pub const STORAGE_KEY: &str = "notes";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: String,
    pub content: String,
    pub url: String,
    pub page_title: String,
    pub created_at: i64,
    pub updated_at: i64,
}

impl Note {
    /// Whether the note was edited after creation.
    pub fn is_modified(&self) -> bool {
        self.updated_at > self.created_at
    }

    /// Case-insensitive substring match against content or page title.
    pub fn matches(&self, lower_query: &str) -> bool {
        self.content.to_lowercase().contains(lower_query)
            || self.page_title.to_lowercase().contains(lower_query)
    }
}

/// Validated notes keyed by id.
pub type NoteCollection = BTreeMap<String, Note>;

/// Newest first; equal timestamps fall back to id.
pub fn newest_first(a: &Note, b: &Note) -> Ordering {
    b.created_at
        .cmp(&a.created_at)
        .then_with(|| a.id.cmp(&b.id))
}

pub fn sort_newest_first(notes: &mut [Note]) {
    notes.sort_by(newest_first);
}
