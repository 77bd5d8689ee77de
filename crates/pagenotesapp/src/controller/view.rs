//! View model for the note list.
//!
//! Rendering is relative to a given `now` so the same notes can be shown
//! again later with fresher "N minutes ago" labels.

use crate::model::Note;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::time::Duration;

const MINUTE_MS: i64 = 60_000;
const HOUR_MS: i64 = 60 * MINUTE_MS;
const DAY_MS: i64 = 24 * HOUR_MS;
const WEEK_MS: i64 = 7 * DAY_MS;

/// A note as it appears in the list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NoteCard {
    pub id: String,
    pub content: String,
    pub meta: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "notes", rename_all = "lowercase")]
pub enum NoteListView {
    /// Nothing rendered yet.
    #[default]
    Blank,
    Empty,
    Notes(Vec<NoteCard>),
}

impl NoteListView {
    pub fn render(notes: &[Note], now: i64) -> Self {
        if notes.is_empty() {
            return NoteListView::Empty;
        }
        NoteListView::Notes(notes.iter().map(|n| NoteCard::render(n, now)).collect())
    }

    pub fn cards(&self) -> &[NoteCard] {
        match self {
            NoteListView::Notes(cards) => cards,
            _ => &[],
        }
    }

    pub fn find(&self, id: &str) -> Option<&NoteCard> {
        self.cards().iter().find(|c| c.id == id)
    }
}

impl NoteCard {
    pub fn render(note: &Note, now: i64) -> Self {
        let mut meta = format!("Created: {}", format_relative(note.created_at, now));
        if note.is_modified() {
            meta.push_str(&format!(
                " • Last modified: {}",
                format_relative(note.updated_at, now)
            ));
        }
        Self {
            id: note.id.clone(),
            content: note.content.clone(),
            meta,
        }
    }
}

/// "Just now", "5 minutes ago", "3 hours ago", "2 days ago", or an absolute date after a week.
pub fn format_relative(timestamp: i64, now: i64) -> String {
    let diff = now.saturating_sub(timestamp);
    if diff < MINUTE_MS {
        return "Just now".to_string();
    }
    if diff < WEEK_MS {
        // Round down to the largest whole unit, matching "N unit(s) ago".
        let unit = if diff < HOUR_MS {
            MINUTE_MS
        } else if diff < DAY_MS {
            HOUR_MS
        } else {
            DAY_MS
        };
        let floored = Duration::from_millis(((diff / unit) * unit) as u64);
        return timeago::Formatter::new().convert(floored);
    }
    format_absolute(timestamp)
}

/// `Jan 5, 2024, 02:30 PM` in UTC.
pub fn format_absolute(timestamp: i64) -> String {
    match DateTime::<Utc>::from_timestamp_millis(timestamp) {
        Some(dt) => dt.format("%b %-d, %Y, %I:%M %p").to_string(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOW: i64 = 1_704_467_400_000; // 2024-01-05 15:10:00 UTC

    fn note(created_at: i64, updated_at: i64) -> Note {
        Note {
            id: "n1".into(),
            content: "Hello".into(),
            url: "https://e.com".into(),
            page_title: "E".into(),
            created_at,
            updated_at,
        }
    }

    #[test]
    fn relative_buckets() {
        assert_eq!(format_relative(NOW, NOW), "Just now");
        assert_eq!(format_relative(NOW - 59_000, NOW), "Just now");
        assert_eq!(format_relative(NOW - MINUTE_MS, NOW), "1 minute ago");
        assert_eq!(format_relative(NOW - 5 * MINUTE_MS - 30_000, NOW), "5 minutes ago");
        assert_eq!(format_relative(NOW - HOUR_MS, NOW), "1 hour ago");
        assert_eq!(format_relative(NOW - 3 * HOUR_MS - 59 * MINUTE_MS, NOW), "3 hours ago");
        assert_eq!(format_relative(NOW - DAY_MS, NOW), "1 day ago");
        assert_eq!(format_relative(NOW - 6 * DAY_MS, NOW), "6 days ago");
    }

    #[test]
    fn future_timestamps_are_just_now() {
        assert_eq!(format_relative(NOW + 10_000, NOW), "Just now");
    }

    #[test]
    fn older_than_a_week_is_absolute() {
        let ts = 1_704_465_000_000; // 2024-01-05 14:30:00 UTC
        assert_eq!(format_relative(ts, ts + 8 * DAY_MS), "Jan 5, 2024, 02:30 PM");
    }

    #[test]
    fn meta_mentions_modification_only_when_edited() {
        let card = NoteCard::render(&note(NOW - 2 * HOUR_MS, NOW - 2 * HOUR_MS), NOW);
        assert_eq!(card.meta, "Created: 2 hours ago");

        let card = NoteCard::render(&note(NOW - 2 * HOUR_MS, NOW - 10_000), NOW);
        assert_eq!(card.meta, "Created: 2 hours ago • Last modified: Just now");
    }

    #[test]
    fn empty_list_renders_empty_state() {
        assert_eq!(NoteListView::render(&[], NOW), NoteListView::Empty);
        let view = NoteListView::render(&[note(NOW, NOW)], NOW);
        assert_eq!(view.cards().len(), 1);
        assert!(view.find("n1").is_some());
        assert!(view.find("n2").is_none());
    }
}
