//! Structural validation of persisted notes.
//!
//! The collection is read back as untyped JSON so that anything a different
//! writer (or a corrupted file) put there can be inspected before it is
//! trusted. A record is valid when:
//!
//! - it is a JSON object
//! - `id` and `url` are non-empty strings
//! - `content` and `pageTitle` are strings (possibly empty)
//! - `createdAt` and `updatedAt` are positive integers
//! - `updatedAt >= createdAt`
//!
//! Invalid records are dropped, never repaired. Validation does not sanitize.

use crate::model::{Note, NoteCollection};
use serde_json::{Map, Value};
use tracing::warn;

/// Result of filtering a raw collection.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ValidatedNotes {
    pub notes: NoteCollection,
    /// Keys of entries that failed validation.
    pub dropped: Vec<String>,
}

/// Checks a single raw record.
pub fn is_valid_note(record: &Value) -> bool {
    parse_note(record).is_some()
}

/// Checks an already-typed note against the same rules.
pub fn is_valid(note: &Note) -> bool {
    !note.id.is_empty()
        && !note.url.is_empty()
        && note.created_at > 0
        && note.updated_at > 0
        && note.updated_at >= note.created_at
}

/// Converts a raw record into a [`Note`] if it passes validation.
pub fn parse_note(record: &Value) -> Option<Note> {
    let obj = record.as_object()?;

    let id = non_empty_str(obj, "id")?;
    let content = str_field(obj, "content")?;
    let url = non_empty_str(obj, "url")?;
    let page_title = str_field(obj, "pageTitle")?;
    let created_at = positive_int(obj, "createdAt")?;
    let updated_at = positive_int(obj, "updatedAt")?;

    if updated_at < created_at {
        return None;
    }

    Some(Note {
        id: id.to_string(),
        content: content.to_string(),
        url: url.to_string(),
        page_title: page_title.to_string(),
        created_at,
        updated_at,
    })
}

/// Keeps only the valid entries of a raw stored value.
///
/// Anything other than a JSON object (missing key, array, string, null)
/// yields an empty collection.
pub fn filter_valid_notes(raw: Option<&Value>) -> ValidatedNotes {
    let Some(entries) = raw.and_then(Value::as_object) else {
        return ValidatedNotes::default();
    };

    let mut validated = ValidatedNotes::default();
    for (key, record) in entries {
        match parse_note(record) {
            Some(note) => {
                validated.notes.insert(key.clone(), note);
            }
            None => {
                warn!(note_id = %key, "Invalid note detected and filtered out");
                validated.dropped.push(key.clone());
            }
        }
    }
    validated
}

fn str_field<'a>(obj: &'a Map<String, Value>, field: &str) -> Option<&'a str> {
    obj.get(field)?.as_str()
}

fn non_empty_str<'a>(obj: &'a Map<String, Value>, field: &str) -> Option<&'a str> {
    str_field(obj, field).filter(|s| !s.is_empty())
}

fn positive_int(obj: &Map<String, Value>, field: &str) -> Option<i64> {
    obj.get(field)?.as_i64().filter(|n| *n > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid_record(id: &str) -> Value {
        json!({
            "id": id,
            "content": "hello",
            "url": "https://e.com",
            "pageTitle": "E",
            "createdAt": 100,
            "updatedAt": 200
        })
    }

    fn with(mut record: Value, field: &str, value: Value) -> Value {
        record[field] = value;
        record
    }

    fn without(mut record: Value, field: &str) -> Value {
        record.as_object_mut().unwrap().remove(field);
        record
    }

    #[test]
    fn accepts_well_formed_record() {
        let note = parse_note(&valid_record("a")).unwrap();
        assert_eq!(note.id, "a");
        assert_eq!(note.page_title, "E");
        assert_eq!(note.created_at, 100);
        assert_eq!(note.updated_at, 200);
    }

    #[test]
    fn accepts_empty_content_and_title() {
        let r = with(valid_record("a"), "content", json!(""));
        let r = with(r, "pageTitle", json!(""));
        assert!(is_valid_note(&r));
    }

    #[test]
    fn rejects_non_objects() {
        assert!(!is_valid_note(&json!(null)));
        assert!(!is_valid_note(&json!("note")));
        assert!(!is_valid_note(&json!([1, 2])));
    }

    #[test]
    fn rejects_bad_identity_fields() {
        let base = valid_record("a");
        assert!(!is_valid_note(&with(base.clone(), "id", json!(""))));
        assert!(!is_valid_note(&with(base.clone(), "id", json!(7))));
        assert!(!is_valid_note(&with(base.clone(), "url", json!(""))));
        assert!(!is_valid_note(&without(base.clone(), "url")));
        assert!(!is_valid_note(&with(base.clone(), "content", json!(null))));
        assert!(!is_valid_note(&without(base, "pageTitle")));
    }

    #[test]
    fn rejects_bad_timestamps() {
        let base = valid_record("a");
        assert!(!is_valid_note(&with(base.clone(), "createdAt", json!(0))));
        assert!(!is_valid_note(&with(base.clone(), "createdAt", json!(-5))));
        assert!(!is_valid_note(&with(base.clone(), "updatedAt", json!("200"))));
        assert!(!is_valid_note(&with(base.clone(), "createdAt", json!(1.5))));
        assert!(!is_valid_note(&with(base, "updatedAt", json!(50))));
    }

    #[test]
    fn typed_validation_matches_raw_rules() {
        let note = parse_note(&valid_record("a")).unwrap();
        assert!(is_valid(&note));

        let mut backwards = note.clone();
        backwards.updated_at = backwards.created_at - 1;
        assert!(!is_valid(&backwards));

        let mut no_url = note;
        no_url.url.clear();
        assert!(!is_valid(&no_url));
    }

    #[test]
    fn filter_drops_invalid_entries() {
        let raw = json!({
            "a": valid_record("a"),
            "b": "garbage",
            "c": with(valid_record("c"), "updatedAt", json!(1)),
            "d": valid_record("d"),
        });
        let validated = filter_valid_notes(Some(&raw));
        assert_eq!(validated.notes.len(), 2);
        assert!(validated.notes.contains_key("a"));
        assert!(validated.notes.contains_key("d"));
        assert_eq!(validated.dropped, vec!["b".to_string(), "c".to_string()]);
    }

    #[test]
    fn filter_treats_non_objects_as_empty() {
        assert!(filter_valid_notes(None).notes.is_empty());
        assert!(filter_valid_notes(Some(&json!([valid_record("a")])))
            .notes
            .is_empty());
        assert!(filter_valid_notes(Some(&json!("notes"))).notes.is_empty());
        assert!(filter_valid_notes(Some(&json!(null))).notes.is_empty());
    }

    #[test]
    fn filter_is_closed_and_idempotent() {
        let raw = json!({
            "a": valid_record("a"),
            "b": 12,
            "c": without(valid_record("c"), "id"),
        });
        let once = filter_valid_notes(Some(&raw));
        for note in once.notes.values() {
            assert!(is_valid(note));
        }

        let reserialized = serde_json::to_value(&once.notes).unwrap();
        let twice = filter_valid_notes(Some(&reserialized));
        assert_eq!(twice.notes, once.notes);
        assert!(twice.dropped.is_empty());
    }
}
