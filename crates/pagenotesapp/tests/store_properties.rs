use pagenotesapp::error::ErrorKind;
use pagenotesapp::model::{Note, STORAGE_KEY};
use pagenotesapp::sanitize::sanitize;
use pagenotesapp::services::{ManualClock, SequentialIds};
use pagenotesapp::store::backend::KeyValueBackend;
use pagenotesapp::store::mem_backend::MemBackend;
use pagenotesapp::store::note_store::NoteStore;
use pagenotesapp::store::NoteService;
use pagenotesapp::validation::{filter_valid_notes, is_valid};
use serde_json::json;
use std::sync::Arc;

type Store = NoteStore<MemBackend, Arc<ManualClock>, SequentialIds>;

const PAGE: &str = "https://e.com/x";
const OTHER: &str = "https://e.com/y";

fn store() -> (Store, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::new(1_700_000_000_000));
    let store = NoteStore::with_services(MemBackend::new(), clock.clone(), SequentialIds::new());
    (store, clock)
}

/// A page with a mix of notes, created at varied (and sometimes equal) times.
async fn populated() -> (Store, Arc<ManualClock>) {
    let (store, clock) = store();
    let entries = [
        ("Hi there", PAGE, "Greeting", 0),
        ("Bye", PAGE, "Farewell", 5),
        ("hidden HI", OTHER, "", 0),
        ("third", PAGE, "Highlights", 3),
        ("same ms", PAGE, "", 0),
        ("<b>Bold</b> move", PAGE, "", 7),
    ];
    for (content, url, title, advance) in entries {
        clock.advance(advance);
        store.create_note(content, url, title).await.unwrap();
    }
    (store, clock)
}

fn ids(notes: &[Note]) -> Vec<&str> {
    notes.iter().map(|n| n.id.as_str()).collect()
}

// --- Scenarios ---

#[tokio::test]
async fn scenario_a_content_is_sanitized() {
    let (store, _) = store();
    store
        .create_note("  <b>Hi</b> there  ", "https://e.com/x", "T")
        .await
        .unwrap();
    let notes = store.get_notes_by_url("https://e.com/x").await.unwrap();
    assert_eq!(notes[0].content, "Hi there");
}

#[tokio::test]
async fn scenario_b_empty_content_is_rejected() {
    let (store, _) = store();
    let err = store
        .create_note("", "https://e.com", "T")
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
}

#[tokio::test]
async fn scenario_c_newest_first() {
    let (store, clock) = store();
    let first = store.create_note("first", PAGE, "").await.unwrap();
    clock.advance(1_000);
    let second = store.create_note("second", PAGE, "").await.unwrap();

    let notes = store.get_notes_by_url(PAGE).await.unwrap();
    assert_eq!(ids(&notes), vec![second.id.as_str(), first.id.as_str()]);
}

#[tokio::test]
async fn scenario_d_update_missing_is_not_found() {
    let (store, _) = store();
    let err = store.update_note("missing-id", "x").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[tokio::test]
async fn scenario_e_search_filters_by_content() {
    let (store, _) = store();
    store.create_note("Hi there", PAGE, "").await.unwrap();
    store.create_note("Bye", PAGE, "").await.unwrap();

    let results = store.search_notes("hi", PAGE).await.unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].content, "Hi there");
}

// --- Properties ---

#[test]
fn sanitize_twice_equals_once() {
    let inputs = [
        "",
        "   ",
        "<p>x</p>",
        "<<<>>>",
        "a<b<c>d>e",
        " <x> <y> ",
        "1 < 2 > 0",
        "<\n>multi\nline<\n/>",
        "tab\t<i>\t</i>",
    ];
    for input in inputs {
        let once = sanitize(input);
        assert_eq!(sanitize(&once), once, "input {:?}", input);
    }
}

#[test]
fn filtered_collection_is_closed_under_filtering() {
    let raw = json!({
        "good": {"id": "good", "content": "", "url": PAGE, "pageTitle": "",
                 "createdAt": 1, "updatedAt": 1},
        "old": {"id": "old", "content": "x", "url": PAGE, "pageTitle": "t",
                "createdAt": 2, "updatedAt": 3, "legacy": true},
        "neg": {"id": "neg", "content": "x", "url": PAGE, "pageTitle": "",
                "createdAt": -1, "updatedAt": 3},
        "nourl": {"id": "nourl", "content": "x", "pageTitle": "",
                  "createdAt": 1, "updatedAt": 1},
        "list": [],
    });
    let once = filter_valid_notes(Some(&raw));
    assert!(once.notes.values().all(is_valid));
    assert_eq!(once.notes.len(), 2);

    let again = filter_valid_notes(Some(&serde_json::to_value(&once.notes).unwrap()));
    assert_eq!(again.notes, once.notes);
}

#[tokio::test]
async fn created_notes_satisfy_invariants() {
    let (store, _) = populated().await;
    let before: Vec<String> = store
        .get_notes_by_url(PAGE)
        .await
        .unwrap()
        .into_iter()
        .map(|n| n.id)
        .collect();

    let note = store.create_note(" fresh ", PAGE, "<i>t</i>").await.unwrap();
    assert_eq!(note.created_at, note.updated_at);
    assert_eq!(note.content, "fresh");
    assert!(!note.url.is_empty());
    assert!(!before.contains(&note.id));
}

#[tokio::test]
async fn updates_never_move_updated_at_backwards() {
    let (store, clock) = populated().await;
    let notes = store.get_notes_by_url(PAGE).await.unwrap();

    for note in &notes {
        // Each note is edited three times: forward, back, forward again.
        let mut previous = note.clone();
        for step in [250, -10_000, 40] {
            clock.advance(step);
            let updated = store.update_note(&note.id, "rewritten").await.unwrap();
            assert!(updated.updated_at >= previous.created_at);
            assert!(
                updated.updated_at >= previous.updated_at,
                "updated_at went from {} to {}",
                previous.updated_at,
                updated.updated_at
            );
            assert_eq!(updated.created_at, note.created_at);
            previous = updated;
        }
    }
}

#[tokio::test]
async fn lists_are_ordered_newest_first() {
    let (store, _) = populated().await;
    for url in [PAGE, OTHER, "https://nowhere"] {
        let notes = store.get_notes_by_url(url).await.unwrap();
        assert!(notes
            .windows(2)
            .all(|pair| pair[0].created_at >= pair[1].created_at));
    }
}

#[tokio::test]
async fn search_results_are_a_matching_subset() {
    let (store, _) = populated().await;
    let all = store.get_notes_by_url(PAGE).await.unwrap();

    for query in ["hi", "HI", "bye", "Farewell", "move", "", "  ", "zzz", "<b>"] {
        let results = store.search_notes(query, PAGE).await.unwrap();
        for note in &results {
            assert!(all.contains(note));
            if !query.trim().is_empty() {
                let q = query.to_lowercase();
                assert!(
                    note.content.to_lowercase().contains(&q)
                        || note.page_title.to_lowercase().contains(&q)
                );
            }
        }
    }

    let hi = store.search_notes("hi", PAGE).await.unwrap();
    let contents: Vec<&str> = hi.iter().map(|n| n.content.as_str()).collect();
    // "Highlights" matches on title; "hidden HI" is on another page.
    assert_eq!(contents, vec!["third", "Hi there"]);
}

#[tokio::test]
async fn deleted_notes_stay_gone() {
    let (store, _) = populated().await;
    let notes = store.get_notes_by_url(PAGE).await.unwrap();

    for note in &notes {
        store.delete_note(&note.id).await.unwrap();
        let remaining = store.get_notes_by_url(PAGE).await.unwrap();
        assert!(remaining.iter().all(|n| n.id != note.id));

        let err = store.delete_note(&note.id).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }
    assert!(store.get_notes_by_url(PAGE).await.unwrap().is_empty());
    assert_eq!(store.get_notes_by_url(OTHER).await.unwrap().len(), 1);
}

#[tokio::test]
async fn ids_are_never_reused_after_delete() {
    let (store, _) = store();
    let first = store.create_note("a", PAGE, "").await.unwrap();
    store.delete_note(&first.id).await.unwrap();
    let second = store.create_note("b", PAGE, "").await.unwrap();
    assert_ne!(first.id, second.id);
}

#[tokio::test]
async fn corrupt_entries_never_surface() {
    let (store, _) = populated().await;
    let mut raw = store.backend().get(STORAGE_KEY).await.unwrap().unwrap();
    raw["evil"] = json!({"id": "evil", "content": "<script>", "url": PAGE,
                         "pageTitle": "", "createdAt": 10, "updatedAt": 5});
    store.backend().set(STORAGE_KEY, raw).await.unwrap();

    assert!(store
        .get_notes_by_url(PAGE)
        .await
        .unwrap()
        .iter()
        .all(|n| n.id != "evil"));
    assert!(store.search_notes("script", PAGE).await.unwrap().is_empty());
    assert_eq!(
        store.update_note("evil", "fix").await.unwrap_err().kind(),
        ErrorKind::NotFound
    );
    assert_eq!(
        store.delete_note("evil").await.unwrap_err().kind(),
        ErrorKind::NotFound
    );
    assert!(store.diagnostics().dropped_records >= 3);
}
