//! # Rendering Module
//!
//! Turns controller state into text for the terminal, or JSON for scripts.
//! Styling goes through `console`, which drops colors when stdout is not a
//! terminal.

use console::Style;
use pagenotesapp::config::NotesConfig;
use pagenotesapp::controller::{MessageLevel, NoteListView, PageContext, StatusMessage};
use serde_json::json;
use std::path::Path;

pub const EMPTY_LIST: &str = "No notes for this page yet.";

struct Styles {
    title: Style,
    muted: Style,
    faint: Style,
    success: Style,
    error: Style,
}

fn styles() -> Styles {
    Styles {
        title: Style::new().bold(),
        muted: Style::new().color256(245),
        faint: Style::new().color256(240),
        success: Style::new().green(),
        error: Style::new().red().bold(),
    }
}

pub fn render_status(message: &StatusMessage) -> String {
    let s = styles();
    match message.level {
        MessageLevel::Success => s.success.apply_to(&message.content).to_string(),
        MessageLevel::Error => s.error.apply_to(&message.content).to_string(),
    }
}

/// The page header followed by each note card, or the empty state.
pub fn render_view(page: &PageContext, view: &NoteListView) -> String {
    let s = styles();
    let mut out = format!(
        "{}\n{}\n",
        s.title.apply_to(&page.title),
        s.muted.apply_to(&page.url)
    );

    let cards = view.cards();
    if cards.is_empty() {
        out.push('\n');
        out.push_str(&s.muted.apply_to(EMPTY_LIST).to_string());
        out.push('\n');
        return out;
    }

    for card in cards {
        out.push('\n');
        out.push_str(&format!("{}\n", s.faint.apply_to(&card.id)));
        for line in card.content.lines() {
            out.push_str(&format!("  {}\n", line));
        }
        out.push_str(&format!("  {}\n", s.muted.apply_to(&card.meta)));
    }
    out
}

pub fn render_json(page: &PageContext, view: &NoteListView) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&json!({
        "page": page,
        "view": view,
    }))
}

pub fn render_config(config: &NotesConfig, data_dir: &Path, config_file: Option<&Path>) -> String {
    let s = styles();
    let file = match config_file {
        Some(path) if path.exists() => path.display().to_string(),
        Some(path) => format!("{} (not present)", path.display()),
        None => "(none)".to_string(),
    };
    let rows = [
        ("config_file", file),
        ("data_dir", data_dir.display().to_string()),
        (
            "search_debounce_ms",
            config.search_debounce_ms.to_string(),
        ),
        (
            "success_message_ms",
            config.success_message_ms.to_string(),
        ),
        ("error_message_ms", config.error_message_ms.to_string()),
    ];
    rows.iter()
        .map(|(key, value)| format!("{} = {}\n", s.muted.apply_to(key), value))
        .collect()
}
