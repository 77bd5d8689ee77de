//! # Page Notes CLI
//!
//! The binary is intentionally thin: the CLI lives in `src/cli/`, while this
//! file only invokes `cli::run()` and handles process termination.
//!
//! ## Layering
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (crates/pagenotes/src/cli/)                      │
//! │  - clap argument parsing (setup.rs)                         │
//! │  - Logging, config and store wiring, dispatch (commands.rs) │
//! │  - Terminal and JSON rendering (render.rs)                  │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  PopupController (crates/pagenotesapp/src/controller/)      │
//! │  - The same actions a browser popup would trigger           │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  FileStore (crates/pagenotesapp/src/store/)                 │
//! │  - storage.json in the data directory                       │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! The CLI plays the part of the popup: `--url` and `--title` stand in for
//! the active tab, and each invocation performs one user action, prints the
//! resulting status message and list, and exits. A failed action exits with
//! status 1.

mod cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
