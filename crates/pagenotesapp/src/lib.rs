//! # Page Notes Architecture
//!
//! Page notes lets a user attach free-text notes to the page they are
//! reading, stored locally and looked up by the page's exact URL. This crate
//! is **UI-agnostic**: it holds the storage rules and the popup's behaviour,
//! while clients (the `pagenotes` CLI, a browser popup, tests) only render.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  UI Client (crates/pagenotes, or any other surface)         │
//! │  - Resolves the active page, renders PopupState             │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Presentation Controller (controller/)                      │
//! │  - Save / edit / delete / debounced search actions          │
//! │  - View model, expiring status messages                     │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Note Store (store/)                                        │
//! │  - NoteService trait: create, get-by-url, update, delete,   │
//! │    search                                                   │
//! │  - Sanitize on write, validate on every load                │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Key-Value Backend (store/backend.rs)                       │
//! │  - FsBackend (JSON file), MemBackend (testing)              │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Key Principle: No I/O Assumptions in Core
//!
//! Nothing in this crate writes to stdout/stderr or exits the process.
//! Diagnostics go through `tracing`; installing a subscriber is the client's job.
//!
//! ## Module Overview
//!
//! - [`store`]: The note service contract, store and backends
//! - [`controller`]: Popup behaviour and view model
//! - [`model`]: The [`model::Note`] record and ordering
//! - [`sanitize`]: Tag stripping applied on every write
//! - [`validation`]: Structural checks applied on every load
//! - [`services`]: Clock and id sources
//! - [`config`]: Configuration management
//! - [`error`]: Error types

pub mod config;
pub mod controller;
pub mod error;
pub mod model;
pub mod sanitize;
pub mod services;
pub mod store;
pub mod validation;
