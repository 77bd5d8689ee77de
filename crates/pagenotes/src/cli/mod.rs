//! # CLI Layer
//!
//! This module is **one possible UI client** for page notes. It is the only
//! place that knows about terminal I/O, argument parsing or process exits.

mod commands;
mod render;
mod setup;

pub use commands::run;
