//! Core logic for `backlog`, a personal reading-list dashboard.
//!
//! The dashboard loads a spreadsheet export of article metadata, lets the
//! user narrow it by category, read-status, and keyword, pages through the
//! results, and remembers which articles have been read across sessions.
//! This crate is the data and state layer; rendering (checkboxes, buttons,
//! page chrome) belongs to an external presentation layer that calls in.
//!
//! Module map:
//!
//! - [`library`]: loading the article spreadsheet, the category taxonomy,
//!   and the pure filter/search pipeline
//! - [`store`]: the persistent read-status side file
//! - [`session`]: per-session filter + pagination state
//! - [`config`]: optional TOML configuration for the launcher
//! - [`util`]: stable key derivation and terminal-output helpers

pub mod config;
pub mod library;
pub mod session;
pub mod store;
pub mod util;
