//! Core library surface for the University Records Manager TUI application.
//!
//! The public modules exposed here provide an intentionally small API so the
//! `bin` target as well as potential external tooling can reuse the same pieces.
//! Keeping the glue logic documented makes it easy to recall why each re-export
//! exists when revisiting the project.
pub mod db;
pub mod registry;
pub mod ui;

/// Convenience re-exports for the persistence layer. `main.rs` uses the
/// store handle to bootstrap the embedded SQLite database.
pub use db::{Store, StoreError};

/// The table registry other layers select tables through.
pub use registry::TableKind;

/// The interactive application entry point and state container.
pub use ui::{run_app, App};
