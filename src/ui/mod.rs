//! Terminal user interface built on ratatui and crossterm.

mod app;
mod forms;
mod screens;
mod terminal;

pub use app::App;
pub use terminal::run_app;
