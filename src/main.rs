//! Binary entry point that glues the SQLite-backed record store to the TUI.
//! Summarizing the bootstrapping pipeline here keeps the intent obvious when
//! revisiting the code: we bring up the database schema, hand the store to the
//! app state, and drive the Ratatui event loop until the user exits.
use university_records_manager::{run_app, App, Store};

/// Initialize persistence and launch the Ratatui event loop.
///
/// Returning a `Result` bubbles up fatal initialization problems (for example
/// a table that cannot be created on first run) to the terminal instead of
/// entering the UI against a broken schema.
fn main() -> anyhow::Result<()> {
    let store = Store::open_default()?;
    let mut app = App::new(store);
    run_app(&mut app)
}
