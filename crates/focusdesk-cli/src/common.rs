//! Shared store/app plumbing for the subcommands.
//!
//! Every command rehydrates the application state from the key-value
//! store, applies its intent, and saves. A failing save degrades to a
//! warning: the session keeps its in-memory state.

use focusdesk_core::storage::{self, SqliteStore};
use focusdesk_core::{App, Config};

pub fn open_store() -> Result<SqliteStore, Box<dyn std::error::Error>> {
    Ok(SqliteStore::open()?)
}

/// Rehydrate the app. A store with no persisted timer starts one with the
/// configured durations instead of the built-in defaults.
pub fn load_app(store: &SqliteStore) -> App {
    storage::load_app_with(store, Config::load_or_default().engine())
}

pub fn save_app(store: &mut SqliteStore, app: &App) {
    if let Err(e) = storage::save_app(store, app) {
        log::warn!("state save failed: {e}");
        eprintln!("warning: could not save state, changes live in memory only: {e}");
    }
}
