mod config;
pub mod debounce;
pub mod kv;
pub mod state;

pub use config::Config;
pub use debounce::FlushScheduler;
pub use kv::{KvStore, MemoryStore, SqliteStore};
pub use state::{load_app, load_app_with, save_app};

use std::path::PathBuf;

/// Returns the data directory, created on demand.
///
/// `FOCUSDESK_DATA_DIR` overrides the location outright (tests use this);
/// otherwise `~/.config/focusdesk`, or `~/.config/focusdesk-dev` when
/// `FOCUSDESK_ENV=dev`.
pub fn data_dir() -> Result<PathBuf, std::io::Error> {
    let dir = if let Ok(explicit) = std::env::var("FOCUSDESK_DATA_DIR") {
        PathBuf::from(explicit)
    } else {
        let base = dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config");
        let env = std::env::var("FOCUSDESK_ENV").unwrap_or_else(|_| "production".to_string());
        if env == "dev" {
            base.join("focusdesk-dev")
        } else {
            base.join("focusdesk")
        }
    };
    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
