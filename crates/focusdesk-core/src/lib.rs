//! # Focusdesk Core Library
//!
//! Core business logic for Focusdesk, a personal productivity widget:
//! a Focus/Break countdown timer, a task list with an Eisenhower-matrix
//! view, a per-day habit ledger and a water-intake counter. The CLI binary
//! is a thin layer over this library; any other presentation layer renders
//! the same snapshots and forwards the same intents.
//!
//! ## Architecture
//!
//! - **Timer**: a caller-driven state machine -- the caller delivers one
//!   `tick()` per elapsed second (see [`timer::Ticker`] for the standard
//!   cancellable source of those seconds)
//! - **Task store**: position-addressed ordered collection with stable ids
//!   and quadrant assignment
//! - **Ledgers**: per-day habit flags and a water counter with automatic
//!   day rollover
//! - **Storage**: an opaque string key-value gateway (SQLite-backed by
//!   default) plus TOML configuration
//!
//! ## Key Components
//!
//! - [`App`]: the single owned application state, one method per intent
//! - [`TimerEngine`]: Focus/Break countdown state machine
//! - [`TaskStore`]: task collection and matrix views
//! - [`KvStore`]: persistence gateway contract

pub mod app;
pub mod calendar;
pub mod error;
pub mod events;
pub mod ledger;
pub mod storage;
pub mod task;
pub mod timer;

pub use app::App;
pub use error::{ConfigError, CoreError, StorageError};
pub use events::Event;
pub use ledger::{Category, HabitKey, HabitLedger, WaterLedger};
pub use storage::{Config, FlushScheduler, KvStore, MemoryStore, SqliteStore};
pub use task::{Quadrant, SubStep, Task, TaskStore};
pub use timer::{Mode, Ticker, TimerEngine, TimerView};
