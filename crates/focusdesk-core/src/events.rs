use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ledger::{Category, HabitKey};
use crate::timer::Mode;

/// Every state change in the core produces an Event.
/// The presentation layer renders them; the CLI prints them as JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    TimerStarted {
        mode: Mode,
        remaining_secs: u32,
        at: DateTime<Utc>,
    },
    TimerPaused {
        remaining_secs: u32,
        at: DateTime<Utc>,
    },
    TimerReset {
        mode: Mode,
        remaining_secs: u32,
        at: DateTime<Utc>,
    },
    /// A countdown reached zero and the mode flipped.
    PhaseCompleted {
        finished: Mode,
        next: Mode,
        category: Category,
        at: DateTime<Utc>,
    },
    CategoryChanged {
        category: Category,
        at: DateTime<Utc>,
    },
    /// A habit was marked completed in the ledger (auto or manual).
    HabitRecorded {
        date_key: String,
        habit: HabitKey,
        at: DateTime<Utc>,
    },
}
