//! Focus/Break timer: state machine plus the cancellable one-second ticker.

mod engine;
pub mod ticker;

pub use engine::{Mode, TimerEngine, TimerView};
pub use ticker::Ticker;

/// Full focus interval, in seconds.
pub const FOCUS_SECS: u32 = 25 * 60;
/// Full break interval, in seconds.
pub const BREAK_SECS: u32 = 5 * 60;

/// Zero-padded `MM:SS` display string.
pub fn format_mmss(secs: u32) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}
