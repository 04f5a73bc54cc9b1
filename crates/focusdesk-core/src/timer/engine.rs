//! Timer state machine.
//!
//! The engine holds no clock and spawns no threads: the caller drives it by
//! calling `tick()` once per elapsed second while it is running (see
//! [`super::ticker`]). A tick is a plain decrement -- seconds the caller
//! never delivers (a suspended tab, a stopped process) are simply not
//! replayed. That is the intended behavior, not drift to correct.
//!
//! ## State transitions
//!
//! ```text
//! Focus(paused) -> Focus(running) -> ... -> Break(paused) -> Break(running) -> Focus(paused)
//! ```
//!
//! Mode alternation is strict: a completed Focus always yields Break and a
//! completed Break always yields Focus.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::{format_mmss, BREAK_SECS, FOCUS_SECS};
use crate::events::Event;
use crate::ledger::Category;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Focus,
    Break,
}

impl Mode {
    pub fn flip(self) -> Self {
        match self {
            Mode::Focus => Mode::Break,
            Mode::Break => Mode::Focus,
        }
    }
}

/// Read-only snapshot for the presentation layer.
#[derive(Debug, Clone, Serialize)]
pub struct TimerView {
    pub mode: Mode,
    pub running: bool,
    pub category: Category,
    /// Zero-padded MM:SS.
    pub display: String,
    /// remaining / mode total, in [0, 1].
    pub progress: f64,
    pub status: String,
}

/// Focus/Break countdown state machine.
///
/// Exactly one instance exists per application state. Mutated only by
/// `tick()` and the explicit start/pause/reset/set_category commands; none
/// of these operations can fail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerEngine {
    mode: Mode,
    remaining_secs: u32,
    running: bool,
    #[serde(default)]
    category: Category,
    #[serde(default = "default_focus_secs")]
    focus_secs: u32,
    #[serde(default = "default_break_secs")]
    break_secs: u32,
}

fn default_focus_secs() -> u32 {
    FOCUS_SECS
}

fn default_break_secs() -> u32 {
    BREAK_SECS
}

impl Default for TimerEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TimerEngine {
    /// Paused at the start of a full focus interval.
    pub fn new() -> Self {
        Self::with_durations(FOCUS_SECS, BREAK_SECS)
    }

    pub fn with_durations(focus_secs: u32, break_secs: u32) -> Self {
        Self {
            mode: Mode::Focus,
            remaining_secs: focus_secs,
            running: false,
            category: Category::default(),
            focus_secs,
            break_secs,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn category(&self) -> Category {
        self.category
    }

    /// Full duration of the current mode.
    pub fn mode_total(&self) -> u32 {
        match self.mode {
            Mode::Focus => self.focus_secs,
            Mode::Break => self.break_secs,
        }
    }

    /// 0.0 .. 1.0, remaining fraction of the current interval.
    pub fn progress(&self) -> f64 {
        let total = self.mode_total();
        if total == 0 {
            return 0.0;
        }
        self.remaining_secs as f64 / total as f64
    }

    pub fn status_label(&self) -> String {
        match (self.mode, self.running) {
            (Mode::Focus, true) => "MODO FOCO".to_string(),
            (Mode::Focus, false) => "PRONTO PARA FOCO".to_string(),
            (Mode::Break, true) => "PAUSA CURTA".to_string(),
            (Mode::Break, false) => "PRONTO PARA PAUSA".to_string(),
        }
    }

    pub fn snapshot(&self) -> TimerView {
        TimerView {
            mode: self.mode,
            running: self.running,
            category: self.category,
            display: format_mmss(self.remaining_secs),
            progress: self.progress(),
            status: self.status_label(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Begin counting down. No-op (and no event) if already running, so a
    /// second ticker can never stack on top of the first.
    pub fn start(&mut self) -> Option<Event> {
        if self.running {
            return None;
        }
        self.running = true;
        Some(Event::TimerStarted {
            mode: self.mode,
            remaining_secs: self.remaining_secs,
            at: Utc::now(),
        })
    }

    /// Stop counting down. Remaining time is preserved exactly.
    pub fn pause(&mut self) -> Option<Event> {
        if !self.running {
            return None;
        }
        self.running = false;
        Some(Event::TimerPaused {
            remaining_secs: self.remaining_secs,
            at: Utc::now(),
        })
    }

    /// Stop and restore the full duration of the current mode.
    pub fn reset(&mut self) -> Option<Event> {
        self.running = false;
        self.remaining_secs = self.mode_total();
        Some(Event::TimerReset {
            mode: self.mode,
            remaining_secs: self.remaining_secs,
            at: Utc::now(),
        })
    }

    /// Replace the focus/break durations (a configuration change).
    /// Remaining time is clamped so a paused countdown never exceeds the
    /// new mode total; a reset afterwards loads the new full duration.
    pub fn set_durations(&mut self, focus_secs: u32, break_secs: u32) {
        self.focus_secs = focus_secs;
        self.break_secs = break_secs;
        self.remaining_secs = self.remaining_secs.min(self.mode_total());
    }

    /// Change the active category. Does not disturb a running countdown.
    pub fn set_category(&mut self, category: Category) -> Option<Event> {
        if self.category == category {
            return None;
        }
        self.category = category;
        Some(Event::CategoryChanged {
            category,
            at: Utc::now(),
        })
    }

    /// One elapsed second. When the decrement reaches zero the engine stops,
    /// flips mode and loads the new mode's full duration; the returned
    /// `PhaseCompleted` names the finished mode and active category so the
    /// caller can record a habit completion for a finished focus interval.
    pub fn tick(&mut self) -> Option<Event> {
        if !self.running {
            return None;
        }
        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        if self.remaining_secs > 0 {
            return None;
        }
        let finished = self.mode;
        self.running = false;
        self.mode = self.mode.flip();
        self.remaining_secs = self.mode_total();
        log::debug!("phase completed: {finished:?} -> {:?}", self.mode);
        Some(Event::PhaseCompleted {
            finished,
            next: self.mode,
            category: self.category,
            at: Utc::now(),
        })
    }
}
