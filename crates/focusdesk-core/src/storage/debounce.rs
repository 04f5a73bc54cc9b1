//! Coalescing write scheduler.
//!
//! High-frequency inputs (freeform notes, repeated button presses) mark
//! the state dirty; a flush becomes due once a quiet period has passed
//! since the last mark. Correctness never depends on flush timing, only
//! on a flush eventually happening before the next load, so the driving
//! loop may poll `take_due` as coarsely as it likes. Time is passed in by
//! the caller, which keeps the scheduler deterministic under test.

use std::time::{Duration, Instant};

pub const DEFAULT_QUIET: Duration = Duration::from_millis(500);

#[derive(Debug, Clone)]
pub struct FlushScheduler {
    quiet: Duration,
    dirty: bool,
    last_mark: Option<Instant>,
}

impl Default for FlushScheduler {
    fn default() -> Self {
        Self::new(DEFAULT_QUIET)
    }
}

impl FlushScheduler {
    pub fn new(quiet: Duration) -> Self {
        Self {
            quiet,
            dirty: false,
            last_mark: None,
        }
    }

    /// Record a state change at `now`. Restarts the quiet window.
    pub fn mark_at(&mut self, now: Instant) {
        self.dirty = true;
        self.last_mark = Some(now);
    }

    pub fn mark(&mut self) {
        self.mark_at(Instant::now());
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Whether a flush is due at `now`.
    pub fn due_at(&self, now: Instant) -> bool {
        match (self.dirty, self.last_mark) {
            (true, Some(mark)) => now.duration_since(mark) >= self.quiet,
            _ => false,
        }
    }

    /// Consume a due flush: returns true at most once per quiet window and
    /// clears the dirty flag.
    pub fn take_due(&mut self, now: Instant) -> bool {
        if !self.due_at(now) {
            return false;
        }
        self.dirty = false;
        self.last_mark = None;
        true
    }

    /// Consume a pending flush regardless of the quiet window (shutdown).
    pub fn take_pending(&mut self) -> bool {
        let was_dirty = self.dirty;
        self.dirty = false;
        self.last_mark = None;
        was_dirty
    }
}
