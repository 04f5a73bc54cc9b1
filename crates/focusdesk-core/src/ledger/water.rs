//! Daily water-intake counter with automatic day rollover.

use serde::{Deserialize, Serialize};

/// Liquid intake for the current day, in milliliters.
///
/// `last_reset_day` is the date key of the day the counter was last zeroed;
/// whenever "today" differs, the counter resets once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaterLedger {
    pub intake_ml: u32,
    pub last_reset_day: String,
}

impl WaterLedger {
    pub fn new(today_key: &str) -> Self {
        Self {
            intake_ml: 0,
            last_reset_day: today_key.to_string(),
        }
    }

    /// Add (or, with a negative delta, remove) intake. Clamps at zero.
    /// Returns the resulting intake.
    pub fn add(&mut self, delta_ml: i32) -> u32 {
        self.intake_ml = if delta_ml >= 0 {
            self.intake_ml.saturating_add(delta_ml as u32)
        } else {
            self.intake_ml.saturating_sub(delta_ml.unsigned_abs())
        };
        self.intake_ml
    }

    /// Zero the counter if `today_key` differs from the last reset day.
    /// Safe to call redundantly; returns whether a reset happened.
    pub fn rollover_if_new_day(&mut self, today_key: &str) -> bool {
        if self.last_reset_day == today_key {
            return false;
        }
        self.intake_ml = 0;
        self.last_reset_day = today_key.to_string();
        true
    }

    /// Zero the counter and stamp today regardless of rollover state.
    pub fn reset_manual(&mut self, today_key: &str) {
        self.intake_ml = 0;
        self.last_reset_day = today_key.to_string();
    }

    pub fn display(&self) -> String {
        format!("{} ml", self.intake_ml)
    }
}
