//! Per-day habit completion ledger.
//!
//! Habit keys are a fixed enumeration; the ledger maps a local-calendar
//! date key to the completion flag of each habit touched that day. Entries
//! grow monotonically, there is no deletion.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// One of the fixed tracked habits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HabitKey {
    Estudo,
    Leitura,
    Exercicio,
    Meditacao,
}

impl HabitKey {
    pub const ALL: [HabitKey; 4] = [
        HabitKey::Estudo,
        HabitKey::Leitura,
        HabitKey::Exercicio,
        HabitKey::Meditacao,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            HabitKey::Estudo => "estudo",
            HabitKey::Leitura => "leitura",
            HabitKey::Exercicio => "exercicio",
            HabitKey::Meditacao => "meditacao",
        }
    }
}

impl fmt::Display for HabitKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug)]
#[error("unknown habit: {0}")]
pub struct UnknownHabit(pub String);

impl FromStr for HabitKey {
    type Err = UnknownHabit;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "estudo" => Ok(HabitKey::Estudo),
            "leitura" => Ok(HabitKey::Leitura),
            "exercicio" => Ok(HabitKey::Exercicio),
            "meditacao" => Ok(HabitKey::Meditacao),
            other => Err(UnknownHabit(other.to_string())),
        }
    }
}

/// Timer category. Every habit is a valid category; `Geral` is the
/// free-focus category that maps to no habit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    #[default]
    Geral,
    Estudo,
    Leitura,
    Exercicio,
    Meditacao,
}

impl Category {
    /// The habit this category records on focus completion, if any.
    pub fn habit_key(self) -> Option<HabitKey> {
        match self {
            Category::Geral => None,
            Category::Estudo => Some(HabitKey::Estudo),
            Category::Leitura => Some(HabitKey::Leitura),
            Category::Exercicio => Some(HabitKey::Exercicio),
            Category::Meditacao => Some(HabitKey::Meditacao),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Geral => "geral",
            Category::Estudo => "estudo",
            Category::Leitura => "leitura",
            Category::Exercicio => "exercicio",
            Category::Meditacao => "meditacao",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug)]
#[error("unknown category: {0}")]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "geral" => Ok(Category::Geral),
            "estudo" => Ok(Category::Estudo),
            "leitura" => Ok(Category::Leitura),
            "exercicio" => Ok(Category::Exercicio),
            "meditacao" => Ok(Category::Meditacao),
            other => Err(UnknownCategory(other.to_string())),
        }
    }
}

/// Date-key → per-habit completion flags.
///
/// Serializes as a plain JSON object so saved payloads match the
/// `{ "2024-05-01": { "estudo": true } }` shape the gateway stores.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HabitLedger {
    days: BTreeMap<String, BTreeMap<HabitKey, bool>>,
}

impl HabitLedger {
    /// Mark a habit completed. Idempotent: recording twice equals once.
    pub fn record(&mut self, date_key: &str, habit: HabitKey) {
        self.days
            .entry(date_key.to_string())
            .or_default()
            .insert(habit, true);
    }

    /// Flip a habit flag. Returns the new value.
    pub fn toggle(&mut self, date_key: &str, habit: HabitKey) -> bool {
        let flag = self
            .days
            .entry(date_key.to_string())
            .or_default()
            .entry(habit)
            .or_insert(false);
        *flag = !*flag;
        *flag
    }

    pub fn is_done(&self, date_key: &str, habit: HabitKey) -> bool {
        self.days
            .get(date_key)
            .and_then(|flags| flags.get(&habit))
            .copied()
            .unwrap_or(false)
    }

    /// Completion flag for every habit on one day, in fixed order.
    pub fn day_flags(&self, date_key: &str) -> Vec<(HabitKey, bool)> {
        HabitKey::ALL
            .iter()
            .map(|&h| (h, self.is_done(date_key, h)))
            .collect()
    }

    /// Habits completed on one day, in fixed order.
    pub fn completed(&self, date_key: &str) -> Vec<HabitKey> {
        HabitKey::ALL
            .iter()
            .copied()
            .filter(|&h| self.is_done(date_key, h))
            .collect()
    }

    /// Number of days with at least one entry.
    pub fn day_count(&self) -> usize {
        self.days.len()
    }
}
