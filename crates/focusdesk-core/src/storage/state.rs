//! Application-state persistence through the key-value gateway.
//!
//! Loading is forgiving by design: absent keys fall back to defaults,
//! malformed payloads are logged and treated as absent, and older task
//! records missing fields are backfilled by the serde defaults on the
//! task types. Nothing here is fatal.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::app::App;
use crate::error::CoreError;
use crate::ledger::{self, HabitLedger, WaterLedger};
use crate::task::TaskStore;
use crate::timer::TimerEngine;

use super::kv::KvStore;

pub const KEY_TIMER: &str = "timer";
pub const KEY_TASKS: &str = "tasks";
pub const KEY_NOTES: &str = "notes";
pub const KEY_WATER_INTAKE: &str = "water_intake";
pub const KEY_WATER_RESET: &str = "water_last_reset";
pub const KEY_HABITS: &str = "habits";
pub const KEY_SELECTED_DAY: &str = "selected_day";

fn get_raw(store: &dyn KvStore, key: &str) -> Option<String> {
    match store.get(key) {
        Ok(value) => value,
        Err(err) => {
            log::warn!("read of '{key}' failed, using default: {err}");
            None
        }
    }
}

fn get_json<T: DeserializeOwned>(store: &dyn KvStore, key: &str) -> Option<T> {
    let raw = get_raw(store, key)?;
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(err) => {
            log::warn!("malformed payload under '{key}', using default: {err}");
            None
        }
    }
}

/// Load the whole application state. Never fails: a broken or empty store
/// yields a default in-memory state. Runs the water day-rollover, which
/// must happen on every load.
pub fn load_app(store: &dyn KvStore) -> App {
    load_app_with(store, TimerEngine::new())
}

/// Like [`load_app`], with `default_timer` standing in when no timer is
/// persisted. Callers pass the engine built from their configured
/// durations; a persisted timer keeps the durations it was saved with.
pub fn load_app_with(store: &dyn KvStore, default_timer: TimerEngine) -> App {
    let today = ledger::today_key();

    let timer: TimerEngine = get_json(store, KEY_TIMER).unwrap_or(default_timer);
    let tasks: TaskStore = get_json(store, KEY_TASKS).unwrap_or_default();
    let habits: HabitLedger = get_json(store, KEY_HABITS).unwrap_or_default();
    let notes = get_raw(store, KEY_NOTES).unwrap_or_default();

    let intake_ml = get_raw(store, KEY_WATER_INTAKE)
        .and_then(|raw| match raw.trim().parse::<u32>() {
            Ok(ml) => Some(ml),
            Err(_) => {
                log::warn!("malformed payload under '{KEY_WATER_INTAKE}', using 0");
                None
            }
        })
        .unwrap_or(0);
    let last_reset = get_raw(store, KEY_WATER_RESET).unwrap_or_else(|| today.clone());
    let water = WaterLedger {
        intake_ml,
        last_reset_day: last_reset,
    };

    let selected_day = get_raw(store, KEY_SELECTED_DAY)
        .filter(|key| ledger::parse_date_key(key).is_some())
        .unwrap_or(today);

    let mut app = App::from_parts(timer, tasks, habits, water, notes, selected_day);
    app.rollover_if_new_day();
    app
}

fn set_json<T: Serialize>(
    store: &mut dyn KvStore,
    key: &str,
    value: &T,
) -> Result<(), CoreError> {
    let json = serde_json::to_string(value)?;
    store.set(key, &json).map_err(CoreError::from)
}

/// Persist the whole application state. Callers treat a failure as a
/// non-fatal warning and keep operating in memory.
pub fn save_app(store: &mut dyn KvStore, app: &App) -> Result<(), CoreError> {
    set_json(store, KEY_TIMER, app.timer())?;
    set_json(store, KEY_TASKS, app.tasks())?;
    set_json(store, KEY_HABITS, app.habits())?;
    store.set(KEY_NOTES, app.notes())?;
    store.set(KEY_WATER_INTAKE, &app.water().intake_ml.to_string())?;
    store.set(KEY_WATER_RESET, &app.water().last_reset_day)?;
    store.set(KEY_SELECTED_DAY, app.selected_day())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::kv::MemoryStore;

    #[test]
    fn empty_store_loads_defaults() {
        let store = MemoryStore::new();
        let app = load_app(&store);
        assert!(app.tasks().is_empty());
        assert_eq!(app.water().intake_ml, 0);
        assert_eq!(app.notes(), "");
        assert_eq!(app.selected_day(), ledger::today_key());
    }

    #[test]
    fn malformed_payloads_fall_back_to_defaults() {
        let mut store = MemoryStore::new();
        store.set(KEY_TASKS, "{not json").unwrap();
        store.set(KEY_WATER_INTAKE, "a lot").unwrap();
        store.set(KEY_SELECTED_DAY, "yesterday-ish").unwrap();
        let app = load_app(&store);
        assert!(app.tasks().is_empty());
        assert_eq!(app.water().intake_ml, 0);
        assert_eq!(app.selected_day(), ledger::today_key());
    }

    #[test]
    fn older_task_records_are_backfilled() {
        let mut store = MemoryStore::new();
        store
            .set(KEY_TASKS, r#"[{"text":"old","completed":false}]"#)
            .unwrap();
        let app = load_app(&store);
        let task = app.tasks().get(0).unwrap();
        assert_eq!(task.quadrant, None);
        assert!(task.sub_steps.is_empty());
    }

    #[test]
    fn load_rolls_water_over_to_today() {
        let mut store = MemoryStore::new();
        store.set(KEY_WATER_INTAKE, "900").unwrap();
        store.set(KEY_WATER_RESET, "2001-01-01").unwrap();
        let app = load_app(&store);
        assert_eq!(app.water().intake_ml, 0);
        assert_eq!(app.water().last_reset_day, ledger::today_key());
    }

    #[test]
    fn missing_timer_takes_the_provided_default_engine() {
        let store = MemoryStore::new();
        let app = load_app_with(&store, TimerEngine::with_durations(50 * 60, 10 * 60));
        assert_eq!(app.timer_view().display, "50:00");
        assert_eq!(app.timer().mode_total(), 50 * 60);
    }

    #[test]
    fn persisted_timer_keeps_its_own_durations() {
        let mut store = MemoryStore::new();
        save_app(&mut store, &App::new()).unwrap();
        let loaded = load_app_with(&store, TimerEngine::with_durations(50 * 60, 10 * 60));
        assert_eq!(loaded.timer_view().display, "25:00");
    }

    #[test]
    fn save_then_load_reproduces_state() {
        let mut app = App::new();
        app.add_task("Write report");
        app.add_matrix_task("Plan sprint");
        app.add_sub_step(0, "outline");
        app.toggle_habit(crate::ledger::HabitKey::Estudo);
        app.water_add(450);
        app.set_notes("brain dump");

        let mut store = MemoryStore::new();
        save_app(&mut store, &app).unwrap();
        let loaded = load_app(&store);
        assert_eq!(loaded, app);
    }
}
