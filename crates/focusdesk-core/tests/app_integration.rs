//! End-to-end behavior of the application facade and persistence gateway.

use proptest::prelude::*;

use focusdesk_core::ledger::{self, Category, HabitKey, WaterLedger};
use focusdesk_core::storage::{load_app, save_app, MemoryStore};
use focusdesk_core::task::{Quadrant, TaskStore};
use focusdesk_core::timer::{Mode, TimerEngine, BREAK_SECS, FOCUS_SECS};
use focusdesk_core::App;

#[test]
fn full_focus_interval_flips_to_break_and_records_habit() {
    let mut app = App::new();
    app.set_category(Category::Estudo);
    app.timer_start();

    for _ in 0..FOCUS_SECS {
        app.tick();
    }

    let view = app.timer_view();
    assert_eq!(view.mode, Mode::Break);
    assert!(!view.running);
    assert_eq!(view.display, "05:00");
    assert_eq!(app.timer().remaining_secs(), BREAK_SECS);
    assert!(app.habits().is_done(&ledger::today_key(), HabitKey::Estudo));
}

#[test]
fn empty_add_is_noop_and_real_add_lands_free() {
    let mut app = App::new();
    assert!(!app.add_task(""));
    assert_eq!(app.tasks().len(), 0);

    assert!(app.add_task("Write report"));
    assert_eq!(app.tasks().len(), 1);
    assert_eq!(app.tasks().get(0).unwrap().quadrant, None);
}

#[test]
fn water_clamps_at_zero() {
    let mut app = App::new();
    app.water_add(200);
    assert_eq!(app.water_add(-500), 0);
}

#[test]
fn state_roundtrips_through_the_gateway() {
    let mut app = App::new();
    app.add_task("free one");
    app.add_matrix_task("scheduled one");
    app.add_sub_step(0, "first step");
    app.toggle_sub_step(0, 0);
    app.assign_quadrant(0, Quadrant::Q3);
    app.toggle_habit(HabitKey::Leitura);
    app.water_add(700);
    app.set_notes("loose thoughts");
    app.set_category(Category::Meditacao);
    app.timer_start();
    app.tick();
    app.timer_pause();

    let mut store = MemoryStore::new();
    save_app(&mut store, &app).unwrap();
    let loaded = load_app(&store);

    assert_eq!(loaded, app);
    assert_eq!(loaded.timer().remaining_secs(), FOCUS_SECS - 1);
    assert_eq!(loaded.timer().category(), Category::Meditacao);
}

#[test]
fn rollover_zeroes_exactly_once_per_new_day() {
    let mut water = WaterLedger::new("2024-05-01");
    water.add(800);

    // Same day, any number of checks: nothing happens.
    for _ in 0..5 {
        assert!(!water.rollover_if_new_day("2024-05-01"));
    }
    assert_eq!(water.intake_ml, 800);

    // New day: exactly one reset no matter how often it is checked.
    let resets = (0..5)
        .filter(|_| water.rollover_if_new_day("2024-05-02"))
        .count();
    assert_eq!(resets, 1);
    assert_eq!(water.intake_ml, 0);
}

proptest! {
    /// For any tick/start/pause/reset sequence the countdown stays within
    /// (0, mode total] -- it never underflows and never exceeds the
    /// interval it is counting down.
    #[test]
    fn countdown_stays_in_range(ops in prop::collection::vec(0u8..4, 1..600)) {
        let mut engine = TimerEngine::with_durations(90, 30);
        for op in ops {
            match op {
                0 => { engine.start(); }
                1 => { engine.pause(); }
                2 => { engine.reset(); }
                _ => { engine.tick(); }
            }
            prop_assert!(engine.remaining_secs() >= 1);
            prop_assert!(engine.remaining_secs() <= engine.mode_total());
        }
    }

    /// Mode alternation is strict under any schedule of completions.
    #[test]
    fn modes_strictly_alternate(runs in 1usize..8) {
        let mut engine = TimerEngine::with_durations(2, 3);
        let mut finished = Vec::new();
        for _ in 0..runs {
            engine.start();
            loop {
                if let Some(event) = engine.tick() {
                    if let focusdesk_core::Event::PhaseCompleted { finished: mode, .. } = event {
                        finished.push(mode);
                    }
                    break;
                }
            }
        }
        for pair in finished.windows(2) {
            prop_assert_ne!(pair[0], pair[1]);
        }
    }

    /// Intake equals the left-to-right clamped fold of the deltas and is
    /// never negative (it cannot underflow the unsigned counter).
    #[test]
    fn water_matches_clamped_fold(deltas in prop::collection::vec(-2000i32..2000, 0..50)) {
        let mut water = WaterLedger::new("2024-05-01");
        let mut expected: i64 = 0;
        for delta in deltas {
            water.add(delta);
            expected = (expected + i64::from(delta)).max(0);
            prop_assert_eq!(u32::try_from(expected).unwrap(), water.intake_ml);
        }
    }

    /// Four advances from any quadrant return to it, visiting each bucket
    /// exactly once.
    #[test]
    fn quadrant_advance_is_a_four_cycle(start in 0usize..4) {
        let start = Quadrant::ALL[start];
        let mut store = TaskStore::default();
        store.add_task("cycle");
        store.assign_quadrant(0, start);

        let mut visited = vec![start];
        for _ in 0..4 {
            visited.push(store.advance_quadrant(0).unwrap());
        }
        prop_assert_eq!(visited[4], start);
        let mut middle = visited[..4].to_vec();
        middle.sort_by_key(|q| *q as u8);
        prop_assert_eq!(middle, Quadrant::ALL.to_vec());
    }

    /// Removing any task preserves the relative order and content of the
    /// survivors.
    #[test]
    fn removal_preserves_survivors(
        texts in prop::collection::vec("[a-z]{1,8}", 1..20),
        pick in 0usize..20,
    ) {
        let mut store = TaskStore::default();
        for text in &texts {
            store.add_task(text);
        }
        let pos = pick % texts.len();
        store.remove(pos);

        let mut expected = texts.clone();
        expected.remove(pos);
        let remaining: Vec<String> =
            store.tasks().iter().map(|t| t.text.clone()).collect();
        prop_assert_eq!(remaining, expected);
    }
}
