use std::time::Instant;

use clap::Subcommand;
use focusdesk_core::storage::{FlushScheduler, SqliteStore};
use focusdesk_core::{App, Category, Config, Event, Ticker};

use crate::common;

#[derive(Subcommand)]
pub enum TimerAction {
    /// Start the countdown
    Start,
    /// Pause the countdown, preserving remaining time
    Pause,
    /// Reset the current mode to its full duration
    Reset,
    /// Set the active category (geral, estudo, leitura, exercicio, meditacao)
    Category { name: String },
    /// Print the current timer snapshot as JSON
    Status,
    /// Drive the timer live, one status line per second
    Run {
        /// Stop after this many seconds (default: run until the phase completes)
        #[arg(long)]
        seconds: Option<u64>,
    },
}

pub fn run(action: TimerAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut store = common::open_store()?;
    let mut app = common::load_app(&store);

    match action {
        TimerAction::Start => {
            let event = app.timer_start();
            print_event_or_status(&app, event)?;
        }
        TimerAction::Pause => {
            let event = app.timer_pause();
            print_event_or_status(&app, event)?;
        }
        TimerAction::Reset => {
            // Reset is the moment a changed configuration takes effect on
            // an already-persisted timer.
            let cfg = Config::load_or_default();
            app.set_timer_durations(cfg.timer.focus_min * 60, cfg.timer.break_min * 60);
            let event = app.timer_reset();
            print_event_or_status(&app, event)?;
        }
        TimerAction::Category { name } => {
            let category: Category = name.parse()?;
            app.set_category(category);
            println!("category: {category}");
        }
        TimerAction::Status => {
            println!("{}", serde_json::to_string_pretty(&app.timer_view())?);
        }
        TimerAction::Run { seconds } => {
            run_live(&mut store, &mut app, seconds)?;
        }
    }

    common::save_app(&mut store, &app);
    Ok(())
}

fn print_event_or_status(app: &App, event: Option<Event>) -> Result<(), serde_json::Error> {
    match event {
        Some(event) => println!("{}", serde_json::to_string_pretty(&event)?),
        None => println!("{}", serde_json::to_string_pretty(&app.timer_view())?),
    }
    Ok(())
}

/// Live countdown loop: a cancellable one-second ticker drives the engine,
/// and a coalescing scheduler saves state once per quiet period instead of
/// on every tick.
fn run_live(
    store: &mut SqliteStore,
    app: &mut App,
    seconds: Option<u64>,
) -> Result<(), Box<dyn std::error::Error>> {
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        app.timer_start();
        let (ticker, mut ticks) = Ticker::spawn_secondly();
        let mut scheduler = FlushScheduler::default();
        let mut elapsed = 0u64;

        loop {
            if ticks.recv().await.is_none() {
                break;
            }
            if scheduler.take_due(Instant::now()) {
                common::save_app(store, app);
            }
            let events = app.tick();
            scheduler.mark();

            let view = app.timer_view();
            println!("{}  {}  [{}]", view.status, view.display, view.category);

            if events
                .iter()
                .any(|e| matches!(e, Event::PhaseCompleted { .. }))
            {
                break;
            }
            elapsed += 1;
            if seconds.is_some_and(|limit| elapsed >= limit) {
                break;
            }
        }
        ticker.cancel();
    });

    // A debounced flush still pending at loop exit is covered by the
    // unconditional save in `run`.
    Ok(())
}
