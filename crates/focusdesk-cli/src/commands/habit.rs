use chrono::NaiveDate;
use clap::Subcommand;
use focusdesk_core::HabitKey;

use crate::common;

#[derive(Subcommand)]
pub enum HabitAction {
    /// Flip a habit flag on the selected day
    Toggle {
        /// estudo, leitura, exercicio or meditacao
        habit: String,
    },
    /// Select the day to browse (default: today)
    Day { date: Option<NaiveDate> },
    /// Print the month grid for the selected day's month
    Calendar {
        #[arg(long)]
        json: bool,
    },
    /// Print the habit flags for the selected day
    Status,
}

pub fn run(action: HabitAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut store = common::open_store()?;
    let mut app = common::load_app(&store);

    match action {
        HabitAction::Toggle { habit } => {
            let habit: HabitKey = habit.parse()?;
            let now_done = app.toggle_habit(habit);
            println!(
                "{} on {}: {}",
                habit,
                app.selected_day(),
                if now_done { "done" } else { "not done" }
            );
        }
        HabitAction::Day { date } => {
            let date = match date {
                Some(d) => d,
                None => chrono::Local::now().date_naive(),
            };
            app.select_day(date);
            println!("selected {}", app.selected_day());
        }
        HabitAction::Calendar { json } => {
            let grid = app
                .month_view()
                .ok_or("selected day has no valid month")?;
            if json {
                println!("{}", serde_json::to_string_pretty(&grid)?);
            } else {
                println!("{:04}-{:02}", grid.year, grid.month);
                println!(" Su  Mo  Tu  We  Th  Fr  Sa");
                for week in &grid.weeks {
                    let row: Vec<String> = week
                        .iter()
                        .map(|cell| {
                            if !cell.in_month {
                                "  . ".to_string()
                            } else {
                                let marker = if !cell.habits.is_empty() { '*' } else { ' ' };
                                let braces = if cell.is_selected { ('[', ']') } else { (' ', ' ') };
                                format!("{}{:>2}{}{marker}", braces.0, cell.day, braces.1)
                            }
                        })
                        .collect();
                    println!("{}", row.join(""));
                }
            }
        }
        HabitAction::Status => {
            println!("{}:", app.selected_day());
            for (habit, done) in app.habit_buttons() {
                let mark = if done { "x" } else { " " };
                println!("  [{mark}] {habit}");
            }
        }
    }

    common::save_app(&mut store, &app);
    Ok(())
}
