use clap::Subcommand;
use focusdesk_core::task::{Quadrant, Task};

use crate::common;

#[derive(Subcommand)]
pub enum TaskAction {
    /// Add a free-list task
    Add { text: String },
    /// Add a task directly into the matrix (lands in Q2)
    AddMatrix { text: String },
    /// List the free list and the four quadrants
    List {
        #[arg(long)]
        json: bool,
    },
    /// Toggle completion of the task at a position
    Toggle { pos: usize },
    /// Remove the task at a position (later positions shift down)
    Remove { pos: usize },
    /// Add a sub-step to the task at a position
    SubAdd { pos: usize, text: String },
    /// Toggle a sub-step of the task at a position
    SubToggle { pos: usize, sub: usize },
    /// Assign a quadrant (q1, q2, q3, q4)
    Assign { pos: usize, quadrant: String },
    /// Advance along the quadrant cycle Q1 -> Q2 -> Q3 -> Q4 -> Q1
    Advance { pos: usize },
    /// Return the task at a position to the free list
    Unassign { pos: usize },
}

pub fn run(action: TaskAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut store = common::open_store()?;
    let mut app = common::load_app(&store);

    match action {
        TaskAction::Add { text } => {
            if app.add_task(&text) {
                println!("added at position {}", app.tasks().len() - 1);
            }
        }
        TaskAction::AddMatrix { text } => {
            if app.add_matrix_task(&text) {
                println!("added to Q2 at position {}", app.tasks().len() - 1);
            }
        }
        TaskAction::List { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(app.tasks())?);
            } else {
                print_lists(&app);
            }
        }
        TaskAction::Toggle { pos } => {
            app.toggle_task(pos);
        }
        TaskAction::Remove { pos } => {
            if let Some(task) = app.remove_task(pos) {
                println!("removed: {}", task.text);
            }
        }
        TaskAction::SubAdd { pos, text } => {
            app.add_sub_step(pos, &text);
        }
        TaskAction::SubToggle { pos, sub } => {
            app.toggle_sub_step(pos, sub);
        }
        TaskAction::Assign { pos, quadrant } => {
            let quadrant: Quadrant = quadrant.parse()?;
            app.assign_quadrant(pos, quadrant);
        }
        TaskAction::Advance { pos } => {
            if let Some(next) = app.advance_quadrant(pos) {
                println!("now in {next}");
            }
        }
        TaskAction::Unassign { pos } => {
            app.unassign_quadrant(pos);
        }
    }

    common::save_app(&mut store, &app);
    Ok(())
}

fn print_task(pos: usize, task: &Task) {
    let mark = if task.completed { "x" } else { " " };
    println!("  {pos:>3} [{mark}] {}", task.text);
    for (sub_pos, step) in task.sub_steps.iter().enumerate() {
        let mark = if step.completed { "x" } else { " " };
        println!("        {sub_pos:>3}.[{mark}] {}", step.text);
    }
}

fn print_lists(app: &focusdesk_core::App) {
    println!("Free list:");
    for (pos, task) in app.tasks().free_tasks() {
        print_task(pos, task);
    }
    for quadrant in Quadrant::ALL {
        let tasks = app.tasks().quadrant_tasks(quadrant);
        if tasks.is_empty() {
            continue;
        }
        println!("{quadrant} ({}):", quadrant.label());
        for (pos, task) in tasks {
            print_task(pos, task);
        }
    }
}
