use clap::{Parser, Subcommand};

mod commands;
mod common;

#[derive(Parser)]
#[command(name = "focusdesk-cli", version, about = "Focusdesk CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Timer control
    Timer {
        #[command(subcommand)]
        action: commands::timer::TimerAction,
    },
    /// Task and matrix management
    Task {
        #[command(subcommand)]
        action: commands::task::TaskAction,
    },
    /// Water intake counter
    Water {
        #[command(subcommand)]
        action: commands::water::WaterAction,
    },
    /// Habit ledger and calendar
    Habit {
        #[command(subcommand)]
        action: commands::habit::HabitAction,
    },
    /// Freeform notes
    Notes {
        #[command(subcommand)]
        action: commands::notes::NotesAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn main() {
    let _logger = flexi_logger::Logger::try_with_env_or_str("warn")
        .and_then(|logger| logger.start());

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Timer { action } => commands::timer::run(action),
        Commands::Task { action } => commands::task::run(action),
        Commands::Water { action } => commands::water::run(action),
        Commands::Habit { action } => commands::habit::run(action),
        Commands::Notes { action } => commands::notes::run(action),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
