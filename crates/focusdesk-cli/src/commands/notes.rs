use clap::Subcommand;

use crate::common;

#[derive(Subcommand)]
pub enum NotesAction {
    /// Print the notes text
    Show,
    /// Replace the notes text
    Set { text: String },
    /// Clear the notes text
    Clear,
}

pub fn run(action: NotesAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut store = common::open_store()?;
    let mut app = common::load_app(&store);

    match action {
        NotesAction::Show => {
            println!("{}", app.notes());
        }
        NotesAction::Set { text } => {
            app.set_notes(text);
        }
        NotesAction::Clear => {
            app.set_notes("");
        }
    }

    common::save_app(&mut store, &app);
    Ok(())
}
