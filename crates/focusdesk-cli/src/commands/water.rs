use clap::Subcommand;
use focusdesk_core::Config;

use crate::common;

#[derive(Subcommand)]
pub enum WaterAction {
    /// Add water (default: one configured step)
    Add {
        /// Milliliters to add
        ml: Option<u32>,
    },
    /// Remove water (clamps at zero)
    Sub {
        /// Milliliters to remove
        ml: Option<u32>,
    },
    /// Zero the counter and stamp today
    Reset,
    /// Print today's intake
    Status,
}

pub fn run(action: WaterAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut store = common::open_store()?;
    let mut app = common::load_app(&store);
    let step = Config::load_or_default().water.step_ml;

    match action {
        WaterAction::Add { ml } => {
            let intake = app.water_add(ml.unwrap_or(step) as i32);
            println!("{intake} ml");
        }
        WaterAction::Sub { ml } => {
            let intake = app.water_add(-(ml.unwrap_or(step) as i32));
            println!("{intake} ml");
        }
        WaterAction::Reset => {
            app.water_reset();
            println!("0 ml");
        }
        WaterAction::Status => {
            app.rollover_if_new_day();
            println!("{}", app.water_display());
        }
    }

    common::save_app(&mut store, &app);
    Ok(())
}
