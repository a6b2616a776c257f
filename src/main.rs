mod utils;
mod models;
use std::process::exit;
use dotenv::dotenv;
use log::{error, info};
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};
use crate::utils::pipeline::pull_schedule;
use crate::utils::settings::Settings;

// Entry point for the async main function, powered by tokio runtime.
#[tokio::main]
async fn main() {
    // Loads environment variables from a `.env` file, if present.
    dotenv().ok();

    let settings = match Settings::from_env() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Invalid configuration: {:#}", e);
            exit(1);
        },
    };

    // Logs go to stderr only; stdout is reserved for the schedule JSON.
    if let Err(e) = TermLogger::init(
        settings.log_level,
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto
    ) {
        eprintln!("Logger could not be initialised: {}", e);
    }

    // Fetches, reshapes, prints and writes the schedule; the file is untouched on failure.
    match pull_schedule(&settings).await {
        Ok(_) => info!("Schedule written to {}", settings.output_path.display()),
        Err(e) => {
            error!("Error pulling schedule: {:#}", e);
            exit(1);
        },
    }
}
