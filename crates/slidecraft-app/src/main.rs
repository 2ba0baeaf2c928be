//! Gesture replay entry point.

use slidecraft_app::{AppConfig, USAGE};
use std::process::ExitCode;

fn main() -> ExitCode {
    env_logger::init();

    let Some(app) = AppConfig::from_args(std::env::args().skip(1)) else {
        eprintln!("{}", USAGE);
        return ExitCode::from(2);
    };
    log::info!("Replaying {}", app.script.display());

    match slidecraft_app::run(&app) {
        Ok(report) => {
            println!("{}", report);
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("Replay failed: {}", e);
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}
