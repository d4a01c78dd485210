use std::path::PathBuf;
use std::process::ExitCode;
use anyhow::{Context, Result};
use dotenv::dotenv;
use log::{error, info};
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};
use gradecalc::utils::{report, storage};
use gradecalc::Gradebook;

const DEFAULT_COURSE_FILE: &str = "course.json";

// Reads the log level from GRADECALC_LOG, falling back to info.
fn log_level() -> LevelFilter {
    std::env::var("GRADECALC_LOG")
        .ok()
        .and_then(|level| level.parse().ok())
        .unwrap_or(LevelFilter::Info)
}

fn load_course() -> Result<(PathBuf, Gradebook)> {
    let path = PathBuf::from(std::env::var("GRADECALC_FILE").unwrap_or_else(|_| DEFAULT_COURSE_FILE.to_string()));
    let gradebook = storage::load(&path).with_context(|| format!("Failed to load course from {}", path.display()))?;
    Ok((path, gradebook))
}

fn main() -> ExitCode {
    // Loads environment variables from a `.env` file, if present.
    dotenv().ok();

    if let Err(e) = TermLogger::init(log_level(), Config::default(), TerminalMode::Mixed, ColorChoice::Auto) {
        eprintln!("Failed to initialise logging: {}", e);
    }

    let (path, gradebook) = match load_course() {
        Ok(loaded) => loaded,
        Err(e) => {
            error!("{:#}", e);
            return ExitCode::FAILURE;
        }
    };
    info!("Course {} has {} categories", path.display(), gradebook.len());

    println!("{}", report::render(&gradebook));
    ExitCode::SUCCESS
}
