use crate::cli::{actions::Action, commands, dispatch, telemetry};
use anyhow::Result;
use std::io::ErrorKind;
use tracing::warn;

/// Map verbosity count to tracing level
const fn get_verbosity_level(verbosity: u8) -> Option<tracing::Level> {
    match verbosity {
        0 => None,
        1 => Some(tracing::Level::WARN),
        2 => Some(tracing::Level::INFO),
        3 => Some(tracing::Level::DEBUG),
        _ => Some(tracing::Level::TRACE),
    }
}

/// Keep `.env` load failures worth reporting; a missing file is not one.
fn env_file_error<T>(result: Result<T, dotenvy::Error>) -> Option<dotenvy::Error> {
    match result {
        Ok(_) => None,
        Err(dotenvy::Error::Io(err)) if err.kind() == ErrorKind::NotFound => None,
        Err(err) => Some(err),
    }
}

/// Main entry point for the CLI - builds and returns the Action
///
/// # Errors
///
/// Returns an error if argument parsing, telemetry initialization, or action dispatch fails
pub fn start() -> Result<Action> {
    // Loaded before parsing so clap sees the variables; reported once logging is up
    let env_error = env_file_error(dotenvy::dotenv());

    let matches = commands::new().get_matches();

    let verbosity_level = get_verbosity_level(
        matches
            .get_one::<u8>(commands::logging::ARG_VERBOSITY)
            .copied()
            .unwrap_or(0),
    );
    let log_format = if matches.get_flag(commands::logging::ARG_LOG_JSON) {
        telemetry::LogFormat::Json
    } else {
        telemetry::LogFormat::Pretty
    };

    telemetry::init(verbosity_level, log_format)?;

    if let Some(err) = env_error {
        warn!("Failed to load .env file: {err}");
    }

    let action = dispatch::handler(&matches)?;

    Ok(action)
}
