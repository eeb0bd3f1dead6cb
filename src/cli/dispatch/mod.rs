//! Map validated CLI matches to the action the binary executes.

use crate::cli::actions::{server::Args, Action};
use crate::cli::commands::{database, ARG_CORS_ORIGIN, ARG_PORT};
use anyhow::Result;

/// Map validated CLI matches to a server action.
///
/// # Errors
/// Returns an error if required arguments are missing.
pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    let port = matches.get_one::<u16>(ARG_PORT).copied().unwrap_or(3000);
    let cors_origin = matches.get_one::<String>(ARG_CORS_ORIGIN).cloned();
    let db = database::Options::parse(matches)?;

    Ok(Action::Server(Args {
        port,
        cors_origin,
        db_host: db.host,
        db_port: db.port,
        db_user: db.user,
        db_password: db.password,
        db_name: db.name,
        db_max_connections: db.max_connections,
    }))
}
