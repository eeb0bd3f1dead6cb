use anyhow::{Context, Result};
use clap::{Arg, ArgMatches, Command};
use secrecy::SecretString;

pub const ARG_DB_HOST: &str = "db-host";
pub const ARG_DB_PORT: &str = "db-port";
pub const ARG_DB_USER: &str = "db-user";
pub const ARG_DB_PASSWORD: &str = "db-password";
pub const ARG_DB_NAME: &str = "db-name";
pub const ARG_DB_MAX_CONNECTIONS: &str = "db-max-connections";

#[must_use]
pub fn with_args(command: Command) -> Command {
    command
        .arg(
            Arg::new(ARG_DB_HOST)
                .long(ARG_DB_HOST)
                .help("Database host")
                .env("DB_HOST")
                .required(true),
        )
        .arg(
            Arg::new(ARG_DB_PORT)
                .long(ARG_DB_PORT)
                .help("Database port")
                .default_value("5432")
                .env("DB_PORT")
                .value_parser(clap::value_parser!(u16)),
        )
        .arg(
            Arg::new(ARG_DB_USER)
                .long(ARG_DB_USER)
                .help("Database user")
                .env("DB_USER")
                .required(true),
        )
        .arg(
            Arg::new(ARG_DB_PASSWORD)
                .long(ARG_DB_PASSWORD)
                .help("Database password")
                .env("DB_PASS")
                .hide_env_values(true)
                .required(true),
        )
        .arg(
            Arg::new(ARG_DB_NAME)
                .long(ARG_DB_NAME)
                .help("Database name")
                .env("DB_NAME")
                .required(true),
        )
        .arg(
            Arg::new(ARG_DB_MAX_CONNECTIONS)
                .long(ARG_DB_MAX_CONNECTIONS)
                .help("Maximum number of pooled database connections")
                .default_value("10")
                .env("DB_MAX_CONNECTIONS")
                .value_parser(clap::value_parser!(u32).range(1..)),
        )
}

#[derive(Debug)]
pub struct Options {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: SecretString,
    pub name: String,
    pub max_connections: u32,
}

impl Options {
    /// # Errors
    /// Returns an error if a required database argument is missing.
    pub fn parse(matches: &ArgMatches) -> Result<Self> {
        let required = |id: &str| -> Result<String> {
            matches
                .get_one::<String>(id)
                .cloned()
                .with_context(|| format!("missing required argument: --{id}"))
        };

        Ok(Self {
            host: required(ARG_DB_HOST)?,
            port: matches.get_one::<u16>(ARG_DB_PORT).copied().unwrap_or(5432),
            user: required(ARG_DB_USER)?,
            password: SecretString::from(required(ARG_DB_PASSWORD)?),
            name: required(ARG_DB_NAME)?,
            max_connections: matches
                .get_one::<u32>(ARG_DB_MAX_CONNECTIONS)
                .copied()
                .unwrap_or(10),
        })
    }
}
