pub mod database;
pub mod logging;

use clap::{
    builder::styling::{AnsiColor, Effects, Styles},
    Arg, ColorChoice, Command,
};

pub const ARG_PORT: &str = "port";
pub const ARG_CORS_ORIGIN: &str = "cors-origin";

#[must_use]
pub fn new() -> Command {
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default());

    let long_version: &'static str = Box::leak(
        format!("{} - {}", env!("CARGO_PKG_VERSION"), crate::GIT_COMMIT_HASH).into_boxed_str(),
    );

    let command = Command::new("clientes")
        .about("Client credential registry")
        .version(env!("CARGO_PKG_VERSION"))
        .long_version(long_version)
        .color(ColorChoice::Auto)
        .styles(styles)
        .arg(
            Arg::new(ARG_PORT)
                .short('p')
                .long("port")
                .help("Port to listen on")
                .default_value("3000")
                .env("PORT")
                .value_parser(clap::value_parser!(u16)),
        )
        .arg(
            Arg::new(ARG_CORS_ORIGIN)
                .long("cors-origin")
                .help("Origin allowed to call the API, example: http://localhost:5500 (default: any)")
                .env("CORS_ORIGIN"),
        );

    let command = database::with_args(command);
    logging::with_args(command)
}

#[cfg(test)]
mod tests {
    use super::*;

    const DB_VARS: [(&str, Option<&str>); 10] = [
        ("DB_HOST", None),
        ("DB_PORT", None),
        ("DB_MAX_CONNECTIONS", None),
        ("LOG_LEVEL", None),
        ("DB_USER", None),
        ("DB_PASS", None),
        ("DB_NAME", None),
        ("PORT", None),
        ("CORS_ORIGIN", None),
        ("LOG_JSON", None),
    ];

    fn required_args() -> Vec<&'static str> {
        vec![
            "clientes",
            "--db-host",
            "localhost",
            "--db-user",
            "root",
            "--db-password",
            "secret",
            "--db-name",
            "clientes",
        ]
    }

    #[test]
    fn test_new() {
        let command = new();

        assert_eq!(command.get_name(), "clientes");
        assert_eq!(
            command.get_about().map(ToString::to_string),
            Some("Client credential registry".to_string())
        );
        assert_eq!(
            command.get_version().map(ToString::to_string),
            Some(env!("CARGO_PKG_VERSION").to_string())
        );
    }

    #[test]
    fn test_defaults() {
        temp_env::with_vars(DB_VARS, || {
            let matches = new().get_matches_from(required_args());

            assert_eq!(matches.get_one::<u16>(ARG_PORT).copied(), Some(3000));
            assert_eq!(
                matches.get_one::<u16>(database::ARG_DB_PORT).copied(),
                Some(5432)
            );
            assert_eq!(
                matches
                    .get_one::<u32>(database::ARG_DB_MAX_CONNECTIONS)
                    .copied(),
                Some(10)
            );
            assert!(matches.get_one::<String>(ARG_CORS_ORIGIN).is_none());
            assert!(!matches.get_flag(logging::ARG_LOG_JSON));
        });
    }

    #[test]
    fn test_missing_database_config_is_an_error() {
        temp_env::with_vars(DB_VARS, || {
            let result = new().try_get_matches_from(vec!["clientes", "--db-host", "localhost"]);
            assert!(result.is_err());
        });
    }

    #[test]
    fn test_rejects_zero_max_connections() {
        temp_env::with_vars(DB_VARS, || {
            let mut args = required_args();
            args.extend(["--db-max-connections", "0"]);
            assert!(new().try_get_matches_from(args).is_err());
        });
    }

    #[test]
    fn test_check_env() {
        temp_env::with_vars(
            [
                ("DB_HOST", Some("db.internal")),
                ("DB_USER", Some("clientes")),
                ("DB_PASS", Some("s3cret")),
                ("DB_NAME", Some("clientes")),
                ("PORT", Some("8080")),
                ("CORS_ORIGIN", Some("http://localhost:5500")),
                ("LOG_LEVEL", Some("info")),
            ],
            || {
                let matches = new().get_matches_from(vec!["clientes"]);

                assert_eq!(matches.get_one::<u16>(ARG_PORT).copied(), Some(8080));
                assert_eq!(
                    matches
                        .get_one::<String>(database::ARG_DB_HOST)
                        .map(String::as_str),
                    Some("db.internal")
                );
                assert_eq!(
                    matches
                        .get_one::<String>(ARG_CORS_ORIGIN)
                        .map(String::as_str),
                    Some("http://localhost:5500")
                );
                assert_eq!(
                    matches.get_one::<u8>(logging::ARG_VERBOSITY).copied(),
                    Some(2)
                );
            },
        );
    }

    #[test]
    fn test_check_log_level_env() {
        let levels = ["error", "warn", "info", "debug", "trace"];
        for (index, &level) in levels.iter().enumerate() {
            temp_env::with_vars(
                [
                    ("LOG_LEVEL", Some(level)),
                    ("DB_HOST", Some("localhost")),
                    ("DB_USER", Some("root")),
                    ("DB_PASS", Some("secret")),
                    ("DB_NAME", Some("clientes")),
                ],
                || {
                    let matches = new().get_matches_from(vec!["clientes"]);
                    assert_eq!(
                        matches.get_one::<u8>(logging::ARG_VERBOSITY).copied(),
                        u8::try_from(index).ok()
                    );
                },
            );
        }
    }

    #[test]
    fn test_check_log_level_verbosity() {
        for count in 0..5_usize {
            temp_env::with_vars(
                [
                    ("LOG_LEVEL", None::<&str>),
                    ("DB_HOST", None),
                    ("DB_USER", None),
                    ("DB_PASS", None),
                    ("DB_NAME", None),
                ],
                || {
                    let mut args: Vec<String> =
                        required_args().into_iter().map(str::to_string).collect();

                    if count > 0 {
                        args.push(format!("-{}", "v".repeat(count)));
                    }

                    let matches = new().get_matches_from(args);

                    assert_eq!(
                        matches.get_one::<u8>(logging::ARG_VERBOSITY).copied(),
                        u8::try_from(count).ok()
                    );
                },
            );
        }
    }
}
