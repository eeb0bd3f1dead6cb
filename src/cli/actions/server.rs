use crate::api::{self, PoolConfig};
use anyhow::Result;
use secrecy::{ExposeSecret, SecretString};
use sqlx::postgres::PgConnectOptions;
use tracing::debug;

pub struct Args {
    pub port: u16,
    pub cors_origin: Option<String>,
    pub db_host: String,
    pub db_port: u16,
    pub db_user: String,
    pub db_password: SecretString,
    pub db_name: String,
    pub db_max_connections: u32,
}

impl Args {
    #[must_use]
    pub fn connect_options(&self) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(&self.db_host)
            .port(self.db_port)
            .username(&self.db_user)
            .password(self.db_password.expose_secret())
            .database(&self.db_name)
            .application_name(env!("CARGO_PKG_NAME"))
    }
}

impl std::fmt::Debug for Args {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Args")
            .field("port", &self.port)
            .field("cors_origin", &self.cors_origin)
            .field("db_host", &self.db_host)
            .field("db_port", &self.db_port)
            .field("db_user", &self.db_user)
            .field("db_password", &"***")
            .field("db_name", &self.db_name)
            .field("db_max_connections", &self.db_max_connections)
            .finish()
    }
}

/// Execute the server action.
/// # Errors
/// Returns an error if the database is unreachable or the server fails to start.
pub async fn execute(args: Args) -> Result<()> {
    debug!("Server args: {:?}", args);

    let connect_options = args.connect_options();

    api::new(
        args.port,
        connect_options,
        PoolConfig {
            max_connections: args.db_max_connections,
        },
        args.cors_origin,
    )
    .await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> Args {
        Args {
            port: 3000,
            cors_origin: None,
            db_host: "localhost".to_string(),
            db_port: 5432,
            db_user: "root".to_string(),
            db_password: SecretString::from("s3cret".to_string()),
            db_name: "clientes".to_string(),
            db_max_connections: 10,
        }
    }

    #[test]
    fn debug_hides_database_password() {
        let debug = format!("{:?}", args());
        assert!(debug.contains("db_password: \"***\""));
        assert!(!debug.contains("s3cret"));
    }

    #[test]
    fn connect_options_use_configured_database() {
        let options = args().connect_options();
        assert_eq!(options.get_host(), "localhost");
        assert_eq!(options.get_port(), 5432);
        assert_eq!(options.get_username(), "root");
        assert_eq!(options.get_database(), Some("clientes"));
    }
}
