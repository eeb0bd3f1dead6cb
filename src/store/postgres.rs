use super::{ClientStore, ClientSummary, StoreError};
use async_trait::async_trait;
use sqlx::{Connection, PgPool, Row};
use tracing::{info_span, Instrument};

const SCHEMA_SQL: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/db/sql/01_clientes.sql"
));

#[derive(Clone, Debug)]
pub struct PgClientStore {
    pool: PgPool,
}

impl PgClientStore {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create the `clientes` table if it does not exist yet.
    ///
    /// # Errors
    /// Returns an error if the statement fails.
    pub async fn ensure_schema(&self) -> Result<(), StoreError> {
        let span = info_span!(
            "db.query",
            db.system = "postgresql",
            db.operation = "CREATE",
            db.statement = SCHEMA_SQL
        );
        sqlx::query(SCHEMA_SQL)
            .execute(&self.pool)
            .instrument(span)
            .await?;

        Ok(())
    }
}

#[async_trait]
impl ClientStore for PgClientStore {
    async fn insert(&self, usuario: &str, password_hash: &str) -> Result<(), StoreError> {
        let query = "INSERT INTO clientes (usuario, password_hash) VALUES ($1, $2)";
        let span = info_span!(
            "db.query",
            db.system = "postgresql",
            db.operation = "INSERT",
            db.statement = query
        );
        sqlx::query(query)
            .bind(usuario)
            .bind(password_hash)
            .execute(&self.pool)
            .instrument(span)
            .await
            .map_err(StoreError::from_insert)?;

        Ok(())
    }

    async fn password_hash(&self, usuario: &str) -> Result<Option<String>, StoreError> {
        let query = "SELECT password_hash FROM clientes WHERE usuario = $1";
        let span = info_span!(
            "db.query",
            db.system = "postgresql",
            db.operation = "SELECT",
            db.statement = query
        );
        let row = sqlx::query(query)
            .bind(usuario)
            .fetch_optional(&self.pool)
            .instrument(span)
            .await?;

        Ok(row.map(|row| row.get("password_hash")))
    }

    async fn list(&self) -> Result<Vec<ClientSummary>, StoreError> {
        let query = "SELECT usuario FROM clientes ORDER BY creado_en, usuario";
        let span = info_span!(
            "db.query",
            db.system = "postgresql",
            db.operation = "SELECT",
            db.statement = query
        );
        let rows = sqlx::query(query)
            .fetch_all(&self.pool)
            .instrument(span)
            .await?;

        Ok(rows
            .into_iter()
            .map(|row| ClientSummary {
                usuario: row.get("usuario"),
            })
            .collect())
    }

    async fn delete(&self, usuario: &str) -> Result<bool, StoreError> {
        let query = "DELETE FROM clientes WHERE usuario = $1";
        let span = info_span!(
            "db.query",
            db.system = "postgresql",
            db.operation = "DELETE",
            db.statement = query
        );
        let result = sqlx::query(query)
            .bind(usuario)
            .execute(&self.pool)
            .instrument(span)
            .await?;

        Ok(result.rows_affected() == 1)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        let acquire_span = info_span!(
            "db.acquire",
            db.system = "postgresql",
            db.operation = "ACQUIRE"
        );
        let mut conn = self.pool.acquire().instrument(acquire_span).await?;

        let ping_span = info_span!("db.ping", db.system = "postgresql", db.operation = "PING");
        conn.ping().instrument(ping_span).await?;

        Ok(())
    }
}
