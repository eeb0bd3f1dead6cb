//! Credential store.
//!
//! Handlers only see the [`ClientStore`] trait; the server wires a
//! [`postgres::PgClientStore`] backed by a bounded `sqlx` pool. Every method is a
//! single statement, so there are no partial failures to unwind.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;
use utoipa::ToSchema;

pub use self::{memory::MemoryClientStore, postgres::PgClientStore};

pub type SharedStore = Arc<dyn ClientStore>;

#[derive(Debug, Error)]
pub enum StoreError {
    /// The username is already taken (unique constraint).
    #[error("usuario already exists")]
    Conflict,
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl StoreError {
    /// Classify a `sqlx` error, splitting out uniqueness violations.
    #[must_use]
    pub fn from_insert(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => Self::Conflict,
            _ => Self::Database(err),
        }
    }
}

/// Public projection of a stored client. The hash column is never selected into it.
#[derive(ToSchema, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct ClientSummary {
    pub usuario: String,
}

#[async_trait]
pub trait ClientStore: Send + Sync {
    /// Insert a new record. Fails with [`StoreError::Conflict`] if `usuario` exists.
    async fn insert(&self, usuario: &str, password_hash: &str) -> Result<(), StoreError>;

    /// Stored hash for `usuario`, if the record exists.
    async fn password_hash(&self, usuario: &str) -> Result<Option<String>, StoreError>;

    /// All records, oldest first, without secrets.
    async fn list(&self) -> Result<Vec<ClientSummary>, StoreError>;

    /// Delete the record for `usuario`; `false` when nothing matched.
    async fn delete(&self, usuario: &str) -> Result<bool, StoreError>;

    /// Check that the backing store is reachable.
    async fn ping(&self) -> Result<(), StoreError>;
}
