//! Route handlers and the request/response types they share.

pub mod clients;
pub mod health;
pub mod login;
pub mod register;

use crate::{
    api::error::{ApiError, INVALID_CHARACTERS, MISSING_CREDENTIALS},
    password::PasswordHasher,
};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Body of `/api/register` and `/api/login`.
///
/// Both fields are optional on the wire so a missing field is answered with the
/// same validation error as an empty one.
#[derive(ToSchema, Deserialize, Debug)]
pub struct Credentials {
    #[schema(example = "ana")]
    pub usuario: Option<String>,
    #[schema(value_type = Option<String>, format = Password)]
    pub password: Option<SecretString>,
}

/// Credentials that passed validation; `usuario` is already trimmed.
#[derive(Debug)]
pub struct ValidCredentials {
    pub usuario: String,
    pub password: SecretString,
}

impl Credentials {
    /// Reject missing, empty or whitespace-only fields, and NUL bytes that
    /// PostgreSQL cannot store in `TEXT`.
    ///
    /// # Errors
    /// Returns [`ApiError::Validation`] if either field is blank or contains a NUL.
    pub fn validate(self) -> Result<ValidCredentials, ApiError> {
        let usuario_has_nul = self.usuario.as_deref().is_some_and(contains_nul);
        let password_has_nul = self
            .password
            .as_ref()
            .is_some_and(|password| contains_nul(password.expose_secret()));
        if usuario_has_nul || password_has_nul {
            return Err(ApiError::Validation(INVALID_CHARACTERS));
        }

        let usuario = normalize_usuario(self.usuario.as_deref());
        let password = self
            .password
            .filter(|password| !password.expose_secret().trim().is_empty());

        match (usuario, password) {
            (Some(usuario), Some(password)) => Ok(ValidCredentials { usuario, password }),
            _ => Err(ApiError::Validation(MISSING_CREDENTIALS)),
        }
    }
}

pub(crate) fn contains_nul(value: &str) -> bool {
    value.contains('\0')
}

/// Trim a username, treating blank input as absent.
#[must_use]
pub fn normalize_usuario(usuario: Option<&str>) -> Option<String> {
    usuario
        .map(str::trim)
        .filter(|usuario| !usuario.is_empty())
        .map(str::to_string)
}

#[derive(ToSchema, Serialize, Debug)]
pub struct MessageResponse {
    pub ok: bool,
    pub mensaje: String,
}

impl MessageResponse {
    pub fn new(mensaje: impl Into<String>) -> Self {
        Self {
            ok: true,
            mensaje: mensaje.into(),
        }
    }
}

/// Hash on the blocking pool so argon2 does not stall the async workers.
pub(crate) async fn hash_password(
    hasher: PasswordHasher,
    password: SecretString,
) -> Result<String, ApiError> {
    let hash = tokio::task::spawn_blocking(move || hasher.hash(password.expose_secret()))
        .await
        .map_err(ApiError::Task)??;

    Ok(hash)
}

pub(crate) async fn verify_password(
    hasher: PasswordHasher,
    password: SecretString,
    stored_hash: String,
) -> Result<bool, ApiError> {
    let matches =
        tokio::task::spawn_blocking(move || hasher.verify(password.expose_secret(), &stored_hash))
            .await
            .map_err(ApiError::Task)??;

    Ok(matches)
}

/// JSON 404 for paths outside the router.
pub async fn not_found() -> ApiError {
    ApiError::UnknownRoute
}

/// JSON 405 for known paths called with an unsupported method.
pub async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}
