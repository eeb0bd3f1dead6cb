use crate::{password::HashError, store::StoreError};
use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::{debug, error};
use utoipa::ToSchema;

pub const MISSING_CREDENTIALS: &str = "Usuario y contraseña obligatorios";
pub const MISSING_USUARIO: &str = "Usuario obligatorio";
pub const INVALID_BODY: &str = "Cuerpo de la petición inválido";
pub const INVALID_CHARACTERS: &str = "Usuario o contraseña con caracteres no permitidos";
pub const INVALID_CREDENTIALS: &str = "Credenciales inválidas";
pub const USER_NOT_FOUND: &str = "Usuario no encontrado";
pub const USER_EXISTS: &str = "El usuario ya existe";
pub const ROUTE_NOT_FOUND: &str = "Ruta no encontrada";
pub const METHOD_NOT_ALLOWED: &str = "Método no permitido";
pub const INTERNAL_ERROR: &str = "Error interno del servidor";

/// Failure body shared by every endpoint.
#[derive(ToSchema, Serialize, Debug)]
pub struct ErrorResponse {
    pub ok: bool,
    pub error: String,
}

#[derive(Debug)]
pub enum ApiError {
    /// Missing or malformed input; the store was not consulted.
    Validation(&'static str),
    NotFound,
    InvalidCredentials,
    Store(StoreError),
    Hash(HashError),
    /// A blocking hashing task panicked or was cancelled.
    Task(tokio::task::JoinError),
    UnknownRoute,
    MethodNotAllowed,
}

impl ApiError {
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::NotFound | Self::UnknownRoute => StatusCode::NOT_FOUND,
            Self::InvalidCredentials => StatusCode::UNAUTHORIZED,
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::Store(StoreError::Conflict) => StatusCode::CONFLICT,
            Self::Store(StoreError::Database(_)) | Self::Hash(_) | Self::Task(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    #[must_use]
    pub fn message(&self) -> &'static str {
        match self {
            Self::Validation(message) => *message,
            Self::NotFound => USER_NOT_FOUND,
            Self::InvalidCredentials => INVALID_CREDENTIALS,
            Self::Store(StoreError::Conflict) => USER_EXISTS,
            Self::UnknownRoute => ROUTE_NOT_FOUND,
            Self::MethodNotAllowed => METHOD_NOT_ALLOWED,
            Self::Store(StoreError::Database(_)) | Self::Hash(_) | Self::Task(_) => {
                INTERNAL_ERROR
            }
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        Self::Store(err)
    }
}

impl From<HashError> for ApiError {
    fn from(err: HashError) -> Self {
        Self::Hash(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        debug!("Rejected request body: {}", rejection.body_text());
        Self::Validation(INVALID_BODY)
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        debug!("Rejected path parameter: {}", rejection.body_text());
        Self::Validation(MISSING_USUARIO)
    }
}

impl IntoResponse for ApiError {
    /// Internal failures are logged here and reach the client only as a generic message.
    fn into_response(self) -> Response {
        match &self {
            Self::Store(StoreError::Database(err)) => error!("Database error: {err}"),
            Self::Hash(err) => error!("Password hashing error: {err}"),
            Self::Task(err) => error!("Password hashing task failed: {err}"),
            _ => (),
        }

        let body = ErrorResponse {
            ok: false,
            error: self.message().to_string(),
        };

        (self.status(), Json(body)).into_response()
    }
}
