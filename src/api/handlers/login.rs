use super::{verify_password, Credentials, MessageResponse};
use crate::{
    api::error::{ApiError, ErrorResponse},
    password::PasswordHasher,
    store::SharedStore,
};
use axum::{
    extract::{rejection::JsonRejection, Extension},
    Json,
};
use tracing::{debug, instrument, Span};

pub const LOGGED_IN: &str = "Login exitoso";

#[utoipa::path(
    post,
    path = "/api/login",
    request_body = Credentials,
    responses (
        (status = 200, description = "Credentials verified", body = MessageResponse),
        (status = 400, description = "Missing usuario or password", body = ErrorResponse),
        (status = 401, description = "Wrong password", body = ErrorResponse),
        (status = 404, description = "Unknown usuario", body = ErrorResponse),
        (status = 500, description = "Store failure", body = ErrorResponse),
    ),
    tag = "clientes"
)]
#[instrument(skip_all, fields(usuario = tracing::field::Empty))]
pub async fn login(
    Extension(store): Extension<SharedStore>,
    Extension(hasher): Extension<PasswordHasher>,
    payload: Result<Json<Credentials>, JsonRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let Json(credentials) = payload?;
    let credentials = credentials.validate()?;

    Span::current().record("usuario", credentials.usuario.as_str());

    let Some(stored_hash) = store.password_hash(&credentials.usuario).await? else {
        debug!("Client not found");
        return Err(ApiError::NotFound);
    };

    if !verify_password(hasher, credentials.password, stored_hash).await? {
        debug!("Invalid credentials");
        return Err(ApiError::InvalidCredentials);
    }

    debug!("Login successful");

    Ok(Json(MessageResponse::new(LOGGED_IN)))
}
