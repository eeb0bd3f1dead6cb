use super::{hash_password, Credentials, MessageResponse};
use crate::{
    api::error::{ApiError, ErrorResponse},
    password::PasswordHasher,
    store::SharedStore,
};
use axum::{
    extract::{rejection::JsonRejection, Extension},
    http::StatusCode,
    Json,
};
use tracing::{info, instrument, Span};

pub const REGISTERED: &str = "Usuario registrado correctamente";

#[utoipa::path(
    post,
    path = "/api/register",
    request_body = Credentials,
    responses (
        (status = 201, description = "Client registered", body = MessageResponse),
        (status = 400, description = "Missing usuario or password", body = ErrorResponse),
        (status = 409, description = "Usuario already exists", body = ErrorResponse),
        (status = 500, description = "Store failure", body = ErrorResponse),
    ),
    tag = "clientes"
)]
#[instrument(skip_all, fields(usuario = tracing::field::Empty))]
pub async fn register(
    Extension(store): Extension<SharedStore>,
    Extension(hasher): Extension<PasswordHasher>,
    payload: Result<Json<Credentials>, JsonRejection>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    let Json(credentials) = payload?;
    let credentials = credentials.validate()?;

    Span::current().record("usuario", credentials.usuario.as_str());

    let password_hash = hash_password(hasher, credentials.password).await?;

    store.insert(&credentials.usuario, &password_hash).await?;

    info!("Client registered");

    Ok((StatusCode::CREATED, Json(MessageResponse::new(REGISTERED))))
}
