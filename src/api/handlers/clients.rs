//! Listing and deletion of registered clients.

use super::{contains_nul, normalize_usuario};
use crate::{
    api::error::{ApiError, ErrorResponse, INVALID_CHARACTERS, MISSING_USUARIO},
    store::{ClientSummary, SharedStore},
};
use axum::{
    extract::{rejection::PathRejection, Extension, Path},
    Json,
};
use serde::Serialize;
use tracing::{info, instrument, Span};
use utoipa::ToSchema;

#[derive(ToSchema, Serialize, Debug)]
pub struct ClientListResponse {
    pub ok: bool,
    pub clientes: Vec<ClientSummary>,
}

#[derive(ToSchema, Serialize, Debug)]
pub struct DeleteResponse {
    pub ok: bool,
    pub mensaje: String,
    pub usuario: String,
}

#[utoipa::path(
    get,
    path = "/api/listaclientes",
    responses (
        (status = 200, description = "All registered clients, without credentials", body = ClientListResponse),
        (status = 500, description = "Store failure", body = ErrorResponse),
    ),
    tag = "clientes"
)]
#[instrument(skip_all)]
pub async fn list_clients(
    Extension(store): Extension<SharedStore>,
) -> Result<Json<ClientListResponse>, ApiError> {
    let clientes = store.list().await?;

    Ok(Json(ClientListResponse { ok: true, clientes }))
}

#[utoipa::path(
    delete,
    path = "/api/borrarcliente/{usuario}",
    params(
        ("usuario" = String, Path, description = "Usuario to delete")
    ),
    responses (
        (status = 200, description = "Client deleted", body = DeleteResponse),
        (status = 400, description = "Missing or undecodable usuario", body = ErrorResponse),
        (status = 404, description = "Unknown usuario", body = ErrorResponse),
        (status = 500, description = "Store failure", body = ErrorResponse),
    ),
    tag = "clientes"
)]
#[instrument(skip_all, fields(usuario = tracing::field::Empty))]
pub async fn delete_client(
    Extension(store): Extension<SharedStore>,
    usuario: Result<Path<String>, PathRejection>,
) -> Result<Json<DeleteResponse>, ApiError> {
    let Path(usuario) = usuario?;

    if contains_nul(&usuario) {
        return Err(ApiError::Validation(INVALID_CHARACTERS));
    }

    let usuario =
        normalize_usuario(Some(&usuario)).ok_or(ApiError::Validation(MISSING_USUARIO))?;

    Span::current().record("usuario", usuario.as_str());

    if !store.delete(&usuario).await? {
        return Err(ApiError::NotFound);
    }

    info!("Client deleted");

    Ok(Json(DeleteResponse {
        ok: true,
        mensaje: format!("Usuario {usuario} eliminado correctamente"),
        usuario,
    }))
}

/// `DELETE /api/borrarcliente` without a path segment.
pub async fn delete_client_missing() -> ApiError {
    ApiError::Validation(MISSING_USUARIO)
}
