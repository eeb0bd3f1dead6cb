use super::{
    error::ErrorResponse,
    handlers::{
        clients::{self, ClientListResponse, DeleteResponse},
        health::{self, Health},
        login, register, Credentials, MessageResponse,
    },
};
use crate::store::ClientSummary;
use axum::Json;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health,
        health::ping,
        register::register,
        login::login,
        clients::list_clients,
        clients::delete_client,
    ),
    components(schemas(
        Credentials,
        MessageResponse,
        ErrorResponse,
        ClientSummary,
        ClientListResponse,
        DeleteResponse,
        Health,
    )),
    tags(
        (name = "clientes", description = "Client registration, login, listing and deletion"),
        (name = "health", description = "Liveness and dependency checks"),
    )
)]
struct ApiDoc;

#[must_use]
pub fn openapi() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(openapi())
}
