use crate::{
    api::handlers::{clients, health, login, register},
    password::PasswordHasher,
    store::{PgClientStore, SharedStore},
};
use anyhow::{anyhow, Context, Result};
use axum::{
    body::Body,
    extract::MatchedPath,
    http::{header::CONTENT_TYPE, HeaderName, HeaderValue, Method, Request},
    routing::{delete, get, post},
    Extension, Router,
};
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    request_id::PropagateRequestIdLayer,
    set_header::SetRequestHeaderLayer,
    trace::TraceLayer,
};
use tracing::{info, info_span, Span};
use ulid::Ulid;
use url::Url;

pub mod error;
pub mod handlers;
mod openapi;

pub use error::ApiError;
pub use openapi::openapi;

const REQUEST_ID_HEADER: &str = "x-request-id";

/// Pool capacity; callers queue for a free connection.
#[derive(Debug, Clone, Copy)]
pub struct PoolConfig {
    pub max_connections: u32,
}

/// Build the full application: routes, shared resources and middleware.
///
/// With `cors_origin` unset any origin may call the API.
///
/// # Errors
/// Returns an error if `cors_origin` is not a valid origin URL.
pub fn router(
    store: SharedStore,
    hasher: PasswordHasher,
    cors_origin: Option<&str>,
) -> Result<Router> {
    let allow_origin = match cors_origin {
        Some(origin) => AllowOrigin::exact(cors_origin_header(origin)?),
        None => AllowOrigin::any(),
    };
    let cors = CorsLayer::new()
        .allow_headers([CONTENT_TYPE])
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_origin(allow_origin);

    let app = Router::new()
        .route("/ping", get(health::ping).fallback(handlers::method_not_allowed))
        .route(
            "/health",
            get(health::health).fallback(handlers::method_not_allowed),
        )
        .route(
            "/api/register",
            post(register::register).fallback(handlers::method_not_allowed),
        )
        .route(
            "/api/login",
            post(login::login).fallback(handlers::method_not_allowed),
        )
        .route(
            "/api/listaclientes",
            get(clients::list_clients).fallback(handlers::method_not_allowed),
        )
        .route(
            "/api/borrarcliente",
            delete(clients::delete_client_missing).fallback(handlers::method_not_allowed),
        )
        .route(
            "/api/borrarcliente/",
            delete(clients::delete_client_missing).fallback(handlers::method_not_allowed),
        )
        .route(
            "/api/borrarcliente/:usuario",
            delete(clients::delete_client).fallback(handlers::method_not_allowed),
        )
        .route(
            "/api-docs/openapi.json",
            get(openapi::openapi_json).fallback(handlers::method_not_allowed),
        )
        .fallback(handlers::not_found)
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestHeaderLayer::if_not_present(
                    HeaderName::from_static(REQUEST_ID_HEADER),
                    |_req: &_| HeaderValue::from_str(Ulid::new().to_string().as_str()).ok(),
                ))
                .layer(PropagateRequestIdLayer::new(HeaderName::from_static(
                    REQUEST_ID_HEADER,
                )))
                .layer(TraceLayer::new_for_http().make_span_with(make_span))
                .layer(cors)
                .layer(Extension(hasher))
                .layer(Extension(store)),
        );

    Ok(app)
}

/// Start the server
///
/// # Errors
/// Return error if the database is unreachable or the listener fails
pub async fn new(
    port: u16,
    connect_options: PgConnectOptions,
    pool_config: PoolConfig,
    cors_origin: Option<String>,
) -> Result<()> {
    let pool = PgPoolOptions::new()
        .max_connections(pool_config.max_connections)
        .test_before_acquire(true)
        .connect_with(connect_options)
        .await
        .context("Failed to connect to database")?;

    let store = PgClientStore::new(pool);
    store
        .ensure_schema()
        .await
        .context("Failed to create clientes table")?;

    let hasher = PasswordHasher::new().context("Failed to initialize password hasher")?;

    let app = router(Arc::new(store), hasher, cors_origin.as_deref())?;

    let listener = TcpListener::bind(format!("::0:{port}")).await?;

    info!("Listening on [::]:{}", port);

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for ctrl-c: {err}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!("Failed to listen for SIGTERM: {err}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    info!("Gracefully shutdown");
}

fn make_span(request: &Request<Body>) -> Span {
    let request_id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|val| val.to_str().ok())
        .unwrap_or("none");
    let matched_path = request
        .extensions()
        .get::<MatchedPath>()
        .map_or_else(|| request.uri().path(), MatchedPath::as_str);

    info_span!(
        "http.request",
        http.method = %request.method(),
        http.route = matched_path,
        request_id
    )
}

fn cors_origin_header(origin: &str) -> Result<HeaderValue> {
    let parsed =
        Url::parse(origin).with_context(|| format!("Invalid CORS origin URL: {origin}"))?;
    let host = parsed
        .host_str()
        .ok_or_else(|| anyhow!("CORS origin must include a valid host: {origin}"))?;
    let port = parsed
        .port()
        .map_or_else(String::new, |port| format!(":{port}"));
    let origin = format!("{}://{}{}", parsed.scheme(), host, port);
    HeaderValue::from_str(&origin).context("Failed to build CORS origin header")
}
