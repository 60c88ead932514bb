use anyhow::Context;
use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::{Method, StatusCode, header},
    middleware::map_response,
    response::{IntoResponse, Response},
    routing::get,
};
use serde_json::{Value, json};
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer,
    cors::CorsLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::info;

use crate::application::services::AuthService;
use crate::domain::repositories::{SessionStore, UserRepository};
use crate::infrastructure::{
    config::AppConfig,
    persistence::{
        Database, PostgreSqlActorRepository, PostgreSqlFilmRepository, PostgreSqlUserRepository,
    },
    security::HmacSha256Hasher,
    session::RedisSessionStore,
};
use crate::presentation::{
    handlers::AppState, middleware::RequestLoggingConfig, response::ApiResponse, routes,
};

/// Create the main application router
pub fn create_app(config: &AppConfig, state: AppState) -> Router {
    let middleware_stack = ServiceBuilder::new()
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(CompressionLayer::new())
        .layer(map_response(timeout_envelope))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(config.server.request_timeout_seconds),
        ))
        .layer(create_cors_layer())
        .layer(DefaultBodyLimit::max(config.server.body_limit()));

    Router::new()
        .route("/health", get(health_check))
        .merge(routes::create_routes(state, RequestLoggingConfig::from(&config.logging)))
        .fallback(not_found_handler)
        .layer(middleware_stack)
}

/// Liveness probe
#[allow(clippy::unused_async)]
pub async fn health_check() -> ApiResponse<Value> {
    ApiResponse::success(json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "service": env!("CARGO_PKG_NAME"),
    }))
}

#[allow(clippy::unused_async)]
async fn not_found_handler() -> ApiResponse<String> {
    ApiResponse::error(StatusCode::NOT_FOUND, "not found")
}

/// The timeout layer answers with a bare 408; give it the usual envelope
#[allow(clippy::unused_async)]
async fn timeout_envelope(response: Response) -> Response {
    if response.status() == StatusCode::REQUEST_TIMEOUT {
        return ApiResponse::error(StatusCode::REQUEST_TIMEOUT, "request timeout").into_response();
    }
    response
}

fn create_cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .max_age(Duration::from_secs(3600))
}

/// Connect the stores, wire the services and serve until ctrl-c
///
/// # Errors
/// Returns an error if a store is unreachable or the listener cannot bind
pub async fn start_server(config: AppConfig) -> anyhow::Result<()> {
    let database = Database::connect(&config.database).await?;
    let sessions = RedisSessionStore::connect(&config.redis.url)
        .await
        .context("Failed to connect to Redis")?;

    let pool = database.pool().clone();
    let auth = AuthService::new(
        Arc::new(PostgreSqlUserRepository::new(pool.clone())) as Arc<dyn UserRepository>,
        Arc::new(sessions) as Arc<dyn SessionStore>,
        Arc::new(HmacSha256Hasher),
        config.session.ttl(),
    );
    let state = AppState::new(
        Arc::new(PostgreSqlFilmRepository::new(pool.clone())),
        Arc::new(PostgreSqlActorRepository::new(pool)),
        Arc::new(auth),
        config.session.clone(),
    );

    let app = create_app(&config, state);
    let addr = config.server.socket_addr().context("Invalid server address")?;

    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;

    database.close().await;
    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
