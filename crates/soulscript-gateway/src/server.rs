// SPDX-FileCopyrightText: 2026 Soulscript Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! API HTTP server built on axum.
//!
//! Sets up routes, middleware, and shared state.

use axum::{
    Router,
    middleware as axum_middleware,
    routing::{get, post},
};
use soulscript_alerts::AlertQueue;
use soulscript_classifier::SentimentClient;
use soulscript_config::ServerConfig;
use soulscript_core::SoulscriptError;
use soulscript_storage::Database;
use tokio_util::sync::CancellationToken;
use tower_http::cors::CorsLayer;

use crate::auth::{TokenSigner, auth_middleware};
use crate::handlers;

/// Shared state for axum request handlers.
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub classifier: SentimentClient,
    pub alerts: AlertQueue,
    /// Token signer. `None` means auth is unconfigured and every
    /// authenticated route fails closed.
    pub signer: Option<TokenSigner>,
    /// Process start time for uptime reporting.
    pub start_time: std::time::Instant,
}

/// Build the full route tree.
///
/// - `/health` and `/v1/analyze` are public.
/// - `/v1/auth/register` and `/v1/auth/login` are public by nature.
/// - Everything else requires a bearer token.
pub fn build_router(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/health", get(handlers::health::get_health))
        .route("/v1/analyze", post(handlers::analyze::post_analyze))
        .route("/v1/auth/register", post(handlers::auth::post_register))
        .route("/v1/auth/login", post(handlers::auth::post_login))
        .with_state(state.clone());

    let api_routes = Router::new()
        .route("/v1/auth/me", get(handlers::auth::get_me))
        .route(
            "/v1/journal",
            get(handlers::journal::list_entries).post(handlers::journal::create_entry),
        )
        .route(
            "/v1/journal/{id}",
            get(handlers::journal::get_entry)
                .put(handlers::journal::update_entry)
                .delete(handlers::journal::delete_entry),
        )
        .route(
            "/v1/emergency-contacts",
            get(handlers::contacts::list_contacts).post(handlers::contacts::create_contact),
        )
        .route(
            "/v1/emergency-contacts/{id}",
            axum::routing::delete(handlers::contacts::delete_contact),
        )
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ))
        .with_state(state);

    Router::new()
        .merge(public_routes)
        .merge(api_routes)
        .layer(CorsLayer::permissive())
}

/// Bind and serve until `cancel` fires.
pub async fn start_server(
    config: &ServerConfig,
    state: AppState,
    cancel: CancellationToken,
) -> Result<(), SoulscriptError> {
    let app = build_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| SoulscriptError::Internal(format!("failed to bind to {addr}: {e}")))?;

    tracing::info!("API server listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(async move { cancel.cancelled().await })
        .await
        .map_err(|e| SoulscriptError::Internal(format!("server error: {e}")))?;

    Ok(())
}
