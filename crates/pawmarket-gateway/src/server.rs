// SPDX-FileCopyrightText: 2026 PawMarket Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Gateway HTTP server built on axum.
//!
//! Sets up routes, middleware, and shared state for the gateway.

use std::future::Future;
use std::sync::Arc;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{get, post, put},
};
use pawmarket_core::{ListingStore, PawmarketError};
use pawmarket_image::ThumbnailBounds;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::auth::{AdminCredentials, SessionStore, auth_middleware};
use crate::handlers;

/// Largest accepted admin request body (base64 photo uploads).
pub const MAX_UPLOAD_BYTES: usize = 16 * 1024 * 1024;

/// Health state for the unauthenticated health endpoint.
#[derive(Clone)]
pub struct HealthState {
    /// Process start time for uptime calculation.
    pub start_time: std::time::Instant,
}

/// Shared state for axum request handlers.
#[derive(Clone)]
pub struct GatewayState {
    /// Listing and inquiry persistence.
    pub store: Arc<dyn ListingStore>,
    /// Live admin session tokens.
    pub sessions: SessionStore,
    /// Admin login settings.
    pub admin: Arc<AdminCredentials>,
    /// Size limit applied to uploaded photos.
    pub thumbnails: ThumbnailBounds,
    /// Health state for unauthenticated endpoints.
    pub health: HealthState,
}

impl GatewayState {
    pub fn new(
        store: Arc<dyn ListingStore>,
        admin: AdminCredentials,
        thumbnails: ThumbnailBounds,
    ) -> Self {
        Self {
            store,
            sessions: SessionStore::new(admin.session_ttl),
            admin: Arc::new(admin),
            thumbnails,
            health: HealthState {
                start_time: std::time::Instant::now(),
            },
        }
    }
}

/// Gateway server configuration (mirrors ServerConfig from pawmarket-config).
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Host address to bind.
    pub host: String,
    /// Port to bind.
    pub port: u16,
}

/// Build the gateway router.
///
/// - `GET /health`, `GET /v1/dogs[...]`, `POST /v1/dogs/{id}/inquiries` and
///   `POST /v1/admin/login` are public.
/// - Every other `/v1/admin/*` route requires a session token.
pub fn router(state: GatewayState) -> Router {
    let public_routes = Router::new()
        .route("/health", get(handlers::get_public_health))
        .route("/v1/dogs", get(handlers::list_dogs))
        .route("/v1/dogs/filters", get(handlers::get_filter_options))
        .route("/v1/dogs/{id}", get(handlers::get_dog))
        .route("/v1/dogs/{id}/image", get(handlers::get_dog_image))
        .route("/v1/dogs/{id}/inquiries", post(handlers::post_inquiry))
        .route("/v1/admin/login", post(handlers::admin_login))
        .with_state(state.clone());

    let admin_routes = Router::new()
        .route("/v1/admin/logout", post(handlers::admin_logout))
        .route(
            "/v1/admin/dogs",
            get(handlers::admin_list_dogs).post(handlers::admin_create_dog),
        )
        .route(
            "/v1/admin/dogs/{id}",
            put(handlers::admin_update_dog).delete(handlers::admin_delete_dog),
        )
        .route("/v1/admin/inquiries", get(handlers::admin_list_inquiries))
        .route("/v1/admin/overview", get(handlers::admin_overview))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .route_layer(axum_middleware::from_fn_with_state(
            state.sessions.clone(),
            auth_middleware,
        ))
        .with_state(state);

    Router::new()
        .merge(public_routes)
        .merge(admin_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// Bind and serve the gateway until `shutdown` resolves.
pub async fn start_server(
    config: &ServerConfig,
    state: GatewayState,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> Result<(), PawmarketError> {
    let app = router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| PawmarketError::Internal(format!("failed to bind gateway to {addr}: {e}")))?;

    tracing::info!("PawMarket listening on http://{addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|e| PawmarketError::Internal(format!("gateway server error: {e}")))?;

    tracing::info!("gateway stopped");
    Ok(())
}
