//! Route definitions for the CopyGate HTTP API.

use axum::Router;
use axum::http::HeaderValue;
use axum::routing::{delete, get, post, put};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use copygate_core::config::app::CorsConfig;

use crate::handlers;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = build_cors_layer(&state.config.server.cors);

    Router::new()
        .nest("/v1", v1_routes())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

fn v1_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/request/copy/{project_code}",
            post(handlers::request::create_request)
                .get(handlers::request::list_requests)
                .put(handlers::review::complete_request),
        )
        .route(
            "/request/copy/{project_code}/files",
            get(handlers::request::list_request_files)
                .put(handlers::review::review_all)
                .patch(handlers::review::review_selected),
        )
        .route(
            "/request/copy/{project_code}/pending-files",
            get(handlers::review::pending_files),
        )
        .route(
            "/request/copy/{project_code}/{request_id}",
            delete(handlers::request::delete_request),
        )
        .route(
            "/request/{request_id}/copy-status",
            put(handlers::request::report_copy_status),
        )
        .route("/health", get(handlers::health::health))
}

/// Builds a CORS tower layer from configuration.
fn build_cors_layer(config: &CorsConfig) -> CorsLayer {
    let mut layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    if config.allowed_origins.contains(&"*".to_string()) {
        layer = layer.allow_origin(Any);
    } else {
        let origins: Vec<HeaderValue> = config
            .allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        layer = layer.allow_origin(origins);
    }

    layer.max_age(std::time::Duration::from_secs(config.max_age_seconds))
}
