//! Route definitions and router construction.
//!
//! Every API route lives under `/api`; `/health` sits at the root. Known
//! routes hit with an unsupported method answer 405 with a JSON body.

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::{MethodRouter, get, post};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::bootstrap::{CorsConfig, ServerConfig};
use crate::error::method_not_allowed;
use crate::handlers;
use crate::state::{AppState, ServerContext};

/// Build CORS layer from configuration.
fn build_cors_layer(config: &CorsConfig) -> CorsLayer {
    match config {
        CorsConfig::AllowAll => CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any),
        CorsConfig::AllowOrigins(origins) => {
            use axum::http::HeaderValue;
            let allowed: Vec<HeaderValue> = origins.iter().filter_map(|o| o.parse().ok()).collect();
            CorsLayer::new()
                .allow_origin(allowed)
                .allow_methods(Any)
                .allow_headers(Any)
        }
    }
}

/// Attach the JSON 405 fallback to a method router.
fn route(methods: MethodRouter<AppState>) -> MethodRouter<AppState> {
    methods.fallback(method_not_allowed)
}

/// Build all API routes without the `/api` prefix.
pub(crate) fn api_routes(max_upload_size: usize) -> Router<AppState> {
    Router::new()
        // Directory merges
        .route("/merge", route(post(handlers::merge::merge_pdf)))
        .route("/merge-md", route(post(handlers::merge::merge_markdown)))
        // Listings
        .route("/files", route(get(handlers::files::list_pdf)))
        .route("/md-files", route(get(handlers::files::list_markdown)))
        .route("/download/{*path}", route(get(handlers::download::download)))
        // Workspaces
        .route(
            "/temp-dir",
            route(post(handlers::workspace::create).delete(handlers::workspace::destroy)),
        )
        .route(
            "/upload",
            route(post(handlers::workspace::upload))
                .layer(DefaultBodyLimit::max(max_upload_size)),
        )
        .route("/temp-files", route(get(handlers::workspace::list_files)))
        .route("/merge-files", route(post(handlers::merge::merge_files)))
}

/// Create the main Axum router.
pub fn create_router(ctx: ServerContext, config: &ServerConfig) -> Router {
    let state: AppState = Arc::new(ctx);
    let cors = build_cors_layer(&config.cors);

    Router::new()
        .route("/health", get(health_check))
        .nest(
            "/api",
            api_routes(config.max_upload_size)
                .with_state(state)
                .layer(cors),
        )
        .layer(TraceLayer::new_for_http())
}

/// Health check endpoint.
pub(crate) async fn health_check() -> &'static str {
    "OK"
}
