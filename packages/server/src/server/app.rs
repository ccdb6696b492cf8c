//! Application setup and server configuration.

use std::sync::Arc;

use axum::{
    extract::Extension,
    http::{header::CONTENT_TYPE, Method},
    routing::{get, post},
    Router,
};
use sqlx::PgPool;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::kernel::ServerDeps;
use crate::server::routes::{activate_member_handler, health_handler, list_members_handler};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub server_deps: Arc<ServerDeps>,
}

/// Build the Axum application router
pub fn build_app(pool: PgPool, server_deps: Arc<ServerDeps>) -> Router {
    let state = AppState {
        db_pool: pool,
        server_deps,
    };

    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([CONTENT_TYPE])
        .allow_origin(Any);

    Router::new()
        .route("/health", get(health_handler))
        .route("/members", get(list_members_handler))
        .route("/members/:member_id/activate", post(activate_member_handler))
        .layer(Extension(state))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
