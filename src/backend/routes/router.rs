/**
 * Router Configuration
 *
 * This module combines the route groups into a single Axum router.
 *
 * # Route Groups
 *
 * 1. Public routes (landing, health, login, register, logout)
 * 2. Protected routes, wrapped once in the `require_login` gate
 * 3. Static files under `/static`
 * 4. Fallback handler (JSON 404)
 *
 * Every request is traced by `TraceLayer`.
 */

use axum::{middleware::from_fn_with_state, Router};
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::backend::error::BackendError;
use crate::backend::middleware::require_login;
use crate::backend::routes::protected_routes::{
    configure_account_routes, configure_community_routes,
};
use crate::backend::routes::public_routes::configure_public_routes;
use crate::backend::server::state::AppState;

/// Directory served under `/static`
pub const STATIC_DIR: &str = "static";

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState) -> Router<()> {
    let public = configure_public_routes(Router::new());

    let protected = configure_community_routes(configure_account_routes(Router::new()))
        .route_layer(from_fn_with_state(app_state.clone(), require_login));

    Router::new()
        .merge(public)
        .merge(protected)
        .nest_service("/static", ServeDir::new(STATIC_DIR))
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}

async fn not_found() -> BackendError {
    BackendError::not_found("Not found")
}
