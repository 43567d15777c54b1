/**
 * Public Routes
 *
 * Routes reachable without a session:
 * - `GET /` - Landing page (entry points as JSON)
 * - `GET /health` - Liveness probe
 * - `POST /login` - Login
 * - `POST /register` - Registration with automatic login
 * - `GET /logout` - Logout; public so a stale cookie is always cleared
 */

use axum::{
    response::Json,
    routing::{get, post},
    Router,
};
use serde_json::{json, Value};

use crate::backend::auth::{login, logout, register};
use crate::backend::server::state::AppState;

/// Configure public routes
pub fn configure_public_routes(router: Router<AppState>) -> Router<AppState> {
    router
        .route("/", get(landing))
        .route("/health", get(health))
        .route("/login", post(login))
        .route("/register", post(register))
        .route("/logout", get(logout))
}

/// GET /
async fn landing() -> Json<Value> {
    Json(json!({
        "name": "fanpub",
        "login": "POST /login",
        "register": "POST /register",
        "home": "/articles",
    }))
}

/// GET /health
async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
