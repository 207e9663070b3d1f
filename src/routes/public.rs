use crate::{AppState, handlers};
use axum::{Router, routing::get};

/// Public Router Module
///
/// Endpoints that are not store pages: monitoring, the login and registration forms,
/// the 403 page and the page-view API.
pub fn public_routes() -> Router<AppState> {
    Router::new()
        // GET /health
        // Returns "ok" immediately, without consulting the identity service.
        .route("/health", get(|| async { "ok" }))
        // GET /login?error&logout
        // The login form. It posts directly to the identity service.
        .route("/login", get(handlers::login_page))
        // GET|POST /register
        // The registration form and its submission, forwarded as a CUSTOMER account.
        .route(
            "/register",
            get(handlers::register_page).post(handlers::register),
        )
        // GET /access-denied
        .route("/access-denied", get(handlers::access_denied))
        // GET /api/view?path=...
        // The computed page view as JSON.
        .route("/api/view", get(handlers::get_page_view))
}
