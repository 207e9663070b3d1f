use crate::{AppState, handlers, pages::STORE_PAGES};
use axum::{Router, routing::get};

/// Store Router Module
///
/// Registers one route per page shell in the catalog. Unknown paths fall through to
/// the router fallback, which serves the 404 shell through the same handler.
pub fn store_routes() -> Router<AppState> {
    STORE_PAGES.iter().fold(Router::new(), |router, page| {
        router.route(page.path, get(handlers::store_page))
    })
}
