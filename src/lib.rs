use axum::{Router, http::HeaderName};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::{DefaultOnResponse, TraceLayer},
};
use tracing::{Level, Span};

// --- Module Structure ---

// Page-load pipeline: identity lookup, rendering, guarding and document application.
pub mod access;
pub mod document;
pub mod identity;
pub mod page;
pub mod view;

// Supporting types and configuration.
pub mod config;
pub mod handlers;
pub mod models;
pub mod pages;
pub mod toast;

pub mod routes;
use routes::{public, store};

// --- Public Re-exports ---

pub use access::AccessPolicy;
pub use config::AppConfig;
pub use identity::{HttpIdentityClient, IdentityState, MockIdentityService};

/// ApiDoc
///
/// OpenAPI document for the JSON surface of the storefront, served at
/// `/api-docs/openapi.json` and browsable under `/swagger-ui`.
#[derive(OpenApi)]
#[openapi(
    paths(handlers::get_page_view),
    components(
        schemas(
            page::PageView, view::ViewModel, view::Link, access::AccessDecision,
            access::AccessReason, access::PageClass, access::GuardEffect, toast::Toast,
            models::Role, models::User,
        )
    ),
    tags(
        (name = "storefront-shell", description = "Storefront page views")
    )
)]
struct ApiDoc;

/// AppState
///
/// The single, immutable container shared by every request. Nothing in it changes
/// between page loads; each load resolves its own identity.
#[derive(Clone)]
pub struct AppState {
    /// Identity Layer: resolves sessions and forwards registrations.
    pub identity: IdentityState,
    /// The restricted page lists consulted by the access guard.
    pub policy: AccessPolicy,
    /// Configuration: the loaded, immutable environment configuration.
    pub config: AppConfig,
}

/// create_router
///
/// Assembles the storefront's routes, applies the observability layers and registers
/// the application state.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_methods(Any)
        .allow_origin(Any)
        .allow_headers(Any);

    let x_request_id = HeaderName::from_static("x-request-id");

    let base_router = Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(public::public_routes())
        .merge(store::store_routes())
        // Unknown paths still go through the identity lookup and the guard.
        .fallback(handlers::store_page)
        .with_state(state);

    base_router
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::new(x_request_id.clone(), MakeRequestUuid))
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(trace_span_logger)
                        .on_response(
                            DefaultOnResponse::new()
                                .level(Level::INFO)
                                .latency_unit(tower_http::LatencyUnit::Millis),
                        ),
                )
                .layer(PropagateRequestIdLayer::new(x_request_id)),
        )
        .layer(cors)
}

/// trace_span_logger
///
/// Opens the per-request span, tagged with the `x-request-id` set by the layer above
/// so every log line of one page load can be correlated.
fn trace_span_logger(request: &axum::http::Request<axum::body::Body>) -> Span {
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|value| value.to_str().ok())
        .unwrap_or("unknown");

    tracing::info_span!(
        "http_request",
        method = ?request.method(),
        uri = ?request.uri(),
        req_id = %request_id,
    )
}
