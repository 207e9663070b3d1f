use std::sync::Arc;
use storefront_shell::{
    AccessPolicy, AppState,
    config::{AppConfig, Env},
    create_router,
    identity::{HttpIdentityClient, IdentityState},
};
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// main
///
/// Entry point of the storefront: configuration, logging, the identity client and the
/// HTTP server, in that order.
#[tokio::main]
async fn main() {
    // 1. Configuration (fail-fast in production)
    dotenv::dotenv().ok();
    let config = AppConfig::load();

    // 2. Logging filter: RUST_LOG wins, otherwise local development defaults.
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "storefront_shell=debug,tower_http=info,axum=trace".into());

    // 3. Pretty logs locally, JSON for log aggregation in production.
    match config.env {
        Env::Local => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().pretty())
                .init();
        }
        Env::Production => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
    }

    tracing::info!("Storefront starting in {:?} mode", config.env);

    // 4. Identity service client
    let endpoints = config.endpoints();
    tracing::info!(identity = %endpoints.identity, "Resolving sessions against identity service");
    let identity = Arc::new(HttpIdentityClient::new(&endpoints)) as IdentityState;

    // 5. Unified State Assembly
    let bind_addr = config.bind_addr.clone();
    let app_state = AppState {
        identity,
        policy: AccessPolicy::storefront(),
        config,
    };

    // 6. Router and Server Startup
    let app = create_router(app_state);

    let listener = TcpListener::bind(bind_addr.as_str())
        .await
        .expect("FATAL: Failed to bind the storefront listener. Check BIND_ADDR.");

    tracing::info!("Listening on {}", bind_addr);
    tracing::info!("API Documentation (Swagger UI) available at /swagger-ui");

    axum::serve(listener, app)
        .await
        .expect("FATAL: HTTP server terminated unexpectedly.");
}
