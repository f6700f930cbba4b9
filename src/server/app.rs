use std::net::SocketAddr;

use axum::Router;
use axum::routing::{get, post};
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

use crate::config::CorsConfig;
use crate::server::routes;
use crate::server::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let cors_layer = build_cors_layer(
        state
            .server_config
            .as_ref()
            .and_then(|config| config.cors.as_ref()),
    );

    let mut app = Router::new()
        .route("/", get(routes::root))
        .route("/health", get(routes::health))
        .route("/health/slack", get(routes::slack_health))
        .route("/notify", post(routes::notify))
        .with_state(state);

    app = app.layer(
        ServiceBuilder::new()
            .layer(RequestBodyLimitLayer::new(256 * 1024))
            .layer(TraceLayer::new_for_http()),
    );
    app.layer(cors_layer)
}

pub fn bind_address(bind: &str) -> SocketAddr {
    bind.parse()
        .unwrap_or_else(|_| "127.0.0.1:8080".parse().expect("valid fallback bind"))
}

fn build_cors_layer(config: Option<&CorsConfig>) -> CorsLayer {
    let Some(config) = config else {
        return CorsLayer::new().allow_origin(Any);
    };
    if config.allowed_origins.is_empty() {
        return CorsLayer::new().allow_origin(Any);
    }
    let origins = config
        .allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect::<Vec<_>>();
    CorsLayer::new().allow_origin(origins)
}
