use super::handlers;
use super::socket;
use super::state::AppState;
use axum::{
    http::Method,
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Create the HTTP router with all routes
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any);

    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // REST transport
        .route(
            "/api/translate",
            post(handlers::translate).fallback(handlers::method_not_allowed),
        )
        .route("/api/languages", get(handlers::list_languages))
        // Socket transport
        .route("/socket", get(socket::socket_handler))
        .layer(cors)
        // Add tracing middleware for request logging
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
