use axum::{
    routing::{any, get},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod standings;
pub mod state;

pub use state::AppState;

/// Build the league router: admin surface, public surface and health probe.
pub fn app(state: AppState) -> Router {
    // CORS for the browser frontend
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(|| async { "Hockey League API - v1.0" }))
        .route("/health", get(routes::health::health_check))
        .route("/api/admin", any(routes::admin::handle_admin))
        .route("/api/league", any(routes::public::handle_league))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
