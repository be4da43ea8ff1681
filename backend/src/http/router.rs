//! Router configuration for the HTTP API.
//!
//! Sets up all routes and middleware (CORS, compression, tracing, body limit).

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers;
use super::state::AppState;

/// Create the main application router with all routes and middleware.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let solar_system = Router::new()
        .route("/", get(handlers::get_solar_system))
        .route("/planets", get(handlers::list_planets))
        .route("/planets/{planet_id}", get(handlers::get_planet))
        .route("/sun", get(handlers::get_sun))
        .route("/positions", get(handlers::get_positions))
        .route("/positions/{planet_id}", get(handlers::get_position))
        .route("/orbits", get(handlers::get_orbits))
        .route("/orbits/{planet_id}", get(handlers::get_orbit))
        .route("/simulate", post(handlers::simulate))
        .route("/scale", get(handlers::get_scale_info))
        .route("/stats", get(handlers::get_stats));

    let body_limit = state.body_limit_bytes;

    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/v1/solar-system", solar_system)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
