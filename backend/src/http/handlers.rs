//! HTTP handlers for the REST API.
//!
//! Each handler corresponds to an API endpoint and delegates to
//! [`SolarSystemService`](crate::services::SolarSystemService).

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    response::{IntoResponse, Response},
    Json,
};
use tokio_util::sync::CancellationToken;
use tracing::warn;

use super::dto::{
    BodyPosition, Envelope, HealthResponse, OrbitPath, OrbitQuery, Planet,
    PlanetPositionsResponse, PositionQuery, SimulationRequest, SimulationRun,
    SolarSystemResponse, SolarSystemStats, Sun,
};
use super::error::AppError;
use super::state::AppState;
use crate::orbital::OrbitalError;

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

// =============================================================================
// Health Check
// =============================================================================

/// GET /health
pub async fn health_check(State(state): State<AppState>) -> HandlerResult<HealthResponse> {
    let catalog = state.service.catalog();
    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        planets: catalog.len(),
        catalog_checksum: catalog.checksum().to_string(),
    }))
}

// =============================================================================
// Reference Data
// =============================================================================

/// GET /v1/solar-system/
pub async fn get_solar_system(State(state): State<AppState>) -> HandlerResult<SolarSystemResponse> {
    Ok(Json(state.service.get_solar_system()))
}

/// GET /v1/solar-system/planets
pub async fn list_planets(State(state): State<AppState>) -> HandlerResult<Vec<Planet>> {
    Ok(Json(state.service.list_planets().to_vec()))
}

/// GET /v1/solar-system/planets/{planet_id}
pub async fn get_planet(
    State(state): State<AppState>,
    Path(planet_id): Path<String>,
) -> HandlerResult<Planet> {
    Ok(Json(state.service.get_planet(&planet_id)?.clone()))
}

/// GET /v1/solar-system/sun
pub async fn get_sun(State(state): State<AppState>) -> HandlerResult<Sun> {
    Ok(Json(state.service.get_sun().clone()))
}

/// GET /v1/solar-system/scale
pub async fn get_scale_info(
    State(state): State<AppState>,
) -> HandlerResult<Envelope<serde_json::Value>> {
    Ok(Json(Envelope::ok(
        state.service.scale_info().clone(),
        "Scale information retrieved successfully",
    )))
}

/// GET /v1/solar-system/stats
pub async fn get_stats(State(state): State<AppState>) -> HandlerResult<Envelope<SolarSystemStats>> {
    Ok(Json(Envelope::ok(
        state.service.stats(),
        "Solar system statistics calculated successfully",
    )))
}

// =============================================================================
// Positions
// =============================================================================

/// GET /v1/solar-system/positions?timestamp=
pub async fn get_positions(
    State(state): State<AppState>,
    params: Result<Query<PositionQuery>, QueryRejection>,
) -> HandlerResult<PlanetPositionsResponse> {
    let Query(params) = params?;
    Ok(Json(state.service.get_positions_all(params.timestamp)?))
}

/// GET /v1/solar-system/positions/{planet_id}?timestamp=
pub async fn get_position(
    State(state): State<AppState>,
    Path(planet_id): Path<String>,
    params: Result<Query<PositionQuery>, QueryRejection>,
) -> HandlerResult<BodyPosition> {
    let Query(params) = params?;
    Ok(Json(state.service.get_position(&planet_id, params.timestamp)?))
}

// =============================================================================
// Orbit Paths
// =============================================================================

/// GET /v1/solar-system/orbits?resolution=
///
/// Results are memoised per resolution in the application state.
pub async fn get_orbits(
    State(state): State<AppState>,
    params: Result<Query<OrbitQuery>, QueryRejection>,
) -> Result<Response, AppError> {
    let Query(params) = params?;
    let resolution = params.resolution.unwrap_or(state.default_resolution);

    if let Some(cached) = state.cached_orbits(resolution) {
        return Ok(Json(cached.as_ref()).into_response());
    }

    let service = state.service.clone();
    let orbits =
        tokio::task::spawn_blocking(move || service.get_all_orbit_paths(resolution)).await??;
    let cached = state.cache_orbits(orbits);

    Ok(Json(cached.as_ref()).into_response())
}

/// GET /v1/solar-system/orbits/{planet_id}?resolution=
pub async fn get_orbit(
    State(state): State<AppState>,
    Path(planet_id): Path<String>,
    params: Result<Query<OrbitQuery>, QueryRejection>,
) -> HandlerResult<OrbitPath> {
    let Query(params) = params?;
    let resolution = params.resolution.unwrap_or(state.default_resolution);

    let service = state.service.clone();
    let path =
        tokio::task::spawn_blocking(move || service.get_orbit_path(&planet_id, resolution))
            .await??;

    Ok(Json(path))
}

// =============================================================================
// Simulation
// =============================================================================

/// POST /v1/solar-system/simulate
///
/// Runs on a blocking thread. The run is cancelled when it exceeds the
/// configured timeout or the client goes away.
pub async fn simulate(
    State(state): State<AppState>,
    body: Result<Json<SimulationRequest>, JsonRejection>,
) -> HandlerResult<SimulationRun> {
    let Json(request) = body?;

    let token = CancellationToken::new();
    // fires on every exit path, including the handler future being dropped
    let _guard = token.clone().drop_guard();

    let service = state.service.clone();
    let worker_token = token.clone();
    let task =
        tokio::task::spawn_blocking(move || service.simulate_with_cancel(&request, &worker_token));

    match tokio::time::timeout(state.simulation_timeout, task).await {
        Ok(joined) => Ok(Json(joined??)),
        Err(_) => {
            token.cancel();
            warn!(
                timeout_secs = state.simulation_timeout.as_secs_f64(),
                "Simulation timed out"
            );
            Err(OrbitalError::Cancelled(format!(
                "simulation exceeded {:?}",
                state.simulation_timeout
            ))
            .into())
        }
    }
}
