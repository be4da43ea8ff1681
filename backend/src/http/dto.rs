//! Data Transfer Objects for the HTTP API.
//!
//! Response bodies that already derive Serialize are re-exported from the
//! service and engine modules.

use serde::{Deserialize, Serialize};

pub use crate::models::{OrbitPath, Planet, Sun};
pub use crate::orbital::{SimulationRequest, SimulationRun};
pub use crate::services::{
    BodyPosition, OrbitPathsResponse, PlanetPositionsResponse, SolarSystemResponse,
    SolarSystemStats,
};

/// Query parameters for position endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PositionQuery {
    /// Unix timestamp in seconds (default: now)
    #[serde(default)]
    pub timestamp: Option<f64>,
}

/// Query parameters for orbit path endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct OrbitQuery {
    /// Points per orbit, 36 to 1440
    #[serde(default)]
    pub resolution: Option<usize>,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    /// Number of planets in the catalog
    pub planets: usize,
    /// SHA-256 of the loaded reference data
    pub catalog_checksum: String,
}

/// `{ success, data, message }` wrapper used by the scale and stats endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub success: bool,
    pub data: T,
    pub message: String,
}

impl<T> Envelope<T> {
    pub fn ok(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            data,
            message: message.into(),
        }
    }
}
