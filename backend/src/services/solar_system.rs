//! Solar system service: reference data plus the orbital engine.
//!
//! Wraps a shared [`SolarSystemCatalog`] and an [`EngineConfig`]. All methods
//! are synchronous and CPU-bound; async callers should run the heavy ones
//! (`simulate`, `get_all_orbit_paths`) on a blocking thread.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;
use tracing::debug;

use super::statistics::{compute_stats, SolarSystemStats};
use crate::catalog::SolarSystemCatalog;
use crate::models::{
    JulianDate, OrbitPath, Planet, PlanetWithPosition, Position3D, Sun,
};
use crate::orbital::{
    EngineConfig, OrbitPathBuilder, OrbitalError, OrbitalResult, SimulationRequest,
    SimulationRun, Simulator,
};

/// Full catalog view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolarSystemResponse {
    pub planets: Vec<Planet>,
    pub sun: Sun,
    pub scale_info: serde_json::Value,
}

/// Positions of every planet at one instant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanetPositionsResponse {
    pub planets: Vec<PlanetWithPosition>,
    /// Unix timestamp in seconds
    pub timestamp: f64,
    pub julian_date: f64,
}

/// Position of a single planet at one instant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyPosition {
    pub planet_id: String,
    /// Planet display name
    pub planet: String,
    pub position: Position3D,
    pub distance_from_sun_km: f64,
    pub velocity_kms: f64,
    pub timestamp: f64,
    pub julian_date: f64,
}

/// Orbit paths of every planet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrbitPathsResponse {
    pub orbits: Vec<OrbitPath>,
    pub resolution: usize,
}

/// Read-only facade over the catalog and the orbital engine.
#[derive(Debug, Clone)]
pub struct SolarSystemService {
    catalog: Arc<SolarSystemCatalog>,
    engine: EngineConfig,
}

impl SolarSystemService {
    pub fn new(catalog: Arc<SolarSystemCatalog>, engine: EngineConfig) -> Self {
        Self { catalog, engine }
    }

    pub fn catalog(&self) -> &SolarSystemCatalog {
        &self.catalog
    }

    pub fn engine(&self) -> &EngineConfig {
        &self.engine
    }

    fn find_planet(&self, planet_id: &str) -> OrbitalResult<&Planet> {
        self.catalog
            .planet(planet_id)
            .ok_or_else(|| OrbitalError::not_found_body(planet_id))
    }

    pub fn get_solar_system(&self) -> SolarSystemResponse {
        SolarSystemResponse {
            planets: self.catalog.planets().to_vec(),
            sun: self.catalog.sun().clone(),
            scale_info: self.catalog.scale_info().clone(),
        }
    }

    pub fn list_planets(&self) -> &[Planet] {
        self.catalog.planets()
    }

    pub fn get_planet(&self, planet_id: &str) -> OrbitalResult<&Planet> {
        self.find_planet(planet_id)
    }

    pub fn get_sun(&self) -> &Sun {
        self.catalog.sun()
    }

    pub fn scale_info(&self) -> &serde_json::Value {
        self.catalog.scale_info()
    }

    pub fn stats(&self) -> SolarSystemStats {
        compute_stats(self.catalog.planets())
    }

    fn planet_with_position(
        &self,
        planet: &Planet,
        instant: JulianDate,
    ) -> OrbitalResult<PlanetWithPosition> {
        let resolved = self.engine.position_resolver().resolve(&planet.orbit, instant)?;
        let velocity_kms = self
            .engine
            .velocity_resolver()
            .orbital_speed(planet.orbit.semi_major_axis_km, resolved.radius_km)?;
        Ok(PlanetWithPosition {
            planet: planet.clone(),
            position: resolved.position,
            distance_from_sun_km: resolved.radius_km,
            velocity_kms,
        })
    }

    fn resolve_timestamp(timestamp: Option<f64>) -> OrbitalResult<JulianDate> {
        match timestamp {
            None => Ok(JulianDate::now()),
            Some(t) if t.is_finite() => Ok(JulianDate::from_unix_timestamp(t)),
            Some(t) => Err(OrbitalError::InvalidTimestamp(format!(
                "timestamp must be a finite number of seconds, got {}",
                t
            ))),
        }
    }

    /// Position of one planet at `timestamp` (Unix seconds, default now).
    pub fn get_position(
        &self,
        planet_id: &str,
        timestamp: Option<f64>,
    ) -> OrbitalResult<BodyPosition> {
        let planet = self.find_planet(planet_id)?;
        let instant = Self::resolve_timestamp(timestamp)?;
        let with_position = self.planet_with_position(planet, instant)?;

        Ok(BodyPosition {
            planet_id: planet.id.clone(),
            planet: planet.name.clone(),
            position: with_position.position,
            distance_from_sun_km: with_position.distance_from_sun_km,
            velocity_kms: with_position.velocity_kms,
            timestamp: timestamp.unwrap_or_else(|| instant.to_unix_timestamp()),
            julian_date: instant.value(),
        })
    }

    /// Positions of every planet at `timestamp` (Unix seconds, default now).
    pub fn get_positions_all(&self, timestamp: Option<f64>) -> OrbitalResult<PlanetPositionsResponse> {
        let instant = Self::resolve_timestamp(timestamp)?;
        let planets = self
            .catalog
            .planets()
            .iter()
            .map(|planet| self.planet_with_position(planet, instant))
            .collect::<OrbitalResult<Vec<_>>>()?;

        Ok(PlanetPositionsResponse {
            planets,
            timestamp: timestamp.unwrap_or_else(|| instant.to_unix_timestamp()),
            julian_date: instant.value(),
        })
    }

    /// Orbit path of one planet.
    pub fn get_orbit_path(&self, planet_id: &str, resolution: usize) -> OrbitalResult<OrbitPath> {
        let builder = self.orbit_path_builder(resolution)?;
        let planet = self.find_planet(planet_id)?;
        Ok(builder.build(planet))
    }

    /// Orbit paths of every planet, in catalog order.
    pub fn get_all_orbit_paths(&self, resolution: usize) -> OrbitalResult<OrbitPathsResponse> {
        let builder = self.orbit_path_builder(resolution)?;
        debug!(resolution, planets = self.catalog.len(), "Building orbit paths");
        Ok(OrbitPathsResponse {
            orbits: builder.build_all(self.catalog.planets()),
            resolution,
        })
    }

    fn orbit_path_builder(&self, resolution: usize) -> OrbitalResult<OrbitPathBuilder> {
        Ok(OrbitPathBuilder::new(resolution)?.with_orientation(self.engine.orientation))
    }

    /// Run a simulation that cannot be cancelled.
    pub fn simulate(&self, request: &SimulationRequest) -> OrbitalResult<SimulationRun> {
        self.simulate_with_cancel(request, &CancellationToken::new())
    }

    /// Run a simulation, stopping early with `Cancelled` once `cancel` fires.
    pub fn simulate_with_cancel(
        &self,
        request: &SimulationRequest,
        cancel: &CancellationToken,
    ) -> OrbitalResult<SimulationRun> {
        Simulator::new(self.catalog.planets(), self.engine).run(request, cancel)
    }
}

#[cfg(test)]
#[path = "solar_system_tests.rs"]
mod solar_system_tests;
