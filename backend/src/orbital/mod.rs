//! Orbital engine: anomalies, positions, speeds, orbit paths and simulations.
//!
//! Everything here is pure computation over [`OrbitalElements`](crate::models::OrbitalElements)
//! and [`JulianDate`](crate::models::JulianDate). No I/O and no shared state, so
//! every type can be used from any thread.

pub mod error;
pub mod kepler;
pub mod orbit_path;
pub mod position;
pub mod simulator;
pub mod velocity;

pub use error::{OrbitalError, OrbitalResult};
pub use kepler::{Anomalies, AnomalySolver, KeplerSolver};
pub use orbit_path::{OrbitPathBuilder, DEFAULT_RESOLUTION, MAX_RESOLUTION, MIN_RESOLUTION};
pub use position::{OrientationModel, PositionResolver, ResolvedPosition};
pub use simulator::{
    BodyState, SimulationFrame, SimulationLimits, SimulationPlan, SimulationRequest,
    SimulationRun, Simulator,
};
pub use velocity::{VelocityResolver, SUN_GRAVITATIONAL_PARAMETER};

/// Engine-wide settings shared by every computation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineConfig {
    pub kepler_solver: KeplerSolver,
    /// GM of the central mass in m³/s²
    pub gravitational_parameter: f64,
    pub orientation: OrientationModel,
    pub limits: SimulationLimits,
}

impl EngineConfig {
    pub fn position_resolver(&self) -> PositionResolver {
        PositionResolver::new(self.kepler_solver).with_orientation(self.orientation)
    }

    pub fn velocity_resolver(&self) -> VelocityResolver {
        VelocityResolver::new(self.gravitational_parameter)
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            kepler_solver: KeplerSolver::default(),
            gravitational_parameter: SUN_GRAVITATIONAL_PARAMETER,
            orientation: OrientationModel::default(),
            limits: SimulationLimits::default(),
        }
    }
}
