//! Service layer between the HTTP handlers and the orbital engine.
//!
//! Services own no I/O. They combine the read-only catalog with engine
//! computations and shape the results the API returns.

pub mod solar_system;
pub mod statistics;

pub use solar_system::{
    BodyPosition, OrbitPathsResponse, PlanetPositionsResponse, SolarSystemResponse,
    SolarSystemService,
};
pub use statistics::{compute_stats, SolarSystemStats};
