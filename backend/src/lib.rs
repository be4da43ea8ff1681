//! # Exoplanet AI Backend
//!
//! Orbital mechanics and simulation engine behind the solar system
//! visualization, exposed as a REST API via Axum.
//!
//! ## Features
//!
//! - **Time Handling**: Unix timestamp and Julian Date conversions
//! - **Kepler Solving**: Mean, eccentric and true anomalies with a selectable solver
//! - **Positions and Velocities**: 3D heliocentric positions and vis-viva speeds
//! - **Orbit Paths**: Discretized orbits for rendering
//! - **Simulation**: Bounded, cancellable multi-frame time series
//! - **HTTP API**: RESTful endpoints for frontend integration
//!
//! ## Architecture
//!
//! - [`models`]: Bodies, orbital elements, geometry and time types
//! - [`orbital`]: The engine: anomalies, positions, velocities, paths, simulator
//! - [`catalog`]: Read-only reference data loaded from JSON
//! - [`services`]: Service layer combining the catalog and the engine
//! - [`config`]: TOML and environment configuration
//! - [`http`]: Axum-based HTTP server and request handlers

pub mod catalog;
pub mod config;
pub mod models;
pub mod orbital;
pub mod services;

#[cfg(feature = "http-server")]
pub mod http;
