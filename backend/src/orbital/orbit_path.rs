//! Discretized orbit geometry for rendering.
//!
//! Paths are sampled on a circle at the semi-major axis radius and tilted with
//! the same single-axis inclination as [`OrientationModel::Rendering`]. True
//! ellipses are not generated. Output depends only on the planet and the
//! resolution, so repeated calls are bit-identical.

use super::error::{OrbitalError, OrbitalResult};
use super::position::OrientationModel;
use crate::models::{OrbitPath, OrbitPathPoint, Planet};

pub const MIN_RESOLUTION: usize = 36;
pub const MAX_RESOLUTION: usize = 1440;
pub const DEFAULT_RESOLUTION: usize = 360;

/// Builds orbit paths at a fixed angular resolution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitPathBuilder {
    resolution: usize,
    orientation: OrientationModel,
}

impl OrbitPathBuilder {
    /// Create a builder sampling `resolution` points per orbit.
    ///
    /// Fails with `InvalidResolution` outside `[MIN_RESOLUTION, MAX_RESOLUTION]`.
    pub fn new(resolution: usize) -> OrbitalResult<Self> {
        if !(MIN_RESOLUTION..=MAX_RESOLUTION).contains(&resolution) {
            return Err(OrbitalError::InvalidResolution(format!(
                "resolution must be between {} and {}, got {}",
                MIN_RESOLUTION, MAX_RESOLUTION, resolution
            )));
        }
        Ok(Self {
            resolution,
            orientation: OrientationModel::default(),
        })
    }

    pub fn with_orientation(mut self, orientation: OrientationModel) -> Self {
        self.orientation = orientation;
        self
    }

    pub fn resolution(&self) -> usize {
        self.resolution
    }

    /// Angular spacing between consecutive points, in degrees.
    pub fn angle_step_deg(&self) -> f64 {
        360.0 / self.resolution as f64
    }

    /// Build the path of one planet.
    pub fn build(&self, planet: &Planet) -> OrbitPath {
        let radius_km = planet.orbit.semi_major_axis_km;
        let inclination_deg = planet.orbit.inclination_deg;
        let step = self.angle_step_deg();

        let points = (0..self.resolution)
            .map(|i| {
                let angle_deg = step * i as f64;
                let (sin_a, cos_a) = qtty::Degrees::new(angle_deg).sin_cos();
                OrbitPathPoint {
                    angle_deg,
                    position: self.orientation.orient(
                        radius_km * cos_a,
                        radius_km * sin_a,
                        inclination_deg,
                    ),
                }
            })
            .collect();

        OrbitPath {
            planet_id: planet.id.clone(),
            planet_name: planet.name.clone(),
            points,
            color: planet.hex_color.clone(),
        }
    }

    /// Build paths for every planet, preserving input order.
    pub fn build_all<'a, I>(&self, planets: I) -> Vec<OrbitPath>
    where
        I: IntoIterator<Item = &'a Planet>,
    {
        planets.into_iter().map(|planet| self.build(planet)).collect()
    }
}
