//! Orbital speed from the vis-viva equation.

use qtty::{Kilometers, Meter};

use super::error::{OrbitalError, OrbitalResult};

/// Standard gravitational parameter of the Sun, GM in m³/s².
pub const SUN_GRAVITATIONAL_PARAMETER: f64 = 1.327e20;

const METERS_PER_KILOMETER: f64 = 1000.0;

/// Computes orbital speed around a fixed central mass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VelocityResolver {
    /// GM of the central mass in m³/s²
    gravitational_parameter: f64,
}

impl VelocityResolver {
    pub fn new(gravitational_parameter: f64) -> Self {
        Self {
            gravitational_parameter,
        }
    }

    pub fn gravitational_parameter(&self) -> f64 {
        self.gravitational_parameter
    }

    /// Speed in km/s at `radius_km` on an orbit with semi-major axis `semi_major_axis_km`.
    ///
    /// `v = sqrt(GM · (2/r − 1/a))`, evaluated in SI units.
    pub fn orbital_speed(&self, semi_major_axis_km: f64, radius_km: f64) -> OrbitalResult<f64> {
        let r = Kilometers::new(radius_km).to::<Meter>().value();
        let a = Kilometers::new(semi_major_axis_km).to::<Meter>().value();

        let energy_term = 2.0 / r - 1.0 / a;
        if !energy_term.is_finite() || energy_term <= 0.0 {
            return Err(OrbitalError::NonEllipticalOrbit(format!(
                "2/r - 1/a = {} for r = {} km, a = {} km",
                energy_term, radius_km, semi_major_axis_km
            )));
        }

        let speed_ms = (self.gravitational_parameter * energy_term).sqrt();
        Ok(speed_ms / METERS_PER_KILOMETER)
    }
}

impl Default for VelocityResolver {
    fn default() -> Self {
        Self::new(SUN_GRAVITATIONAL_PARAMETER)
    }
}
