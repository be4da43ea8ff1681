//! Reference data for the bodies of the solar system.

use serde::{Deserialize, Serialize};

use super::geometry::Position3D;
use crate::orbital::error::{OrbitalError, OrbitalResult};

/// Keplerian elements needed by the engine.
///
/// Serialized flat, so the four fields sit directly on the owning planet record.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrbitalElements {
    /// Semi-major axis in km
    pub semi_major_axis_km: f64,
    /// Orbital eccentricity, 0 <= e < 1
    pub eccentricity: f64,
    /// Orbital inclination in degrees
    pub inclination_deg: f64,
    /// Orbital period in days
    pub orbital_period_days: f64,
}

impl OrbitalElements {
    /// Create validated orbital elements.
    pub fn new(
        semi_major_axis_km: f64,
        eccentricity: f64,
        inclination_deg: f64,
        orbital_period_days: f64,
    ) -> OrbitalResult<Self> {
        let elements = Self {
            semi_major_axis_km,
            eccentricity,
            inclination_deg,
            orbital_period_days,
        };
        elements.validate()?;
        Ok(elements)
    }

    /// Check that the elements describe a closed, periodic orbit.
    pub fn validate(&self) -> OrbitalResult<()> {
        if !self.eccentricity.is_finite() || !(0.0..1.0).contains(&self.eccentricity) {
            return Err(OrbitalError::InvalidOrbit(format!(
                "eccentricity must be in [0, 1), got {}",
                self.eccentricity
            )));
        }
        if !self.semi_major_axis_km.is_finite() || self.semi_major_axis_km <= 0.0 {
            return Err(OrbitalError::InvalidOrbit(format!(
                "semi-major axis must be positive, got {} km",
                self.semi_major_axis_km
            )));
        }
        if !self.orbital_period_days.is_finite() || self.orbital_period_days <= 0.0 {
            return Err(OrbitalError::InvalidOrbit(format!(
                "orbital period must be positive, got {} days",
                self.orbital_period_days
            )));
        }
        if !self.inclination_deg.is_finite() {
            return Err(OrbitalError::InvalidOrbit(
                "inclination must be finite".to_string(),
            ));
        }
        Ok(())
    }

    /// Mean motion in radians per day.
    pub fn mean_motion(&self) -> f64 {
        std::f64::consts::TAU / self.orbital_period_days
    }
}

/// Planet type classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanetType {
    Terrestrial,
    GasGiant,
    IceGiant,
    DwarfPlanet,
}

/// Physical characteristics of a planet. Not used by the orbital math.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhysicalAttributes {
    /// Radius in kilometers
    pub radius_km: f64,
    /// Mass in kilograms
    pub mass_kg: f64,
    /// Surface temperature in Kelvin
    pub surface_temp_k: f64,
    /// Surface gravity in m/s²
    pub surface_gravity_ms2: f64,
    /// Escape velocity in km/s
    pub escape_velocity_kms: f64,
    /// Rotation period in hours (negative for retrograde rotation)
    pub rotation_period_hours: f64,
}

/// Planet information.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Planet {
    /// Unique planet identifier (lowercase)
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub planet_type: PlanetType,
    /// Order from the Sun
    pub order: u32,
    #[serde(flatten)]
    pub physical: PhysicalAttributes,
    #[serde(flatten)]
    pub orbit: OrbitalElements,
    /// Semi-major axis in AU (informational)
    pub semi_major_axis_au: f64,
    pub moons: u32,
    pub has_rings: bool,
    /// Visual color name
    pub color: String,
    /// Hex color code
    pub hex_color: String,
    pub description: String,
    pub interesting_facts: Vec<String>,
}

/// Sun information.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sun {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub object_type: String,
    pub radius_km: f64,
    pub mass_kg: f64,
    pub surface_temp_k: f64,
    pub core_temp_k: f64,
    pub age_years: f64,
    pub color: String,
    pub hex_color: String,
    pub description: String,
    pub interesting_facts: Vec<String>,
}

/// Planet together with its position and speed at one instant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanetWithPosition {
    #[serde(flatten)]
    pub planet: Planet,
    pub position: Position3D,
    /// Current distance from the Sun in km
    pub distance_from_sun_km: f64,
    /// Current orbital velocity in km/s
    pub velocity_kms: f64,
}
