//! Heliocentric position of a body from its anomalies.

use serde::{Deserialize, Serialize};

use super::error::OrbitalResult;
use super::kepler::{Anomalies, AnomalySolver, KeplerSolver};
use crate::models::{JulianDate, OrbitalElements, Position3D};

/// How the orbital plane is oriented in space.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrientationModel {
    /// Single-axis tilt by the inclination about the line of nodes, with the
    /// ascending node fixed at 0° and no argument of periapsis.
    ///
    /// A schematic approximation for visualization: real bodies whose nodal
    /// longitude is not zero end up rotated about the z axis.
    #[default]
    Rendering,
}

impl OrientationModel {
    /// Rotate orbital-plane coordinates (km) into the reference frame.
    pub fn orient(&self, x_orbital: f64, y_orbital: f64, inclination_deg: f64) -> Position3D {
        match self {
            Self::Rendering => {
                let (sin_i, cos_i) = qtty::Degrees::new(inclination_deg).sin_cos();
                Position3D {
                    x: x_orbital,
                    y: y_orbital * cos_i,
                    z: y_orbital * sin_i,
                }
            }
        }
    }
}

/// Position of a body together with the quantities it was derived from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedPosition {
    pub position: Position3D,
    /// Distance from the central mass in km, `a·(1 − e·cos E)`
    pub radius_km: f64,
    pub anomalies: Anomalies,
}

/// Resolves 3D positions on an orbit.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PositionResolver {
    anomaly_solver: AnomalySolver,
    orientation: OrientationModel,
}

impl PositionResolver {
    pub fn new(solver: KeplerSolver) -> Self {
        Self {
            anomaly_solver: AnomalySolver::new(solver),
            orientation: OrientationModel::default(),
        }
    }

    pub fn with_orientation(mut self, orientation: OrientationModel) -> Self {
        self.orientation = orientation;
        self
    }

    pub fn orientation(&self) -> OrientationModel {
        self.orientation
    }

    pub fn kepler_solver(&self) -> KeplerSolver {
        self.anomaly_solver.solver()
    }

    /// Position from already solved anomalies.
    pub fn position_from_anomalies(
        &self,
        elements: &OrbitalElements,
        anomalies: Anomalies,
    ) -> ResolvedPosition {
        let radius_km = elements.semi_major_axis_km
            * (1.0 - elements.eccentricity * anomalies.eccentric.cos());

        let x_orbital = radius_km * anomalies.true_anomaly.cos();
        let y_orbital = radius_km * anomalies.true_anomaly.sin();

        ResolvedPosition {
            position: self
                .orientation
                .orient(x_orbital, y_orbital, elements.inclination_deg),
            radius_km,
            anomalies,
        }
    }

    /// Position of the body at `julian_date`.
    pub fn resolve(
        &self,
        elements: &OrbitalElements,
        julian_date: JulianDate,
    ) -> OrbitalResult<ResolvedPosition> {
        let anomalies = self.anomaly_solver.solve(elements, julian_date)?;
        Ok(self.position_from_anomalies(elements, anomalies))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::J2000_JD;
    use std::f64::consts::{FRAC_PI_2, PI};

    fn anomalies(eccentric: f64, true_anomaly: f64) -> Anomalies {
        Anomalies {
            mean: eccentric,
            eccentric,
            true_anomaly,
        }
    }

    #[test]
    fn test_periapsis_distance() {
        let el = OrbitalElements::new(1.0e8, 0.2, 0.0, 400.0).unwrap();
        let resolved = PositionResolver::default().position_from_anomalies(&el, anomalies(0.0, 0.0));
        assert!((resolved.radius_km - 0.8e8).abs() < 1e-6);
        assert!((resolved.position.x - 0.8e8).abs() < 1e-6);
        assert_eq!(resolved.position.y, 0.0);
        assert_eq!(resolved.position.z, 0.0);
    }

    #[test]
    fn test_apoapsis_distance() {
        let el = OrbitalElements::new(1.0e8, 0.2, 0.0, 400.0).unwrap();
        let resolved = PositionResolver::default().position_from_anomalies(&el, anomalies(PI, PI));
        assert!((resolved.radius_km - 1.2e8).abs() < 1e-6);
        assert!((resolved.position.x + 1.2e8).abs() < 1e-6);
    }

    #[test]
    fn test_inclination_tilts_y_into_z() {
        let el = OrbitalElements::new(1.0e8, 0.0, 90.0, 400.0).unwrap();
        let p = PositionResolver::default()
            .position_from_anomalies(&el, anomalies(FRAC_PI_2, FRAC_PI_2))
            .position;
        assert!(p.x.abs() < 1e-6);
        assert!(p.y.abs() < 1e-6);
        assert!((p.z - 1.0e8).abs() < 1e-6);
    }

    #[test]
    fn test_rendering_model_keeps_x() {
        let p = OrientationModel::Rendering.orient(5.0, 10.0, 30.0);
        assert_eq!(p.x, 5.0);
        assert!((p.y - 10.0 * 30f64.to_radians().cos()).abs() < 1e-12);
        assert!((p.z - 10.0 * 30f64.to_radians().sin()).abs() < 1e-12);
    }

    #[test]
    fn test_position_magnitude_equals_radius() {
        let el = OrbitalElements::new(2.279e8, 0.0934, 1.85, 686.98).unwrap();
        let resolver = PositionResolver::default();
        for offset in [0.0, 100.0, 250.5, 600.0] {
            let resolved = resolver.resolve(&el, JulianDate::new(J2000_JD + offset)).unwrap();
            let rel = (resolved.position.magnitude() - resolved.radius_km).abs() / resolved.radius_km;
            assert!(rel < 1e-12);
        }
    }

    #[test]
    fn test_radius_within_periapsis_and_apoapsis() {
        let el = OrbitalElements::new(5.9064e9, 0.2488, 17.16, 90560.0).unwrap();
        let resolver = PositionResolver::default();
        for i in 0..50 {
            let resolved = resolver
                .resolve(&el, JulianDate::new(J2000_JD + i as f64 * 2000.0))
                .unwrap();
            assert!(resolved.radius_km >= 5.9064e9 * (1.0 - 0.2488) - 1.0);
            assert!(resolved.radius_km <= 5.9064e9 * (1.0 + 0.2488) + 1.0);
        }
    }
}
