//! Mean, eccentric and true anomaly of a body at a given instant.
//!
//! The mean anomaly is measured from J2000.0 and reduced into `[0, 2π)`.
//! Kepler's equation `E = M + e·sin(E)` is solved with a [`KeplerSolver`]
//! chosen by the caller: the legacy single substitution or a converged
//! Newton–Raphson iteration.

use std::f64::consts::{PI, TAU};

use serde::{Deserialize, Serialize};

use super::error::{OrbitalError, OrbitalResult};
use crate::models::{JulianDate, OrbitalElements};

/// Strategy for solving Kepler's equation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum KeplerSolver {
    /// One fixed-point substitution, `E ≈ M + e·sin(M)`.
    ///
    /// Only accurate for small eccentricities; kept for output compatibility.
    SingleStep,
    /// Newton–Raphson iteration until `|ΔE| < tolerance` or `max_iterations`.
    NewtonRaphson { max_iterations: u32, tolerance: f64 },
}

impl KeplerSolver {
    pub const DEFAULT_MAX_ITERATIONS: u32 = 10;
    pub const DEFAULT_TOLERANCE: f64 = 1e-9;
    /// Largest Newton–Raphson iteration budget a request may ask for.
    pub const MAX_ITERATIONS: u32 = 100;

    /// Converged solver with the default iteration budget.
    pub fn converged() -> Self {
        Self::NewtonRaphson {
            max_iterations: Self::DEFAULT_MAX_ITERATIONS,
            tolerance: Self::DEFAULT_TOLERANCE,
        }
    }

    /// Check that a Newton–Raphson solve is bounded: a positive, finite
    /// tolerance and at most `max_iterations` steps.
    pub fn validate(&self, max_iterations: u32) -> OrbitalResult<()> {
        let Self::NewtonRaphson {
            max_iterations: requested,
            tolerance,
        } = *self
        else {
            return Ok(());
        };

        if !tolerance.is_finite() || tolerance <= 0.0 {
            return Err(OrbitalError::InvalidSolver(format!(
                "tolerance must be positive and finite, got {}",
                tolerance
            )));
        }
        if requested > max_iterations {
            return Err(OrbitalError::InvalidSolver(format!(
                "max_iterations cannot exceed {}, got {}",
                max_iterations, requested
            )));
        }
        Ok(())
    }

    /// Solve for the eccentric anomaly (radians).
    pub fn eccentric_anomaly(&self, mean_anomaly: f64, eccentricity: f64) -> f64 {
        if eccentricity == 0.0 {
            return mean_anomaly;
        }

        match *self {
            Self::SingleStep => mean_anomaly + eccentricity * mean_anomaly.sin(),
            Self::NewtonRaphson {
                max_iterations,
                tolerance,
            } => {
                // Starting at π keeps the iteration stable for very eccentric orbits.
                let mut ea = if eccentricity < 0.8 { mean_anomaly } else { PI };
                for _ in 0..max_iterations {
                    let residual = ea - eccentricity * ea.sin() - mean_anomaly;
                    let delta = residual / (1.0 - eccentricity * ea.cos());
                    ea -= delta;
                    if delta.abs() < tolerance {
                        break;
                    }
                }
                ea
            }
        }
    }
}

impl Default for KeplerSolver {
    fn default() -> Self {
        Self::converged()
    }
}

/// The three anomalies of a body at one instant, in radians.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Anomalies {
    /// Mean anomaly in `[0, 2π)`
    pub mean: f64,
    pub eccentric: f64,
    /// True anomaly in `[0, 2π)`
    pub true_anomaly: f64,
}

/// Reduce an angle into `[0, 2π)`.
pub fn normalize_radians(angle: f64) -> f64 {
    let reduced = angle.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs
    if reduced >= TAU {
        0.0
    } else {
        reduced
    }
}

/// Mean anomaly at `julian_date`, measured from J2000.0.
pub fn mean_anomaly(elements: &OrbitalElements, julian_date: JulianDate) -> f64 {
    normalize_radians(elements.mean_motion() * julian_date.days_since_j2000())
}

/// True anomaly from the eccentric anomaly, in `[0, 2π)`.
pub fn true_anomaly(eccentric_anomaly: f64, eccentricity: f64) -> f64 {
    let half = eccentric_anomaly / 2.0;
    let nu = 2.0
        * f64::atan2(
            (1.0 + eccentricity).sqrt() * half.sin(),
            (1.0 - eccentricity).sqrt() * half.cos(),
        );
    normalize_radians(nu)
}

/// Computes the anomalies of an orbit at a given instant.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AnomalySolver {
    solver: KeplerSolver,
}

impl AnomalySolver {
    pub fn new(solver: KeplerSolver) -> Self {
        Self { solver }
    }

    pub fn solver(&self) -> KeplerSolver {
        self.solver
    }

    /// Solve the anomalies of `elements` at `julian_date`.
    ///
    /// Fails with `InvalidOrbit` when the elements do not describe a closed orbit.
    pub fn solve(
        &self,
        elements: &OrbitalElements,
        julian_date: JulianDate,
    ) -> OrbitalResult<Anomalies> {
        elements.validate()?;

        let mean = mean_anomaly(elements, julian_date);
        let e = elements.eccentricity;
        if e == 0.0 {
            return Ok(Anomalies {
                mean,
                eccentric: mean,
                true_anomaly: mean,
            });
        }

        let eccentric = self.solver.eccentric_anomaly(mean, e);
        Ok(Anomalies {
            mean,
            eccentric,
            true_anomaly: true_anomaly(eccentric, e),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::J2000_JD;

    fn elements(e: f64) -> OrbitalElements {
        OrbitalElements::new(149_598_023.0, e, 0.0, 365.256).unwrap()
    }

    #[test]
    fn test_mean_anomaly_zero_at_j2000() {
        let m = mean_anomaly(&elements(0.0167), JulianDate::new(J2000_JD));
        assert_eq!(m, 0.0);
    }

    #[test]
    fn test_mean_anomaly_half_period() {
        let el = elements(0.0);
        let m = mean_anomaly(&el, JulianDate::new(J2000_JD + 365.256 / 2.0));
        assert!((m - PI).abs() < 1e-9);
    }

    #[test]
    fn test_mean_anomaly_reduced_before_epoch() {
        let m = mean_anomaly(&elements(0.0), JulianDate::new(J2000_JD - 10.0));
        assert!((0.0..TAU).contains(&m));
    }

    #[test]
    fn test_mean_anomaly_reduced_far_from_epoch() {
        // 100 centuries away still lands in range
        let m = mean_anomaly(&elements(0.2), JulianDate::new(J2000_JD + 3_652_500.0));
        assert!((0.0..TAU).contains(&m));
    }

    #[test]
    fn test_circular_orbit_true_equals_mean_exactly() {
        let solver = AnomalySolver::default();
        for offset in [-1234.5, 0.0, 17.25, 91.3, 500.0, 36525.0] {
            let a = solver
                .solve(&elements(0.0), JulianDate::new(J2000_JD + offset))
                .unwrap();
            assert_eq!(a.true_anomaly, a.mean);
            assert_eq!(a.eccentric, a.mean);
        }
    }

    #[test]
    fn test_single_step_matches_legacy_formula() {
        let m = 1.2;
        let e = 0.0934;
        let ea = KeplerSolver::SingleStep.eccentric_anomaly(m, e);
        assert_eq!(ea, m + e * m.sin());
    }

    #[test]
    fn test_newton_raphson_converges_for_high_eccentricity() {
        let solver = KeplerSolver::converged();
        for e in [0.1, 0.5, 0.85, 0.95] {
            for i in 0..64 {
                let m = TAU * i as f64 / 64.0;
                let ea = solver.eccentric_anomaly(m, e);
                let residual = ea - e * ea.sin() - m;
                assert!(residual.abs() < 1e-9, "e={} m={} residual={}", e, m, residual);
            }
        }
    }

    #[test]
    fn test_newton_raphson_beats_single_step() {
        let m = 2.0;
        let e = 0.4;
        let converged = KeplerSolver::converged().eccentric_anomaly(m, e);
        let legacy = KeplerSolver::SingleStep.eccentric_anomaly(m, e);
        let residual = |ea: f64| (ea - e * ea.sin() - m).abs();
        assert!(residual(converged) < residual(legacy));
    }

    #[test]
    fn test_zero_iterations_returns_initial_guess() {
        let solver = KeplerSolver::NewtonRaphson {
            max_iterations: 0,
            tolerance: 1e-9,
        };
        assert_eq!(solver.eccentric_anomaly(1.0, 0.3), 1.0);
    }

    #[test]
    fn test_validate_bounds_newton_raphson() {
        let cap = KeplerSolver::MAX_ITERATIONS;
        assert!(KeplerSolver::converged().validate(cap).is_ok());
        assert!(KeplerSolver::SingleStep.validate(0).is_ok());

        for tolerance in [0.0, -1e-9, f64::NAN, f64::INFINITY] {
            let solver = KeplerSolver::NewtonRaphson {
                max_iterations: 10,
                tolerance,
            };
            assert!(
                matches!(solver.validate(cap), Err(OrbitalError::InvalidSolver(_))),
                "tolerance {}",
                tolerance
            );
        }

        let unbounded = KeplerSolver::NewtonRaphson {
            max_iterations: u32::MAX,
            tolerance: 1e-9,
        };
        assert!(matches!(
            unbounded.validate(cap),
            Err(OrbitalError::InvalidSolver(_))
        ));
        let at_cap = KeplerSolver::NewtonRaphson {
            max_iterations: cap,
            tolerance: 1e-9,
        };
        assert!(at_cap.validate(cap).is_ok());
    }

    #[test]
    fn test_true_anomaly_at_periapsis_and_apoapsis() {
        assert_eq!(true_anomaly(0.0, 0.5), 0.0);
        assert!((true_anomaly(PI, 0.5) - PI).abs() < 1e-12);
    }

    #[test]
    fn test_true_anomaly_leads_eccentric_on_outbound_leg() {
        let nu = true_anomaly(1.0, 0.3);
        assert!(nu > 1.0 && nu < PI);
    }

    #[test]
    fn test_rejects_unbound_orbit() {
        let el = OrbitalElements {
            semi_major_axis_km: 1.0e8,
            eccentricity: 1.0,
            inclination_deg: 0.0,
            orbital_period_days: 100.0,
        };
        let err = AnomalySolver::default()
            .solve(&el, JulianDate::new(J2000_JD))
            .unwrap_err();
        assert!(matches!(err, OrbitalError::InvalidOrbit(_)));
    }

    #[test]
    fn test_solver_serde_tagging() {
        let json = serde_json::to_string(&KeplerSolver::converged()).unwrap();
        assert_eq!(
            json,
            r#"{"method":"newton_raphson","max_iterations":10,"tolerance":1e-9}"#
        );
        let legacy: KeplerSolver = serde_json::from_str(r#"{"method":"single_step"}"#).unwrap();
        assert_eq!(legacy, KeplerSolver::SingleStep);
    }
}
