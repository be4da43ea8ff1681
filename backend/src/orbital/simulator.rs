//! Multi-frame simulation of planet positions over a bounded time range.
//!
//! A run is validated up front, then frame `i` is computed at
//! `start + i·step` for as long as that date does not pass the end date.
//! The cancellation token is polled at every frame boundary; a cancelled run
//! yields no partial result.

use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::error::{OrbitalError, OrbitalResult};
use super::kepler::KeplerSolver;
use super::position::PositionResolver;
use super::velocity::VelocityResolver;
use super::EngineConfig;
use crate::models::{from_julian_date, JulianDate, Planet, Position3D};

/// Default simulated span when no end date is given (one Julian year).
pub const DEFAULT_SPAN_DAYS: f64 = 365.25;

/// Limits enforced before a simulation starts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationLimits {
    /// Longest allowed range in days (100 years)
    pub max_range_days: f64,
    /// Largest allowed time step in days
    pub max_step_days: f64,
    /// Upper bound on frames per run
    pub max_frames: usize,
    /// Upper bound on Newton–Raphson iterations per solve
    #[serde(default = "default_max_kepler_iterations")]
    pub max_kepler_iterations: u32,
}

fn default_max_kepler_iterations() -> u32 {
    KeplerSolver::MAX_ITERATIONS
}

impl Default for SimulationLimits {
    fn default() -> Self {
        Self {
            max_range_days: 36525.0,
            max_step_days: 365.0,
            max_frames: 200_000,
            max_kepler_iterations: default_max_kepler_iterations(),
        }
    }
}

fn default_time_step() -> f64 {
    1.0
}

/// Simulation request parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationRequest {
    /// Start Julian date (defaults to now)
    #[serde(default)]
    pub start_date: Option<f64>,
    /// End Julian date (defaults to start + 365.25 days)
    #[serde(default)]
    pub end_date: Option<f64>,
    /// Time step in days
    #[serde(default = "default_time_step")]
    pub time_step_days: f64,
    /// Specific planets to simulate (defaults to all, as does an empty list)
    #[serde(default)]
    pub planet_ids: Option<Vec<String>>,
    /// Kepler solver override for this run
    #[serde(default)]
    pub kepler_solver: Option<KeplerSolver>,
}

impl Default for SimulationRequest {
    fn default() -> Self {
        Self {
            start_date: None,
            end_date: None,
            time_step_days: default_time_step(),
            planet_ids: None,
            kepler_solver: None,
        }
    }
}

impl SimulationRequest {
    pub fn new(start_date: f64, end_date: f64, time_step_days: f64) -> Self {
        Self {
            start_date: Some(start_date),
            end_date: Some(end_date),
            time_step_days,
            ..Default::default()
        }
    }

    pub fn with_planets<I, S>(mut self, planet_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.planet_ids = Some(planet_ids.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_solver(mut self, solver: KeplerSolver) -> Self {
        self.kepler_solver = Some(solver);
        self
    }
}

/// State of one planet within a frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyState {
    pub planet_id: String,
    pub planet_name: String,
    pub position: Position3D,
    pub distance_from_sun_km: f64,
    pub velocity_kms: f64,
}

/// Single frame of a simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationFrame {
    pub julian_date: f64,
    /// Unix timestamp in seconds
    pub timestamp: f64,
    pub planets: Vec<BodyState>,
}

/// Ordered frames of a simulation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationRun {
    pub frames: Vec<SimulationFrame>,
    pub start_date: f64,
    pub end_date: f64,
    pub time_step_days: f64,
    pub total_frames: usize,
}

/// A validated simulation, ready to run.
#[derive(Debug, Clone)]
pub struct SimulationPlan<'a> {
    pub start_date: f64,
    pub end_date: f64,
    pub time_step_days: f64,
    pub frame_count: usize,
    pub bodies: Vec<&'a Planet>,
    pub solver: KeplerSolver,
}

impl SimulationPlan<'_> {
    /// Julian date of frame `index`.
    pub fn frame_date(&self, index: usize) -> f64 {
        self.start_date + index as f64 * self.time_step_days
    }
}

/// Gap between a finite, non-negative `x` and the next larger `f64`.
fn ulp(x: f64) -> f64 {
    f64::from_bits(x.to_bits() + 1) - x
}

/// Number of frames `start + i·step <= end`, for validated inputs.
fn count_frames(start: f64, end: f64, step: f64) -> usize {
    let mut count = ((end - start) / step).floor() as usize + 1;
    // the division may land one frame off either way
    while start + count as f64 * step <= end {
        count += 1;
    }
    while count > 1 && start + (count - 1) as f64 * step > end {
        count -= 1;
    }
    count
}

/// Drives position and velocity resolution across a time range.
#[derive(Debug, Clone)]
pub struct Simulator<'a> {
    bodies: &'a [Planet],
    config: EngineConfig,
}

impl<'a> Simulator<'a> {
    pub fn new(bodies: &'a [Planet], config: EngineConfig) -> Self {
        Self { bodies, config }
    }

    /// Validate `request` and resolve its defaults against `now`.
    pub fn plan(
        &self,
        request: &SimulationRequest,
        now: JulianDate,
    ) -> OrbitalResult<SimulationPlan<'a>> {
        let limits = self.config.limits;
        let start_date = request.start_date.unwrap_or_else(|| now.value());
        let end_date = request.end_date.unwrap_or(start_date + DEFAULT_SPAN_DAYS);
        let step = request.time_step_days;

        // written as negations so NaN inputs fail too
        if !(end_date > start_date) {
            return Err(OrbitalError::InvalidRange(format!(
                "end date {} must be after start date {}",
                end_date, start_date
            )));
        }
        if !(end_date - start_date <= limits.max_range_days) {
            return Err(OrbitalError::RangeTooLarge(format!(
                "range of {} days exceeds {} days",
                end_date - start_date,
                limits.max_range_days
            )));
        }
        if !(step > 0.0) {
            return Err(OrbitalError::InvalidStep(format!(
                "time step must be positive, got {}",
                step
            )));
        }
        if !(step <= limits.max_step_days) {
            return Err(OrbitalError::InvalidStep(format!(
                "time step cannot exceed {} days, got {}",
                limits.max_step_days, step
            )));
        }
        // consecutive frame dates must stay distinct after rounding
        let min_step = 2.0 * ulp(start_date.abs().max(end_date.abs()));
        if step < min_step {
            return Err(OrbitalError::InvalidStep(format!(
                "time step {} is below the date resolution of {} days",
                step, min_step
            )));
        }

        let solver = request.kepler_solver.unwrap_or(self.config.kepler_solver);
        solver.validate(limits.max_kepler_iterations)?;

        let bodies = self.select_bodies(request.planet_ids.as_deref())?;

        let approx_frames = ((end_date - start_date) / step).floor() + 1.0;
        if approx_frames > limits.max_frames as f64 {
            return Err(OrbitalError::TooManyFrames(format!(
                "{} frames requested, limit is {}",
                approx_frames, limits.max_frames
            )));
        }
        let frame_count = count_frames(start_date, end_date, step);
        if frame_count > limits.max_frames {
            return Err(OrbitalError::TooManyFrames(format!(
                "{} frames requested, limit is {}",
                frame_count, limits.max_frames
            )));
        }

        Ok(SimulationPlan {
            start_date,
            end_date,
            time_step_days: step,
            frame_count,
            bodies,
            solver,
        })
    }

    /// Planets selected by `planet_ids`, in catalog order.
    ///
    /// All planets when `None` or empty. Ids match ignoring ASCII case, as in
    /// catalog lookups.
    fn select_bodies(&self, planet_ids: Option<&[String]>) -> OrbitalResult<Vec<&'a Planet>> {
        let ids = match planet_ids {
            Some(ids) if !ids.is_empty() => ids,
            _ => return Ok(self.bodies.iter().collect()),
        };

        if let Some(missing) = ids
            .iter()
            .find(|id| !self.bodies.iter().any(|p| p.id.eq_ignore_ascii_case(id)))
        {
            return Err(OrbitalError::not_found_body(missing));
        }

        Ok(self
            .bodies
            .iter()
            .filter(|p| ids.iter().any(|id| p.id.eq_ignore_ascii_case(id)))
            .collect())
    }

    /// Run a simulation with `now` as the default start.
    pub fn run(
        &self,
        request: &SimulationRequest,
        cancel: &CancellationToken,
    ) -> OrbitalResult<SimulationRun> {
        self.run_at(request, JulianDate::now(), cancel)
    }

    /// Run a simulation, resolving a missing start date to `now`.
    pub fn run_at(
        &self,
        request: &SimulationRequest,
        now: JulianDate,
        cancel: &CancellationToken,
    ) -> OrbitalResult<SimulationRun> {
        let plan = self.plan(request, now)?;
        self.execute(&plan, cancel)
    }

    /// Compute every frame of a validated plan.
    pub fn execute(
        &self,
        plan: &SimulationPlan<'_>,
        cancel: &CancellationToken,
    ) -> OrbitalResult<SimulationRun> {
        info!(
            start_date = plan.start_date,
            end_date = plan.end_date,
            step_days = plan.time_step_days,
            frames = plan.frame_count,
            bodies = plan.bodies.len(),
            "Starting simulation"
        );

        let resolver = PositionResolver::new(plan.solver).with_orientation(self.config.orientation);
        let velocity = VelocityResolver::new(self.config.gravitational_parameter);

        let mut frames = Vec::with_capacity(plan.frame_count);
        for index in 0..plan.frame_count {
            if cancel.is_cancelled() {
                warn!(completed = index, total = plan.frame_count, "Simulation cancelled");
                return Err(OrbitalError::Cancelled(format!(
                    "simulation cancelled after {} of {} frames",
                    index, plan.frame_count
                )));
            }

            let julian_date = plan.frame_date(index);
            let instant = JulianDate::new(julian_date);
            let planets = plan
                .bodies
                .iter()
                .map(|planet| body_state(planet, instant, &resolver, &velocity))
                .collect::<OrbitalResult<Vec<_>>>()?;

            frames.push(SimulationFrame {
                julian_date,
                timestamp: from_julian_date(julian_date),
                planets,
            });
        }

        debug!(frames = frames.len(), "Simulation finished");

        Ok(SimulationRun {
            total_frames: frames.len(),
            frames,
            start_date: plan.start_date,
            end_date: plan.end_date,
            time_step_days: plan.time_step_days,
        })
    }
}

fn body_state(
    planet: &Planet,
    instant: JulianDate,
    resolver: &PositionResolver,
    velocity: &VelocityResolver,
) -> OrbitalResult<BodyState> {
    let resolved = resolver.resolve(&planet.orbit, instant)?;
    let velocity_kms =
        velocity.orbital_speed(planet.orbit.semi_major_axis_km, resolved.radius_km)?;
    Ok(BodyState {
        planet_id: planet.id.clone(),
        planet_name: planet.name.clone(),
        position: resolved.position,
        distance_from_sun_km: resolved.radius_km,
        velocity_kms,
    })
}

#[cfg(test)]
#[path = "simulator_tests.rs"]
mod simulator_tests;
