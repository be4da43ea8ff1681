//! Engine behaviour against the bundled catalog.

mod support;

use proptest::prelude::*;

use exoplanet_ai::models::{JulianDate, J2000_JD};
use exoplanet_ai::orbital::{
    EngineConfig, KeplerSolver, OrbitPathBuilder, OrbitalError, SimulationRequest,
};
use exoplanet_ai::services::SolarSystemService;

fn service() -> SolarSystemService {
    SolarSystemService::new(support::catalog(), EngineConfig::default())
}

#[test]
fn test_one_year_of_daily_frames() {
    let service = service();
    let request = SimulationRequest::new(J2000_JD, J2000_JD + 365.25, 1.0);
    let run = service.simulate(&request).unwrap();

    assert_eq!(run.total_frames, 366);
    assert_eq!(run.frames.len(), run.total_frames);
    for frame in &run.frames {
        assert_eq!(frame.planets.len(), 9);
    }
}

#[test]
fn test_distances_stay_between_apsides() {
    let service = service();
    let request = SimulationRequest::new(J2000_JD, J2000_JD + 3650.0, 10.0);
    let run = service.simulate(&request).unwrap();
    let catalog = service.catalog();

    for frame in &run.frames {
        for state in &frame.planets {
            let orbit = catalog.planet(&state.planet_id).unwrap().orbit;
            let peri = orbit.semi_major_axis_km * (1.0 - orbit.eccentricity);
            let apo = orbit.semi_major_axis_km * (1.0 + orbit.eccentricity);
            assert!(state.distance_from_sun_km >= peri * (1.0 - 1e-12));
            assert!(state.distance_from_sun_km <= apo * (1.0 + 1e-12));
        }
    }
}

#[test]
fn test_earth_speed_is_realistic() {
    let service = service();
    for days in [0.0, 91.0, 182.6, 273.9] {
        let timestamp = JulianDate::new(J2000_JD + days).to_unix_timestamp();
        let earth = service.get_position("earth", Some(timestamp)).unwrap();
        assert!(
            (29.2..=30.4).contains(&earth.velocity_kms),
            "day {}: {} km/s",
            days,
            earth.velocity_kms
        );
    }
}

#[test]
fn test_inner_planets_move_faster() {
    let service = service();
    let positions = service.get_positions_all(Some(0.0)).unwrap();
    let speed = |id: &str| {
        positions
            .planets
            .iter()
            .find(|p| p.planet.id == id)
            .unwrap()
            .velocity_kms
    };
    assert!(speed("mercury") > speed("earth"));
    assert!(speed("earth") > speed("jupiter"));
    assert!(speed("jupiter") > speed("neptune"));
}

#[test]
fn test_position_repeats_after_one_period() {
    let service = service();
    let catalog = service.catalog();
    let mars = catalog.planet("mars").unwrap();
    let resolver = service.engine().position_resolver();

    let start = JulianDate::new(J2000_JD + 100.0);
    let later = start.add_days(mars.orbit.orbital_period_days);
    let a = resolver.resolve(&mars.orbit, start).unwrap().position;
    let b = resolver.resolve(&mars.orbit, later).unwrap().position;

    let separation = ((a.x - b.x).powi(2) + (a.y - b.y).powi(2) + (a.z - b.z).powi(2)).sqrt();
    assert!(separation < 1.0, "separation {} km", separation);
}

#[test]
fn test_century_simulation_with_yearly_steps() {
    let service = service();
    let request = SimulationRequest::new(J2000_JD, J2000_JD + 36525.0, 365.0)
        .with_planets(["pluto"])
        .with_solver(KeplerSolver::converged());
    let run = service.simulate(&request).unwrap();
    assert_eq!(run.total_frames, 101);
    assert_eq!(run.frames.last().unwrap().julian_date, J2000_JD + 36500.0);
}

#[test]
fn test_frame_limit_from_config() {
    let mut engine = EngineConfig::default();
    engine.limits.max_frames = 100;
    let service = SolarSystemService::new(support::catalog(), engine);

    let request = SimulationRequest::new(J2000_JD, J2000_JD + 365.0, 1.0);
    assert!(matches!(
        service.simulate(&request),
        Err(OrbitalError::TooManyFrames(_))
    ));
}

proptest! {
    #[test]
    fn prop_orbit_path_spacing(resolution in 36usize..=1440, index in 0usize..9) {
        let catalog = support::catalog();
        let planet = &catalog.planets()[index];
        let path = OrbitPathBuilder::new(resolution).unwrap().build(planet);

        prop_assert_eq!(path.points.len(), resolution);
        prop_assert_eq!(path.points[0].angle_deg, 0.0);
        let step = 360.0 / resolution as f64;
        for (i, point) in path.points.iter().enumerate() {
            prop_assert_eq!(point.angle_deg, step * i as f64);
            prop_assert!(point.angle_deg < 360.0);
        }
    }

    #[test]
    fn prop_frame_dates_follow_step(
        start_offset in -50_000.0f64..50_000.0,
        span in 0.5f64..400.0,
        step in 0.25f64..30.0,
    ) {
        let catalog = support::catalog();
        let service = SolarSystemService::new(catalog, EngineConfig::default());
        let start = J2000_JD + start_offset;
        let request = SimulationRequest::new(start, start + span, step).with_planets(["earth"]);
        let run = service.simulate(&request).unwrap();

        prop_assert!(!run.frames.is_empty());
        for (i, frame) in run.frames.iter().enumerate() {
            prop_assert_eq!(frame.julian_date, start + i as f64 * step);
            prop_assert!(frame.julian_date <= start + span);
        }
        let next = start + run.frames.len() as f64 * step;
        prop_assert!(next > start + span);
    }

    #[test]
    fn prop_timestamp_round_trip(t in -3.0e9f64..3.0e9) {
        let back = JulianDate::from_unix_timestamp(t).to_unix_timestamp();
        prop_assert!((back - t).abs() < 1e-6);
    }
}
