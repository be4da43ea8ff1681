//! Summary statistics over the planet catalog.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::models::{Planet, PlanetType};

/// Number of planets of each type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlanetTypeCounts {
    pub terrestrial: usize,
    pub gas_giant: usize,
    pub ice_giant: usize,
    pub dwarf_planet: usize,
}

/// A planet singled out by one measurement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanetExtreme {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub radius_km: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub surface_temp_k: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanetExtremes {
    pub largest_planet: PlanetExtreme,
    pub smallest_planet: PlanetExtreme,
    pub hottest_planet: PlanetExtreme,
    pub coldest_planet: PlanetExtreme,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolarSystemStats {
    pub total_planets: usize,
    pub planet_types: PlanetTypeCounts,
    pub total_moons: u32,
    pub planets_with_rings: usize,
    /// Absent for an empty catalog
    pub extremes: Option<PlanetExtremes>,
}

fn by_value<F>(key: F) -> impl Fn(&&Planet, &&Planet) -> Ordering
where
    F: Fn(&Planet) -> f64,
{
    move |a, b| key(*a).partial_cmp(&key(*b)).unwrap_or(Ordering::Equal)
}

fn radius(planet: &Planet) -> PlanetExtreme {
    PlanetExtreme {
        name: planet.name.clone(),
        radius_km: Some(planet.physical.radius_km),
        surface_temp_k: None,
    }
}

fn temperature(planet: &Planet) -> PlanetExtreme {
    PlanetExtreme {
        name: planet.name.clone(),
        radius_km: None,
        surface_temp_k: Some(planet.physical.surface_temp_k),
    }
}

fn compute_extremes(planets: &[Planet]) -> Option<PlanetExtremes> {
    let by_radius = by_value(|p| p.physical.radius_km);
    let by_temp = by_value(|p| p.physical.surface_temp_k);

    Some(PlanetExtremes {
        largest_planet: radius(planets.iter().max_by(&by_radius)?),
        smallest_planet: radius(planets.iter().min_by(&by_radius)?),
        hottest_planet: temperature(planets.iter().max_by(&by_temp)?),
        coldest_planet: temperature(planets.iter().min_by(&by_temp)?),
    })
}

/// Compute catalog statistics.
pub fn compute_stats(planets: &[Planet]) -> SolarSystemStats {
    let mut planet_types = PlanetTypeCounts::default();
    for planet in planets {
        match planet.planet_type {
            PlanetType::Terrestrial => planet_types.terrestrial += 1,
            PlanetType::GasGiant => planet_types.gas_giant += 1,
            PlanetType::IceGiant => planet_types.ice_giant += 1,
            PlanetType::DwarfPlanet => planet_types.dwarf_planet += 1,
        }
    }

    SolarSystemStats {
        total_planets: planets.len(),
        planet_types,
        total_moons: planets.iter().map(|p| p.moons).sum(),
        planets_with_rings: planets.iter().filter(|p| p.has_rings).count(),
        extremes: compute_extremes(planets),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::test_fixtures::planet;

    fn sample() -> Vec<Planet> {
        let mut mercury = planet("mercury", 5.79e7, 0.2056, 7.0, 87.969);
        mercury.physical.radius_km = 2439.7;
        mercury.physical.surface_temp_k = 440.0;

        let mut venus = planet("venus", 1.0821e8, 0.0067, 3.39, 224.701);
        venus.physical.radius_km = 6051.8;
        venus.physical.surface_temp_k = 737.0;

        let mut jupiter = planet("jupiter", 7.785e8, 0.0489, 1.3, 4332.59);
        jupiter.planet_type = PlanetType::GasGiant;
        jupiter.physical.radius_km = 69911.0;
        jupiter.physical.surface_temp_k = 165.0;
        jupiter.moons = 95;
        jupiter.has_rings = true;

        let mut neptune = planet("neptune", 4.495e9, 0.0113, 1.77, 60190.0);
        neptune.planet_type = PlanetType::IceGiant;
        neptune.physical.radius_km = 24622.0;
        neptune.physical.surface_temp_k = 72.0;
        neptune.moons = 16;
        neptune.has_rings = true;

        vec![mercury, venus, jupiter, neptune]
    }

    #[test]
    fn test_counts() {
        let stats = compute_stats(&sample());
        assert_eq!(stats.total_planets, 4);
        assert_eq!(
            stats.planet_types,
            PlanetTypeCounts {
                terrestrial: 2,
                gas_giant: 1,
                ice_giant: 1,
                dwarf_planet: 0,
            }
        );
        assert_eq!(stats.total_moons, 111);
        assert_eq!(stats.planets_with_rings, 2);
    }

    #[test]
    fn test_extremes() {
        let extremes = compute_stats(&sample()).extremes.unwrap();
        assert_eq!(extremes.largest_planet.name, "Jupiter");
        assert_eq!(extremes.largest_planet.radius_km, Some(69911.0));
        assert_eq!(extremes.smallest_planet.name, "Mercury");
        assert_eq!(extremes.hottest_planet.name, "Venus");
        assert_eq!(extremes.coldest_planet.name, "Neptune");
        assert_eq!(extremes.coldest_planet.surface_temp_k, Some(72.0));
    }

    #[test]
    fn test_empty_catalog() {
        let stats = compute_stats(&[]);
        assert_eq!(stats.total_planets, 0);
        assert!(stats.extremes.is_none());
    }

    #[test]
    fn test_extreme_serialization_omits_other_measure() {
        let extremes = compute_stats(&sample()).extremes.unwrap();
        let json = serde_json::to_value(&extremes.hottest_planet).unwrap();
        assert_eq!(json, serde_json::json!({"name": "Venus", "surface_temp_k": 737.0}));
    }
}
