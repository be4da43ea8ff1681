//! Application state for the HTTP server.

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::RwLock;

use crate::services::{OrbitPathsResponse, SolarSystemService};

/// Orbit path sets kept per process, oldest evicted first.
pub const DEFAULT_ORBIT_CACHE_CAPACITY: usize = 4;

/// All-planet orbit paths keyed by resolution, bounded by the capacity given to `insert`.
#[derive(Debug, Default)]
struct OrbitCache {
    entries: HashMap<usize, Arc<OrbitPathsResponse>>,
    insertion_order: VecDeque<usize>,
}

impl OrbitCache {
    fn get(&self, resolution: usize) -> Option<Arc<OrbitPathsResponse>> {
        self.entries.get(&resolution).cloned()
    }

    fn insert(
        &mut self,
        orbits: OrbitPathsResponse,
        capacity: usize,
    ) -> Arc<OrbitPathsResponse> {
        if let Some(existing) = self.entries.get(&orbits.resolution) {
            return existing.clone();
        }

        let resolution = orbits.resolution;
        let orbits = Arc::new(orbits);
        if capacity == 0 {
            return orbits;
        }

        while self.entries.len() >= capacity {
            match self.insertion_order.pop_front() {
                Some(oldest) => {
                    self.entries.remove(&oldest);
                }
                None => break,
            }
        }
        self.entries.insert(resolution, orbits.clone());
        self.insertion_order.push_back(resolution);
        orbits
    }
}

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<SolarSystemService>,
    /// Resolution used when `/orbits` requests omit one
    pub default_resolution: usize,
    /// Upper bound on a single simulation run
    pub simulation_timeout: Duration,
    pub body_limit_bytes: usize,
    /// Most resolutions kept in the orbit cache
    pub orbit_cache_capacity: usize,
    orbit_cache: Arc<RwLock<OrbitCache>>,
}

impl AppState {
    pub fn new(service: Arc<SolarSystemService>) -> Self {
        Self {
            service,
            default_resolution: crate::orbital::DEFAULT_RESOLUTION,
            simulation_timeout: Duration::from_secs(30),
            body_limit_bytes: 1024 * 1024,
            orbit_cache_capacity: DEFAULT_ORBIT_CACHE_CAPACITY,
            orbit_cache: Arc::new(RwLock::new(OrbitCache::default())),
        }
    }

    pub fn with_default_resolution(mut self, resolution: usize) -> Self {
        self.default_resolution = resolution;
        self
    }

    pub fn with_simulation_timeout(mut self, timeout: Duration) -> Self {
        self.simulation_timeout = timeout;
        self
    }

    pub fn with_body_limit(mut self, bytes: usize) -> Self {
        self.body_limit_bytes = bytes;
        self
    }

    pub fn with_orbit_cache_capacity(mut self, capacity: usize) -> Self {
        self.orbit_cache_capacity = capacity;
        self
    }

    pub fn cached_orbits(&self, resolution: usize) -> Option<Arc<OrbitPathsResponse>> {
        self.orbit_cache.read().get(resolution)
    }

    /// Store `orbits`, evicting the oldest resolution when the cache is full.
    ///
    /// Returns the entry already cached for that resolution, if any.
    pub fn cache_orbits(&self, orbits: OrbitPathsResponse) -> Arc<OrbitPathsResponse> {
        self.orbit_cache
            .write()
            .insert(orbits, self.orbit_cache_capacity)
    }

    pub fn cached_resolutions(&self) -> usize {
        self.orbit_cache.read().entries.len()
    }
}
