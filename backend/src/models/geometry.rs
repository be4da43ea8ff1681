use serde::{Deserialize, Serialize};

/// Cartesian position in kilometers, relative to the central mass at the origin.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position3D {
    /// X coordinate in km
    pub x: f64,
    /// Y coordinate in km
    pub y: f64,
    /// Z coordinate in km
    pub z: f64,
}

impl Position3D {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Euclidean distance from the origin in km.
    pub fn magnitude(&self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }
}

/// Single point on an orbital path.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrbitPathPoint {
    /// Angle along the orbit in degrees, 0 to 360
    pub angle_deg: f64,
    pub position: Position3D,
}

/// Discretized orbit of one planet, ready for rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrbitPath {
    pub planet_id: String,
    pub planet_name: String,
    pub points: Vec<OrbitPathPoint>,
    /// Orbit color (hex code)
    pub color: String,
}
