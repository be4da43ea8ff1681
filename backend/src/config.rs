//! Application configuration.
//!
//! Settings come from an optional `exoplanet.toml` file, then environment
//! variables override individual values:
//!
//! - `EXOPLANET_CONFIG`: explicit path to the TOML file
//! - `HOST`, `PORT`: bind address
//! - `SOLAR_SYSTEM_DATA`: path to the reference data JSON
//!
//! Every field has a default, so an empty file (or none) is a valid config.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::orbital::{
    EngineConfig, KeplerSolver, OrientationModel, SimulationLimits, DEFAULT_RESOLUTION,
    MAX_RESOLUTION, MIN_RESOLUTION, SUN_GRAVITATIONAL_PARAMETER,
};

pub const CONFIG_FILE_NAME: &str = "exoplanet.toml";
pub const CONFIG_PATH_ENV: &str = "EXOPLANET_CONFIG";

/// Error type for configuration loading
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {message}")]
    Read { path: String, message: String },

    #[error("Failed to parse config file {path}: {message}")]
    Parse { path: String, message: String },

    #[error("Invalid value for {key}: {message}")]
    Invalid { key: String, message: String },
}

impl ConfigError {
    fn invalid(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Invalid {
            key: key.into(),
            message: message.into(),
        }
    }
}

/// Full application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub data: DataSettings,
    #[serde(default)]
    pub engine: EngineSettings,
}

/// HTTP server settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Largest accepted request body
    #[serde(default = "default_body_limit_bytes")]
    pub body_limit_bytes: usize,
}

/// Reference data settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataSettings {
    #[serde(default = "default_solar_system_path")]
    pub solar_system_path: PathBuf,
}

/// Kepler solver selected in the config file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeplerSolverKind {
    #[default]
    NewtonRaphson,
    SingleStep,
}

/// Orbital engine settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineSettings {
    /// GM of the central mass in m³/s²
    #[serde(default = "default_gravitational_parameter")]
    pub gravitational_parameter: f64,
    #[serde(default)]
    pub kepler_solver: KeplerSolverKind,
    #[serde(default = "default_kepler_max_iterations")]
    pub kepler_max_iterations: u32,
    #[serde(default = "default_kepler_tolerance")]
    pub kepler_tolerance: f64,
    #[serde(default = "default_max_frames")]
    pub max_frames: usize,
    #[serde(default = "default_simulation_timeout_secs")]
    pub simulation_timeout_secs: u64,
    /// Orbit path resolution when the request gives none
    #[serde(default = "default_resolution")]
    pub default_resolution: usize,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_body_limit_bytes() -> usize {
    1024 * 1024
}

fn default_solar_system_path() -> PathBuf {
    PathBuf::from("data").join(crate::catalog::DATA_FILE_NAME)
}

fn default_gravitational_parameter() -> f64 {
    SUN_GRAVITATIONAL_PARAMETER
}

fn default_kepler_max_iterations() -> u32 {
    KeplerSolver::DEFAULT_MAX_ITERATIONS
}

fn default_kepler_tolerance() -> f64 {
    KeplerSolver::DEFAULT_TOLERANCE
}

fn default_max_frames() -> usize {
    SimulationLimits::default().max_frames
}

fn default_simulation_timeout_secs() -> u64 {
    30
}

fn default_resolution() -> usize {
    DEFAULT_RESOLUTION
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            body_limit_bytes: default_body_limit_bytes(),
        }
    }
}

impl Default for DataSettings {
    fn default() -> Self {
        Self {
            solar_system_path: default_solar_system_path(),
        }
    }
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            gravitational_parameter: default_gravitational_parameter(),
            kepler_solver: KeplerSolverKind::default(),
            kepler_max_iterations: default_kepler_max_iterations(),
            kepler_tolerance: default_kepler_tolerance(),
            max_frames: default_max_frames(),
            simulation_timeout_secs: default_simulation_timeout_secs(),
            default_resolution: default_resolution(),
        }
    }
}

impl EngineSettings {
    /// Check ranges and build the engine configuration.
    pub fn to_engine_config(&self) -> Result<EngineConfig, ConfigError> {
        if !self.gravitational_parameter.is_finite() || self.gravitational_parameter <= 0.0 {
            return Err(ConfigError::invalid(
                "engine.gravitational_parameter",
                format!("must be positive, got {}", self.gravitational_parameter),
            ));
        }
        if !self.kepler_tolerance.is_finite() || self.kepler_tolerance <= 0.0 {
            return Err(ConfigError::invalid(
                "engine.kepler_tolerance",
                format!("must be positive, got {}", self.kepler_tolerance),
            ));
        }
        if self.kepler_max_iterations > KeplerSolver::MAX_ITERATIONS {
            return Err(ConfigError::invalid(
                "engine.kepler_max_iterations",
                format!(
                    "cannot exceed {}, got {}",
                    KeplerSolver::MAX_ITERATIONS,
                    self.kepler_max_iterations
                ),
            ));
        }
        if self.max_frames == 0 {
            return Err(ConfigError::invalid("engine.max_frames", "must be at least 1"));
        }
        if !(MIN_RESOLUTION..=MAX_RESOLUTION).contains(&self.default_resolution) {
            return Err(ConfigError::invalid(
                "engine.default_resolution",
                format!(
                    "must be between {} and {}, got {}",
                    MIN_RESOLUTION, MAX_RESOLUTION, self.default_resolution
                ),
            ));
        }

        let kepler_solver = match self.kepler_solver {
            KeplerSolverKind::SingleStep => KeplerSolver::SingleStep,
            KeplerSolverKind::NewtonRaphson => KeplerSolver::NewtonRaphson {
                max_iterations: self.kepler_max_iterations,
                tolerance: self.kepler_tolerance,
            },
        };

        Ok(EngineConfig {
            kepler_solver,
            gravitational_parameter: self.gravitational_parameter,
            orientation: OrientationModel::Rendering,
            limits: SimulationLimits {
                max_frames: self.max_frames,
                ..SimulationLimits::default()
            },
        })
    }

    pub fn simulation_timeout(&self) -> Duration {
        Duration::from_secs(self.simulation_timeout_secs)
    }
}

impl AppConfig {
    /// Parse configuration from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            path: "<string>".to_string(),
            message: e.to_string(),
        })
    }

    /// Load configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    /// Locate the config file.
    ///
    /// `EXOPLANET_CONFIG` wins when set. Otherwise searches for `exoplanet.toml` in:
    /// 1. Current directory
    /// 2. `backend/` directory
    /// 3. Parent directory
    pub fn find_config_file() -> Option<PathBuf> {
        if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
            return Some(PathBuf::from(path));
        }

        [
            PathBuf::from(CONFIG_FILE_NAME),
            Path::new("backend").join(CONFIG_FILE_NAME),
            Path::new("..").join(CONFIG_FILE_NAME),
        ]
        .into_iter()
        .find(|path| path.exists())
    }

    /// Load from the default location (or defaults), then apply env overrides.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = match Self::find_config_file() {
            Some(path) => {
                info!(path = %path.display(), "Loading configuration file");
                Self::from_file(&path)?
            }
            None => {
                warn!("No {} found, using default configuration", CONFIG_FILE_NAME);
                Self::default()
            }
        };
        config.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Apply `HOST`, `PORT` and `SOLAR_SYSTEM_DATA` from `lookup`.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("PORT") {
            self.server.port = port
                .parse()
                .map_err(|_| ConfigError::invalid("PORT", format!("not a port number: {}", port)))?;
        }
        if let Some(path) = lookup("SOLAR_SYSTEM_DATA") {
            self.data.solar_system_path = PathBuf::from(path);
        }
        Ok(())
    }

    pub fn engine_config(&self) -> Result<EngineConfig, ConfigError> {
        self.engine.to_engine_config()
    }

    /// `host:port` string for binding.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = AppConfig::from_toml_str("").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.server.body_limit_bytes, 1024 * 1024);
        assert_eq!(
            config.data.solar_system_path,
            PathBuf::from("data/solar_system_data.json")
        );
        assert_eq!(config.engine.default_resolution, 360);
    }

    #[test]
    fn test_partial_config() {
        let toml = r#"
[server]
port = 9001

[engine]
kepler_solver = "single_step"
max_frames = 500
"#;
        let config = AppConfig::from_toml_str(toml).unwrap();
        assert_eq!(config.server.port, 9001);
        assert_eq!(config.server.host, "0.0.0.0");

        let engine = config.engine_config().unwrap();
        assert_eq!(engine.kepler_solver, KeplerSolver::SingleStep);
        assert_eq!(engine.limits.max_frames, 500);
        assert_eq!(engine.limits.max_range_days, 36525.0);
    }

    #[test]
    fn test_default_engine_config_is_converged() {
        let engine = AppConfig::default().engine_config().unwrap();
        assert_eq!(engine, EngineConfig::default());
    }

    #[test]
    fn test_unknown_solver_rejected() {
        let err = AppConfig::from_toml_str("[engine]\nkepler_solver = \"bisection\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_invalid_engine_values() {
        let mut settings = EngineSettings {
            kepler_tolerance: 0.0,
            ..EngineSettings::default()
        };
        assert!(settings.to_engine_config().is_err());

        settings.kepler_tolerance = 1e-9;
        settings.kepler_max_iterations = KeplerSolver::MAX_ITERATIONS + 1;
        let err = settings.to_engine_config().unwrap_err();
        assert!(err.to_string().contains("engine.kepler_max_iterations"));

        settings.kepler_max_iterations = KeplerSolver::MAX_ITERATIONS;
        assert!(settings.to_engine_config().is_ok());

        settings.default_resolution = 10;
        let err = settings.to_engine_config().unwrap_err();
        assert!(err.to_string().contains("engine.default_resolution"));
    }

    #[test]
    fn test_overrides() {
        let mut config = AppConfig::default();
        config
            .apply_overrides(|key| match key {
                "HOST" => Some("127.0.0.1".to_string()),
                "PORT" => Some("3000".to_string()),
                "SOLAR_SYSTEM_DATA" => Some("/srv/data.json".to_string()),
                _ => None,
            })
            .unwrap();
        assert_eq!(config.bind_address(), "127.0.0.1:3000");
        assert_eq!(config.data.solar_system_path, PathBuf::from("/srv/data.json"));
    }

    #[test]
    fn test_bad_port_override() {
        let mut config = AppConfig::default();
        let err = config
            .apply_overrides(|key| (key == "PORT").then(|| "eighty".to_string()))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { .. }));
    }
}
