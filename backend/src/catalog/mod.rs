//! Read-only reference data for the Sun and planets.
//!
//! The catalog is parsed once from `solar_system_data.json`, validated, and
//! then shared immutably (usually as `Arc<SolarSystemCatalog>`).

pub mod checksum;
pub mod error;

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, info};

use crate::models::{Planet, Sun};

pub use checksum::calculate_checksum;
pub use error::{CatalogError, CatalogResult, ErrorContext};

/// File name of the reference data.
pub const DATA_FILE_NAME: &str = "solar_system_data.json";

/// Locations searched by [`SolarSystemCatalog::from_default_location`], relative to the cwd.
const SEARCH_DIRS: &[&str] = &["data", "backend/data", "../data"];

#[derive(Debug, Deserialize)]
struct RawCatalog {
    sun: Sun,
    planets: Vec<Planet>,
    #[serde(default)]
    scale_info: serde_json::Value,
}

/// Sun, planets and display scale hints.
#[derive(Debug, Clone)]
pub struct SolarSystemCatalog {
    sun: Sun,
    /// Sorted by `order`
    planets: Vec<Planet>,
    scale_info: serde_json::Value,
    checksum: String,
}

impl SolarSystemCatalog {
    /// Parse and validate catalog JSON.
    pub fn from_json_str(content: &str) -> CatalogResult<Self> {
        let raw: RawCatalog = serde_json::from_str(content).map_err(|e| {
            CatalogError::parse(e.to_string(), ErrorContext::new("parse_catalog"))
        })?;

        let mut seen = HashSet::new();
        for planet in &raw.planets {
            planet.orbit.validate().map_err(|e| {
                CatalogError::validation(
                    e.to_string(),
                    ErrorContext::new("validate_catalog").with_body_id(&planet.id),
                )
            })?;
            if !seen.insert(planet.id.to_lowercase()) {
                return Err(CatalogError::validation(
                    "duplicate planet id",
                    ErrorContext::new("validate_catalog").with_body_id(&planet.id),
                ));
            }
        }

        let mut planets = raw.planets;
        planets.sort_by_key(|p| p.order);

        let checksum = calculate_checksum(content);
        debug!(planets = planets.len(), checksum = %checksum, "Parsed solar system catalog");

        Ok(Self {
            sun: raw.sun,
            planets,
            scale_info: raw.scale_info,
            checksum,
        })
    }

    /// Load the catalog from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> CatalogResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            CatalogError::io(
                e.to_string(),
                ErrorContext::new("load_catalog").with_path(path.display()),
            )
        })?;

        let catalog = Self::from_json_str(&content).map_err(|e| match e {
            CatalogError::Parse { message, context } => {
                CatalogError::parse(message, context.with_path(path.display()))
            }
            CatalogError::Validation { message, context } => {
                CatalogError::validation(message, context.with_path(path.display()))
            }
            other => other,
        })?;

        info!(
            path = %path.display(),
            planets = catalog.planets.len(),
            checksum = %catalog.checksum,
            "Loaded solar system catalog"
        );
        Ok(catalog)
    }

    /// Load the catalog from the first data directory that has one.
    pub fn from_default_location() -> CatalogResult<Self> {
        let path = Self::find_data_file().ok_or_else(|| {
            CatalogError::not_found(
                format!("{} not found", DATA_FILE_NAME),
                ErrorContext::new("load_catalog").with_details(format!(
                    "searched {}",
                    SEARCH_DIRS.join(", ")
                )),
            )
        })?;
        Self::from_file(path)
    }

    fn find_data_file() -> Option<PathBuf> {
        SEARCH_DIRS
            .iter()
            .map(|dir| Path::new(dir).join(DATA_FILE_NAME))
            .find(|path| path.is_file())
    }

    pub fn sun(&self) -> &Sun {
        &self.sun
    }

    pub fn planets(&self) -> &[Planet] {
        &self.planets
    }

    /// Planet by id, ignoring case.
    pub fn planet(&self, id: &str) -> Option<&Planet> {
        self.planets
            .iter()
            .find(|p| p.id.eq_ignore_ascii_case(id))
    }

    pub fn scale_info(&self) -> &serde_json::Value {
        &self.scale_info
    }

    /// SHA-256 of the source JSON, hex encoded.
    pub fn checksum(&self) -> &str {
        &self.checksum
    }

    pub fn len(&self) -> usize {
        self.planets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.planets.is_empty()
    }
}
