#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use exoplanet_ai::catalog::SolarSystemCatalog;

static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Path of the bundled reference data.
pub fn data_file() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("data")
        .join("solar_system_data.json")
}

/// The bundled catalog.
pub fn catalog() -> Arc<SolarSystemCatalog> {
    Arc::new(SolarSystemCatalog::from_file(data_file()).expect("bundled catalog should load"))
}

/// Runs `f` with the given environment variables set (`Some`) or removed (`None`).
///
/// Holds a process-wide lock for the duration and restores the previous
/// values afterwards, even if `f` panics.
pub fn with_scoped_env<F, R>(changes: &[(&str, Option<&str>)], f: F) -> R
where
    F: FnOnce() -> R,
{
    let _lock = ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    let _restore = EnvRestore::apply(changes);
    f()
}

struct EnvRestore {
    previous: Vec<(String, Option<String>)>,
}

impl EnvRestore {
    fn apply(changes: &[(&str, Option<&str>)]) -> Self {
        let previous = changes
            .iter()
            .map(|(key, _)| (key.to_string(), std::env::var(key).ok()))
            .collect();

        for (key, value) in changes {
            match value {
                Some(value) => std::env::set_var(key, value),
                None => std::env::remove_var(key),
            }
        }

        Self { previous }
    }
}

impl Drop for EnvRestore {
    fn drop(&mut self) {
        // reverse order so a key listed twice ends at its original value
        for (key, value) in self.previous.drain(..).rev() {
            match value {
                Some(value) => std::env::set_var(&key, value),
                None => std::env::remove_var(&key),
            }
        }
    }
}
