// src/config/loader.rs

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::config::model::{FleetConfig, JobSpec};
use crate::config::validate::{validate_fleet_config, validate_job_spec};
use crate::errors::Result;

/// Load and validate the fleet config (`Playmaker.toml` by default).
pub fn load_fleet_config(path: impl AsRef<Path>) -> Result<FleetConfig> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)
        .with_context(|| format!("reading fleet config at {:?}", path))?;

    let config: FleetConfig = toml::from_str(&contents)?;
    validate_fleet_config(&config)?;
    Ok(config)
}

/// Load a job spec from the `--conf` path and validate it against the fleet.
///
/// Validation covers everything that must hold before any host is touched:
/// required fields, homogeneous parameter keys, and value-list lengths
/// matching the host count. A spec that fails here has had no side effects.
pub fn load_job_spec(path: impl AsRef<Path>, fleet: &FleetConfig) -> Result<JobSpec> {
    let path = path.as_ref();
    let contents =
        fs::read_to_string(path).with_context(|| format!("reading job spec at {:?}", path))?;

    let spec: JobSpec = toml::from_str(&contents)?;
    validate_job_spec(&spec, fleet)?;
    Ok(spec)
}

/// Helper to resolve the default fleet config path.
///
/// Currently this just returns `Playmaker.toml` in the current working
/// directory; it exists so an env var or multi-location lookup can slot in
/// later without touching call sites.
pub fn default_config_path() -> PathBuf {
    PathBuf::from("Playmaker.toml")
}
