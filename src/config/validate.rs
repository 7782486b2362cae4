// src/config/validate.rs

use crate::bind::BindingMode;
use crate::config::model::{FleetConfig, JobSpec};
use crate::errors::{PlaymakerError, Result};

/// Run semantic validation against a loaded fleet config.
pub fn validate_fleet_config(cfg: &FleetConfig) -> Result<()> {
    if cfg.fleet.hosts.is_empty() {
        return Err(PlaymakerError::config(
            "[fleet].hosts must list at least one host",
        ));
    }
    if cfg.fleet.user.trim().is_empty() {
        return Err(PlaymakerError::config("[fleet].user must not be empty"));
    }
    if cfg.fleet.interpreter.trim().is_empty() {
        return Err(PlaymakerError::config(
            "[fleet].interpreter must not be empty",
        ));
    }
    Ok(())
}

/// Run semantic validation against a loaded job spec.
///
/// This checks everything binding relies on:
/// - `script` and `hosts` are present and non-empty
/// - parameter keys are homogeneous (all flags or all positional indices)
/// - every value list has the same length
/// - that length equals the host count
///
/// The original tool silently skipped hosts beyond the shortest value list;
/// here a mismatch is a hard `Config` error before any host is contacted.
/// The bare-script escape hatch (empty table or any empty value list) is
/// honoured first and skips the parameter checks entirely.
pub fn validate_job_spec(spec: &JobSpec, _fleet: &FleetConfig) -> Result<()> {
    ensure_required_fields(spec)?;

    if !spec.has_usable_parameters() {
        return Ok(());
    }

    // Detection fails on mixed key modes.
    BindingMode::detect(spec.parameters.keys().map(|k| k.as_str()))?;

    validate_value_lengths(spec)?;
    Ok(())
}

fn ensure_required_fields(spec: &JobSpec) -> Result<()> {
    if spec.script.trim().is_empty() {
        return Err(PlaymakerError::config("job spec needs a `script`"));
    }
    if spec.hosts.is_empty() {
        return Err(PlaymakerError::config(
            "job spec needs at least one entry in `hosts`",
        ));
    }
    Ok(())
}

fn validate_value_lengths(spec: &JobSpec) -> Result<()> {
    let expected = spec.hosts.len();
    for (key, vals) in spec.parameters.iter() {
        if vals.len() != expected {
            return Err(PlaymakerError::config(format!(
                "parameter '{}' has {} value(s) but the spec lists {} host(s)",
                key,
                vals.len(),
                expected
            )));
        }
    }
    Ok(())
}
