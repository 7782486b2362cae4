// src/config/mod.rs

//! Configuration loading and validation for playmaker.
//!
//! Responsibilities:
//! - Define the TOML-backed data model (`model.rs`): the fleet config and
//!   the per-launch job spec.
//! - Load both documents from disk (`loader.rs`).
//! - Validate the invariants that make a job spec bindable (`validate.rs`).

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{load_fleet_config, load_job_spec};
pub use model::{FleetConfig, FleetSection, JobSpec, NotifySection};
pub use validate::{validate_fleet_config, validate_job_spec};
