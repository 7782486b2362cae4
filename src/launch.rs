// src/launch.rs

//! The launcher: turn a validated job spec into one detached remote process
//! per host, recording every launch.
//!
//! Strictly sequential: each host's round trip is awaited before the next
//! begins, so registry entries land in host-list order. A failed host is
//! recorded and skipped; it never aborts the rest of the batch.

use chrono::Local;
use tracing::{info, warn};

use crate::bind::{BoundCommand, bind};
use crate::config::model::{FleetConfig, JobSpec};
use crate::errors::{PlaymakerError, Result};
use crate::registry::{JobRegistry, RegistryEntry};
use crate::remote::command::{
    detached_chain, log_file_name, log_file_path, notify_step, remote_invocation, script_base,
};
use crate::remote::transport::Transport;

/// One successful launch.
#[derive(Debug, Clone)]
pub struct HostLaunch {
    pub host: String,
    pub command: BoundCommand,
    /// Pid of the local connection leg (the remote pid is not observable
    /// from a detached launch).
    pub local_pid: u32,
}

/// One host that could not be reached.
#[derive(Debug, Clone)]
pub struct HostFailure {
    pub host: String,
    pub command: BoundCommand,
    pub error: String,
}

/// Aggregate outcome of a distribute: what launched, what didn't.
#[derive(Debug, Clone, Default)]
pub struct LaunchReport {
    pub launched: Vec<HostLaunch>,
    pub failed: Vec<HostFailure>,
}

/// Distributes a job spec across its hosts over a [`Transport`].
pub struct Launcher<'a, T: Transport + ?Sized> {
    transport: &'a T,
    config: &'a FleetConfig,
    registry: JobRegistry,
}

impl<'a, T: Transport + ?Sized> Launcher<'a, T> {
    pub fn new(transport: &'a T, config: &'a FleetConfig, registry: JobRegistry) -> Self {
        Self {
            transport,
            config,
            registry,
        }
    }

    /// The `(host, command)` pairs a spec will run, in launch order.
    ///
    /// A spec without usable parameters runs the bare script on every host;
    /// otherwise host i gets the i-th bound command. Also what `--dry-run`
    /// prints.
    pub fn plan(&self, spec: &JobSpec) -> Result<Vec<(String, BoundCommand)>> {
        let commands = if spec.has_usable_parameters() {
            let bound = bind(&spec.script, &spec.parameters, &spec.data_root_prefix())?;
            if bound.len() != spec.hosts.len() {
                // Validation enforces this up front; a mismatch here means
                // the spec bypassed it.
                return Err(PlaymakerError::config(format!(
                    "{} bound command(s) for {} host(s)",
                    bound.len(),
                    spec.hosts.len()
                )));
            }
            bound
        } else {
            info!(script = %spec.script, "no usable parameters, running script bare");
            vec![spec.script.clone(); spec.hosts.len()]
        };

        Ok(spec.hosts.iter().cloned().zip(commands).collect())
    }

    /// Launch the spec on every host, appending a registry entry per
    /// success. Transport failures are collected into the report; config
    /// errors abort before any host is touched.
    pub async fn distribute(&self, spec: &JobSpec) -> Result<LaunchReport> {
        let plan = self.plan(spec)?;
        let fleet = &self.config.fleet;
        let log_dir = spec.effective_log_dir(fleet);

        let mut report = LaunchReport::default();
        for (host, command) in plan {
            let now = Local::now();
            let log_file = log_file_path(
                log_dir,
                &log_file_name(&command, &host, &fleet.script_suffix, now),
            );

            let notify = spec.notify.then(|| {
                notify_step(
                    &self.config.notify,
                    script_base(&command, &fleet.script_suffix),
                    &host,
                )
            });

            let chain = detached_chain(fleet, &command, &log_file, notify);
            let remote = remote_invocation(&chain);

            match self.transport.launch_detached(&host, &remote).await {
                Ok(session) => {
                    self.registry.append(&RegistryEntry {
                        at: now,
                        pid: session.pid,
                        script: spec.script.clone(),
                        host: host.clone(),
                    })?;
                    info!(host = %host, cmd = %command, pid = session.pid, "launched");
                    report.launched.push(HostLaunch {
                        host,
                        command,
                        local_pid: session.pid,
                    });
                }
                Err(err) => {
                    warn!(host = %host, %err, "launch failed, continuing with remaining hosts");
                    report.failed.push(HostFailure {
                        host,
                        command,
                        error: err.to_string(),
                    });
                }
            }
        }

        Ok(report)
    }
}
