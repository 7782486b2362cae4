// src/kill.rs

//! The terminator: scan one host or the whole fleet for matching jobs and
//! send each matched pid a kill over a fresh connection.
//!
//! Every signal send is independent; a failed send is recorded and the rest
//! proceed. A host with zero matches is reported as such, distinctly from
//! send failures. None of it is confirmed: like the scan it builds on, this
//! is best-effort.

use tracing::{info, warn};

use crate::config::model::FleetSection;
use crate::errors::{PlaymakerError, Result};
use crate::remote::command::kill_command;
use crate::remote::scan::ProcessScanner;
use crate::remote::transport::Transport;

/// A signal send that failed, with the transport's reason.
#[derive(Debug, Clone)]
pub struct SignalFailure {
    pub pid: u32,
    pub error: String,
}

/// Outcome for one host of a kill sweep.
#[derive(Debug, Clone)]
pub struct HostKillOutcome {
    pub host: String,
    /// Pids that matched the scan, in listing order.
    pub matched: Vec<u32>,
    /// Pids whose kill was sent without a transport error.
    pub killed: Vec<u32>,
    pub failures: Vec<SignalFailure>,
    /// Set when the host could not even be scanned.
    pub scan_error: Option<String>,
}

impl HostKillOutcome {
    pub fn no_matches(&self) -> bool {
        self.matched.is_empty() && self.scan_error.is_none()
    }
}

/// Aggregate outcome of a kill sweep.
#[derive(Debug, Clone, Default)]
pub struct KillReport {
    pub hosts: Vec<HostKillOutcome>,
}

/// Kills matching jobs across the fleet over a [`Transport`].
pub struct Terminator<'a, T: Transport + ?Sized> {
    transport: &'a T,
    fleet: &'a FleetSection,
}

impl<'a, T: Transport + ?Sized> Terminator<'a, T> {
    pub fn new(transport: &'a T, fleet: &'a FleetSection) -> Self {
        Self { transport, fleet }
    }

    /// Kill jobs matching `script_filter` on `host`, or on every fleet host
    /// when no host is given. No filter means every job under the service
    /// identity.
    pub async fn kill(
        &self,
        script_filter: Option<&str>,
        host: Option<&str>,
    ) -> Result<KillReport> {
        let hosts: Vec<&str> = match host {
            Some(h) => vec![h],
            None => self.fleet.hosts.iter().map(|h| h.as_str()).collect(),
        };

        let scanner = ProcessScanner::new(self.transport, self.fleet);
        let mut report = KillReport::default();

        for host in hosts {
            report
                .hosts
                .push(self.kill_on_host(&scanner, host, script_filter).await);
        }
        Ok(report)
    }

    async fn kill_on_host(
        &self,
        scanner: &ProcessScanner<'a, T>,
        host: &str,
        script_filter: Option<&str>,
    ) -> HostKillOutcome {
        let mut outcome = HostKillOutcome {
            host: host.to_string(),
            matched: Vec::new(),
            killed: Vec::new(),
            failures: Vec::new(),
            scan_error: None,
        };

        let records = match scanner.scan(host, script_filter).await {
            Ok(records) => records,
            Err(err) => {
                warn!(host, %err, "scan failed, skipping host");
                outcome.scan_error = Some(err.to_string());
                return outcome;
            }
        };

        for record in records {
            outcome.matched.push(record.pid);
            match self.transport.run(host, &kill_command(record.pid)).await {
                Ok(()) => {
                    info!(host, pid = record.pid, cmd = %record.command, "killed");
                    outcome.killed.push(record.pid);
                }
                Err(err) => {
                    let failure = PlaymakerError::Termination {
                        host: host.to_string(),
                        pid: record.pid,
                        message: err.to_string(),
                    };
                    warn!(%failure, "kill failed, continuing");
                    outcome.failures.push(SignalFailure {
                        pid: record.pid,
                        error: failure.to_string(),
                    });
                }
            }
        }
        outcome
    }
}
