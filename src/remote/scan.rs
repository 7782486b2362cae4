// src/remote/scan.rs

//! Live process discovery: query a host's process list and keep the lines
//! that look like our jobs.
//!
//! This is best-effort text scraping of `ps` output, not an authoritative
//! registry: a job absent from a scan may have completed, or the scan may
//! simply have missed it. Lines that don't parse are skipped, never fatal.

use tracing::debug;

use crate::config::model::FleetSection;
use crate::errors::{PlaymakerError, Result};
use crate::remote::command::process_list_query;
use crate::remote::transport::Transport;

/// One matching process on a remote host, reconstructed from a listing line.
/// Transient: no identity beyond the remote OS's own pid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteProcessRecord {
    pub pid: u32,
    pub command: String,
}

/// Scans hosts for processes matching a script, or everything owned by the
/// service identity.
pub struct ProcessScanner<'a, T: Transport + ?Sized> {
    transport: &'a T,
    fleet: &'a FleetSection,
}

impl<'a, T: Transport + ?Sized> ProcessScanner<'a, T> {
    pub fn new(transport: &'a T, fleet: &'a FleetSection) -> Self {
        Self { transport, fleet }
    }

    /// List matching jobs on one host.
    ///
    /// With a `script_filter`, matches lines containing the interpreter
    /// invocation of that script (case-insensitively, via the remote
    /// `grep -i`); without one, everything owned by the fleet user.
    pub async fn scan(
        &self,
        host: &str,
        script_filter: Option<&str>,
    ) -> Result<Vec<RemoteProcessRecord>> {
        let query = process_list_query(self.fleet, script_filter);
        let listing = self.transport.capture(host, &query).await?;

        let mut records = Vec::new();
        for line in listing.lines() {
            if line.trim().is_empty() {
                continue;
            }
            // The query's own machinery shows up in its result; drop it.
            if line.contains("grep -i") || line.contains("sh -c") {
                continue;
            }
            match parse_listing_line(line, &self.fleet.interpreter) {
                Ok(record) => records.push(record),
                Err(err) => {
                    debug!(host, %err, "skipping listing line");
                }
            }
        }

        if records.is_empty() {
            debug!(host, ?script_filter, "scan found no matching jobs");
        }
        Ok(records)
    }
}

/// Parse one `ps` line: first whitespace token is the pid, and the command
/// is reconstructed from the interpreter token onward.
fn parse_listing_line(line: &str, interpreter: &str) -> Result<RemoteProcessRecord> {
    let pid_token = line
        .split_whitespace()
        .next()
        .ok_or_else(|| PlaymakerError::ScanParse(line.to_string()))?;
    let pid: u32 = pid_token
        .parse()
        .map_err(|_| PlaymakerError::ScanParse(line.to_string()))?;

    let command = line
        .find(interpreter)
        .map(|idx| line[idx..].trim_end().to_string())
        .ok_or_else(|| PlaymakerError::ScanParse(line.to_string()))?;

    Ok(RemoteProcessRecord { pid, command })
}
