// src/remote/transport.rs

//! The SSH transport: execute one compound command on one host.
//!
//! [`Transport`] is the seam the launcher, scanner and terminator sit on, so
//! tests (and, some day, something better than shell scraping) can substitute
//! a double without touching those components. The real implementation,
//! [`SshTransport`], shells out to `ssh` with `tokio::process::Command` and
//! assumes key-based auth for the configured service identity is already in
//! place.

use std::future::Future;
use std::pin::Pin;
use std::process::Stdio;

use tracing::debug;

use crate::config::model::FleetSection;
use crate::errors::{PlaymakerError, Result};

/// Boxed future returned by transport methods.
pub type TransportFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T>> + Send + 'a>>;

/// Handle to the local leg of a detached launch.
///
/// The pid is the *local* ssh process, not the remote job's: the remote work
/// is backgrounded and detached, so the local leg exits as soon as the
/// connection is established and the chain is handed off.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LaunchedSession {
    pub pid: u32,
}

/// Execute compound shell commands on named hosts.
///
/// Hosts are logical names; the implementation resolves them to addresses.
/// Every method is one blocking round trip — callers issue them one at a
/// time, in host order.
pub trait Transport: Send + Sync {
    /// Launch a detached chain: `ssh -f <addr> <remote_command>`.
    ///
    /// Resolves once the local leg has exited. A non-zero local exit means
    /// the connection itself failed.
    fn launch_detached<'a>(
        &'a self,
        host: &'a str,
        remote_command: &'a str,
    ) -> TransportFuture<'a, LaunchedSession>;

    /// Run a command remotely and capture its combined stdout.
    fn capture<'a>(&'a self, host: &'a str, remote_command: &'a str)
    -> TransportFuture<'a, String>;

    /// Fire a short remote command, caring only about success.
    fn run<'a>(&'a self, host: &'a str, remote_command: &'a str) -> TransportFuture<'a, ()>;
}

/// The real transport: an `ssh` subprocess per round trip.
#[derive(Debug, Clone)]
pub struct SshTransport {
    fleet: FleetSection,
}

impl SshTransport {
    pub fn new(fleet: FleetSection) -> Self {
        Self { fleet }
    }

    fn command(&self, host: &str, detach: bool, remote_command: &str) -> tokio::process::Command {
        let mut cmd = tokio::process::Command::new("ssh");
        if detach {
            cmd.arg("-f");
        }
        cmd.arg(self.fleet.address(host));
        cmd.arg(remote_command);
        cmd
    }
}

impl Transport for SshTransport {
    fn launch_detached<'a>(
        &'a self,
        host: &'a str,
        remote_command: &'a str,
    ) -> TransportFuture<'a, LaunchedSession> {
        Box::pin(async move {
            debug!(host, remote_command, "launching detached session");
            let mut cmd = self.command(host, true, remote_command);
            cmd.stdin(Stdio::null());

            let mut child = cmd
                .spawn()
                .map_err(|e| PlaymakerError::transport(host, format!("spawning ssh: {e}")))?;

            let pid = child.id().unwrap_or(0);

            // `ssh -f` returns as soon as the remote chain is backgrounded;
            // this wait is the quick local leg, not the job.
            let status = child
                .wait()
                .await
                .map_err(|e| PlaymakerError::transport(host, format!("waiting for ssh: {e}")))?;

            if !status.success() {
                return Err(PlaymakerError::transport(
                    host,
                    format!("ssh exited with {status}"),
                ));
            }

            Ok(LaunchedSession { pid })
        })
    }

    fn capture<'a>(
        &'a self,
        host: &'a str,
        remote_command: &'a str,
    ) -> TransportFuture<'a, String> {
        Box::pin(async move {
            debug!(host, remote_command, "capturing remote output");
            let output = self
                .command(host, false, remote_command)
                .stdin(Stdio::null())
                .stdout(Stdio::piped())
                .stderr(Stdio::null())
                .output()
                .await
                .map_err(|e| PlaymakerError::transport(host, format!("running ssh: {e}")))?;

            // No exit-status check: a `grep` with zero matches exits 1, and
            // an empty listing is a legitimate answer.
            Ok(String::from_utf8_lossy(&output.stdout).into_owned())
        })
    }

    fn run<'a>(&'a self, host: &'a str, remote_command: &'a str) -> TransportFuture<'a, ()> {
        Box::pin(async move {
            debug!(host, remote_command, "running remote command");
            let status = self
                .command(host, false, remote_command)
                .stdin(Stdio::null())
                .status()
                .await
                .map_err(|e| PlaymakerError::transport(host, format!("running ssh: {e}")))?;

            if !status.success() {
                return Err(PlaymakerError::transport(
                    host,
                    format!("remote command exited with {status}"),
                ));
            }
            Ok(())
        })
    }
}
