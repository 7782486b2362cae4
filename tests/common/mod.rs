#![allow(dead_code)]

//! Shared test doubles: a recording in-memory `Transport`.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use playmaker::errors::PlaymakerError;
use playmaker::remote::transport::{LaunchedSession, Transport, TransportFuture};

/// One observed transport call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Launch { host: String, command: String },
    Capture { host: String, command: String },
    Run { host: String, command: String },
}

/// A fake transport that:
/// - records every call it receives
/// - hands out canned process listings per host
/// - fails launches on configured hosts and kills on configured pids
/// - assigns incrementing local pids to successful launches.
#[derive(Debug, Clone)]
pub struct FakeTransport {
    pub calls: Arc<Mutex<Vec<Call>>>,
    listings: Arc<Mutex<HashMap<String, String>>>,
    failing_hosts: Arc<Mutex<Vec<String>>>,
    failing_pids: Arc<Mutex<Vec<u32>>>,
    next_pid: Arc<Mutex<u32>>,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
            listings: Arc::new(Mutex::new(HashMap::new())),
            failing_hosts: Arc::new(Mutex::new(Vec::new())),
            failing_pids: Arc::new(Mutex::new(Vec::new())),
            next_pid: Arc::new(Mutex::new(1000)),
        }
    }

    /// Canned `capture` output for a host.
    pub fn set_listing(&self, host: &str, listing: &str) {
        self.listings
            .lock()
            .unwrap()
            .insert(host.to_string(), listing.to_string());
    }

    /// Make `launch_detached` fail for a host.
    pub fn fail_launches_on(&self, host: &str) {
        self.failing_hosts.lock().unwrap().push(host.to_string());
    }

    /// Make `run` fail for a `kill <pid>` of this pid.
    pub fn fail_kill_of(&self, pid: u32) {
        self.failing_pids.lock().unwrap().push(pid);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

impl Transport for FakeTransport {
    fn launch_detached<'a>(
        &'a self,
        host: &'a str,
        remote_command: &'a str,
    ) -> TransportFuture<'a, LaunchedSession> {
        Box::pin(async move {
            self.record(Call::Launch {
                host: host.to_string(),
                command: remote_command.to_string(),
            });

            if self.failing_hosts.lock().unwrap().contains(&host.to_string()) {
                return Err(PlaymakerError::transport(host, "connection refused"));
            }

            let mut next = self.next_pid.lock().unwrap();
            *next += 1;
            Ok(LaunchedSession { pid: *next })
        })
    }

    fn capture<'a>(
        &'a self,
        host: &'a str,
        remote_command: &'a str,
    ) -> TransportFuture<'a, String> {
        Box::pin(async move {
            self.record(Call::Capture {
                host: host.to_string(),
                command: remote_command.to_string(),
            });

            Ok(self
                .listings
                .lock()
                .unwrap()
                .get(host)
                .cloned()
                .unwrap_or_default())
        })
    }

    fn run<'a>(&'a self, host: &'a str, remote_command: &'a str) -> TransportFuture<'a, ()> {
        Box::pin(async move {
            self.record(Call::Run {
                host: host.to_string(),
                command: remote_command.to_string(),
            });

            let failing = self.failing_pids.lock().unwrap();
            for pid in failing.iter() {
                if remote_command == format!("kill {pid}") {
                    return Err(PlaymakerError::Termination {
                        host: host.to_string(),
                        pid: *pid,
                        message: "no such process".to_string(),
                    });
                }
            }
            Ok(())
        })
    }
}

/// A fleet config pointing at three hosts, in the shape most tests want.
pub fn test_fleet_toml() -> &'static str {
    r#"
[fleet]
hosts = ["epiphyte", "enterprise", "serenity"]
user = "mciot"
domain = ".cs.mcgill.ca"
env_file = "./reddit"

[notify]
command = "python notify.py"
recipient = "ops@example.com"
"#
}
