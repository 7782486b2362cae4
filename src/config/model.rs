// src/config/model.rs

use std::collections::BTreeMap;

use serde::Deserialize;

/// Fleet-wide configuration as read from `Playmaker.toml`.
///
/// This replaces what used to be hard-coded constants (host list, SSH user,
/// paths on the remote side) so the same binary can drive different fleets:
///
/// ```toml
/// [fleet]
/// hosts = ["epiphyte", "enterprise", "serenity"]
/// user = "mciot"
/// domain = ".cs.mcgill.ca"
/// env_file = "./reddit"
///
/// [notify]
/// command = "python notify.py"
/// recipient = "ops@example.com"
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct FleetConfig {
    /// Host pool and remote-side layout from `[fleet]`.
    pub fleet: FleetSection,

    /// Notification collaborator settings from `[notify]`.
    #[serde(default)]
    pub notify: NotifySection,
}

/// `[fleet]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct FleetSection {
    /// Logical host names, in the order status/kill sweeps visit them.
    /// The same host may appear twice; a distribute then runs two copies
    /// of the job on it.
    pub hosts: Vec<String>,

    /// Service identity the SSH connections run as. Key-based auth is
    /// assumed to be set up out of band; no credential is handled here.
    pub user: String,

    /// Suffix appended to a logical host name to form the SSH address
    /// (e.g. `".cs.mcgill.ca"`). May be empty.
    #[serde(default)]
    pub domain: String,

    /// Remote file sourced at the start of every session.
    #[serde(default = "default_env_file")]
    pub env_file: String,

    /// Remote directory the scripts live in; sessions `cd` here first.
    #[serde(default = "default_src_dir")]
    pub src_dir: String,

    /// Interpreter the scripts run under. The process scanner greps for
    /// this same token, so the two always agree.
    #[serde(default = "default_interpreter")]
    pub interpreter: String,

    /// Filename suffix of the scripts (log names cut the command off at this
    /// suffix to recover the script base).
    #[serde(default = "default_script_suffix")]
    pub script_suffix: String,

    /// Remote log directory, relative to the project root (one level above
    /// `src_dir`). A job spec's `log-override` takes precedence.
    #[serde(default = "default_log_dir")]
    pub log_dir: String,

    /// Local directory the day-stamped job registry files are written to.
    #[serde(default = "default_jobs_dir")]
    pub jobs_dir: String,
}

fn default_env_file() -> String {
    "./env".to_string()
}

fn default_src_dir() -> String {
    "src".to_string()
}

fn default_interpreter() -> String {
    "python".to_string()
}

fn default_script_suffix() -> String {
    ".py".to_string()
}

fn default_log_dir() -> String {
    "logfiles".to_string()
}

fn default_jobs_dir() -> String {
    "jobs".to_string()
}

/// `[notify]` section.
///
/// The notifier itself is an external collaborator; all we need is the
/// command to invoke it with. It is called as
/// `<command> <recipient> <job label> <host>` at the end of the remote chain.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct NotifySection {
    /// Command prefix for the notifier (e.g. `"python notify.py"`).
    #[serde(default)]
    pub command: String,

    /// Address the notifier should deliver to.
    #[serde(default)]
    pub recipient: String,
}

impl FleetSection {
    /// SSH address for a logical host name: `user@<host><domain>`.
    pub fn address(&self, host: &str) -> String {
        format!("{}@{}{}", self.user, host, self.domain)
    }
}

/// A job spec as read from the `--conf` TOML file. Immutable once loaded.
///
/// ```toml
/// script = "fetch.py"
/// hosts = ["epiphyte", "serenity"]
/// notify = true
/// data-root = "proj"
///
/// [parameters]
/// "--in" = ["a.csv", "b.csv"]
/// "--mode" = ["^fast", "^slow"]
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct JobSpec {
    /// Script to run, relative to the fleet's `src_dir`.
    pub script: String,

    /// Hosts to run on, in launch order. `servers` is accepted as an alias.
    #[serde(alias = "servers")]
    pub hosts: Vec<String>,

    /// Parameter table: each key maps to one value per host, positionally.
    ///
    /// Keys are either flag names (`--in`) or 1-based positional indices
    /// (`"1"`, `"2"`), never a mix. Named arguments are emitted in the
    /// map's sorted key order.
    #[serde(default)]
    pub parameters: BTreeMap<String, Vec<String>>,

    /// Chain a notification step after the script on each host.
    #[serde(default)]
    pub notify: bool,

    /// Overrides the fleet's remote log directory for this job.
    #[serde(default, rename = "log-override")]
    pub log_override: Option<String>,

    /// Subdirectory of the shared data root that non-literal parameter
    /// values resolve against.
    #[serde(default, rename = "data-root")]
    pub data_root: Option<String>,
}

impl JobSpec {
    /// Whether the parameter table actually binds anything.
    ///
    /// An empty table, or any key with a zero-length value list, means the
    /// script runs bare on every host.
    pub fn has_usable_parameters(&self) -> bool {
        !self.parameters.is_empty() && self.parameters.values().all(|vals| !vals.is_empty())
    }

    /// Remote log directory for this job, given the fleet default.
    pub fn effective_log_dir<'a>(&'a self, fleet: &'a FleetSection) -> &'a str {
        self.log_override.as_deref().unwrap_or(&fleet.log_dir)
    }

    /// Data-root prefix as seen from inside `src_dir`: `../data/<data-root>`.
    pub fn data_root_prefix(&self) -> String {
        let root = self.data_root.as_deref().unwrap_or("");
        join_remote_path(&join_remote_path("..", "data"), root)
    }
}

/// Join two segments of a remote POSIX path.
///
/// An absolute `tail` replaces `head` outright, matching what the remote
/// shell would resolve.
pub fn join_remote_path(head: &str, tail: &str) -> String {
    if tail.starts_with('/') {
        return tail.to_string();
    }
    if tail.is_empty() {
        return head.to_string();
    }
    if head.is_empty() {
        return tail.to_string();
    }
    format!("{}/{}", head.trim_end_matches('/'), tail)
}
