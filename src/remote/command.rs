// src/remote/command.rs

//! Templating of the compound shell strings executed on remote hosts.
//!
//! These are pure string builders; nothing here talks to the network. The
//! formats of the log-file name and the detached chain are compatibility
//! surfaces (existing tooling parses the `@`-separated log names), so the
//! exact shapes matter.

use chrono::{DateTime, Local};

use crate::config::model::{FleetSection, NotifySection, join_remote_path};

/// Timestamp used in log-file names, minute resolution.
///
/// Note the field order: year, then day, then month. Historical, but baked
/// into every existing log name.
pub const LOG_TIMESTAMP_FORMAT: &str = "%Y-%d-%m_%H:%M";

/// The script base of a bound command: everything up to the script suffix,
/// which drops the suffix itself and any arguments after it.
///
/// `"fetch.py --in proj/a.csv"` with suffix `".py"` gives `"fetch"`.
pub fn script_base<'a>(command: &'a str, suffix: &str) -> &'a str {
    match command.find(suffix) {
        Some(idx) => &command[..idx],
        None => command,
    }
}

/// Log-file name for one launch: `<scriptBase>@<host>@<YYYY-DD-MM_HH:MM>.log`.
///
/// Launches of the same script on the same host within the same minute get
/// the same name; the remote redirection opens the file in append mode, so
/// they interleave rather than clobber.
pub fn log_file_name(command: &str, host: &str, suffix: &str, at: DateTime<Local>) -> String {
    format!(
        "{}@{}@{}.log",
        script_base(command, suffix),
        host,
        at.format(LOG_TIMESTAMP_FORMAT)
    )
}

/// Full remote path of the log file, as seen from inside `src_dir`.
pub fn log_file_path(log_dir: &str, file_name: &str) -> String {
    join_remote_path(&join_remote_path("..", log_dir), file_name)
}

/// The chained notification step: `<command> <recipient> <job label> <host>`.
pub fn notify_step(notify: &NotifySection, job_label: &str, host: &str) -> String {
    format!(
        "{} {} {} {}",
        notify.command, notify.recipient, job_label, host
    )
}

/// Build the detached launch chain for one host.
///
/// The chain sources the project environment, moves into the script
/// directory, runs the command under `nohup` with both streams appended to
/// the log file, optionally chains the notification step, and backgrounds
/// the whole thing so the SSH session can exit immediately:
///
/// ```text
/// . ./reddit; cd src; nohup python fetch.py ... >> ../logfiles/f@h@ts.log
///     2>> ../logfiles/f@h@ts.log; python notify.py ops@x fetch h &
/// ```
pub fn detached_chain(
    fleet: &FleetSection,
    command: &str,
    log_file: &str,
    notify: Option<String>,
) -> String {
    let mut actions = vec![
        format!(". {}", fleet.env_file),
        format!("cd {}", fleet.src_dir),
        format!(
            "nohup {} {} >> {} 2>> {}",
            fleet.interpreter, command, log_file, log_file
        ),
    ];
    if let Some(step) = notify {
        actions.push(step);
    }

    let mut chain = actions.join("; ");
    chain.push_str(" &");
    chain
}

/// Wrap a chain for the remote shell: `sh -c '<chain>'`.
pub fn remote_invocation(chain: &str) -> String {
    format!("sh -c '{chain}'")
}

/// Process-list query for jobs matching a script, or for everything owned by
/// the service identity when no script is given.
pub fn process_list_query(fleet: &FleetSection, script_filter: Option<&str>) -> String {
    match script_filter {
        Some(script) => format!("ps ax | grep -i '{} {}'", fleet.interpreter, script),
        None => format!("ps ax | grep -i {}", fleet.user),
    }
}

/// Signal-send command for one pid.
pub fn kill_command(pid: u32) -> String {
    format!("kill {pid}")
}
