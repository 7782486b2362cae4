// src/cli.rs

//! CLI argument parsing using `clap`.
//!
//! The surface is deliberately flat (no subcommands):
//!
//! ```text
//! playmaker --conf jobs/crawl.toml           # distribute a job spec
//! playmaker --script fetch.py                # status of fetch.py on every host
//! playmaker --host serenity                  # status of everything on one host
//! playmaker --script fetch.py --host serenity
//! playmaker --script fetch.py --kill         # kill matching jobs everywhere
//! ```

use clap::{Parser, ValueEnum};

/// Command-line arguments for `playmaker`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "playmaker",
    version,
    about = "Distribute scripts to a pool of remote hosts, then check on or kill them.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the fleet config file (TOML).
    ///
    /// Default: `Playmaker.toml` in the current working directory.
    #[arg(long, value_name = "PATH", default_value = "Playmaker.toml")]
    pub config: String,

    /// Path to a job spec file (TOML); launches the job on its hosts.
    ///
    /// When given, `--kill` is ignored: a single invocation either launches
    /// or kills, never both.
    #[arg(long, value_name = "PATH")]
    pub conf: Option<String>,

    /// Script name to filter status/kill by (e.g. `fetch.py`).
    #[arg(long, value_name = "NAME")]
    pub script: Option<String>,

    /// Host to restrict status/kill to; default is every fleet host.
    #[arg(long, value_name = "HOST")]
    pub host: Option<String>,

    /// Kill matching jobs instead of reporting their status.
    #[arg(long)]
    pub kill: bool,

    /// With --conf: bind and print the per-host commands, touch no host.
    #[arg(long)]
    pub dry_run: bool,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `PLAYMAKER_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
