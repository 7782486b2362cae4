// src/remote/mod.rs

//! Everything that crosses the SSH boundary.
//!
//! - [`command`] builds the compound shell strings sent to a host: the
//!   detached launch chain, log-file names, process-list queries.
//! - [`transport`] owns the [`Transport`] trait and its `ssh`-subprocess
//!   implementation.
//! - [`scan`] turns a host's raw process listing into parsed job records.
//!
//! The transport's contract is deliberately narrow: execute one compound
//! command on one host. All multi-step remote orchestration (source the
//! environment, cd, nohup, notify, background) lives in the command
//! templates, so a different transport could be dropped in untouched.

pub mod command;
pub mod scan;
pub mod transport;

pub use scan::{ProcessScanner, RemoteProcessRecord};
pub use transport::{LaunchedSession, SshTransport, Transport};
