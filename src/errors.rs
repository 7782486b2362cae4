// src/errors.rs

//! Crate-wide error type and `Result` alias.
//!
//! Configuration problems are fatal and surface before any host is touched;
//! transport and termination problems are per-host/per-pid and are collected
//! into reports by the callers rather than propagated individually.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlaymakerError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("transport error on host '{host}': {message}")]
    Transport { host: String, message: String },

    #[error("unparseable process listing line: {0:?}")]
    ScanParse(String),

    #[error("failed to signal pid {pid} on host '{host}': {message}")]
    Termination {
        host: String,
        pid: u32,
        message: String,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PlaymakerError {
    /// Shorthand for a `Config` error from anything displayable.
    pub fn config(msg: impl Into<String>) -> Self {
        PlaymakerError::Config(msg.into())
    }

    /// Shorthand for a `Transport` error against a named host.
    pub fn transport(host: impl Into<String>, message: impl std::fmt::Display) -> Self {
        PlaymakerError::Transport {
            host: host.into(),
            message: message.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, PlaymakerError>;
