// src/registry.rs

//! The append-only launch registry.
//!
//! Every launch appends one tab-separated line to a day-stamped file:
//!
//! ```text
//! jobs/jobs@2026-29-08
//! 14:03:22<TAB>48213<TAB>fetch.py<TAB>serenity
//! ```
//!
//! Write-once audit trail only; status and kill work off live scans, so
//! there is no read API. Lines land in launch order, and only this process
//! ever writes the file.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::{DateTime, Local};
use tracing::debug;

use crate::errors::Result;

/// Date stamp in registry file names. Same year-day-month order as the log
/// names.
pub const REGISTRY_DATE_FORMAT: &str = "%Y-%d-%m";

/// Time-of-day stamp at the start of each registry line.
pub const REGISTRY_TIME_FORMAT: &str = "%H:%M:%S";

/// One launch, as recorded in the registry.
#[derive(Debug, Clone)]
pub struct RegistryEntry {
    pub at: DateTime<Local>,
    pub pid: u32,
    pub script: String,
    pub host: String,
}

/// Appends launch records to the day file under a configured directory.
#[derive(Debug, Clone)]
pub struct JobRegistry {
    dir: PathBuf,
}

impl JobRegistry {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    /// File name for a given date: `jobs@<YYYY-DD-MM>`.
    pub fn day_file_name(date: DateTime<Local>) -> String {
        format!("jobs@{}", date.format(REGISTRY_DATE_FORMAT))
    }

    /// Append one entry to its day file, creating directory and file as
    /// needed, and flush before returning.
    pub fn append(&self, entry: &RegistryEntry) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("creating registry directory at {:?}", self.dir))?;

        let path = self.dir.join(Self::day_file_name(entry.at));
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("opening registry file at {:?}", path))?;

        writeln!(
            file,
            "{}\t{}\t{}\t{}",
            entry.at.format(REGISTRY_TIME_FORMAT),
            entry.pid,
            entry.script,
            entry.host
        )?;
        file.flush()?;

        debug!(?path, pid = entry.pid, host = %entry.host, "registry entry appended");
        Ok(())
    }
}
