// src/bind.rs

//! Parameter binding: turning a job spec's parameter table into one concrete
//! command string per host.
//!
//! Two binding modes exist, derived from the table's keys:
//!
//! - **Named**: keys are flag names (`--in`); each bound command carries
//!   `key value` pairs, in the table's sorted key order.
//! - **Positional**: keys are 1-based indices (`"1"`, `"2"`); each bound
//!   command carries the values alone, in ascending index order.
//!
//! Values resolve against a shared data root unless they carry a leading
//! caret (`^`), which marks them as literals (numbers, enum flags) that the
//! prefix must not touch.

use std::collections::BTreeMap;

use crate::config::model::join_remote_path;
use crate::errors::{PlaymakerError, Result};

/// A fully resolved, host-indexed command string: script name plus ordered
/// argument tokens.
pub type BoundCommand = String;

/// How parameter keys map onto script arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingMode {
    /// Keys are flag names; emit `key value`.
    Named,
    /// Keys are 1-based indices; emit values only, in index order.
    Positional,
}

impl BindingMode {
    /// Derive the binding mode from the table's keys.
    ///
    /// Positional if every key parses as an integer, named if none does.
    /// A table mixing the two is a configuration error.
    pub fn detect<'a>(keys: impl Iterator<Item = &'a str>) -> Result<BindingMode> {
        let mut numeric = 0usize;
        let mut flags = 0usize;
        for key in keys {
            if key.trim().parse::<u32>().is_ok() {
                numeric += 1;
            } else {
                flags += 1;
            }
        }
        match (numeric, flags) {
            (0, 0) => Err(PlaymakerError::config(
                "cannot derive a binding mode from an empty parameter table",
            )),
            (_, 0) => Ok(BindingMode::Positional),
            (0, _) => Ok(BindingMode::Named),
            _ => Err(PlaymakerError::config(
                "parameter keys mix positional indices and flag names",
            )),
        }
    }
}

/// Bind a parameter table into one command per host index.
///
/// Pure: no side effects, and the i-th returned command belongs to the i-th
/// host. The table must be usable (non-empty, no empty value lists) — the
/// bare-script path is the caller's concern, since only the caller knows the
/// host count.
pub fn bind(
    script: &str,
    parameters: &BTreeMap<String, Vec<String>>,
    data_root: &str,
) -> Result<Vec<BoundCommand>> {
    let mode = BindingMode::detect(parameters.keys().map(|k| k.as_str()))?;
    let runs = value_count(parameters)?;

    let mut commands = Vec::with_capacity(runs);
    for i in 0..runs {
        let mut command = script.to_string();
        match mode {
            BindingMode::Named => {
                for (key, vals) in parameters.iter() {
                    command.push(' ');
                    command.push_str(key);
                    command.push(' ');
                    command.push_str(&resolve_value(&vals[i], data_root));
                }
            }
            BindingMode::Positional => {
                for key in positional_order(parameters)? {
                    let vals = &parameters[&key];
                    command.push(' ');
                    command.push_str(&resolve_value(&vals[i], data_root));
                }
            }
        }
        commands.push(command);
    }
    Ok(commands)
}

/// Number of runs the table describes, requiring every value list to agree.
fn value_count(parameters: &BTreeMap<String, Vec<String>>) -> Result<usize> {
    let mut iter = parameters.iter();
    let (first_key, first_vals) = iter
        .next()
        .ok_or_else(|| PlaymakerError::config("bind called with an empty parameter table"))?;
    for (key, vals) in iter {
        if vals.len() != first_vals.len() {
            return Err(PlaymakerError::config(format!(
                "parameter '{}' has {} value(s) but '{}' has {}",
                key,
                vals.len(),
                first_key,
                first_vals.len()
            )));
        }
    }
    Ok(first_vals.len())
}

/// Positional keys sorted by their numeric value, verified to be exactly
/// `1..=K` with no gaps.
fn positional_order(parameters: &BTreeMap<String, Vec<String>>) -> Result<Vec<String>> {
    let mut indexed: Vec<(u32, String)> = Vec::with_capacity(parameters.len());
    for key in parameters.keys() {
        let idx: u32 = key
            .trim()
            .parse()
            .map_err(|_| PlaymakerError::config(format!("non-numeric positional key '{key}'")))?;
        indexed.push((idx, key.clone()));
    }
    indexed.sort_by_key(|(idx, _)| *idx);

    for (expected, (idx, _)) in (1u32..).zip(indexed.iter()) {
        if *idx != expected {
            return Err(PlaymakerError::config(format!(
                "positional keys must cover 1..={} exactly; missing index {}",
                parameters.len(),
                expected
            )));
        }
    }
    Ok(indexed.into_iter().map(|(_, key)| key).collect())
}

/// Resolve one raw value: a leading caret marks a literal and is stripped,
/// anything else joins onto the data root.
fn resolve_value(raw: &str, data_root: &str) -> String {
    match raw.strip_prefix('^') {
        Some(literal) => literal.to_string(),
        None => join_remote_path(data_root, raw),
    }
}
