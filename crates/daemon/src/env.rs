// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Environment variables read by the daemon.
//!
//! Names are generated by `build.rs` into the [`names`] submodule.

use std::path::PathBuf;

pub mod names {
    include!(concat!(env!("OUT_DIR"), "/env_names.rs"));
}

/// Returns the value of `DESK_CONFIG` if set and non-empty.
pub fn config_path() -> Option<PathBuf> {
    std::env::var(names::DESK_CONFIG)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .map(PathBuf::from)
}

/// Returns `DESK_DISPATCH_INTERVAL_MS` parsed as milliseconds.
///
/// Unparseable values are ignored with a warning.
pub fn dispatch_interval_ms() -> Option<u64> {
    let raw = std::env::var(names::DESK_DISPATCH_INTERVAL_MS).ok()?;
    match raw.trim().parse() {
        Ok(ms) => Some(ms),
        Err(_) => {
            tracing::warn!(
                "ignoring {}={:?}: not a number of milliseconds",
                names::DESK_DISPATCH_INTERVAL_MS,
                raw
            );
            None
        }
    }
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
