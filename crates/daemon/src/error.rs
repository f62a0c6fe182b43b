// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by the daemon.
///
/// Desk errors pass through unchanged; everything else comes from loading
/// the config or seed files.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Desk(#[from] dk_core::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid seed file {}: {source}", path.display())]
    SeedFormat {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("invalid config file {}: {source}", path.display())]
    ConfigFormat {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("config error: {0}")]
    Config(String),

    #[error("seed error: {0}")]
    Seed(String),

    #[error("unknown user '{0}'\n  hint: issues can only be raised by users listed in the seed file")]
    UnknownUser(String),

    #[error("background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
