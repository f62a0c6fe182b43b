// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Daemon configuration.
//!
//! Read from `config.toml` under `<config_dir>/desk/` unless a path is given
//! on the command line or in `DESK_CONFIG`:
//! - `dispatch_interval_ms`: waitlist drain tick (default 10000)
//! - `max_retries`: assignment attempts before an issue is waitlisted (default 5)
//! - `escalate_after`: drain passes before a waiting issue is escalated (optional)

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use dk_core::{EngineConfig, DEFAULT_MAX_RETRIES};

use crate::env;
use crate::error::{Error, Result};

const CONFIG_DIR_NAME: &str = "desk";
const CONFIG_FILE_NAME: &str = "config.toml";
const DEFAULT_DISPATCH_INTERVAL_MS: u64 = 10_000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Milliseconds between waitlist drain passes.
    #[serde(default = "default_dispatch_interval_ms")]
    pub dispatch_interval_ms: u64,
    /// Assignment attempts per issue before it is waitlisted.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    /// Drain passes after which a waiting issue is escalated. Absent = never.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub escalate_after: Option<u32>,
}

fn default_dispatch_interval_ms() -> u64 {
    DEFAULT_DISPATCH_INTERVAL_MS
}

fn default_max_retries() -> u32 {
    DEFAULT_MAX_RETRIES
}

impl Default for Config {
    fn default() -> Self {
        Config {
            dispatch_interval_ms: default_dispatch_interval_ms(),
            max_retries: default_max_retries(),
            escalate_after: None,
        }
    }
}

impl Config {
    /// Loads and validates the config at `path`. A missing file yields defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!("no config at {}, using defaults", path.display());
                return Ok(Config::default());
            }
            Err(source) => {
                return Err(Error::Read {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        let config: Config = toml::from_str(&content).map_err(|source| Error::ConfigFormat {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        tracing::debug!("loaded config from {}", path.display());
        Ok(config)
    }

    /// Loads the config from the first of: `explicit`, `DESK_CONFIG`, the
    /// default location. With no usable location, defaults are returned.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self> {
        let path = explicit
            .map(Path::to_path_buf)
            .or_else(env::config_path)
            .or_else(default_path);
        match path {
            Some(path) => Config::load(&path),
            None => Ok(Config::default()),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.dispatch_interval_ms == 0 {
            return Err(Error::Config(
                "dispatch_interval_ms must be greater than 0".to_string(),
            ));
        }
        if self.max_retries == 0 {
            return Err(Error::Config("max_retries must be at least 1".to_string()));
        }
        if self.escalate_after == Some(0) {
            return Err(Error::Config(
                "escalate_after must be at least 1 when set".to_string(),
            ));
        }
        Ok(())
    }

    /// Replaces the dispatch interval, keeping the config valid.
    pub fn with_dispatch_interval_ms(mut self, ms: u64) -> Result<Self> {
        self.dispatch_interval_ms = ms;
        self.validate()?;
        Ok(self)
    }

    pub fn dispatch_interval(&self) -> Duration {
        Duration::from_millis(self.dispatch_interval_ms)
    }

    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            max_retries: self.max_retries,
            escalate_after: self.escalate_after,
        }
    }
}

/// `<config_dir>/desk/config.toml`, if the platform has a config directory.
pub fn default_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
