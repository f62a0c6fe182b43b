// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::names;
use super::*;
use std::path::PathBuf;

#[test]
fn constants_match_env_var_names() {
    assert_eq!(names::DESK_CONFIG, "DESK_CONFIG");
    assert_eq!(names::DESK_DISPATCH_INTERVAL_MS, "DESK_DISPATCH_INTERVAL_MS");
    assert_eq!(names::RUST_LOG, "RUST_LOG");
}

// Each variable is exercised by a single test so parallel tests never race
// on the same key.
#[test]
fn config_path_follows_desk_config() {
    {
        let _guard = EnvGuard::set(names::DESK_CONFIG, "/etc/desk/config.toml");
        assert_eq!(config_path(), Some(PathBuf::from("/etc/desk/config.toml")));
    }
    {
        let _guard = EnvGuard::set(names::DESK_CONFIG, "  ");
        assert_eq!(config_path(), None);
    }
    {
        let _guard = EnvGuard::remove(names::DESK_CONFIG);
        assert_eq!(config_path(), None);
    }
}

#[test]
fn dispatch_interval_parses_milliseconds() {
    {
        let _guard = EnvGuard::set(names::DESK_DISPATCH_INTERVAL_MS, " 250 ");
        assert_eq!(dispatch_interval_ms(), Some(250));
    }
    {
        let _guard = EnvGuard::set(names::DESK_DISPATCH_INTERVAL_MS, "soon");
        assert_eq!(dispatch_interval_ms(), None);
    }
    {
        let _guard = EnvGuard::remove(names::DESK_DISPATCH_INTERVAL_MS);
        assert_eq!(dispatch_interval_ms(), None);
    }
}

/// RAII guard that sets/removes an env var and restores it on drop.
struct EnvGuard {
    key: &'static str,
    original: Option<String>,
}

impl EnvGuard {
    fn set(key: &'static str, value: &str) -> Self {
        let original = std::env::var(key).ok();
        std::env::set_var(key, value);
        Self { key, original }
    }

    fn remove(key: &'static str) -> Self {
        let original = std::env::var(key).ok();
        std::env::remove_var(key);
        Self { key, original }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        match &self.original {
            Some(val) => std::env::set_var(self.key, val),
            None => std::env::remove_var(self.key),
        }
    }
}
