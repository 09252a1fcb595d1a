// SPDX-FileCopyrightText: 2026 Parsimon Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports the XDG hierarchy: `./parsimon.toml` > `~/.config/parsimon/parsimon.toml`
//! > `/etc/parsimon/parsimon.toml`, with environment variable overrides via
//! the `PARSIMON_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::ParsimonConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/parsimon/parsimon.toml` (system-wide)
/// 3. `~/.config/parsimon/parsimon.toml` (user XDG config)
/// 4. `./parsimon.toml` (local directory)
/// 5. `PARSIMON_*` environment variables
pub fn load_config() -> Result<ParsimonConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(ParsimonConfig::default()))
        .merge(Toml::file("/etc/parsimon/parsimon.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("parsimon/parsimon.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("parsimon.toml"))
        .merge(env_provider())
        .extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env vars).
///
/// Used for testing and explicit configuration.
pub fn load_config_from_str(toml_content: &str) -> Result<ParsimonConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(ParsimonConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<ParsimonConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(ParsimonConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Create the environment variable provider using explicit `map()` for
/// section-to-dot mapping.
///
/// Uses `Env::map()` NOT `Env::split("_")` to avoid ambiguity with
/// underscore-containing key names: `PARSIMON_API_API_KEY` must map to
/// `api.api_key`, not `api.api.key`.
fn env_provider() -> Env {
    Env::prefixed("PARSIMON_").map(|key| {
        // `key` is the lowercased env var name with prefix stripped.
        // Example: PARSIMON_ROUTING_DEBUG_ROUTING -> "routing_debug_routing"
        let mapped = key
            .as_str()
            .replacen("api_", "api.", 1)
            .replacen("models_", "models.", 1)
            .replacen("routing_", "routing.", 1);
        mapped.into()
    })
}
