// SPDX-FileCopyrightText: 2026 Parcelo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports the XDG hierarchy: `./parcelo.toml` > `~/.config/parcelo/parcelo.toml`
//! > `/etc/parcelo/parcelo.toml`, with environment variable overrides via the
//! `PARCELO_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::ParceloConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/parcelo/parcelo.toml` (system-wide)
/// 3. `~/.config/parcelo/parcelo.toml` (user XDG config)
/// 4. `./parcelo.toml` (local directory)
/// 5. `PARCELO_*` environment variables
pub fn load_config() -> Result<ParceloConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no XDG lookup).
///
/// Used for testing and explicit config specification.
pub fn load_config_from_str(toml_content: &str) -> Result<ParceloConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(ParceloConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<ParceloConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(ParceloConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Build the Figment used internally for config loading (exposed for
/// diagnostic use, before extraction).
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(ParceloConfig::default()))
        .merge(Toml::file("/etc/parcelo/parcelo.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("parcelo/parcelo.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("parcelo.toml"))
        .merge(env_provider())
}

/// Create the environment variable provider using explicit `map()` for
/// section-to-dot mapping. `PARCELO_API_BASE_URL` must map to
/// `api.base_url`, not `api.base.url`, so a plain `split("_")` would be
/// ambiguous for underscore-containing key names.
fn env_provider() -> Env {
    Env::prefixed("PARCELO_").map(|key| {
        let key_str = key.as_str();
        let mapped = key_str
            .replacen("api_", "api.", 1)
            .replacen("staff_", "staff.", 1)
            .replacen("log_", "log.", 1);
        mapped.into()
    })
}
