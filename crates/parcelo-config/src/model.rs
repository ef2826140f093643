// SPDX-FileCopyrightText: 2026 Parcelo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Parcelo courier toolkit.
//!
//! All structs use `#[serde(deny_unknown_fields)]` so a mistyped key fails
//! at load time with an actionable diagnostic instead of being silently
//! ignored.

use serde::{Deserialize, Serialize};

/// Top-level Parcelo configuration.
///
/// Loaded from TOML files following the XDG hierarchy, with environment
/// variable overrides. All sections are optional and default to sensible
/// values; the one setting nearly every deployment overrides is
/// `api.base_url`.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ParceloConfig {
    /// Courier backend endpoint settings.
    #[serde(default)]
    pub api: ApiConfig,

    /// Identity of the staff member running this client.
    #[serde(default)]
    pub staff: StaffConfig,

    /// Logging settings.
    #[serde(default)]
    pub log: LogConfig,
}

/// Courier backend endpoint configuration.
///
/// The base URL is injected into the HTTP client at construction; nothing
/// else in the workspace hardcodes an endpoint, which is what lets the test
/// suite point the client at a local mock server.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ApiConfig {
    /// Base URL of the courier backend.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Retries after a transient error (429/500/503) before giving up.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            max_retries: default_max_retries(),
        }
    }
}

/// Identity defaults used when a command does not pass `--staff` explicitly.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StaffConfig {
    /// Staff ID of the operator (driver or warehouse staff).
    #[serde(default)]
    pub id: Option<i64>,

    /// Home warehouse for warehouse-side commands.
    #[serde(default)]
    pub warehouse_id: Option<i64>,
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LogConfig {
    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:3000".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_max_retries() -> u32 {
    1
}

fn default_log_level() -> String {
    "info".to_string()
}
