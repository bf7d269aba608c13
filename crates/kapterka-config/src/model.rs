// SPDX-FileCopyrightText: 2026 Kapterka Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup with actionable error messages.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use kapterka_core::types::{Capability, UserId};

/// Top-level Kapterka configuration.
///
/// Loaded from TOML files following the XDG hierarchy, with environment
/// variable overrides. All sections are optional and default to sensible
/// values; only `telegram.bot_token` is required to actually serve.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct KapterkaConfig {
    /// Service identity and logging.
    #[serde(default)]
    pub service: ServiceConfig,

    /// Telegram Bot API settings.
    #[serde(default)]
    pub telegram: TelegramConfig,

    /// Table file locations.
    #[serde(default)]
    pub tables: TablesConfig,

    /// Bootstrap capability grants applied on every start.
    #[serde(default)]
    pub access: AccessConfig,
}

/// Service identity and logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ServiceConfig {
    /// Display name of the service.
    #[serde(default = "default_service_name")]
    pub name: String,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            name: default_service_name(),
            log_level: default_log_level(),
        }
    }
}

fn default_service_name() -> String {
    "kapterka".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Telegram Bot API configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TelegramConfig {
    /// Bot API token. `None` makes `serve` refuse to start.
    #[serde(default)]
    pub bot_token: Option<String>,

    /// Long-poll timeout passed to getUpdates, in seconds.
    #[serde(default = "default_poll_timeout")]
    pub poll_timeout_secs: u64,
}

impl Default for TelegramConfig {
    fn default() -> Self {
        Self {
            bot_token: None,
            poll_timeout_secs: default_poll_timeout(),
        }
    }
}

fn default_poll_timeout() -> u64 {
    25
}

/// Table file locations. Files live under one directory; the directory is
/// created on startup if missing.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TablesConfig {
    #[serde(default = "default_tables_dir")]
    pub dir: String,

    #[serde(default = "default_requests_file")]
    pub requests_file: String,

    #[serde(default = "default_repairs_file")]
    pub repairs_file: String,

    #[serde(default = "default_consumables_file")]
    pub consumables_file: String,

    #[serde(default = "default_users_file")]
    pub users_file: String,

    #[serde(default = "default_recommendations_file")]
    pub recommendations_file: String,
}

impl Default for TablesConfig {
    fn default() -> Self {
        Self {
            dir: default_tables_dir(),
            requests_file: default_requests_file(),
            repairs_file: default_repairs_file(),
            consumables_file: default_consumables_file(),
            users_file: default_users_file(),
            recommendations_file: default_recommendations_file(),
        }
    }
}

impl TablesConfig {
    pub fn requests_path(&self) -> PathBuf {
        PathBuf::from(&self.dir).join(&self.requests_file)
    }

    pub fn repairs_path(&self) -> PathBuf {
        PathBuf::from(&self.dir).join(&self.repairs_file)
    }

    pub fn consumables_path(&self) -> PathBuf {
        PathBuf::from(&self.dir).join(&self.consumables_file)
    }

    pub fn users_path(&self) -> PathBuf {
        PathBuf::from(&self.dir).join(&self.users_file)
    }

    pub fn recommendations_path(&self) -> PathBuf {
        PathBuf::from(&self.dir).join(&self.recommendations_file)
    }
}

fn default_tables_dir() -> String {
    "tables".to_string()
}

fn default_requests_file() -> String {
    "requests.csv".to_string()
}

fn default_repairs_file() -> String {
    "repairs.csv".to_string()
}

fn default_consumables_file() -> String {
    "consumables.csv".to_string()
}

fn default_users_file() -> String {
    "users.csv".to_string()
}

fn default_recommendations_file() -> String {
    "recommendations.csv".to_string()
}

/// Bootstrap capability grants: ids listed here have the matching flag
/// ensured true on every start (an idempotent union; nothing is revoked).
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AccessConfig {
    #[serde(default)]
    pub use_bot: Vec<i64>,

    #[serde(default)]
    pub complete: Vec<i64>,

    #[serde(default)]
    pub manage_access: Vec<i64>,

    #[serde(default)]
    pub notify_requests: Vec<i64>,

    #[serde(default)]
    pub notify_recommendations: Vec<i64>,
}

impl AccessConfig {
    /// The grants as (capability, ids) pairs for the store bootstrap and the
    /// overlay hydration.
    pub fn bootstrap_sets(&self) -> Vec<(Capability, Vec<UserId>)> {
        let ids = |list: &[i64]| list.iter().copied().map(UserId).collect::<Vec<_>>();
        vec![
            (Capability::UseBot, ids(&self.use_bot)),
            (Capability::Complete, ids(&self.complete)),
            (Capability::ManageAccess, ids(&self.manage_access)),
            (Capability::NotifyRequests, ids(&self.notify_requests)),
            (
                Capability::NotifyRecommendations,
                ids(&self.notify_recommendations),
            ),
        ]
    }
}
