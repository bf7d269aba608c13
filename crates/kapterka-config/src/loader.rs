// SPDX-FileCopyrightText: 2026 Kapterka Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports the XDG hierarchy: `./kapterka.toml` > `~/.config/kapterka/kapterka.toml`
//! > `/etc/kapterka/kapterka.toml`, with environment variable overrides via
//! the `KAPTERKA_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::KapterkaConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/kapterka/kapterka.toml` (system-wide)
/// 3. `~/.config/kapterka/kapterka.toml` (user XDG config)
/// 4. `./kapterka.toml` (local directory)
/// 5. `KAPTERKA_*` environment variables
pub fn load_config() -> Result<KapterkaConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(KapterkaConfig::default()))
        .merge(Toml::file("/etc/kapterka/kapterka.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("kapterka/kapterka.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("kapterka.toml"))
        .merge(env_provider())
        .extract()
}

/// Load configuration from a TOML string only (no XDG lookup).
///
/// Used for testing and explicit config specification.
pub fn load_config_from_str(toml_content: &str) -> Result<KapterkaConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(KapterkaConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<KapterkaConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(KapterkaConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Create the environment variable provider using explicit `map()` for
/// section-to-dot mapping.
///
/// Uses `Env::map()` NOT `Env::split("_")` to avoid ambiguity with
/// underscore-containing key names: `KAPTERKA_TELEGRAM_BOT_TOKEN` must map
/// to `telegram.bot_token`, not `telegram.bot.token`.
fn env_provider() -> Env {
    Env::prefixed("KAPTERKA_").map(|key| {
        let key_str = key.as_str();
        let mapped = key_str
            .replacen("service_", "service.", 1)
            .replacen("telegram_", "telegram.", 1)
            .replacen("tables_", "tables.", 1)
            .replacen("access_", "access.", 1);
        mapped.into()
    })
}
