// SPDX-FileCopyrightText: 2026 Kapterka Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde
//! attributes. Collects every problem instead of failing fast.

use crate::diagnostic::ConfigError;
use crate::model::KapterkaConfig;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration for semantic correctness.
pub fn validate_config(config: &KapterkaConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if !LOG_LEVELS.contains(&config.service.log_level.as_str()) {
        errors.push(ConfigError::Validation {
            message: format!(
                "service.log_level must be one of {LOG_LEVELS:?}, got `{}`",
                config.service.log_level
            ),
        });
    }

    if config.tables.dir.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "tables.dir must not be empty".to_string(),
        });
    }

    for (key, file) in [
        ("tables.requests_file", &config.tables.requests_file),
        ("tables.repairs_file", &config.tables.repairs_file),
        ("tables.consumables_file", &config.tables.consumables_file),
        ("tables.users_file", &config.tables.users_file),
        (
            "tables.recommendations_file",
            &config.tables.recommendations_file,
        ),
    ] {
        if file.trim().is_empty() {
            errors.push(ConfigError::Validation {
                message: format!("{key} must not be empty"),
            });
        }
    }

    if config.telegram.poll_timeout_secs == 0 || config.telegram.poll_timeout_secs > 60 {
        errors.push(ConfigError::Validation {
            message: format!(
                "telegram.poll_timeout_secs must be in 1..=60, got {}",
                config.telegram.poll_timeout_secs
            ),
        });
    }

    if let Some(token) = &config.telegram.bot_token
        && token.trim().is_empty()
    {
        errors.push(ConfigError::Validation {
            message: "telegram.bot_token is set but empty".to_string(),
        });
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}
