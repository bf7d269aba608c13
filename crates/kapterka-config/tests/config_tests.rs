// SPDX-FileCopyrightText: 2026 Kapterka Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loading and validation tests.

use kapterka_config::{load_and_validate_str, ConfigError};
use kapterka_core::types::Capability;

#[test]
fn empty_config_loads_with_defaults() {
    let config = load_and_validate_str("").expect("defaults should be valid");
    assert_eq!(config.service.name, "kapterka");
    assert_eq!(config.service.log_level, "info");
    assert_eq!(config.telegram.poll_timeout_secs, 25);
    assert!(config.telegram.bot_token.is_none());
    assert_eq!(config.tables.dir, "tables");
    assert_eq!(config.tables.requests_file, "requests.csv");
}

#[test]
fn toml_values_override_defaults() {
    let config = load_and_validate_str(
        r#"
        [service]
        log_level = "debug"

        [telegram]
        bot_token = "123456:ABCDEF"
        poll_timeout_secs = 30

        [tables]
        dir = "/var/lib/kapterka/tables"

        [access]
        use_bot = [1, 2]
        complete = [1]
        "#,
    )
    .expect("config should be valid");

    assert_eq!(config.service.log_level, "debug");
    assert_eq!(config.telegram.bot_token.as_deref(), Some("123456:ABCDEF"));
    assert_eq!(config.telegram.poll_timeout_secs, 30);
    assert_eq!(config.tables.dir, "/var/lib/kapterka/tables");
    assert_eq!(config.access.use_bot, vec![1, 2]);
}

#[test]
fn table_paths_join_dir_and_file() {
    let config = load_and_validate_str("[tables]\ndir = \"data\"").unwrap();
    assert_eq!(
        config.tables.requests_path(),
        std::path::PathBuf::from("data/requests.csv")
    );
    assert_eq!(
        config.tables.users_path(),
        std::path::PathBuf::from("data/users.csv")
    );
}

#[test]
fn unknown_keys_are_rejected() {
    let result = load_and_validate_str("[telegram]\nbot_tokn = \"oops\"");
    let errors = result.expect_err("unknown key must be rejected");
    assert!(matches!(errors[0], ConfigError::Parse { .. }));
}

#[test]
fn validation_collects_every_problem() {
    let result = load_and_validate_str(
        r#"
        [service]
        log_level = "loud"

        [telegram]
        poll_timeout_secs = 0

        [tables]
        dir = ""
        "#,
    );
    let errors = result.expect_err("invalid config must be rejected");
    assert!(errors.len() >= 3, "expected all problems, got {errors:?}");
    assert!(errors
        .iter()
        .all(|e| matches!(e, ConfigError::Validation { .. })));
}

#[test]
fn bootstrap_sets_cover_all_five_capabilities() {
    let config = load_and_validate_str(
        r#"
        [access]
        use_bot = [10]
        notify_recommendations = [20]
        "#,
    )
    .unwrap();
    let sets = config.access.bootstrap_sets();
    assert_eq!(sets.len(), 5);
    let use_bot = sets
        .iter()
        .find(|(capability, _)| *capability == Capability::UseBot)
        .unwrap();
    assert_eq!(use_bot.1.len(), 1);
}
