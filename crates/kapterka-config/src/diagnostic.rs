// SPDX-FileCopyrightText: 2026 Kapterka Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Diagnostic rendering for configuration errors.
//!
//! Figment errors are flattened into one [`ConfigError`] per problem, with a
//! nearest-key suggestion for unknown fields, and rendered through miette.

use miette::Diagnostic;
use thiserror::Error;

/// One reportable configuration problem.
#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    /// The TOML/env input could not be deserialized into the config model.
    #[error("configuration could not be parsed: {message}")]
    #[diagnostic(code(kapterka::config::parse))]
    Parse {
        message: String,
        #[help]
        help: Option<String>,
    },

    /// The config deserialized but violates a semantic constraint.
    #[error("invalid configuration: {message}")]
    #[diagnostic(code(kapterka::config::validation))]
    Validation { message: String },
}

/// Flattens a figment error (which may aggregate several problems) into
/// individual diagnostics.
pub fn figment_to_config_errors(error: figment::Error) -> Vec<ConfigError> {
    error
        .into_iter()
        .map(|e| {
            let help = match &e.kind {
                figment::error::Kind::UnknownField(field, expected) => {
                    suggest_key(field, expected)
                }
                _ => None,
            };
            ConfigError::Parse {
                message: e.to_string(),
                help,
            }
        })
        .collect()
}

/// Suggests the closest known key for a typo'd field name.
fn suggest_key(field: &str, expected: &[&str]) -> Option<String> {
    expected
        .iter()
        .map(|candidate| (strsim::jaro_winkler(field, candidate), candidate))
        .filter(|(score, _)| *score > 0.8)
        .max_by(|(a, _), (b, _)| a.total_cmp(b))
        .map(|(_, candidate)| format!("did you mean `{candidate}`?"))
}

/// Prints every error through miette's fancy reporter.
pub fn render_errors(errors: &[ConfigError]) {
    for error in errors {
        let report = miette::Report::msg(error.to_string());
        eprintln!("{report:?}");
        if let ConfigError::Parse {
            help: Some(help), ..
        } = error
        {
            eprintln!("  help: {help}");
        }
    }
}
