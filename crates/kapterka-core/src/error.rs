// SPDX-FileCopyrightText: 2026 Kapterka Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Kapterka request desk.

use thiserror::Error;

/// The primary error type used across the Kapterka crates.
///
/// Validation failures and not-found lookups are NOT errors -- those are
/// modelled as re-prompts and `Option`/`bool` returns. This enum covers the
/// failures that abort an operation.
#[derive(Debug, Error)]
pub enum KapterkaError {
    /// Configuration errors (invalid TOML, missing required fields).
    #[error("configuration error: {0}")]
    Config(String),

    /// Table file I/O or CSV-layer errors.
    #[error("table error at {path}: {source}")]
    Table {
        path: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Malformed persisted data: a non-numeric id cell or an unparseable
    /// timestamp in a row being deserialized. Fatal for the triggering
    /// operation; the serve loop logs it and continues.
    #[error("corrupt data in table {table}: {message}")]
    Corrupt { table: String, message: String },

    /// Telegram Bot API errors (connection failure, non-2xx response).
    #[error("transport error: {message}")]
    Transport {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}
