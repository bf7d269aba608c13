// SPDX-FileCopyrightText: 2026 Kapterka Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core types for the Kapterka request desk.
//!
//! Defines the shared error type, user/capability/keyboard types, and the
//! record entities persisted by the table stores. This crate has no I/O;
//! everything here is plain data passed between the flow engine, the stores,
//! and the transport.

pub mod error;
pub mod model;
pub mod types;

pub use error::KapterkaError;
pub use types::{Capability, Keyboard, Reply, UserId};
