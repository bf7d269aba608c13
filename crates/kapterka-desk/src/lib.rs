// SPDX-FileCopyrightText: 2026 Kapterka Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Message orchestrator for the Kapterka request desk.
//!
//! [`Desk`] owns the four stores, the access overlay, and the per-user
//! session map. It consumes `(user, reporter, text)` and produces replies
//! plus notification fan-out targets; it never talks to the transport
//! itself.

pub mod desk;
pub mod format;

pub use desk::{Desk, Notification, Response};
