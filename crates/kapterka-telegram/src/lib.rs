// SPDX-FileCopyrightText: 2026 Kapterka Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Telegram Bot API transport.
//!
//! Long-poll `getUpdates` plus `sendMessage` with reply keyboards rendered
//! from the core's [`kapterka_core::types::Keyboard`] variants. The core
//! never sees Bot API payloads; this crate is the only place that speaks
//! the wire format.

pub mod client;
pub mod render;
pub mod types;

pub use client::TelegramClient;
pub use types::{build_reporter, Chat, IncomingMessage, TgUser, Update};
