// SPDX-FileCopyrightText: 2026 Kapterka Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Shared types used across the flow engine, the stores, and the transport.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Numeric Telegram user identifier.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct UserId(pub i64);

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for UserId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<i64>().map(UserId)
    }
}

/// The five independent capability flags an access entry carries.
///
/// Flags change only through explicit administrative action; the overlay in
/// `kapterka-access` mirrors them in memory for synchronous checks.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, Serialize, Deserialize,
)]
pub enum Capability {
    /// May talk to the bot at all.
    UseBot,
    /// May transition records from active to completed.
    Complete,
    /// May grant and revoke capabilities.
    ManageAccess,
    /// Receives a card for every new request.
    NotifyRequests,
    /// Receives a card for every new recommendation.
    NotifyRecommendations,
}

impl Capability {
    /// Button label shown in the access-administration flow.
    pub fn label(self) -> &'static str {
        match self {
            Capability::UseBot => "Доступ к боту",
            Capability::Complete => "Завершение заявок",
            Capability::ManageAccess => "Управление доступом",
            Capability::NotifyRequests => "Уведомления о заявках",
            Capability::NotifyRecommendations => "Уведомления о рекомендациях",
        }
    }
}

/// Reply keyboard layout the transport renders.
///
/// The core never builds transport payloads; it only names one of these
/// variants and the Telegram crate turns it into `reply_markup` JSON.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Keyboard {
    /// Grid of labeled buttons, row by row.
    Grid(Vec<Vec<String>>),
    /// Single-column list of buttons.
    List(Vec<String>),
    /// No keyboard change.
    None,
}

impl Keyboard {
    /// Grid built from static rows, for the fixed menus.
    pub fn grid(rows: &[&[&str]]) -> Self {
        Keyboard::Grid(
            rows.iter()
                .map(|row| row.iter().map(|s| s.to_string()).collect())
                .collect(),
        )
    }
}

/// One outbound reply: text plus the keyboard to show with it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub text: String,
    pub keyboard: Keyboard,
}

impl Reply {
    pub fn new(text: impl Into<String>, keyboard: Keyboard) -> Self {
        Self {
            text: text.into(),
            keyboard,
        }
    }
}
