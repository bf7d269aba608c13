// SPDX-FileCopyrightText: 2026 Kapterka Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Record entities persisted by the table stores.
//!
//! Entities mirror their table rows: every domain field is text, with the
//! literal `-` marking an intentionally empty optional value. The `New*`
//! structs are the typed inputs a finished flow hands to a store; the plain
//! structs are what comes back out of a table read.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::types::{Capability, UserId};

/// The literal stored for an intentionally empty optional field.
pub const PLACEHOLDER: &str = "-";

/// ISO-8601-sortable timestamp format used in every table.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Formats a timestamp the way the tables store it.
pub fn format_timestamp(t: NaiveDateTime) -> String {
    t.format(TIMESTAMP_FORMAT).to_string()
}

/// Parses a stored timestamp cell.
pub fn parse_timestamp(s: &str) -> Result<NaiveDateTime, chrono::ParseError> {
    NaiveDateTime::parse_from_str(s, TIMESTAMP_FORMAT)
}

/// The shared two-state record lifecycle.
///
/// Every domain renders these two states with its own labels; see
/// [`StatusLabels`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    Active,
    Completed,
}

/// Per-domain status labels. The stored text is a compatibility contract.
#[derive(Debug, Clone, Copy)]
pub struct StatusLabels {
    pub active: &'static str,
    pub completed: &'static str,
}

impl StatusLabels {
    /// Equipment request statuses.
    pub const REQUESTS: StatusLabels = StatusLabels {
        active: "active",
        completed: "completed",
    };

    /// Repair and consumable statuses (localized labels).
    pub const REPAIRS: StatusLabels = StatusLabels {
        active: "В работе",
        completed: "Завершено",
    };

    pub fn encode(&self, status: Status) -> &'static str {
        match status {
            Status::Active => self.active,
            Status::Completed => self.completed,
        }
    }

    pub fn decode(&self, cell: &str) -> Option<Status> {
        if cell == self.active {
            Some(Status::Active)
        } else if cell == self.completed {
            Some(Status::Completed)
        } else {
            None
        }
    }
}

/// The two mutually exclusive equipment parameter groups.
///
/// A row holds meaningful values for exactly one group; the store fills the
/// other group's columns with [`PLACEHOLDER`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DroneParams {
    /// Radio-channel drones: five independently captured fields.
    Radio {
        video_freq: String,
        control_freq: String,
        rx_firmware: String,
        reg_domain: String,
        bind_phrase: String,
    },
    /// Fiber-optic drones: a single reel distance.
    Reel { reel_km: String },
}

/// Input for a new equipment request, produced by a finished intake flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRequest {
    pub callsign: String,
    pub pilot_type: String,
    pub pilot_number: String,
    pub drone_type: String,
    pub params: DroneParams,
    pub quantity: String,
    pub note: String,
}

/// A stored equipment request row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EquipmentRequest {
    pub id: i64,
    pub reporter: String,
    pub created_at: NaiveDateTime,
    pub completed_at: Option<NaiveDateTime>,
    pub callsign: String,
    pub pilot_type: String,
    pub pilot_number: String,
    pub drone_type: String,
    pub video_freq: String,
    pub control_freq: String,
    pub rx_firmware: String,
    pub reg_domain: String,
    pub bind_phrase: String,
    pub reel_km: String,
    pub quantity: String,
    pub note: String,
    pub status: Status,
}

/// Input for a new repair record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRepair {
    pub unit: String,
    pub equipment: String,
    pub fault: String,
    pub quantity: String,
    pub note: String,
}

/// A stored repair row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepairItem {
    pub id: i64,
    pub reporter: String,
    pub transfer_date: NaiveDateTime,
    pub unit: String,
    pub equipment: String,
    pub fault: String,
    pub quantity: String,
    pub note: String,
    pub status: Status,
}

/// Input for a new consumables record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewConsumable {
    pub unit: String,
    pub needed: String,
    pub quantity: String,
    pub note: String,
}

/// A stored consumables row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsumableItem {
    pub id: i64,
    pub request_date: NaiveDateTime,
    pub requested_by: String,
    pub unit: String,
    pub needed: String,
    pub quantity: String,
    pub note: String,
    pub status: Status,
}

/// A stored access entry: one user's display name and capability flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserEntry {
    pub user_id: UserId,
    pub display_name: String,
    pub can_use_bot: bool,
    pub can_complete: bool,
    pub can_manage_access: bool,
    pub notify_requests: bool,
    pub notify_recommendations: bool,
    pub added_at: NaiveDateTime,
}

impl UserEntry {
    /// A fresh entry with every flag off, first seen now.
    pub fn new(user_id: UserId, display_name: impl Into<String>, added_at: NaiveDateTime) -> Self {
        Self {
            user_id,
            display_name: display_name.into(),
            can_use_bot: false,
            can_complete: false,
            can_manage_access: false,
            notify_requests: false,
            notify_recommendations: false,
            added_at,
        }
    }

    pub fn flag(&self, capability: Capability) -> bool {
        match capability {
            Capability::UseBot => self.can_use_bot,
            Capability::Complete => self.can_complete,
            Capability::ManageAccess => self.can_manage_access,
            Capability::NotifyRequests => self.notify_requests,
            Capability::NotifyRecommendations => self.notify_recommendations,
        }
    }

    pub fn set_flag(&mut self, capability: Capability, value: bool) {
        match capability {
            Capability::UseBot => self.can_use_bot = value,
            Capability::Complete => self.can_complete = value,
            Capability::ManageAccess => self.can_manage_access = value,
            Capability::NotifyRequests => self.notify_requests = value,
            Capability::NotifyRecommendations => self.notify_recommendations = value,
        }
    }

    /// Clears every one of the five flags.
    pub fn clear_flags(&mut self) {
        self.can_use_bot = false;
        self.can_complete = false;
        self.can_manage_access = false;
        self.notify_requests = false;
        self.notify_recommendations = false;
    }
}

/// Input for a new recommendation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRecommendation {
    pub candidate: UserId,
    pub note: String,
}

/// A stored recommendation row. Append-only; reviewed out of band.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recommendation {
    pub id: i64,
    pub date: NaiveDateTime,
    pub recommender: String,
    pub candidate: UserId,
    pub note: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestamp_round_trip() {
        let t = parse_timestamp("2026-03-01T14:05:09").unwrap();
        assert_eq!(format_timestamp(t), "2026-03-01T14:05:09");
    }

    #[test]
    fn status_labels_decode_rejects_foreign_vocabulary() {
        assert_eq!(
            StatusLabels::REQUESTS.decode("active"),
            Some(Status::Active)
        );
        assert_eq!(StatusLabels::REQUESTS.decode("В работе"), None);
        assert_eq!(
            StatusLabels::REPAIRS.decode("Завершено"),
            Some(Status::Completed)
        );
    }

    #[test]
    fn user_entry_flag_round_trip() {
        let t = parse_timestamp("2026-01-01T00:00:00").unwrap();
        let mut entry = UserEntry::new(UserId(7), "@seven", t);
        assert!(!entry.flag(Capability::Complete));
        entry.set_flag(Capability::Complete, true);
        entry.set_flag(Capability::NotifyRequests, true);
        assert!(entry.flag(Capability::Complete));
        entry.clear_flags();
        assert!(!entry.flag(Capability::Complete));
        assert!(!entry.flag(Capability::NotifyRequests));
    }
}
