// SPDX-FileCopyrightText: 2026 Kapterka Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-flow typed drafts and the ephemeral session.
//!
//! The draft is a tagged union: one variant per flow family, each carrying
//! only the fields its steps can fill. A session is never persisted; it is
//! created at a flow entry point, destroyed on cancellation or completion,
//! and a stale one blocks the main menu until then.

use kapterka_core::types::{Capability, UserId};

use crate::step::Step;

/// Partially captured equipment request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EquipmentDraft {
    pub pilot_type: Option<String>,
    pub callsign: Option<String>,
    pub pilot_number: Option<String>,
    pub drone_type: Option<String>,
    pub video_freq: Option<String>,
    pub control_freq: Option<String>,
    pub rx_firmware: Option<String>,
    pub reg_domain: Option<String>,
    pub bind_phrase: Option<String>,
    pub reel_km: Option<String>,
    pub quantity: Option<String>,
}

/// Partially captured repair record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepairDraft {
    pub unit: Option<String>,
    pub equipment: Option<String>,
    pub fault: Option<String>,
    pub quantity: Option<String>,
}

/// Partially captured consumables record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConsumableDraft {
    pub unit: Option<String>,
    pub needed: Option<String>,
    pub quantity: Option<String>,
}

/// Partially captured access change.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccessDraft {
    pub target: Option<UserId>,
    pub capability: Option<Capability>,
}

/// Partially captured referral.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReferralDraft {
    pub candidate: Option<UserId>,
}

/// The accumulated state of one flow, tagged by family.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Draft {
    /// At the category-selection step; no family chosen yet.
    Selecting,
    Equipment(EquipmentDraft),
    Repair(RepairDraft),
    Consumable(ConsumableDraft),
    Access(AccessDraft),
    Referral(ReferralDraft),
}

/// One user's in-progress flow. Exactly one session exists per user at a
/// time; starting a new flow silently discards a prior unfinished one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub step: Step,
    pub draft: Draft,
}

impl Session {
    /// Entry point for the three request families.
    pub fn flow_select() -> Self {
        Session {
            step: Step::FlowSelect,
            draft: Draft::Selecting,
        }
    }

    /// Entry point for the access-administration sub-flow.
    pub fn access_admin() -> Self {
        Session {
            step: Step::AccessTarget,
            draft: Draft::Access(AccessDraft::default()),
        }
    }

    /// Entry point for the referral sub-flow.
    pub fn referral() -> Self {
        Session {
            step: Step::ReferralCandidate,
            draft: Draft::Referral(ReferralDraft::default()),
        }
    }

    /// True while the pending step captures free text; the orchestrator
    /// swallows menu commands for the duration. The access-administration
    /// steps are deliberately exempt.
    pub fn is_manual_input(&self) -> bool {
        self.step.is_manual_input()
    }
}
