// SPDX-FileCopyrightText: 2026 Kapterka Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Step vocabulary of the five flows.

use strum::{Display, EnumIter};

/// A named state within a flow. Each step has its own validation and
/// next-step rule in [`crate::handle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum Step {
    /// Category selection right after "Оставить заявку".
    FlowSelect,

    // Equipment request flow.
    PilotType,
    Callsign,
    PilotNumber,
    DroneType,
    ReelKm,
    VideoFreq,
    ControlFreq,
    RxFirmware,
    RegDomain,
    BindPhrase,
    Quantity,
    Note,

    // Repair flow.
    RepairUnit,
    RepairEquipment,
    RepairFault,
    RepairQuantity,
    RepairNote,

    // Consumables flow.
    ConsumableUnit,
    ConsumableNeeded,
    ConsumableQuantity,
    ConsumableNote,

    // Access administration (exempt from the manual-input menu guard).
    AccessTarget,
    AccessCapability,
    AccessAction,

    // Referral flow.
    ReferralCandidate,
    ReferralNote,
}

impl Step {
    /// Whether this step captures free text. While such a step is pending,
    /// the orchestrator swallows menu commands instead of acting on them.
    pub fn is_manual_input(self) -> bool {
        matches!(
            self,
            Step::Callsign
                | Step::PilotNumber
                | Step::RxFirmware
                | Step::RegDomain
                | Step::BindPhrase
                | Step::Quantity
                | Step::Note
                | Step::RepairEquipment
                | Step::RepairFault
                | Step::RepairQuantity
                | Step::RepairNote
                | Step::ConsumableNeeded
                | Step::ConsumableQuantity
                | Step::ConsumableNote
                | Step::ReferralCandidate
                | Step::ReferralNote
        )
    }
}
