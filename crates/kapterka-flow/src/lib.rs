// SPDX-FileCopyrightText: 2026 Kapterka Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Guided-intake conversation state machine.
//!
//! Five flow families (equipment request, repair, consumables, access
//! administration, referral), each a linear-with-branches sequence of steps.
//! [`handle`] is a total function over (session, input): every reachable
//! state answers arbitrary text with either a validation re-prompt or an
//! advance. The machine holds no global state and performs no I/O -- the
//! orchestrator owns the per-user session map and the stores.

pub mod catalog;
pub mod draft;
pub mod handle;
pub mod keyboards;
pub mod step;

pub use draft::{
    AccessDraft, ConsumableDraft, Draft, EquipmentDraft, ReferralDraft, RepairDraft, Session,
};
pub use handle::{handle, AccessAction, AccessCommand, FlowOutput, Outcome};
pub use step::Step;
