// SPDX-FileCopyrightText: 2026 Kapterka Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Keyboard layout per step.
//!
//! The core describes layouts; rendering to transport payloads happens in
//! the Telegram crate.

use kapterka_core::types::{Capability, Keyboard};
use strum::IntoEnumIterator;

use crate::catalog;
use crate::draft::{Draft, Session};
use crate::step::Step;

/// The resting keyboard outside any flow. The access-administration entry
/// is only shown to users holding the manage-access capability.
pub fn main_menu(show_access_admin: bool) -> Keyboard {
    let mut rows = vec![
        vec![
            catalog::BTN_ACTIVE.to_string(),
            catalog::BTN_COMPLETED.to_string(),
        ],
        vec![
            catalog::BTN_NEW_REQUEST.to_string(),
            catalog::BTN_REFERRAL.to_string(),
        ],
    ];
    if show_access_admin {
        rows.push(vec![catalog::BTN_ACCESS.to_string()]);
    }
    Keyboard::Grid(rows)
}

fn cancel_only() -> Keyboard {
    Keyboard::grid(&[&[catalog::BTN_CANCEL]])
}

fn chunked(options: &[&str], per_row: usize) -> Keyboard {
    Keyboard::Grid(
        options
            .chunks(per_row)
            .map(|chunk| chunk.iter().map(|s| s.to_string()).collect())
            .collect(),
    )
}

/// Keyboard to show with the prompt of the session's current step.
pub fn for_session(session: &Session) -> Keyboard {
    match session.step {
        Step::FlowSelect => Keyboard::grid(&[
            &[catalog::BTN_EQUIPMENT, catalog::BTN_REPAIR],
            &[catalog::BTN_CONSUMABLES],
        ]),
        Step::PilotType => Keyboard::grid(&[catalog::PILOT_TYPES]),
        Step::DroneType => match &session.draft {
            Draft::Equipment(draft) => match draft.pilot_type.as_deref() {
                Some(pilot_type) => chunked(catalog::drone_types(pilot_type), 2),
                None => Keyboard::None,
            },
            _ => Keyboard::None,
        },
        Step::ReelKm => match &session.draft {
            Draft::Equipment(draft) => match draft.drone_type.as_deref() {
                Some(drone_type) => Keyboard::Grid(vec![catalog::reel_options(drone_type)
                    .iter()
                    .map(|s| s.to_string())
                    .collect()]),
                None => Keyboard::None,
            },
            _ => Keyboard::None,
        },
        Step::VideoFreq => Keyboard::grid(&[&["5.8", "3.4", "3.3"], &["1.5", "1.2"]]),
        Step::ControlFreq => Keyboard::grid(&[&["2.4", "900", "700"], &["500", "300 кузнец"]]),
        Step::RepairUnit | Step::ConsumableUnit => {
            Keyboard::grid(&[&["КТ", "СТ"], &["Оптика", "Мавики"]])
        }
        Step::AccessTarget => cancel_only(),
        Step::AccessCapability => {
            let mut items: Vec<String> = Capability::iter().map(|c| c.label().to_string()).collect();
            items.push(catalog::BTN_REVOKE_ALL.to_string());
            items.push(catalog::BTN_CANCEL.to_string());
            Keyboard::List(items)
        }
        Step::AccessAction => Keyboard::grid(&[
            &[catalog::BTN_GRANT, catalog::BTN_REVOKE],
            &[catalog::BTN_CANCEL],
        ]),
        // Every free-text step gets the lone cancel button.
        _ => cancel_only(),
    }
}
