// SPDX-FileCopyrightText: 2026 Kapterka Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The transition function of the intake state machine.
//!
//! [`handle`] answers every (session, input) pair: a validation failure
//! re-emits the step's prompt without advancing, a valid answer advances to
//! the next step, and the final step of a flow yields the finished, fully
//! typed payload. A step/draft mismatch (impossible through the public entry
//! points) gets a generic recovery prompt and mutates nothing.

use kapterka_core::model::{
    DroneParams, NewConsumable, NewRecommendation, NewRepair, NewRequest, PLACEHOLDER,
};
use kapterka_core::types::{Capability, UserId};
use strum::IntoEnumIterator;

use crate::catalog;
use crate::draft::{Draft, Session};
use crate::step::Step;

/// One administrative change to a user's capabilities.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessCommand {
    pub target: UserId,
    pub action: AccessAction,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessAction {
    Grant(Capability),
    Revoke(Capability),
    /// Clears all five flags, not just the ones explicitly named.
    RevokeAll,
}

/// The typed payload of a finished flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowOutput {
    Equipment(NewRequest),
    Repair(NewRepair),
    Consumable(NewConsumable),
    Access(AccessCommand),
    Referral(NewRecommendation),
}

/// Result of feeding one input to the machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Validation failure: same step, new (or same) prompt.
    Stay { prompt: String },
    /// Advanced to the session's new current step.
    Advance { prompt: String },
    /// Terminal step reached; the session is finished and the orchestrator
    /// hands the payload to the matching store.
    Done(FlowOutput),
}

const RECOVERY_PROMPT: &str = "Ошибка состояния. Нажмите «Оставить заявку» и попробуйте снова.";
const INVALID_CHOICE: &str = "Недопустимый выбор";

fn stay(prompt: &str) -> Outcome {
    Outcome::Stay {
        prompt: prompt.to_string(),
    }
}

fn advance(prompt: &str) -> Outcome {
    Outcome::Advance {
        prompt: prompt.to_string(),
    }
}

fn recovery() -> Outcome {
    stay(RECOVERY_PROMPT)
}

/// Menu words are never captured as free-text field values.
fn rejects_menu_word(text: &str) -> bool {
    catalog::is_menu_command(text)
}

/// Optional note fields: empty or `-` collapse to the placeholder.
fn normalize_note(text: &str) -> String {
    let trimmed = text.trim();
    if trimmed.is_empty() || trimmed == PLACEHOLDER {
        PLACEHOLDER.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Advances the session by one input. Total over (session, input).
pub fn handle(session: &mut Session, input: &str) -> Outcome {
    let text = input.trim();
    match session.step {
        Step::FlowSelect => flow_select(session, text),
        Step::PilotType
        | Step::Callsign
        | Step::PilotNumber
        | Step::DroneType
        | Step::ReelKm
        | Step::VideoFreq
        | Step::ControlFreq
        | Step::RxFirmware
        | Step::RegDomain
        | Step::BindPhrase
        | Step::Quantity
        | Step::Note => equipment(session, text),
        Step::RepairUnit
        | Step::RepairEquipment
        | Step::RepairFault
        | Step::RepairQuantity
        | Step::RepairNote => repair(session, text),
        Step::ConsumableUnit
        | Step::ConsumableNeeded
        | Step::ConsumableQuantity
        | Step::ConsumableNote => consumables(session, text),
        Step::AccessTarget | Step::AccessCapability | Step::AccessAction => access(session, text),
        Step::ReferralCandidate | Step::ReferralNote => referral(session, text),
    }
}

fn flow_select(session: &mut Session, text: &str) -> Outcome {
    match text {
        catalog::BTN_EQUIPMENT => {
            session.draft = Draft::Equipment(Default::default());
            session.step = Step::PilotType;
            advance("Какой тип?")
        }
        catalog::BTN_REPAIR => {
            session.draft = Draft::Repair(Default::default());
            session.step = Step::RepairUnit;
            advance("Подразделение:")
        }
        catalog::BTN_CONSUMABLES => {
            session.draft = Draft::Consumable(Default::default());
            session.step = Step::ConsumableUnit;
            advance("Подразделение:")
        }
        _ => stay(
            "Выберите тип заявки кнопкой: Обычная заявка / Ремонт / Комплектующие и расходники",
        ),
    }
}

fn equipment(session: &mut Session, text: &str) -> Outcome {
    let Draft::Equipment(draft) = &mut session.draft else {
        return recovery();
    };
    match session.step {
        Step::PilotType => {
            if !catalog::PILOT_TYPES.contains(&text) {
                return stay("Выберите тип кнопкой: КТ, Оптика или СТ");
            }
            draft.pilot_type = Some(text.to_string());
            session.step = Step::Callsign;
            advance("Позывной: (Ручной ввод)")
        }
        Step::Callsign => {
            if rejects_menu_word(text) {
                return stay(INVALID_CHOICE);
            }
            if text.is_empty() {
                return stay("Позывной обязателен. Введите позывной:");
            }
            draft.callsign = Some(text.to_string());
            session.step = Step::PilotNumber;
            advance("Номер пилота. Отправьте '-' если пусто:")
        }
        Step::PilotNumber => {
            if rejects_menu_word(text) {
                return stay(INVALID_CHOICE);
            }
            draft.pilot_number = Some(if text.is_empty() {
                PLACEHOLDER.to_string()
            } else {
                text.to_string()
            });
            session.step = Step::DroneType;
            advance("Тип дрона:")
        }
        Step::DroneType => {
            let Some(pilot_type) = draft.pilot_type.clone() else {
                return recovery();
            };
            if !catalog::drone_types(&pilot_type).contains(&text) {
                return stay("Выберите тип дрона кнопкой.");
            }
            if pilot_type == catalog::OPTICS {
                // A drone type without configured reel options would be a
                // dead end; refuse the transition instead of rendering an
                // empty choice.
                if catalog::reel_options(text).is_empty() {
                    return stay("Для этого типа дрона не настроена катушка. Выберите другой тип дрона.");
                }
                draft.drone_type = Some(text.to_string());
                session.step = Step::ReelKm;
                advance("Катушка км:")
            } else {
                draft.drone_type = Some(text.to_string());
                session.step = Step::VideoFreq;
                advance("Частота видео:")
            }
        }
        Step::ReelKm => {
            let options = draft
                .drone_type
                .as_deref()
                .map(catalog::reel_options)
                .unwrap_or_default();
            if !options.contains(&text) {
                return stay("Выберите Катушка км кнопкой.");
            }
            draft.reel_km = Some(text.to_string());
            session.step = Step::Quantity;
            advance("Количество: (Ручной ввод)")
        }
        Step::VideoFreq => {
            if !catalog::VIDEO_FREQUENCIES.contains(&text) {
                return stay("Выберите частоту видео кнопкой: 5.8 / 3.4 / 3.3 / 1.5 / 1.2");
            }
            draft.video_freq = Some(text.to_string());
            session.step = Step::ControlFreq;
            advance("Частота управления:")
        }
        Step::ControlFreq => {
            if !catalog::CONTROL_FREQUENCIES.contains(&text) {
                return stay(
                    "Выберите частоту управления кнопкой: 2.4 / 900 / 700 / 500 / 300 кузнец",
                );
            }
            draft.control_freq = Some(text.to_string());
            session.step = Step::RxFirmware;
            advance("Прошивка RX?(Ручной ввод) Пример: Orange5 (beta4)")
        }
        Step::RxFirmware => {
            if rejects_menu_word(text) {
                return stay(INVALID_CHOICE);
            }
            if text.is_empty() {
                return stay("Введите прошивку RX:");
            }
            draft.rx_firmware = Some(text.to_string());
            session.step = Step::RegDomain;
            advance("Regularity Domain: (Ручной ввод)")
        }
        Step::RegDomain => {
            if rejects_menu_word(text) {
                return stay(INVALID_CHOICE);
            }
            if text.is_empty() {
                return stay("Введите Regularity Domain:");
            }
            draft.reg_domain = Some(text.to_string());
            session.step = Step::BindPhrase;
            advance("BIND-фраза: (Ручной ввод)")
        }
        Step::BindPhrase => {
            if rejects_menu_word(text) {
                return stay(INVALID_CHOICE);
            }
            if text.is_empty() {
                return stay("BIND-фраза не может быть пустой. Введите значение:");
            }
            draft.bind_phrase = Some(text.to_string());
            session.step = Step::Quantity;
            advance("Количество: (Ручной ввод)")
        }
        Step::Quantity => {
            if rejects_menu_word(text) {
                return stay(INVALID_CHOICE);
            }
            if text.is_empty() {
                return stay("Введите количество:");
            }
            draft.quantity = Some(text.to_string());
            session.step = Step::Note;
            advance("Примечание: (Ручной ввод, по желанию, отправьте - если пусто)")
        }
        Step::Note => {
            if rejects_menu_word(text) {
                return stay(INVALID_CHOICE);
            }
            let note = normalize_note(text);
            match finish_equipment(draft, note) {
                Some(request) => Outcome::Done(FlowOutput::Equipment(request)),
                None => recovery(),
            }
        }
        _ => recovery(),
    }
}

/// Assembles the finished request, resolving the mutually exclusive
/// parameter groups. `None` only if an earlier step was somehow skipped.
fn finish_equipment(draft: &crate::draft::EquipmentDraft, note: String) -> Option<NewRequest> {
    let pilot_type = draft.pilot_type.clone()?;
    let params = if pilot_type == catalog::OPTICS {
        DroneParams::Reel {
            reel_km: draft.reel_km.clone()?,
        }
    } else {
        DroneParams::Radio {
            video_freq: draft.video_freq.clone()?,
            control_freq: draft.control_freq.clone()?,
            rx_firmware: draft.rx_firmware.clone()?,
            reg_domain: draft.reg_domain.clone()?,
            bind_phrase: draft.bind_phrase.clone()?,
        }
    };
    Some(NewRequest {
        callsign: draft.callsign.clone()?,
        pilot_type,
        pilot_number: draft.pilot_number.clone()?,
        drone_type: draft.drone_type.clone()?,
        params,
        quantity: draft.quantity.clone()?,
        note,
    })
}

fn repair(session: &mut Session, text: &str) -> Outcome {
    let Draft::Repair(draft) = &mut session.draft else {
        return recovery();
    };
    match session.step {
        Step::RepairUnit => {
            if !catalog::REPAIR_UNITS.contains(&text) {
                return stay("Выберите подразделение кнопкой: КТ / СТ / Оптика / Мавики");
            }
            draft.unit = Some(text.to_string());
            session.step = Step::RepairEquipment;
            advance("Оборудование: (Ручной ввод)")
        }
        Step::RepairEquipment => {
            if rejects_menu_word(text) {
                return stay(INVALID_CHOICE);
            }
            if text.is_empty() {
                return stay("Введите оборудование:");
            }
            draft.equipment = Some(text.to_string());
            session.step = Step::RepairFault;
            advance("Неисправность: (Ручной ввод)")
        }
        Step::RepairFault => {
            if rejects_menu_word(text) {
                return stay(INVALID_CHOICE);
            }
            if text.is_empty() {
                return stay("Введите неисправность:");
            }
            draft.fault = Some(text.to_string());
            session.step = Step::RepairQuantity;
            advance("Количество: (Ручной ввод)")
        }
        Step::RepairQuantity => {
            if rejects_menu_word(text) {
                return stay(INVALID_CHOICE);
            }
            if text.is_empty() {
                return stay("Введите количество:");
            }
            draft.quantity = Some(text.to_string());
            session.step = Step::RepairNote;
            advance("Примечание: (Ручной ввод, по желанию, отправьте - если пусто)")
        }
        Step::RepairNote => {
            if rejects_menu_word(text) {
                return stay(INVALID_CHOICE);
            }
            let (Some(unit), Some(equipment), Some(fault), Some(quantity)) = (
                draft.unit.clone(),
                draft.equipment.clone(),
                draft.fault.clone(),
                draft.quantity.clone(),
            ) else {
                return recovery();
            };
            Outcome::Done(FlowOutput::Repair(NewRepair {
                unit,
                equipment,
                fault,
                quantity,
                note: normalize_note(text),
            }))
        }
        _ => recovery(),
    }
}

fn consumables(session: &mut Session, text: &str) -> Outcome {
    let Draft::Consumable(draft) = &mut session.draft else {
        return recovery();
    };
    match session.step {
        Step::ConsumableUnit => {
            if !catalog::REPAIR_UNITS.contains(&text) {
                return stay("Выберите подразделение кнопкой: КТ / СТ / Оптика / Мавики");
            }
            draft.unit = Some(text.to_string());
            session.step = Step::ConsumableNeeded;
            advance("Необходимо: (Ручной ввод)")
        }
        Step::ConsumableNeeded => {
            if rejects_menu_word(text) {
                return stay(INVALID_CHOICE);
            }
            if text.is_empty() {
                return stay("Введите, что необходимо:");
            }
            draft.needed = Some(text.to_string());
            session.step = Step::ConsumableQuantity;
            advance("Количество: (Ручной ввод)")
        }
        Step::ConsumableQuantity => {
            if rejects_menu_word(text) {
                return stay(INVALID_CHOICE);
            }
            if text.is_empty() {
                return stay("Введите количество:");
            }
            draft.quantity = Some(text.to_string());
            session.step = Step::ConsumableNote;
            advance("Примечание: (Ручной ввод, по желанию, отправьте - если пусто)")
        }
        Step::ConsumableNote => {
            if rejects_menu_word(text) {
                return stay(INVALID_CHOICE);
            }
            let (Some(unit), Some(needed), Some(quantity)) = (
                draft.unit.clone(),
                draft.needed.clone(),
                draft.quantity.clone(),
            ) else {
                return recovery();
            };
            Outcome::Done(FlowOutput::Consumable(NewConsumable {
                unit,
                needed,
                quantity,
                note: normalize_note(text),
            }))
        }
        _ => recovery(),
    }
}

fn access(session: &mut Session, text: &str) -> Outcome {
    let Draft::Access(draft) = &mut session.draft else {
        return recovery();
    };
    match session.step {
        Step::AccessTarget => match text.parse::<UserId>() {
            Ok(target) => {
                draft.target = Some(target);
                session.step = Step::AccessCapability;
                advance("Что изменить?")
            }
            Err(_) => stay("Введите числовой ID пользователя:"),
        },
        Step::AccessCapability => {
            let Some(target) = draft.target else {
                return recovery();
            };
            if text == catalog::BTN_REVOKE_ALL {
                return Outcome::Done(FlowOutput::Access(AccessCommand {
                    target,
                    action: AccessAction::RevokeAll,
                }));
            }
            match Capability::iter().find(|c| c.label() == text) {
                Some(capability) => {
                    draft.capability = Some(capability);
                    session.step = Step::AccessAction;
                    advance("Выдать или забрать?")
                }
                None => stay("Выберите пункт кнопкой."),
            }
        }
        Step::AccessAction => {
            let (Some(target), Some(capability)) = (draft.target, draft.capability) else {
                return recovery();
            };
            match text {
                catalog::BTN_GRANT => Outcome::Done(FlowOutput::Access(AccessCommand {
                    target,
                    action: AccessAction::Grant(capability),
                })),
                catalog::BTN_REVOKE => Outcome::Done(FlowOutput::Access(AccessCommand {
                    target,
                    action: AccessAction::Revoke(capability),
                })),
                _ => stay("Выберите действие кнопкой: Выдать / Забрать"),
            }
        }
        _ => recovery(),
    }
}

fn referral(session: &mut Session, text: &str) -> Outcome {
    let Draft::Referral(draft) = &mut session.draft else {
        return recovery();
    };
    match session.step {
        Step::ReferralCandidate => {
            if rejects_menu_word(text) {
                return stay(INVALID_CHOICE);
            }
            match text.parse::<UserId>() {
                Ok(candidate) => {
                    draft.candidate = Some(candidate);
                    session.step = Step::ReferralNote;
                    advance("Примечание: (Ручной ввод, по желанию, отправьте - если пусто)")
                }
                Err(_) => stay("Введите числовой ID кандидата:"),
            }
        }
        Step::ReferralNote => {
            if rejects_menu_word(text) {
                return stay(INVALID_CHOICE);
            }
            let Some(candidate) = draft.candidate else {
                return recovery();
            };
            Outcome::Done(FlowOutput::Referral(NewRecommendation {
                candidate,
                note: normalize_note(text),
            }))
        }
        _ => recovery(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draft::{
        AccessDraft, ConsumableDraft, EquipmentDraft, ReferralDraft, RepairDraft,
    };

    fn feed(session: &mut Session, inputs: &[&str]) -> Outcome {
        let mut last = stay("start");
        for input in inputs {
            last = handle(session, input);
        }
        last
    }

    #[test]
    fn equipment_radio_branch_end_to_end() {
        let mut session = Session::flow_select();
        let outcome = feed(
            &mut session,
            &[
                "Обычная заявка",
                "КТ",
                "Alpha1",
                "-",
                "ПВХ-1",
                "5.8",
                "2.4",
                "Orange5",
                "FCC",
                "bindphrase",
                "3",
                "-",
            ],
        );
        let Outcome::Done(FlowOutput::Equipment(request)) = outcome else {
            panic!("expected finished equipment request, got {outcome:?}");
        };
        assert_eq!(request.pilot_type, "КТ");
        assert_eq!(request.drone_type, "ПВХ-1");
        assert_eq!(request.pilot_number, "-");
        assert_eq!(request.quantity, "3");
        assert_eq!(request.note, "-");
        match request.params {
            DroneParams::Radio { ref video_freq, .. } => assert_eq!(video_freq, "5.8"),
            DroneParams::Reel { .. } => panic!("radio branch expected"),
        }
    }

    #[test]
    fn equipment_optics_branch_end_to_end() {
        let mut session = Session::flow_select();
        let outcome = feed(
            &mut session,
            &[
                "Обычная заявка",
                "Оптика",
                "Beta2",
                "12",
                "ПВХ-О",
                "15 км",
                "2",
                "",
            ],
        );
        let Outcome::Done(FlowOutput::Equipment(request)) = outcome else {
            panic!("expected finished equipment request, got {outcome:?}");
        };
        assert_eq!(request.pilot_type, "Оптика");
        assert_eq!(
            request.params,
            DroneParams::Reel {
                reel_km: "15 км".into()
            }
        );
        assert_eq!(request.quantity, "2");
        assert_eq!(request.note, "-");
    }

    #[test]
    fn invalid_flow_selection_does_not_advance() {
        let mut session = Session::flow_select();
        let outcome = handle(&mut session, "что-то другое");
        assert!(matches!(outcome, Outcome::Stay { .. }));
        assert_eq!(session.step, Step::FlowSelect);
    }

    #[test]
    fn drone_type_is_gated_by_pilot_type() {
        let mut session = Session::flow_select();
        feed(&mut session, &["Обычная заявка", "СТ", "Gamma3", "-"]);
        // ПВХ-1 belongs to КТ, not СТ.
        let outcome = handle(&mut session, "ПВХ-1");
        assert!(matches!(outcome, Outcome::Stay { .. }));
        assert_eq!(session.step, Step::DroneType);
        let outcome = handle(&mut session, "Молния-1");
        assert!(matches!(outcome, Outcome::Advance { .. }));
        assert_eq!(session.step, Step::VideoFreq);
    }

    #[test]
    fn manual_steps_reject_menu_words() {
        let mut session = Session::flow_select();
        feed(&mut session, &["Обычная заявка", "КТ"]);
        for menu_word in ["Активные заявки", "Завершенные заявки", "Оставить заявку"] {
            let outcome = handle(&mut session, menu_word);
            assert_eq!(
                outcome,
                stay(INVALID_CHOICE),
                "callsign step must reject {menu_word}"
            );
            assert_eq!(session.step, Step::Callsign);
        }
    }

    #[test]
    fn reel_options_depend_on_drone_type() {
        let mut session = Session::flow_select();
        feed(
            &mut session,
            &["Обычная заявка", "Оптика", "Beta2", "-", "КВН-День"],
        );
        // 15 км belongs to ПВХ-О; КВН-День offers 16/23.
        assert!(matches!(handle(&mut session, "15 км"), Outcome::Stay { .. }));
        assert!(matches!(handle(&mut session, "16 км"), Outcome::Advance { .. }));
    }

    #[test]
    fn repair_flow_end_to_end() {
        let mut session = Session::flow_select();
        let outcome = feed(
            &mut session,
            &["Ремонт", "Мавики", "Пульт", "Не включается", "1", "срочно"],
        );
        let Outcome::Done(FlowOutput::Repair(repair)) = outcome else {
            panic!("expected finished repair, got {outcome:?}");
        };
        assert_eq!(repair.unit, "Мавики");
        assert_eq!(repair.note, "срочно");
    }

    #[test]
    fn consumables_flow_end_to_end() {
        let mut session = Session::flow_select();
        let outcome = feed(
            &mut session,
            &["Комплектующие и расходники", "КТ", "Пропеллеры", "40", "-"],
        );
        let Outcome::Done(FlowOutput::Consumable(consumable)) = outcome else {
            panic!("expected finished consumable, got {outcome:?}");
        };
        assert_eq!(consumable.unit, "КТ");
        assert_eq!(consumable.needed, "Пропеллеры");
        assert_eq!(consumable.note, "-");
    }

    #[test]
    fn access_flow_grant_and_revoke_all() {
        let mut session = Session::access_admin();
        let outcome = feed(&mut session, &["123", "Завершение заявок", "Выдать"]);
        assert_eq!(
            outcome,
            Outcome::Done(FlowOutput::Access(AccessCommand {
                target: UserId(123),
                action: AccessAction::Grant(Capability::Complete),
            }))
        );

        let mut session = Session::access_admin();
        let outcome = feed(&mut session, &["456", "Забрать весь доступ"]);
        assert_eq!(
            outcome,
            Outcome::Done(FlowOutput::Access(AccessCommand {
                target: UserId(456),
                action: AccessAction::RevokeAll,
            }))
        );
    }

    #[test]
    fn access_target_requires_numeric_id() {
        let mut session = Session::access_admin();
        assert!(matches!(handle(&mut session, "@username"), Outcome::Stay { .. }));
        assert_eq!(session.step, Step::AccessTarget);
    }

    #[test]
    fn referral_flow_end_to_end() {
        let mut session = Session::referral();
        let outcome = feed(&mut session, &["789", "опытный пилот"]);
        assert_eq!(
            outcome,
            Outcome::Done(FlowOutput::Referral(NewRecommendation {
                candidate: UserId(789),
                note: "опытный пилот".into(),
            }))
        );
    }

    #[test]
    fn handle_is_total_over_every_step() {
        use strum::IntoEnumIterator;
        let probes = ["", "-", "мусор", "/start", "Оставить заявку", "12345", "Оптика"];
        for step in Step::iter() {
            for probe in probes {
                let mut session = session_at(step);
                // Must return without panicking, whatever the input.
                let _ = handle(&mut session, probe);
            }
        }
    }

    #[test]
    fn step_draft_mismatch_recovers_without_mutation() {
        let mut session = Session {
            step: Step::RepairUnit,
            draft: Draft::Equipment(EquipmentDraft::default()),
        };
        let before = session.clone();
        let outcome = handle(&mut session, "Мавики");
        assert_eq!(outcome, stay(RECOVERY_PROMPT));
        assert_eq!(session, before);
    }

    fn session_at(step: Step) -> Session {
        let draft = match step {
            Step::FlowSelect => Draft::Selecting,
            Step::PilotType
            | Step::Callsign
            | Step::PilotNumber
            | Step::DroneType
            | Step::ReelKm
            | Step::VideoFreq
            | Step::ControlFreq
            | Step::RxFirmware
            | Step::RegDomain
            | Step::BindPhrase
            | Step::Quantity
            | Step::Note => Draft::Equipment(EquipmentDraft {
                pilot_type: Some("КТ".into()),
                ..Default::default()
            }),
            Step::RepairUnit
            | Step::RepairEquipment
            | Step::RepairFault
            | Step::RepairQuantity
            | Step::RepairNote => Draft::Repair(RepairDraft::default()),
            Step::ConsumableUnit
            | Step::ConsumableNeeded
            | Step::ConsumableQuantity
            | Step::ConsumableNote => Draft::Consumable(ConsumableDraft::default()),
            Step::AccessTarget | Step::AccessCapability | Step::AccessAction => {
                Draft::Access(AccessDraft::default())
            }
            Step::ReferralCandidate | Step::ReferralNote => {
                Draft::Referral(ReferralDraft::default())
            }
        };
        Session { step, draft }
    }
}
