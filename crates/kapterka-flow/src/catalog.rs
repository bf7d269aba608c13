// SPDX-FileCopyrightText: 2026 Kapterka Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Static option catalog and reserved menu vocabulary.
//!
//! Button labels are the wire contract with operators' muscle memory; they
//! must match what the keyboards render byte for byte.

/// Pilot type whose equipment carries a fiber reel instead of radio gear.
pub const OPTICS: &str = "Оптика";

pub const PILOT_TYPES: &[&str] = &["КТ", "Оптика", "СТ"];

pub const REPAIR_UNITS: &[&str] = &["КТ", "СТ", "Оптика", "Мавики"];

pub const VIDEO_FREQUENCIES: &[&str] = &["5.8", "3.4", "3.3", "1.5", "1.2"];

pub const CONTROL_FREQUENCIES: &[&str] = &["2.4", "900", "700", "500", "300 кузнец"];

/// Allowed drone types per pilot type.
pub fn drone_types(pilot_type: &str) -> &'static [&'static str] {
    match pilot_type {
        "КТ" => &[
            "ПВХ-1",
            "ПВХ-1Т",
            "Бумеранг-8",
            "Бумеранг-10",
            "Бумеранг-8 День-Ночь",
            "Бумеранг-10 День-Ночь",
        ],
        "Оптика" => &["ПВХ-О", "ПВХ-ОТ", "КВН-День", "КВН День-Ночь"],
        "СТ" => &["Молния-1", "Молния-2"],
        _ => &[],
    }
}

/// Reel length options per optics drone type.
pub fn reel_options(drone_type: &str) -> &'static [&'static str] {
    match drone_type {
        "ПВХ-О" | "ПВХ-ОТ" => &["15 км", "20 км"],
        "КВН-День" | "КВН День-Ночь" => &["16 км", "23 км"],
        _ => &[],
    }
}

// Main-menu and flow-entry button labels.
pub const CMD_START: &str = "/start";
pub const CMD_MENU: &str = "Меню";
pub const BTN_NEW_REQUEST: &str = "Оставить заявку";
pub const BTN_ACTIVE: &str = "Активные заявки";
pub const BTN_COMPLETED: &str = "Завершенные заявки";
pub const BTN_ACCESS: &str = "Доступы";
pub const BTN_REFERRAL: &str = "Рекомендовать";
pub const BTN_CANCEL: &str = "Отменить заявку";

// Flow-selection buttons.
pub const BTN_EQUIPMENT: &str = "Обычная заявка";
pub const BTN_REPAIR: &str = "Ремонт";
pub const BTN_CONSUMABLES: &str = "Комплектующие и расходники";

// Access-administration buttons.
pub const BTN_REVOKE_ALL: &str = "Забрать весь доступ";
pub const BTN_GRANT: &str = "Выдать";
pub const BTN_REVOKE: &str = "Забрать";

/// Reserved menu-command strings. Manual-text steps reject these so menu
/// words are never captured as field values.
pub fn is_menu_command(text: &str) -> bool {
    matches!(
        text,
        CMD_START | CMD_MENU | BTN_NEW_REQUEST | BTN_ACTIVE | BTN_COMPLETED | BTN_ACCESS
            | BTN_REFERRAL
    )
}
