// SPDX-FileCopyrightText: 2026 Kapterka Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Display cards for stored records.

use kapterka_core::model::{
    ConsumableItem, EquipmentRequest, Recommendation, RepairItem, Status, StatusLabels,
};

use kapterka_flow::catalog;

/// Card shown for one equipment request. Only the parameter group that is
/// meaningful for the pilot type is rendered.
pub fn request_card(request: &EquipmentRequest) -> String {
    let mut lines = vec![
        format!("ID: {}", request.id),
        format!("Кто оставил: {}", request.reporter),
        format!("Дата: {}", request.created_at.format("%d.%m")),
        format!("Время: {}", request.created_at.format("%H:%M")),
        format!("Позывной: {}", request.callsign),
        format!("Тип: {}", request.pilot_type),
        format!("Номер пилота: {}", request.pilot_number),
        format!("Тип дрона: {}", request.drone_type),
    ];

    if request.pilot_type == catalog::OPTICS {
        lines.push(format!("Катушка км: {}", request.reel_km));
    } else {
        lines.push(format!("Частота видео: {}", request.video_freq));
        lines.push(format!("Частота управления: {}", request.control_freq));
        lines.push(format!("Прошивка RX: {}", request.rx_firmware));
        lines.push(format!("Regularity Domain: {}", request.reg_domain));
        lines.push(format!("BIND-фраза: {}", request.bind_phrase));
    }

    lines.push(format!("Количество: {}", request.quantity));
    lines.push(format!("Примечание: {}", request.note));

    if request.status == Status::Completed
        && let Some(completed_at) = request.completed_at
    {
        lines.push(format!("Завершено: {}", completed_at.format("%d.%m %H:%M")));
    }

    lines.join("\n")
}

/// Card shown for one repair record.
pub fn repair_card(repair: &RepairItem) -> String {
    [
        format!("ID: {}", repair.id),
        format!("Кто передал: {}", repair.reporter),
        format!("Дата передачи: {}", repair.transfer_date.format("%d.%m %H:%M")),
        format!("Подразделение: {}", repair.unit),
        format!("Оборудование: {}", repair.equipment),
        format!("Неисправность: {}", repair.fault),
        format!("Количество: {}", repair.quantity),
        format!("Примечание: {}", repair.note),
        format!("Статус: {}", StatusLabels::REPAIRS.encode(repair.status)),
    ]
    .join("\n")
}

/// Card shown for one consumables record.
pub fn consumable_card(item: &ConsumableItem) -> String {
    [
        format!("ID: {}", item.id),
        format!("Дата запроса: {}", item.request_date.format("%d.%m %H:%M")),
        format!("Запросил: {}", item.requested_by),
        format!("Подразделение: {}", item.unit),
        format!("Необходимо: {}", item.needed),
        format!("Количество: {}", item.quantity),
        format!("Примечание: {}", item.note),
        format!("Статус: {}", StatusLabels::REPAIRS.encode(item.status)),
    ]
    .join("\n")
}

/// Card shown for one recommendation.
pub fn recommendation_card(recommendation: &Recommendation) -> String {
    [
        format!("ID: {}", recommendation.id),
        format!("Дата: {}", recommendation.date.format("%d.%m %H:%M")),
        format!("Кто рекомендует: {}", recommendation.recommender),
        format!("ID кандидата: {}", recommendation.candidate),
        format!("Примечание: {}", recommendation.note),
    ]
    .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use kapterka_core::model::parse_timestamp;

    fn request(pilot_type: &str) -> EquipmentRequest {
        EquipmentRequest {
            id: 3,
            reporter: "@pilot".into(),
            created_at: parse_timestamp("2026-03-01T14:05:09").unwrap(),
            completed_at: None,
            callsign: "Alpha1".into(),
            pilot_type: pilot_type.into(),
            pilot_number: "-".into(),
            drone_type: "ПВХ-1".into(),
            video_freq: "5.8".into(),
            control_freq: "2.4".into(),
            rx_firmware: "Orange5".into(),
            reg_domain: "FCC".into(),
            bind_phrase: "bind".into(),
            reel_km: "-".into(),
            quantity: "3".into(),
            note: "-".into(),
            status: Status::Active,
        }
    }

    #[test]
    fn radio_card_shows_channels_not_reel() {
        let card = request_card(&request("КТ"));
        assert!(card.contains("Частота видео: 5.8"));
        assert!(!card.contains("Катушка км"));
        assert!(!card.contains("Завершено"));
    }

    #[test]
    fn optics_card_shows_reel_not_channels() {
        let mut optics = request("Оптика");
        optics.reel_km = "15 км".into();
        let card = request_card(&optics);
        assert!(card.contains("Катушка км: 15 км"));
        assert!(!card.contains("Частота видео"));
    }

    #[test]
    fn completed_card_carries_completion_stamp() {
        let mut done = request("КТ");
        done.status = Status::Completed;
        done.completed_at = Some(parse_timestamp("2026-03-02T09:30:00").unwrap());
        let card = request_card(&done);
        assert!(card.contains("Завершено: 02.03 09:30"));
    }

    #[test]
    fn repair_card_renders_localized_status() {
        let repair = RepairItem {
            id: 1,
            reporter: "@tech".into(),
            transfer_date: parse_timestamp("2026-03-01T10:00:00").unwrap(),
            unit: "Мавики".into(),
            equipment: "Пульт".into(),
            fault: "Не включается".into(),
            quantity: "1".into(),
            note: "-".into(),
            status: Status::Active,
        };
        assert!(repair_card(&repair).contains("Статус: В работе"));
    }
}
