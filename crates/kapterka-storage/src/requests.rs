// SPDX-FileCopyrightText: 2026 Kapterka Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Equipment request store.
//!
//! Column layout is the compatibility contract for existing tables; the
//! radio-channel columns and the reel column are mutually exclusive per row,
//! with the unused group holding `-`.

use chrono::Local;

use kapterka_core::model::{
    format_timestamp, DroneParams, EquipmentRequest, NewRequest, Status, StatusLabels, PLACEHOLDER,
};
use kapterka_core::KapterkaError;

use crate::table::{parse_id_cell, parse_timestamp_cell, Record, Table};

impl Record for EquipmentRequest {
    const TABLE: &'static str = "Requests";
    const COLUMNS: &'static [&'static str] = &[
        "ID",
        "Reporter",
        "CreatedAt",
        "CompletedAt",
        "Callsign",
        "PilotType",
        "PilotNumber",
        "DroneType",
        "VideoFreq",
        "ControlFreq",
        "RxFirmware",
        "RegDomain",
        "BindPhrase",
        "ReelKm",
        "Quantity",
        "Note",
        "Status",
    ];

    fn from_row(row: &[String]) -> Result<Self, KapterkaError> {
        let completed_at = if row[3].trim().is_empty() {
            None
        } else {
            Some(parse_timestamp_cell(Self::TABLE, "CompletedAt", &row[3])?)
        };
        let status = StatusLabels::REQUESTS.decode(&row[16]).ok_or_else(|| {
            KapterkaError::Corrupt {
                table: Self::TABLE.to_string(),
                message: format!("unknown status label `{}`", row[16]),
            }
        })?;
        Ok(EquipmentRequest {
            id: parse_id_cell(Self::TABLE, &row[0])?,
            reporter: row[1].clone(),
            created_at: parse_timestamp_cell(Self::TABLE, "CreatedAt", &row[2])?,
            completed_at,
            callsign: row[4].clone(),
            pilot_type: row[5].clone(),
            pilot_number: if row[6].trim().is_empty() {
                PLACEHOLDER.to_string()
            } else {
                row[6].clone()
            },
            drone_type: row[7].clone(),
            video_freq: row[8].clone(),
            control_freq: row[9].clone(),
            rx_firmware: row[10].clone(),
            reg_domain: row[11].clone(),
            bind_phrase: row[12].clone(),
            reel_km: row[13].clone(),
            quantity: row[14].clone(),
            note: row[15].clone(),
            status,
        })
    }

    fn id(&self) -> i64 {
        self.id
    }
}

/// Table store specialized to equipment requests.
pub struct RequestStore {
    table: Table<EquipmentRequest>,
}

impl RequestStore {
    pub fn open(path: impl Into<std::path::PathBuf>) -> Result<Self, KapterkaError> {
        Ok(Self {
            table: Table::open(path)?,
        })
    }

    /// Persists a finished equipment request and returns its id.
    pub fn add(&self, reporter: &str, request: &NewRequest) -> Result<i64, KapterkaError> {
        let placeholder = || PLACEHOLDER.to_string();
        let (video_freq, control_freq, rx_firmware, reg_domain, bind_phrase, reel_km) =
            match &request.params {
                DroneParams::Radio {
                    video_freq,
                    control_freq,
                    rx_firmware,
                    reg_domain,
                    bind_phrase,
                } => (
                    video_freq.clone(),
                    control_freq.clone(),
                    rx_firmware.clone(),
                    reg_domain.clone(),
                    bind_phrase.clone(),
                    placeholder(),
                ),
                DroneParams::Reel { reel_km } => (
                    placeholder(),
                    placeholder(),
                    placeholder(),
                    placeholder(),
                    placeholder(),
                    reel_km.clone(),
                ),
            };

        let pilot_number = if request.pilot_number.trim().is_empty() {
            placeholder()
        } else {
            request.pilot_number.clone()
        };

        self.table.append(&[
            ("Reporter", reporter.to_string()),
            ("CreatedAt", format_timestamp(Local::now().naive_local())),
            ("CompletedAt", String::new()),
            ("Callsign", request.callsign.clone()),
            ("PilotType", request.pilot_type.clone()),
            ("PilotNumber", pilot_number),
            ("DroneType", request.drone_type.clone()),
            ("VideoFreq", video_freq),
            ("ControlFreq", control_freq),
            ("RxFirmware", rx_firmware),
            ("RegDomain", reg_domain),
            ("BindPhrase", bind_phrase),
            ("ReelKm", reel_km),
            ("Quantity", request.quantity.clone()),
            ("Note", request.note.clone()),
            ("Status", StatusLabels::REQUESTS.active.to_string()),
        ])
    }

    pub fn get(&self, id: i64) -> Result<Option<EquipmentRequest>, KapterkaError> {
        self.table.find(id)
    }

    pub fn by_status(&self, status: Status) -> Result<Vec<EquipmentRequest>, KapterkaError> {
        self.table.filter(|request| request.status == status)
    }

    /// Transitions an active request to completed, stamping the completion
    /// time. Returns `false` for absent or already-completed requests.
    pub fn complete(&self, id: i64) -> Result<bool, KapterkaError> {
        self.table.transition_status(
            id,
            StatusLabels::REQUESTS.active,
            StatusLabels::REQUESTS.completed,
            &[(
                "CompletedAt",
                format_timestamp(Local::now().naive_local()),
            )],
        )
    }
}
