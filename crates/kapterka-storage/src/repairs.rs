// SPDX-FileCopyrightText: 2026 Kapterka Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Repair store. Same lifecycle as equipment requests, localized status
//! labels, no completion timestamp column.

use chrono::Local;

use kapterka_core::model::{format_timestamp, NewRepair, RepairItem, Status, StatusLabels};
use kapterka_core::KapterkaError;

use crate::table::{parse_id_cell, parse_timestamp_cell, Record, Table};

impl Record for RepairItem {
    const TABLE: &'static str = "Repairs";
    const COLUMNS: &'static [&'static str] = &[
        "ID",
        "Reporter",
        "TransferDate",
        "Unit",
        "Equipment",
        "Fault",
        "Quantity",
        "Note",
        "Status",
    ];

    fn from_row(row: &[String]) -> Result<Self, KapterkaError> {
        let status = StatusLabels::REPAIRS.decode(&row[8]).ok_or_else(|| {
            KapterkaError::Corrupt {
                table: Self::TABLE.to_string(),
                message: format!("unknown status label `{}`", row[8]),
            }
        })?;
        Ok(RepairItem {
            id: parse_id_cell(Self::TABLE, &row[0])?,
            reporter: row[1].clone(),
            transfer_date: parse_timestamp_cell(Self::TABLE, "TransferDate", &row[2])?,
            unit: row[3].clone(),
            equipment: row[4].clone(),
            fault: row[5].clone(),
            quantity: row[6].clone(),
            note: row[7].clone(),
            status,
        })
    }

    fn id(&self) -> i64 {
        self.id
    }
}

/// Table store specialized to repairs.
pub struct RepairStore {
    table: Table<RepairItem>,
}

impl RepairStore {
    pub fn open(path: impl Into<std::path::PathBuf>) -> Result<Self, KapterkaError> {
        Ok(Self {
            table: Table::open(path)?,
        })
    }

    pub fn add(&self, reporter: &str, repair: &NewRepair) -> Result<i64, KapterkaError> {
        self.table.append(&[
            ("Reporter", reporter.to_string()),
            ("TransferDate", format_timestamp(Local::now().naive_local())),
            ("Unit", repair.unit.clone()),
            ("Equipment", repair.equipment.clone()),
            ("Fault", repair.fault.clone()),
            ("Quantity", repair.quantity.clone()),
            ("Note", repair.note.clone()),
            ("Status", StatusLabels::REPAIRS.active.to_string()),
        ])
    }

    pub fn get(&self, id: i64) -> Result<Option<RepairItem>, KapterkaError> {
        self.table.find(id)
    }

    pub fn by_status(&self, status: Status) -> Result<Vec<RepairItem>, KapterkaError> {
        self.table.filter(|repair| repair.status == status)
    }

    pub fn complete(&self, id: i64) -> Result<bool, KapterkaError> {
        self.table.transition_status(
            id,
            StatusLabels::REPAIRS.active,
            StatusLabels::REPAIRS.completed,
            &[],
        )
    }
}
