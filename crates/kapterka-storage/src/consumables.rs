// SPDX-FileCopyrightText: 2026 Kapterka Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Consumables store. Shares the repair status vocabulary.

use chrono::Local;

use kapterka_core::model::{format_timestamp, ConsumableItem, NewConsumable, Status, StatusLabels};
use kapterka_core::KapterkaError;

use crate::table::{parse_id_cell, parse_timestamp_cell, Record, Table};

impl Record for ConsumableItem {
    const TABLE: &'static str = "Consumables";
    const COLUMNS: &'static [&'static str] = &[
        "ID",
        "RequestDate",
        "RequestedBy",
        "Unit",
        "Needed",
        "Quantity",
        "Note",
        "Status",
    ];

    fn from_row(row: &[String]) -> Result<Self, KapterkaError> {
        let status = StatusLabels::REPAIRS.decode(&row[7]).ok_or_else(|| {
            KapterkaError::Corrupt {
                table: Self::TABLE.to_string(),
                message: format!("unknown status label `{}`", row[7]),
            }
        })?;
        Ok(ConsumableItem {
            id: parse_id_cell(Self::TABLE, &row[0])?,
            request_date: parse_timestamp_cell(Self::TABLE, "RequestDate", &row[1])?,
            requested_by: row[2].clone(),
            unit: row[3].clone(),
            needed: row[4].clone(),
            quantity: row[5].clone(),
            note: row[6].clone(),
            status,
        })
    }

    fn id(&self) -> i64 {
        self.id
    }
}

/// Table store specialized to consumables.
pub struct ConsumablesStore {
    table: Table<ConsumableItem>,
}

impl ConsumablesStore {
    pub fn open(path: impl Into<std::path::PathBuf>) -> Result<Self, KapterkaError> {
        Ok(Self {
            table: Table::open(path)?,
        })
    }

    pub fn add(&self, reporter: &str, consumable: &NewConsumable) -> Result<i64, KapterkaError> {
        self.table.append(&[
            ("RequestDate", format_timestamp(Local::now().naive_local())),
            ("RequestedBy", reporter.to_string()),
            ("Unit", consumable.unit.clone()),
            ("Needed", consumable.needed.clone()),
            ("Quantity", consumable.quantity.clone()),
            ("Note", consumable.note.clone()),
            ("Status", StatusLabels::REPAIRS.active.to_string()),
        ])
    }

    pub fn get(&self, id: i64) -> Result<Option<ConsumableItem>, KapterkaError> {
        self.table.find(id)
    }

    pub fn by_status(&self, status: Status) -> Result<Vec<ConsumableItem>, KapterkaError> {
        self.table.filter(|item| item.status == status)
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
