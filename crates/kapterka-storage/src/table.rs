// SPDX-FileCopyrightText: 2026 Kapterka Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Generic persistence engine for one header-led CSV table.
//!
//! A table is a header row naming its columns followed by data rows led by a
//! numeric-id cell. Every mutating operation performs a full load-mutate-save
//! cycle under the table's mutex, so concurrent callers against the same
//! table serialize completely and no partial write is ever visible in
//! process. There is no cache between operations -- each call re-reads the
//! file, so external edits are picked up at the cost of one full scan and
//! rewrite per call. Saves go through a temp file + rename so a crashed
//! write leaves the previous table intact.

use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::debug;

use kapterka_core::KapterkaError;

/// A typed row of one table.
///
/// Implementations declare the table's ordered header (a compatibility
/// contract -- existing rows are positional, so the order must never change
/// without a migration step) and how to deserialize one data row. Malformed
/// cells must surface as [`KapterkaError::Corrupt`], never be skipped.
pub trait Record: Sized {
    /// Table name used in error messages.
    const TABLE: &'static str;

    /// Ordered column names; index 0 is the numeric-id column.
    const COLUMNS: &'static [&'static str];

    fn from_row(row: &[String]) -> Result<Self, KapterkaError>;

    fn id(&self) -> i64;
}

/// One CSV-backed table of `R` rows.
pub struct Table<R: Record> {
    path: PathBuf,
    lock: Mutex<()>,
    _record: PhantomData<R>,
}

impl<R: Record> Table<R> {
    /// Opens the table, creating the file with the declared header on first
    /// use. On reopen the header cells are re-asserted in place; extra
    /// columns beyond the declared set are preserved (columns are additive).
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, KapterkaError> {
        let table = Self {
            path: path.into(),
            lock: Mutex::new(()),
            _record: PhantomData,
        };
        let _guard = table.lock.lock().expect("table lock poisoned");
        let mut rows = if table.path.exists() {
            table.load()?
        } else {
            Vec::new()
        };
        if rows.is_empty() {
            rows.push(R::COLUMNS.iter().map(|c| c.to_string()).collect());
        } else {
            let header = &mut rows[0];
            if header.len() < R::COLUMNS.len() {
                header.resize(R::COLUMNS.len(), String::new());
            }
            for (i, column) in R::COLUMNS.iter().enumerate() {
                header[i] = column.to_string();
            }
        }
        table.save(&rows)?;
        drop(_guard);
        debug!(path = %table.path.display(), table = R::TABLE, "table opened");
        Ok(table)
    }

    /// Appends a row, assigning the next id.
    ///
    /// The id is one plus the maximum numeric id currently in the id column;
    /// non-numeric and empty id cells are treated as absent, so ids are never
    /// reused even if rows are later blanked. Declared columns missing from
    /// `fields` fall back to `-`.
    pub fn append(&self, fields: &[(&str, String)]) -> Result<i64, KapterkaError> {
        let _guard = self.lock.lock().expect("table lock poisoned");
        let mut rows = self.load()?;
        let next_id = rows
            .iter()
            .skip(1)
            .filter_map(|row| row.first().and_then(|cell| cell.trim().parse::<i64>().ok()))
            .max()
            .unwrap_or(0)
            + 1;

        let mut row = Vec::with_capacity(R::COLUMNS.len());
        row.push(next_id.to_string());
        for column in &R::COLUMNS[1..] {
            let value = fields
                .iter()
                .find(|(name, _)| name == column)
                .map(|(_, value)| value.clone())
                .unwrap_or_else(|| "-".to_string());
            row.push(value);
        }
        rows.push(row);
        self.save(&rows)?;
        Ok(next_id)
    }

    /// Finds the row whose id cell equals `id`. Rows with unparseable id
    /// cells are passed over by the scan; ids are unique by construction, so
    /// the first match is the only match.
    pub fn find(&self, id: i64) -> Result<Option<R>, KapterkaError> {
        let _guard = self.lock.lock().expect("table lock poisoned");
        let rows = self.load()?;
        for row in rows.iter().skip(1) {
            if row_id(row) == Some(id) {
                return R::from_row(row).map(Some);
            }
        }
        Ok(None)
    }

    /// Deserializes every row (skipping blank-id rows), keeps those matching
    /// the predicate, and returns them newest first (descending id).
    ///
    /// A row that fails to deserialize aborts the whole read with
    /// [`KapterkaError::Corrupt`]; store corruption is not silently skipped.
    pub fn filter(&self, predicate: impl Fn(&R) -> bool) -> Result<Vec<R>, KapterkaError> {
        let _guard = self.lock.lock().expect("table lock poisoned");
        let rows = self.load()?;
        let mut matched = Vec::new();
        for row in rows.iter().skip(1) {
            if row.first().is_none_or(|cell| cell.trim().is_empty()) {
                continue;
            }
            let record = R::from_row(row)?;
            if predicate(&record) {
                matched.push(record);
            }
        }
        matched.sort_by(|a, b| b.id().cmp(&a.id()));
        Ok(matched)
    }

    /// Sets the status column (and any side-effect columns) of the row with
    /// the given id, but only if its current status equals
    /// `required_current`. Returns `false` without mutation when the row is
    /// absent or in any other status.
    pub fn transition_status(
        &self,
        id: i64,
        required_current: &str,
        new_status: &str,
        side_effects: &[(&str, String)],
    ) -> Result<bool, KapterkaError> {
        let status_idx = self.column_index("Status")?;
        let _guard = self.lock.lock().expect("table lock poisoned");
        let mut rows = self.load()?;
        let Some(position) = rows
            .iter()
            .enumerate()
            .skip(1)
            .find(|(_, row)| row_id(row) == Some(id))
            .map(|(position, _)| position)
        else {
            return Ok(false);
        };
        if rows[position].get(status_idx).map(String::as_str) != Some(required_current) {
            return Ok(false);
        }
        rows[position][status_idx] = new_status.to_string();
        for (column, value) in side_effects {
            let idx = column_position::<R>(column)?;
            rows[position][idx] = value.clone();
        }
        self.save(&rows)?;
        Ok(true)
    }

    /// Locates a row by a non-id key column, or creates it from
    /// `default_row`, then applies `mutate` and commits. Returns the row as
    /// deserialized after the mutation.
    pub fn upsert_by_key(
        &self,
        key_column: &str,
        key: &str,
        default_row: impl FnOnce() -> Vec<String>,
        mutate: impl FnOnce(&mut Vec<String>),
    ) -> Result<R, KapterkaError> {
        let key_idx = self.column_index(key_column)?;
        let _guard = self.lock.lock().expect("table lock poisoned");
        let mut rows = self.load()?;
        let position = rows
            .iter()
            .skip(1)
            .position(|row| row.get(key_idx).map(String::as_str) == Some(key))
            .map(|p| p + 1);

        let idx = match position {
            Some(idx) => idx,
            None => {
                let mut row = default_row();
                row.resize(R::COLUMNS.len(), String::new());
                row[key_idx] = key.to_string();
                rows.push(row);
                rows.len() - 1
            }
        };
        mutate(&mut rows[idx]);
        let record = R::from_row(&rows[idx])?;
        self.save(&rows)?;
        Ok(record)
    }

    fn column_index(&self, column: &str) -> Result<usize, KapterkaError> {
        column_position::<R>(column)
    }

    fn load(&self) -> Result<Vec<Vec<String>>, KapterkaError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_path(&self.path)
            .map_err(|e| self.io_error(e))?;
        let mut rows = Vec::new();
        for result in reader.records() {
            let record = result.map_err(|e| self.io_error(e))?;
            let mut row: Vec<String> = record.iter().map(str::to_string).collect();
            if row.len() < R::COLUMNS.len() {
                row.resize(R::COLUMNS.len(), String::new());
            }
            rows.push(row);
        }
        Ok(rows)
    }

    fn save(&self, rows: &[Vec<String>]) -> Result<(), KapterkaError> {
        let tmp = self.path.with_extension("tmp");
        {
            let mut writer = csv::WriterBuilder::new()
                .flexible(true)
                .from_path(&tmp)
                .map_err(|e| self.io_error(e))?;
            for row in rows {
                writer.write_record(row).map_err(|e| self.io_error(e))?;
            }
            writer.flush().map_err(|e| self.io_error(e))?;
        }
        std::fs::rename(&tmp, &self.path).map_err(|e| self.io_error(e))
    }

    fn io_error(
        &self,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> KapterkaError {
        KapterkaError::Table {
            path: self.path.display().to_string(),
            source: Box::new(source),
        }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn column_position<R: Record>(column: &str) -> Result<usize, KapterkaError> {
    R::COLUMNS
        .iter()
        .position(|c| *c == column)
        .ok_or_else(|| {
            KapterkaError::Internal(format!(
                "table {} has no column {column}",
                R::TABLE
            ))
        })
}

fn row_id(row: &[String]) -> Option<i64> {
    row.first().and_then(|cell| cell.trim().parse::<i64>().ok())
}

/// Parses a required numeric id cell, surfacing corruption.
pub(crate) fn parse_id_cell(table: &str, cell: &str) -> Result<i64, KapterkaError> {
    cell.trim()
        .parse::<i64>()
        .map_err(|_| KapterkaError::Corrupt {
            table: table.to_string(),
            message: format!("non-numeric id cell `{cell}`"),
        })
}

/// Parses a required timestamp cell, surfacing corruption.
pub(crate) fn parse_timestamp_cell(
    table: &str,
    column: &str,
    cell: &str,
) -> Result<chrono::NaiveDateTime, KapterkaError> {
    kapterka_core::model::parse_timestamp(cell).map_err(|_| KapterkaError::Corrupt {
        table: table.to_string(),
        message: format!("unparseable {column} timestamp `{cell}`"),
    })
}
