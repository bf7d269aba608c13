// SPDX-FileCopyrightText: 2026 Kapterka Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Access store: the users table (keyed upserts on the user id) and the
//! append-only recommendations log.
//!
//! Display names refresh on every inbound message; capability flags change
//! only through the administrative flow or the startup bootstrap.

use chrono::{Local, NaiveDateTime};

use kapterka_core::model::{
    format_timestamp, NewRecommendation, Recommendation, UserEntry, PLACEHOLDER,
};
use kapterka_core::types::{Capability, UserId};
use kapterka_core::KapterkaError;

use crate::table::{parse_id_cell, parse_timestamp_cell, Record, Table};

impl Record for UserEntry {
    const TABLE: &'static str = "Users";
    const COLUMNS: &'static [&'static str] = &[
        "UserId",
        "DisplayName",
        "CanUseBot",
        "CanComplete",
        "CanManageAccess",
        "NotifyRequests",
        "NotifyRecommendations",
        "AddedAt",
    ];

    fn from_row(row: &[String]) -> Result<Self, KapterkaError> {
        Ok(UserEntry {
            user_id: UserId(parse_id_cell(Self::TABLE, &row[0])?),
            display_name: row[1].clone(),
            can_use_bot: parse_flag(&row[2])?,
            can_complete: parse_flag(&row[3])?,
            can_manage_access: parse_flag(&row[4])?,
            notify_requests: parse_flag(&row[5])?,
            notify_recommendations: parse_flag(&row[6])?,
            added_at: parse_timestamp_cell(Self::TABLE, "AddedAt", &row[7])?,
        })
    }

    fn id(&self) -> i64 {
        self.user_id.0
    }
}

impl Record for Recommendation {
    const TABLE: &'static str = "Recommendations";
    const COLUMNS: &'static [&'static str] = &["ID", "Date", "Recommender", "CandidateId", "Note"];

    fn from_row(row: &[String]) -> Result<Self, KapterkaError> {
        let candidate = row[3]
            .trim()
            .parse::<i64>()
            .map_err(|_| KapterkaError::Corrupt {
                table: Self::TABLE.to_string(),
                message: format!("non-numeric candidate id `{}`", row[3]),
            })?;
        Ok(Recommendation {
            id: parse_id_cell(Self::TABLE, &row[0])?,
            date: parse_timestamp_cell(Self::TABLE, "Date", &row[1])?,
            recommender: row[2].clone(),
            candidate: UserId(candidate),
            note: row[4].clone(),
        })
    }

    fn id(&self) -> i64 {
        self.id
    }
}

fn parse_flag(cell: &str) -> Result<bool, KapterkaError> {
    match cell.trim() {
        "1" => Ok(true),
        "0" => Ok(false),
        other => Err(KapterkaError::Corrupt {
            table: UserEntry::TABLE.to_string(),
            message: format!("flag cell must be 1 or 0, got `{other}`"),
        }),
    }
}

fn flag_column(capability: Capability) -> usize {
    match capability {
        Capability::UseBot => 2,
        Capability::Complete => 3,
        Capability::ManageAccess => 4,
        Capability::NotifyRequests => 5,
        Capability::NotifyRecommendations => 6,
    }
}

fn encode_flag(value: bool) -> String {
    if value { "1" } else { "0" }.to_string()
}

fn encode_user(entry: &UserEntry) -> Vec<String> {
    vec![
        entry.user_id.to_string(),
        entry.display_name.clone(),
        encode_flag(entry.can_use_bot),
        encode_flag(entry.can_complete),
        encode_flag(entry.can_manage_access),
        encode_flag(entry.notify_requests),
        encode_flag(entry.notify_recommendations),
        format_timestamp(entry.added_at),
    ]
}

/// The two access tables behind one store.
pub struct AccessStore {
    users: Table<UserEntry>,
    recommendations: Table<Recommendation>,
}

impl AccessStore {
    pub fn open(
        users_path: impl Into<std::path::PathBuf>,
        recommendations_path: impl Into<std::path::PathBuf>,
    ) -> Result<Self, KapterkaError> {
        Ok(Self {
            users: Table::open(users_path)?,
            recommendations: Table::open(recommendations_path)?,
        })
    }

    fn default_entry(user_id: UserId, now: NaiveDateTime) -> Vec<String> {
        encode_user(&UserEntry::new(user_id, PLACEHOLDER, now))
    }

    /// Refreshes the display name for a user, creating the entry (with every
    /// flag off) on first contact. The first-seen timestamp is set once and
    /// never refreshed.
    pub fn touch_display_name(
        &self,
        user_id: UserId,
        display_name: &str,
    ) -> Result<UserEntry, KapterkaError> {
        let now = Local::now().naive_local();
        self.users.upsert_by_key(
            "UserId",
            &user_id.to_string(),
            || Self::default_entry(user_id, now),
            |row| row[1] = display_name.to_string(),
        )
    }

    /// Sets one capability flag, creating the entry if the user is unknown.
    pub fn set_flag(
        &self,
        user_id: UserId,
        capability: Capability,
        value: bool,
    ) -> Result<UserEntry, KapterkaError> {
        let now = Local::now().naive_local();
        self.users.upsert_by_key(
            "UserId",
            &user_id.to_string(),
            || Self::default_entry(user_id, now),
            |row| row[flag_column(capability)] = encode_flag(value),
        )
    }

    /// Clears every one of the five flags for the user.
    pub fn revoke_all(&self, user_id: UserId) -> Result<UserEntry, KapterkaError> {
        let now = Local::now().naive_local();
        self.users.upsert_by_key(
            "UserId",
            &user_id.to_string(),
            || Self::default_entry(user_id, now),
            |row| {
                for column in 2..=6 {
                    row[column] = encode_flag(false);
                }
            },
        )
    }

    pub fn user(&self, user_id: UserId) -> Result<Option<UserEntry>, KapterkaError> {
        self.users.find(user_id.0)
    }

    pub fn all_users(&self) -> Result<Vec<UserEntry>, KapterkaError> {
        self.users.filter(|_| true)
    }

    /// Unions the given per-capability id sets into the flags. Flags not
    /// mentioned are left as they are; safe to call on every process start.
    pub fn bootstrap(
        &self,
        defaults: &[(Capability, &[UserId])],
    ) -> Result<(), KapterkaError> {
        for (capability, ids) in defaults {
            for id in *ids {
                self.set_flag(*id, *capability, true)?;
            }
        }
        Ok(())
    }

    /// Appends to the recommendations log and returns the new id.
    pub fn add_recommendation(
        &self,
        recommender: &str,
        recommendation: &NewRecommendation,
    ) -> Result<i64, KapterkaError> {
        let note = if recommendation.note.trim().is_empty() {
            PLACEHOLDER.to_string()
        } else {
            recommendation.note.clone()
        };
        self.recommendations.append(&[
            ("Date", format_timestamp(Local::now().naive_local())),
            ("Recommender", recommender.to_string()),
            ("CandidateId", recommendation.candidate.to_string()),
            ("Note", note),
        ])
    }

    pub fn recommendations(&self) -> Result<Vec<Recommendation>, KapterkaError> {
        self.recommendations.filter(|_| true)
    }

    pub fn recommendation(&self, id: i64) -> Result<Option<Recommendation>, KapterkaError> {
        self.recommendations.find(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn open_store(dir: &tempfile::TempDir) -> AccessStore {
        AccessStore::open(
            dir.path().join("users.csv"),
            dir.path().join("recommendations.csv"),
        )
        .unwrap()
    }

    #[test]
    fn touch_creates_then_refreshes_display_name() {
        let dir = tempdir().unwrap();
        let store = open_store(&dir);

        let created = store.touch_display_name(UserId(10), "@old").unwrap();
        assert_eq!(created.display_name, "@old");
        assert!(!created.can_use_bot);

        let refreshed = store.touch_display_name(UserId(10), "@new").unwrap();
        assert_eq!(refreshed.display_name, "@new");
        assert_eq!(refreshed.added_at, created.added_at);
        assert_eq!(store.all_users().unwrap().len(), 1);
    }

    #[test]
    fn set_flag_touches_only_the_named_flag() {
        let dir = tempdir().unwrap();
        let store = open_store(&dir);
        store.set_flag(UserId(10), Capability::UseBot, true).unwrap();
        let entry = store
            .set_flag(UserId(10), Capability::Complete, true)
            .unwrap();
        assert!(entry.can_use_bot);
        assert!(entry.can_complete);
        assert!(!entry.can_manage_access);
    }

    #[test]
    fn revoke_all_clears_every_flag() {
        let dir = tempdir().unwrap();
        let store = open_store(&dir);
        use strum::IntoEnumIterator;
        for capability in Capability::iter() {
            store.set_flag(UserId(10), capability, true).unwrap();
        }
        let entry = store.revoke_all(UserId(10)).unwrap();
        for capability in Capability::iter() {
            assert!(!entry.flag(capability));
        }
    }

    #[test]
    fn bootstrap_is_an_idempotent_union() {
        let dir = tempdir().unwrap();
        let store = open_store(&dir);
        // Pre-existing grant that the bootstrap sets must not clear.
        store
            .set_flag(UserId(1), Capability::NotifyRequests, true)
            .unwrap();

        let closers = [UserId(1), UserId(2)];
        let defaults: &[(Capability, &[UserId])] = &[
            (Capability::UseBot, &closers),
            (Capability::Complete, &closers),
        ];
        store.bootstrap(defaults).unwrap();
        store.bootstrap(defaults).unwrap();

        let one = store.user(UserId(1)).unwrap().unwrap();
        assert!(one.can_use_bot);
        assert!(one.can_complete);
        assert!(one.notify_requests);
        assert_eq!(store.all_users().unwrap().len(), 2);
    }

    #[test]
    fn recommendations_are_append_only_with_increasing_ids() {
        let dir = tempdir().unwrap();
        let store = open_store(&dir);
        let first = store
            .add_recommendation(
                "@mentor",
                &NewRecommendation {
                    candidate: UserId(77),
                    note: "опытный пилот".into(),
                },
            )
            .unwrap();
        let second = store
            .add_recommendation(
                "@mentor",
                &NewRecommendation {
                    candidate: UserId(78),
                    note: String::new(),
                },
            )
            .unwrap();
        assert!(second > first);

        let all = store.recommendations().unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].id, second);
        assert_eq!(all[0].note, "-");
        assert_eq!(all[1].candidate, UserId(77));
    }

    #[test]
    fn flags_persist_as_ones_and_zeroes() {
        let dir = tempdir().unwrap();
        let store = open_store(&dir);
        store.set_flag(UserId(5), Capability::UseBot, true).unwrap();
        let raw = std::fs::read_to_string(dir.path().join("users.csv")).unwrap();
        let data_line = raw.lines().nth(1).unwrap();
        assert!(data_line.contains(",1,0,0,0,0,"));
    }
}
