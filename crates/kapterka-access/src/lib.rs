// SPDX-FileCopyrightText: 2026 Kapterka Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory permission overlay.
//!
//! Five capability sets mirroring the users table, consulted synchronously
//! before any inbound action. Hydrated once at startup from the store's full
//! contents unioned with the configured bootstrap ids, then updated in
//! lockstep with every access-store mutation. The overlay never touches the
//! store itself; the orchestrator applies both sides of each change.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use strum::IntoEnumIterator;
use tracing::debug;

use kapterka_core::model::UserEntry;
use kapterka_core::types::{Capability, UserId};

/// The five in-memory capability sets.
pub struct AccessOverlay {
    sets: Mutex<HashMap<Capability, HashSet<UserId>>>,
}

impl Default for AccessOverlay {
    fn default() -> Self {
        Self::new()
    }
}

impl AccessOverlay {
    /// An overlay with every set empty.
    pub fn new() -> Self {
        let sets = Capability::iter().map(|c| (c, HashSet::new())).collect();
        Self {
            sets: Mutex::new(sets),
        }
    }

    /// Builds the overlay from the persisted entries unioned with bootstrap
    /// grants (capability, ids) that may not be stored yet.
    pub fn hydrate(entries: &[UserEntry], bootstrap: &[(Capability, Vec<UserId>)]) -> Self {
        let overlay = Self::new();
        {
            let mut sets = overlay.sets.lock().expect("overlay lock poisoned");
            for entry in entries {
                for capability in Capability::iter() {
                    if entry.flag(capability) {
                        sets.entry(capability).or_default().insert(entry.user_id);
                    }
                }
            }
            for (capability, ids) in bootstrap {
                sets.entry(*capability).or_default().extend(ids.iter().copied());
            }
        }
        debug!(users = entries.len(), "access overlay hydrated");
        overlay
    }

    /// Whether the user holds the capability.
    pub fn allows(&self, user_id: UserId, capability: Capability) -> bool {
        self.sets
            .lock()
            .expect("overlay lock poisoned")
            .get(&capability)
            .is_some_and(|set| set.contains(&user_id))
    }

    pub fn grant(&self, user_id: UserId, capability: Capability) {
        self.sets
            .lock()
            .expect("overlay lock poisoned")
            .entry(capability)
            .or_default()
            .insert(user_id);
    }

    pub fn revoke(&self, user_id: UserId, capability: Capability) {
        self.sets
            .lock()
            .expect("overlay lock poisoned")
            .entry(capability)
            .or_default()
            .remove(&user_id);
    }

    /// Removes the user from every capability set.
    pub fn revoke_all(&self, user_id: UserId) {
        let mut sets = self.sets.lock().expect("overlay lock poisoned");
        for set in sets.values_mut() {
            set.remove(&user_id);
        }
    }

    /// Current members of one capability set, for notification fan-out.
    pub fn members(&self, capability: Capability) -> Vec<UserId> {
        self.sets
            .lock()
            .expect("overlay lock poisoned")
            .get(&capability)
            .map(|set| set.iter().copied().collect())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kapterka_core::model::parse_timestamp;

    fn entry(id: i64, flags: &[Capability]) -> UserEntry {
        let mut entry = UserEntry::new(
            UserId(id),
            "@user",
            parse_timestamp("2026-01-01T00:00:00").unwrap(),
        );
        for capability in flags {
            entry.set_flag(*capability, true);
        }
        entry
    }

    #[test]
    fn hydrate_unions_store_and_bootstrap() {
        let entries = vec![entry(1, &[Capability::UseBot])];
        let bootstrap = vec![(Capability::UseBot, vec![UserId(2)])];
        let overlay = AccessOverlay::hydrate(&entries, &bootstrap);

        assert!(overlay.allows(UserId(1), Capability::UseBot));
        assert!(overlay.allows(UserId(2), Capability::UseBot));
        assert!(!overlay.allows(UserId(2), Capability::Complete));
    }

    #[test]
    fn grant_and_revoke_track_single_capabilities() {
        let overlay = AccessOverlay::new();
        overlay.grant(UserId(5), Capability::ManageAccess);
        assert!(overlay.allows(UserId(5), Capability::ManageAccess));
        overlay.revoke(UserId(5), Capability::ManageAccess);
        assert!(!overlay.allows(UserId(5), Capability::ManageAccess));
    }

    #[test]
    fn revoke_all_cascades_across_every_set() {
        let overlay = AccessOverlay::new();
        for capability in Capability::iter() {
            overlay.grant(UserId(9), capability);
        }
        overlay.revoke_all(UserId(9));
        for capability in Capability::iter() {
            assert!(
                !overlay.allows(UserId(9), capability),
                "{capability} should be revoked"
            );
        }
    }

    #[test]
    fn members_lists_a_capability_set() {
        let overlay = AccessOverlay::new();
        overlay.grant(UserId(1), Capability::NotifyRequests);
        overlay.grant(UserId(2), Capability::NotifyRequests);
        let mut members = overlay.members(Capability::NotifyRequests);
        members.sort();
        assert_eq!(members, vec![UserId(1), UserId(2)]);
    }
}
