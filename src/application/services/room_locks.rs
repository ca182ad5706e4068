//! Per-room serialization points
//!
//! Every mutation of the booking ledger for a room (reserve commit, cancel)
//! must run inside that room's critical section. Locks are acquired in
//! sorted room-id order under a single deadline, so multi-room requests
//! cannot deadlock against each other and never block indefinitely on a hot
//! room.

use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::domain::{DomainError, DomainResult};

/// Registry of per-room async mutexes, keyed by room id.
#[derive(Clone, Default)]
pub struct RoomLocks {
    locks: Arc<DashMap<String, Arc<Mutex<()>>>>,
}

/// Guards for an acquired room set; releasing happens on drop.
#[derive(Debug)]
pub struct RoomLockSet {
    _guards: Vec<OwnedMutexGuard<()>>,
}

impl RoomLocks {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock_for(&self, room_id: &str) -> Arc<Mutex<()>> {
        self.locks
            .entry(room_id.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    /// Acquire the locks for `room_ids` within `timeout`.
    ///
    /// `room_ids` must be sorted and deduplicated; acquisition order is the
    /// deadlock-freedom argument. The timeout covers the whole set: on
    /// expiry every already-held guard is released and `LockTimeout` names
    /// the room that could not be acquired.
    pub async fn acquire(
        &self,
        room_ids: &[String],
        timeout: Duration,
    ) -> DomainResult<RoomLockSet> {
        debug_assert!(room_ids.windows(2).all(|w| w[0] < w[1]));

        let deadline = tokio::time::Instant::now() + timeout;
        let mut guards = Vec::with_capacity(room_ids.len());

        for room_id in room_ids {
            let lock = self.lock_for(room_id);
            match tokio::time::timeout_at(deadline, lock.lock_owned()).await {
                Ok(guard) => guards.push(guard),
                Err(_) => return Err(DomainError::LockTimeout(room_id.clone())),
            }
        }

        Ok(RoomLockSet { _guards: guards })
    }
}

// ── Tests ──────────────────────────────────────────────────────
