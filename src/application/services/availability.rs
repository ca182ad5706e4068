//! Availability snapshot service
//!
//! Read-only view over the room registry and the booking ledger. Results
//! are advisory: the reservation service re-validates under its locks
//! before committing, so this never takes a lock and may return slightly
//! stale data.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::domain::{DateRange, DomainError, DomainResult, RepositoryProvider, Room};

pub struct AvailabilityService {
    repos: Arc<dyn RepositoryProvider>,
}

impl AvailabilityService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    /// Rooms of `hotel_id` with no ledger entry overlapping
    /// `[check_in, check_out)`, sorted by room number.
    ///
    /// A hotel with no registered rooms is reported as not found;
    /// hotels exist here only through their rooms.
    pub async fn find_available_rooms(
        &self,
        hotel_id: &str,
        check_in: DateTime<Utc>,
        check_out: DateTime<Utc>,
    ) -> DomainResult<Vec<Room>> {
        let period = DateRange::new(check_in, check_out)?;

        let rooms = self.repos.rooms().find_by_hotel(hotel_id).await?;
        if rooms.is_empty() {
            return Err(DomainError::NotFound {
                entity: "Hotel",
                field: "id",
                value: hotel_id.to_string(),
            });
        }

        let mut available = Vec::with_capacity(rooms.len());
        for room in rooms {
            let entries = self.repos.bookings().entries_for_room(&room.id).await?;
            if entries.iter().all(|entry| !entry.period.overlaps(&period)) {
                available.push(room);
            }
        }

        debug!(
            hotel_id = %hotel_id,
            period = %period,
            available = available.len(),
            "Availability snapshot"
        );

        Ok(available)
    }
}

// ── Tests ──────────────────────────────────────────────────────
