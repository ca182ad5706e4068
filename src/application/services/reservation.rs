//! Reservation transaction manager
//!
//! The one component that must block or retry for correctness: committing a
//! booking re-validates every requested room against the ledger *inside* the
//! rooms' critical sections, so no two confirmed bookings can ever overlap
//! on the same room, regardless of request interleaving. Cancellation routes
//! through the same locks.
//!
//! The availability snapshot a caller saw beforehand is advisory only; this
//! service is where "still free?" is decided.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use metrics::counter;
use rust_decimal::Decimal;
use tracing::{info, warn};
use uuid::Uuid;

use crate::domain::{
    Booking, DateRange, DomainError, DomainResult, GuestContact, RepositoryProvider,
};
use crate::shared::retry::{retry_with_backoff, RetryConfig};

use super::room_locks::RoomLocks;

/// Configuration for reservation commits.
#[derive(Debug, Clone)]
pub struct ReservationConfig {
    /// How long a commit may wait for its room locks before failing with a
    /// retryable error instead of queueing behind a hot room.
    pub lock_timeout: Duration,
    /// Retry policy for transient store failures during check-or-commit.
    pub retry: RetryConfig,
}

impl Default for ReservationConfig {
    fn default() -> Self {
        Self {
            lock_timeout: Duration::from_secs(5),
            retry: RetryConfig::default(),
        }
    }
}

/// A reservation request as received from the booking surface.
#[derive(Debug, Clone)]
pub struct ReservationRequest {
    pub hotel_id: String,
    pub room_ids: Vec<String>,
    pub check_in: DateTime<Utc>,
    pub check_out: DateTime<Utc>,
    pub guest: GuestContact,
    pub total_price: Decimal,
}

pub struct ReservationService {
    repos: Arc<dyn RepositoryProvider>,
    locks: RoomLocks,
    config: ReservationConfig,
}

impl ReservationService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self {
            repos,
            locks: RoomLocks::new(),
            config: ReservationConfig::default(),
        }
    }

    pub fn with_config(mut self, config: ReservationConfig) -> Self {
        self.config = config;
        self
    }

    /// Commit a reservation, atomically for the whole room set.
    ///
    /// All requested rooms are re-checked against the ledger under their
    /// locks; any busy room fails the entire request with `RoomConflict`
    /// (no partial writes). Validation failures and unknown rooms are
    /// reported without taking any lock.
    pub async fn reserve(&self, request: ReservationRequest) -> DomainResult<Booking> {
        let period = DateRange::new(request.check_in, request.check_out)?;

        if request.room_ids.is_empty() {
            return Err(DomainError::Validation(
                "at least one room must be requested".to_string(),
            ));
        }
        if request.total_price <= Decimal::ZERO {
            return Err(DomainError::Validation(format!(
                "total_price must be positive, got {}",
                request.total_price
            )));
        }

        let mut room_ids = request.room_ids.clone();
        room_ids.sort();
        room_ids.dedup();

        for room_id in &room_ids {
            let room = self
                .repos
                .rooms()
                .find_by_id(room_id)
                .await?
                .ok_or_else(|| DomainError::NotFound {
                    entity: "Room",
                    field: "id",
                    value: room_id.clone(),
                })?;
            if room.hotel_id != request.hotel_id {
                return Err(DomainError::Validation(format!(
                    "room {} does not belong to hotel {}",
                    room_id, request.hotel_id
                )));
            }
        }

        // Serialization point: nothing may append or remove entries for
        // these rooms until the guards drop.
        let _held = self.locks.acquire(&room_ids, self.config.lock_timeout).await?;

        let bookings = self.repos.bookings();
        let mut busy = Vec::new();
        for room_id in &room_ids {
            let entries = retry_with_backoff(
                self.config.retry.clone(),
                move || bookings.entries_for_room(room_id),
                |e| e.is_transient(),
                "entries_for_room",
            )
            .await?;

            if entries.iter().any(|entry| entry.period.overlaps(&period)) {
                busy.push(room_id.clone());
            }
        }

        if !busy.is_empty() {
            counter!("booking_conflicts_total").increment(1);
            info!(
                hotel_id = %request.hotel_id,
                rooms = ?busy,
                period = %period,
                "Reservation conflict"
            );
            return Err(DomainError::RoomConflict { rooms: busy });
        }

        let booking = Booking::new(
            request.hotel_id.clone(),
            room_ids.clone(),
            period,
            request.total_price,
            request.guest.clone(),
        );

        let to_append = booking.clone();
        retry_with_backoff(
            self.config.retry.clone(),
            move || bookings.append(to_append.clone()),
            |e| e.is_transient(),
            "ledger_append",
        )
        .await?;

        // Occupancy read model: flip rooms whose stay is already underway.
        // Failures here are logged only; the ledger already holds the truth
        // and the sweeper reconciles on its next tick.
        if booking.period.contains(Utc::now()) {
            for room_id in &room_ids {
                if let Err(e) = self.repos.rooms().set_occupied(room_id, true).await {
                    warn!(room_id = %room_id, error = %e, "Failed to flag room occupied");
                }
            }
        }

        counter!("bookings_created_total").increment(1);
        info!(
            booking_id = %booking.id,
            hotel_id = %booking.hotel_id,
            rooms = booking.room_ids.len(),
            nights = booking.period.nights(),
            "Booking confirmed"
        );

        Ok(booking)
    }

    /// Cancel a booking and free its rooms for the period.
    ///
    /// Acquires the same room locks as `reserve` so a concurrent commit for
    /// an overlapping range either sees the entry or its absence, never a
    /// half-removed state.
    pub async fn cancel(&self, booking_id: Uuid) -> DomainResult<Booking> {
        let booking = self
            .repos
            .bookings()
            .find_by_id(booking_id)
            .await?
            .ok_or_else(|| DomainError::NotFound {
                entity: "Booking",
                field: "id",
                value: booking_id.to_string(),
            })?;

        // room_ids are stored sorted and deduplicated
        let _held = self
            .locks
            .acquire(&booking.room_ids, self.config.lock_timeout)
            .await?;

        let bookings = self.repos.bookings();
        let removed = retry_with_backoff(
            self.config.retry.clone(),
            move || bookings.remove(booking_id),
            |e| e.is_transient(),
            "ledger_remove",
        )
        .await?;

        // A stay that was underway no longer occupies its rooms. No other
        // entry can contain "now" for these rooms while the removed one did.
        if removed.period.contains(Utc::now()) {
            for room_id in &removed.room_ids {
                if let Err(e) = self.repos.rooms().set_occupied(room_id, false).await {
                    warn!(room_id = %room_id, error = %e, "Failed to clear room occupancy");
                }
            }
        }

        counter!("bookings_cancelled_total").increment(1);
        info!(booking_id = %removed.id, "Booking cancelled");

        Ok(removed)
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{BookingRepository, Room, RoomCategory, RoomRepository};
    use crate::infrastructure::storage::InMemoryStorage;
    use async_trait::async_trait;
    use chrono::TimeZone;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn day(d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 7, d, 0, 0, 0).unwrap()
    }

    fn guest() -> GuestContact {
        GuestContact {
            name: "Ada Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            phone: Some("+44 20 7946 0000".to_string()),
        }
    }

    async fn seeded_storage() -> Arc<InMemoryStorage> {
        let store = Arc::new(InMemoryStorage::new());
        for (id, number) in [("RM-101", "101"), ("RM-102", "102"), ("RM-103", "103")] {
            store
                .save(Room::new(id, "HTL-1", number, RoomCategory::Double, Decimal::new(12000, 2)))
                .await
                .unwrap();
        }
        store
            .save(Room::new("RM-901", "HTL-9", "901", RoomCategory::Suite, Decimal::new(30000, 2)))
            .await
            .unwrap();
        store
    }

    fn service(store: Arc<InMemoryStorage>) -> ReservationService {
        ReservationService::new(store)
    }

    fn request(rooms: &[&str], from: u32, to: u32) -> ReservationRequest {
        ReservationRequest {
            hotel_id: "HTL-1".to_string(),
            room_ids: rooms.iter().map(|r| r.to_string()).collect(),
            check_in: day(from),
            check_out: day(to),
            guest: guest(),
            total_price: Decimal::new(48000, 2),
        }
    }

    #[tokio::test]
    async fn reserve_commits_a_free_room() {
        let store = seeded_storage().await;
        let svc = service(store.clone());

        let booking = svc.reserve(request(&["RM-101"], 1, 5)).await.unwrap();
        assert_eq!(booking.room_ids, vec!["RM-101".to_string()]);

        let entries = store.entries_for_room("RM-101").await.unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].id, booking.id);
    }

    #[tokio::test]
    async fn inverted_range_is_invalid_input() {
        let store = seeded_storage().await;
        let svc = service(store);

        let err = svc.reserve(request(&["RM-101"], 10, 3)).await.unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[tokio::test]
    async fn empty_room_set_is_invalid_input() {
        let store = seeded_storage().await;
        let svc = service(store);

        let err = svc.reserve(request(&[], 1, 5)).await.unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[tokio::test]
    async fn non_positive_price_is_invalid_input() {
        let store = seeded_storage().await;
        let svc = service(store);

        let mut req = request(&["RM-101"], 1, 5);
        req.total_price = Decimal::ZERO;
        let err = svc.reserve(req).await.unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[tokio::test]
    async fn unknown_room_is_not_found() {
        let store = seeded_storage().await;
        let svc = service(store);

        let err = svc.reserve(request(&["RM-777"], 1, 5)).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { entity: "Room", .. }));
    }

    #[tokio::test]
    async fn room_of_other_hotel_is_invalid_input() {
        let store = seeded_storage().await;
        let svc = service(store);

        let err = svc.reserve(request(&["RM-901"], 1, 5)).await.unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[tokio::test]
    async fn duplicate_room_ids_are_collapsed() {
        let store = seeded_storage().await;
        let svc = service(store);

        let booking = svc
            .reserve(request(&["RM-101", "RM-101"], 1, 5))
            .await
            .unwrap();
        assert_eq!(booking.room_ids, vec!["RM-101".to_string()]);
    }

    #[tokio::test]
    async fn overlapping_reserve_conflicts_naming_busy_rooms() {
        let store = seeded_storage().await;
        let svc = service(store.clone());

        svc.reserve(request(&["RM-101"], 1, 5)).await.unwrap();

        let err = svc
            .reserve(request(&["RM-101", "RM-102"], 3, 6))
            .await
            .unwrap_err();
        match err {
            DomainError::RoomConflict { rooms } => {
                assert_eq!(rooms, vec!["RM-101".to_string()]);
            }
            other => panic!("expected RoomConflict, got {:?}", other),
        }

        // No partial writes: the free room stayed untouched
        assert!(store.entries_for_room("RM-102").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn same_day_turnover_does_not_conflict() {
        let store = seeded_storage().await;
        let svc = service(store);

        svc.reserve(request(&["RM-101"], 1, 5)).await.unwrap();
        // check-in on the previous booking's check-out day
        svc.reserve(request(&["RM-101"], 5, 7)).await.unwrap();
    }

    #[tokio::test]
    async fn cancel_frees_the_range() {
        let store = seeded_storage().await;
        let svc = service(store);

        let booking = svc.reserve(request(&["RM-101"], 1, 5)).await.unwrap();
        assert!(svc.reserve(request(&["RM-101"], 2, 4)).await.is_err());

        svc.cancel(booking.id).await.unwrap();
        svc.reserve(request(&["RM-101"], 2, 4)).await.unwrap();
    }

    #[tokio::test]
    async fn cancel_unknown_booking_is_not_found() {
        let store = seeded_storage().await;
        let svc = service(store);

        let err = svc.cancel(Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { entity: "Booking", .. }));
    }

    #[tokio::test]
    async fn occupancy_flag_never_gates_reserve() {
        let store = seeded_storage().await;
        // Stale flag: room marked occupied with an empty ledger
        store.set_occupied("RM-101", true).await.unwrap();

        let svc = service(store);
        svc.reserve(request(&["RM-101"], 1, 5)).await.unwrap();
    }

    #[tokio::test]
    async fn current_stay_flips_occupancy() {
        let store = seeded_storage().await;
        let svc = service(store.clone());

        let now = Utc::now();
        let req = ReservationRequest {
            hotel_id: "HTL-1".to_string(),
            room_ids: vec!["RM-101".to_string()],
            check_in: now - chrono::Duration::hours(1),
            check_out: now + chrono::Duration::days(2),
            guest: guest(),
            total_price: Decimal::new(24000, 2),
        };
        let booking = svc.reserve(req).await.unwrap();

        let room = store.rooms().find_by_id("RM-101").await.unwrap().unwrap();
        assert!(room.occupied);

        svc.cancel(booking.id).await.unwrap();
        let room = store.rooms().find_by_id("RM-101").await.unwrap().unwrap();
        assert!(!room.occupied);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 8)]
    async fn race_on_one_room_admits_exactly_one_winner() {
        let store = seeded_storage().await;
        let svc = Arc::new(service(store.clone()));

        let mut handles = Vec::new();
        for _ in 0..8 {
            let svc = svc.clone();
            handles.push(tokio::spawn(async move {
                svc.reserve(request(&["RM-101"], 1, 3)).await
            }));
        }

        let mut confirmed = 0;
        let mut conflicts = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => confirmed += 1,
                Err(DomainError::RoomConflict { rooms }) => {
                    assert_eq!(rooms, vec!["RM-101".to_string()]);
                    conflicts += 1;
                }
                Err(other) => panic!("unexpected error: {:?}", other),
            }
        }

        assert_eq!(confirmed, 1);
        assert_eq!(conflicts, 7);

        // The ledger holds exactly one entry for the room
        assert_eq!(store.entries_for_room("RM-101").await.unwrap().len(), 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 8)]
    async fn disjoint_room_sets_both_succeed() {
        let store = seeded_storage().await;
        let svc = Arc::new(service(store));

        let a = {
            let svc = svc.clone();
            tokio::spawn(async move { svc.reserve(request(&["RM-101"], 1, 5)).await })
        };
        let b = {
            let svc = svc.clone();
            tokio::spawn(async move { svc.reserve(request(&["RM-102"], 1, 5)).await })
        };

        a.await.unwrap().unwrap();
        b.await.unwrap().unwrap();
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 8)]
    async fn multi_room_commit_is_all_or_nothing_under_contention() {
        let store = seeded_storage().await;
        let svc = Arc::new(service(store.clone()));

        let mut handles = Vec::new();
        for _ in 0..6 {
            let svc = svc.clone();
            handles.push(tokio::spawn(async move {
                svc.reserve(request(&["RM-101", "RM-102", "RM-103"], 10, 12)).await
            }));
        }

        let mut confirmed = 0;
        for handle in handles {
            if handle.await.unwrap().is_ok() {
                confirmed += 1;
            }
        }
        assert_eq!(confirmed, 1);

        for room in ["RM-101", "RM-102", "RM-103"] {
            assert_eq!(store.entries_for_room(room).await.unwrap().len(), 1);
        }
    }

    // ── Transient store failures ───────────────────────────────

    /// Ledger wrapper that fails reads a configured number of times before
    /// delegating; exercises the bounded retry inside the commit path.
    struct FlakyStore {
        inner: Arc<InMemoryStorage>,
        read_failures: AtomicU32,
    }

    #[async_trait]
    impl BookingRepository for FlakyStore {
        async fn append(&self, booking: Booking) -> DomainResult<()> {
            self.inner.append(booking).await
        }

        async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Booking>> {
            BookingRepository::find_by_id(self.inner.as_ref(), id).await
        }

        async fn entries_for_room(&self, room_id: &str) -> DomainResult<Vec<Booking>> {
            let remaining = self.read_failures.load(Ordering::SeqCst);
            if remaining > 0 {
                self.read_failures.store(remaining - 1, Ordering::SeqCst);
                return Err(DomainError::Storage("ledger unreachable".to_string()));
            }
            self.inner.entries_for_room(room_id).await
        }

        async fn remove(&self, id: Uuid) -> DomainResult<Booking> {
            self.inner.remove(id).await
        }

        async fn find_all(&self) -> DomainResult<Vec<Booking>> {
            self.inner.find_all().await
        }
    }

    #[async_trait]
    impl RoomRepository for FlakyStore {
        async fn save(&self, room: Room) -> DomainResult<()> {
            RoomRepository::save(self.inner.as_ref(), room).await
        }

        async fn find_by_id(&self, id: &str) -> DomainResult<Option<Room>> {
            RoomRepository::find_by_id(self.inner.as_ref(), id).await
        }

        async fn find_by_hotel(&self, hotel_id: &str) -> DomainResult<Vec<Room>> {
            self.inner.find_by_hotel(hotel_id).await
        }

        async fn set_occupied(&self, id: &str, occupied: bool) -> DomainResult<()> {
            self.inner.set_occupied(id, occupied).await
        }

        async fn find_occupied(&self) -> DomainResult<Vec<Room>> {
            self.inner.find_occupied().await
        }
    }

    impl RepositoryProvider for FlakyStore {
        fn rooms(&self) -> &dyn RoomRepository {
            self
        }

        fn bookings(&self) -> &dyn BookingRepository {
            self
        }
    }

    fn fast_retry() -> ReservationConfig {
        ReservationConfig {
            lock_timeout: Duration::from_millis(200),
            retry: RetryConfig {
                max_attempts: 3,
                initial_delay: Duration::from_millis(1),
                backoff_multiplier: 2.0,
                max_delay: Duration::from_millis(5),
            },
        }
    }

    #[tokio::test]
    async fn transient_ledger_failure_is_retried() {
        let flaky = Arc::new(FlakyStore {
            inner: seeded_storage().await,
            read_failures: AtomicU32::new(2),
        });
        let svc = ReservationService::new(flaky).with_config(fast_retry());

        svc.reserve(request(&["RM-101"], 1, 5)).await.unwrap();
    }

    #[tokio::test]
    async fn exhausted_retries_surface_storage_error() {
        let flaky = Arc::new(FlakyStore {
            inner: seeded_storage().await,
            read_failures: AtomicU32::new(10),
        });
        let svc = ReservationService::new(flaky).with_config(fast_retry());

        let err = svc.reserve(request(&["RM-101"], 1, 5)).await.unwrap_err();
        assert!(matches!(err, DomainError::Storage(_)));
        assert!(err.is_retryable());
    }
}
