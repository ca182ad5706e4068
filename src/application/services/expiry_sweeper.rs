//! Background task that reconciles room occupancy with the booking ledger.
//!
//! Runs in a tokio::spawn loop. On each tick, rooms still flagged occupied
//! whose ledger holds no entry containing "now" get the flag cleared. The
//! check is stateless, so ticks are idempotent and a missed tick
//! self-corrects on the next successful run. Ledger entries are never
//! deleted; history stays.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use metrics::counter;
use tokio::time::Duration;
use tracing::{info, warn};

use crate::domain::{DomainResult, RepositoryProvider};
use crate::shared::shutdown::ShutdownSignal;

/// Configuration for occupancy sweeps.
#[derive(Debug, Clone)]
pub struct SweeperConfig {
    /// How often to scan for expired stays (in seconds)
    pub check_interval_secs: u64,
}

impl Default for SweeperConfig {
    fn default() -> Self {
        Self {
            // Once per day; stays expire at checkout-day granularity
            check_interval_secs: 86_400,
        }
    }
}

/// Expiry sweeper service.
///
/// The interval loop only ever feeds `Utc::now()` into [`sweep_at`]; tests
/// drive `sweep_at` directly with a fixed instant.
pub struct ExpirySweeper {
    repos: Arc<dyn RepositoryProvider>,
    config: SweeperConfig,
}

impl ExpirySweeper {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self {
            repos,
            config: SweeperConfig::default(),
        }
    }

    pub fn with_config(mut self, config: SweeperConfig) -> Self {
        self.config = config;
        self
    }

    /// Start the sweeper background task.
    ///
    /// A failed tick logs and waits for the next one; the loop only exits on
    /// shutdown.
    pub fn start(&self, shutdown: ShutdownSignal) {
        let repos = self.repos.clone();
        let interval_secs = self.config.check_interval_secs;

        tokio::spawn(async move {
            info!(
                check_interval = interval_secs,
                "🧹 Occupancy sweeper started"
            );

            let mut interval = tokio::time::interval(Duration::from_secs(interval_secs));

            loop {
                tokio::select! {
                    _ = interval.tick() => {
                        match sweep_at(&repos, Utc::now()).await {
                            Ok(released) if released > 0 => {
                                info!(released, "Cleared occupancy for expired stays");
                            }
                            Ok(_) => {}
                            Err(e) => {
                                warn!(error = %e, "Occupancy sweep error");
                            }
                        }
                    }
                    _ = shutdown.notified().wait() => {
                        info!("🧹 Occupancy sweeper shutting down");
                        break;
                    }
                }
            }

            info!("🧹 Occupancy sweeper stopped");
        });
    }
}

/// Clear the occupied flag of every room whose ledger holds no entry
/// containing `now`. Returns how many rooms were released.
pub async fn sweep_at(
    repos: &Arc<dyn RepositoryProvider>,
    now: DateTime<Utc>,
) -> DomainResult<usize> {
    let occupied = repos.rooms().find_occupied().await?;

    let mut released = 0;
    for room in occupied {
        let entries = repos.bookings().entries_for_room(&room.id).await?;
        let still_occupied = entries.iter().any(|entry| entry.period.contains(now));

        if !still_occupied {
            if let Err(e) = repos.rooms().set_occupied(&room.id, false).await {
                warn!(room_id = %room.id, error = %e, "Failed to release room");
                continue;
            }
            released += 1;
        }
    }

    if released > 0 {
        counter!("rooms_released_total").increment(released as u64);
    }

    Ok(released)
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        Booking, BookingRepository, DateRange, GuestContact, Room, RoomCategory, RoomRepository,
    };
    use crate::infrastructure::storage::InMemoryStorage;
    use chrono::TimeZone;
    use rust_decimal::Decimal;

    fn day(d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, d, 0, 0, 0).unwrap()
    }

    async fn occupied_room_with_stay(from: u32, to: u32) -> Arc<InMemoryStorage> {
        let store = Arc::new(InMemoryStorage::new());
        store
            .save(Room::new("RM-101", "HTL-1", "101", RoomCategory::Single, Decimal::new(9000, 2)))
            .await
            .unwrap();
        store
            .append(Booking::new(
                "HTL-1",
                vec!["RM-101".to_string()],
                DateRange::new(day(from), day(to)).unwrap(),
                Decimal::new(36000, 2),
                GuestContact {
                    name: "Edsger Dijkstra".to_string(),
                    email: "edsger@example.com".to_string(),
                    phone: None,
                },
            ))
            .await
            .unwrap();
        store.set_occupied("RM-101", true).await.unwrap();
        store
    }

    #[tokio::test]
    async fn releases_room_after_checkout() {
        let store = occupied_room_with_stay(1, 5).await;
        let repos: Arc<dyn RepositoryProvider> = store.clone();

        let released = sweep_at(&repos, day(6)).await.unwrap();
        assert_eq!(released, 1);

        let room = store.rooms().find_by_id("RM-101").await.unwrap().unwrap();
        assert!(!room.occupied);

        // Ledger entries are never deleted
        assert_eq!(store.entries_for_room("RM-101").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn keeps_room_during_stay() {
        let store = occupied_room_with_stay(1, 5).await;
        let repos: Arc<dyn RepositoryProvider> = store.clone();

        let released = sweep_at(&repos, day(3)).await.unwrap();
        assert_eq!(released, 0);

        let room = store.rooms().find_by_id("RM-101").await.unwrap().unwrap();
        assert!(room.occupied);
    }

    #[tokio::test]
    async fn sweep_is_idempotent() {
        let store = occupied_room_with_stay(1, 5).await;
        let repos: Arc<dyn RepositoryProvider> = store.clone();

        assert_eq!(sweep_at(&repos, day(6)).await.unwrap(), 1);
        // No time advances between runs: the second pass is a no-op
        assert_eq!(sweep_at(&repos, day(6)).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn checkout_instant_itself_releases() {
        // Half-open period: the stay no longer contains its checkout instant
        let store = occupied_room_with_stay(1, 5).await;
        let repos: Arc<dyn RepositoryProvider> = store.clone();

        assert_eq!(sweep_at(&repos, day(5)).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn released_room_shows_up_in_future_availability() {
        use crate::application::services::availability::AvailabilityService;

        let store = occupied_room_with_stay(1, 5).await;
        let repos: Arc<dyn RepositoryProvider> = store.clone();

        assert_eq!(sweep_at(&repos, day(6)).await.unwrap(), 1);

        let availability = AvailabilityService::new(repos);
        let rooms = availability
            .find_available_rooms("HTL-1", day(10), day(12))
            .await
            .unwrap();
        assert_eq!(rooms.len(), 1);
        assert_eq!(rooms[0].id, "RM-101");
        assert!(!rooms[0].occupied);
    }

    #[tokio::test]
    async fn stale_flag_without_ledger_entry_is_cleared() {
        let store = Arc::new(InMemoryStorage::new());
        store
            .save(Room::new("RM-101", "HTL-1", "101", RoomCategory::Single, Decimal::new(9000, 2)))
            .await
            .unwrap();
        store.set_occupied("RM-101", true).await.unwrap();

        let repos: Arc<dyn RepositoryProvider> = store.clone();
        assert_eq!(sweep_at(&repos, day(1)).await.unwrap(), 1);
    }
}
