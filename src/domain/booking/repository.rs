//! Booking ledger interface
//!
//! The ledger is the single source of truth for "is room R busy during
//! [a, b)". `append` is the only write path for creation; `append` and
//! `remove` for a shared room must both happen under the reservation
//! service's room locks so committed entries never overlap.

use async_trait::async_trait;
use uuid::Uuid;

use super::model::Booking;
use crate::domain::repositories::DomainResult;

#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Append a new, already-validated entry. Callers must hold the room
    /// locks for every room the entry references.
    async fn append(&self, booking: Booking) -> DomainResult<()>;

    /// Find booking by ID
    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Booking>>;

    /// All entries referencing the room, history included; callers filter.
    async fn entries_for_room(&self, room_id: &str) -> DomainResult<Vec<Booking>>;

    /// Delete a ledger entry (cancellation flow) and return it.
    /// Same lock discipline as `append`.
    async fn remove(&self, id: Uuid) -> DomainResult<Booking>;

    /// All entries (any state)
    async fn find_all(&self) -> DomainResult<Vec<Booking>>;
}
