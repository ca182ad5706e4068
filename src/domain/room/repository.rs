//! Room repository interface

use async_trait::async_trait;

use super::model::Room;
use crate::domain::repositories::DomainResult;

#[async_trait]
pub trait RoomRepository: Send + Sync {
    /// Register a room. Owned by the room-management collaborator and by
    /// test/demo seeding; rejects duplicate ids.
    async fn save(&self, room: Room) -> DomainResult<()>;

    /// Find room by ID
    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Room>>;

    /// All rooms belonging to a hotel; empty when the hotel has none
    /// (not an error at this layer).
    async fn find_by_hotel(&self, hotel_id: &str) -> DomainResult<Vec<Room>>;

    /// Refresh the derived occupancy read model for a room.
    async fn set_occupied(&self, id: &str, occupied: bool) -> DomainResult<()>;

    /// All rooms currently flagged occupied (expiry sweeper scan).
    async fn find_occupied(&self) -> DomainResult<Vec<Room>>;
}
