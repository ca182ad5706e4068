//! Room registry DTOs

use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::Room;

/// Registry view of a room
#[derive(Debug, Serialize, ToSchema)]
pub struct RoomDto {
    pub room_id: String,
    pub hotel_id: String,
    pub room_number: String,
    pub category: String,
    /// Price per night, decimal string (e.g. "120.00")
    pub price: String,
    /// Derived occupancy read model (the ledger stays authoritative)
    pub occupied: bool,
}

impl From<Room> for RoomDto {
    fn from(room: Room) -> Self {
        Self {
            room_id: room.id,
            hotel_id: room.hotel_id,
            room_number: room.room_number,
            category: room.category.as_str().to_string(),
            price: room.price.to_string(),
            occupied: room.occupied,
        }
    }
}
