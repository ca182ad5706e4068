//! Availability DTOs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::Room;

/// Query range for an availability lookup (RFC 3339 or YYYY-MM-DD)
#[derive(Debug, Deserialize, ToSchema, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AvailabilityQuery {
    /// Requested check-in instant
    pub check_in: String,
    /// Requested check-out instant (exclusive)
    pub check_out: String,
}

/// A room free over the requested range
#[derive(Debug, Serialize, ToSchema)]
pub struct AvailableRoomDto {
    pub room_id: String,
    pub room_number: String,
    pub category: String,
    /// Price per night, decimal string (e.g. "120.00")
    pub price: String,
}

impl From<Room> for AvailableRoomDto {
    fn from(room: Room) -> Self {
        Self {
            room_id: room.id,
            room_number: room.room_number,
            category: room.category.as_str().to_string(),
            price: room.price.to_string(),
        }
    }
}
