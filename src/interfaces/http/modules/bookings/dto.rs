//! Booking DTOs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::Booking;

/// Guest contact details for a booking request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct GuestContactDto {
    #[validate(length(min = 1, max = 120))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    pub phone: Option<String>,
}

/// Request to reserve one or more rooms
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateBookingRequest {
    /// Hotel owning every requested room
    #[validate(length(min = 1))]
    pub hotel_id: String,
    /// Rooms to reserve as one atomic unit
    #[validate(length(min = 1, message = "at least one room must be requested"))]
    pub room_ids: Vec<String>,
    /// Check-in instant (RFC 3339 or YYYY-MM-DD)
    pub check_in: String,
    /// Check-out instant, exclusive (RFC 3339 or YYYY-MM-DD)
    pub check_out: String,
    #[validate(nested)]
    pub guest: GuestContactDto,
    /// Total price for the whole stay, decimal string (e.g. "480.00")
    pub total_price: String,
}

/// Outcome of a reservation attempt
#[derive(Debug, Serialize, ToSchema)]
pub struct CreateBookingResponse {
    /// Present when status is "confirmed"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub booking_id: Option<String>,
    /// "confirmed" | "conflict" | "invalid" | "not_found" | "retry"
    pub status: String,
    /// Rooms that were no longer available (status "conflict")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rooms: Option<Vec<String>>,
    pub message: Option<String>,
}

/// Booking details in API responses
#[derive(Debug, Serialize, ToSchema)]
pub struct BookingDto {
    pub booking_id: String,
    pub hotel_id: String,
    pub room_ids: Vec<String>,
    pub check_in: String,
    pub check_out: String,
    pub nights: i64,
    /// Decimal string (e.g. "480.00")
    pub total_price: String,
    pub guest_name: String,
    pub guest_email: String,
    pub guest_phone: Option<String>,
    pub created_at: String,
}

impl From<Booking> for BookingDto {
    fn from(b: Booking) -> Self {
        Self {
            booking_id: b.id.to_string(),
            hotel_id: b.hotel_id,
            room_ids: b.room_ids,
            check_in: b.period.check_in().to_rfc3339(),
            check_out: b.period.check_out().to_rfc3339(),
            nights: b.period.nights(),
            total_price: b.total_price.to_string(),
            guest_name: b.guest.name,
            guest_email: b.guest.email,
            guest_phone: b.guest.phone,
            created_at: b.created_at.to_rfc3339(),
        }
    }
}

/// Response from cancelling a booking
#[derive(Debug, Serialize, ToSchema)]
pub struct CancelBookingResponse {
    /// "cancelled" | "not_found"
    pub status: String,
    pub message: Option<String>,
}
