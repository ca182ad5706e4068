pub mod dto;
pub mod handlers;

pub use dto::{AvailabilityQuery, AvailableRoomDto};
pub use handlers::{get_availability, AvailabilityAppState};
