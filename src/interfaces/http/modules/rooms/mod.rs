pub mod dto;
pub mod handlers;

pub use dto::RoomDto;
pub use handlers::{get_room, list_hotel_rooms, RoomAppState};
