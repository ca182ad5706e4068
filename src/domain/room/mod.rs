pub mod model;
pub mod repository;

pub use model::{Room, RoomCategory};
pub use repository::RoomRepository;
