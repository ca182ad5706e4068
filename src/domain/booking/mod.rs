pub mod model;
pub mod repository;

pub use model::{Booking, GuestContact};
pub use repository::BookingRepository;
